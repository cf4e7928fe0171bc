mod field;
mod point;
mod row;

pub use field::*;
pub use point::*;
pub use row::*;
