pub mod import;
pub mod influx;
pub mod prices;
