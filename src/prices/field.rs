use std::fmt;

/// Columns of a price history CSV row, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceField {
    Timestamp,
    Close,
    High,
    Low,
    Open,
    Volume,
}

impl PriceField {
    pub fn index(&self) -> usize {
        match self {
            PriceField::Timestamp => 0,
            PriceField::Close => 1,
            PriceField::High => 2,
            PriceField::Low => 3,
            PriceField::Open => 4,
            PriceField::Volume => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceField::Timestamp => "Timestamp",
            PriceField::Close => "Close",
            PriceField::High => "High",
            PriceField::Low => "Low",
            PriceField::Open => "Open",
            PriceField::Volume => "Volume",
        }
    }
}

impl fmt::Display for PriceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
