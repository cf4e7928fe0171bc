use chrono::{DateTime, Utc};
use influxdb::{Query as _, Timestamp, WriteQuery};

use crate::prices::PriceField;

pub const MEASUREMENT: &str = "prices";

#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub time: DateTime<Utc>,

    pub close: f64,

    pub high: f64,

    pub low: f64,

    pub open: f64,

    pub volume: f64,
}

impl PricePoint {
    /// Renders the point as one line of line protocol with a signed
    /// timestamp in seconds.
    pub fn to_line(&self) -> Result<String, influxdb::Error> {
        // `Timestamp` is unsigned, so the crate renders a placeholder that is
        // swapped for the real value.
        let line = WriteQuery::new(Timestamp::Seconds(0), MEASUREMENT)
            .add_field(PriceField::Close.as_str(), self.close)
            .add_field(PriceField::High.as_str(), self.high)
            .add_field(PriceField::Low.as_str(), self.low)
            .add_field(PriceField::Open.as_str(), self.open)
            .add_field(PriceField::Volume.as_str(), self.volume)
            .build()?
            .get();

        let series = line.rsplit_once(' ').map_or(line.as_str(), |(series, _)| series);

        Ok(format!("{series} {}", self.time.timestamp()))
    }
}
