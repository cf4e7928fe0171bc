use std::{num::NonZeroUsize, path::PathBuf};

use clap::{Parser, builder::NonEmptyStringValueParser};
use price_importer::influx::DEFAULT_BATCH_SIZE;
use reqwest::Url;

#[derive(Debug, Parser)]
pub struct Args {
    /// CSV file with rows of: epoch seconds, close, high, low, open, volume
    pub file: PathBuf,

    #[arg(long, env = "INFLUX_URL")]
    pub url: Url,

    #[arg(long, env = "INFLUX_TOKEN", hide_env_values = true, value_parser = NonEmptyStringValueParser::new())]
    pub token: String,

    #[arg(long, env = "INFLUX_ORG", value_parser = NonEmptyStringValueParser::new())]
    pub org: String,

    #[arg(long, env = "INFLUX_BUCKET", value_parser = NonEmptyStringValueParser::new())]
    pub bucket: String,

    /// Number of points buffered before each write request
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: NonZeroUsize,

    /// Parse and write rows one at a time instead of loading the whole file first
    #[arg(long)]
    pub stream: bool,
}
