mod bucket;
mod client;
mod organization;
mod write;

pub use bucket::*;
pub use client::*;
pub use organization::*;
pub use write::*;

use anyhow::Result;

use crate::prices::PricePoint;

/// Remote lookups that decide where points are written.
#[allow(async_fn_in_trait)]
pub trait Destination {
    async fn find_organization_by_name(&self, name: &str) -> Result<Organization>;

    async fn find_bucket_by_name(&self, org: &Organization, name: &str) -> Result<Option<Bucket>>;

    async fn create_bucket_with_name(&self, org: &Organization, name: &str) -> Result<Bucket>;
}

/// Sends a batch of newline separated line protocol, second precision, to a
/// bucket.
#[allow(async_fn_in_trait)]
pub trait LineWriter {
    async fn write_lines(&self, org: &Organization, bucket: &Bucket, lines: String) -> Result<()>;
}

/// Accepts points in order. Points may be buffered until `close`.
#[allow(async_fn_in_trait)]
pub trait PointSink {
    async fn write_point(&mut self, point: PricePoint) -> Result<()>;

    async fn close(&mut self) -> Result<()>;
}
