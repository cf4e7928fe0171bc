use std::num::NonZeroUsize;

use anyhow::{Context as _, Result};
use log::debug;

use crate::influx::{Bucket, LineWriter, Organization, PointSink};
use crate::prices::PricePoint;

pub const DEFAULT_BATCH_SIZE: NonZeroUsize = NonZeroUsize::new(5000).unwrap();

/// Buffers points and writes them to one bucket in batches of `batch_size`.
///
/// Points still buffered when the writer is dropped without `close` are lost.
pub struct WriteApi<'a, W> {
    writer: &'a W,
    org: Organization,
    bucket: Bucket,
    batch_size: NonZeroUsize,
    buffer: Vec<String>,
}

impl<'a, W: LineWriter> WriteApi<'a, W> {
    pub fn new(writer: &'a W, org: Organization, bucket: Bucket, batch_size: NonZeroUsize) -> Self {
        Self {
            writer,
            org,
            bucket,
            batch_size,
            buffer: Vec::with_capacity(batch_size.get()),
        }
    }

    async fn flush(&mut self) -> Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }

        self.writer
            .write_lines(&self.org, &self.bucket, self.buffer.join("\n"))
            .await
            .with_context(|| format!("failed to write points to bucket: {}", self.bucket.name))?;

        debug!("flushed {} points to {}", self.buffer.len(), self.bucket.name);
        self.buffer.clear();

        Ok(())
    }
}

impl<W: LineWriter> PointSink for WriteApi<'_, W> {
    async fn write_point(&mut self, point: PricePoint) -> Result<()> {
        let line = point.to_line().context("failed to encode point")?;
        self.buffer.push(line);

        if self.buffer.len() >= self.batch_size.get() {
            self.flush().await?;
        }

        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.flush().await
    }
}
