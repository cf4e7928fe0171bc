use anyhow::{Context as _, Result};
use csv::StringRecord;
use log::info;

use crate::influx::{Bucket, Destination, Organization, PointSink};
use crate::prices::parse_row;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketResolution {
    Created,
    Existing,
}

#[derive(Debug, Clone)]
pub struct ResolvedDestination {
    pub organization: Organization,

    pub bucket: Bucket,

    pub resolution: BucketResolution,
}

/// Looks up `org_name` and returns the bucket named `bucket_name` in it,
/// creating the bucket only when it does not exist yet.
pub async fn resolve_destination<D: Destination>(
    destination: &D,
    org_name: &str,
    bucket_name: &str,
) -> Result<ResolvedDestination> {
    let organization = destination
        .find_organization_by_name(org_name)
        .await
        .with_context(|| format!("failed to find organization: {org_name}"))?;

    let existing = destination
        .find_bucket_by_name(&organization, bucket_name)
        .await
        .with_context(|| format!("failed to find bucket: {bucket_name}"))?;

    if let Some(bucket) = existing {
        return Ok(ResolvedDestination {
            organization,
            bucket,
            resolution: BucketResolution::Existing,
        });
    }

    let bucket = destination
        .create_bucket_with_name(&organization, bucket_name)
        .await
        .with_context(|| format!("failed to create bucket: {bucket_name}"))?;

    Ok(ResolvedDestination {
        organization,
        bucket,
        resolution: BucketResolution::Created,
    })
}

/// Writes every record after the first to `sink` and closes it.
///
/// Stops at the first unreadable or unparsable record without closing the
/// sink. Returns the number of points written.
pub async fn import_rows<I, S>(rows: I, sink: &mut S) -> Result<usize>
where
    I: IntoIterator<Item = csv::Result<StringRecord>>,
    S: PointSink,
{
    let mut total = 0;

    for (index, result) in rows.into_iter().enumerate() {
        let record = result.with_context(|| format!("failed to read CSV row {index}"))?;

        // header
        if index == 0 {
            continue;
        }

        let point = parse_row(index, &record).context("failed to parse CSV row")?;

        info!("writing row {}", point.time);

        sink.write_point(point)
            .await
            .with_context(|| format!("failed to write row {index}"))?;
        total += 1;
    }

    sink.close().await.context("failed to flush points")?;

    Ok(total)
}
