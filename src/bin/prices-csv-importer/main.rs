mod args;
mod csv;

use std::process::ExitCode;

use anyhow::{Context as _, Result};
use args::Args;
use clap::Parser as _;
use env_logger::Env;
use log::{error, info};
use price_importer::{
    import::{BucketResolution, import_rows, resolve_destination},
    influx::{Destination, InfluxClient, LineWriter, WriteApi},
};

use crate::csv::CsvRows;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Err(e) = run().await {
        error!("{e:#}");
        return ExitCode::from(1);
    }

    ExitCode::from(0)
}

async fn run() -> Result<()> {
    dotenvy::dotenv().context("failed to load .env file")?;

    let args = match Args::try_parse() {
        Ok(args) => args,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => return Err(e).context("invalid arguments"),
    };

    let client = InfluxClient::new(args.url.clone(), args.token.clone())
        .context("failed to create InfluxDB client")?;

    import_file(&args, &client).await?;

    Ok(())
}

async fn import_file<C>(args: &Args, client: &C) -> Result<usize>
where
    C: Destination + LineWriter,
{
    // Open the input before touching the network.
    let rows = if args.stream {
        CsvRows::stream(&args.file)
    } else {
        CsvRows::load(&args.file)
    };
    let rows = rows.context("failed to read CSV file")?;

    let destination = resolve_destination(client, &args.org, &args.bucket).await?;
    match destination.resolution {
        BucketResolution::Created => info!("created bucket {}", destination.bucket.name),
        BucketResolution::Existing => info!("using existing bucket {}", destination.bucket.name),
    }

    let bucket_name = destination.bucket.name.clone();
    let mut writer = WriteApi::new(
        client,
        destination.organization,
        destination.bucket,
        args.batch_size,
    );

    let total = import_rows(rows, &mut writer).await?;

    info!("wrote {total} points from {:?} to bucket {bucket_name}", args.file);

    Ok(total)
}
