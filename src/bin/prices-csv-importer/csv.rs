use std::fs::File;
use std::path::Path;
use std::vec;

use anyhow::{Context as _, Result};
use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter};

/// Raw CSV records of a price history file, header included.
pub enum CsvRows {
    Loaded(vec::IntoIter<StringRecord>),
    Streaming(StringRecordsIntoIter<File>),
}

impl CsvRows {
    /// Reads and parses the whole file up front.
    pub fn load(path: &Path) -> Result<Self> {
        let records = open_reader(path)?
            .into_records()
            .collect::<csv::Result<Vec<_>>>()
            .with_context(|| format!("failed to parse CSV file: {path:?}"))?;

        Ok(CsvRows::Loaded(records.into_iter()))
    }

    pub fn stream(path: &Path) -> Result<Self> {
        Ok(CsvRows::Streaming(open_reader(path)?.into_records()))
    }
}

impl Iterator for CsvRows {
    type Item = csv::Result<StringRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            CsvRows::Loaded(records) => records.next().map(Ok),
            CsvRows::Streaming(records) => records.next(),
        }
    }
}

fn open_reader(path: &Path) -> Result<csv::Reader<File>> {
    let file = File::open(path).with_context(|| format!("failed to open file: {path:?}"))?;

    // The header is skipped by position when importing.
    Ok(ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::*;

    fn temp_csv(name: &str, content: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "prices-csv-importer-{}-{name}.csv",
            std::process::id()
        ));
        fs::write(&path, content).unwrap();
        path
    }

    const CONTENT: &str = "\
time,close,high,low,open,volume
1700000000,100.5,110.2,90.1,95.0,1200
1700000060,101.5,111.2,91.1,96.0,1300
";

    #[test]
    fn load_keeps_header_as_first_record() {
        let path = temp_csv("load", CONTENT.as_bytes());

        let records: Vec<StringRecord> = CsvRows::load(&path)
            .unwrap()
            .collect::<csv::Result<_>>()
            .unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(&records[0][0], "time");
        assert_eq!(&records[2][1], "101.5");
    }

    #[test]
    fn stream_yields_same_records_as_load() {
        let path = temp_csv("stream", CONTENT.as_bytes());

        let loaded: Vec<StringRecord> = CsvRows::load(&path)
            .unwrap()
            .collect::<csv::Result<_>>()
            .unwrap();
        let streamed: Vec<StringRecord> = CsvRows::stream(&path)
            .unwrap()
            .collect::<csv::Result<_>>()
            .unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(loaded, streamed);
    }

    #[test]
    fn accepts_rows_of_different_lengths() {
        let path = temp_csv("flexible", b"a,b\n1,2,3\n");

        let records: Vec<StringRecord> = CsvRows::load(&path)
            .unwrap()
            .collect::<csv::Result<_>>()
            .unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(records[1].len(), 3);
    }

    #[test]
    fn load_fails_on_invalid_utf8() {
        let path = temp_csv("invalid", b"time,close\n\xff\xfe,1\n");

        let result = CsvRows::load(&path);
        fs::remove_file(&path).unwrap();

        assert!(result.is_err());
    }

    #[test]
    fn missing_file_fails_to_open() {
        let path = std::env::temp_dir().join("prices-csv-importer-does-not-exist.csv");

        assert!(CsvRows::load(&path).is_err());
        assert!(CsvRows::stream(&path).is_err());
    }
}
