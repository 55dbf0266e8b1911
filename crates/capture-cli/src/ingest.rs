// File: crates/capture-cli/src/ingest.rs
// Summary: CSV column adapter; turns one named column of a delimited file into floats.
// Notes:
// - Default layout is a preamble line, then the header line, then one line of
//   units, then data rows, all separated by ';'.

use std::fs::File;
use std::io;
use std::path::PathBuf;

use capture_core::{ColumnSource, SourceError};
use log::{debug, info};

/// Layout of the CSV file being read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IngestOptions {
    /// Field separator byte.
    pub delimiter: u8,
    /// Zero-based line index of the header; earlier lines are skipped.
    pub header_row: usize,
    /// Rows directly after the header that are dropped (units, descriptions).
    pub skip_unit_rows: usize,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self { delimiter: b';', header_row: 1, skip_unit_rows: 1 }
    }
}

/// A CSV file on disk read through the `csv` crate.
#[derive(Clone, Debug)]
pub struct CsvColumnSource {
    path: PathBuf,
    options: IngestOptions,
}

impl CsvColumnSource {
    pub fn new(path: impl Into<PathBuf>, options: IngestOptions) -> Self {
        Self { path: path.into(), options }
    }

    fn open(&self) -> Result<File, SourceError> {
        File::open(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => SourceError::NotFound { path: self.path.clone() },
            _ => SourceError::Io(e),
        })
    }
}

fn format_err(err: csv::Error) -> SourceError {
    SourceError::Format(err.to_string())
}

impl ColumnSource for CsvColumnSource {
    fn read_column(&self, column: &str) -> Result<Vec<f64>, SourceError> {
        let file = self.open()?;
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(self.options.delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(file);
        let mut records = rdr.records();
        let schema_err = || SourceError::Schema { column: column.to_string() };

        for _ in 0..self.options.header_row {
            records.next().ok_or_else(schema_err)?.map_err(format_err)?;
        }

        let header = records.next().ok_or_else(schema_err)?.map_err(format_err)?;
        debug!("{}: header {:?}", self.path.display(), header.iter().collect::<Vec<_>>());
        let idx = header
            .iter()
            .position(|h| h.trim() == column)
            .ok_or_else(schema_err)?;

        for _ in 0..self.options.skip_unit_rows {
            if let Some(rec) = records.next() {
                rec.map_err(format_err)?;
            }
        }

        let mut out = Vec::new();
        for rec in records {
            let rec = rec.map_err(format_err)?;
            let row = rec.position().map_or(0, |p| p.line() as usize);
            let cell = rec.get(idx).unwrap_or("").trim();
            let value = cell
                .parse::<f64>()
                .map_err(|_| SourceError::Malformed { row, value: cell.to_string() })?;
            out.push(value);
        }

        info!("read {} values from column '{}' of {}", out.len(), column, self.path.display());
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use capture_core::{RangeCounter, SortedSeries};
    use std::io::Write;

    const STATION: &str = "\
Station 58220;;
DATE;PRESSION;TEMP
;hPa;C
2023-01-01;1013.5;4
2023-01-02; 998 ;5
2023-01-03;1013.5;-3
";

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(content.as_bytes()).expect("write csv");
        file
    }

    #[test]
    fn reads_column_with_default_layout() {
        let file = write_csv(STATION);
        let source = CsvColumnSource::new(file.path(), IngestOptions::default());
        assert_eq!(source.read_column("PRESSION").unwrap(), vec![1013.5, 998.0, 1013.5]);
        assert_eq!(source.read_column("TEMP").unwrap(), vec![4.0, 5.0, -3.0]);
    }

    #[test]
    fn custom_layout_without_preamble_or_units() {
        let file = write_csv("a,b\n1,2\n3,4\n");
        let options = IngestOptions { delimiter: b',', header_row: 0, skip_unit_rows: 0 };
        let source = CsvColumnSource::new(file.path(), options);
        assert_eq!(source.read_column("b").unwrap(), vec![2.0, 4.0]);
    }

    #[test]
    fn unknown_column_is_schema_error() {
        let file = write_csv(STATION);
        let source = CsvColumnSource::new(file.path(), IngestOptions::default());
        let err = source.read_column("HUMIDITY").unwrap_err();
        assert!(matches!(err, SourceError::Schema { ref column } if column == "HUMIDITY"));
    }

    #[test]
    fn file_shorter_than_preamble_is_schema_error() {
        let file = write_csv("only one line\n");
        let source = CsvColumnSource::new(file.path(), IngestOptions::default());
        assert!(matches!(source.read_column("PRESSION"), Err(SourceError::Schema { .. })));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("absent.csv");
        let source = CsvColumnSource::new(&path, IngestOptions::default());
        match source.read_column("PRESSION") {
            Err(SourceError::NotFound { path: p }) => assert_eq!(p, path),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn unparseable_cell_reports_line() {
        let file = write_csv("title\nX\nunit\n1.5\nn/a\n2\n");
        let source = CsvColumnSource::new(file.path(), IngestOptions::default());
        match source.read_column("X") {
            Err(SourceError::Malformed { row, value }) => {
                assert_eq!(row, 5);
                assert_eq!(value, "n/a");
            }
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn nan_cells_sort_after_every_reading() {
        let file = write_csv("title\nX\nunit\n2\n-nan\n1\nNaN\n");
        let source = CsvColumnSource::new(file.path(), IngestOptions::default());
        let mut series = SortedSeries::new();
        series.extend_from_source(&source, "X").unwrap();
        let counter = RangeCounter::from_series(series);
        assert_eq!(&counter.series().as_slice()[..2], &[1.0, 2.0]);
        assert_eq!(counter.between(0.5, 1.5), 1);
    }

    #[test]
    fn empty_cell_is_malformed() {
        let file = write_csv("title;\nA;B\nu;u\n1;2\n3;\n");
        let source = CsvColumnSource::new(file.path(), IngestOptions::default());
        assert!(matches!(source.read_column("B"), Err(SourceError::Malformed { row: 5, ref value }) if value.is_empty()));
    }

    #[test]
    fn short_row_is_malformed() {
        let file = write_csv("title;\nA;B\nu;u\n1;2\n3\n");
        let source = CsvColumnSource::new(file.path(), IngestOptions::default());
        assert!(matches!(source.read_column("B"), Err(SourceError::Malformed { row: 5, .. })));
        assert_eq!(source.read_column("A").unwrap(), vec![1.0, 3.0]);
    }
}
