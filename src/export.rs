//! CSV export of the hourly consumption series.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::series::ConsumptionSample;

/// Column header for the series export.
const HEADER: &str = "timestamp,consumption,cost";

/// Exports the hourly series to a CSV file at the given path.
///
/// Writes a header row followed by one data row per sample. Output is
/// deterministic for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(samples: &[ConsumptionSample], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(samples, buf)
}

/// Writes the hourly series as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(samples: &[ConsumptionSample], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for s in samples {
        wtr.write_record(&[
            s.timestamp.to_rfc3339(),
            format!("{:.2}", s.consumption),
            format!("{:.2}", s.cost),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::series::{LoadProfile, generate};

    fn sample_series() -> Vec<ConsumptionSample> {
        let reference = Utc.with_ymd_and_hms(2026, 8, 26, 12, 0, 0).unwrap();
        generate(reference, 24, &LoadProfile::default(), 8.5).expect("valid horizon")
    }

    #[test]
    fn header_and_row_count() {
        let samples = sample_series();
        let mut buf = Vec::new();
        write_csv(&samples, &mut buf).expect("export succeeds");

        let csv = String::from_utf8(buf).expect("valid UTF-8");
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("timestamp,consumption,cost"));
        assert_eq!(lines.count(), 24);
    }

    #[test]
    fn deterministic_output() {
        let samples = sample_series();
        let mut buf1 = Vec::new();
        let mut buf2 = Vec::new();
        write_csv(&samples, &mut buf1).expect("first export succeeds");
        write_csv(&samples, &mut buf2).expect("second export succeeds");
        assert_eq!(buf1, buf2);
    }

    #[test]
    fn rows_parse_back_as_timestamp_and_two_floats() {
        let samples = sample_series();
        let mut buf = Vec::new();
        write_csv(&samples, &mut buf).expect("export succeeds");

        let mut rdr = csv::ReaderBuilder::new().from_reader(buf.as_slice());
        let mut rows = 0;
        for record in rdr.records() {
            let rec = record.expect("row parses");
            assert!(rec[0].parse::<chrono::DateTime<Utc>>().is_ok());
            assert!(rec[1].parse::<f64>().is_ok());
            assert!(rec[2].parse::<f64>().is_ok());
            rows += 1;
        }
        assert_eq!(rows, 24);
    }
}
