//! Writing score reports and batch tables to disk.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;
use serde::Serialize;
use thiserror::Error;

use crate::batch::{BatchRecord, PairOutcome};
use crate::consts::GZ_EXT;
use crate::report::ScoreReport;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type ExportResult<T> = std::result::Result<T, ExportError>;

///
/// Output file, gzip-compressed when its path ends in `.gz`.
///
/// Call [OutputWriter::finish] when done: it flushes the buffer and, for
/// gzip output, writes the trailer and reports any error doing so.
///
pub enum OutputWriter {
    Plain(BufWriter<File>),
    Gzip(BufWriter<GzEncoder<File>>),
}

impl OutputWriter {
    pub fn create(path: &Path) -> ExportResult<Self> {
        let file = File::create(path)?;
        let is_gzipped = path.to_string_lossy().ends_with(GZ_EXT);

        let writer = if is_gzipped {
            OutputWriter::Gzip(BufWriter::new(GzEncoder::new(file, Compression::default())))
        } else {
            OutputWriter::Plain(BufWriter::new(file))
        };

        Ok(writer)
    }

    pub fn finish(self) -> ExportResult<()> {
        match self {
            OutputWriter::Plain(mut writer) => writer.flush()?,
            OutputWriter::Gzip(writer) => {
                let encoder = writer.into_inner().map_err(|e| e.into_error())?;
                encoder.finish()?;
            }
        }
        Ok(())
    }
}

impl Write for OutputWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            OutputWriter::Plain(writer) => writer.write(buf),
            OutputWriter::Gzip(writer) => writer.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            OutputWriter::Plain(writer) => writer.flush(),
            OutputWriter::Gzip(writer) => writer.flush(),
        }
    }
}

fn finish_csv(writer: csv::Writer<OutputWriter>) -> ExportResult<()> {
    let inner = writer.into_inner().map_err(|e| e.into_error())?;
    inner.finish()
}

#[derive(Serialize)]
struct BatchRow<'a> {
    golden_file: &'a str,
    detectron_file: &'a str,
    score: String,
    foundation_raw: String,
    relationship_raw: String,
    attribute_raw: String,
    total_deduction: String,
    band: &'a str,
    image_id: &'a str,
}

fn fixed(value: f64) -> String {
    format!("{:.2}", value)
}

impl<'a> From<&'a BatchRecord> for BatchRow<'a> {
    fn from(record: &'a BatchRecord) -> Self {
        let mut row = BatchRow {
            golden_file: &record.golden_file,
            detectron_file: &record.test_file,
            score: String::new(),
            foundation_raw: String::new(),
            relationship_raw: String::new(),
            attribute_raw: String::new(),
            total_deduction: String::new(),
            band: "",
            image_id: "",
        };

        match &record.outcome {
            PairOutcome::Scored(report) => {
                row.score = fixed(report.final_score);
                row.foundation_raw = fixed(report.foundation.raw_deduction);
                row.relationship_raw = fixed(report.relationship.raw_deduction);
                row.attribute_raw = fixed(report.attribute.raw_deduction);
                row.total_deduction = fixed(report.total_deduction);
                row.band = report.band.as_str();
                row.image_id = &report.image_id;
            }
            PairOutcome::Failed(_) => row.score = "Error".to_string(),
            PairOutcome::Skipped(_) => row.score = "Skipped".to_string(),
        }

        row
    }
}

///
/// Write one row per batch record.
///
/// Columns: golden_file, detectron_file, score, foundation_raw,
/// relationship_raw, attribute_raw, total_deduction, band, image_id.
/// Failed pairs carry `Error` in the score column and skipped pairs
/// `Skipped`; their other numeric columns stay empty.
///
/// # Arguments
/// - records: output of [crate::run_batch]
/// - path: destination, gzip-compressed when it ends in `.gz`
///
pub fn write_batch_csv(records: &[BatchRecord], path: &Path) -> ExportResult<()> {
    let mut writer = csv::Writer::from_writer(OutputWriter::create(path)?);
    for record in records {
        writer.serialize(BatchRow::from(record))?;
    }
    finish_csv(writer)
}

/// Pretty-printed JSON of one report.
pub fn write_report_json(report: &ScoreReport, path: &Path) -> ExportResult<()> {
    let mut writer = OutputWriter::create(path)?;
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer)?;
    writer.finish()
}

///
/// Per-metric table of one comparison: tier, metric, golden, test,
/// difference, deduction.
///
pub fn write_comparison_csv(report: &ScoreReport, path: &Path) -> ExportResult<()> {
    let mut writer = csv::Writer::from_writer(OutputWriter::create(path)?);
    for delta in &report.deltas {
        writer.serialize(delta)?;
    }
    finish_csv(writer)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use std::fs::read_to_string;
    use std::io::Read;

    use flate2::read::MultiGzDecoder;
    use pedscore_metrics::GraphAggregate;

    use crate::config::ScoringPolicy;
    use crate::report::score_labeled;

    fn report() -> ScoreReport {
        let golden = GraphAggregate {
            partnerships_count: 3,
            divorces_count: 1,
            ..Default::default()
        };
        let test = GraphAggregate {
            partnerships_count: 2,
            ..Default::default()
        };
        score_labeled(
            "1_golden.json",
            "1_detectron.json",
            &golden,
            &test,
            &ScoringPolicy::default(),
        )
    }

    fn records() -> Vec<BatchRecord> {
        vec![
            BatchRecord {
                id: "1".to_string(),
                golden_file: "1_golden.json".to_string(),
                test_file: "1_detectron.json".to_string(),
                outcome: PairOutcome::Scored(Box::new(report())),
            },
            BatchRecord {
                id: "2".to_string(),
                golden_file: "2_golden.json".to_string(),
                test_file: "2_detectron.json".to_string(),
                outcome: PairOutcome::Failed("bad json".to_string()),
            },
        ]
    }

    #[rstest]
    fn test_write_batch_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        write_batch_csv(&records(), &path).unwrap();

        let text = read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "golden_file,detectron_file,score,foundation_raw,relationship_raw,attribute_raw,total_deduction,band,image_id"
        );
        // partnerships 2 + divorces 1 = 3 raw, weighted 1.2
        assert_eq!(
            lines[1],
            "1_golden.json,1_detectron.json,98.80,0.00,3.00,0.00,1.20,excellent,"
        );
        assert_eq!(lines[2], "2_golden.json,2_detectron.json,Error,,,,,,");
    }

    #[rstest]
    fn test_write_batch_csv_gz() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv.gz");
        write_batch_csv(&records(), &path).unwrap();

        let mut text = String::new();
        MultiGzDecoder::new(File::open(&path).unwrap())
            .read_to_string(&mut text)
            .unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("Error"));
    }

    #[rstest]
    fn test_gzip_output_is_complete_after_finish() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json.gz");
        write_report_json(&report(), &path).unwrap();

        // a truncated stream without its trailer fails to decode
        let mut text = String::new();
        MultiGzDecoder::new(File::open(&path).unwrap())
            .read_to_string(&mut text)
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["golden_file"], "1_golden.json");
    }

    #[rstest]
    fn test_plain_writer_finish() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.txt");
        let mut writer = OutputWriter::create(&path).unwrap();
        assert!(matches!(writer, OutputWriter::Plain(_)));
        writeln!(writer, "pedigree").unwrap();
        writer.finish().unwrap();
        assert_eq!(read_to_string(&path).unwrap(), "pedigree\n");
    }

    #[rstest]
    fn test_write_report_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let report = report();
        write_report_json(&report, &path).unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["test_file"], "1_detectron.json");
        assert_eq!(parsed["relationship"]["raw_deduction"], 3.0);
        assert_eq!(parsed["deltas"].as_array().unwrap().len(), report.deltas.len());
    }

    #[rstest]
    fn test_write_comparison_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.csv");
        write_comparison_csv(&report(), &path).unwrap();

        let text = read_to_string(&path).unwrap();
        assert!(text.starts_with("tier,metric,golden,test,difference,deduction\n"));
        assert!(text.contains("relationship,partnerships,3,2,1,2.0\n"));
        assert!(text.contains("relationship,divorces,1,0,1,1.0\n"));
    }
}
