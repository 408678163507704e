pub mod csv;
pub mod json;

use crate::analyzer::{AnalysisResult, Verdict};
use crate::config::ReportFormat;
use crate::error::Result;
use std::io::Write;
use std::path::Path;

/// Generate a report in the appropriate format based on file extension
pub fn generate<P: AsRef<Path>>(path: P, results: &[AnalysisResult]) -> Result<()> {
    let path = path.as_ref();
    let mut file = std::fs::File::create(path)?;
    write(&mut file, ReportFormat::from_path(path), results)
}

pub fn write<W: Write>(writer: &mut W, format: ReportFormat, results: &[AnalysisResult]) -> Result<()> {
    match format {
        ReportFormat::Json => json::write(writer, results),
        ReportFormat::Csv => csv::write(writer, results),
    }
}

/// Summary statistics for a batch of results
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub ok: usize,
    pub empty: usize,
    pub error: usize,
    pub total_frames: usize,
}

impl Summary {
    pub fn from_results(results: &[AnalysisResult]) -> Self {
        let mut summary = Self {
            total: results.len(),
            ..Default::default()
        };

        for r in results {
            match r.verdict {
                Verdict::Ok => summary.ok += 1,
                Verdict::Empty => summary.empty += 1,
                Verdict::Error => summary.error += 1,
            }
            summary.total_frames += r.frame_count;
        }

        summary
    }
}
