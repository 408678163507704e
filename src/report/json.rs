//! JSON report generation

use crate::analyzer::AnalysisResult;
use crate::error::Result;
use crate::report::Summary;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct JsonReport<'a> {
    generated: String,
    summary: JsonSummary,
    files: &'a [AnalysisResult],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonSummary {
    total: usize,
    ok: usize,
    empty: usize,
    error: usize,
    total_frames: usize,
}

pub fn write<W: Write>(writer: &mut W, results: &[AnalysisResult]) -> Result<()> {
    let summary = Summary::from_results(results);

    let report = JsonReport {
        generated: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        summary: JsonSummary {
            total: summary.total,
            ok: summary.ok,
            empty: summary.empty,
            error: summary.error,
            total_frames: summary.total_frames,
        },
        files: results,
    };

    serde_json::to_writer_pretty(&mut *writer, &report)?;
    writeln!(writer)?;
    Ok(())
}
