//! CSV report generation

use crate::analyzer::AnalysisResult;
use crate::error::Result;
use std::io::Write;

pub fn write<W: Write>(writer: &mut W, results: &[AnalysisResult]) -> Result<()> {
    // Header
    writeln!(
        writer,
        "verdict,filepath,frame_count,duration_secs,sample_rate,bitrate_kbps,declared_frames,encoder,error"
    )?;

    // Rows
    for r in results {
        let declared = r
            .declared_frames
            .map(|d| d.to_string())
            .unwrap_or_else(|| "n/a".to_string());

        writeln!(
            writer,
            "{},{},{},{:.3},{},{},{},{},{}",
            r.verdict,
            escape_csv(&r.file_path),
            r.frame_count,
            r.duration_secs,
            r.sample_rate,
            r.bitrate,
            declared,
            escape_csv(r.encoder.as_deref().unwrap_or("-")),
            escape_csv(r.error.as_deref().unwrap_or("-")),
        )?;
    }

    Ok(())
}

fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
