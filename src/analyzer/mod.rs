//! File intake and per-file results
//!
//! The analyzer is the layer between the outside world and the frame
//! scanner: it filters and size-checks files, reads them whole, runs the
//! scan and packages the numbers for reporting.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::mp3::{self, VbrInfo};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, warn};

/// Result for a single file
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub file_path: String,
    pub file_name: String,
    pub file_size: u64,
    pub frame_count: usize,
    /// Sample rate of the first frame, 0 when no frame was found
    pub sample_rate: u32,
    /// Bitrate of the first frame in kbps, 0 when no frame was found
    pub bitrate: u32,
    pub duration_secs: f64,
    /// Frame count claimed by a Xing/Info header, if any
    pub declared_frames: Option<u32>,
    pub encoder: Option<String>,
    pub verdict: Verdict,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    /// At least one frame found
    Ok,
    /// Readable, but no frames found
    Empty,
    Error,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Ok => f.pad("OK"),
            Verdict::Empty => f.pad("EMPTY"),
            Verdict::Error => f.pad("ERROR"),
        }
    }
}

impl AnalysisResult {
    fn failed(file_path: String, file_name: String, error: &Error) -> Self {
        Self {
            file_path,
            file_name,
            file_size: 0,
            frame_count: 0,
            sample_rate: 0,
            bitrate: 0,
            duration_secs: 0.0,
            declared_frames: None,
            encoder: None,
            verdict: Verdict::Error,
            error: Some(error.to_string()),
        }
    }
}

pub struct Analyzer {
    config: Config,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Analyzer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Analyze a single file. Failures are reported in the result, never
    /// returned.
    pub fn analyze<P: AsRef<Path>>(&self, path: P) -> AnalysisResult {
        let path = path.as_ref();
        let file_path = path.display().to_string();
        let file_name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| file_path.clone());

        match self.read(path) {
            Ok(data) => self.analyze_bytes(file_path, file_name, &data),
            Err(e) => {
                warn!(path = %file_path, error = %e, "rejected input");
                AnalysisResult::failed(file_path, file_name, &e)
            }
        }
    }

    /// Analyze an in-memory payload.
    pub fn analyze_bytes(&self, file_path: String, file_name: String, data: &[u8]) -> AnalysisResult {
        let file_size = data.len() as u64;
        if file_size > self.config.max_bytes {
            let e = Error::TooLarge {
                size: file_size,
                limit: self.config.max_bytes,
            };
            warn!(path = %file_path, error = %e, "rejected input");
            return AnalysisResult::failed(file_path, file_name, &e);
        }

        let stats = mp3::scan(data);
        let vbr = VbrInfo::extract(data, &stats);
        let (sample_rate, bitrate) = stats
            .first_frame
            .map(|(_, h)| (h.sample_rate, h.bitrate))
            .unwrap_or((0, 0));

        debug!(path = %file_path, frames = stats.frame_count, "analyzed");

        AnalysisResult {
            file_path,
            file_name,
            file_size,
            frame_count: stats.frame_count,
            sample_rate,
            bitrate,
            duration_secs: stats.duration_secs(),
            declared_frames: vbr.as_ref().and_then(|v| v.total_frames),
            encoder: vbr.and_then(|v| v.encoder),
            verdict: if stats.frame_count > 0 {
                Verdict::Ok
            } else {
                Verdict::Empty
            },
            error: None,
        }
    }

    /// Check the extension and size limit, then read the whole file.
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        if !self.config.accepts(path) {
            let ext = path
                .extension()
                .map(|e| e.to_string_lossy().to_string())
                .unwrap_or_default();
            return Err(Error::UnsupportedType(ext));
        }

        let size = std::fs::metadata(path)?.len();
        if size > self.config.max_bytes {
            return Err(Error::TooLarge {
                size,
                limit: self.config.max_bytes,
            });
        }

        Ok(std::fs::read(path)?)
    }

    /// Expand directories (one level) into the files they contain that pass
    /// the extension filter. Plain file arguments are kept as given.
    pub fn collect_inputs<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Vec<std::path::PathBuf>> {
        let mut out = Vec::new();
        for path in paths {
            let path = path.as_ref();
            if path.is_dir() {
                let mut entries: Vec<_> = std::fs::read_dir(path)?
                    .filter_map(|entry| entry.ok().map(|e| e.path()))
                    .filter(|p| p.is_file() && self.config.accepts(p))
                    .collect();
                entries.sort();
                out.extend(entries);
            } else {
                out.push(path.to_path_buf());
            }
        }
        Ok(out)
    }
}
