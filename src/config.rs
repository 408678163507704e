//! Intake limits and output defaults, optionally loaded from a TOML file
//!
//! ```toml
//! max_bytes = 104857600
//! extensions = ["mp3", "mpga"]
//! format = "csv"
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 50 MiB
pub const DEFAULT_MAX_BYTES: u64 = 50 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Json,
    Csv,
}

impl ReportFormat {
    /// Pick a format from a file extension; anything but `.json` is CSV.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "json" => ReportFormat::Json,
            _ => ReportFormat::Csv,
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "csv" => Ok(ReportFormat::Csv),
            other => Err(format!("unknown report format '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Files larger than this are rejected before being read
    pub max_bytes: u64,
    /// Accepted file extensions, lowercase, without the dot. Empty accepts all.
    pub extensions: Vec<String>,
    /// Print this report to stdout instead of one line per file
    pub format: Option<ReportFormat>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            extensions: vec!["mp3".to_string()],
            format: None,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(text)?;
        for ext in &mut config.extensions {
            *ext = ext.trim_start_matches('.').to_lowercase();
        }
        Ok(config)
    }

    /// Report format to print on stdout, or `None` for per-file lines.
    ///
    /// `json` forces JSON; otherwise the configured format applies.
    pub fn stdout_format(&self, json: bool) -> Option<ReportFormat> {
        if json {
            Some(ReportFormat::Json)
        } else {
            self.format
        }
    }

    /// Whether `path` passes the extension filter.
    pub fn accepts<P: AsRef<Path>>(&self, path: P) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| self.extensions.iter().any(|x| x.eq_ignore_ascii_case(e)))
            .unwrap_or(false)
    }
}
