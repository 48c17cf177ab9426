use std::path::Path;

use miette::{IntoDiagnostic, Result, WrapErr};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Reproduce the counters GameMaker itself ends up with: shaders count as scripts,
    /// rooms count as timelines and objects count the raw children of their section.
    pub legacy_last_id: bool,
    /// Decode sprite frames, background images, audio and the game icon.
    pub load_media: bool,
    /// Log unresolved references as warnings instead of traces.
    pub report_dangling_references: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            legacy_last_id: false,
            load_media: true,
            report_dangling_references: false,
        }
    }
}

impl ReaderConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).into_diagnostic()
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&text).wrap_err_with(|| format!("invalid config {}", path.display()))
    }
}
