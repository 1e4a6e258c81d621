use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::process::Command;

use crate::reader::TextBackend;

/// OCR through the `tesseract` command line tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TesseractOcr {
    pub binary: String,
    pub language: String,
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self::new("tesseract".to_string(), "eng".to_string())
    }
}

impl TesseractOcr {
    pub fn new(binary: String, language: String) -> Self {
        Self { binary, language }
    }
}

#[async_trait]
impl TextBackend for TesseractOcr {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    async fn extract(&self, path: &Path) -> Result<String> {
        let output = Command::new(&self.binary)
            .arg(path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .output()
            .await
            .with_context(|| format!("Failed to spawn {}", self.binary))?;

        if !output.status.success() {
            anyhow::bail!(
                "{} exited with {}: {}",
                self.binary,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
