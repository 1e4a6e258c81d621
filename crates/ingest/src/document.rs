use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How text is pulled out of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// A document carrying an embedded text layer (PDF)
    TextLayer,
    /// A raster image that needs OCR
    Image,
}

impl DocumentKind {
    /// Map a file extension to a document kind. Unknown extensions yield `None`.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::TextLayer),
            "png" | "jpg" | "jpeg" => Some(Self::Image),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TextLayer => "text_layer",
            Self::Image => "image",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    pub path: PathBuf,
    pub kind: DocumentKind,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, kind: DocumentKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}
