use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::reader::TextBackend;

/// Reads the embedded text layer of a PDF, page by page.
#[derive(Debug, Clone, Default)]
pub struct LopdfTextLayer;

impl LopdfTextLayer {
    pub fn new() -> Self {
        Self
    }

    /// Text of every page, in page order
    pub fn read_pages(path: &Path) -> Result<Vec<String>> {
        let document = lopdf::Document::load(path)
            .with_context(|| format!("Failed to load PDF: {:?}", path))?;

        let mut pages = Vec::new();
        for page_number in document.get_pages().keys() {
            let text = document
                .extract_text(&[*page_number])
                .with_context(|| format!("Failed to extract text from page {}", page_number))?;
            pages.push(text);
        }

        Ok(pages)
    }
}

/// Concatenate page texts, appending a newline after each page.
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    let mut text = String::new();
    for page in pages {
        text.push_str(page.as_ref());
        text.push('\n');
    }
    text
}

#[async_trait]
impl TextBackend for LopdfTextLayer {
    fn name(&self) -> &'static str {
        "lopdf"
    }

    async fn extract(&self, path: &Path) -> Result<String> {
        let path: PathBuf = path.to_path_buf();
        // lopdf is synchronous and can be slow on large files
        let pages = tokio::task::spawn_blocking(move || Self::read_pages(&path))
            .await
            .context("PDF reader task panicked")??;

        Ok(join_pages(&pages))
    }
}
