use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::document::{Document, DocumentKind};
use crate::ocr::TesseractOcr;
use crate::pdf::LopdfTextLayer;

/// A text extraction backend: `text = extract(document)`.
#[async_trait]
pub trait TextBackend: Send + Sync {
    fn name(&self) -> &'static str;

    async fn extract(&self, path: &Path) -> Result<String>;
}

/// Dispatches a document to the backend matching its kind.
///
/// Backend failures are logged and reported as `None`; there is no retry.
#[derive(Clone)]
pub struct FileReader {
    text_layer: Arc<dyn TextBackend>,
    ocr: Arc<dyn TextBackend>,
}

impl FileReader {
    pub fn new(text_layer: Arc<dyn TextBackend>, ocr: Arc<dyn TextBackend>) -> Self {
        Self { text_layer, ocr }
    }

    pub fn with_ocr(ocr: TesseractOcr) -> Self {
        Self::new(Arc::new(LopdfTextLayer::new()), Arc::new(ocr))
    }

    fn backend_for(&self, kind: DocumentKind) -> &dyn TextBackend {
        match kind {
            DocumentKind::TextLayer => self.text_layer.as_ref(),
            DocumentKind::Image => self.ocr.as_ref(),
        }
    }

    pub async fn read_file(&self, path: &Path, kind: DocumentKind) -> Option<String> {
        let backend = self.backend_for(kind);

        match backend.extract(path).await {
            Ok(text) => {
                debug!(
                    backend = backend.name(),
                    kind = kind.as_str(),
                    chars = text.chars().count(),
                    "Extracted document text"
                );
                Some(text)
            }
            Err(e) => {
                warn!(
                    backend = backend.name(),
                    kind = kind.as_str(),
                    path = %path.display(),
                    error = %e,
                    "Text extraction failed"
                );
                None
            }
        }
    }

    pub async fn read_document(&self, document: &Document) -> Option<String> {
        self.read_file(&document.path, document.kind).await
    }
}

impl Default for FileReader {
    fn default() -> Self {
        Self::with_ocr(TesseractOcr::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedBackend(&'static str);

    #[async_trait]
    impl TextBackend for FixedBackend {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn extract(&self, _path: &Path) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingBackend;

    #[async_trait]
    impl TextBackend for FailingBackend {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn extract(&self, path: &Path) -> Result<String> {
            anyhow::bail!("cannot read {:?}", path)
        }
    }

    #[tokio::test]
    async fn test_dispatch_by_kind() {
        let reader = FileReader::new(
            Arc::new(FixedBackend("from pdf")),
            Arc::new(FixedBackend("from image")),
        );

        let pdf = reader.read_file(Path::new("a.pdf"), DocumentKind::TextLayer).await;
        let image = reader.read_file(Path::new("a.png"), DocumentKind::Image).await;

        assert_eq!(pdf.as_deref(), Some("from pdf"));
        assert_eq!(image.as_deref(), Some("from image"));
    }

    #[tokio::test]
    async fn test_dispatch_ignores_extension() {
        let reader = FileReader::new(
            Arc::new(FixedBackend("from pdf")),
            Arc::new(FixedBackend("from image")),
        );

        let text = reader.read_file(Path::new("scan.pdf"), DocumentKind::Image).await;
        assert_eq!(text.as_deref(), Some("from image"));
    }

    #[tokio::test]
    async fn test_backend_failure_becomes_none() {
        let reader = FileReader::new(Arc::new(FailingBackend), Arc::new(FailingBackend));

        let document = Document::new("missing.pdf", DocumentKind::TextLayer);
        assert!(reader.read_document(&document).await.is_none());
    }

    #[tokio::test]
    async fn test_default_reader_on_missing_file() {
        let reader = FileReader::default();
        let text = reader
            .read_file(Path::new("/nonexistent/chart.pdf"), DocumentKind::TextLayer)
            .await;
        assert!(text.is_none());
    }
}
