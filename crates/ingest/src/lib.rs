pub mod document;
pub mod ocr;
pub mod pdf;
pub mod quality;
pub mod reader;

pub use document::{Document, DocumentKind};
pub use ocr::TesseractOcr;
pub use pdf::LopdfTextLayer;
pub use quality::{MIN_USABLE_CHARS, is_usable};
pub use reader::{FileReader, TextBackend};
