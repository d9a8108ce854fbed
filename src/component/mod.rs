//! 功能元件模組
//!
//! 每個子模組實現一個獨立的功能，包含主要邏輯和專用工具

pub mod capture_tool;
pub mod doc_duplicator;
pub mod video_composer;

pub use capture_tool::CaptureTool;
pub use doc_duplicator::DocDuplicator;
pub use video_composer::VideoComposer;
