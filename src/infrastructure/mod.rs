pub mod document_source;
pub mod page_handle;

pub use document_source::DocumentSource;
pub use page_handle::PageHandle;
