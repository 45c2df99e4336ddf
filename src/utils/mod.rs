pub mod logging;
pub mod naming;

pub use naming::{normalize_document_name, to_camel_ascii};
