pub mod payload_loader;

pub use payload_loader::{extract_document_label, parse_invoices, read_payload};
