pub mod invoice;
pub mod loaders;
pub mod report;

pub use invoice::{InvoiceOutcome, InvoiceQuery, OutcomeStatus};
pub use loaders::{extract_document_label, parse_invoices, read_payload};
pub use report::{BatchReport, BatchStatus};
