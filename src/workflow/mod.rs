pub mod invoice_ctx;
pub mod invoice_flow;

pub use invoice_ctx::InvoiceCtx;
pub use invoice_flow::{InvoiceFlow, CAPTCHA_INCORRECT, NO_CAPTCHA_RESULT, PAGE_NOT_SETTLED};
