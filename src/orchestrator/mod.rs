//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! - 管理浏览器会话的生命周期（打开、准备页面、关闭）
//! - 按提交顺序逐张处理发票（单线程、串行）
//! - 执行批次级策略（遇到"发票不存在"时停止）
//! - 输出全局统计信息
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<InvoiceQuery>)
//!     ↓
//! workflow::InvoiceFlow (处理单张发票)
//!     ↓
//! services (能力层：captcha / classify / artifacts)
//!     ↓
//! infrastructure (基础设施：PageDriver)
//! ```

pub mod batch_processor;

pub use batch_processor::{process_invoices, App};
