//! 发票处理上下文
//!
//! 封装"我正在处理批次中的第几张发票"这一信息

use std::fmt::Display;

/// 发票处理上下文（仅用于日志显示）
#[derive(Debug, Clone)]
pub struct InvoiceCtx {
    /// 在批次中的位置（从1开始）
    pub index: usize,
    /// 批次总数
    pub total: usize,
    /// 发票号码
    pub invoice_number: String,
}

impl InvoiceCtx {
    pub fn new(index: usize, total: usize, invoice_number: impl Into<String>) -> Self {
        Self {
            index,
            total,
            invoice_number: invoice_number.into(),
        }
    }
}

impl Display for InvoiceCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[发票 {}/{} #{}]",
            self.index, self.total, self.invoice_number
        )
    }
}
