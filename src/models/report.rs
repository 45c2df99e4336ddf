use serde::Serialize;

use crate::models::invoice::InvoiceOutcome;

/// 批次整体状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    Done,
    Error,
}

/// 写到 stdout 的批次结果
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub status: BatchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub results: Vec<InvoiceOutcome>,
}

impl BatchReport {
    pub fn done(results: Vec<InvoiceOutcome>) -> Self {
        Self {
            status: BatchStatus::Done,
            message: None,
            results,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: BatchStatus::Error,
            message: Some(message.into()),
            results: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_report_shape() {
        let json = serde_json::to_string(&BatchReport::error("No invoices provided")).unwrap();
        assert_eq!(
            json,
            r#"{"status":"error","message":"No invoices provided","results":[]}"#
        );
    }

    #[test]
    fn test_done_report_omits_message() {
        let json = serde_json::to_string(&BatchReport::done(Vec::new())).unwrap();
        assert_eq!(json, r#"{"status":"done","results":[]}"#);
    }
}
