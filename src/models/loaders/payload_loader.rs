//! 输入载荷加载
//!
//! 上游（n8n）要么把 JSON 数组写到 stdin，要么通过 `--b64 <payload>` 传入 base64 编码的 JSON。

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde_json::Value as JsonValue;
use tokio::io::AsyncReadExt;
use tracing::debug;

use crate::error::{AppResult, InputError};
use crate::models::invoice::InvoiceQuery;

/// 读取原始 JSON 文本
///
/// 提供了 base64 载荷时解码它，否则读取整个 stdin。
pub async fn read_payload(b64: Option<&str>) -> AppResult<String> {
    match b64 {
        Some(encoded) => {
            debug!("从 --b64 参数读取输入 ({} 字节)", encoded.len());
            decode_b64_payload(encoded)
        }
        None => {
            debug!("从 stdin 读取输入");
            let mut raw = String::new();
            tokio::io::stdin()
                .read_to_string(&mut raw)
                .await
                .map_err(InputError::StdinFailed)?;
            Ok(raw)
        }
    }
}

/// 解码 base64 载荷
pub fn decode_b64_payload(encoded: &str) -> AppResult<String> {
    let bytes = BASE64
        .decode(encoded.trim())
        .map_err(InputError::Base64Failed)?;
    let text = String::from_utf8(bytes).map_err(InputError::Utf8Failed)?;
    Ok(text)
}

/// 解析发票列表，空白输入视为空列表
pub fn parse_invoices(raw: &str) -> AppResult<Vec<InvoiceQuery>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    let invoices = serde_json::from_str(raw).map_err(InputError::JsonFailed)?;
    Ok(invoices)
}

/// 取出第一个带 `newName` 的元素作为文档标题
///
/// 其他元素只是截图批次的附带数据，命名时忽略。
pub fn extract_document_label(raw: &str) -> AppResult<Option<String>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    let items: Vec<JsonValue> = serde_json::from_str(raw).map_err(InputError::JsonFailed)?;

    let label = items
        .iter()
        .find_map(|item| item.get("newName"))
        .and_then(|value| match value {
            JsonValue::Null => None,
            JsonValue::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        });

    Ok(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_b64_payload() {
        let raw = r#"[{"invoiceNumber":"1"}]"#;
        let encoded = BASE64.encode(raw);
        assert_eq!(decode_b64_payload(&encoded).unwrap(), raw);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_b64_payload("not base64 !!").is_err());
    }

    #[test]
    fn test_parse_invoices_keeps_order() {
        let raw = r#"[
            {"invoiceNumber": 3, "amount": 10, "invoiceCode": "A", "taxId": "0101"},
            {"invoiceNumber": "1", "amount": "20", "invoiceCode": "B", "taxId": 202}
        ]"#;
        let invoices = parse_invoices(raw).unwrap();
        assert_eq!(invoices.len(), 2);
        assert_eq!(invoices[0].invoice_number, "3");
        assert_eq!(invoices[1].tax_id, "202");
    }

    #[test]
    fn test_parse_invoices_blank_input() {
        assert!(parse_invoices("  \n").unwrap().is_empty());
        assert!(parse_invoices("[]").unwrap().is_empty());
    }

    #[test]
    fn test_extract_document_label() {
        let raw = r#"[{"invoiceNumber": "1"}, {"newName": "Hóa đơn tháng 9"}, {"newName": "later"}]"#;
        assert_eq!(
            extract_document_label(raw).unwrap().as_deref(),
            Some("Hóa đơn tháng 9")
        );
        assert_eq!(extract_document_label(r#"[{"a": 1}]"#).unwrap(), None);
        assert_eq!(extract_document_label(r#"[{"newName": 2024}]"#).unwrap().as_deref(), Some("2024"));
    }
}
