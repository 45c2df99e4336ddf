use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 单张发票的查询条件
///
/// 上游传入的字段可能是数字或字符串，统一转成文本。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceQuery {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub invoice_number: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub amount: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub invoice_code: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub tax_id: String,
}

/// 发票查询的最终状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Ok,
    NotFound,
    Error,
}

/// 单张发票的处理结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceOutcome {
    /// 发票号码
    pub invoice: String,
    /// 最后一次识别出的验证码
    pub captcha_text: Option<String>,
    pub status: OutcomeStatus,
    /// 失败原因或门户返回的提示，成功时为空
    pub message: Option<String>,
    pub screenshot_path: Option<PathBuf>,
    /// 实际消耗的尝试次数
    pub attempts: usize,
}

impl InvoiceOutcome {
    pub fn succeeded(
        query: &InvoiceQuery,
        captcha_text: String,
        screenshot_path: PathBuf,
        attempts: usize,
    ) -> Self {
        Self {
            invoice: query.invoice_number.clone(),
            captcha_text: Some(captcha_text),
            status: OutcomeStatus::Ok,
            message: None,
            screenshot_path: Some(screenshot_path),
            attempts,
        }
    }

    pub fn not_found(
        query: &InvoiceQuery,
        captcha_text: String,
        message: String,
        screenshot_path: Option<PathBuf>,
        attempts: usize,
    ) -> Self {
        Self {
            invoice: query.invoice_number.clone(),
            captcha_text: Some(captcha_text),
            status: OutcomeStatus::NotFound,
            message: Some(message),
            screenshot_path,
            attempts,
        }
    }

    pub fn failed(
        query: &InvoiceQuery,
        captcha_text: Option<String>,
        message: String,
        screenshot_path: Option<PathBuf>,
        attempts: usize,
    ) -> Self {
        Self {
            invoice: query.invoice_number.clone(),
            captcha_text,
            status: OutcomeStatus::Error,
            message: Some(message),
            screenshot_path,
            attempts,
        }
    }
}

// 把字符串、数字、布尔或 null 统一转成文本
fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct TextVisitor;

    impl<'de> Visitor<'de> for TextVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string, number, boolean or null")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value)
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(String::new())
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(TextVisitor)
}
