//! 验证码识别能力 - 业务能力层

use async_trait::async_trait;

/// 验证码识别服务
///
/// 输入 PNG 字节，返回识别文本；任何失败都视为"没有结果"并返回 `None`。
#[async_trait]
pub trait CaptchaSolver: Send + Sync {
    async fn solve(&self, png: &[u8]) -> Option<String>;
}

/// 清洗识别结果：只保留字母数字并转大写
pub fn sanitize_captcha_text(raw: &str) -> String {
    raw.to_uppercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}
