//! 浏览器能力接口 - 基础设施层
//!
//! 流程层只通过 [`PageDriver`] 操作页面，生产环境由 chromiumoxide 实现，
//! 测试中可以替换为脚本化的假页面。

use anyhow::Result;
use async_trait::async_trait;
use std::fmt;
use std::path::Path;
use std::time::Duration;
use tokio::time::{sleep, Instant};

/// `wait_for` 的轮询间隔
pub const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// 元素定位方式
///
/// CSS 选择器，可选地再按元素文本过滤（包含匹配，不区分大小写）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locator {
    pub css: &'static str,
    pub text: Option<&'static str>,
}

impl Locator {
    pub const fn css(css: &'static str) -> Self {
        Self { css, text: None }
    }

    pub const fn with_text(css: &'static str, text: &'static str) -> Self {
        Self {
            css,
            text: Some(text),
        }
    }

    /// 判断元素文本是否满足过滤条件
    pub fn matches_text(&self, element_text: &str) -> bool {
        match self.text {
            None => true,
            Some(needle) => element_text
                .to_lowercase()
                .contains(&needle.to_lowercase()),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.text {
            Some(text) => write!(f, "{} (文本包含 '{}')", self.css, text),
            None => write!(f, "{}", self.css),
        }
    }
}

/// 截图目标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenshotTarget {
    /// 单个元素
    Element(Locator),
    /// 整个页面（包括视口之外的部分）
    FullPage,
}

/// 等待条件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitCondition {
    Present,
    Absent,
}

/// 页面操作能力
///
/// 职责：
/// - 持有唯一的页面资源
/// - 只暴露 locate / type / click / wait / screenshot 能力
/// - 不认识发票，也不处理业务流程
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// 查找第一个匹配的元素并返回其文本，不存在时返回 `None`
    async fn locate(&self, locator: &Locator) -> Result<Option<String>>;

    /// 清空输入框后输入文本
    async fn type_text(&self, locator: &Locator, text: &str) -> Result<()>;

    /// 点击元素
    async fn click(&self, locator: &Locator) -> Result<()>;

    /// 截图并写入 `path`（PNG）
    async fn screenshot(&self, target: ScreenshotTarget, path: &Path) -> Result<()>;

    /// 轮询直到元素出现/消失，超时返回 `false`
    async fn wait_for(
        &self,
        locator: &Locator,
        condition: WaitCondition,
        timeout: Duration,
    ) -> Result<bool> {
        let deadline = Instant::now() + timeout;
        loop {
            let present = self.locate(locator).await?.is_some();
            if present == (condition == WaitCondition::Present) {
                return Ok(true);
            }
            if Instant::now() >= deadline {
                return Ok(false);
            }
            sleep(WAIT_POLL_INTERVAL).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_filter_ignores_case() {
        let locator = Locator::with_text(".notice", "captcha không đúng");
        assert!(locator.matches_text("Mã Captcha KHÔNG ĐÚNG"));
        assert!(!locator.matches_text("Thành công"));
    }

    #[test]
    fn test_plain_css_matches_anything() {
        assert!(Locator::css("#shdon").matches_text(""));
    }
}
