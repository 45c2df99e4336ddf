//! 查询结果页面分类 - 业务能力层
//!
//! 每次提交后对页面只做一次分类，流程层按分类结果决定重试或结束。

use anyhow::Result;

use crate::infrastructure::PageDriver;
use crate::services::portal_selectors::{CAPTCHA_ERROR_NOTICE, LOADING_SPINNER, NOT_FOUND_MESSAGE};

/// 提交后的页面状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState {
    /// 门户提示验证码错误
    CaptchaIncorrect,
    /// 门户提示发票不存在，携带原始提示文本
    NotFound(String),
    /// 查询成功
    Success,
    /// 页面仍在加载，无法判断
    Indeterminate,
}

/// 分类当前页面
///
/// 判断顺序：验证码错误 → 发票不存在 → 仍在加载 → 成功
pub async fn classify_page(driver: &dyn PageDriver) -> Result<PageState> {
    if driver.locate(&CAPTCHA_ERROR_NOTICE).await?.is_some() {
        return Ok(PageState::CaptchaIncorrect);
    }

    if let Some(message) = driver.locate(&NOT_FOUND_MESSAGE).await? {
        return Ok(PageState::NotFound(message));
    }

    if driver.locate(&LOADING_SPINNER).await?.is_some() {
        return Ok(PageState::Indeterminate);
    }

    Ok(PageState::Success)
}
