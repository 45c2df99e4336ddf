//! 验证码服务 - 业务能力层
//!
//! 只负责"从页面截取验证码并识别"，不关心重试流程

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::error::AppError;
use crate::infrastructure::{PageDriver, ScreenshotTarget, WaitCondition};
use crate::services::captcha_preprocess::{encode_png, preprocess_captcha};
use crate::services::captcha_solver::CaptchaSolver;
use crate::services::portal_selectors::CAPTCHA_IMAGE;

/// 验证码服务
pub struct CaptchaService {
    solver: Arc<dyn CaptchaSolver>,
    element_timeout: Duration,
}

impl CaptchaService {
    pub fn new(solver: Arc<dyn CaptchaSolver>, element_timeout: Duration) -> Self {
        Self {
            solver,
            element_timeout,
        }
    }

    /// 截取页面上的验证码到 `captcha_path`，预处理后提交识别
    ///
    /// 识别服务没有结果时返回 `Ok(None)`；截图或解码失败返回错误。
    pub async fn solve_from_page(
        &self,
        driver: &dyn PageDriver,
        captcha_path: &Path,
    ) -> Result<Option<String>> {
        if !driver
            .wait_for(&CAPTCHA_IMAGE, WaitCondition::Present, self.element_timeout)
            .await?
        {
            return Err(AppError::element_not_found(CAPTCHA_IMAGE).into());
        }

        driver
            .screenshot(ScreenshotTarget::Element(CAPTCHA_IMAGE), captcha_path)
            .await?;

        let path_display = captcha_path.display().to_string();
        let bytes = tokio::fs::read(captcha_path)
            .await
            .map_err(|e| AppError::file_read_failed(path_display.clone(), e))?;
        let raw = image::load_from_memory(&bytes)
            .map_err(|e| AppError::image_failed(path_display.clone(), e))?;

        let clean = preprocess_captcha(&raw);
        let png = encode_png(&clean).map_err(|e| AppError::image_failed(path_display, e))?;
        debug!("验证码预处理完成: {}x{}", clean.width(), clean.height());

        let text = self.solver.solve(&png).await.filter(|t| !t.is_empty());
        Ok(text)
    }
}
