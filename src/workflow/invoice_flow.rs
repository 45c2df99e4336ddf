//! 发票处理流程 - 流程层
//!
//! 核心职责：定义"一张发票"的完整处理流程
//!
//! 每次尝试：
//! 1. 填写表单 → 截取并识别验证码 → 提交
//! 2. 分类结果页：验证码错误 / 发票不存在 / 仍在加载 / 成功
//! 3. 验证码错误、无识别结果、加载未完成或任何异常都进入下一次尝试
//!
//! 尝试次数用尽后记为失败，并尽量留一张截图。

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::AppError;
use crate::infrastructure::{PageDriver, ScreenshotTarget, WaitCondition};
use crate::models::{InvoiceOutcome, InvoiceQuery};
use crate::services::portal_selectors::{
    AMOUNT_INPUT, CAPTCHA_INPUT, CAPTCHA_RELOAD_BUTTON, INVOICE_CODE_INPUT, INVOICE_NUMBER_INPUT,
    LOADING_SPINNER, SUBMIT_BUTTON, TAX_ID_INPUT,
};
use crate::services::{classify_page, ArtifactStore, CaptchaService, CaptchaSolver, PageState};
use crate::workflow::invoice_ctx::InvoiceCtx;

/// 识别服务没有返回文本
pub const NO_CAPTCHA_RESULT: &str = "no captcha result";
/// 门户提示验证码错误
pub const CAPTCHA_INCORRECT: &str = "captcha incorrect";
/// 提交后页面一直在加载
pub const PAGE_NOT_SETTLED: &str = "result page did not settle";

/// 单次尝试的结果
enum AttemptResult {
    /// 得到最终结果（成功或发票不存在）
    Finished(InvoiceOutcome),
    /// 需要重试，携带原因
    Retry(String),
}

/// 发票处理流程
///
/// - 编排单张发票的重试状态机
/// - 不持有页面资源，页面由调用方注入
/// - 任何错误都收敛到 `InvoiceOutcome`，不会向外抛出
pub struct InvoiceFlow {
    captcha: CaptchaService,
    artifacts: ArtifactStore,
    max_retries: usize,
    settle_delay: Duration,
    element_timeout: Duration,
    spinner_timeout: Duration,
}

impl InvoiceFlow {
    /// 创建新的发票处理流程
    pub fn new(config: &Config, solver: Arc<dyn CaptchaSolver>) -> Self {
        Self {
            captcha: CaptchaService::new(solver, config.element_timeout),
            artifacts: ArtifactStore::new(&config.output_dir),
            max_retries: config.max_retries.max(1),
            settle_delay: config.settle_delay,
            element_timeout: config.element_timeout,
            spinner_timeout: config.spinner_timeout,
        }
    }

    pub fn artifacts(&self) -> &ArtifactStore {
        &self.artifacts
    }

    /// 处理一张发票，总是返回一个结果
    pub async fn run(
        &self,
        driver: &dyn PageDriver,
        query: &InvoiceQuery,
        ctx: &InvoiceCtx,
    ) -> InvoiceOutcome {
        info!("{} ➡️ 开始处理", ctx);

        let mut last_reason = String::new();
        let mut last_captcha: Option<String> = None;

        for attempt in 1..=self.max_retries {
            info!("{} 🔄 第 {}/{} 次尝试", ctx, attempt, self.max_retries);

            let result = self
                .attempt(driver, query, attempt, &mut last_captcha)
                .await;

            // 无论结果如何都清理本次的验证码图片
            self.artifacts.remove_captcha(&query.invoice_number).await;

            match result {
                Ok(AttemptResult::Finished(outcome)) => {
                    info!("{} ✓ 处理结束: {:?}", ctx, outcome.status);
                    return outcome;
                }
                Ok(AttemptResult::Retry(reason)) => {
                    warn!("{} ⚠️ 第 {} 次尝试未成功: {}", ctx, attempt, reason);
                    last_reason = reason;
                }
                Err(e) => {
                    error!("{} ❌ 第 {} 次尝试出错: {:#}", ctx, attempt, e);
                    last_reason = format!("{:#}", e);
                }
            }
        }

        error!(
            "{} ❌ {} 次尝试均失败，最后原因: {}",
            ctx, self.max_retries, last_reason
        );
        let screenshot = self.best_effort_screenshot(driver, query).await;
        InvoiceOutcome::failed(query, last_captcha, last_reason, screenshot, self.max_retries)
    }

    async fn attempt(
        &self,
        driver: &dyn PageDriver,
        query: &InvoiceQuery,
        attempt: usize,
        last_captcha: &mut Option<String>,
    ) -> Result<AttemptResult> {
        self.fill_form(driver, query).await?;

        let captcha_path = self.artifacts.captcha_path(&query.invoice_number);
        let Some(captcha_text) = self.captcha.solve_from_page(driver, &captcha_path).await? else {
            return Ok(AttemptResult::Retry(NO_CAPTCHA_RESULT.to_string()));
        };
        *last_captcha = Some(captcha_text.clone());

        driver.type_text(&CAPTCHA_INPUT, &captcha_text).await?;
        if !driver
            .wait_for(&SUBMIT_BUTTON, WaitCondition::Present, self.element_timeout)
            .await?
        {
            return Err(AppError::element_not_found(SUBMIT_BUTTON).into());
        }
        driver.click(&SUBMIT_BUTTON).await?;
        sleep(self.settle_delay).await;

        let state = classify_page(driver).await?;
        debug!("页面分类结果: {:?}", state);

        match state {
            PageState::CaptchaIncorrect => {
                self.reload_captcha(driver).await;
                Ok(AttemptResult::Retry(CAPTCHA_INCORRECT.to_string()))
            }
            PageState::NotFound(message) => {
                if !driver
                    .wait_for(&LOADING_SPINNER, WaitCondition::Absent, self.spinner_timeout)
                    .await?
                {
                    warn!("⚠️ 加载动画未在 {:?} 内消失，直接截图", self.spinner_timeout);
                }
                let screenshot = self.best_effort_screenshot(driver, query).await;
                Ok(AttemptResult::Finished(InvoiceOutcome::not_found(
                    query,
                    captcha_text,
                    message,
                    screenshot,
                    attempt,
                )))
            }
            PageState::Indeterminate => Ok(AttemptResult::Retry(PAGE_NOT_SETTLED.to_string())),
            PageState::Success => {
                let path = self.artifacts.result_path(query);
                driver.screenshot(ScreenshotTarget::FullPage, &path).await?;
                info!("📸 已保存截图: {}", path.display());
                Ok(AttemptResult::Finished(InvoiceOutcome::succeeded(
                    query,
                    captcha_text,
                    path,
                    attempt,
                )))
            }
        }
    }

    /// 填写四个查询字段（先清空）
    async fn fill_form(&self, driver: &dyn PageDriver, query: &InvoiceQuery) -> Result<()> {
        driver
            .type_text(&INVOICE_NUMBER_INPUT, &query.invoice_number)
            .await?;
        driver.type_text(&AMOUNT_INPUT, &query.amount).await?;
        driver
            .type_text(&INVOICE_CODE_INPUT, &query.invoice_code)
            .await?;
        driver.type_text(&TAX_ID_INPUT, &query.tax_id).await?;
        Ok(())
    }

    /// 点击刷新验证码，失败只记录日志
    async fn reload_captcha(&self, driver: &dyn PageDriver) {
        match driver.click(&CAPTCHA_RELOAD_BUTTON).await {
            Ok(()) => info!("🔁 已刷新验证码"),
            Err(e) => warn!("⚠️ 找不到刷新验证码按钮: {:#}", e),
        }
    }

    /// 失败或不存在时截图到 `.error.png`，截图失败返回 `None`
    async fn best_effort_screenshot(
        &self,
        driver: &dyn PageDriver,
        query: &InvoiceQuery,
    ) -> Option<PathBuf> {
        let path = self.artifacts.error_path(query);
        match driver.screenshot(ScreenshotTarget::FullPage, &path).await {
            Ok(()) => {
                info!("📸 已保存截图: {}", path.display());
                Some(path)
            }
            Err(e) => {
                warn!("⚠️ 截图失败 {}: {:#}", path.display(), e);
                None
            }
        }
    }
}
