//! chromiumoxide 页面实现 - 基础设施层
//!
//! 持有唯一的 `Page`，实现 [`PageDriver`]。

use anyhow::Result;
use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::element::Element;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use std::path::Path;
use tracing::debug;

use crate::error::{AppError, BrowserError};
use crate::infrastructure::page_driver::{Locator, PageDriver, ScreenshotTarget};

/// 基于 chromiumoxide 的页面
pub struct ChromiumPage {
    page: Page,
}

impl ChromiumPage {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// 打开页面并等待导航完成
    pub async fn navigate(&self, url: &str) -> Result<()> {
        self.page.goto(url).await.map_err(|source| {
            AppError::Browser(BrowserError::NavigationFailed {
                url: url.to_string(),
                source,
            })
        })?;
        self.page.wait_for_navigation().await?;
        debug!("页面导航成功: {}", url);
        Ok(())
    }

    async fn find(&self, locator: &Locator) -> Result<Option<Element>> {
        let elements = self.page.find_elements(locator.css).await?;
        if locator.text.is_none() {
            return Ok(elements.into_iter().next());
        }

        for element in elements {
            let text = element.inner_text().await?.unwrap_or_default();
            if locator.matches_text(&text) {
                return Ok(Some(element));
            }
        }
        Ok(None)
    }

    async fn require(&self, locator: &Locator) -> Result<Element> {
        self.find(locator)
            .await?
            .ok_or_else(|| AppError::element_not_found(locator).into())
    }
}

#[async_trait]
impl PageDriver for ChromiumPage {
    async fn locate(&self, locator: &Locator) -> Result<Option<String>> {
        match self.find(locator).await? {
            Some(element) => {
                let text = element.inner_text().await?.unwrap_or_default();
                Ok(Some(text.trim().to_string()))
            }
            None => Ok(None),
        }
    }

    async fn type_text(&self, locator: &Locator, text: &str) -> Result<()> {
        let element = self.require(locator).await?;
        element.click().await?;
        // 受控输入框需要真实按键事件才能清空
        element
            .call_js_fn("function() { if (this.select) { this.select(); } }", false)
            .await?;
        element.press_key("Backspace").await?;
        element.type_str(text).await?;
        Ok(())
    }

    async fn click(&self, locator: &Locator) -> Result<()> {
        let element = self.require(locator).await?;
        element.click().await?;
        Ok(())
    }

    async fn screenshot(&self, target: ScreenshotTarget, path: &Path) -> Result<()> {
        let bytes = match target {
            ScreenshotTarget::Element(locator) => {
                let element = self.require(&locator).await?;
                element.screenshot(CaptureScreenshotFormat::Png).await?
            }
            ScreenshotTarget::FullPage => self
                .page
                .screenshot(
                    ScreenshotParams::builder()
                        .format(CaptureScreenshotFormat::Png)
                        .full_page(true)
                        .build(),
                )
                .await?,
        };

        tokio::fs::write(path, bytes)
            .await
            .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;
        Ok(())
    }
}
