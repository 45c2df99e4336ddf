use chromiumoxide::{Browser, Page};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// 浏览器会话
///
/// 持有 Browser、事件处理任务和本次使用的页面。
/// 无论批次如何结束都必须调用 [`BrowserSession::shutdown`] 释放资源。
pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
    page: Page,
    /// 浏览器是否由本程序启动（连接的外部浏览器只关闭页面）
    owned: bool,
}

impl BrowserSession {
    pub(crate) fn new(browser: Browser, handler: JoinHandle<()>, page: Page, owned: bool) -> Self {
        Self {
            browser,
            handler,
            page,
            owned,
        }
    }

    /// 本次会话使用的页面
    pub fn page(&self) -> Page {
        self.page.clone()
    }

    /// 关闭会话，失败只记录日志
    pub async fn shutdown(mut self) {
        if self.owned {
            if let Err(e) = self.browser.close().await {
                warn!("⚠️ 关闭浏览器失败: {}", e);
            }
            if let Err(e) = self.browser.wait().await {
                warn!("⚠️ 等待浏览器进程退出失败: {}", e);
            }
        } else if let Err(e) = self.page.close().await {
            warn!("⚠️ 关闭页面失败: {}", e);
        }

        self.handler.abort();
        debug!("浏览器会话已释放");
    }
}
