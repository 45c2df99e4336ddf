use anyhow::Result;
use chromiumoxide::Browser;
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::browser::session::BrowserSession;
use crate::error::{AppError, BrowserError};

/// 连接到已开启远程调试的浏览器，并新建一个页面
pub async fn connect_to_browser(port: u16) -> Result<BrowserSession> {
    let browser_url = format!("http://localhost:{}", port);
    info!("正在连接到浏览器: {}", browser_url);

    let (browser, mut handler) = Browser::connect(&browser_url).await.map_err(|e| {
        error!("连接浏览器失败: {}", e);
        AppError::Browser(BrowserError::ConnectionFailed { port, source: e })
    })?;
    debug!("浏览器连接成功");

    // 在后台处理浏览器事件
    let handler_task = tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // 添加短暂延迟以等待浏览器状态同步
    sleep(tokio::time::Duration::from_millis(300)).await;

    let page = browser.new_page("about:blank").await.map_err(|e| {
        error!("创建新页面失败: {}", e);
        handler_task.abort();
        AppError::Browser(BrowserError::ConnectionFailed { port, source: e })
    })?;

    Ok(BrowserSession::new(browser, handler_task, page, false))
}
