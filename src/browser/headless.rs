use anyhow::Result;
use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::browser::session::BrowserSession;
use crate::config::Config;
use crate::error::{AppError, BrowserError};

/// 启动无头浏览器并创建空白页面
pub async fn launch_headless_browser(config: &Config) -> Result<BrowserSession> {
    info!("🚀 启动无头浏览器...");

    let mut builder = BrowserConfig::builder()
        .window_size(config.window_width, config.window_height)
        .args(vec![
            "--no-sandbox",            // 容器内没有沙盒权限
            "--disable-dev-shm-usage", // 防止共享内存不足
            "--disable-gpu",
        ]);
    if config.headless {
        builder = builder.new_headless_mode();
    } else {
        builder = builder.with_head();
    }
    if let Some(executable) = &config.chrome_executable {
        debug!("浏览器路径: {}", executable.display());
        builder = builder.chrome_executable(executable);
    }

    let browser_config = builder.build().map_err(|e| {
        error!("配置无头浏览器失败: {}", e);
        AppError::Browser(BrowserError::ConfigurationFailed(e))
    })?;

    // 启动浏览器
    let (browser, mut handler) = Browser::launch(browser_config).await.map_err(|e| {
        error!("启动无头浏览器失败: {}", e);
        AppError::Browser(BrowserError::LaunchFailed { source: e })
    })?;
    debug!("无头浏览器启动成功");

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

    let page_result = browser.new_page("about:blank").await;
    let page = match page_result {
        Ok(page) => page,
        Err(e) => {
            error!("创建页面失败: {}", e);
            // 页面都没建起来，直接回收浏览器
            let mut browser = browser;
            let _ = browser.close().await;
            let _ = browser.wait().await;
            handler_task.abort();
            return Err(AppError::Browser(BrowserError::LaunchFailed { source: e }).into());
        }
    };

    Ok(BrowserSession::new(browser, handler_task, page, true))
}
