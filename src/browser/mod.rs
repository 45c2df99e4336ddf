pub mod connection;
pub mod headless;
pub mod session;

pub use connection::connect_to_browser;
pub use headless::launch_headless_browser;
pub use session::BrowserSession;

use crate::config::Config;
use anyhow::Result;

/// 按配置打开浏览器会话：设置了调试端口就连接已有浏览器，否则启动无头浏览器
pub async fn open_session(config: &Config) -> Result<BrowserSession> {
    match config.browser_debug_port {
        Some(port) => connect_to_browser(port).await,
        None => launch_headless_browser(config).await,
    }
}
