use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{AppResult, ConfigError};

/// 程序配置
///
/// 所有选项都可以通过同名的大写环境变量覆盖，见 [`Config::from_env`]。
#[derive(Clone, Debug)]
pub struct Config {
    /// 浏览器可执行文件路径（为空时由 chromiumoxide 自动探测）
    pub chrome_executable: Option<PathBuf>,
    /// 已运行浏览器的调试端口；设置后连接该浏览器而不是启动新的无头浏览器
    pub browser_debug_port: Option<u16>,
    /// 是否以无头模式启动
    pub headless: bool,
    /// 发票查询页面
    pub target_url: String,
    /// 截图与文档输出目录
    pub output_dir: PathBuf,
    /// 浏览器窗口宽度
    pub window_width: u32,
    /// 浏览器窗口高度
    pub window_height: u32,
    // --- 验证码识别服务 ---
    pub anticaptcha_api_key: String,
    pub anticaptcha_base_url: String,
    /// 识别结果轮询间隔
    pub ocr_poll_interval: Duration,
    /// 识别结果最大轮询次数
    pub ocr_poll_attempts: usize,
    /// 单次 HTTP 请求超时
    pub http_timeout: Duration,
    // --- 重试与等待 ---
    /// 每张发票的最大尝试次数
    pub max_retries: usize,
    /// 打开页面后的等待时间
    pub navigation_delay: Duration,
    /// 提交查询后的等待时间
    pub settle_delay: Duration,
    /// 等待页面元素出现的超时
    pub element_timeout: Duration,
    /// 等待加载动画消失的超时
    pub spinner_timeout: Duration,
    /// 遇到"发票不存在"时是否停止整个批次
    pub stop_on_not_found: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chrome_executable: None,
            browser_debug_port: None,
            headless: true,
            target_url: "https://hoadondientu.gdt.gov.vn".to_string(),
            output_dir: PathBuf::from("/data/outputs"),
            window_width: 1920,
            window_height: 1000,
            anticaptcha_api_key: String::new(),
            anticaptcha_base_url: "https://api.anti-captcha.com".to_string(),
            ocr_poll_interval: Duration::from_secs(2),
            ocr_poll_attempts: 20,
            http_timeout: Duration::from_secs(30),
            max_retries: 3,
            navigation_delay: Duration::from_secs(2),
            settle_delay: Duration::from_secs(2),
            element_timeout: Duration::from_secs(5),
            spinner_timeout: Duration::from_secs(10),
            stop_on_not_found: true,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 从环境变量加载配置，未设置的项使用默认值
    pub fn from_env() -> AppResult<Self> {
        let default = Self::default();
        Ok(Self {
            chrome_executable: std::env::var("CHROME_EXECUTABLE")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            browser_debug_port: match std::env::var("BROWSER_DEBUG_PORT") {
                Ok(v) if !v.is_empty() => Some(parse_value("BROWSER_DEBUG_PORT", &v, "u16")?),
                _ => default.browser_debug_port,
            },
            headless: env_parse("HEADLESS", default.headless, "bool")?,
            target_url: std::env::var("TARGET_URL").unwrap_or(default.target_url),
            output_dir: std::env::var("OUTPUT_DIR").map(PathBuf::from).unwrap_or(default.output_dir),
            window_width: env_parse("WINDOW_WIDTH", default.window_width, "u32")?,
            window_height: env_parse("WINDOW_HEIGHT", default.window_height, "u32")?,
            anticaptcha_api_key: std::env::var("ANTICAPTCHA_API_KEY").unwrap_or(default.anticaptcha_api_key),
            anticaptcha_base_url: std::env::var("ANTICAPTCHA_BASE_URL").unwrap_or(default.anticaptcha_base_url),
            ocr_poll_interval: env_millis("OCR_POLL_INTERVAL_MS", default.ocr_poll_interval)?,
            ocr_poll_attempts: env_parse("OCR_POLL_ATTEMPTS", default.ocr_poll_attempts, "usize")?,
            http_timeout: Duration::from_secs(env_parse("HTTP_TIMEOUT_SECS", default.http_timeout.as_secs(), "u64")?),
            max_retries: env_parse("MAX_RETRIES", default.max_retries, "usize")?,
            navigation_delay: env_millis("NAVIGATION_DELAY_MS", default.navigation_delay)?,
            settle_delay: env_millis("SETTLE_DELAY_MS", default.settle_delay)?,
            element_timeout: env_millis("ELEMENT_TIMEOUT_MS", default.element_timeout)?,
            spinner_timeout: env_millis("SPINNER_TIMEOUT_MS", default.spinner_timeout)?,
            stop_on_not_found: env_parse("STOP_ON_NOT_FOUND", default.stop_on_not_found, "bool")?,
            verbose_logging: env_parse("VERBOSE_LOGGING", default.verbose_logging, "bool")?,
        })
    }
}

fn env_parse<T: FromStr>(var_name: &str, default: T, expected_type: &str) -> AppResult<T> {
    match std::env::var(var_name) {
        Ok(v) if !v.is_empty() => parse_value(var_name, &v, expected_type),
        _ => Ok(default),
    }
}

fn env_millis(var_name: &str, default: Duration) -> AppResult<Duration> {
    let millis = env_parse(var_name, default.as_millis() as u64, "u64")?;
    Ok(Duration::from_millis(millis))
}

fn parse_value<T: FromStr>(var_name: &str, value: &str, expected_type: &str) -> AppResult<T> {
    value.trim().parse().map_err(|_| {
        ConfigError::EnvVarParseFailed {
            var_name: var_name.to_string(),
            value: value.to_string(),
            expected_type: expected_type.to_string(),
        }
        .into()
    })
}
