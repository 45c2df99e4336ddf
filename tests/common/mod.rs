//! 测试用的脚本化页面与验证码识别器
#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use invoice_lookup::services::portal_selectors::{
    CAPTCHA_ERROR_NOTICE, CAPTCHA_IMAGE, CAPTCHA_RELOAD_BUTTON, LOADING_SPINNER,
    NOT_FOUND_MESSAGE, SUBMIT_BUTTON,
};
use invoice_lookup::{CaptchaSolver, Config, InvoiceQuery, Locator, PageDriver, ScreenshotTarget};

pub const NOT_FOUND_TEXT: &str = "Không tồn tại hóa đơn có thông tin trùng khớp!";

/// 每次点击查询按钮后页面呈现的状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageScript {
    CaptchaIncorrect,
    NotFound,
    Success,
    /// 加载动画一直不消失
    Loading,
    /// 点击查询按钮本身报错
    SubmitFails,
}

#[derive(Default)]
struct Inner {
    script: VecDeque<PageScript>,
    shown: Option<PageScript>,
    fills: Vec<(String, String)>,
    clicks: Vec<String>,
    screenshots: Vec<PathBuf>,
}

/// 按脚本响应的假页面
///
/// 脚本用完后的提交都视为成功。
#[derive(Default)]
pub struct ScriptedPage {
    inner: Mutex<Inner>,
    fail_full_page_screenshot: bool,
}

impl ScriptedPage {
    pub fn new(script: impl IntoIterator<Item = PageScript>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                script: script.into_iter().collect(),
                ..Default::default()
            }),
            fail_full_page_screenshot: false,
        }
    }

    /// 每次提交都成功
    pub fn succeeding() -> Self {
        Self::default()
    }

    pub fn failing_screenshots(mut self) -> Self {
        self.fail_full_page_screenshot = true;
        self
    }

    /// 写进某个输入框的所有值
    pub fn typed_into(&self, locator: &Locator) -> Vec<String> {
        self.inner
            .lock()
            .unwrap()
            .fills
            .iter()
            .filter(|(css, _)| css == locator.css)
            .map(|(_, text)| text.clone())
            .collect()
    }

    pub fn clicks_on(&self, locator: &Locator) -> usize {
        self.inner
            .lock()
            .unwrap()
            .clicks
            .iter()
            .filter(|css| *css == locator.css)
            .count()
    }

    pub fn screenshots(&self) -> Vec<PathBuf> {
        self.inner.lock().unwrap().screenshots.clone()
    }

    /// 当前页面上可见的元素：(选择器, 文本)
    fn visible(&self) -> Vec<(&'static str, String)> {
        let inner = self.inner.lock().unwrap();
        let mut elements = vec![
            (CAPTCHA_IMAGE.css, String::new()),
            (SUBMIT_BUTTON.css, "Tìm kiếm".to_string()),
            (CAPTCHA_RELOAD_BUTTON.css, String::new()),
        ];
        match inner.shown {
            Some(PageScript::CaptchaIncorrect) => elements.push((
                CAPTCHA_ERROR_NOTICE.css,
                "Mã captcha không đúng".to_string(),
            )),
            Some(PageScript::NotFound) => {
                elements.push((NOT_FOUND_MESSAGE.css, NOT_FOUND_TEXT.to_string()))
            }
            Some(PageScript::Loading) => elements.push((LOADING_SPINNER.css, String::new())),
            _ => {}
        }
        elements
    }
}

#[async_trait]
impl PageDriver for ScriptedPage {
    async fn locate(&self, locator: &Locator) -> Result<Option<String>> {
        Ok(self
            .visible()
            .into_iter()
            .find(|(css, text)| *css == locator.css && locator.matches_text(text))
            .map(|(_, text)| text))
    }

    async fn type_text(&self, locator: &Locator, text: &str) -> Result<()> {
        self.inner
            .lock()
            .unwrap()
            .fills
            .push((locator.css.to_string(), text.to_string()));
        Ok(())
    }

    async fn click(&self, locator: &Locator) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.clicks.push(locator.css.to_string());

        if *locator == SUBMIT_BUTTON {
            let next = inner.script.pop_front().unwrap_or(PageScript::Success);
            if next == PageScript::SubmitFails {
                inner.shown = None;
                return Err(anyhow!("查询按钮已失效"));
            }
            inner.shown = Some(next);
        } else if *locator == CAPTCHA_RELOAD_BUTTON {
            inner.shown = None;
        }
        Ok(())
    }

    async fn screenshot(&self, target: ScreenshotTarget, path: &Path) -> Result<()> {
        if target == ScreenshotTarget::FullPage && self.fail_full_page_screenshot {
            return Err(anyhow!("截图失败"));
        }
        write_png(path, 40, 12)?;
        self.inner
            .lock()
            .unwrap()
            .screenshots
            .push(path.to_path_buf());
        Ok(())
    }
}

/// 按队列返回识别结果，队列空了就返回固定文本
pub struct ScriptedSolver {
    answers: Mutex<VecDeque<Option<String>>>,
    calls: AtomicUsize,
}

impl ScriptedSolver {
    pub fn new(answers: impl IntoIterator<Item = Option<&'static str>>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().map(|a| a.map(String::from)).collect()),
            calls: AtomicUsize::new(0),
        }
    }

    /// 总是返回 `ABC123`
    pub fn fixed() -> Self {
        Self::new(Vec::<Option<&'static str>>::new())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CaptchaSolver for ScriptedSolver {
    async fn solve(&self, png: &[u8]) -> Option<String> {
        assert!(!png.is_empty(), "识别器收到空图片");
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Some("ABC123".to_string()))
    }
}

/// 写一张带条纹的小 PNG
pub fn write_png(path: &Path, width: u32, height: u32) -> Result<()> {
    let img = image::GrayImage::from_fn(width, height, |x, y| {
        image::Luma([if (x + y) % 3 == 0 { 30 } else { 220 }])
    });
    img.save(path)?;
    Ok(())
}

/// 没有等待时间的测试配置
pub fn test_config(output_dir: &Path) -> Config {
    Config {
        output_dir: output_dir.to_path_buf(),
        max_retries: 3,
        navigation_delay: Duration::ZERO,
        settle_delay: Duration::ZERO,
        element_timeout: Duration::from_millis(50),
        spinner_timeout: Duration::from_millis(50),
        ..Config::default()
    }
}

pub fn invoice(number: &str) -> InvoiceQuery {
    InvoiceQuery {
        invoice_number: number.to_string(),
        amount: "1500000".to_string(),
        invoice_code: "C24TAA".to_string(),
        tax_id: "0101234567".to_string(),
    }
}
