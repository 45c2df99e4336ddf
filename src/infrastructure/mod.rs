pub mod chromium_page;
pub mod page_driver;

pub use chromium_page::ChromiumPage;
pub use page_driver::{Locator, PageDriver, ScreenshotTarget, WaitCondition};
