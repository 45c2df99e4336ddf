pub mod artifact_store;
pub mod captcha_preprocess;
pub mod captcha_service;
pub mod captcha_solver;
pub mod page_classifier;
pub mod portal_selectors;

pub use artifact_store::ArtifactStore;
pub use captcha_service::CaptchaService;
pub use captcha_solver::{sanitize_captcha_text, CaptchaSolver};
pub use page_classifier::{classify_page, PageState};
