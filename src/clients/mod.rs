pub mod anticaptcha_client;

pub use anticaptcha_client::AntiCaptchaClient;
