//! # Invoice Lookup
//!
//! 在越南税务门户上批量查询电子发票并截图，再把截图汇总成 `.docx` 文档
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Page），只暴露能力
//! - `PageDriver` - 页面能力接口：定位、输入、点击、等待、截图
//! - `ChromiumPage` - 基于 chromiumoxide 的实现
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单张发票的一个环节
//! - `CaptchaService` - 截取、预处理并识别验证码
//! - `classify_page` - 判断提交后的页面状态
//! - `ArtifactStore` - 输出文件命名与清理
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一张发票"的完整处理流程
//! - `InvoiceCtx` - 上下文封装（序号 + 发票号）
//! - `InvoiceFlow` - 重试状态机（填表 → 验证码 → 提交 → 分类）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 管理浏览器会话，按顺序处理整批发票
//!
//! 另有 `document/` 负责把截图写成文档，`clients/` 封装验证码识别 API。
//!
//! ## 模块结构

pub mod browser;
pub mod cli;
pub mod clients;
pub mod config;
pub mod document;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use browser::{open_session, BrowserSession};
pub use cli::Cli;
pub use clients::AntiCaptchaClient;
pub use config::Config;
pub use document::DocumentBuilder;
pub use error::{AppError, AppResult};
pub use infrastructure::{ChromiumPage, Locator, PageDriver, ScreenshotTarget, WaitCondition};
pub use models::{BatchReport, InvoiceOutcome, InvoiceQuery, OutcomeStatus};
pub use orchestrator::{process_invoices, App};
pub use services::CaptchaSolver;
pub use workflow::{InvoiceCtx, InvoiceFlow};
