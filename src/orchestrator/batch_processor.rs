//! 批量发票处理器 - 编排层
//!
//! 本模块是整个应用的入口：
//!
//! 1. **应用初始化**：准备输出目录、创建识别客户端、打开浏览器并进入查询页
//! 2. **串行处理**：按提交顺序逐张委托 `InvoiceFlow`
//! 3. **批次策略**：某张发票确认不存在时停止后续处理（可配置）
//! 4. **资源管理**：唯一持有浏览器会话，所有出口都会关闭它

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::browser::{self, BrowserSession};
use crate::clients::AntiCaptchaClient;
use crate::config::Config;
use crate::infrastructure::{ChromiumPage, PageDriver};
use crate::models::{BatchReport, InvoiceOutcome, InvoiceQuery, OutcomeStatus};
use crate::services::portal_selectors::MODAL_CLOSE_BUTTON;
use crate::services::{ArtifactStore, CaptchaSolver};
use crate::utils::logging::{log_startup, print_final_stats};
use crate::workflow::{InvoiceCtx, InvoiceFlow};

/// 应用主结构
pub struct App {
    config: Config,
    session: BrowserSession,
    page: ChromiumPage,
    flow: InvoiceFlow,
}

impl App {
    /// 初始化应用
    ///
    /// 浏览器打不开时返回错误，这是唯一会中止整个批次的错误。
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        ArtifactStore::new(&config.output_dir).ensure_dir().await?;

        let solver: Arc<dyn CaptchaSolver> = Arc::new(AntiCaptchaClient::new(&config)?);
        let flow = InvoiceFlow::new(&config, solver);

        let session = browser::open_session(&config).await?;
        let page = ChromiumPage::new(session.page());

        if let Err(e) = prepare_page(&page, &config).await {
            session.shutdown().await;
            return Err(e);
        }

        Ok(Self {
            config,
            session,
            page,
            flow,
        })
    }

    /// 处理所有发票并关闭浏览器
    pub async fn run(self, invoices: Vec<InvoiceQuery>) -> BatchReport {
        let outcomes = process_invoices(
            &self.page,
            &self.flow,
            &invoices,
            self.config.stop_on_not_found,
        )
        .await;

        self.session.shutdown().await;

        print_final_stats(&outcomes, invoices.len());
        BatchReport::done(outcomes)
    }
}

/// 打开查询页并关闭首页弹窗
async fn prepare_page(page: &ChromiumPage, config: &Config) -> Result<()> {
    page.navigate(&config.target_url).await?;
    info!("已导航到: {}", config.target_url);
    sleep(config.navigation_delay).await;

    // 首页弹窗不一定出现
    match page.locate(&MODAL_CLOSE_BUTTON).await {
        Ok(Some(_)) => {
            if let Err(e) = page.click(&MODAL_CLOSE_BUTTON).await {
                warn!("⚠️ 关闭首页弹窗失败: {:#}", e);
            } else {
                debug!("已关闭首页弹窗");
                sleep(Duration::from_secs(1)).await;
            }
        }
        Ok(None) => debug!("没有首页弹窗"),
        Err(e) => warn!("⚠️ 检查首页弹窗失败: {:#}", e),
    }

    Ok(())
}

/// 按顺序处理发票
///
/// 每张发票恰好产生一个结果；`stop_on_not_found` 为真时，
/// 第一张"不存在"的发票之后的发票不再处理。
pub async fn process_invoices(
    driver: &dyn PageDriver,
    flow: &InvoiceFlow,
    invoices: &[InvoiceQuery],
    stop_on_not_found: bool,
) -> Vec<InvoiceOutcome> {
    let total = invoices.len();
    let mut outcomes = Vec::with_capacity(total);

    for (idx, query) in invoices.iter().enumerate() {
        let ctx = InvoiceCtx::new(idx + 1, total, query.invoice_number.clone());
        let outcome = flow.run(driver, query, &ctx).await;
        let not_found = outcome.status == OutcomeStatus::NotFound;
        outcomes.push(outcome);

        if not_found && stop_on_not_found {
            warn!(
                "{} ⏹️ 发票不存在，停止处理剩余 {} 张发票",
                ctx,
                total - idx - 1
            );
            break;
        }
    }

    outcomes
}
