/// 日志工具模块
///
/// 初始化 tracing 订阅器，并提供横幅与统计输出的辅助函数。
/// 日志统一写到 stderr，stdout 只留给 JSON 结果。
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::models::{InvoiceOutcome, OutcomeStatus};

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则按 `verbose` 选择 debug / info。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 程序启动 - 发票查询 ({})",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🌐 目标页面: {}", config.target_url);
    info!("📁 输出目录: {}", config.output_dir.display());
    info!("🔁 每张发票最多尝试: {} 次", config.max_retries);
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `outcomes`: 已处理发票的结果
/// - `submitted`: 提交的发票总数
pub fn print_final_stats(outcomes: &[InvoiceOutcome], submitted: usize) {
    let count = |status: OutcomeStatus| outcomes.iter().filter(|o| o.status == status).count();

    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", count(OutcomeStatus::Ok), submitted);
    info!("🔎 不存在: {}", count(OutcomeStatus::NotFound));
    info!("❌ 失败: {}", count(OutcomeStatus::Error));
    if outcomes.len() < submitted {
        info!("⏹️ 未处理: {}", submitted - outcomes.len());
    }
    info!("{}", "=".repeat(60));
}
