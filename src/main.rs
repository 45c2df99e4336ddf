use anyhow::{Context, Result};
use clap::Parser;

use invoice_lookup::models::{parse_invoices, read_payload};
use invoice_lookup::utils::logging;
use invoice_lookup::{App, BatchReport, Cli, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            logging::init(false);
            return emit(&BatchReport::error(e.to_string()));
        }
    };

    // 初始化日志
    logging::init(config.verbose_logging);

    let report = match run(cli, config).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("❌ 批次中止: {:#}", e);
            BatchReport::error(format!("{:#}", e))
        }
    };

    emit(&report)
}

async fn run(cli: Cli, config: Config) -> Result<BatchReport> {
    let raw = read_payload(cli.b64.as_deref()).await?;
    let invoices = parse_invoices(&raw).context("无法解析发票列表")?;

    if invoices.is_empty() {
        return Ok(BatchReport::error("No invoices provided"));
    }

    // 初始化并运行应用
    let app = App::initialize(config).await?;
    Ok(app.run(invoices).await)
}

/// stdout 只输出一行 JSON
fn emit(report: &BatchReport) -> Result<()> {
    println!("{}", serde_json::to_string(report)?);
    Ok(())
}
