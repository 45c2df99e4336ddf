use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use invoice_lookup::models::{extract_document_label, read_payload};
use invoice_lookup::utils::{logging, normalize_document_name};
use invoice_lookup::{Cli, Config, DocumentBuilder};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    logging::init(config.verbose_logging);

    let raw = read_payload(cli.b64.as_deref()).await?;
    let label = extract_document_label(&raw).context("无法解析文档名称")?;
    let name = normalize_document_name(label.as_deref());
    info!("📝 文档名称: {}", name);

    let builder = DocumentBuilder::new(&config.output_dir);
    let path = builder
        .build(&name)
        .await
        .with_context(|| format!("生成文档失败: {}", config.output_dir.display()))?;

    println!("✅ Saved {}", path.display());
    Ok(())
}
