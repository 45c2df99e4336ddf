use clap::Parser;

/// 命令行参数
///
/// 不带参数时从 stdin 读取 JSON 数组。
#[derive(Debug, Parser)]
#[command(version, about = "越南电子发票查询与截图")]
pub struct Cli {
    /// base64 编码的 JSON 数组，代替 stdin
    #[arg(long)]
    pub b64: Option<String>,
}
