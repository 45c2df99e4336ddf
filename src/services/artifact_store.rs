//! 输出目录管理 - 业务能力层
//!
//! 统一生成验证码临时文件和结果截图的路径，并负责清理验证码文件。

use std::path::PathBuf;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};
use crate::models::InvoiceQuery;

/// 验证码临时文件名中的标记，生成文档时据此排除
pub const CAPTCHA_FILE_MARKER: &str = "_captcha";

/// 输出目录
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    output_dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// 确保输出目录存在
    pub async fn ensure_dir(&self) -> AppResult<()> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| AppError::file_write_failed(self.output_dir.display().to_string(), e))
    }

    /// `<发票号>_captcha.png`
    pub fn captcha_path(&self, invoice_number: &str) -> PathBuf {
        self.output_dir.join(format!(
            "{}{}.png",
            file_component(invoice_number),
            CAPTCHA_FILE_MARKER
        ))
    }

    /// `<发票号>-<发票符号>.png`
    pub fn result_path(&self, query: &InvoiceQuery) -> PathBuf {
        self.output_dir.join(format!(
            "{}-{}.png",
            file_component(&query.invoice_number),
            file_component(&query.invoice_code)
        ))
    }

    /// `<发票号>-<发票符号>.error.png`
    pub fn error_path(&self, query: &InvoiceQuery) -> PathBuf {
        self.output_dir.join(format!(
            "{}-{}.error.png",
            file_component(&query.invoice_number),
            file_component(&query.invoice_code)
        ))
    }

    /// 删除验证码临时文件，失败只记录日志
    pub async fn remove_captcha(&self, invoice_number: &str) {
        let path = self.captcha_path(invoice_number);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => debug!("🗑️ 已删除验证码图片: {}", path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("⚠️ 无法删除验证码图片 {}: {}", path.display(), e),
        }
    }
}

// 路径分隔符不能出现在文件名里
fn file_component(value: &str) -> String {
    value.replace(['/', '\\'], "_")
}
