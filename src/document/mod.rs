//! 截图汇总文档
//!
//! 把输出目录里的结果截图按生成顺序写进一个 `.docx`。

pub mod collector;
pub mod docx_writer;

pub use collector::collect_screenshots;
pub use docx_writer::write_docx;

use std::path::PathBuf;
use tracing::info;

use crate::error::{AppError, AppResult, FileError};

/// 文档生成器
pub struct DocumentBuilder {
    output_dir: PathBuf,
}

impl DocumentBuilder {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// 生成 `<name>.docx`，返回文档路径
    pub async fn build(&self, name: &str) -> AppResult<PathBuf> {
        if !self.output_dir.is_dir() {
            return Err(AppError::File(FileError::DirectoryNotFound {
                path: self.output_dir.display().to_string(),
            }));
        }

        let images = collect_screenshots(&self.output_dir).await?;
        info!("🖼️ 找到 {} 张截图", images.len());

        let output = self.output_dir.join(format!("{}.docx", name));
        let target = output.clone();
        tokio::task::spawn_blocking(move || write_docx(&target, &images))
            .await
            .map_err(|e| {
                AppError::file_write_failed(
                    output.display().to_string(),
                    std::io::Error::new(std::io::ErrorKind::Other, e),
                )
            })??;

        Ok(output)
    }
}
