use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tokio::fs;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::services::artifact_store::CAPTCHA_FILE_MARKER;

const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// 收集输出目录中的截图
///
/// 排除验证码临时文件，按修改时间升序排列（相同时按文件名）。
pub async fn collect_screenshots(folder: &Path) -> AppResult<Vec<PathBuf>> {
    let folder_display = folder.display().to_string();
    let mut entries = fs::read_dir(folder)
        .await
        .map_err(|e| AppError::file_read_failed(folder_display.clone(), e))?;

    let mut files: Vec<(SystemTime, PathBuf)> = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AppError::file_read_failed(folder_display.clone(), e))?
    {
        let path = entry.path();
        if !is_screenshot(&path) {
            continue;
        }

        let metadata = entry
            .metadata()
            .await
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        if !metadata.is_file() {
            continue;
        }
        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        debug!("截图: {}", path.display());
        files.push((modified, path));
    }

    files.sort();
    Ok(files.into_iter().map(|(_, path)| path).collect())
}

fn is_screenshot(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if name.contains(CAPTCHA_FILE_MARKER) {
        return false;
    }
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_screenshot() {
        assert!(is_screenshot(Path::new("/o/1-A.png")));
        assert!(is_screenshot(Path::new("/o/1-A.error.PNG")));
        assert!(is_screenshot(Path::new("/o/scan.jpeg")));
        assert!(!is_screenshot(Path::new("/o/1_captcha.png")));
        assert!(!is_screenshot(Path::new("/o/report.docx")));
        assert!(!is_screenshot(Path::new("/o/noext")));
    }
}
