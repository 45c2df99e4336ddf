//! 文档文件名规范化
//!
//! 把越南语标题转成 ASCII 的小驼峰文件名，例如 `Hóa đơn điện tử` → `hoaDonDienTu`。

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// 标题为空时使用的文件名
pub const DEFAULT_DOCUMENT_NAME: &str = "screenshots";

fn separator_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-zA-Z0-9]+").expect("valid separator regex"))
}

/// 把任意文本转成 ASCII 小驼峰
///
/// `đ`/`Đ` 没有 Unicode 分解形式，必须在去除声调之前单独替换。
/// 结果以数字开头时加 `_` 前缀；没有可用字符时返回空串。
pub fn to_camel_ascii(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }

    let replaced = s.replace('đ', "d").replace('Đ', "D");
    let stripped: String = replaced.nfd().filter(|c| !is_combining_mark(*c)).collect();
    let spaced = separator_regex().replace_all(&stripped, " ");

    let mut parts = spaced.split_whitespace();
    let Some(first) = parts.next() else {
        return String::new();
    };

    let mut camel = first.to_lowercase();
    for part in parts {
        let mut chars = part.chars();
        if let Some(head) = chars.next() {
            camel.extend(head.to_uppercase());
            camel.push_str(&chars.as_str().to_lowercase());
        }
    }

    if camel.starts_with(|c: char| c.is_ascii_digit()) {
        camel.insert(0, '_');
    }

    camel
}

/// 生成文档文件名（不含扩展名）
pub fn normalize_document_name(label: Option<&str>) -> String {
    let camel = to_camel_ascii(label.unwrap_or_default());
    if camel.is_empty() {
        DEFAULT_DOCUMENT_NAME.to_string()
    } else {
        camel
    }
}
