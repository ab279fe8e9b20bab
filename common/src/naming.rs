//! 保存時のファイル名決定
//!
//! ユーザー入力名が既知の拡張子で終わっていればそのまま使い、
//! そうでなければ元ファイルの拡張子を付け足す。

use crate::media::MediaType;

/// 既知の拡張子（大文字小文字不問）
pub const RECOGNIZED_EXTENSIONS: &[&str] = &[".pdf", ".png", ".jpg", ".jpeg"];

pub fn has_recognized_extension(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    RECOGNIZED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// 元ファイル名の拡張子（最後の `.` 以降）。なければメディアタイプの正規拡張子
pub fn original_extension(original_name: &str, media_type: MediaType) -> String {
    match original_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext.to_string(),
        _ => media_type.canonical_extension().to_string(),
    }
}

/// 送信するファイル名を決定する
///
/// 空文字チェックは呼び出し側で行う（ここでは前後の空白を除くのみ）。
///
/// # Examples
/// ```
/// use doc_intake_common::{resolve_outgoing_name, MediaType};
///
/// assert_eq!(resolve_outgoing_name("invoice", "scan.pdf", MediaType::Pdf), "invoice.pdf");
/// assert_eq!(resolve_outgoing_name("report.PDF", "scan.pdf", MediaType::Pdf), "report.PDF");
/// ```
pub fn resolve_outgoing_name(user_name: &str, original_name: &str, media_type: MediaType) -> String {
    let trimmed = user_name.trim();
    if has_recognized_extension(trimmed) {
        trimmed.to_string()
    } else {
        format!("{}.{}", trimmed, original_extension(original_name, media_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_original_extension() {
        assert_eq!(resolve_outgoing_name("invoice", "scan.pdf", MediaType::Pdf), "invoice.pdf");
        assert_eq!(resolve_outgoing_name("receipt", "IMG_0001.JPG", MediaType::Jpeg), "receipt.JPG");
    }

    #[test]
    fn test_keeps_recognized_extension() {
        assert_eq!(resolve_outgoing_name("report.PDF", "scan.pdf", MediaType::Pdf), "report.PDF");
        assert_eq!(resolve_outgoing_name("photo.Jpeg", "a.png", MediaType::Png), "photo.Jpeg");
    }

    #[test]
    fn test_trims_user_name() {
        assert_eq!(resolve_outgoing_name("  invoice  ", "scan.pdf", MediaType::Pdf), "invoice.pdf");
        assert_eq!(resolve_outgoing_name(" a.png ", "scan.pdf", MediaType::Pdf), "a.png");
    }

    #[test]
    fn test_unrecognized_extension_is_not_kept() {
        // ".txt" は既知拡張子ではないので元の拡張子を付け足す
        assert_eq!(resolve_outgoing_name("notes.txt", "scan.pdf", MediaType::Pdf), "notes.txt.pdf");
    }

    #[test]
    fn test_original_without_extension() {
        assert_eq!(original_extension("scan", MediaType::Pdf), "pdf");
        assert_eq!(original_extension("scan.", MediaType::Jpeg), "jpg");
        assert_eq!(resolve_outgoing_name("invoice", "scan", MediaType::Png), "invoice.png");
    }
}
