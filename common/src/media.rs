//! 受付可能なメディアタイプ
//!
//! PDF / PNG / JPEG のみ受け付ける。宣言MIMEまたは拡張子から判定する。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 受付可能なメディアタイプ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Pdf,
    Png,
    Jpeg,
}

impl MediaType {
    /// 宣言されたMIMEタイプから判定（`image/jpg` は jpeg の別名）
    pub fn from_mime(mime: &str) -> Result<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "application/pdf" => Ok(MediaType::Pdf),
            "image/png" => Ok(MediaType::Png),
            "image/jpeg" | "image/jpg" => Ok(MediaType::Jpeg),
            other => Err(Error::UnsupportedMediaType(other.to_string())),
        }
    }

    /// 拡張子（ドットなし、大文字小文字不問）から判定
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(MediaType::Pdf),
            "png" => Some(MediaType::Png),
            "jpg" | "jpeg" => Some(MediaType::Jpeg),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    pub fn mime(&self) -> &'static str {
        match self {
            MediaType::Pdf => "application/pdf",
            MediaType::Png => "image/png",
            MediaType::Jpeg => "image/jpeg",
        }
    }

    /// 元ファイル名に拡張子がない場合に使う正規拡張子
    pub fn canonical_extension(&self) -> &'static str {
        match self {
            MediaType::Pdf => "pdf",
            MediaType::Png => "png",
            MediaType::Jpeg => "jpg",
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, MediaType::Png | MediaType::Jpeg)
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaType::Pdf => write!(f, "pdf"),
            MediaType::Png => write!(f, "png"),
            MediaType::Jpeg => write!(f, "jpeg"),
        }
    }
}
