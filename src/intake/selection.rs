//! 選択中ファイルと解析キャッシュ
//!
//! 保持できるファイルは常に1つ。キャッシュは「今保持しているファイル」に
//! 対して作られたものだけが有効で、選択が変わった瞬間に破棄される。

use crate::backend::UploadFile;
use crate::error::{IntakeError, Result};
use doc_intake_common::{ExtractedFields, MediaType};
use sha2::{Digest, Sha256};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// 選択ごとに採番される識別子（内容ではなく選択行為の同一性）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId(u64);

/// ピックまたはドロップされたファイル（検証前）
#[derive(Debug, Clone)]
pub struct FileCandidate {
    pub name: String,
    /// 宣言されたMIMEタイプ
    pub declared_type: String,
    pub bytes: Vec<u8>,
}

impl FileCandidate {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            bytes,
        }
    }

    /// ファイルを読み込み、拡張子から宣言タイプを決める
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let declared_type = MediaType::from_path(path)
            .map(|m| m.mime())
            .unwrap_or("application/octet-stream");
        Ok(Self::new(name, declared_type, bytes))
    }
}

/// 選択中のファイル（内容は不変）
#[derive(Debug, Clone)]
pub struct PendingFile {
    id: FileId,
    original_name: String,
    media_type: MediaType,
    bytes: Arc<[u8]>,
    fingerprint: String,
}

impl PendingFile {
    pub fn id(&self) -> FileId {
        self.id
    }

    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// SHA-256先頭12桁（ログ用）
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// 指定名で送信用ファイルを作る（内容は共有）
    pub fn to_upload(&self, file_name: impl Into<String>) -> UploadFile {
        UploadFile {
            file_name: file_name.into(),
            media_type: self.media_type,
            bytes: Arc::clone(&self.bytes),
        }
    }
}

/// ドライラン解析の結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CachedFields {
    pub fields: ExtractedFields,
    pub suggested_name: Option<String>,
}

#[derive(Debug, Default)]
pub struct SelectionStore {
    next_id: u64,
    current: Option<PendingFile>,
    cached: Option<CachedFields>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 選択を受け付ける。非対応タイプは何も変更せずエラー
    pub fn select(&mut self, candidate: FileCandidate) -> Result<PendingFile> {
        let media_type = MediaType::from_mime(&candidate.declared_type)
            .map_err(|_| IntakeError::InvalidFileType(candidate.declared_type.clone()))?;

        self.next_id += 1;
        let fingerprint = hex::encode(Sha256::digest(&candidate.bytes))[..12].to_string();
        let file = PendingFile {
            id: FileId(self.next_id),
            original_name: candidate.name,
            media_type,
            bytes: candidate.bytes.into(),
            fingerprint,
        };

        debug!(id = file.id.0, name = %file.original_name, fingerprint = %file.fingerprint, "selected");
        self.current = Some(file.clone());
        self.cached = None;
        Ok(file)
    }

    /// `for_file` が現在の選択と一致する場合のみキャッシュする
    pub fn attach_fields(&mut self, fields: CachedFields, for_file: FileId) -> bool {
        if !self.is_current(for_file) {
            debug!(id = for_file.0, "discarding fields for superseded selection");
            return false;
        }
        self.cached = Some(fields);
        true
    }

    pub fn clear(&mut self) {
        self.current = None;
        self.cached = None;
    }

    pub fn is_current(&self, id: FileId) -> bool {
        self.current.as_ref().is_some_and(|f| f.id == id)
    }

    pub fn pending(&self) -> Option<&PendingFile> {
        self.current.as_ref()
    }

    pub fn cached_fields(&self) -> Option<&CachedFields> {
        self.cached.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}
