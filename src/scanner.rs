use crate::error::{IntakeError, Result};
use doc_intake_common::MediaType;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// フォルダ内の取込候補
#[derive(Debug, Clone)]
pub struct DocumentInfo {
    pub path: PathBuf,
    pub file_name: String,
    pub media_type: MediaType,
    pub size: u64,
}

/// フォルダ直下の PDF / PNG / JPEG を名前順で列挙する
pub fn scan_folder(folder: &Path) -> Result<Vec<DocumentInfo>> {
    if !folder.is_dir() {
        return Err(IntakeError::FolderNotFound(folder.display().to_string()));
    }

    let mut documents = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1)  // 直下のみ
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        if let Some(media_type) = MediaType::from_path(path) {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);

            documents.push(DocumentInfo {
                path: path.to_path_buf(),
                file_name,
                media_type,
                size,
            });
        }
    }

    documents.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(documents)
}
