//! 対話式の名前確認・ファイル選択

use crate::error::{IntakeError, Result};
use crate::scanner::DocumentInfo;
use dialoguer::{Confirm, Input, Select};

/// 名前確認の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewAction {
    /// この名前で保存（空文字は保存時に弾かれる）
    Save(String),
    Cancel,
}

pub const CANCEL_COMMAND: &str = ":q";

pub fn interpret_review_input(input: &str) -> ReviewAction {
    match input.trim() {
        CANCEL_COMMAND => ReviewAction::Cancel,
        other => ReviewAction::Save(other.to_string()),
    }
}

/// 提案名を初期値にして保存名を入力させる
pub fn prompt_file_name(suggested: &str) -> Result<ReviewAction> {
    let input: String = Input::new()
        .with_prompt(format!("File name ({} to cancel)", CANCEL_COMMAND))
        .with_initial_text(suggested)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| IntakeError::Prompt(e.to_string()))?;

    Ok(interpret_review_input(&input))
}

/// 保存失敗後の再試行確認（解析結果は再利用される）
pub fn confirm_retry() -> Result<bool> {
    Confirm::new()
        .with_prompt("Retry saving with the same file?")
        .default(true)
        .interact()
        .map_err(|e| IntakeError::Prompt(e.to_string()))
}

pub fn document_label(doc: &DocumentInfo) -> String {
    format!("{} ({}, {} KB)", doc.file_name, doc.media_type, doc.size.div_ceil(1024))
}

/// フォルダ内の候補から1件選ばせる（Esc で None）
pub fn pick_document(documents: &[DocumentInfo]) -> Result<Option<&DocumentInfo>> {
    let items: Vec<String> = documents.iter().map(document_label).collect();
    let selection = Select::new()
        .with_prompt("Select a document")
        .items(&items)
        .default(0)
        .interact_opt()
        .map_err(|e| IntakeError::Prompt(e.to_string()))?;

    Ok(selection.and_then(|i| documents.get(i)))
}
