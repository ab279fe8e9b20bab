//! 請求書・領収書の取込クライアント
//!
//! ファイル選択 → ドライラン解析（提案名・抽出フィールド）→ 名前確認 → 保存。

pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod intake;
pub mod logging;
pub mod render;
pub mod review;
pub mod scanner;
