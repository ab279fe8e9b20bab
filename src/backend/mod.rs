//! バックエンド（抽出・保存サービス）との境界
//!
//! コーディネータはこのトレイト越しにのみ通信する。
//! 本番は HttpBackend、テストではスクリプト化した実装を差し込む。

mod http;

pub use http::HttpBackend;

use crate::error::Result;
use async_trait::async_trait;
use doc_intake_common::{CommitHints, CommitResponse, DriveStatus, DryRunResponse, MediaType};
use std::sync::Arc;

/// 送信するファイル（名前・型・内容）
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub media_type: MediaType,
    pub bytes: Arc<[u8]>,
}

/// 保存リクエスト
#[derive(Debug, Clone)]
pub struct CommitRequest {
    /// `file_name` は決定済みの保存名
    pub file: UploadFile,
    pub use_custom_name: bool,
    /// 解析済みフィールド。なければバックエンドが再抽出する
    pub hints: Option<CommitHints>,
}

#[async_trait]
pub trait IntakeBackend: Send + Sync {
    /// 保存せずに解析だけ行う
    async fn analyze(&self, file: &UploadFile) -> Result<DryRunResponse>;

    async fn commit(&self, request: &CommitRequest) -> Result<CommitResponse>;

    async fn drive_status(&self) -> Result<DriveStatus>;

    async fn disconnect_drive(&self) -> Result<()>;
}
