//! 保存（コミット）の調整
//!
//! 選択中ファイルとユーザーが確認した名前で保存を要求する。
//! 解析済みフィールドがあればヒントとして送り、バックエンドの再抽出を省く。
//! 失敗時は選択もキャッシュも残すので、再解析なしでやり直せる。

use super::drive::refresh_drive_status;
use super::notify::{NotificationHandle, NotificationKind, Workflow};
use super::selection::FileId;
use super::IntakeState;
use crate::backend::{CommitRequest, IntakeBackend};
use crate::error::{IntakeError, Result};
use doc_intake_common::{resolve_outgoing_name, CommitHints, CommitResponse, ExtractedFields, ResponseStatus};
use tracing::{info, warn};

pub const UPLOADING: &str = "Uploading and Saving...";
pub const SAVED: &str = "File Saved Successfully!";
pub const UPLOAD_FAILED: &str = "Upload Failed";

#[derive(Debug)]
pub struct CommitTicket {
    file_id: FileId,
    request: CommitRequest,
    notification: NotificationHandle,
}

impl CommitTicket {
    pub fn request(&self) -> &CommitRequest {
        &self.request
    }

    pub fn notification(&self) -> NotificationHandle {
        self.notification
    }
}

#[derive(Debug)]
pub enum CommitOutcome {
    Saved {
        fields: ExtractedFields,
        drive_link: Option<String>,
    },
    Failed(IntakeError),
    /// 前提条件違反（通信していない）
    Rejected(IntakeError),
}

pub struct CommitCoordinator<'a, B: ?Sized> {
    backend: &'a B,
}

impl<'a, B: IntakeBackend + ?Sized> CommitCoordinator<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// 前提条件を確認し、リクエストを組み立てて進捗通知を出す
    pub fn prepare(&self, state: &mut IntakeState, user_name: &str) -> Result<CommitTicket> {
        let Some(file) = state.store.pending().cloned() else {
            return Err(reject(state, IntakeError::NoSelection));
        };

        let trimmed = user_name.trim();
        if trimmed.is_empty() {
            return Err(reject(state, IntakeError::EmptyName));
        }

        let final_name = resolve_outgoing_name(trimmed, file.original_name(), file.media_type());
        let hints = state
            .store
            .cached_fields()
            .map(|cached| CommitHints::from_fields(&cached.fields));

        let notification = state.notifications.start(Workflow::Commit, UPLOADING);
        state.view.hide_result();

        Ok(CommitTicket {
            file_id: file.id(),
            request: CommitRequest {
                file: file.to_upload(final_name),
                use_custom_name: true,
                hints,
            },
            notification,
        })
    }

    pub async fn request(&self, ticket: &CommitTicket) -> Result<CommitResponse> {
        self.backend.commit(&ticket.request).await
    }

    /// 結果を反映する。成否にかかわらず最後にドライブ状態を更新する
    pub async fn finish(
        &self,
        state: &mut IntakeState,
        ticket: CommitTicket,
        response: Result<CommitResponse>,
    ) -> CommitOutcome {
        let saved_name = &ticket.request.file.file_name;
        let outcome = match response {
            Ok(response) if response.status() == ResponseStatus::Success => {
                state
                    .notifications
                    .resolve(ticket.notification, SAVED, NotificationKind::Success);

                let fields = response.fields.unwrap_or_default();

                // 保存中に別ファイルが選ばれていたら、その表示には触れない
                if state.store.is_current(ticket.file_id) {
                    state.view.show_saved(&fields, response.drive_link.clone());
                    state.store.clear();
                    state.view.show_dropzone();
                    state.view.filename_input.clear();
                }

                info!(name = %saved_name, stored_at = ?response.stored_at, drive_link = ?response.drive_link, "saved");
                CommitOutcome::Saved {
                    fields,
                    drive_link: response.drive_link,
                }
            }
            Ok(response) => {
                let detail = response.detail().unwrap_or_else(|| "Unknown error".to_string());
                warn!(name = %saved_name, detail = %detail, "save rejected by backend");
                state.notifications.resolve(
                    ticket.notification,
                    format!("Error: {}", detail),
                    NotificationKind::Error,
                );
                CommitOutcome::Failed(IntakeError::CommitFailed(detail))
            }
            Err(e) => {
                warn!(name = %saved_name, error = %e, "save request failed");
                state
                    .notifications
                    .resolve(ticket.notification, UPLOAD_FAILED, NotificationKind::Error);
                CommitOutcome::Failed(e)
            }
        };

        refresh_drive_status(self.backend, &mut state.view).await;
        outcome
    }

    pub async fn run(&self, state: &mut IntakeState, user_name: &str) -> CommitOutcome {
        let ticket = match self.prepare(state, user_name) {
            Ok(ticket) => ticket,
            Err(e) => return CommitOutcome::Rejected(e),
        };
        let response = self.request(&ticket).await;
        self.finish(state, ticket, response).await
    }
}

fn reject(state: &mut IntakeState, error: IntakeError) -> IntakeError {
    state
        .notifications
        .notify(Workflow::Commit, error.to_string(), NotificationKind::Error);
    error
}
