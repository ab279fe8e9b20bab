//! ドライラン解析の調整
//!
//! 1. begin: 対象ファイルを確定し、進捗通知を出す
//! 2. request: バックエンドへ解析要求（待機点。状態には触れない）
//! 3. finish: 対象が今も選択中か確認してから結果を反映する
//!
//! 待機中に別ファイルが選ばれた場合、遅れて届いた結果は何も通知せずに捨てる。

use super::notify::{NotificationHandle, NotificationKind, Workflow};
use super::selection::{CachedFields, PendingFile};
use super::IntakeState;
use crate::backend::IntakeBackend;
use crate::error::{IntakeError, Result};
use doc_intake_common::{DryRunResponse, ResponseStatus};
use tracing::{debug, info, warn};

/// レート制限時にファイル名欄へ入れる値
pub const RATE_LIMIT_SENTINEL: &str = "Rate_Limit_Wait_1_Min";

pub const ANALYSIS_COMPLETE: &str = "Analysis Complete";
pub const QUOTA_EXCEEDED: &str = "⚠️ Quota Exceeded. Please wait 1 min.";
pub const ANALYSIS_FAILED: &str = "Analysis Failed";
pub const CONNECTION_ERROR: &str = "Server Connection Error";

/// 要求発行時に確定した対象
#[derive(Debug)]
pub struct AnalysisTicket {
    file: PendingFile,
    notification: NotificationHandle,
}

impl AnalysisTicket {
    pub fn file(&self) -> &PendingFile {
        &self.file
    }

    pub fn notification(&self) -> NotificationHandle {
        self.notification
    }
}

#[derive(Debug)]
pub enum AnalysisOutcome {
    Analyzed(CachedFields),
    RateLimited,
    Failed(IntakeError),
    /// 対象がもう選択されていない（結果は破棄済み）
    Stale,
}

pub struct AnalysisCoordinator<'a, B: ?Sized> {
    backend: &'a B,
}

impl<'a, B: IntakeBackend + ?Sized> AnalysisCoordinator<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    pub fn begin(&self, state: &mut IntakeState, file: PendingFile) -> AnalysisTicket {
        let notification = state
            .notifications
            .start(Workflow::Analysis, format!("Analyzing {}...", file.original_name()));
        AnalysisTicket { file, notification }
    }

    pub async fn request(&self, ticket: &AnalysisTicket) -> Result<DryRunResponse> {
        let upload = ticket.file.to_upload(ticket.file.original_name());
        self.backend.analyze(&upload).await
    }

    pub fn finish(
        &self,
        state: &mut IntakeState,
        ticket: AnalysisTicket,
        response: Result<DryRunResponse>,
    ) -> AnalysisOutcome {
        let file = &ticket.file;
        if !state.store.is_current(file.id()) {
            state.notifications.dismiss(ticket.notification.id);
            debug!(name = %file.original_name(), fingerprint = %file.fingerprint(), "stale analysis discarded");
            return AnalysisOutcome::Stale;
        }

        let original_name = file.original_name().to_string();
        let response = match response {
            Ok(response) => response,
            Err(e) => {
                warn!(name = %original_name, error = %e, "analysis request failed");
                state
                    .notifications
                    .resolve(ticket.notification, CONNECTION_ERROR, NotificationKind::Error);
                state.view.filename_input = original_name;
                return AnalysisOutcome::Failed(e);
            }
        };

        match response.status() {
            ResponseStatus::DryRun | ResponseStatus::Success => {
                state
                    .notifications
                    .resolve(ticket.notification, ANALYSIS_COMPLETE, NotificationKind::Success);

                let suggested_name = response
                    .predicted_filename
                    .filter(|n| !n.trim().is_empty());
                state.view.filename_input = suggested_name.clone().unwrap_or(original_name);

                let cached = CachedFields {
                    fields: response.fields.clone().unwrap_or_default(),
                    suggested_name,
                };
                if let Some(fields) = &response.fields {
                    state.store.attach_fields(cached.clone(), file.id());
                    state.view.show_analysis(fields);
                }

                info!(
                    name = %file.original_name(),
                    suggested = ?cached.suggested_name,
                    cached = response.fields.is_some(),
                    "analysis complete"
                );
                AnalysisOutcome::Analyzed(cached)
            }
            ResponseStatus::RateLimit => {
                warn!(name = %original_name, "analysis rate limited");
                state
                    .notifications
                    .resolve(ticket.notification, QUOTA_EXCEEDED, NotificationKind::Error);
                state.view.filename_input = RATE_LIMIT_SENTINEL.to_string();
                AnalysisOutcome::RateLimited
            }
            ResponseStatus::Error => {
                let detail = response
                    .detail()
                    .unwrap_or_else(|| format!("unexpected status {:?}", response.status));
                warn!(name = %original_name, detail = %detail, "analysis failed");
                state
                    .notifications
                    .resolve(ticket.notification, ANALYSIS_FAILED, NotificationKind::Error);
                state.view.filename_input = original_name;
                AnalysisOutcome::Failed(IntakeError::AnalysisFailed(detail))
            }
        }
    }

    pub async fn run(&self, state: &mut IntakeState, file: PendingFile) -> AnalysisOutcome {
        let ticket = self.begin(state, file);
        let response = self.request(&ticket).await;
        self.finish(state, ticket, response)
    }
}
