//! ユーザー操作の入口
//!
//! バックエンドと状態を所有し、選択・解析・保存・クリア・ドライブ操作を提供する。
//! 待機中に描画したい場合は `parts` で分割し、各コーディネータを段階ごとに呼ぶ。

use super::analysis::{AnalysisCoordinator, AnalysisOutcome};
use super::commit::{CommitCoordinator, CommitOutcome};
use super::drive;
use super::notify::{NotificationKind, Workflow};
use super::selection::{FileCandidate, PendingFile};
use super::IntakeState;
use crate::backend::IntakeBackend;
use crate::error::Result;
use tracing::warn;

pub struct IntakeSession<B> {
    backend: B,
    state: IntakeState,
}

impl<B: IntakeBackend> IntakeSession<B> {
    pub fn new(backend: B, state: IntakeState) -> Self {
        Self { backend, state }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn state(&self) -> &IntakeState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut IntakeState {
        &mut self.state
    }

    pub fn parts(&mut self) -> (&B, &mut IntakeState) {
        (&self.backend, &mut self.state)
    }

    /// ファイル選択（ピック/ドロップ）。非対応タイプは通知して終了
    pub fn select(&mut self, candidate: FileCandidate) -> Result<PendingFile> {
        match self.state.store.select(candidate) {
            Ok(file) => {
                self.state.view.show_preview(&file);
                Ok(file)
            }
            Err(e) => {
                warn!(error = %e, "selection rejected");
                self.state.notifications.notify(
                    Workflow::Selection,
                    "Invalid file type. Please upload PDF, PNG, or JPG.",
                    NotificationKind::Error,
                );
                Err(e)
            }
        }
    }

    pub async fn analyze(&mut self, file: PendingFile) -> AnalysisOutcome {
        AnalysisCoordinator::new(&self.backend)
            .run(&mut self.state, file)
            .await
    }

    /// 選択して続けて解析する（選択が拒否されたら通信しない）
    pub async fn select_and_analyze(&mut self, candidate: FileCandidate) -> Result<AnalysisOutcome> {
        let file = self.select(candidate)?;
        Ok(self.analyze(file).await)
    }

    pub async fn save(&mut self, user_name: &str) -> CommitOutcome {
        CommitCoordinator::new(&self.backend)
            .run(&mut self.state, user_name)
            .await
    }

    /// 選択を取り消す（通知も消す）
    pub fn delete_selection(&mut self) {
        self.state.store.clear();
        self.state.notifications.clear_all();
        self.state.view.show_dropzone();
        self.state.view.filename_input.clear();
        self.state.view.result_panel = None;
    }

    /// 結果表示も含めてすべて初期状態に戻す
    pub fn clear(&mut self) {
        self.state.view.hide_result();
        self.delete_selection();
    }

    pub async fn refresh_drive(&mut self) -> Option<bool> {
        drive::refresh_drive_status(&self.backend, &mut self.state.view).await
    }

    pub async fn disconnect_drive(&mut self) -> Result<()> {
        drive::disconnect_drive(&self.backend, &mut self.state).await
    }
}
