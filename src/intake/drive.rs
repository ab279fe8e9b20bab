//! ドライブ連携状態（接続/切断ボタンの出し分けのみ）

use super::notify::{NotificationKind, Workflow};
use super::view::IntakeView;
use super::IntakeState;
use crate::backend::IntakeBackend;
use crate::error::{IntakeError, Result};
use tracing::{debug, warn};

pub const LOGOUT_FAILED: &str = "Logout failed";

/// 連携状態を問い合わせて表示を更新する
///
/// 取得できなければ接続ボタンを出す（None を返す）。
pub async fn refresh_drive_status<B: IntakeBackend + ?Sized>(
    backend: &B,
    view: &mut IntakeView,
) -> Option<bool> {
    match backend.drive_status().await {
        Ok(status) => {
            debug!(connected = status.connected, "drive status");
            view.set_drive_connected(status.connected);
            Some(status.connected)
        }
        Err(e) => {
            warn!(error = %e, "backend not reachable for drive status");
            view.set_drive_connected(false);
            None
        }
    }
}

/// 連携を解除し、状態を取り直す
///
/// 応答が返っていれば（非2xxでも）状態を取り直す。通信エラー時は取り直さない。
pub async fn disconnect_drive<B: IntakeBackend + ?Sized>(
    backend: &B,
    state: &mut IntakeState,
) -> Result<()> {
    let result = backend.disconnect_drive().await;

    if let Err(e) = &result {
        warn!(error = %e, "drive disconnect failed");
        state
            .notifications
            .notify(Workflow::Drive, LOGOUT_FAILED, NotificationKind::Error);
    }

    if !matches!(result, Err(IntakeError::Transport(_))) {
        refresh_drive_status(backend, &mut state.view).await;
    }
    result
}
