//! 取込ワークフローの状態機械
//!
//! 空 → 選択 → 解析中 → 解析済/失敗 → 保存中 → 保存済/失敗

pub mod analysis;
pub mod commit;
pub mod drive;
pub mod notify;
pub mod selection;
pub mod session;
pub mod view;

pub use analysis::{AnalysisCoordinator, AnalysisOutcome, AnalysisTicket, RATE_LIMIT_SENTINEL};
pub use commit::{CommitCoordinator, CommitOutcome, CommitTicket};
pub use notify::{
    Clock, ManualClock, Notification, NotificationHandle, NotificationId, NotificationKind,
    NotificationQueue, SystemClock, Workflow,
};
pub use selection::{CachedFields, FileCandidate, FileId, PendingFile, SelectionStore};
pub use session::IntakeSession;
pub use view::{DriveAffordance, IntakeView, Preview, ResultMode, ResultPanel};

use std::sync::Arc;
use std::time::Duration;

/// コーディネータが共有する状態（選択・通知・表示）
pub struct IntakeState {
    pub store: SelectionStore,
    pub notifications: NotificationQueue,
    pub view: IntakeView,
}

impl IntakeState {
    pub fn new(clock: Arc<dyn Clock>, dismiss_after: Duration) -> Self {
        Self {
            store: SelectionStore::new(),
            notifications: NotificationQueue::with_dismiss_after(clock, dismiss_after),
            view: IntakeView::default(),
        }
    }
}
