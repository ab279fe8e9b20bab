//! 一時通知（トースト）キュー
//!
//! - 進捗通知は作成したコーディネータが解決するまで残る
//! - 成功/エラー通知は一定時間で自動的に消える（ユーザーが先に閉じてもよい）
//! - 進捗通知は常に最大1件。新しい進捗を開始すると同じワークフローの通知は
//!   種類を問わず消え、他ワークフローの進捗も置き換えられる
//!
//! 時刻は `Clock` から取るので、表示面にもタイマー実装にも依存しない。

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_secs(4);

/// 進捗バーの中間点（開始からの経過時間, 比率）
///
/// 通信の実際の進み具合ではなく、待ち時間中に動きを見せるためのもの。
pub const PROGRESS_WAYPOINTS: [(Duration, f32); 3] = [
    (Duration::from_millis(100), 0.3),
    (Duration::from_millis(500), 0.7),
    (Duration::from_millis(1200), 0.9),
];

pub trait Clock: Send + Sync {
    /// 任意の起点からの経過時間（単調増加）
    fn now(&self) -> Duration;
}

pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// 手動で進める時計（複製しても同じ時刻を共有する）
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Arc<Mutex<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Progress,
    Success,
    Error,
}

/// 通知の発生元
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Workflow {
    Selection,
    Analysis,
    Commit,
    Drive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(u64);

/// 進捗通知を後で解決するためのハンドル
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationHandle {
    pub id: NotificationId,
    pub workflow: Workflow,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: NotificationId,
    pub workflow: Workflow,
    pub kind: NotificationKind,
    pub text: String,
    pub shown_at: Duration,
    /// 進捗通知は None（自動では消えない）
    pub expires_at: Option<Duration>,
}

impl Notification {
    /// 進捗通知のみ値を持つ。時間経過に対して単調非減少
    pub fn progress_ratio(&self, now: Duration) -> Option<f32> {
        if self.kind != NotificationKind::Progress {
            return None;
        }
        let elapsed = now.saturating_sub(self.shown_at);
        let ratio = PROGRESS_WAYPOINTS
            .iter()
            .filter(|(at, _)| elapsed >= *at)
            .map(|(_, r)| *r)
            .last()
            .unwrap_or(0.0);
        Some(ratio)
    }

    pub fn is_expired(&self, now: Duration) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

pub struct NotificationQueue {
    clock: Arc<dyn Clock>,
    dismiss_after: Duration,
    next_id: u64,
    items: Vec<Notification>,
}

impl NotificationQueue {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_dismiss_after(clock, DEFAULT_DISMISS_AFTER)
    }

    pub fn with_dismiss_after(clock: Arc<dyn Clock>, dismiss_after: Duration) -> Self {
        Self {
            clock,
            dismiss_after,
            next_id: 0,
            items: Vec::new(),
        }
    }

    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// 追加のたびに期限切れを捨てるので、保持数は表示中の件数を超えて増えない
    fn push(&mut self, workflow: Workflow, kind: NotificationKind, text: String) -> NotificationId {
        let shown_at = self.clock.now();
        self.items.retain(|n| !n.is_expired(shown_at));

        self.next_id += 1;
        let id = NotificationId(self.next_id);
        let expires_at = match kind {
            NotificationKind::Progress => None,
            _ => Some(shown_at + self.dismiss_after),
        };
        self.items.push(Notification {
            id,
            workflow,
            kind,
            text,
            shown_at,
            expires_at,
        });
        id
    }

    /// 進捗通知を開始する
    pub fn start(&mut self, workflow: Workflow, text: impl Into<String>) -> NotificationHandle {
        self.items
            .retain(|n| n.workflow != workflow && n.kind != NotificationKind::Progress);
        let id = self.push(workflow, NotificationKind::Progress, text.into());
        NotificationHandle { id, workflow }
    }

    /// 進捗通知を取り除き、結果の通知を出す
    ///
    /// ハンドルの通知が既に消えていても結果は表示する。
    /// `Progress` を渡した場合は同じワークフローで進捗を開始し直す。
    pub fn resolve(
        &mut self,
        handle: NotificationHandle,
        text: impl Into<String>,
        kind: NotificationKind,
    ) -> NotificationId {
        self.dismiss(handle.id);
        match kind {
            NotificationKind::Progress => self.start(handle.workflow, text).id,
            _ => self.push(handle.workflow, kind, text.into()),
        }
    }

    /// 単発の通知（他の通知には触れない）
    pub fn notify(
        &mut self,
        workflow: Workflow,
        text: impl Into<String>,
        kind: NotificationKind,
    ) -> NotificationId {
        match kind {
            NotificationKind::Progress => self.start(workflow, text).id,
            _ => self.push(workflow, kind, text.into()),
        }
    }

    /// 通知を閉じる。既に消えていれば false
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    pub fn clear_all(&mut self) {
        self.items.clear();
    }

    /// 期限切れの通知を取り除く
    pub fn prune(&mut self) {
        let now = self.clock.now();
        self.items.retain(|n| !n.is_expired(now));
    }

    /// 現時点で表示中の通知（古い順）
    pub fn visible(&self) -> Vec<&Notification> {
        let now = self.clock.now();
        self.items.iter().filter(|n| !n.is_expired(now)).collect()
    }

    pub fn is_visible(&self, id: NotificationId) -> bool {
        self.visible().iter().any(|n| n.id == id)
    }

    /// 表示中の進捗通知
    pub fn progress(&self) -> Option<&Notification> {
        self.items.iter().find(|n| n.kind == NotificationKind::Progress)
    }

    /// 保持している件数（期限切れで未整理のものを含む）
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn progress_count(&self) -> usize {
        self.visible()
            .iter()
            .filter(|n| n.kind == NotificationKind::Progress)
            .count()
    }
}
