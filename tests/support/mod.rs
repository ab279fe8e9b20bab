//! テスト用のスクリプト化バックエンド
#![allow(dead_code)]

use async_trait::async_trait;
use doc_intake::backend::{CommitRequest, IntakeBackend, UploadFile};
use doc_intake::error::{IntakeError, Result};
use doc_intake::intake::{FileCandidate, IntakeSession, IntakeState, ManualClock, NotificationKind};
use doc_intake_common::{CommitResponse, DriveStatus, DryRunResponse};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// `Err(msg)` は通信エラーとして返す
type Scripted<T> = std::result::Result<T, String>;

#[derive(Default)]
pub struct FakeBackend {
    dry_runs: Mutex<VecDeque<Scripted<DryRunResponse>>>,
    commits: Mutex<VecDeque<Scripted<CommitResponse>>>,
    drive_connected: Mutex<Option<bool>>,
    disconnect_fails: Mutex<bool>,
    disconnect_http_status: Mutex<Option<u16>>,
    pub analyze_calls: Mutex<Vec<UploadFile>>,
    pub commit_calls: Mutex<Vec<CommitRequest>>,
    pub drive_status_calls: AtomicUsize,
    pub disconnect_calls: AtomicUsize,
}

impl FakeBackend {
    pub fn new() -> Self {
        let backend = Self::default();
        *backend.drive_connected.lock().unwrap() = Some(false);
        backend
    }

    pub fn push_dry_run(&self, json: Value) {
        let response = serde_json::from_value(json).expect("invalid dry-run json");
        self.dry_runs.lock().unwrap().push_back(Ok(response));
    }

    pub fn push_dry_run_transport_error(&self) {
        self.dry_runs.lock().unwrap().push_back(Err("connection refused".into()));
    }

    pub fn push_commit(&self, json: Value) {
        let response = serde_json::from_value(json).expect("invalid commit json");
        self.commits.lock().unwrap().push_back(Ok(response));
    }

    pub fn push_commit_transport_error(&self) {
        self.commits.lock().unwrap().push_back(Err("connection reset".into()));
    }

    /// None なら状態取得は通信エラー
    pub fn set_drive_connected(&self, connected: Option<bool>) {
        *self.drive_connected.lock().unwrap() = connected;
    }

    pub fn set_disconnect_fails(&self, fails: bool) {
        *self.disconnect_fails.lock().unwrap() = fails;
    }

    /// 解除要求に非2xxを返す（通信自体は成功）
    pub fn set_disconnect_http_status(&self, status: Option<u16>) {
        *self.disconnect_http_status.lock().unwrap() = status;
    }

    pub fn analyze_count(&self) -> usize {
        self.analyze_calls.lock().unwrap().len()
    }

    pub fn commit_count(&self) -> usize {
        self.commit_calls.lock().unwrap().len()
    }

    pub fn last_commit(&self) -> CommitRequest {
        self.commit_calls.lock().unwrap().last().cloned().expect("no commit call")
    }

    pub fn drive_status_count(&self) -> usize {
        self.drive_status_calls.load(Ordering::SeqCst)
    }
}

fn next<T>(queue: &Mutex<VecDeque<Scripted<T>>>) -> Result<T> {
    match queue.lock().unwrap().pop_front() {
        Some(Ok(value)) => Ok(value),
        Some(Err(msg)) => Err(IntakeError::Transport(msg)),
        None => Err(IntakeError::Transport("no scripted response".into())),
    }
}

#[async_trait]
impl IntakeBackend for FakeBackend {
    async fn analyze(&self, file: &UploadFile) -> Result<DryRunResponse> {
        self.analyze_calls.lock().unwrap().push(file.clone());
        next(&self.dry_runs)
    }

    async fn commit(&self, request: &CommitRequest) -> Result<CommitResponse> {
        self.commit_calls.lock().unwrap().push(request.clone());
        next(&self.commits)
    }

    async fn drive_status(&self) -> Result<DriveStatus> {
        self.drive_status_calls.fetch_add(1, Ordering::SeqCst);
        match *self.drive_connected.lock().unwrap() {
            Some(connected) => Ok(DriveStatus { connected }),
            None => Err(IntakeError::Transport("drive status unreachable".into())),
        }
    }

    async fn disconnect_drive(&self) -> Result<()> {
        self.disconnect_calls.fetch_add(1, Ordering::SeqCst);
        if *self.disconnect_fails.lock().unwrap() {
            return Err(IntakeError::Transport("disconnect failed".into()));
        }
        if let Some(status) = *self.disconnect_http_status.lock().unwrap() {
            return Err(IntakeError::HttpStatus(status));
        }
        self.set_drive_connected(Some(false));
        Ok(())
    }
}

pub fn session(backend: FakeBackend) -> (IntakeSession<FakeBackend>, ManualClock) {
    let clock = ManualClock::new();
    let state = IntakeState::new(Arc::new(clock.clone()), Duration::from_secs(4));
    (IntakeSession::new(backend, state), clock)
}

pub fn pdf(name: &str) -> FileCandidate {
    FileCandidate::new(name, "application/pdf", format!("%PDF-1.4 {}", name).into_bytes())
}

pub fn png(name: &str) -> FileCandidate {
    FileCandidate::new(name, "image/png", vec![0x89, b'P', b'N', b'G'])
}

pub fn acme_dry_run() -> Value {
    serde_json::json!({
        "status": "dry_run",
        "predicted_filename": "Acme_Invoice_2024.pdf",
        "fields": {"vendor": "Acme", "date": "2024-01-05", "amount": "120.00"}
    })
}

/// 表示中の通知テキスト（種類付き）
pub fn visible(session: &IntakeSession<FakeBackend>) -> Vec<(NotificationKind, String)> {
    session
        .state()
        .notifications
        .visible()
        .into_iter()
        .map(|n| (n.kind, n.text.clone()))
        .collect()
}
