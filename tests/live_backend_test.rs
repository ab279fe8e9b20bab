//! 実バックエンドへの疎通確認（DOC_INTAKE_BACKEND_URL 設定時のみ）

use doc_intake::backend::{HttpBackend, IntakeBackend};

fn backend_url() -> Option<String> {
    match std::env::var("DOC_INTAKE_BACKEND_URL") {
        Ok(url) if !url.trim().is_empty() => Some(url),
        _ => {
            eprintln!("DOC_INTAKE_BACKEND_URL not set; skipping live backend test");
            None
        }
    }
}

#[tokio::test]
async fn live_drive_status() {
    let Some(url) = backend_url() else {
        return;
    };

    let backend = HttpBackend::new(url).expect("client build failed");
    let status = backend.drive_status().await.expect("drive status request failed");
    println!("drive connected: {}", status.connected);
}
