//! レスポンスボディのデコード
//!
//! エラー時のバックエンドは `{"detail": ...}` のみを返す（statusなし）。
//! JSONでないボディはHTTPステータスを詳細とするエラー応答として扱う。

use crate::error::{Error, Result};
use crate::types::{CommitResponse, DriveStatus, DryRunResponse};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// statusを持つ応答型の共通操作
pub trait StatusBody: DeserializeOwned {
    /// 詳細メッセージのみを持つエラー応答を作る
    fn from_detail(detail: String) -> Self;
}

impl StatusBody for DryRunResponse {
    fn from_detail(detail: String) -> Self {
        DryRunResponse {
            detail: Some(Value::String(detail)),
            ..Default::default()
        }
    }
}

impl StatusBody for CommitResponse {
    fn from_detail(detail: String) -> Self {
        CommitResponse {
            detail: Some(Value::String(detail)),
            ..Default::default()
        }
    }
}

fn is_success(http_status: u16) -> bool {
    (200..300).contains(&http_status)
}

/// HTTPステータスとボディから応答をデコード（失敗しない）
pub fn decode_status_body<T: StatusBody>(http_status: u16, body: &str) -> T {
    match serde_json::from_str::<T>(body) {
        Ok(parsed) => parsed,
        Err(_) if !is_success(http_status) => T::from_detail(format!("HTTP {}", http_status)),
        Err(e) => T::from_detail(format!("Malformed response: {}", e)),
    }
}

pub fn decode_dry_run(http_status: u16, body: &str) -> DryRunResponse {
    decode_status_body(http_status, body)
}

pub fn decode_commit(http_status: u16, body: &str) -> CommitResponse {
    decode_status_body(http_status, body)
}

/// ドライブ状態は成功時のJSONのみ受け付ける
pub fn decode_drive_status(http_status: u16, body: &str) -> Result<DriveStatus> {
    if !is_success(http_status) {
        return Err(Error::Parse(format!("drive status HTTP {}", http_status)));
    }
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ResponseStatus;

    #[test]
    fn test_decode_http_error_detail() {
        let resp = decode_commit(401, r#"{"detail": "Authentication required. Please connect Google Drive."}"#);
        assert_eq!(resp.status(), ResponseStatus::Error);
        assert_eq!(
            resp.detail().as_deref(),
            Some("Authentication required. Please connect Google Drive.")
        );
    }

    #[test]
    fn test_decode_non_json_error() {
        let resp = decode_dry_run(502, "<html>Bad Gateway</html>");
        assert_eq!(resp.status(), ResponseStatus::Error);
        assert_eq!(resp.detail().as_deref(), Some("HTTP 502"));
    }

    #[test]
    fn test_decode_non_json_success_is_error() {
        let resp = decode_dry_run(200, "not json");
        assert_eq!(resp.status(), ResponseStatus::Error);
        assert!(resp.detail().unwrap().starts_with("Malformed response"));
    }

    #[test]
    fn test_decode_rate_limit() {
        let resp = decode_dry_run(200, r#"{"status": "rate_limit", "predicted_filename": "WAIT_RETRY_a.pdf"}"#);
        assert_eq!(resp.status(), ResponseStatus::RateLimit);
    }

    #[test]
    fn test_decode_drive_status() {
        assert!(decode_drive_status(200, r#"{"connected": true}"#).unwrap().connected);
        assert!(!decode_drive_status(200, r#"{}"#).unwrap().connected);
        assert!(decode_drive_status(500, "oops").is_err());
    }
}
