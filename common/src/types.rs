//! バックエンドとの送受信型
//!
//! - DryRunResponse: 解析のみ（保存しない）の応答
//! - CommitResponse: 保存の応答
//! - DriveStatus: ドライブ連携状態
//! - CommitHints: 解析結果を保存リクエストに引き継ぐためのヒント

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 抽出フィールド（各項目は欠落しうる）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedFields {
    pub vendor: Option<String>,
    pub date: Option<String>,
    pub amount: Option<String>,
}

/// 表示用のフィールド（欠落時は "Unknown" / "--"）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDisplay {
    pub vendor: String,
    pub date: String,
    pub amount: String,
}

pub const UNKNOWN_TEXT: &str = "Unknown";
pub const MISSING_AMOUNT_TEXT: &str = "--";

fn or_fallback(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}

impl ExtractedFields {
    pub fn display(&self) -> FieldDisplay {
        FieldDisplay {
            vendor: or_fallback(self.vendor.as_deref(), UNKNOWN_TEXT),
            date: or_fallback(self.date.as_deref(), UNKNOWN_TEXT),
            amount: or_fallback(self.amount.as_deref(), MISSING_AMOUNT_TEXT),
        }
    }
}

/// 応答ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    DryRun,
    Success,
    RateLimit,
    /// 上記以外（欠落・未知の値を含む）
    Error,
}

impl ResponseStatus {
    pub fn parse(status: Option<&str>) -> Self {
        match status {
            Some("dry_run") => ResponseStatus::DryRun,
            Some("success") => ResponseStatus::Success,
            Some("rate_limit") => ResponseStatus::RateLimit,
            _ => ResponseStatus::Error,
        }
    }
}

/// `detail` は文字列のほか、検証エラー時は配列で返ることがある
fn detail_text(detail: Option<&Value>) -> Option<String> {
    match detail? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// 解析（ドライラン）応答
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DryRunResponse {
    pub status: Option<String>,
    pub predicted_filename: Option<String>,
    pub fields: Option<ExtractedFields>,
    pub detail: Option<Value>,
}

impl DryRunResponse {
    pub fn status(&self) -> ResponseStatus {
        ResponseStatus::parse(self.status.as_deref())
    }

    pub fn detail(&self) -> Option<String> {
        detail_text(self.detail.as_ref())
    }
}

/// 保存応答
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitResponse {
    pub status: Option<String>,
    pub fields: Option<ExtractedFields>,
    pub drive_link: Option<String>,
    pub file_link: Option<String>,
    pub stored_at: Option<String>,
    pub detail: Option<Value>,
}

impl CommitResponse {
    pub fn status(&self) -> ResponseStatus {
        ResponseStatus::parse(self.status.as_deref())
    }

    pub fn detail(&self) -> Option<String> {
        detail_text(self.detail.as_ref())
    }
}

/// ドライブ連携状態
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveStatus {
    #[serde(default)]
    pub connected: bool,
}

/// 保存時に送る抽出済みフィールド（バックエンドの再抽出を省略させる）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommitHints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provided_vendor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provided_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provided_amount: Option<String>,
}

impl CommitHints {
    pub fn from_fields(fields: &ExtractedFields) -> Self {
        Self {
            provided_vendor: fields.vendor.clone(),
            provided_date: fields.date.clone(),
            provided_amount: fields.amount.clone(),
        }
    }

    /// multipartのテキストパートとして送る (名前, 値) の一覧
    pub fn form_parts(&self) -> Vec<(&'static str, String)> {
        [
            ("provided_vendor", &self.provided_vendor),
            ("provided_date", &self.provided_date),
            ("provided_amount", &self.provided_amount),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.clone().map(|v| (name, v)))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.provided_vendor.is_none() && self.provided_date.is_none() && self.provided_amount.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_fallbacks() {
        let fields = ExtractedFields {
            vendor: None,
            date: Some(String::new()),
            amount: None,
        };
        let display = fields.display();
        assert_eq!(display.vendor, "Unknown");
        assert_eq!(display.date, "Unknown");
        assert_eq!(display.amount, "--");
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(ResponseStatus::parse(Some("dry_run")), ResponseStatus::DryRun);
        assert_eq!(ResponseStatus::parse(Some("success")), ResponseStatus::Success);
        assert_eq!(ResponseStatus::parse(Some("rate_limit")), ResponseStatus::RateLimit);
        assert_eq!(ResponseStatus::parse(Some("failed")), ResponseStatus::Error);
        assert_eq!(ResponseStatus::parse(None), ResponseStatus::Error);
    }

    #[test]
    fn test_dry_run_response_deserialize() {
        let json = r#"{
            "status": "dry_run",
            "predicted_filename": "Acme_Invoice_2024.pdf",
            "fields": {"vendor": "Acme", "date": "2024-01-05", "amount": "120.00"},
            "detail": "Analysis complete. File not saved."
        }"#;
        let resp: DryRunResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.status(), ResponseStatus::DryRun);
        assert_eq!(resp.predicted_filename.as_deref(), Some("Acme_Invoice_2024.pdf"));
        let fields = resp.fields.unwrap();
        assert_eq!(fields.vendor.as_deref(), Some("Acme"));
        assert_eq!(fields.amount.as_deref(), Some("120.00"));
    }

    #[test]
    fn test_commit_response_validation_detail() {
        let json = r#"{"detail": [{"loc": ["body", "file"], "msg": "field required"}]}"#;
        let resp: CommitResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.status(), ResponseStatus::Error);
        assert!(resp.detail().unwrap().contains("field required"));
    }

    #[test]
    fn test_hints_form_parts_skip_missing() {
        let hints = CommitHints::from_fields(&ExtractedFields {
            vendor: Some("Acme".into()),
            date: None,
            amount: Some("120.00".into()),
        });
        let parts = hints.form_parts();
        assert_eq!(
            parts,
            vec![
                ("provided_vendor", "Acme".to_string()),
                ("provided_amount", "120.00".to_string()),
            ]
        );
        assert!(!hints.is_empty());
        assert!(CommitHints::default().is_empty());
    }
}
