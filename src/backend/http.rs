use super::{CommitRequest, IntakeBackend, UploadFile};
use crate::error::{IntakeError, Result};
use async_trait::async_trait;
use doc_intake_common::{
    decode_commit, decode_drive_status, decode_dry_run, CommitResponse, DriveStatus, DryRunResponse,
};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::debug;

/// reqwestによるHTTP実装
///
/// ドライブ認証情報はセッションCookieで保持されるため、Cookieストアを有効にする。
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().cookie_store(true).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// 構築済みのクライアントを使う
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn file_part(file: &UploadFile) -> Result<Part> {
        let part = Part::bytes(file.bytes.to_vec())
            .file_name(file.file_name.clone())
            .mime_str(file.media_type.mime())?;
        Ok(part)
    }
}

#[async_trait]
impl IntakeBackend for HttpBackend {
    async fn analyze(&self, file: &UploadFile) -> Result<DryRunResponse> {
        let form = Form::new().part("file", Self::file_part(file)?);

        debug!(file = %file.file_name, size = file.bytes.len(), "dry-run request");
        let response = self
            .client
            .post(self.url("/upload?dry_run=true"))
            .multipart(form)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, "dry-run response");
        Ok(decode_dry_run(status, &body))
    }

    async fn commit(&self, request: &CommitRequest) -> Result<CommitResponse> {
        let mut form = Form::new().part("file", Self::file_part(&request.file)?);
        if let Some(hints) = &request.hints {
            for (name, value) in hints.form_parts() {
                form = form.text(name, value);
            }
        }

        let path = if request.use_custom_name {
            "/upload?use_custom_name=true"
        } else {
            "/upload"
        };

        debug!(
            file = %request.file.file_name,
            hinted = request.hints.is_some(),
            "commit request"
        );
        let response = self.client.post(self.url(path)).multipart(form).send().await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, "commit response");
        Ok(decode_commit(status, &body))
    }

    async fn drive_status(&self) -> Result<DriveStatus> {
        let response = self
            .client
            .get(self.url("/drive/status"))
            .header(reqwest::header::CACHE_CONTROL, "no-store")
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(decode_drive_status(status, &body)?)
    }

    async fn disconnect_drive(&self) -> Result<()> {
        let response = self.client.post(self.url("/disconnect-drive")).send().await?;

        let status = response.status();
        debug!(status = status.as_u16(), "disconnect response");
        if !status.is_success() {
            return Err(IntakeError::HttpStatus(status.as_u16()));
        }
        Ok(())
    }
}
