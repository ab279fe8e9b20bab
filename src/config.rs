use crate::error::{IntakeError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const BACKEND_URL_ENV: &str = "DOC_INTAKE_BACKEND_URL";
const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_DISMISS_AFTER_SECS: u64 = 4;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend_url: String,
    /// 成功/エラー通知の自動消去までの秒数
    pub dismiss_after_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.into(),
            dismiss_after_secs: DEFAULT_DISMISS_AFTER_SECS,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| IntakeError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("doc-intake").join("config.json"))
    }

    /// 接続先URL（環境変数を優先、末尾の `/` は除く）
    pub fn backend_url(&self) -> String {
        let url = match std::env::var(BACKEND_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => url,
            _ => self.backend_url.clone(),
        };
        url.trim().trim_end_matches('/').to_string()
    }

    pub fn set_backend_url(&mut self, url: String) -> Result<()> {
        let url = url.trim().trim_end_matches('/').to_string();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(IntakeError::Config(format!("backend URL must start with http:// or https://: {}", url)));
        }
        self.backend_url = url;
        Ok(())
    }

    /// 0秒だと通知が表示と同時に消えるので受け付けない
    pub fn set_dismiss_after_secs(&mut self, secs: u64) -> Result<()> {
        if secs == 0 {
            return Err(IntakeError::Config("notification dwell must be at least 1 second".into()));
        }
        self.dismiss_after_secs = secs;
        Ok(())
    }

    /// 手編集で0が入っていても最低1秒
    pub fn dismiss_after(&self) -> Duration {
        Duration::from_secs(self.dismiss_after_secs.max(1))
    }
}
