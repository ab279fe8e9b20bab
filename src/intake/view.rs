//! 画面に見せる状態
//!
//! コーディネータが更新し、フロントエンド（端末表示など）が描画する。

use super::selection::PendingFile;
use doc_intake_common::{ExtractedFields, FieldDisplay};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    /// PDFはアイコン表示
    PdfIcon { name: String },
    Image { name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultMode {
    /// ドライラン結果（まだ保存していない）
    Preview,
    Saved,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultPanel {
    pub mode: ResultMode,
    pub fields: FieldDisplay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriveAffordance {
    #[default]
    Unknown,
    ShowConnect,
    ShowDisconnect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeView {
    pub dropzone_visible: bool,
    pub preview: Option<Preview>,
    /// 編集可能なファイル名欄
    pub filename_input: String,
    pub result_panel: Option<ResultPanel>,
    pub drive_link: Option<String>,
    pub clear_button_visible: bool,
    pub drive: DriveAffordance,
}

impl Default for IntakeView {
    fn default() -> Self {
        Self {
            dropzone_visible: true,
            preview: None,
            filename_input: String::new(),
            result_panel: None,
            drive_link: None,
            clear_button_visible: false,
            drive: DriveAffordance::Unknown,
        }
    }
}

impl IntakeView {
    pub fn show_preview(&mut self, file: &PendingFile) {
        let name = file.original_name().to_string();
        self.preview = Some(if file.media_type().is_image() {
            Preview::Image { name }
        } else {
            Preview::PdfIcon { name }
        });
        self.dropzone_visible = false;
    }

    /// ドロップ領域に戻す（結果パネルはそのまま）
    pub fn show_dropzone(&mut self) {
        self.preview = None;
        self.dropzone_visible = true;
    }

    pub fn show_analysis(&mut self, fields: &ExtractedFields) {
        self.result_panel = Some(ResultPanel {
            mode: ResultMode::Preview,
            fields: fields.display(),
        });
        self.drive_link = None;
        self.clear_button_visible = false;
    }

    pub fn hide_result(&mut self) {
        self.result_panel = None;
        self.drive_link = None;
        self.clear_button_visible = false;
    }

    pub fn show_saved(&mut self, fields: &ExtractedFields, drive_link: Option<String>) {
        self.result_panel = Some(ResultPanel {
            mode: ResultMode::Saved,
            fields: fields.display(),
        });
        self.drive_link = drive_link.filter(|l| !l.is_empty());
        self.clear_button_visible = true;
    }

    pub fn set_drive_connected(&mut self, connected: bool) {
        self.drive = if connected {
            DriveAffordance::ShowDisconnect
        } else {
            DriveAffordance::ShowConnect
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_shows_dropzone() {
        let view = IntakeView::default();
        assert!(view.dropzone_visible);
        assert!(view.preview.is_none());
        assert!(view.result_panel.is_none());
        assert_eq!(view.drive, DriveAffordance::Unknown);
    }

    #[test]
    fn test_saved_hides_empty_link() {
        let mut view = IntakeView::default();
        view.show_saved(&ExtractedFields::default(), Some(String::new()));
        assert!(view.drive_link.is_none());
        assert!(view.clear_button_visible);
        let panel = view.result_panel.unwrap();
        assert_eq!(panel.mode, ResultMode::Saved);
        assert_eq!(panel.fields.amount, "--");
    }

    #[test]
    fn test_drive_affordance() {
        let mut view = IntakeView::default();
        view.set_drive_connected(true);
        assert_eq!(view.drive, DriveAffordance::ShowDisconnect);
        view.set_drive_connected(false);
        assert_eq!(view.drive, DriveAffordance::ShowConnect);
    }
}
