//! 端末への描画
//!
//! 進捗通知は indicatif のバーで、成功/エラー通知は1回だけ行出力する。

use crate::intake::{IntakeView, NotificationId, NotificationKind, NotificationQueue, Preview, ResultMode};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashSet;
use std::future::Future;
use std::time::Duration;

const TICK_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Default)]
pub struct TerminalRenderer {
    bar: Option<(NotificationId, ProgressBar)>,
    printed: HashSet<NotificationId>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn new_bar(text: &str) -> ProgressBar {
        let style = ProgressStyle::with_template("{spinner} {msg} [{bar:30}] {pos}%")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        let bar = ProgressBar::new(100).with_style(style);
        bar.set_message(text.to_string());
        bar
    }

    /// 通知キューの現在の状態を描画する
    pub fn render(&mut self, queue: &NotificationQueue) {
        let now = queue.now();

        match queue.progress() {
            Some(progress) => {
                let same = matches!(&self.bar, Some((id, _)) if *id == progress.id);
                if !same {
                    if let Some((_, old)) = self.bar.take() {
                        old.finish_and_clear();
                    }
                    self.bar = Some((progress.id, Self::new_bar(&progress.text)));
                }
                if let Some((_, bar)) = &self.bar {
                    let ratio = progress.progress_ratio(now).unwrap_or(0.0);
                    bar.set_position((ratio * 100.0).round() as u64);
                    bar.tick();
                }
            }
            None => {
                if let Some((_, bar)) = self.bar.take() {
                    bar.set_position(100);
                    bar.finish_and_clear();
                }
            }
        }

        let visible = queue.visible();
        // 消えた通知は覚えておかない
        self.printed.retain(|id| visible.iter().any(|n| n.id == *id));

        for notification in visible {
            if notification.kind == NotificationKind::Progress || self.printed.contains(&notification.id) {
                continue;
            }
            let icon = if notification.kind == NotificationKind::Success { "✔" } else { "✖" };
            println!("{} {}", icon, notification.text);
            self.printed.insert(notification.id);
        }
    }

    /// 待機中は一定間隔で描画し続ける
    pub async fn while_pending<F: Future>(&mut self, queue: &NotificationQueue, fut: F) -> F::Output {
        tokio::pin!(fut);
        let mut ticker = tokio::time::interval(TICK_INTERVAL);
        loop {
            tokio::select! {
                output = &mut fut => {
                    self.render(queue);
                    return output;
                }
                _ = ticker.tick() => self.render(queue),
            }
        }
    }
}

/// 画面状態を行テキストにする
pub fn describe_view(view: &IntakeView) -> Vec<String> {
    let mut lines = Vec::new();

    match &view.preview {
        Some(Preview::PdfIcon { name }) => lines.push(format!("📄 {}", name)),
        Some(Preview::Image { name }) => lines.push(format!("🖼  {}", name)),
        None => {}
    }

    if !view.filename_input.is_empty() {
        lines.push(format!("Name:   {}", view.filename_input));
    }

    if let Some(panel) = &view.result_panel {
        let title = match panel.mode {
            ResultMode::Preview => "Preview",
            ResultMode::Saved => "Saved",
        };
        lines.push(format!("[{}]", title));
        lines.push(format!("Vendor: {}", panel.fields.vendor));
        lines.push(format!("Date:   {}", panel.fields.date));
        lines.push(format!("Amount: {}", panel.fields.amount));
    }

    if let Some(link) = &view.drive_link {
        lines.push(format!("Drive:  {}", link));
    }

    lines
}

pub fn print_view(view: &IntakeView) {
    for line in describe_view(view) {
        println!("{}", line);
    }
}
