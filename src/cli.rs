use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "doc-intake")]
#[command(about = "Analyze, rename and save invoices/receipts through the intake backend", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 接続先URL（設定ファイル・環境変数より優先）
    #[arg(long, global = true)]
    pub backend_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 保存せずに解析だけ行い、提案名と抽出結果を表示
    Analyze {
        /// PDF / PNG / JPG ファイル
        #[arg(required = true)]
        file: PathBuf,
    },

    /// 解析 → 名前確認 → 保存
    Process {
        /// ファイル、またはフォルダ（フォルダなら一覧から選択）
        #[arg(required = true)]
        path: PathBuf,

        /// 保存名（指定時は確認しない）
        #[arg(short, long)]
        name: Option<String>,

        /// 提案名をそのまま使う
        #[arg(short, long)]
        yes: bool,
    },

    /// ドライブ連携
    Drive {
        #[command(subcommand)]
        action: DriveAction,
    },

    /// 設定を表示/編集
    Config {
        /// 接続先URLを設定
        #[arg(long)]
        set_backend_url: Option<String>,

        /// 通知の自動消去までの秒数を設定（1以上）
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        set_dismiss_after: Option<u64>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Subcommand, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriveAction {
    /// 連携状態を表示
    Status,
    /// 連携を解除
    Disconnect,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_process_with_name() {
        let cli = Cli::try_parse_from(["doc-intake", "process", "scan.pdf", "--name", "invoice", "-v"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Process { path, name, yes } => {
                assert_eq!(path, PathBuf::from("scan.pdf"));
                assert_eq!(name.as_deref(), Some("invoice"));
                assert!(!yes);
            }
            _ => panic!("expected process"),
        }
    }

    #[test]
    fn test_parse_drive_disconnect() {
        let cli = Cli::try_parse_from(["doc-intake", "--backend-url", "http://localhost:9000", "drive", "disconnect"]).unwrap();
        assert_eq!(cli.backend_url.as_deref(), Some("http://localhost:9000"));
        assert!(matches!(cli.command, Commands::Drive { action: DriveAction::Disconnect }));
    }

    #[test]
    fn test_zero_dismiss_after_rejected() {
        assert!(Cli::try_parse_from(["doc-intake", "config", "--set-dismiss-after", "0"]).is_err());
        let cli = Cli::try_parse_from(["doc-intake", "config", "--set-dismiss-after", "6"]).unwrap();
        assert!(matches!(cli.command, Commands::Config { set_dismiss_after: Some(6), .. }));
    }

    #[test]
    fn test_analyze_requires_file() {
        assert!(Cli::try_parse_from(["doc-intake", "analyze"]).is_err());
    }
}
