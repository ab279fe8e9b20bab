//! ログ初期化
//!
//! 標準出力は画面表示に使うので、ログは標準エラーへ出す。

use tracing_subscriber::{fmt, EnvFilter};

/// `RUST_LOG` があればそれを優先、なければ verbose で debug / 通常は warn
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("doc_intake={default_level},warn")));

    // テスト等で二重初期化されても落とさない
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
