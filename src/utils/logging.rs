//! tracing サブスクライバの初期化

use std::io::{self, IsTerminal};
use tracing_subscriber::{EnvFilter, fmt};

/// ログフィルタを読む環境変数
pub const LOG_ENV: &str = "VOCABULARY_LOG";

/// stderr へ出力するサブスクライバを登録します。
///
/// stdout は対話シェルの出力に使うため、ログは必ず stderr に流す。
/// フィルタは `VOCABULARY_LOG`（未設定なら `warn`）。
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    // 二重初期化（テストなど）は無視する
    let _ = fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .try_init();
}
