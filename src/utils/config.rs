//! グローバル環境変数設定
//!
//! アプリケーション全体で使用する環境変数を一元管理。
//! プロセス起動時に一度だけ初期化し、以降はどこからでもアクセス可能。

use once_cell::sync::OnceCell;
use std::sync::Arc;

/// グローバル環境変数設定
static ENV_CONFIG: OnceCell<Arc<EnvConfig>> = OnceCell::new();

/// 語彙ファイルのパスを指定する環境変数
pub const VOCAB_FILE_ENV: &str = "VOCABULARY_FILE";

/// 環境変数設定
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    /// XDG Data Home ディレクトリ
    pub xdg_data_home: Option<String>,
    /// 語彙ファイルのパス（`VOCABULARY_FILE`）
    pub vocab_file: Option<String>,
    /// 環境変数ファイルのパス
    pub env_path: Option<String>,
}

impl EnvConfig {
    fn from_env() -> Self {
        EnvConfig {
            xdg_data_home: non_empty_var("XDG_DATA_HOME"),
            vocab_file: non_empty_var(VOCAB_FILE_ENV),
            env_path: non_empty_var("VOCABULARY_ENV_PATH"),
        }
    }

    /// 環境変数から設定を初期化
    ///
    /// アプリケーション起動時（`.env` 読み込み後）に呼び出す。
    /// 既に初期化済みの場合は何もしない。
    pub fn init() {
        let _ = ENV_CONFIG.set(Arc::new(Self::from_env()));
    }

    /// 設定を取得
    ///
    /// `init()` 前に呼ばれた場合はその時点の環境変数で初期化する。
    pub fn get() -> Arc<EnvConfig> {
        ENV_CONFIG
            .get_or_init(|| Arc::new(Self::from_env()))
            .clone()
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
