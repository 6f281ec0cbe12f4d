//! `.env` の読み込み

/// `VOCABULARY_ENV_PATH` が指すファイル、なければカレントの `.env` を環境へ取り込む。
///
/// `EnvConfig::init` より前に呼ぶ。ファイルが無い・読めない場合は何もしない。
pub fn load_env() {
    // ロガー初期化前なので失敗は報告しない
    let _ = match std::env::var_os("VOCABULARY_ENV_PATH") {
        Some(path) => dotenvy::from_path(path),
        None => dotenvy::dotenv().map(|_| ()),
    };
}
