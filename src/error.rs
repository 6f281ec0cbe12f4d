//! 統一エラーハンドリング
//!
//! vocabulary 全体で使用するエラー型を定義します。
//! ユーザーに見せる失敗はメッセージ文字列で返し、ここには I/O・設定系の失敗だけを置きます。

use std::{io, path::PathBuf};
use thiserror::Error;

/// vocabulary 全体で使用する統一エラー型
#[derive(Debug, Error)]
pub enum VocabularyError {
    // ========================================
    // 永続化関連エラー
    // ========================================
    #[error("Failed to read vocabulary file {}: {source}", .path.display())]
    StorageRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Vocabulary file {} is not a JSON object of strings: {source}", .path.display())]
    StorageParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write vocabulary file {}: {source}", .path.display())]
    StorageWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // ========================================
    // 設定関連エラー
    // ========================================
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// 統一Result型エイリアス
pub type Result<T> = std::result::Result<T, VocabularyError>;
