//! 語彙エンティティとリポジトリ抽象 – ドメイン層

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::Result;

/// 語 → 意味。キー順（辞書順）で列挙される
pub type WordMap = BTreeMap<String, String>;

/// 語彙永続化 I/F
///
/// `load` は順序を保証しない。並べ替えは利用側（ストア）の責務。
pub trait VocabularyRepository: Send + Sync {
    fn load(&self) -> Result<HashMap<String, String>>;
    fn save(&self, all: &WordMap) -> Result<()>;
    /// 保存先ファイル
    fn path(&self) -> &Path;
}

/// 保存失敗時の扱い
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SaveErrorPolicy {
    /// ログに残して成功扱い
    #[default]
    Swallow,
    /// 呼び出し元へエラーを返す
    Propagate,
}

impl fmt::Display for SaveErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveErrorPolicy::Swallow => write!(f, "swallow"),
            SaveErrorPolicy::Propagate => write!(f, "propagate"),
        }
    }
}

impl FromStr for SaveErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "swallow" => Ok(SaveErrorPolicy::Swallow),
            "propagate" => Ok(SaveErrorPolicy::Propagate),
            other => Err(format!(
                "unknown save error policy '{other}' (expected 'swallow' or 'propagate')"
            )),
        }
    }
}

/// 既存語の上書き確認待ち
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpdate {
    pub word: String,
    /// 現在保存されている意味
    pub current: String,
    /// 置き換え候補
    pub proposed: String,
}

/// 上書き確認への応答
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmResponse {
    Yes,
    No,
    /// yes / no 以外の入力（正規化済み）
    Invalid(String),
}

impl ConfirmResponse {
    /// 前後の空白を除き、大文字小文字を区別せずに解釈します。
    pub fn parse(input: &str) -> Self {
        let normalized = input.trim().to_lowercase();
        match normalized.as_str() {
            "yes" | "y" => ConfirmResponse::Yes,
            "no" | "n" => ConfirmResponse::No,
            _ => ConfirmResponse::Invalid(normalized),
        }
    }
}

/// 追加 / 更新の最終結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added(String),
    Updated(String),
    Kept(String),
    InvalidResponse(String),
}

impl fmt::Display for AddOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddOutcome::Added(word) => write!(f, "Word added: {word}"),
            AddOutcome::Updated(word) => write!(f, "Word '{word}' has been updated."),
            AddOutcome::Kept(word) => write!(f, "Word '{word}' was not updated."),
            AddOutcome::InvalidResponse(_) => write!(
                f,
                "Invalid input. Please enter 'yes', 'y', 'Y', 'no', or 'n', 'N'."
            ),
        }
    }
}

/// `try_add` の結果。既存語なら確認待ちを返し、語彙は変更しない
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddAttempt {
    Added(AddOutcome),
    NeedsConfirmation(PendingUpdate),
}

/// 一覧結果。空の語彙は空の列と区別する
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing<'a> {
    Empty,
    Entries(Vec<(&'a str, &'a str)>),
}

impl fmt::Display for PendingUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "The word - {} - already exists with the meaning: {}",
            self.word, self.current
        )?;
        write!(f, "Do you want to replace it? (Y)es/(N)o")
    }
}
