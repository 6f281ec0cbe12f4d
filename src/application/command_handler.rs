//! シェルコマンドハンドラー
//!
//! # 責任
//! - 引数の検証（空の語・意味は使い方を返す）
//! - `VocabularyService` への委譲
//! - ユーザーに見せるメッセージの生成

use crate::application::{ConfirmPrompt, VocabularyService};
use crate::cli::ShellCmd;
use crate::domain::vocabulary::{Listing, VocabularyRepository};
use crate::error::Result;

pub const ADD_USAGE: &str = "Please enter a word and its meaning to add.\na '[word]' '[meaning]'";
pub const SEARCH_USAGE: &str = "Please enter a word to search for its meaning.\ns '[word]'";
pub const REMOVE_USAGE: &str = "Please enter a word to remove.\nr '[word]'";
pub const NO_WORDS: &str = "No words stored.";
pub const NOT_FOUND: &str = "Word not found.";

/// コマンド処理結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// そのまま表示するテキスト
    Text(String),
    /// 保存して終了
    Quit,
}

/// コマンドハンドラー。語彙サービスを単独で所有する
pub struct CommandHandler<R: VocabularyRepository> {
    vocabulary: VocabularyService<R>,
}

impl<R: VocabularyRepository> CommandHandler<R> {
    pub fn new(vocabulary: VocabularyService<R>) -> Self {
        Self { vocabulary }
    }

    /// コマンドを処理。上書き確認が必要なときだけ `prompt` を使う
    pub fn handle<P: ConfirmPrompt + ?Sized>(&mut self, cmd: ShellCmd, prompt: &mut P) -> Reply {
        match cmd {
            ShellCmd::List => Reply::Text(self.handle_list()),
            ShellCmd::Add {
                word,
                meaning,
                word_opt,
                meaning_opt,
            } => Reply::Text(self.handle_add(
                pick(word_opt, word),
                pick(meaning_opt, meaning),
                prompt,
            )),
            ShellCmd::Search { word, word_opt } => {
                Reply::Text(self.handle_search(pick(word_opt, word)))
            }
            ShellCmd::Remove { word, word_opt } => {
                Reply::Text(self.handle_remove(pick(word_opt, word)))
            }
            ShellCmd::Quit => Reply::Quit,
        }
    }

    /// 現在の語彙を保存
    pub fn save(&self) -> Result<()> {
        self.vocabulary.persist()
    }

    pub fn vocabulary(&self) -> &VocabularyService<R> {
        &self.vocabulary
    }

    fn handle_list(&self) -> String {
        match self.vocabulary.list() {
            Listing::Empty => NO_WORDS.to_string(),
            Listing::Entries(entries) => entries
                .into_iter()
                .map(|(word, meaning)| format!("{word}: {meaning}\n"))
                .collect(),
        }
    }

    fn handle_add<P: ConfirmPrompt + ?Sized>(
        &mut self,
        word: Option<String>,
        meaning: Option<String>,
        prompt: &mut P,
    ) -> String {
        let (Some(word), Some(meaning)) = (word, meaning) else {
            return ADD_USAGE.to_string();
        };
        self.vocabulary
            .add_or_update(&word, &meaning, prompt)
            .to_string()
    }

    fn handle_search(&self, word: Option<String>) -> String {
        let Some(word) = word else {
            return SEARCH_USAGE.to_string();
        };
        match self.vocabulary.search(&word) {
            Some(meaning) => format!("{word}: {meaning}"),
            None => NOT_FOUND.to_string(),
        }
    }

    fn handle_remove(&mut self, word: Option<String>) -> String {
        let Some(word) = word else {
            return REMOVE_USAGE.to_string();
        };
        if self.vocabulary.remove(&word) {
            format!("Word removed: {word}")
        } else {
            NOT_FOUND.to_string()
        }
    }
}

/// 名前付き引数を優先し、空文字列は未指定扱い
fn pick(named: Option<String>, positional: Option<String>) -> Option<String> {
    named.or(positional).filter(|s| !s.is_empty())
}
