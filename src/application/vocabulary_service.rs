use crate::application::traits::ConfirmPrompt;
use crate::domain::vocabulary::{
    AddAttempt, AddOutcome, ConfirmResponse, Listing, PendingUpdate, SaveErrorPolicy,
    VocabularyRepository, WordMap,
};
use crate::error::Result;
use std::path::Path;
use tracing::{debug, error, warn};

/// 語彙管理サービス
///
/// プロセス存続中の語彙の唯一の所有者。変更は即座にメモリへ反映され、
/// ファイルへは `persist` を呼んだときだけ書き出す。
pub struct VocabularyService<R: VocabularyRepository> {
    words: WordMap,
    repo: R,
    on_save_error: SaveErrorPolicy,
}

impl<R: VocabularyRepository> VocabularyService<R> {
    pub fn new(repo: R) -> Self {
        Self::with_policy(repo, SaveErrorPolicy::default())
    }

    /// リポジトリから読み込んで初期化。読み込み失敗はログに残して空で開始する
    pub fn with_policy(repo: R, on_save_error: SaveErrorPolicy) -> Self {
        let words: WordMap = match repo.load() {
            Ok(initial) => initial.into_iter().collect(),
            Err(e) => {
                error!("Error loading vocabulary: {e}");
                WordMap::new()
            }
        };
        debug!("Loaded vocabulary with {} entries.", words.len());
        Self {
            words,
            repo,
            on_save_error,
        }
    }

    /// 語の昇順で全件
    pub fn list(&self) -> Listing<'_> {
        debug!("Listing all words.");
        if self.words.is_empty() {
            return Listing::Empty;
        }
        Listing::Entries(
            self.words
                .iter()
                .map(|(w, m)| (w.as_str(), m.as_str()))
                .collect(),
        )
    }

    /// 未登録なら追加。登録済みなら変更せず確認待ちを返す
    pub fn try_add(&mut self, word: &str, meaning: &str) -> AddAttempt {
        if let Some(current) = self.words.get(word) {
            return AddAttempt::NeedsConfirmation(PendingUpdate {
                word: word.to_string(),
                current: current.clone(),
                proposed: meaning.to_string(),
            });
        }
        self.words.insert(word.to_string(), meaning.to_string());
        debug!("Added new word: {word}");
        AddAttempt::Added(AddOutcome::Added(word.to_string()))
    }

    /// 確認待ちを応答で確定させる。yes/no 以外は何も変更しない（再入力なし）
    pub fn resolve(&mut self, pending: PendingUpdate, response: &str) -> AddOutcome {
        match ConfirmResponse::parse(response) {
            ConfirmResponse::Yes => {
                debug!("Replaced word: {}", pending.word);
                self.words.insert(pending.word.clone(), pending.proposed);
                AddOutcome::Updated(pending.word)
            }
            ConfirmResponse::No => {
                debug!("Kept old definition for word: {}", pending.word);
                AddOutcome::Kept(pending.word)
            }
            ConfirmResponse::Invalid(input) => {
                warn!("Invalid input: {input}");
                AddOutcome::InvalidResponse(input)
            }
        }
    }

    /// `try_add` + 必要なら 1 回だけ問い合わせて `resolve`
    pub fn add_or_update<P: ConfirmPrompt + ?Sized>(
        &mut self,
        word: &str,
        meaning: &str,
        prompt: &mut P,
    ) -> AddOutcome {
        match self.try_add(word, meaning) {
            AddAttempt::Added(outcome) => outcome,
            AddAttempt::NeedsConfirmation(pending) => {
                let response = prompt.ask(&pending).unwrap_or_else(|e| {
                    warn!("Failed to read confirmation: {e}");
                    String::new()
                });
                self.resolve(pending, &response)
            }
        }
    }

    /// 完全一致（大文字小文字を区別）
    pub fn search(&self, word: &str) -> Option<&str> {
        let meaning = self.words.get(word).map(String::as_str);
        if meaning.is_some() {
            debug!("Found word: {word}");
        } else {
            debug!("Word not found: {word}");
        }
        meaning
    }

    pub fn remove(&mut self, word: &str) -> bool {
        if self.words.remove(word).is_some() {
            debug!("Removed word: {word}");
            true
        } else {
            debug!("Attempted to remove non-existing word: {word}");
            false
        }
    }

    /// 現在の語彙を保存。`Swallow` ではログに残すだけで成功扱い
    pub fn persist(&self) -> Result<()> {
        match self.repo.save(&self.words) {
            Ok(()) => {
                debug!("Vocabulary saved to file.");
                Ok(())
            }
            Err(e) => {
                error!("Error saving vocabulary: {e}");
                match self.on_save_error {
                    SaveErrorPolicy::Swallow => Ok(()),
                    SaveErrorPolicy::Propagate => Err(e),
                }
            }
        }
    }

    /// 登録語数
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// 保存先（起動時のログに出す）
    pub fn path(&self) -> &Path {
        self.repo.path()
    }
}
