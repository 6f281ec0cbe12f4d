//! Application層の抽象化トレイト定義
//! 入力チャネルを抽象化し、テスト可能な構造を提供します

use crate::domain::vocabulary::PendingUpdate;
use std::io;

/// 上書き確認の問い合わせ
pub trait ConfirmPrompt {
    /// 確認内容を提示し、応答を 1 行だけ読む（ブロッキング）
    fn ask(&mut self, pending: &PendingUpdate) -> io::Result<String>;
}

/// 固定の応答を返す問い合わせ（非対話実行・テスト用）
#[derive(Debug, Clone)]
pub struct FixedResponse(pub String);

impl ConfirmPrompt for FixedResponse {
    fn ask(&mut self, _pending: &PendingUpdate) -> io::Result<String> {
        Ok(self.0.clone())
    }
}
