//! 対話シェル
//!
//! プロンプト表示 → 1 行読み込み → 解釈 → `CommandHandler` へ委譲 → 結果表示、を繰り返す。
//! 上書き確認もコマンドと同じ入力から 1 行だけ読む。
//! 端末では `rustyline` で履歴・行編集を使い、パイプ入力はそのまま `BufRead` で読む。

use std::io::{self, BufRead, Write};

use crate::application::{CommandHandler, ConfirmPrompt, Reply};
use crate::cli::parse_line;
use crate::domain::vocabulary::{PendingUpdate, VocabularyRepository};
use rustyline::{DefaultEditor, error::ReadlineError};
use tracing::{debug, error, warn};

pub const PROMPT: &str = "vocabulary:> ";

/// シェル終了理由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellExit {
    /// `quit` による終了（保存済み）
    Quit,
    /// 入力終端。保存はしない
    EndOfInput,
}

/// シェルへの入力元
pub trait LineSource {
    /// `prompt` を出して 1 行読む。入力終端なら `None`
    fn next_line<W: Write>(&mut self, prompt: &str, output: &mut W) -> io::Result<Option<String>>;
}

/// パイプ・ファイル・テスト用の入力
pub struct Piped<I: BufRead>(pub I);

impl<I: BufRead> LineSource for Piped<I> {
    fn next_line<W: Write>(&mut self, prompt: &str, output: &mut W) -> io::Result<Option<String>> {
        write!(output, "{prompt}")?;
        output.flush()?;
        // 不正な UTF-8 で落ちないよう、バイト列で読んでから置換文字で変換する
        let mut buf = Vec::new();
        if self.0.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }
}

/// 端末入力。履歴とカーソル編集付き
pub struct Terminal {
    editor: DefaultEditor,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let editor = DefaultEditor::new().map_err(readline_to_io)?;
        Ok(Self { editor })
    }
}

impl LineSource for Terminal {
    fn next_line<W: Write>(&mut self, prompt: &str, output: &mut W) -> io::Result<Option<String>> {
        // 確認メッセージなど、直前の出力を先に出しておく
        output.flush()?;
        match self.editor.readline(prompt) {
            Ok(line) => {
                // 確認への応答は履歴に残さない
                if !prompt.is_empty() && !line.trim().is_empty() {
                    if let Err(e) = self.editor.add_history_entry(line.as_str()) {
                        warn!("Failed to record history: {e}");
                    }
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Eof) => Ok(None),
            // Ctrl-C は入力の取り消し
            Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
            Err(e) => Err(readline_to_io(e)),
        }
    }
}

fn readline_to_io(e: ReadlineError) -> io::Error {
    match e {
        ReadlineError::Io(e) => e,
        other => io::Error::other(other.to_string()),
    }
}

pub struct Shell<L: LineSource, O: Write> {
    input: L,
    output: O,
}

/// 入力・出力を借りて上書き確認を行う
struct LinePrompt<'a, L: LineSource, O: Write> {
    input: &'a mut L,
    output: &'a mut O,
}

impl<L: LineSource, O: Write> ConfirmPrompt for LinePrompt<'_, L, O> {
    fn ask(&mut self, pending: &PendingUpdate) -> io::Result<String> {
        writeln!(self.output, "{pending}")?;
        self.input.next_line("", &mut *self.output)?.ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for confirmation",
            )
        })
    }
}

impl<I: BufRead, O: Write> Shell<Piped<I>, O> {
    pub fn new(input: I, output: O) -> Self {
        Self::with_source(Piped(input), output)
    }
}

impl<L: LineSource, O: Write> Shell<L, O> {
    pub fn with_source(input: L, output: O) -> Self {
        Self { input, output }
    }

    /// 終了するまでコマンドを処理
    pub fn run<R: VocabularyRepository>(
        &mut self,
        handler: &mut CommandHandler<R>,
    ) -> io::Result<ShellExit> {
        loop {
            let Some(line) = self.input.next_line(PROMPT, &mut self.output)? else {
                debug!("End of input; leaving without saving.");
                writeln!(self.output)?;
                return Ok(ShellExit::EndOfInput);
            };

            let cmd = match parse_line(&line) {
                Ok(Some(cmd)) => cmd,
                Ok(None) => continue,
                Err(e) => {
                    // help / 不明なコマンドはテキストとして表示して継続
                    write!(self.output, "{e}")?;
                    continue;
                }
            };

            let mut prompt = LinePrompt {
                input: &mut self.input,
                output: &mut self.output,
            };
            match handler.handle(cmd, &mut prompt) {
                Reply::Text(text) => {
                    write!(self.output, "{text}")?;
                    if !text.ends_with('\n') {
                        writeln!(self.output)?;
                    }
                }
                Reply::Quit => {
                    if self.quit(handler)? {
                        return Ok(ShellExit::Quit);
                    }
                }
            }
        }
    }

    /// 保存して終了メッセージを出す。保存エラーが返った場合は継続する
    fn quit<R: VocabularyRepository>(&mut self, handler: &CommandHandler<R>) -> io::Result<bool> {
        writeln!(self.output, "Saving vocabulary...")?;
        if let Err(e) = handler.save() {
            error!("Quit aborted: {e}");
            writeln!(self.output, "Failed to save vocabulary: {e}")?;
            return Ok(false);
        }
        writeln!(self.output, "Exiting...")?;
        self.output.flush()?;
        Ok(true)
    }

    pub fn into_output(self) -> O {
        self.output
    }
}
