use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Vocabulary manager (interactive shell + config)")]
pub struct Cli {
    /// 語彙ファイルのパス（設定・環境変数より優先）
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

#[derive(Subcommand)]
pub enum Cmd {
    /// 対話シェルを起動（既定）
    Shell,
    /// 各種設定操作
    Config {
        #[command(subcommand)]
        action: ConfigCmd,
    },
}

#[derive(Subcommand)]
pub enum ConfigCmd {
    /// 現在の設定を表示
    Show,
    /// 設定を変更
    Set {
        #[command(subcommand)]
        field: ConfigField,
    },
}

#[derive(Subcommand)]
pub enum ConfigField {
    /// 語彙ファイルの保存先を指定（既存ファイルは移動）
    #[command(name = "vocab-path")]
    VocabPath { path: PathBuf },
    /// 保存失敗時の扱い（swallow / propagate）
    #[command(name = "on-save-error")]
    OnSaveError { policy: String },
}

// ────────────────────────────────────────────────────────
// 対話シェルのコマンド
// ────────────────────────────────────────────────────────

/// シェル 1 行分。バイナリ名なしでパースする
#[derive(Parser, Debug)]
#[command(
    name = "vocabulary",
    no_binary_name = true,
    disable_version_flag = true,
    subcommand_required = true
)]
pub struct ShellLine {
    #[command(subcommand)]
    pub cmd: ShellCmd,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ShellCmd {
    /// List all stored words with their meanings.
    #[command(visible_alias = "l")]
    List,
    /// Add a new word with its meaning.
    #[command(visible_alias = "a")]
    Add {
        /// The word to add
        word: Option<String>,
        /// The meaning of the word
        meaning: Option<String>,
        #[arg(long = "word", value_name = "WORD", hide = true)]
        word_opt: Option<String>,
        #[arg(long = "meaning", value_name = "MEANING", hide = true)]
        meaning_opt: Option<String>,
    },
    /// Search for a word and display its meaning.
    #[command(visible_alias = "s")]
    Search {
        /// The word to search for
        word: Option<String>,
        #[arg(long = "word", value_name = "WORD", hide = true)]
        word_opt: Option<String>,
    },
    /// Remove a word from the vocabulary.
    #[command(visible_alias = "r")]
    Remove {
        /// The word to remove
        word: Option<String>,
        #[arg(long = "word", value_name = "WORD", hide = true)]
        word_opt: Option<String>,
    },
    /// Save the vocabulary and quit the application.
    #[command(visible_alias = "q")]
    Quit,
}

/// 1 行を解釈する。空行は `Ok(None)`、`help` やパース失敗は clap のエラー
pub fn parse_line(line: &str) -> Result<Option<ShellCmd>, clap::Error> {
    let args = split_command_line(line);
    if args.is_empty() {
        return Ok(None);
    }
    ShellLine::try_parse_from(args).map(|l| Some(l.cmd))
}

/// 空白区切り。'…' / "…" でまとめ、`\` は次の 1 文字をそのまま取る
pub fn split_command_line(line: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    // '' のような空の引数も 1 つとして数える
    let mut has_token = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (_, '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                    has_token = true;
                }
            }
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => current.push(c),
            (None, '\'' | '"') => {
                quote = Some(c);
                has_token = true;
            }
            (None, c) if c.is_whitespace() => {
                if has_token {
                    out.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            (None, c) => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if has_token {
        out.push(current);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn split_plain_and_quoted() {
        assert_eq!(
            split_command_line("a 'apple' 'its a nice fruit'"),
            ["a", "apple", "its a nice fruit"]
        );
        assert_eq!(
            split_command_line(r#"  s   "two words"  "#),
            ["s", "two words"]
        );
        assert_eq!(split_command_line(r"s it\'s"), ["s", "it's"]);
        assert_eq!(split_command_line(r"a two\ words"), ["a", "two words"]);
    }

    #[test]
    fn split_keeps_other_quote_inside() {
        assert_eq!(
            split_command_line(r#"a "don't" 'say "hi"'"#),
            ["a", "don't", r#"say "hi""#]
        );
    }

    #[test]
    fn split_keeps_empty_quoted_argument() {
        assert_eq!(split_command_line("a '' meaning"), ["a", "", "meaning"]);
        assert!(split_command_line("   ").is_empty());
    }

    #[test]
    fn split_unterminated_quote_runs_to_end() {
        assert_eq!(split_command_line("s 'open end"), ["s", "open end"]);
    }

    #[test]
    fn parse_aliases() {
        assert_eq!(parse_line("l").unwrap(), Some(ShellCmd::List));
        assert_eq!(parse_line("list").unwrap(), Some(ShellCmd::List));
        assert_eq!(parse_line("q").unwrap(), Some(ShellCmd::Quit));
        assert_eq!(
            parse_line("s search").unwrap(),
            Some(ShellCmd::Search {
                word: Some("search".into()),
                word_opt: None
            })
        );
        assert_eq!(
            parse_line("r 'search'").unwrap(),
            Some(ShellCmd::Remove {
                word: Some("search".into()),
                word_opt: None
            })
        );
    }

    #[test]
    fn parse_add_positional_and_named() {
        assert_eq!(
            parse_line("a 'apple' 'its a nice fruit'").unwrap(),
            Some(ShellCmd::Add {
                word: Some("apple".into()),
                meaning: Some("its a nice fruit".into()),
                word_opt: None,
                meaning_opt: None,
            })
        );
        assert_eq!(
            parse_line("add --word 'word' --meaning 'meaning of a word'").unwrap(),
            Some(ShellCmd::Add {
                word: None,
                meaning: None,
                word_opt: Some("word".into()),
                meaning_opt: Some("meaning of a word".into()),
            })
        );
    }

    #[test]
    fn parse_search_and_remove_named() {
        assert_eq!(
            parse_line("s --word 'two words'").unwrap(),
            Some(ShellCmd::Search {
                word: None,
                word_opt: Some("two words".into())
            })
        );
        assert_eq!(
            parse_line("remove positional --word named").unwrap(),
            Some(ShellCmd::Remove {
                word: Some("positional".into()),
                word_opt: Some("named".into())
            })
        );
    }

    #[test]
    fn parse_add_without_args_is_accepted() {
        assert_eq!(
            parse_line("a").unwrap(),
            Some(ShellCmd::Add {
                word: None,
                meaning: None,
                word_opt: None,
                meaning_opt: None,
            })
        );
    }

    #[test]
    fn blank_line_is_nothing() {
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line(" \t ").unwrap(), None);
    }

    #[test]
    fn help_and_unknown_commands_are_clap_errors() {
        let help = parse_line("help").unwrap_err();
        assert_eq!(help.kind(), ErrorKind::DisplayHelp);
        let rendered = help.to_string();
        assert!(rendered.contains("list"));
        assert!(rendered.contains("quit"));

        let unknown = parse_line("fly away").unwrap_err();
        assert_ne!(unknown.kind(), ErrorKind::DisplayHelp);
        assert!(unknown.to_string().contains("fly"));
    }

    #[test]
    fn too_many_arguments_is_an_error() {
        assert!(parse_line("a apple a nice fruit").is_err());
    }

    #[test]
    fn process_cli_parses() {
        let cli = Cli::try_parse_from(["vocabulary", "--file", "/tmp/v.json", "shell"]).unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("/tmp/v.json")));
        assert!(matches!(cli.cmd, Some(Cmd::Shell)));

        let cli = Cli::try_parse_from(["vocabulary", "config", "set", "on-save-error", "propagate"])
            .unwrap();
        assert!(matches!(
            cli.cmd,
            Some(Cmd::Config {
                action: ConfigCmd::Set {
                    field: ConfigField::OnSaveError { .. }
                }
            })
        ));
    }
}
