//! vocabulary CLI: 語彙（語 → 意味）を管理する対話シェル。
//! 引数なしでシェルを起動し、`config` サブコマンドで保存先などを設定します。
use clap::Parser;
use std::{
    error::Error,
    io::{self, IsTerminal},
    path::Path,
};
use tracing::{debug, info, warn};
use vocabulary::{
    application::{CommandHandler, VocabularyService},
    cli::{Cli, Cmd, ConfigCmd, ConfigField},
    domain::vocabulary::SaveErrorPolicy,
    infrastructure::{config::AppConfig, vocab::JsonFileVocabRepo},
    shell::{Shell, Terminal},
    utils::{config::EnvConfig, env::load_env, logging::init_logging},
};

fn main() -> Result<(), Box<dyn Error>> {
    // .env 読み込み (VOCABULARY_ENV_PATH > .env)
    load_env();
    EnvConfig::init();

    let cli = Cli::parse();
    init_logging();

    match cli.cmd.unwrap_or(Cmd::Shell) {
        Cmd::Shell => run_shell(cli.file.as_deref()),
        Cmd::Config { action } => run_config(action, cli.file.as_deref()),
    }
}

/// 設定ファイルが読めなくても `--file` があれば起動できるようにする
fn load_config() -> AppConfig {
    AppConfig::load().unwrap_or_else(|e| {
        warn!("Falling back to default configuration: {e}");
        AppConfig::default()
    })
}

fn run_shell(file: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let cfg = load_config();
    let path = cfg.resolve_vocab_path(file)?;

    let service = VocabularyService::with_policy(JsonFileVocabRepo::new(path), cfg.on_save_error);
    info!(
        "Using vocabulary file {} ({} words).",
        service.path().display(),
        service.len()
    );
    let mut handler = CommandHandler::new(service);

    // 端末なら行編集付き、パイプ入力はそのまま読む
    let exit = if io::stdin().is_terminal() {
        match Terminal::new() {
            Ok(term) => Shell::with_source(term, io::stdout()).run(&mut handler)?,
            Err(e) => {
                warn!("Line editing unavailable: {e}");
                Shell::new(io::stdin().lock(), io::stdout()).run(&mut handler)?
            }
        }
    } else {
        Shell::new(io::stdin().lock(), io::stdout()).run(&mut handler)?
    };
    debug!("Shell finished: {exit:?}");
    Ok(())
}

fn run_config(action: ConfigCmd, file: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let mut cfg = AppConfig::load()?;
    match action {
        ConfigCmd::Show => {
            let env = EnvConfig::get();
            println!("vocab path    : {}", cfg.resolve_vocab_path(file)?.display());
            println!("on save error : {}", cfg.on_save_error);
            if let Some(env_path) = &env.env_path {
                println!("env file      : {env_path}");
            }
        }
        ConfigCmd::Set { field } => match field {
            ConfigField::VocabPath { path } => {
                cfg.set_vocab_path(path.clone())?;
                println!("✅ vocab-path set to {}", path.display());
            }
            ConfigField::OnSaveError { policy } => {
                let policy: SaveErrorPolicy = policy.parse()?;
                cfg.set_on_save_error(policy)?;
                println!("✅ on-save-error set to {policy}");
            }
        },
    }
    Ok(())
}
