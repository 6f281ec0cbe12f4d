use crate::domain::vocabulary::SaveErrorPolicy;
use crate::error::{Result, VocabularyError};
use crate::utils::config::EnvConfig;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

const APP_NAME: &str = "vocabulary";

#[derive(Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub vocab_path: Option<String>,
    #[serde(default)]
    pub on_save_error: SaveErrorPolicy,
}

/// `$XDG_DATA_HOME/vocabulary` またはプラットフォーム既定のデータディレクトリ
pub fn data_dir() -> Result<PathBuf> {
    let config = EnvConfig::get();
    let dir = if let Some(xdg_data_home) = &config.xdg_data_home {
        PathBuf::from(xdg_data_home).join(APP_NAME)
    } else {
        let proj = ProjectDirs::from("com", "user", APP_NAME).ok_or_else(|| {
            VocabularyError::Config("cannot resolve platform data directory".to_string())
        })?;
        proj.data_local_dir().to_path_buf()
    };
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

fn config_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("config.json"))
}

pub fn default_vocab_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("vocabulary.json"))
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Ok(Self::load_from(&config_path()?))
    }

    /// 読めない / 壊れた設定ファイルは既定値として扱う
    pub fn load_from(path: &Path) -> Self {
        let Ok(f) = fs::File::open(path) else {
            return AppConfig::default();
        };
        match serde_json::from_reader(f) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Ignoring invalid config {}: {}", path.display(), e);
                AppConfig::default()
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        Ok(self.save_to(&config_path()?)?)
    }

    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = path.with_extension("json.tmp");
        {
            let f = fs::File::create(&tmp)?;
            serde_json::to_writer_pretty(&f, self)?;
        }
        fs::rename(tmp, path)?;
        Ok(())
    }

    /// 設定ファイル上の語彙パス（未設定ならデータディレクトリ既定）
    pub fn vocab_path(&self) -> Result<PathBuf> {
        if let Some(p) = &self.vocab_path {
            Ok(PathBuf::from(p))
        } else {
            default_vocab_path()
        }
    }

    /// 実際に使う語彙パス。`--file` > `VOCABULARY_FILE` > 設定ファイル > 既定
    pub fn resolve_vocab_path(&self, cli_override: Option<&Path>) -> Result<PathBuf> {
        if let Some(p) = cli_override {
            return Ok(p.to_path_buf());
        }
        if let Some(p) = &EnvConfig::get().vocab_file {
            return Ok(PathBuf::from(p));
        }
        self.vocab_path()
    }

    pub fn set_vocab_path(&mut self, new_path: PathBuf) -> Result<()> {
        let old = self.vocab_path()?;
        if old != new_path {
            relocate_vocab_file(&old, &new_path)?;
            self.vocab_path = Some(new_path.to_string_lossy().to_string());
            self.save()?;
        }
        Ok(())
    }

    pub fn set_on_save_error(&mut self, policy: SaveErrorPolicy) -> Result<()> {
        if self.on_save_error != policy {
            self.on_save_error = policy;
            self.save()?;
        }
        Ok(())
    }
}

/// 語彙ファイルを新しい場所へ移す。
///
/// 旧ファイルは `*.bak` に退避してからコピーする。移動先に既にファイルがある場合は
/// そちらを優先し、何も移さない。
pub fn relocate_vocab_file(old: &Path, new_path: &Path) -> io::Result<()> {
    if let Some(parent) = new_path.parent() {
        fs::create_dir_all(parent)?;
    }
    if old.exists() && !new_path.exists() {
        let bak = old.with_extension("bak");
        if bak.exists() {
            fs::remove_file(&bak)?;
        }
        fs::rename(old, &bak)?;
        fs::copy(&bak, new_path)?;
        debug!(
            "Moved vocabulary {} -> {} (backup: {})",
            old.display(),
            new_path.display(),
            bak.display()
        );
    }
    Ok(())
}
