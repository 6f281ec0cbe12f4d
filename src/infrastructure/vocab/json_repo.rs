//! JSON ファイル版 VocabularyRepository 実装
use crate::domain::vocabulary::{VocabularyRepository, WordMap};
use crate::error::{Result, VocabularyError};
use serde_json::{from_reader, to_writer_pretty};
use std::{
    collections::HashMap,
    fs,
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

pub struct JsonFileVocabRepo {
    path: PathBuf,
}

impl JsonFileVocabRepo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn write_err(&self, source: io::Error) -> VocabularyError {
        VocabularyError::StorageWrite {
            path: self.path.clone(),
            source,
        }
    }

    fn write_to(&self, tmp: &Path, all: &WordMap) -> io::Result<()> {
        let mut w = BufWriter::new(fs::File::create(tmp)?);
        to_writer_pretty(&mut w, all)?;
        w.write_all(b"\n")?;
        w.flush()
    }
}

impl VocabularyRepository for JsonFileVocabRepo {
    fn load(&self) -> Result<HashMap<String, String>> {
        let f = match fs::File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(
                    "Vocabulary file {} not found. Starting with empty vocabulary.",
                    self.path.display()
                );
                return Ok(HashMap::new());
            }
            Err(source) => {
                return Err(VocabularyError::StorageRead {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        debug!("Loading vocabulary from file: {}", self.path.display());
        from_reader::<_, HashMap<String, String>>(BufReader::new(f)).map_err(|source| {
            VocabularyError::StorageParse {
                path: self.path.clone(),
                source,
            }
        })
    }

    fn save(&self, all: &WordMap) -> Result<()> {
        debug!("Saving vocabulary to file: {}", self.path.display());
        // 書き込み途中で落ちても元ファイルを壊さないよう一時ファイル経由で置き換える
        let tmp = self.path.with_extension("json.tmp");
        if let Err(e) = self.write_to(&tmp, all) {
            let _ = fs::remove_file(&tmp);
            return Err(self.write_err(e));
        }
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(self.write_err(e));
        }
        debug!("Vocabulary saved successfully ({} entries).", all.len());
        Ok(())
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn words(pairs: &[(&str, &str)]) -> WordMap {
        pairs
            .iter()
            .map(|(w, m)| (w.to_string(), m.to_string()))
            .collect()
    }

    #[test]
    fn missing_file_loads_empty() {
        let tmp = TempDir::new().unwrap();
        let repo = JsonFileVocabRepo::new(tmp.path().join("vocabulary.json"));
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn saved_vocabulary_loads_back() {
        let tmp = TempDir::new().unwrap();
        let repo = JsonFileVocabRepo::new(tmp.path().join("vocabulary.json"));
        let all = words(&[("word", "meaning of a word"), ("apple", "a nice fruit")]);

        repo.save(&all).unwrap();
        let loaded: WordMap = repo.load().unwrap().into_iter().collect();
        assert_eq!(loaded, all);
        // 一時ファイルは残らない
        assert!(!tmp.path().join("vocabulary.json.tmp").exists());
    }

    #[test]
    fn file_is_pretty_printed_and_sorted() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("vocabulary.json");
        let repo = JsonFileVocabRepo::new(&path);
        repo.save(&words(&[("word", "meaning of a word"), ("apple", "a nice fruit")]))
            .unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "{\n  \"apple\": \"a nice fruit\",\n  \"word\": \"meaning of a word\"\n}\n"
        );
    }

    #[test]
    fn save_overwrites_previous_snapshot() {
        let tmp = TempDir::new().unwrap();
        let repo = JsonFileVocabRepo::new(tmp.path().join("vocabulary.json"));
        repo.save(&words(&[("apple", "a nice fruit"), ("letter", "part of alphabet")]))
            .unwrap();
        repo.save(&words(&[("apple", "red fruit")])).unwrap();

        let loaded = repo.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded["apple"], "red fruit");
    }

    #[test]
    fn empty_vocabulary_round_trips() {
        let tmp = TempDir::new().unwrap();
        let repo = JsonFileVocabRepo::new(tmp.path().join("vocabulary.json"));
        repo.save(&WordMap::new()).unwrap();
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("vocabulary.json");
        fs::write(&path, "{ not json").unwrap();

        let err = JsonFileVocabRepo::new(&path).load().unwrap_err();
        assert!(matches!(err, VocabularyError::StorageParse { .. }));
    }

    #[test]
    fn nested_values_are_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("vocabulary.json");
        fs::write(&path, r#"{"apple": {"meaning": "fruit"}}"#).unwrap();

        let err = JsonFileVocabRepo::new(&path).load().unwrap_err();
        assert!(matches!(err, VocabularyError::StorageParse { .. }));
    }

    #[test]
    fn directory_path_is_a_read_error() {
        let tmp = TempDir::new().unwrap();
        let err = JsonFileVocabRepo::new(tmp.path()).load().unwrap_err();
        // ディレクトリは開けても読めない（OS により open / read のどちらかで失敗）
        assert!(matches!(
            err,
            VocabularyError::StorageRead { .. } | VocabularyError::StorageParse { .. }
        ));
    }

    #[test]
    fn missing_parent_directory_is_a_write_error() {
        let tmp = TempDir::new().unwrap();
        let repo = JsonFileVocabRepo::new(tmp.path().join("missing/vocabulary.json"));
        let err = repo.save(&words(&[("apple", "a nice fruit")])).unwrap_err();
        assert!(matches!(err, VocabularyError::StorageWrite { .. }));
    }

    #[test]
    fn failed_rename_removes_temporary_file() {
        let tmp = TempDir::new().unwrap();
        // 保存先が中身のあるディレクトリだと rename が失敗する
        let target = tmp.path().join("vocab.json");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep.txt"), "x").unwrap();

        let repo = JsonFileVocabRepo::new(&target);
        let err = repo.save(&words(&[("apple", "a nice fruit")])).unwrap_err();
        assert!(matches!(err, VocabularyError::StorageWrite { .. }));
        assert!(!tmp.path().join("vocab.json.tmp").exists());
        assert!(target.join("keep.txt").exists());
    }
}
