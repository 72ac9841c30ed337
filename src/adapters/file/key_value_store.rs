use crate::ports::key_value_store::{KeyValueStore as KeyValueStoreTrait, Result};
use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};

/// KeyValueStoreのファイル実装
///
/// ディレクトリ内にキーごとに`<key>.json`ファイルを1つ置く。
/// 書き込みは一時ファイルに書いてからリネームするため、
/// 途中で失敗しても既存の値は壊れない。
pub struct KeyValueStore {
    dir: PathBuf,
}

impl KeyValueStore {
    /// ディレクトリを作成（存在しなければ）してストアを開く
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(Box::new(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid storage key: {:?}", key),
            )));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl KeyValueStoreTrait for KeyValueStore {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    async fn save(&self, key: &str, value: String) -> Result<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");

        tokio::fs::write(&tmp, value).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            // 一時ファイルを残さない
            if let Err(cleanup) = tokio::fs::remove_file(&tmp).await {
                tracing::warn!(error = %cleanup, "Failed to remove {}", tmp.display());
            }
            return Err(Box::new(e));
        }

        tracing::debug!("Saved {}", path.display());
        Ok(())
    }
}
