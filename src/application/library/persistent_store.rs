use crate::ports::KeyValueStore;
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use thiserror::Error;

/// 永続化のエラー
#[derive(Debug, Error)]
pub enum StorageError {
    /// バックエンド（ファイル、DB等）のエラー
    #[error("Storage backend error for key `{key}`")]
    Backend {
        key: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// 保存されている値がJSONとして読めない
    #[error("Corrupt value stored under key `{key}`")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// 値をシリアライズできない
    #[error("Failed to serialize value for key `{key}`")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// キーバリューストアに結び付いた値
///
/// 作成時に1回だけ読み込み、`set`のたびにシリアライズして書き戻す。
/// 保存済みの値が壊れている場合は作成時にエラーになる。
pub struct PersistentStore<T> {
    store: Arc<dyn KeyValueStore>,
    key: String,
    value: T,
}

impl<T> PersistentStore<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    /// キーの値を読み込む。値が無ければ`initial`を使う
    pub async fn load(
        store: Arc<dyn KeyValueStore>,
        key: impl Into<String>,
        initial: T,
    ) -> Result<Self, StorageError> {
        let key = key.into();

        let raw = store
            .load(&key)
            .await
            .map_err(|source| StorageError::Backend {
                key: key.clone(),
                source,
            })?;

        let value = match raw {
            Some(raw) => serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
                key: key.clone(),
                source,
            })?,
            None => initial,
        };

        Ok(Self { store, key, value })
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// 値を置き換えて書き戻す
    ///
    /// 書き込みに失敗した場合、メモリ上の値は変更しない。
    pub async fn set(&mut self, value: T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&value).map_err(|source| StorageError::Serialize {
            key: self.key.clone(),
            source,
        })?;

        self.store
            .save(&self.key, raw)
            .await
            .map_err(|source| StorageError::Backend {
                key: self.key.clone(),
                source,
            })?;

        self.value = value;
        Ok(())
    }
}
