use crate::ports::key_value_store::{KeyValueStore as KeyValueStoreTrait, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// KeyValueStoreのインメモリ実装
///
/// プロセス終了で内容は失われる。テストと一時的な起動用。
pub struct KeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

impl KeyValueStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// テスト用に値を直接書き込む
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.lock().insert(key.to_string(), value.to_string());
    }

    /// テスト用に保存されている生の値を取得する
    pub fn get_raw(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // ロック保持中にパニックしても中身は一貫しているので回復する
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for KeyValueStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStoreTrait for KeyValueStore {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    async fn save(&self, key: &str, value: String) -> Result<()> {
        self.lock().insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_missing_key_returns_none() {
        let store = KeyValueStore::new();
        assert_eq!(store.load("nothing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_replaces_value() {
        let store = KeyValueStore::new();
        store.save("k", "1".to_string()).await.unwrap();
        store.save("k", "2".to_string()).await.unwrap();

        assert_eq!(store.load("k").await.unwrap(), Some("2".to_string()));
        assert_eq!(store.get_raw("k"), Some("2".to_string()));
    }
}
