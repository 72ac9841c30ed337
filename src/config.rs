use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// 設定エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid storage backend: {0}")]
    InvalidStorageBackend(String),

    #[error("Invalid PORT: {0}")]
    InvalidPort(String),
}

/// 永続化バックエンドの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    File,
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "file" => Ok(StorageBackend::File),
            "postgres" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            _ => Err(ConfigError::InvalidStorageBackend(s.to_string())),
        }
    }
}

/// 起動設定
///
/// 環境変数:
/// - `LIBRARY_STORAGE`: `file`（既定）/ `postgres` / `memory`
/// - `LIBRARY_DATA_DIR`: ファイルバックエンドのディレクトリ（既定 `./data`）
/// - `DATABASE_URL`: PostgreSQLの接続文字列
/// - `PORT`: 待ち受けポート（既定 3000）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub storage: StorageBackend,
    pub data_dir: PathBuf,
    pub database_url: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 任意の変数参照関数から設定を組み立てる
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let storage = match lookup("LIBRARY_STORAGE") {
            Some(value) => value.parse()?,
            None => StorageBackend::File,
        };

        let data_dir = lookup("LIBRARY_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./data"));

        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| "postgres://localhost/library".into());

        let port = match lookup("PORT") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidPort(value))?,
            None => 3000,
        };

        Ok(Self {
            storage,
            data_dir,
            database_url,
            port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.storage, StorageBackend::File);
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("LIBRARY_STORAGE", "Postgres"),
            ("DATABASE_URL", "postgres://db/lib"),
            ("PORT", "8080"),
        ]))
        .unwrap();

        assert_eq!(config.storage, StorageBackend::Postgres);
        assert_eq!(config.database_url, "postgres://db/lib");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            Config::from_lookup(lookup(&[("LIBRARY_STORAGE", "redis")])),
            Err(ConfigError::InvalidStorageBackend("redis".to_string()))
        );
        assert_eq!(
            Config::from_lookup(lookup(&[("PORT", "http")])),
            Err(ConfigError::InvalidPort("http".to_string()))
        );
    }

    #[test]
    fn test_error_messages_name_the_bad_value() {
        let err = "redis".parse::<StorageBackend>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid storage backend: redis");
        assert_eq!(
            ConfigError::InvalidPort("70000".to_string()).to_string(),
            "Invalid PORT: 70000"
        );
    }
}
