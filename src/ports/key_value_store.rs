use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// キーバリューストアポート
///
/// 永続化の仕組み（ファイル、データベース等）を抽象化する。
/// 値はキーごとに1つのシリアライズ済みドキュメント。
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// キーに保存された値を読み込む
    ///
    /// 値が存在しない場合は`None`を返す。
    async fn load(&self, key: &str) -> Result<Option<String>>;

    /// キーに値を保存する（既存の値は置き換える）
    async fn save(&self, key: &str, value: String) -> Result<()>;
}
