use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// 文字列ベースのID型を定義する
///
/// 新規IDはUUID v4から生成する。バックアップから読み込んだIDは
/// 形式を問わずそのまま受け入れる（旧形式のタイムスタンプIDを含む）。
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn from_string(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// 書籍ID
    BookId
);

string_id!(
    /// 会員ID
    MemberId
);

string_id!(
    /// 貸出ID
    LoanId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_id_creation() {
        let id1 = BookId::new();
        let id2 = BookId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_member_id_creation() {
        let id1 = MemberId::new();
        let id2 = MemberId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_loan_id_is_uuid() {
        let id = LoanId::new();
        assert!(Uuid::parse_str(id.as_str()).is_ok());
    }

    #[test]
    fn test_legacy_timestamp_id_is_accepted() {
        let id: BookId = serde_json::from_str("\"1700000000000\"").unwrap();
        assert_eq!(id.as_str(), "1700000000000");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"1700000000000\"");
    }
}
