use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{Book, DataImported, ImportError, LibraryState, Loan, Member};

/// バックアップファイル名のプレフィックス
pub const BACKUP_FILE_PREFIX: &str = "library_backup_";

/// エクスポートされたバックアップファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub contents: String,
}

/// インポートドキュメント
///
/// トップレベルのキーごとにコレクションを置き換える。
/// キーが無い（または`null`の）コレクションはそのまま残す。
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ImportDocument {
    #[serde(default)]
    pub books: Option<Vec<Book>>,
    #[serde(default)]
    pub members: Option<Vec<Member>>,
    #[serde(default)]
    pub loans: Option<Vec<Loan>>,
}

/// バックアップのファイル名（UTC日付）
pub fn backup_file_name(now: DateTime<Utc>) -> String {
    format!("{}{}.json", BACKUP_FILE_PREFIX, now.format("%Y-%m-%d"))
}

/// 純粋関数：状態全体を整形済みJSONとしてエクスポートする
///
/// 形式: `{ "books": [...], "members": [...], "loans": [...] }`
pub fn export(state: &LibraryState, now: DateTime<Utc>) -> Result<ExportFile, serde_json::Error> {
    Ok(ExportFile {
        file_name: backup_file_name(now),
        contents: serde_json::to_string_pretty(state)?,
    })
}

/// インポートファイルをパースする
///
/// JSONオブジェクトでないもの、各コレクションの要素の形が不正なものは
/// `ImportError::InvalidFile`になる。
pub fn parse_import(bytes: &[u8]) -> Result<ImportDocument, ImportError> {
    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|e| ImportError::InvalidFile(e.to_string()))?;

    if !value.is_object() {
        return Err(ImportError::InvalidFile(
            "backup must be a JSON object".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|e| ImportError::InvalidFile(e.to_string()))
}

/// 純粋関数：インポートドキュメントを状態に適用する
///
/// 3つのコレクションの置き換えは1回の状態遷移として行う。
pub fn apply_import(state: &LibraryState, doc: ImportDocument) -> (LibraryState, DataImported) {
    let event = DataImported {
        books: doc.books.as_ref().map(Vec::len),
        members: doc.members.as_ref().map(Vec::len),
        loans: doc.loans.as_ref().map(Vec::len),
    };

    let next = LibraryState {
        books: doc.books.unwrap_or_else(|| state.books.clone()),
        members: doc.members.unwrap_or_else(|| state.members.clone()),
        loans: doc.loans.unwrap_or_else(|| state.loans.clone()),
    };

    (next, event)
}
