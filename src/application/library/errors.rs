use crate::domain::{ImportError, IssueBookError, ReturnBookError};
use thiserror::Error;

use super::persistent_store::StorageError;

/// 図書館アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum LibraryApplicationError {
    /// 書籍が存在しない
    #[error("Book not found")]
    BookNotFound,

    /// 会員が存在しない
    #[error("Member not found")]
    MemberNotFound,

    /// 書籍は既に貸出中
    #[error("Book is already issued")]
    BookNotAvailable,

    /// 貸出が存在しない
    #[error("Loan not found")]
    LoanNotFound,

    /// 貸出は既に返却済み
    #[error("Loan is already closed")]
    LoanAlreadyReturned,

    /// 書籍IDが貸出記録と一致しない
    #[error("Book does not match the loan")]
    BookMismatch,

    /// インポートファイルが不正
    #[error("Invalid file: {0}")]
    InvalidImportFile(String),

    /// エクスポートのシリアライズ失敗
    #[error("Failed to serialize export")]
    Export(#[source] serde_json::Error),

    /// 永続化のエラー
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<IssueBookError> for LibraryApplicationError {
    fn from(err: IssueBookError) -> Self {
        match err {
            IssueBookError::BookNotFound => LibraryApplicationError::BookNotFound,
            IssueBookError::MemberNotFound => LibraryApplicationError::MemberNotFound,
            IssueBookError::BookNotAvailable => LibraryApplicationError::BookNotAvailable,
        }
    }
}

impl From<ReturnBookError> for LibraryApplicationError {
    fn from(err: ReturnBookError) -> Self {
        match err {
            ReturnBookError::LoanNotFound => LibraryApplicationError::LoanNotFound,
            ReturnBookError::AlreadyReturned => LibraryApplicationError::LoanAlreadyReturned,
            ReturnBookError::BookMismatch => LibraryApplicationError::BookMismatch,
        }
    }
}

impl From<ImportError> for LibraryApplicationError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::InvalidFile(msg) => LibraryApplicationError::InvalidImportFile(msg),
        }
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, LibraryApplicationError>;
