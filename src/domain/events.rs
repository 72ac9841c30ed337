use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Book, BookId, Loan, LoanId, Member};

/// イベント：書籍が登録された
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookAdded {
    pub book: Book,
}

/// イベント：会員が登録された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberAdded {
    pub member: Member,
}

/// イベント：書籍が貸し出された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookIssued {
    pub loan: Loan,
}

/// イベント：書籍が返却された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookReturned {
    pub loan_id: LoanId,
    pub book_id: BookId,
    pub returned_at: DateTime<Utc>,
}

/// イベント：バックアップがインポートされた
///
/// 各フィールドは置き換えたコレクションの件数。
/// ドキュメントに含まれなかったコレクションは`None`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataImported {
    pub books: Option<usize>,
    pub members: Option<usize>,
    pub loans: Option<usize>,
}
