use serde::{Deserialize, Serialize};

use crate::domain::{AddBook, AddMember, BookId, LoanStatus, MemberId};

/// 書籍一覧取得のクエリパラメータ
#[derive(Debug, Default, Deserialize)]
pub struct ListBooksQuery {
    /// タイトル・著者の検索文字列
    pub q: Option<String>,
    /// `true`なら貸出可能な書籍のみ
    pub available: Option<bool>,
}

/// 会員一覧取得のクエリパラメータ
#[derive(Debug, Default, Deserialize)]
pub struct ListMembersQuery {
    /// 名前・入学番号の検索文字列
    pub q: Option<String>,
}

/// 貸出一覧取得のクエリパラメータ
#[derive(Debug, Default, Deserialize)]
pub struct ListLoansQuery {
    /// ステータスでフィルタリング（active, closed）
    pub status: Option<String>,
}

/// POST /books
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddBookRequest {
    pub book_name: String,
    pub author: String,
    pub price: f64,
}

impl AddBookRequest {
    pub fn to_command(&self) -> AddBook {
        AddBook {
            book_name: self.book_name.clone(),
            author: self.author.clone(),
            price: self.price,
        }
    }
}

/// POST /members
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberRequest {
    pub name: String,
    pub admission_number: String,
}

impl AddMemberRequest {
    pub fn to_command(&self) -> AddMember {
        AddMember {
            name: self.name.clone(),
            admission_number: self.admission_number.clone(),
        }
    }
}

/// POST /loans
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueBookRequest {
    pub book_id: BookId,
    pub member_id: MemberId,
}

/// POST /loans/:id/return
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnBookRequest {
    pub book_id: BookId,
}

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error_type.into(),
            message: message.into(),
        }
    }
}

/// ステータスクエリパラメータのパースとバリデーション
pub fn parse_status_filter(status: &str) -> Result<LoanStatus, String> {
    status.parse::<LoanStatus>()
}
