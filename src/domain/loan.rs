use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Book, BookId, BookIssued, BookReturned, LoanId, Member, MemberId, ReturnBookError};

/// 貸出ステータス
///
/// 状態遷移は Active → Closed の一方向のみ。Closedは終端状態。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    /// 貸出中（returnDateなし）
    Active,
    /// 返却済み（returnDateあり）
    Closed,
}

impl LoanStatus {
    /// 文字列表現を取得する
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Active => "active",
            LoanStatus::Closed => "closed",
        }
    }
}

impl std::str::FromStr for LoanStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "active" => Ok(LoanStatus::Active),
            "closed" => Ok(LoanStatus::Closed),
            _ => Err(format!("Invalid loan status: {}", s)),
        }
    }
}

/// 貸出記録 - 1冊の書籍の1回の貸出
///
/// `book_title`と`member_name`は貸出時点のスナップショット（非正規化）。
/// 書籍・会員側が後で変わっても更新されない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: LoanId,

    // 他のエンティティへの参照
    pub book_id: BookId,
    pub member_id: MemberId,

    // スナップショット
    pub book_title: String,
    pub member_name: String,

    pub loan_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_date: Option<DateTime<Utc>>,
}

impl Loan {
    pub fn status(&self) -> LoanStatus {
        match self.return_date {
            Some(_) => LoanStatus::Closed,
            None => LoanStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.return_date.is_none()
    }
}

/// 純粋関数：貸出記録を作成する
///
/// 書籍タイトルと会員名を貸出時点の値でコピーする。
/// 書籍が貸出可能かどうかの判定は呼び出し側の責務。
pub fn open_loan(book: &Book, member: &Member, issued_at: DateTime<Utc>) -> (Loan, BookIssued) {
    let loan = Loan {
        id: LoanId::new(),
        book_id: book.id.clone(),
        member_id: member.id.clone(),
        book_title: book.book_name.clone(),
        member_name: member.name.clone(),
        loan_date: issued_at,
        return_date: None,
    };

    let event = BookIssued { loan: loan.clone() };

    (loan, event)
}

/// 純粋関数：貸出を返却済みにする
///
/// ビジネスルール：
/// - 返却済みの貸出は再度返却できない
/// - 指定された書籍IDは貸出記録の書籍IDと一致しなければならない
pub fn close_loan(
    loan: &Loan,
    book_id: &BookId,
    returned_at: DateTime<Utc>,
) -> Result<(Loan, BookReturned), ReturnBookError> {
    if !loan.is_active() {
        return Err(ReturnBookError::AlreadyReturned);
    }

    if loan.book_id != *book_id {
        return Err(ReturnBookError::BookMismatch);
    }

    let closed = Loan {
        return_date: Some(returned_at),
        ..loan.clone()
    };

    let event = BookReturned {
        loan_id: loan.id.clone(),
        book_id: loan.book_id.clone(),
        returned_at,
    };

    Ok((closed, event))
}
