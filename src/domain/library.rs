use serde::{Deserialize, Serialize};

use super::{
    AddBook, AddMember, Book, BookAdded, BookIssued, BookReturned, IssueBook, IssueBookError, Loan,
    Member, MemberAdded, ReturnBook, ReturnBookError, book, loan, member,
};

/// 図書館の状態 - 書籍・会員・貸出の3つのコレクション
///
/// 操作はすべて「現在の状態 + コマンド → 次の状態 + イベント」の純粋関数。
/// 永続化やHTTPの関心事はここに持ち込まない。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LibraryState {
    pub books: Vec<Book>,
    pub members: Vec<Member>,
    pub loans: Vec<Loan>,
}

impl LibraryState {
    pub fn find_book(&self, book_id: &super::BookId) -> Option<&Book> {
        self.books.iter().find(|b| b.id == *book_id)
    }

    pub fn find_member(&self, member_id: &super::MemberId) -> Option<&Member> {
        self.members.iter().find(|m| m.id == *member_id)
    }

    pub fn find_loan(&self, loan_id: &super::LoanId) -> Option<&Loan> {
        self.loans.iter().find(|l| l.id == *loan_id)
    }
}

/// 純粋関数：書籍を追加する
pub fn add_book(state: &LibraryState, cmd: AddBook) -> (LibraryState, BookAdded) {
    let (book, event) = book::new_book(cmd);

    let mut books = state.books.clone();
    books.push(book);

    (
        LibraryState {
            books,
            ..state.clone()
        },
        event,
    )
}

/// 純粋関数：会員を追加する
pub fn add_member(state: &LibraryState, cmd: AddMember) -> (LibraryState, MemberAdded) {
    let (member, event) = member::new_member(cmd);

    let mut members = state.members.clone();
    members.push(member);

    (
        LibraryState {
            members,
            ..state.clone()
        },
        event,
    )
}

/// 純粋関数：書籍を貸し出す
///
/// ビジネスルール：
/// - 書籍と会員が存在すること
/// - 書籍が貸出中でないこと（1冊につき有効な貸出は1件まで）
///
/// エラー時は状態を変更しない。
pub fn issue_book(
    state: &LibraryState,
    cmd: IssueBook,
) -> Result<(LibraryState, BookIssued), IssueBookError> {
    let book = state
        .find_book(&cmd.book_id)
        .ok_or(IssueBookError::BookNotFound)?;
    let member = state
        .find_member(&cmd.member_id)
        .ok_or(IssueBookError::MemberNotFound)?;

    let already_on_loan = state
        .loans
        .iter()
        .any(|l| l.is_active() && l.book_id == book.id);
    if !book.is_available || already_on_loan {
        return Err(IssueBookError::BookNotAvailable);
    }

    let (new_loan, event) = loan::open_loan(book, member, cmd.issued_at);

    let books = state
        .books
        .iter()
        .map(|b| {
            if b.id == cmd.book_id {
                b.with_availability(false)
            } else {
                b.clone()
            }
        })
        .collect();

    let mut loans = state.loans.clone();
    loans.push(new_loan);

    Ok((
        LibraryState {
            books,
            members: state.members.clone(),
            loans,
        },
        event,
    ))
}

/// 純粋関数：書籍を返却する
///
/// ビジネスルール：
/// - 貸出が存在し、返却済みでないこと
/// - 書籍IDが貸出記録の書籍IDと一致すること
///
/// エラー時は状態を変更しない。
pub fn return_book(
    state: &LibraryState,
    cmd: ReturnBook,
) -> Result<(LibraryState, BookReturned), ReturnBookError> {
    let current = state
        .find_loan(&cmd.loan_id)
        .ok_or(ReturnBookError::LoanNotFound)?;

    let (closed, event) = loan::close_loan(current, &cmd.book_id, cmd.returned_at)?;

    let loans = state
        .loans
        .iter()
        .map(|l| {
            if l.id == closed.id {
                closed.clone()
            } else {
                l.clone()
            }
        })
        .collect();

    // 書籍がカタログから消えていても貸出記録は閉じる
    let books = state
        .books
        .iter()
        .map(|b| {
            if b.id == cmd.book_id {
                b.with_availability(true)
            } else {
                b.clone()
            }
        })
        .collect();

    Ok((
        LibraryState {
            books,
            members: state.members.clone(),
            loans,
        },
        event,
    ))
}
