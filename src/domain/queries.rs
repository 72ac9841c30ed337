use serde::{Deserialize, Serialize};

use super::{Book, Loan, LoanStatus, Member};

/// ダッシュボード用の集計
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryStats {
    pub total_books: usize,
    pub available_books: usize,
    pub total_members: usize,
    pub active_loans: usize,
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// 書籍をタイトル・著者で検索する（大文字小文字を区別しない部分一致）
///
/// 空のクエリは全件を返す。
pub fn search_books<'a>(books: &'a [Book], query: &str) -> Vec<&'a Book> {
    let needle = query.trim().to_lowercase();
    books
        .iter()
        .filter(|b| {
            needle.is_empty()
                || contains_ignore_case(&b.book_name, &needle)
                || contains_ignore_case(&b.author, &needle)
        })
        .collect()
}

/// 会員を名前・入学番号で検索する
pub fn search_members<'a>(members: &'a [Member], query: &str) -> Vec<&'a Member> {
    let needle = query.trim().to_lowercase();
    members
        .iter()
        .filter(|m| {
            needle.is_empty()
                || contains_ignore_case(&m.name, &needle)
                || contains_ignore_case(&m.admission_number, &needle)
        })
        .collect()
}

/// 貸出可能な書籍
pub fn available_books(books: &[Book]) -> Vec<&Book> {
    books.iter().filter(|b| b.is_available).collect()
}

/// ステータスで貸出を絞り込む
pub fn loans_with_status(loans: &[Loan], status: LoanStatus) -> Vec<&Loan> {
    loans.iter().filter(|l| l.status() == status).collect()
}

pub fn active_loans(loans: &[Loan]) -> Vec<&Loan> {
    loans_with_status(loans, LoanStatus::Active)
}

pub fn stats(books: &[Book], members: &[Member], loans: &[Loan]) -> LibraryStats {
    LibraryStats {
        total_books: books.len(),
        available_books: books.iter().filter(|b| b.is_available).count(),
        total_members: members.len(),
        active_loans: loans.iter().filter(|l| l.is_active()).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AddBook, AddMember, IssueBook, LibraryState, ReturnBook, library};
    use chrono::Utc;

    fn state() -> LibraryState {
        let (state, dune) = library::add_book(
            &LibraryState::default(),
            AddBook {
                book_name: "Dune".to_string(),
                author: "Frank Herbert".to_string(),
                price: 499.0,
            },
        );
        let (state, _) = library::add_book(
            &state,
            AddBook {
                book_name: "Persuasion".to_string(),
                author: "Jane Austen".to_string(),
                price: 300.0,
            },
        );
        let (state, alice) = library::add_member(
            &state,
            AddMember {
                name: "Alice".to_string(),
                admission_number: "A100".to_string(),
            },
        );
        let (state, _) = library::add_member(
            &state,
            AddMember {
                name: "Bob".to_string(),
                admission_number: "B200".to_string(),
            },
        );
        let (state, _) = library::issue_book(
            &state,
            IssueBook {
                book_id: dune.book.id,
                member_id: alice.member.id,
                issued_at: Utc::now(),
            },
        )
        .unwrap();
        state
    }

    #[test]
    fn test_search_books_by_author_ignores_case() {
        let state = state();
        let found = search_books(&state.books, "AUSTEN");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].book_name, "Persuasion");
    }

    #[test]
    fn test_search_books_empty_query_returns_all() {
        let state = state();
        assert_eq!(search_books(&state.books, "  ").len(), 2);
    }

    #[test]
    fn test_search_members_by_admission_number() {
        let state = state();
        let found = search_members(&state.members, "b2");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Bob");
    }

    #[test]
    fn test_available_books_excludes_issued() {
        let state = state();
        let available = available_books(&state.books);
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].book_name, "Persuasion");
    }

    #[test]
    fn test_stats() {
        let state = state();
        assert_eq!(
            stats(&state.books, &state.members, &state.loans),
            LibraryStats {
                total_books: 2,
                available_books: 1,
                total_members: 2,
                active_loans: 1,
            }
        );
        assert!(loans_with_status(&state.loans, LoanStatus::Closed).is_empty());
    }

    #[test]
    fn test_active_loans_excludes_returned() {
        let state = state();
        let (state, _) = library::return_book(
            &state,
            ReturnBook {
                loan_id: state.loans[0].id.clone(),
                book_id: state.loans[0].book_id.clone(),
                returned_at: Utc::now(),
            },
        )
        .unwrap();

        assert!(active_loans(&state.loans).is_empty());
        assert_eq!(loans_with_status(&state.loans, LoanStatus::Closed).len(), 1);
        assert_eq!(stats(&state.books, &state.members, &state.loans).available_books, 2);
    }
}
