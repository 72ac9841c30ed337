use serde::{Deserialize, Serialize};

use super::{AddBook, BookAdded, BookId};

/// 書籍 - 蔵書カタログの1冊
///
/// `is_available`は貸出（false）と返却（true）でのみ変化する。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub book_name: String,
    pub author: String,
    pub price: f64,
    pub is_available: bool,
}

impl Book {
    /// 書籍の利用可否を切り替えたコピーを返す
    pub fn with_availability(&self, is_available: bool) -> Self {
        Self {
            is_available,
            ..self.clone()
        }
    }
}

/// 純粋関数：書籍を作成する
///
/// 入力の検証は行わない（空文字列や0以下の価格も受け付ける）。
pub fn new_book(cmd: AddBook) -> (Book, BookAdded) {
    let book = Book {
        id: BookId::new(),
        book_name: cmd.book_name,
        author: cmd.author,
        price: cmd.price,
        is_available: true,
    };

    let event = BookAdded { book: book.clone() };

    (book, event)
}
