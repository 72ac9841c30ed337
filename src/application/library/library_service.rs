use crate::domain::{
    self, AddBook, AddMember, Book, BookReturned, DataImported, ExportFile, IssueBook,
    LibraryState, Loan, Member, ReturnBook,
};
use crate::ports::KeyValueStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use super::errors::{LibraryApplicationError, Result};
use super::persistent_store::PersistentStore;

/// 書籍コレクションの保存キー
pub const BOOKS_KEY: &str = "library_books";
/// 会員コレクションの保存キー
pub const MEMBERS_KEY: &str = "library_members";
/// 貸出コレクションの保存キー
pub const LOANS_KEY: &str = "library_loans";

/// 図書館の状態を保持するコントローラ
///
/// 3つのコレクションをそれぞれ独立したキーで永続化する。
/// 操作は下の関数群が行い、ドメイン層の純粋関数で次の状態を計算してから
/// 変化したコレクションだけを書き戻す。
///
/// 書き込みはキーごとに行うが、途中で失敗した場合は書けたコレクションを
/// 元に戻し、メモリとストアの両方を操作前の状態に保つ。
pub struct LibraryController {
    books: PersistentStore<Vec<Book>>,
    members: PersistentStore<Vec<Member>>,
    loans: PersistentStore<Vec<Loan>>,
}

impl LibraryController {
    /// ストアから3つのコレクションを読み込む
    ///
    /// 保存済みの値が壊れている場合はエラーを返す（起動時の致命的エラー）。
    pub async fn open(store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let (books, members, loans) = futures::try_join!(
            PersistentStore::load(store.clone(), BOOKS_KEY, Vec::new()),
            PersistentStore::load(store.clone(), MEMBERS_KEY, Vec::new()),
            PersistentStore::load(store, LOANS_KEY, Vec::new()),
        )?;

        tracing::info!(
            books = books.get().len(),
            members = members.get().len(),
            loans = loans.get().len(),
            "Library state loaded"
        );

        Ok(Self {
            books,
            members,
            loans,
        })
    }

    pub fn books(&self) -> &[Book] {
        self.books.get()
    }

    pub fn members(&self) -> &[Member] {
        self.members.get()
    }

    pub fn loans(&self) -> &[Loan] {
        self.loans.get()
    }

    /// 現在の状態のスナップショット
    pub fn state(&self) -> LibraryState {
        LibraryState {
            books: self.books.get().clone(),
            members: self.members.get().clone(),
            loans: self.loans.get().clone(),
        }
    }

    /// 次の状態を確定し、変化したコレクションを書き戻す
    async fn commit(&mut self, next: LibraryState) -> Result<()> {
        let LibraryState {
            books,
            members,
            loans,
        } = next;

        let previous = self.state();

        if let Err(err) = self.write_changed(books, members, loans).await {
            self.rollback(previous).await;
            return Err(err);
        }

        Ok(())
    }

    async fn write_changed(
        &mut self,
        books: Vec<Book>,
        members: Vec<Member>,
        loans: Vec<Loan>,
    ) -> Result<()> {
        if books != *self.books.get() {
            self.books.set(books).await?;
        }
        if members != *self.members.get() {
            self.members.set(members).await?;
        }
        if loans != *self.loans.get() {
            self.loans.set(loans).await?;
        }

        Ok(())
    }

    /// 途中で失敗した書き込みの前に書けたコレクションを元に戻す
    ///
    /// 失敗したキーはメモリ上も元の値のままなので、差分のあるものだけ書き直す。
    /// 戻しの書き込みも失敗した場合はログに残す（メモリとストアは新しい値で一致する）。
    async fn rollback(&mut self, previous: LibraryState) {
        let LibraryState {
            books,
            members,
            loans,
        } = previous;

        if books != *self.books.get() {
            if let Err(e) = self.books.set(books).await {
                tracing::error!(error = %e, "Failed to restore books after partial commit");
            }
        }
        if members != *self.members.get() {
            if let Err(e) = self.members.set(members).await {
                tracing::error!(error = %e, "Failed to restore members after partial commit");
            }
        }
        if loans != *self.loans.get() {
            if let Err(e) = self.loans.set(loans).await {
                tracing::error!(error = %e, "Failed to restore loans after partial commit");
            }
        }
    }
}

/// 書籍を登録する
///
/// 入力の検証は行わない。
pub async fn add_book(controller: &mut LibraryController, cmd: AddBook) -> Result<Book> {
    let (next, event) = domain::library::add_book(&controller.state(), cmd);

    controller.commit(next).await?;

    tracing::info!(book_id = %event.book.id, "Book added");
    Ok(event.book)
}

/// 会員を登録する
pub async fn add_member(controller: &mut LibraryController, cmd: AddMember) -> Result<Member> {
    let (next, event) = domain::library::add_member(&controller.state(), cmd);

    controller.commit(next).await?;

    tracing::info!(member_id = %event.member.id, "Member added");
    Ok(event.member)
}

/// 書籍を貸し出す
///
/// ビジネスルール：
/// - 書籍と会員が存在すること
/// - 書籍が貸出中でないこと
///
/// ルール違反の場合は状態を変更せずにエラーを返す。
pub async fn issue_book(controller: &mut LibraryController, cmd: IssueBook) -> Result<Loan> {
    let book_id = cmd.book_id.clone();
    let member_id = cmd.member_id.clone();

    let (next, event) = domain::library::issue_book(&controller.state(), cmd).map_err(|e| {
        tracing::warn!(%book_id, %member_id, error = ?e, "Issue rejected");
        LibraryApplicationError::from(e)
    })?;

    controller.commit(next).await?;

    tracing::info!(loan_id = %event.loan.id, %book_id, %member_id, "Book issued");
    Ok(event.loan)
}

/// 書籍を返却する
///
/// ビジネスルール：
/// - 貸出が存在し、返却済みでないこと
/// - 書籍IDが貸出記録と一致すること
pub async fn return_book(
    controller: &mut LibraryController,
    cmd: ReturnBook,
) -> Result<BookReturned> {
    let loan_id = cmd.loan_id.clone();

    let (next, event) = domain::library::return_book(&controller.state(), cmd).map_err(|e| {
        tracing::warn!(%loan_id, error = ?e, "Return rejected");
        LibraryApplicationError::from(e)
    })?;

    controller.commit(next).await?;

    tracing::info!(%loan_id, book_id = %event.book_id, "Book returned");
    Ok(event)
}

/// 状態全体をバックアップファイルとしてエクスポートする
pub fn export_data(controller: &LibraryController, now: DateTime<Utc>) -> Result<ExportFile> {
    let file =
        domain::backup::export(&controller.state(), now).map_err(LibraryApplicationError::Export)?;

    tracing::info!(file_name = %file.file_name, "Data exported");
    Ok(file)
}

/// バックアップファイルをインポートする
///
/// ファイルに含まれるコレクションだけを丸ごと置き換える。
/// 不正なファイルの場合は状態を変更しない。
pub async fn import_data(controller: &mut LibraryController, bytes: &[u8]) -> Result<DataImported> {
    let doc = domain::backup::parse_import(bytes).map_err(|e| {
        tracing::warn!(error = ?e, "Import rejected");
        LibraryApplicationError::from(e)
    })?;

    let (next, event) = domain::backup::apply_import(&controller.state(), doc);

    controller.commit(next).await?;

    tracing::info!(
        books = ?event.books,
        members = ?event.members,
        loans = ?event.loans,
        "Data imported"
    );
    Ok(event)
}
