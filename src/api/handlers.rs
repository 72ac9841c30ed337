use crate::application::library::{
    LibraryController, add_book as execute_add_book, add_member as execute_add_member,
    export_data as execute_export_data, import_data as execute_import_data,
    issue_book as execute_issue_book, return_book as execute_return_book,
};
use crate::domain::{
    Book, BookReturned, DataImported, IssueBook, LibraryStats, Loan, LoanId, Member, ReturnBook,
    queries,
};
use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::{
    error::ApiError,
    types::{
        AddBookRequest, AddMemberRequest, ErrorResponse, IssueBookRequest, ListBooksQuery,
        ListLoansQuery, ListMembersQuery, ReturnBookRequest, parse_status_filter,
    },
};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
///
/// すべての変更操作はこのロックで直列化される（書き手は常に1つ）。
pub struct AppState {
    pub library: Mutex<LibraryController>,
}

impl AppState {
    pub fn new(library: LibraryController) -> Self {
        Self {
            library: Mutex::new(library),
        }
    }
}

// ============================================================================
// Command handlers (POST)
// ============================================================================

/// POST /books - 書籍を登録
pub async fn create_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddBookRequest>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let mut library = state.library.lock().await;
    let book = execute_add_book(&mut library, req.to_command()).await?;

    Ok((StatusCode::CREATED, Json(book)))
}

/// POST /members - 会員を登録
pub async fn create_member(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddMemberRequest>,
) -> Result<(StatusCode, Json<Member>), ApiError> {
    let mut library = state.library.lock().await;
    let member = execute_add_member(&mut library, req.to_command()).await?;

    Ok((StatusCode::CREATED, Json(member)))
}

/// POST /loans - 書籍を貸し出す
///
/// 強制されるビジネスルール:
/// - 書籍と会員が存在すること
/// - 書籍が貸出中でないこと
pub async fn issue_loan(
    State(state): State<Arc<AppState>>,
    Json(req): Json<IssueBookRequest>,
) -> Result<(StatusCode, Json<Loan>), ApiError> {
    let cmd = IssueBook {
        book_id: req.book_id,
        member_id: req.member_id,
        issued_at: chrono::Utc::now(),
    };

    let mut library = state.library.lock().await;
    let loan = execute_issue_book(&mut library, cmd).await?;

    Ok((StatusCode::CREATED, Json(loan)))
}

/// POST /loans/:id/return - 書籍を返却
///
/// 強制されるビジネスルール:
/// - 貸出が存在し、返却済みでないこと
/// - 書籍IDが貸出記録と一致すること
pub async fn return_loan(
    State(state): State<Arc<AppState>>,
    Path(loan_id): Path<String>,
    Json(req): Json<ReturnBookRequest>,
) -> Result<Json<BookReturned>, ApiError> {
    let cmd = ReturnBook {
        loan_id: LoanId::from_string(loan_id),
        book_id: req.book_id,
        returned_at: chrono::Utc::now(),
    };

    let mut library = state.library.lock().await;
    let event = execute_return_book(&mut library, cmd).await?;

    Ok(Json(event))
}

/// POST /import - バックアップファイルを取り込む
///
/// 本文はバックアップのJSONそのもの。含まれるコレクションだけを置き換える。
pub async fn import_backup(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<DataImported>, ApiError> {
    let mut library = state.library.lock().await;
    let imported = execute_import_data(&mut library, &body).await?;

    Ok(Json(imported))
}

// ============================================================================
// Query handlers (GET)
// ============================================================================

/// GET /books - 書籍一覧（検索・貸出可能フィルタ付き）
pub async fn list_books(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListBooksQuery>,
) -> Json<Vec<Book>> {
    let library = state.library.lock().await;
    let only_available = query.available.unwrap_or(false);

    let books = queries::search_books(library.books(), query.q.as_deref().unwrap_or(""))
        .into_iter()
        .filter(|b| !only_available || b.is_available)
        .cloned()
        .collect();

    Json(books)
}

/// GET /members - 会員一覧（検索付き）
pub async fn list_members(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListMembersQuery>,
) -> Json<Vec<Member>> {
    let library = state.library.lock().await;

    let members = queries::search_members(library.members(), query.q.as_deref().unwrap_or(""))
        .into_iter()
        .cloned()
        .collect();

    Json(members)
}

/// GET /loans - 貸出一覧
///
/// クエリパラメータ:
/// - status: ステータスでフィルタリング（active, closed）（オプション）
pub async fn list_loans(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListLoansQuery>,
) -> Result<Json<Vec<Loan>>, QueryError> {
    let library = state.library.lock().await;

    let loans = match &query.status {
        Some(status_str) => {
            let status = parse_status_filter(status_str).map_err(QueryError::BadRequest)?;
            queries::loans_with_status(library.loans(), status)
                .into_iter()
                .cloned()
                .collect()
        }
        None => library.loans().to_vec(),
    };

    Ok(Json(loans))
}

/// GET /stats - ダッシュボードの集計
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<LibraryStats> {
    let library = state.library.lock().await;
    Json(queries::stats(
        library.books(),
        library.members(),
        library.loans(),
    ))
}

/// GET /export - バックアップファイルをダウンロード
pub async fn export_backup(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let library = state.library.lock().await;
    let file = execute_export_data(&library, chrono::Utc::now())?;

    let headers = [
        (header::CONTENT_TYPE, "application/json".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file.file_name),
        ),
    ];

    Ok((headers, file.contents).into_response())
}

// ============================================================================
// Error types
// ============================================================================

/// クエリハンドラー用のエラー型
#[derive(Debug)]
pub enum QueryError {
    BadRequest(String),
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            QueryError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}
