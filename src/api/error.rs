use crate::application::library::LibraryApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーをラップし、HTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub struct ApiError(LibraryApplicationError);

impl From<LibraryApplicationError> for ApiError {
    fn from(err: LibraryApplicationError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self.0 {
            // 404 Not Found - 参照先が存在しない
            LibraryApplicationError::BookNotFound => {
                (StatusCode::NOT_FOUND, "BOOK_NOT_FOUND", "Book not found")
            }
            LibraryApplicationError::MemberNotFound => {
                (StatusCode::NOT_FOUND, "MEMBER_NOT_FOUND", "Member not found")
            }
            LibraryApplicationError::LoanNotFound => {
                (StatusCode::NOT_FOUND, "LOAN_NOT_FOUND", "Loan not found")
            }

            // 409 Conflict - 現在の状態と矛盾する操作
            LibraryApplicationError::BookNotAvailable => (
                StatusCode::CONFLICT,
                "BOOK_NOT_AVAILABLE",
                "Book is already issued",
            ),
            LibraryApplicationError::LoanAlreadyReturned => (
                StatusCode::CONFLICT,
                "LOAN_ALREADY_RETURNED",
                "Loan is already closed",
            ),
            LibraryApplicationError::BookMismatch => (
                StatusCode::CONFLICT,
                "BOOK_MISMATCH",
                "Book does not match the loan",
            ),

            // 400 Bad Request - 詳細はログのみ
            LibraryApplicationError::InvalidImportFile(ref reason) => {
                tracing::warn!("Invalid import file: {}", reason);
                (StatusCode::BAD_REQUEST, "INVALID_FILE", "Invalid file")
            }

            // 500 Internal Server Error - システム障害
            // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            LibraryApplicationError::Export(ref e) => {
                tracing::error!("Export error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXPORT_ERROR",
                    "Failed to export data",
                )
            }
            LibraryApplicationError::Storage(ref e) => {
                tracing::error!("Storage error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "Failed to persist library state",
                )
            }
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}
