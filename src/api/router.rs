use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, create_book, create_member, export_backup, get_stats, import_backup, issue_loan,
    list_books, list_loans, list_members, return_loan,
};

/// Creates the API router with all library endpoints
///
/// Catalog and roster:
/// - GET/POST /books
/// - GET/POST /members
///
/// Loans:
/// - GET /loans - List loans, optionally filtered by status
/// - POST /loans - Issue a book
/// - POST /loans/:id/return - Return a book
///
/// Backup:
/// - GET /export - Download the full state as JSON
/// - POST /import - Replace collections from a backup file
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        .route("/books", get(list_books).post(create_book))
        .route("/members", get(list_members).post(create_member))
        .route("/loans", get(list_loans).post(issue_loan))
        .route("/loans/:id/return", post(return_loan))
        .route("/stats", get(get_stats))
        .route("/export", get(export_backup))
        .route("/import", post(import_backup))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
