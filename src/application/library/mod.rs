mod errors;
mod library_service;
mod persistent_store;

pub use errors::{LibraryApplicationError, Result};
pub use library_service::{
    BOOKS_KEY, LOANS_KEY, LibraryController, MEMBERS_KEY, add_book, add_member, export_data,
    import_data, issue_book, return_book,
};
pub use persistent_store::{PersistentStore, StorageError};
