pub mod backup;
pub mod book;
pub mod commands;
pub mod errors;
pub mod events;
pub mod library;
pub mod loan;
pub mod member;
pub mod queries;
pub mod value_objects;

pub use backup::{ExportFile, ImportDocument};
pub use book::Book;
pub use commands::*;
pub use errors::*;
pub use events::*;
pub use library::LibraryState;
pub use loan::{Loan, LoanStatus};
pub use member::Member;
pub use queries::LibraryStats;
pub use value_objects::*;
