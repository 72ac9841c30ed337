/// 貸出（issue）のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueBookError {
    /// 書籍が存在しない
    BookNotFound,
    /// 会員が存在しない
    MemberNotFound,
    /// 書籍は既に貸出中
    BookNotAvailable,
}

/// 返却のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnBookError {
    /// 貸出が存在しない
    LoanNotFound,
    /// 既に返却済み
    AlreadyReturned,
    /// 指定された書籍IDが貸出記録の書籍IDと一致しない
    BookMismatch,
}

/// インポートのエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// JSONとして読めない、またはドキュメントの形が不正
    InvalidFile(String),
}
