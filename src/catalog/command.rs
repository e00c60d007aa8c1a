pub mod add_book_cmd;
pub mod get_book_cmd;
pub mod get_stats_cmd;
pub mod list_books_cmd;
pub mod remove_book_cmd;

use crate::core::command::CommandError;

// trims surrounding whitespace and rejects an empty isbn
pub(crate) fn normalize_isbn(isbn: &str) -> Result<String, CommandError> {
    let isbn = isbn.trim();
    if isbn.is_empty() {
        return Err(CommandError::Validation {
            message: "ISBN cannot be empty".to_string(),
            reason_code: Some("empty_isbn".to_string()),
        });
    }
    Ok(isbn.to_string())
}
