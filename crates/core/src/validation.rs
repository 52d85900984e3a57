//! Argument validation rules for books, notes and task lists.
//!
//! Lengths are counted in characters (Unicode scalar values), so a
//! 64-character Cyrillic title is accepted even though it is 128 bytes.
//! Control characters are rejected here; PostgreSQL refuses NUL in text
//! columns.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a book, note, task list or task title.
pub const MAX_TITLE_LENGTH: usize = 64;

/// Maximum length of a note body.
pub const MAX_NOTE_TEXT_LENGTH: usize = 4096;

/// Maximum number of tasks a single task list may be created with.
pub const MAX_TASKS_PER_LIST: usize = 100;

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Validate that `value` has between 1 and `max` characters.
pub fn validate_length(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    let len = value.chars().count();
    if len == 0 || len > max {
        return Err(CoreError::invalid_argument(
            field,
            &format!("must be 1-{max} characters long"),
        ));
    }
    Ok(())
}

/// Reject control characters. Multiline fields may still contain line
/// breaks and tabs.
pub fn validate_characters(field: &str, value: &str, multiline: bool) -> Result<(), CoreError> {
    let allowed = |c: char| multiline && matches!(c, '\n' | '\r' | '\t');
    if value.chars().any(|c| c.is_control() && !allowed(c)) {
        return Err(CoreError::invalid_argument(
            field,
            "must not contain control characters",
        ));
    }
    Ok(())
}

/// Validate a title field (books, notes, task lists, tasks).
pub fn validate_title(field: &str, title: &str) -> Result<(), CoreError> {
    validate_length(field, title, MAX_TITLE_LENGTH)?;
    validate_characters(field, title, false)
}

/// Validate the body of a note.
pub fn validate_note_text(text: &str) -> Result<(), CoreError> {
    validate_length("text", text, MAX_NOTE_TEXT_LENGTH)?;
    validate_characters("text", text, true)
}

/// Validate the task titles a new task list is created with.
///
/// At least one task is required; each title follows the title rules.
pub fn validate_task_titles(tasks: &[String]) -> Result<(), CoreError> {
    if tasks.is_empty() || tasks.len() > MAX_TASKS_PER_LIST {
        return Err(CoreError::invalid_argument(
            "tasks",
            &format!("must contain 1-{MAX_TASKS_PER_LIST} items"),
        ));
    }
    for task in tasks {
        validate_title("tasks", task)?;
    }
    Ok(())
}
