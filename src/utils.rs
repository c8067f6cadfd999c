// src/utils.rs
use crate::error::InputError;

/// Get file extension in lowercase
pub fn get_file_extension(filename: &str) -> Option<String> {
    std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Validate file extension against allowed types
pub fn validate_file_extension(filename: &str, allowed: &[&str]) -> Result<String, InputError> {
    let ext = get_file_extension(filename)
        .ok_or_else(|| InputError::UnsupportedFormat(filename.to_string()))?;

    if !allowed.contains(&ext.as_str()) {
        return Err(InputError::UnsupportedFormat(filename.to_string()));
    }

    Ok(ext)
}

/// Keep at most `max_chars` characters, appending "..." when something was cut
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// "work_experience" -> "Work Experience"
pub fn humanize_key(key: &str) -> String {
    key.split(|c: char| c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
