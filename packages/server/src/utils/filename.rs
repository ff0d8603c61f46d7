/// Upload extensions accepted by the gallery, lowercase.
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

/// Returns the text after the last `.`, if the filename has one.
pub fn extension(filename: &str) -> Option<&str> {
    filename.rsplit_once('.').map(|(_, ext)| ext)
}

/// Checks the filename's extension against [`ALLOWED_EXTENSIONS`], ignoring case.
pub fn has_allowed_extension(filename: &str) -> bool {
    extension(filename).is_some_and(|ext| {
        ALLOWED_EXTENSIONS
            .iter()
            .any(|allowed| ext.eq_ignore_ascii_case(allowed))
    })
}

/// Reduces a user-supplied filename to a safe flat name.
///
/// Non-ASCII characters are dropped, path separators become whitespace,
/// whitespace runs collapse to `_`, anything outside `[A-Za-z0-9_.-]` is
/// removed and leading/trailing `.`/`_` are trimmed. The result may be empty.
pub fn secure_filename(filename: &str) -> String {
    let ascii: String = filename
        .chars()
        .filter(char::is_ascii)
        .map(|c| if matches!(c, '/' | '\\') { ' ' } else { c })
        .collect();

    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");

    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    kept.trim_matches(|c| matches!(c, '.' | '_')).to_string()
}

/// Shortens `filename` to at most `max_len` bytes, keeping its extension.
pub fn truncate_filename(filename: &str, max_len: usize) -> String {
    if filename.len() <= max_len {
        return filename.to_string();
    }

    match filename.rsplit_once('.') {
        Some((stem, ext)) if ext.len() + 1 < max_len => {
            let stem = prefix_within(stem, max_len - ext.len() - 1)
                .trim_end_matches(|c| matches!(c, '.' | '_'));
            format!("{stem}.{ext}")
        }
        _ => prefix_within(filename, max_len).to_string(),
    }
}

/// Longest prefix of `s` that fits in `max_len` bytes on a char boundary.
fn prefix_within(s: &str, max_len: usize) -> &str {
    let end = s
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .take_while(|&end| end <= max_len)
        .last()
        .unwrap_or(0);
    &s[..end]
}

/// Build a safe `Content-Disposition` header value.
pub fn content_disposition_value(filename: &str) -> String {
    let ascii_safe: String = filename
        .chars()
        .filter(|c| c.is_ascii_graphic() && !matches!(c, '"' | ';' | '\\'))
        .collect();
    let ascii_name = if ascii_safe.is_empty() {
        "image".to_string()
    } else {
        ascii_safe
    };

    format!("inline; filename=\"{ascii_name}\"")
}
