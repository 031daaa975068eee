//! Filesystem-safe string helpers.

/// Characters rejected in a path segment by at least one supported filesystem.
const INVALID_PATH_CHARS: [char; 9] = ['*', '|', '\\', '/', ':', '"', '<', '>', '?'];

/// Strip characters that are not valid in a file or folder name.
///
/// Reserved characters and control characters are removed (not replaced),
/// leading whitespace is trimmed, and trailing whitespace and dots are
/// trimmed together so the result is stable under repeated application.
///
/// # Example
///
/// ```rust
/// use subrenamer_core::remove_invalid_path_characters;
///
/// assert_eq!(remove_invalid_path_characters("Foo: Bar?"), "Foo Bar");
/// ```
pub fn remove_invalid_path_characters(name: &str) -> String {
    let stripped: String = name
        .chars()
        .filter(|c| !INVALID_PATH_CHARS.contains(c) && !c.is_control())
        .collect();

    stripped
        .trim_start()
        .trim_end_matches(|c: char| c == '.' || c.is_whitespace())
        .to_string()
}

/// Left-pad `number` with zeros to the digit count of `total`.
///
/// A `total` of 0 has one digit, so the number is left as is.
pub fn pad_zeroes(number: u32, total: u32) -> String {
    let width = total.to_string().len();
    format!("{number:0width$}")
}
