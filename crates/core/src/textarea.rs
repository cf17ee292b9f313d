//! Work with a list of strings written one per line in a textarea.
//!
//! Each line must end with a newline (LF or CRLF). A string after the last
//! newline is treated as a last entry, and exactly one trailing empty line is
//! ignored, so text ending in a single newline produces no spurious empty
//! entry while text ending in two newlines keeps one. Whitespace inside lines
//! is never trimmed.
//!
//! | textarea          | list of strings      |
//! |-------------------|----------------------|
//! | `a\nb\nc\n`       | `"a"`, `"b"`, `"c"`  |
//! | `a\nb\nc`         | `"a"`, `"b"`, `"c"`  |
//! | `a\nb\nc\n\n`     | `"a"`, `"b"`, `"c"`, `""` |
//! | `\n`              | `""`                 |
//! | (empty)           | (empty list)         |

/// Parse the contents of a textarea into a list of choice strings.
///
/// Splits on LF or CRLF, keeps interior empty lines, and drops exactly one
/// trailing empty line if present. The empty string yields an empty list.
#[must_use]
pub fn lines_from_text(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect();
    if lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines
}

/// Join a list of choice strings back into textarea contents.
///
/// Every entry is followed by an LF, including the last one. This is the
/// inverse of [`lines_from_text`] for any list of strings that contain no
/// newline characters themselves.
#[must_use]
pub fn text_from_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let mut text = String::new();
    for line in lines {
        text.push_str(line.as_ref());
        text.push('\n');
    }
    text
}
