//! Pull the first JSON object out of free-form model text.

use crate::domain::task::Payload;

/// Return the first top-level JSON object embedded in `text`.
///
/// Scanning starts at the first `{` and tracks brace depth, ignoring braces
/// inside string literals (escape sequences included). The first balanced
/// span is decoded; if that span is not valid JSON, or no span closes, the
/// result is `None`. Later objects are not tried.
pub fn first_json_object(text: &str) -> Option<Payload> {
    let start = text.find('{')?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + ch.len_utf8();
                    return serde_json::from_str(&text[start..end]).ok();
                }
            }
            _ => {}
        }
    }
    None
}
