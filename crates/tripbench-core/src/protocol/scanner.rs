//! Line-oriented scanner for the task protocol.
//!
//! Grammar, anchored to a whole line (trailing whitespace ignored):
//!
//! ```text
//! task-line := "[TASK]" ws+ role ws* "|" ws* "{" ... "}"
//! role      := word-char+            ; alphanumeric or '_'
//! ```
//!
//! Each line is inspected once, left to right, so parsing is linear in the
//! input size. Lines that do not match are ignored; a matching line whose
//! object span is not a JSON object aborts the whole parse.

use tracing::debug;

use crate::domain::task::{Payload, TaskUnit};
use crate::protocol::error::{ProtocolError, ProtocolResult};

/// Literal marker every task line starts with.
pub const TASK_MARKER: &str = "[TASK]";

/// A syntactically matched task line, before JSON decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskLine<'a> {
    pub role: &'a str,
    /// The `{...}` span, still undecoded.
    pub json: &'a str,
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Match a single line against the task-line grammar.
pub fn scan_task_line(line: &str) -> Option<TaskLine<'_>> {
    let rest = line.trim_end().strip_prefix(TASK_MARKER)?;

    let after_marker = rest.trim_start();
    if after_marker.len() == rest.len() {
        // at least one whitespace character is required after the marker
        return None;
    }

    let role_end = after_marker
        .char_indices()
        .find(|(_, c)| !is_word_char(*c))
        .map(|(i, _)| i)
        .unwrap_or(after_marker.len());
    if role_end == 0 {
        return None;
    }
    let (role, rest) = after_marker.split_at(role_end);

    let json = rest.trim_start().strip_prefix('|')?.trim_start();
    if json.len() < 2 || !json.starts_with('{') || !json.ends_with('}') {
        return None;
    }

    Some(TaskLine { role, json })
}

/// Parse orchestrator output into task units, preserving source order.
///
/// Fails with [`ProtocolError::NoTasksRecognized`] when nothing matches, and
/// with [`ProtocolError::TaskDecode`] on the first matched line whose payload
/// is not a JSON object. There is no partial result.
pub fn parse_tasks(text: &str) -> ProtocolResult<Vec<TaskUnit>> {
    let mut tasks = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let Some(matched) = scan_task_line(line) else {
            continue;
        };

        let payload: Payload =
            serde_json::from_str(matched.json).map_err(|source| ProtocolError::TaskDecode {
                line: line_no,
                role: matched.role.to_string(),
                source,
            })?;

        debug!(line = line_no, role = matched.role, "task line recognized");
        tasks.push(TaskUnit::new(matched.role, payload, line_no));
    }

    if tasks.is_empty() {
        return Err(ProtocolError::NoTasksRecognized);
    }
    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_accepts_canonical_line() {
        let m = scan_task_line(r#"[TASK] FlightAgent | {"origin":"Paris","dest":"Tokyo"}"#).unwrap();
        assert_eq!(m.role, "FlightAgent");
        assert_eq!(m.json, r#"{"origin":"Paris","dest":"Tokyo"}"#);
    }

    #[test]
    fn test_scan_tolerates_spacing_and_trailing_whitespace() {
        let m = scan_task_line("[TASK]   Hotel_Agent2|{\"city\":\"Tokyo\"}   \r").unwrap();
        assert_eq!(m.role, "Hotel_Agent2");
        assert_eq!(m.json, r#"{"city":"Tokyo"}"#);
    }

    #[test]
    fn test_scan_rejects_malformed_shapes() {
        let rejected = [
            r#" [TASK] FlightAgent | {"a":1}"#,   // leading whitespace
            r#"[TASK]FlightAgent | {"a":1}"#,     // no space after marker
            r#"[TASK]  | {"a":1}"#,               // empty role
            r#"[TASK] Flight-Agent | {"a":1}"#,   // non-word char in role
            r#"[TASK] FlightAgent {"a":1}"#,      // missing separator
            r#"[TASK] FlightAgent | ["a"]"#,      // not an object span
            r#"[TASK] FlightAgent | {"a":1} ok"#, // trailing prose
            r#"```[TASK] FlightAgent | {"a":1}"#, // fenced
            "[TASK] FlightAgent | {",
        ];
        for line in rejected {
            assert!(scan_task_line(line).is_none(), "should reject: {line}");
        }
    }

    #[test]
    fn test_parse_preserves_order_and_skips_noise() {
        let text = "Sure! Here are the tasks:\n\
                    [TASK] FlightAgent | {\"origin\":\"Paris\",\"dest\":\"Tokyo\"}\n\
                    \n\
                    [TASK] HotelAgent | {\"city\":\"Tokyo\",\"nights\":2}\n\
                    some prose {\"not\":\"a task\"}\n\
                    [TASK] PlannerAgent | {\"city\":\"Tokyo\",\"days\":2}";
        let tasks = parse_tasks(text).unwrap();
        let roles: Vec<&str> = tasks.iter().map(|t| t.role()).collect();
        assert_eq!(roles, vec!["FlightAgent", "HotelAgent", "PlannerAgent"]);
        assert_eq!(tasks[0].line(), 2);
        assert_eq!(tasks[1].line(), 4);
        assert_eq!(tasks[2].line(), 6);
        assert_eq!(tasks[1].payload()["nights"], 2);
    }

    #[test]
    fn test_parse_without_matches_is_fatal_even_with_json() {
        let text = "{\"origin\":\"Paris\"}\nTASK FlightAgent | {\"a\":1}";
        assert!(matches!(
            parse_tasks(text),
            Err(ProtocolError::NoTasksRecognized)
        ));
        assert!(matches!(parse_tasks(""), Err(ProtocolError::NoTasksRecognized)));
    }

    #[test]
    fn test_parse_single_bad_payload_invalidates_batch() {
        let text = "[TASK] FlightAgent | {\"origin\":\"Paris\",\"dest\":\"Tokyo\"}\n\
                    [TASK] HotelAgent | {city: Tokyo}\n\
                    [TASK] PlannerAgent | {\"city\":\"Tokyo\",\"days\":2}";
        match parse_tasks(text) {
            Err(ProtocolError::TaskDecode { line, role, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(role, "HotelAgent");
            }
            other => panic!("expected TaskDecode, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_two_objects_on_one_line_is_decode_error() {
        let text = r#"[TASK] FlightAgent | {"a":1} {"b":2}"#;
        assert!(matches!(
            parse_tasks(text),
            Err(ProtocolError::TaskDecode { line: 1, .. })
        ));
    }

    #[test]
    fn test_parse_keeps_duplicate_roles() {
        let text = "[TASK] FlightAgent | {\"origin\":\"A\",\"dest\":\"B\"}\n\
                    [TASK] FlightAgent | {\"origin\":\"B\",\"dest\":\"C\"}";
        let tasks = parse_tasks(text).unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[1].payload()["origin"], "B");
    }

    #[test]
    fn test_braces_inside_payload_strings_are_kept() {
        let text = r#"[TASK] PlannerAgent | {"city":"Tokyo","note":"a {b} c"}"#;
        let tasks = parse_tasks(text).unwrap();
        assert_eq!(tasks[0].payload()["note"], "a {b} c");
    }
}
