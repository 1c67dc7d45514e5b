//! Answer Cleanup
//!
//! Models sometimes leak their reasoning trace into the final answer. This
//! strips it with a line-scanning heuristic and falls back to the raw text
//! whenever the cleaned result would be too short to be useful.

use crate::action::FINAL_ANSWER;

/// Line prefixes that belong to the reasoning trace
pub const REASONING_MARKERS: [&str; 5] = [
    "Question:",
    "Thought:",
    "Action:",
    "Action Input:",
    "Observation:",
];

/// Cleaned answers shorter than this are discarded in favour of the raw text
pub const MIN_ANSWER_CHARS: usize = 10;

fn is_trace_line(line: &str) -> bool {
    REASONING_MARKERS.iter().any(|m| line.starts_with(m))
}

/// Remove leaked reasoning markup from a raw answer
pub fn clean_answer(raw: &str) -> String {
    let mut answer = match raw.rfind(FINAL_ANSWER) {
        Some(at) => raw[at + FINAL_ANSWER.len()..].trim().to_string(),
        None => raw.to_string(),
    };

    let lines: Vec<&str> = answer.split('\n').collect();
    let mut content_start = 0;
    for (i, line) in lines.iter().enumerate() {
        let line = line.trim();
        if is_trace_line(line) {
            content_start = i + 1;
        } else if !line.is_empty() {
            break;
        }
    }

    if content_start > 0 && content_start < lines.len() {
        answer = lines[content_start..].join("\n").trim().to_string();
    }

    if answer.chars().count() < MIN_ANSWER_CHARS {
        return raw.to_string();
    }
    answer
}
