//! Action Parsing
//!
//! Turns a raw completion into the next step of the reasoning loop. The model
//! is prompted to answer in a `Thought:` / `Action:` / `Action Input:` format
//! and to finish with a final-answer marker; everything here is a pure
//! function of the completion text.

use thiserror::Error;

/// Final-answer marker of the zero-shot format
pub const FINAL_ANSWER: &str = "Final Answer:";

/// Final-answer marker of the conversational format (must open a line)
pub const AI_PREFIX: &str = "AI:";

const ACTION: &str = "Action:";
const ACTION_INPUT: &str = "Action Input:";
const HALLUCINATED_OBSERVATION: &str = "\nObservation:";

pub const MISSING_ACTION: &str = "Invalid Format: Missing 'Action:' after 'Thought:'";
pub const MISSING_ACTION_INPUT: &str = "Invalid Format: Missing 'Action Input:' after 'Action:'";
pub const ANSWER_AND_ACTION: &str =
    "Parsing LLM output produced both a final answer and a parse-able action";
/// Note fed back when the model can only be told its reply was unusable
pub const INVALID_RESPONSE: &str = "Invalid or incomplete response";

/// What the model asked for in one cycle
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Call a tool with a query
    Invoke { tool: String, input: String },
    /// Stop and answer the user
    Final(String),
}

/// Completion text that matched neither an action nor a final answer
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{reason}: `{output}`")]
pub struct ParseError {
    /// Corrective note for the model
    pub reason: &'static str,
    /// The offending completion
    pub output: String,
    observation: &'static str,
}

impl ParseError {
    fn new(reason: &'static str, output: &str) -> Self {
        Self {
            reason,
            output: output.to_string(),
            observation: reason,
        }
    }

    /// Same failure, but the model is only told its reply was unusable
    fn opaque(reason: &'static str, output: &str) -> Self {
        Self {
            observation: INVALID_RESPONSE,
            ..Self::new(reason, output)
        }
    }

    /// Text fed back to the model as the observation for this cycle
    pub fn observation(&self) -> &str {
        self.observation
    }
}

/// Reasoning format the model is prompted with
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PromptStyle {
    /// Single question, finishes with `Final Answer:`
    #[default]
    ZeroShot,
    /// Chat with history, finishes with a line starting `AI:`
    Conversational,
}

impl PromptStyle {
    /// Marker that introduces the final answer
    pub fn final_prefix(self) -> &'static str {
        match self {
            PromptStyle::ZeroShot => FINAL_ANSWER,
            PromptStyle::Conversational => AI_PREFIX,
        }
    }

    /// Parse one completion into an [`Action`]
    pub fn parse(self, text: &str) -> Result<Action, ParseError> {
        match self {
            PromptStyle::ZeroShot => parse_zero_shot(text),
            PromptStyle::Conversational => parse_conversational(text),
        }
    }
}

struct ActionSpan<'a> {
    start: usize,
    tool: &'a str,
    input: &'a str,
}

impl ActionSpan<'_> {
    fn into_action(self) -> Action {
        Action::Invoke {
            tool: self.tool.to_string(),
            input: self.input.to_string(),
        }
    }
}

fn find_action(text: &str) -> Option<ActionSpan<'_>> {
    let start = text.find(ACTION)?;
    let after = &text[start + ACTION.len()..];
    let input_at = after.find(ACTION_INPUT)?;

    let tool = after[..input_at].trim();
    let rest = &after[input_at + ACTION_INPUT.len()..];
    // anything after a made-up observation is the model talking to itself
    let rest = rest.find(HALLUCINATED_OBSERVATION).map_or(rest, |i| &rest[..i]);

    Some(ActionSpan {
        start,
        tool,
        input: rest.trim().trim_matches('"'),
    })
}

fn missing_part(text: &str) -> ParseError {
    if text.contains(ACTION) {
        ParseError::new(MISSING_ACTION_INPUT, text)
    } else {
        ParseError::new(MISSING_ACTION, text)
    }
}

fn parse_zero_shot(text: &str) -> Result<Action, ParseError> {
    let answer_at = text.find(FINAL_ANSWER);

    match (find_action(text), answer_at) {
        (Some(action), Some(at)) => {
            if at < action.start {
                let body = at + FINAL_ANSWER.len();
                let end = text[body..].find("\n\n").map_or(text.len(), |i| body + i);
                Ok(Action::Final(text[body..end].trim().to_string()))
            } else {
                Err(ParseError::opaque(ANSWER_AND_ACTION, text))
            }
        }
        (Some(action), None) => Ok(action.into_action()),
        (None, Some(_)) => {
            let last = text.rfind(FINAL_ANSWER).unwrap_or_default();
            Ok(Action::Final(
                text[last + FINAL_ANSWER.len()..].trim().to_string(),
            ))
        }
        (None, None) => Err(missing_part(text)),
    }
}

fn parse_conversational(text: &str) -> Result<Action, ParseError> {
    if let Some(answer) = after_last_line_marker(text, AI_PREFIX) {
        return Ok(Action::Final(answer.trim().to_string()));
    }
    find_action(text)
        .map(ActionSpan::into_action)
        .ok_or_else(|| ParseError::opaque(missing_part(text).reason, text))
}

/// Text following the last line that opens with `marker`
fn after_last_line_marker<'a>(text: &'a str, marker: &str) -> Option<&'a str> {
    let mut found = None;
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        let indent = line.len() - line.trim_start().len();
        if line[indent..].starts_with(marker) {
            found = Some(offset + indent + marker.len());
        }
        offset += line.len();
    }
    found.map(|at| &text[at..])
}
