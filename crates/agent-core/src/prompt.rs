//! Prompt Templates
//!
//! Renders the system and user messages for one reasoning cycle.

use crate::action::PromptStyle;
use crate::message::Conversation;
use crate::tool::ToolRegistry;

const ZERO_SHOT_PREFIX: &str = "Answer the following questions as best you can.";

const CONVERSATIONAL_PREFIX: &str = "Assistant is a helpful AI assistant that answers \
questions about people, companies, places, science and current events. Assistant keeps \
answers short and factual, and says so when it could not find something.";

/// Appended to the scratchpad when the budget runs out
pub const FINAL_ANSWER_NUDGE: &str =
    "\n\nI now need to return a final answer based on the previous steps:";

/// Build the system message: preamble, tools and format instructions
pub fn system_prompt(style: PromptStyle, prefix: Option<&str>, tools: &ToolRegistry) -> String {
    let names = tools.names().join(", ");
    let descriptions = tools.describe();

    match style {
        PromptStyle::ZeroShot => format!(
            "{prefix} You have access to the following tools:\n\n\
             {descriptions}\n\n\
             Use the following format:\n\n\
             Question: the input question you must answer\n\
             Thought: you should always think about what to do\n\
             Action: the action to take, should be one of [{names}]\n\
             Action Input: the input to the action\n\
             Observation: the result of the action\n\
             ... (this Thought/Action/Action Input/Observation can repeat N times)\n\
             Thought: I now know the final answer\n\
             Final Answer: the final answer to the original input question",
            prefix = prefix.unwrap_or(ZERO_SHOT_PREFIX),
        ),
        PromptStyle::Conversational => format!(
            "{prefix}\n\n\
             TOOLS:\n------\n\n\
             Assistant has access to the following tools:\n\n\
             {descriptions}\n\n\
             To use a tool, please use the following format:\n\n\
             ```\n\
             Thought: Do I need to use a tool? Yes\n\
             Action: the action to take, should be one of [{names}]\n\
             Action Input: the input to the action\n\
             Observation: the result of the action\n\
             ```\n\n\
             When you have a response to say to the Human, or if you do not need to use a tool, \
             you MUST use the format:\n\n\
             ```\n\
             Thought: Do I need to use a tool? No\n\
             AI: [your response here]\n\
             ```",
            prefix = prefix.unwrap_or(CONVERSATIONAL_PREFIX),
        ),
    }
}

/// Build the user message: history, the new input and the scratchpad so far
pub fn user_prompt(
    style: PromptStyle,
    history: &Conversation,
    input: &str,
    scratchpad: &str,
) -> String {
    let history = history.render_history();

    match style {
        PromptStyle::ZeroShot => {
            let mut prompt = String::new();
            if !history.is_empty() {
                prompt.push_str("Previous conversation history:\n");
                prompt.push_str(&history);
                prompt.push_str("\n\n");
            }
            prompt.push_str(&format!("Begin!\n\nQuestion: {input}\nThought:{scratchpad}"));
            prompt
        }
        PromptStyle::Conversational => format!(
            "Begin!\n\nPrevious conversation history:\n{history}\n\nNew input: {input}\n{scratchpad}"
        ),
    }
}

/// One completed tool call within a cycle
#[derive(Clone, Debug)]
pub struct Step {
    /// Model output that requested the call
    pub log: String,
    /// What came back
    pub observation: String,
}

/// Intermediate steps of the current utterance
#[derive(Clone, Debug, Default)]
pub struct Scratchpad {
    steps: Vec<Step>,
}

impl Scratchpad {
    pub fn push(&mut self, log: impl Into<String>, observation: impl Into<String>) {
        self.steps.push(Step {
            log: log.into(),
            observation: observation.into(),
        });
    }

    pub fn render(&self) -> String {
        self.steps
            .iter()
            .map(|s| format!("{}\nObservation: {}\nThought: ", s.log, s.observation))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scratchpad_render() {
        let mut pad = Scratchpad::default();
        assert_eq!(pad.render(), "");

        pad.push("Action: WebSearch\nAction Input: Tesla", "Result 1: Tesla");
        assert_eq!(
            pad.render(),
            "Action: WebSearch\nAction Input: Tesla\nObservation: Result 1: Tesla\nThought: "
        );
    }

    #[test]
    fn test_zero_shot_user_prompt_with_history() {
        let mut history = Conversation::new();
        history.record_exchange("Who is the CEO of OpenAI?", "Sam Altman.");

        let prompt = user_prompt(PromptStyle::ZeroShot, &history, "Where did he study?", "");
        assert!(prompt.starts_with("Previous conversation history:\nHuman: Who is the CEO"));
        assert!(prompt.ends_with("Question: Where did he study?\nThought:"));

        let fresh = user_prompt(PromptStyle::ZeroShot, &Conversation::new(), "Hi", "");
        assert_eq!(fresh, "Begin!\n\nQuestion: Hi\nThought:");
    }

    #[test]
    fn test_system_prompt_lists_tools() {
        let prompt = system_prompt(PromptStyle::Conversational, Some("Be brief."), &ToolRegistry::new());
        assert!(prompt.starts_with("Be brief."));
        assert!(prompt.contains("AI: [your response here]"));
    }
}
