//! Read-Eval-Print Loop
//!
//! Generic over its input and output so the whole loop runs against
//! in-memory buffers in tests.

use std::io::{BufRead, Write};

use agent_core::{Agent, AgentError, Conversation};

pub const GOODBYE: &str = "🤖 Bot: Goodbye! Have a great day!";
pub const TOO_SLOW: &str =
    "❌ I took too long to answer. Try rephrasing your question or making it more specific.";
const PROMPT: &str = "\n👤 You: ";
const QUIT_WORDS: [&str; 4] = ["quit", "exit", "bye", "q"];

/// What one line of input asks for
#[derive(Debug, PartialEq, Eq)]
pub enum Input<'a> {
    Quit,
    Empty,
    Utterance(&'a str),
}

pub fn classify(line: &str) -> Input<'_> {
    let line = line.trim();
    if line.is_empty() {
        Input::Empty
    } else if QUIT_WORDS.iter().any(|w| line.eq_ignore_ascii_case(w)) {
        Input::Quit
    } else {
        Input::Utterance(line)
    }
}

/// Text shown when a turn fails
pub fn describe_failure(error: &AgentError) -> String {
    let text = error.to_string();
    let lower = text.to_lowercase();
    if lower.contains("iteration limit") || lower.contains("agent stopped") {
        TOO_SLOW.to_string()
    } else {
        format!("❌ Error: {text}\nPlease try rephrasing your question.")
    }
}

/// Chat until a quit word or end of input
pub async fn run<R: BufRead, W: Write>(
    agent: &Agent,
    conversation: &mut Conversation,
    mut input: R,
    output: &mut W,
) -> anyhow::Result<()> {
    let mut line = String::new();
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output, "\n\n{GOODBYE}")?;
            return Ok(());
        }

        match classify(&line) {
            Input::Empty => {}
            Input::Quit => {
                writeln!(output, "\n{GOODBYE}")?;
                return Ok(());
            }
            Input::Utterance(question) => match agent.chat(conversation, question).await {
                Ok(answer) => writeln!(output, "\n🤖 Bot: {answer}")?,
                Err(e) => {
                    tracing::error!("Turn failed: {}", e);
                    writeln!(output, "\n{}", describe_failure(&e))?;
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use agent_core::LlmProvider;
    use agent_runtime::ScriptedProvider;
    use knowledge_tools::{BotProfile, MockEncyclopedia, MockSearchBackend, SearchHit};

    fn agent(script: &[&str]) -> Agent {
        let provider: Arc<dyn LlmProvider> = Arc::new(ScriptedProvider::new(script.iter().copied()));
        let search = MockSearchBackend::new().with_results(
            "tesla",
            vec![SearchHit::new(
                "Tesla, Inc.",
                "Tesla was founded in 2003 by Martin Eberhard and Marc Tarpenning.",
                "https://en.wikipedia.org/wiki/Tesla,_Inc.",
            )],
        );
        BotProfile::Cli
            .agent(provider, Arc::new(search), Arc::new(MockEncyclopedia::default()), "llama-3.1-8b-instant")
            .unwrap()
    }

    async fn session(agent: &Agent, stdin: &str) -> (String, Conversation) {
        let mut conversation = Conversation::new();
        let mut out = Vec::new();
        run(agent, &mut conversation, stdin.as_bytes(), &mut out).await.unwrap();
        (String::from_utf8(out).unwrap(), conversation)
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("  QUIT \n"), Input::Quit);
        assert_eq!(classify("Bye"), Input::Quit);
        assert_eq!(classify("q"), Input::Quit);
        assert_eq!(classify("   \n"), Input::Empty);
        assert_eq!(classify(" Who founded Tesla? \n"), Input::Utterance("Who founded Tesla?"));
        assert_eq!(classify("quitting time"), Input::Utterance("quitting time"));
    }

    #[tokio::test]
    async fn test_answers_then_quits() {
        let agent = agent(&[
            "Thought: I should search\nAction: duckduckgo_search\nAction Input: Tesla founders",
            "Thought: I now know the final answer\nFinal Answer: Tesla was founded by Martin Eberhard and Marc Tarpenning.",
        ]);

        let (out, conversation) = session(&agent, "\nWho founded Tesla?\nexit\nnever read\n").await;
        assert!(out.contains("🤖 Bot: Tesla was founded by Martin Eberhard and Marc Tarpenning."));
        assert!(out.trim_end().ends_with(GOODBYE));
        assert_eq!(conversation.len(), 2);
    }

    #[tokio::test]
    async fn test_end_of_input_says_goodbye() {
        let (out, conversation) = session(&agent(&[]), "").await;
        assert!(out.contains(GOODBYE));
        assert!(conversation.is_empty());
    }

    #[tokio::test]
    async fn test_failed_turn_keeps_looping() {
        // nothing scripted: the provider fails the first turn
        let (out, conversation) = session(&agent(&[]), "Who founded Tesla?\nq\n").await;
        assert!(out.contains("❌ Error: Provider error: script exhausted"));
        assert!(out.contains("Please try rephrasing your question."));
        assert!(out.contains(GOODBYE));
        assert!(conversation.is_empty());
    }

    #[test]
    fn test_budget_failure_message() {
        let err = AgentError::BudgetExhausted {
            iterations: 3,
            elapsed_secs: 20,
        };
        assert_eq!(describe_failure(&err), TOO_SLOW);
        assert!(describe_failure(&AgentError::Other("boom".into())).starts_with("❌ Error: boom"));
    }
}
