//! knowledge-bot Command Line
//!
//! Interactive question answering in the terminal. Answers come from the
//! Groq-hosted model, which can search DuckDuckGo and Wikipedia.

mod repl;

use std::io;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use agent_core::{Conversation, DEFAULT_MODEL, LlmProvider};
use agent_runtime::GroqProvider;
use knowledge_tools::{BotProfile, DuckDuckGoClient, WikipediaClient};

const RULE: &str = "============================================================";

#[derive(Parser)]
#[command(name = "knowledge-bot")]
#[command(about = "Conversational knowledge bot: Groq LLM + DuckDuckGo + Wikipedia", long_about = None)]
#[command(version)]
struct Cli {
    /// Groq model id (defaults to GROQ_MODEL, then llama-3.1-8b-instant)
    #[arg(long)]
    model: Option<String>,

    /// Trace the reasoning loop and tool calls on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "warn,agent_core=debug,knowledge_tools=debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn print_config_help(error: &str) {
    println!("\n❌ Configuration Error: {error}");
    println!("\nPlease follow these steps:");
    println!("1. Sign up for free at https://console.groq.com/");
    println!("2. Get your API key");
    println!("3. Create a .env file and add: GROQ_API_KEY=your_key_here");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Load environment
    dotenvy::dotenv().ok();

    println!("{RULE}");
    println!("Conversational Knowledge Bot");
    println!("Powered by: Groq LLM + DuckDuckGo + Wikipedia");
    println!("{RULE}");
    println!("\nInitializing bot...\n");

    let provider: Arc<dyn LlmProvider> = match GroqProvider::from_env() {
        Ok(provider) => Arc::new(provider),
        Err(e) => {
            print_config_help(&e.to_string());
            return Ok(());
        }
    };

    let model = cli
        .model
        .or_else(|| std::env::var("GROQ_MODEL").ok())
        .unwrap_or_else(|| DEFAULT_MODEL.into());

    let agent = match BotProfile::Cli.agent(
        provider,
        Arc::new(DuckDuckGoClient::new()?),
        Arc::new(WikipediaClient::new()?),
        model,
    ) {
        Ok(agent) => agent,
        Err(e) => {
            print_config_help(&e.to_string());
            return Ok(());
        }
    };
    tracing::debug!(tools = ?agent.tools().names(), "Agent ready");

    println!("✅ Bot initialized successfully!");
    println!("\nType 'quit', 'exit', or 'bye' to end the conversation.\n");
    println!("{}", "-".repeat(RULE.len()));

    let mut conversation = Conversation::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    repl::run(&agent, &mut conversation, stdin.lock(), &mut stdout).await
}
