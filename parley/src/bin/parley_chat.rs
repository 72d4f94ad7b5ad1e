//! Parley Chat CLI
//!
//! Interactive console front end for the agent. Reads one utterance at
//! a time, processes it to completion, prints the reply, repeats.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use colored::*;
use tracing_subscriber::EnvFilter;

use parley::{Agent, ConversationState, ParleyConfig};

#[derive(Parser, Debug)]
#[command(name = "parley-chat")]
struct Args {
    /// Path to a TOML config file; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => ParleyConfig::load(path)?,
        None => ParleyConfig::default(),
    };

    let agent = Agent::from_config(&config).await?;
    let mut state = ConversationState::new();

    println!("{}", "=========================================".blue());
    println!("{}", "            Parley Chat                  ".blue().bold());
    println!("{}", "=========================================".blue());
    println!(
        "{}",
        "Ask about anything; try 'weather in Paris', 'time in Tokyo',".dimmed()
    );
    println!(
        "{}",
        "'define entropy', then 'simplify' or 'explain' the answer.".dimmed()
    );
    println!("{}", "Type 'exit' or 'quit' to stop.".dimmed());
    println!("{}", "=========================================".blue());

    let stdin = io::stdin();
    loop {
        print!("{} ", "You:".yellow().bold());
        io::stdout().flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            println!("{} Goodbye!", "Assistant:".green().bold());
            break;
        }

        let reply = agent.handle_turn(input, &mut state).await;
        println!("{} {}", "Assistant:".green().bold(), reply);
    }

    Ok(())
}
