//! Chalk CLI entry point

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use indicatif::ProgressBar;
use tracing_subscriber::EnvFilter;

use chalk::chat::Conversation;
use chalk::config::{self, Overrides};
use chalk::error::{Error, TransportKind};
use chalk::llm::GeminiClient;
use chalk::render::{self, ansi};
use chalk::ui;

#[derive(Parser)]
#[command(name = "chalk")]
#[command(about = "🍎 Chalk - persona teacher chatbot for the terminal")]
#[command(version)]
struct Cli {
    /// Gemini model to use
    #[arg(long)]
    model: Option<String>,

    /// Number of past turns to retain in the context window
    #[arg(long)]
    history: Option<usize>,

    /// Sampling temperature
    #[arg(long)]
    temperature: Option<f32>,

    /// Top-p nucleus sampling value
    #[arg(long)]
    top_p: Option<f32>,

    /// Top-k sampling value
    #[arg(long)]
    top_k: Option<u32>,

    /// Override the Gemini API key (otherwise read from env or settings)
    #[arg(long)]
    api_key: Option<String>,

    /// Path to an alternate persona description
    #[arg(long)]
    persona: Option<std::path::PathBuf>,

    /// Opening question the teacher should answer immediately
    #[arg(long)]
    intro: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Ctrl+C needs a second press within a few seconds to exit
    let armed = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
    let guard = armed.clone();

    ctrlc::set_handler(move || {
        if guard.load(std::sync::atomic::Ordering::SeqCst) {
            println!("\nClass dismissed! 👋");
            std::process::exit(0);
        } else {
            println!("\n⚠️  Press Ctrl+C again to exit");
            guard.store(true, std::sync::atomic::Ordering::SeqCst);

            let rearm = guard.clone();
            std::thread::spawn(move || {
                std::thread::sleep(std::time::Duration::from_secs(3));
                rearm.store(false, std::sync::atomic::Ordering::SeqCst);
            });
        }
    })
    .ok();

    let cli = Cli::parse();

    let mut config = config::load()?;
    config.apply_overrides(Overrides {
        model: cli.model,
        temperature: cli.temperature,
        top_p: cli.top_p,
        top_k: cli.top_k,
        history_limit: cli.history,
        api_key: cli.api_key,
        persona_file: cli.persona,
    });
    config.finalize()?;

    ui::print_header(&config.model);

    let client = GeminiClient::new(&config.api_key);
    let mut conversation = Conversation::new(config, client)?;

    if let Some(intro) = cli.intro {
        run_turn(&mut conversation, &intro).await;
    }

    println!("Type your question (or 'exit' to quit).\n");

    let stdin = io::stdin();
    loop {
        print!("{}: ", "You".blue().bold());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF
            break;
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if is_exit_command(input) {
            break;
        }

        run_turn(&mut conversation, input).await;
    }

    println!("Class dismissed! 👋");
    Ok(())
}

/// Input filter applied before any turn reaches the conversation.
fn is_exit_command(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "exit" | "quit")
}

async fn run_turn(conversation: &mut Conversation<GeminiClient>, input: &str) {
    let spinner = thinking_spinner();
    let result = conversation.submit_turn(input).await;
    spinner.finish_and_clear();

    match result {
        Ok(reply) => {
            println!("\n{}", "Teacher".green().bold());
            print!("{}", ansi::render(&render::format(&reply.text)));
            println!();
        }
        Err(err) => report_turn_error(&err),
    }
}

fn report_turn_error(err: &Error) {
    ui::print_error(&err.to_string());
    match err {
        Error::Transport {
            kind: TransportKind::RateLimit,
            ..
        } => {
            ui::print_warning("Rate limited - wait a moment and resend your message.");
        }
        Error::Transport {
            kind: TransportKind::Auth,
            ..
        } => {
            ui::print_warning("Check your Gemini API key (CHALK_GEMINI_API_KEY).");
        }
        _ => {}
    }
}

fn thinking_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Thinking...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(120));
    spinner
}
