//! Command-line front end
//!
//! `suggest` runs one input cycle, `repl` keeps a session open on stdin, and
//! `relay` serves the suggestion relay.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::Result;

use crate::ai::provider::{self, AiProvider, SuggestionSource};
use crate::config::{self, Config};
use crate::relay;
use crate::session::{Autocomplete, HistoryItem, SuggestionView};

#[derive(Parser, Debug)]
#[command(name = "sql-autocomplete")]
#[command(version, about = "Natural-language to SQL suggestions")]
pub struct Cli {
    /// Config file (default: ~/.config/sql-autocomplete/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print suggestions for one input
    Suggest { text: String },
    /// Interactive session; `:pick N`, `:history`, `:quit`
    Repl,
    /// Serve the suggestion relay
    Relay {
        /// Listen address (default: [relay] bind)
        #[arg(long)]
        bind: Option<String>,
    },
}

/// One parsed REPL line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Input(String),
    Pick(usize),
    History,
    Quit,
    Unknown(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let Some(rest) = trimmed.strip_prefix(':') else {
            return ReplCommand::Input(line.trim_end_matches(['\r', '\n']).to_string());
        };

        let mut words = rest.split_whitespace();
        match (words.next(), words.next()) {
            (Some("quit" | "q"), None) => ReplCommand::Quit,
            (Some("history"), None) => ReplCommand::History,
            (Some("pick"), Some(n)) => match n.parse::<usize>() {
                Ok(n) if n >= 1 => ReplCommand::Pick(n - 1),
                _ => ReplCommand::Unknown(trimmed.to_string()),
            },
            _ => ReplCommand::Unknown(trimmed.to_string()),
        }
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let config = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Suggest { text } => run_suggest(&config, text),
        Command::Repl => run_repl(&config),
        Command::Relay { bind } => run_relay(&config, bind),
    }
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

fn build_engine(config: &Config) -> Result<Autocomplete> {
    let schema = config::resolve_schema(config)?;
    let source: Arc<dyn SuggestionSource> = Arc::new(AiProvider::from_config(&config.ai)?);
    log::info!("Using {} suggestions", source.provider_name());
    Ok(Autocomplete::new(source, schema, config.session.mode))
}

fn run_suggest(config: &Config, text: String) -> Result<()> {
    runtime()?.block_on(async {
        let mut engine = build_engine(config)?;
        engine.on_input_change(text);
        let view = engine.settle().await;
        print!("{}", render_view(&view));
        Ok(())
    })
}

fn run_repl(config: &Config) -> Result<()> {
    runtime()?.block_on(async {
        let mut engine = build_engine(config)?;
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        for line in stdin.lock().lines() {
            match ReplCommand::parse(&line?) {
                ReplCommand::Quit => break,
                ReplCommand::History => print!("{}", render_history(engine.history())),
                ReplCommand::Pick(index) => {
                    if !engine.on_suggestion_select(index) {
                        println!("no suggestion {}", index + 1);
                    }
                }
                ReplCommand::Unknown(command) => println!("unknown command: {}", command),
                ReplCommand::Input(text) => {
                    engine.on_input_change(text);
                    let view = engine.settle().await;
                    print!("{}", render_view(&view));
                }
            }
            stdout.flush()?;
        }

        engine.shutdown();
        Ok(())
    })
}

fn run_relay(config: &Config, bind: Option<String>) -> Result<()> {
    let client = provider::chat_client(&config.ai.groq)?;
    let bind = bind.unwrap_or_else(|| config.relay.bind.clone());

    runtime()?.block_on(async move {
        relay::serve(&bind, Arc::new(client)).await?;
        Ok(())
    })
}

/// Numbered suggestion list, one entry per suggestion
pub fn render_view(view: &SuggestionView) -> String {
    if view.suggestions.is_empty() {
        return "no suggestions\n".to_string();
    }

    view.suggestions
        .iter()
        .enumerate()
        .map(|(i, option)| {
            format!(
                "{}. {} {}\n   {}\n",
                i + 1,
                option.kind().label(),
                option.display_description(),
                option.sql_query
            )
        })
        .collect()
}

pub fn render_history(history: &[HistoryItem]) -> String {
    if history.is_empty() {
        return "history is empty\n".to_string();
    }

    history
        .iter()
        .filter_map(|item| {
            item.selected()
                .map(|option| format!("{} => {}\n", item.user_text, option.sql_query))
        })
        .collect()
}
