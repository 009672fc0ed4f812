//! HSIL - Entry Point
//!
//! One-shot subcommands for parsing, repairing and resolving, or an
//! interactive session that encodes statements into a chain.

use clap::{Parser, Subcommand};
use serde_json::Value;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use hsil::chain::Resolution;
use hsil::core::config::HsilConfig;
use hsil::core::error::Result;
use hsil::generator::{EncodingOrigin, IntentGenerator};
use hsil::intent::{Intent, IntentField, Vocabulary};
use hsil::session::Session;
use hsil::{parse_document, repair_with_report, resolve_with};

#[derive(Parser, Debug)]
#[command(name = "hsil")]
#[command(about = "Parse, repair and resolve HSIL intent documents")]
struct Args {
    /// Configuration file (TOML)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Recorded generator replies to replay, overriding the config file
    #[arg(long)]
    recorded: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse an HSIL document and print it as JSON
    Parse { text: String },
    /// Repair a JSON candidate into a valid intent
    Repair { json: String },
    /// Resolve a JSON array of intents read from a file
    Resolve { file: PathBuf },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => HsilConfig::load(path)?,
        None => HsilConfig::default(),
    };
    if let Some(recorded) = args.recorded {
        config.generator.recorded = Some(recorded);
    }

    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match args.command {
        Some(Command::Parse { text }) => {
            let document = parse_document(&text)?;
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
        Some(Command::Repair { json }) => {
            let candidate: Value = serde_json::from_str(&json)?;
            println!("{}", serde_json::to_string_pretty(&repair_with_report(&candidate))?);
        }
        Some(Command::Resolve { file }) => {
            let intents: Vec<Intent> = serde_json::from_str(&std::fs::read_to_string(file)?)?;
            let resolution = resolve_with(&intents, &config.resolver);
            println!("{}", serde_json::to_string_pretty(&resolution)?);
        }
        None => run_session(Session::from_config(&config))?,
    }

    Ok(())
}

fn run_session(mut session: Session) -> Result<()> {
    tracing::info!("HSIL session starting...");

    println!("\n=== HSIL ===");
    println!("Encode statements into intent atoms and resolve the chain");
    println!();
    print_help();
    if let IntentGenerator::Unavailable { reason } = session.generator() {
        println!("(generator unavailable: {} - statements encode to the fallback atom)", reason);
    }
    println!();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        match input {
            "quit" | "q" => break,
            "help" | "h" => print_help(),
            "chain" | "c" => print_chain(&session),
            "resolve" | "r" => print_resolution(&session.resolve()),
            "clear" => {
                session.clear();
                println!("Chain cleared.");
            }
            _ => {
                if let Some(document) = input.strip_prefix("hsil ") {
                    add_document(&mut session, document);
                } else if let Some(rest) = input.strip_prefix("set ") {
                    edit_item(&mut session, rest);
                } else {
                    encode(&mut session, input);
                }
            }
        }
    }

    println!("\nGoodbye! {} intent(s) in the final chain.", session.chain().len());
    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  <statement>              - Encode a statement and append it");
    println!("  hsil <document>          - Parse an HSIL document and append it");
    println!("  set <n> <field> <value>  - Edit one field of chain item n");
    println!("  chain / c                - Show the chain");
    println!("  resolve / r              - Resolve the chain");
    println!("  clear                    - Clear the chain");
    println!("  quit / q                 - Exit");
}

fn encode(session: &mut Session, statement: &str) {
    let (_, encoding) = session.encode(statement);
    println!("{}", encoding.intent.to_hsil_pretty());
    match &encoding.origin {
        EncodingOrigin::Generated => {}
        EncodingOrigin::Fallback { reason } => println!("  (fallback: {})", reason),
    }
    for note in &encoding.notes {
        println!("  (repaired: {:?})", note);
    }
}

fn add_document(session: &mut Session, document: &str) {
    match session.add_document(document) {
        Ok(ids) => println!("Added {} intent(s).", ids.len()),
        Err(e) => println!("Could not parse document: {}", e),
    }
}

fn edit_item(session: &mut Session, args: &str) {
    let mut parts = args.splitn(3, char::is_whitespace);
    let (Some(index), Some(field), Some(value)) = (parts.next(), parts.next(), parts.next()) else {
        println!("Usage: set <n> <field> <value>");
        return;
    };

    let Some(field) = IntentField::lookup(field) else {
        println!("Unknown field {:?}. Fields: type, intensity, scope, temporal", field);
        return;
    };

    let id = index
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| session.chain().at(i))
        .map(|item| item.id);
    let Some(id) = id else {
        println!("No chain item {} ({} in chain)", index, session.chain().len());
        return;
    };

    match session.edit(id, field, value.trim()) {
        Ok(intent) => println!("{}", intent),
        Err(e) => println!("Edit rejected: {}", e),
    }
}

fn print_chain(session: &Session) {
    if session.chain().is_empty() {
        println!("Chain is empty.");
        return;
    }
    for (i, item) in session.chain().iter().enumerate() {
        println!("{:>3}. {}", i + 1, item.intent);
        println!("     {:?}", item.text);
    }
}

fn print_resolution(resolution: &Resolution) {
    println!("Mode: {}", resolution.mode);
    if let Some(effective) = &resolution.effective {
        println!("Effective: {}", effective);
    }
    println!("{}", resolution.explanation);
    for ranked in &resolution.ranking {
        println!(
            "  #{} {} (priority {}, score {:.2})",
            ranked.position + 1,
            ranked.intent.intent_type,
            ranked.priority,
            ranked.score
        );
    }
}
