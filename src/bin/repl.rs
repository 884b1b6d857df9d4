use clap::Parser;
use dnd_dice::{compute_statistics, format_long, format_short, RollContext};
use std::io::{self, BufRead, Write};

/// Reads dice notations from stdin, one per line, and rolls them.
#[derive(Parser)]
#[command(name = "dice-repl", version)]
struct Cli {
    /// Print the one-line summary instead of every die face
    #[arg(short, long)]
    short: bool,

    /// Label attached to every roll
    #[arg(short, long)]
    label: Option<String>,

    /// Print each roll as JSON
    #[arg(long, conflicts_with = "short")]
    json: bool,

    /// Print statistics for the session when input ends
    #[arg(long)]
    stats: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let mut ctx = RollContext::default();
    let mut history = Vec::new();

    let stdin = io::stdin();
    print!("> ");
    io::stdout().flush()?;
    for line in stdin.lock().lines() {
        let line = line?;
        if !line.trim().is_empty() {
            match ctx.roll(&line, cli.label.as_deref()) {
                Ok(r) => {
                    if cli.json {
                        println!("{}", serde_json::to_string(&r)?);
                    } else if cli.short {
                        println!("{}", format_short(&r));
                    } else {
                        println!("{}", format_long(&r));
                    }
                    history.push(r);
                }
                Err(why) => eprintln!("Error ({}): {}", why.code(), why),
            }
        }
        print!("> ");
        io::stdout().flush()?;
    }
    println!();

    if cli.stats {
        let stats = compute_statistics(&history);
        println!("{}", serde_json::to_string_pretty(&stats)?);
    }
    log::info!("rolled {} notations", history.len());
    Ok(())
}
