use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, warn};

use calc_cli::{
    commands,
    config::CalcConfig,
    logging,
    repl::{self, ReplOutcome},
    state::AppState,
    utils::{parse_amount, parse_point},
};
use calc_core::calculations::{DiscountInput, SplitBillInput, TipInput};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Immediate-execution calculator with tip, discount and split-bill screens.
///
/// Operators apply in the order they are typed: `2+3*4=` is 20.
#[derive(Debug, Parser)]
#[command(name = "calc", version)]
struct Cli {
    /// TOML configuration file. Defaults are used when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter such as `debug` or `warn,calc_core=trace`.
    /// Overrides the config file and `RUST_LOG`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log records to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Feed a key sequence to the calculator and print the display.
    ///
    /// Keys: 0-9 . + - * x / = % n(±) <(⌫) c(clear), plus × ÷ ±.
    Keys {
        #[arg(allow_hyphen_values = true)]
        sequence: String,

        /// Type into a money-entry field and print the amount as currency.
        #[arg(long)]
        money: bool,
    },

    /// Interactive session; each line is a key sequence or a command.
    Repl,

    /// Tip on a bill.
    Tip {
        #[arg(allow_hyphen_values = true)]
        bill: String,

        /// Tip percentage.
        #[arg(default_value = "15")]
        percent: String,
    },

    /// Price after a percentage discount and optional sales tax.
    Discount {
        #[arg(allow_hyphen_values = true)]
        price: String,

        /// Discount percentage.
        percent: String,

        /// Sales tax percentage applied to the discounted price.
        #[arg(long)]
        tax: Option<String>,
    },

    /// Split a bill between several people.
    Split {
        #[arg(allow_hyphen_values = true)]
        total: String,

        people: u32,

        /// Tip percentage added before splitting.
        #[arg(long)]
        tip: Option<String>,
    },

    /// Drag the percentage slider through `x,y` screen points.
    Slider {
        /// Center of the semicircle in screen coordinates (y grows downward).
        #[arg(long, default_value = "100,100")]
        center: String,

        #[arg(required = true, allow_hyphen_values = true)]
        points: Vec<String>,
    },
}

// ─── commands ────────────────────────────────────────────────────────────────

fn run(
    command: Command,
    state: &mut AppState,
) -> Result<()> {
    let locale = state.formatter().config().clone();
    let amount = |s: &str| parse_amount(s, &locale);

    match command {
        Command::Keys { sequence, money } => {
            let text = if money {
                commands::run_money_keys(state, &sequence)?
            } else {
                commands::run_keys(state, &sequence)?
            };
            println!("{text}");
        }
        Command::Repl => run_repl(state)?,
        Command::Tip { bill, percent } => {
            let input = TipInput {
                bill: amount(&bill)?,
                tip_percent: amount(&percent)?,
            };
            println!("{}", commands::tip(state.formatter(), &input)?);
        }
        Command::Discount {
            price,
            percent,
            tax,
        } => {
            let input = DiscountInput {
                price: amount(&price)?,
                discount_percent: amount(&percent)?,
                sales_tax_percent: tax.as_deref().map(amount).transpose()?,
            };
            println!("{}", commands::discount(state.formatter(), &input)?);
        }
        Command::Split { total, people, tip } => {
            let input = SplitBillInput {
                total: amount(&total)?,
                people,
                tip_percent: tip.as_deref().map(amount).transpose()?,
            };
            println!("{}", commands::split(state.formatter(), &input)?);
        }
        Command::Slider { center, points } => {
            let center = parse_point(&center)?;
            let points = points
                .iter()
                .map(|p| parse_point(p))
                .collect::<Result<Vec<_>, _>>()?;
            println!("{}", commands::slider(state, &points, center));
        }
    }
    Ok(())
}

fn run_repl(state: &mut AppState) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    println!("type `help` for keys and commands, `quit` to leave");

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            debug!("end of input");
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        match repl::handle_line(state, &line) {
            Ok(ReplOutcome::Print(text)) => println!("{text}"),
            Ok(ReplOutcome::Quit) => break,
            Err(error) => {
                warn!(line = line.trim(), error = %error, "repl line failed");
                eprintln!("error: {error:#}");
            }
        }
    }
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = CalcConfig::load(cli.config.as_deref()).context("failed to load configuration")?;

    let level = cli.log_level.as_deref().or(config.logging.level.as_deref());
    logging::init_logging(level)?;
    if let Some(path) = cli.log_file.as_ref().or(config.logging.file.as_ref()) {
        logging::enable_file_logging(path)?;
    }
    debug!(?config, "configuration loaded");

    let mut state = AppState::from_config(&config)?;
    run(cli.command, &mut state)
}
