mod calendar;
mod report;

use std::collections::HashMap;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use piecework_core::{
    expand_key, parse_args, parse_decimal, parse_entries, parse_human_day, parse_human_month,
    AppConfig, LocalWorkStore, NoticeLevel, Theme,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "piecework")]
#[command(about = "Log daily piecework and split monthly earnings across the team", long_about = None)]
struct Cli {
    /// Directory holding the data file (defaults to ~/.piecework)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Manage the catalog of billable positions
    #[command(subcommand)]
    Positions(PositionCommands),
    /// Show or edit one day's entries
    #[command(subcommand)]
    Day(DayCommands),
    /// Print a month's days and totals (default: this month)
    Month { month: Option<String> },
    /// Open the calendar viewer (default: this month)
    Calendar { month: Option<String> },
    /// Per-month bonus coefficients
    #[command(subcommand)]
    Coef(CoefCommands),
    /// Show or change settings (usage: settings set persons:4 coef:0.15 theme:dark)
    #[command(subcommand)]
    Settings(SettingsCommands),
    /// Write a snapshot of all data to a JSON file
    Export {
        /// Target directory (default: current directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Replace all data with a previously exported snapshot
    Import {
        file: PathBuf,
        /// Do not ask for confirmation
        #[arg(long)]
        yes: bool,
    },
    /// Delete everything and start over with the default data
    Reset {
        #[arg(long)]
        yes: bool,
    },
}

#[derive(clap::Subcommand)]
enum PositionCommands {
    List,
    Add { name: String, price: String },
    Edit { id: u32, name: String, price: String },
    Remove { id: u32 },
}

#[derive(clap::Subcommand)]
enum DayCommands {
    /// Show a day's entries (usage: day show 2026-01-12 | today | yesterday)
    Show { day: String },
    /// Replace a day's entries (usage: day set today 1:3 4:2.5)
    Set {
        day: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        entries: Vec<String>,
    },
    /// Remove a day's entries
    Clear { day: String },
}

#[derive(clap::Subcommand)]
enum CoefCommands {
    /// List the effective coefficients of a year (default: this year)
    List { year: Option<i32> },
    Set { month: String, value: String },
}

#[derive(clap::Subcommand)]
enum SettingsCommands {
    Show,
    Set {
        #[arg(trailing_var_arg = true)]
        args: Vec<String>,
    },
}

const SETTING_KEYS: [&str; 3] = ["persons", "coefficient", "theme"];

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::resolve(cli.data_dir)?;
    let mut store = piecework_core::open_local(&config)?;
    let today = Local::now().date_naive();

    match cli.command {
        Some(Commands::Positions(cmd)) => run_positions(&mut store, cmd)?,
        Some(Commands::Day(cmd)) => match cmd {
            DayCommands::Show { day } => {
                let day = parse_human_day(&day, today)?;
                report::show_day(day, &store.get_day_entries(day));
            }
            DayCommands::Set { day, entries } => {
                let day = parse_human_day(&day, today)?;
                let inputs = parse_entries(&entries)?;
                println!("Preview: {:.2}", store.preview_day_total(&inputs));
                store.set_day_entries(day, &inputs);
                report::show_day(day, &store.get_day_entries(day));
            }
            DayCommands::Clear { day } => {
                let day = parse_human_day(&day, today)?;
                store.clear_day(day);
            }
        },
        Some(Commands::Month { month }) => {
            let month = parse_human_month(month.as_deref().unwrap_or("this"), today)?;
            let overview = store.month_overview(month);
            report::show_month(&overview, store.data());
        }
        Some(Commands::Calendar { month }) => {
            let month = parse_human_month(month.as_deref().unwrap_or("this"), today)?;
            calendar::run(&mut store, month)?;
        }
        Some(Commands::Coef(cmd)) => match cmd {
            CoefCommands::List { year } => {
                let year = year.unwrap_or(config.tracked_year);
                report::show_coefficients(&store.year_coefficients(year)?);
            }
            CoefCommands::Set { month, value } => {
                let month = parse_human_month(&month, today)?;
                let value = parse_decimal(&value)?;
                // Rejections surface as notices below.
                let _ = store.set_coefficient(month, value);
            }
        },
        Some(Commands::Settings(cmd)) => match cmd {
            SettingsCommands::Show => report::show_settings(store.settings()),
            SettingsCommands::Set { args } => run_settings(&mut store, &args)?,
        },
        Some(Commands::Export { out }) => {
            let snapshot = store.export_snapshot()?;
            let dir = out.unwrap_or_else(|| PathBuf::from("."));
            let path = dir.join(&snapshot.file_name);
            fs::write(&path, snapshot.contents)
                .with_context(|| format!("Could not write {}", path.display()))?;
            println!("Exported to {}", path.display());
        }
        Some(Commands::Import { file, yes }) => {
            let raw = fs::read_to_string(&file)
                .with_context(|| format!("Could not read {}", file.display()))?;
            if let Ok(pending) = store.import_snapshot(&raw) {
                let summary = format!(
                    "Replace current data with {} positions and {} months from {}?",
                    pending.data().positions.len(),
                    pending.data().months.len(),
                    file.display()
                );
                if yes || confirm(&summary)? {
                    store.confirm_import(pending);
                }
            }
        }
        Some(Commands::Reset { yes }) => {
            if yes || confirm("Delete ALL data? This cannot be undone.")? {
                store.reset_data();
            }
        }
        None => {
            calendar::run(&mut store, parse_human_month("this", today)?)?;
        }
    }

    print_notices(&mut store);
    Ok(())
}

fn run_positions(store: &mut LocalWorkStore, cmd: PositionCommands) -> Result<()> {
    match cmd {
        PositionCommands::List => report::show_positions(store.positions()),
        PositionCommands::Add { name, price } => {
            if let Ok(p) = store.add_position(&name, parse_decimal(&price)?) {
                println!("Position added: {} (ID: {})", p.name, p.id);
            }
        }
        PositionCommands::Edit { id, name, price } => {
            let _ = store.update_position(id, &name, parse_decimal(&price)?);
        }
        PositionCommands::Remove { id } => {
            if store.delete_position(id).is_none() {
                println!("No position with ID {}", id);
            }
        }
    }
    Ok(())
}

fn run_settings(store: &mut LocalWorkStore, args: &[String]) -> Result<()> {
    let parsed = parse_args(args);
    for word in &parsed.words {
        println!("Warning: ignoring '{}' (expected key:value)", word);
    }

    let mut normalized = HashMap::new();
    for (key, value) in parsed.metadata {
        match expand_key(&key, &SETTING_KEYS) {
            Ok(full_key) => {
                normalized.insert(full_key, value);
            }
            Err(e) => println!("Warning: {}", e),
        }
    }

    if let Some(persons) = normalized.get("persons") {
        match persons.trim().parse::<u32>() {
            Ok(count) => {
                let _ = store.set_person_count(count);
            }
            Err(_) => println!("Warning: invalid person count '{}'", persons),
        }
    }
    if let Some(coef) = normalized.get("coefficient") {
        let _ = store.set_default_coefficient(parse_decimal(coef)?);
    }
    if let Some(theme) = normalized.get("theme") {
        store.set_theme(theme.parse::<Theme>()?);
    }
    Ok(())
}

fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn print_notices(store: &mut LocalWorkStore) {
    for notice in store.take_notices() {
        match notice.level {
            NoticeLevel::Info => println!("{}", notice.message),
            NoticeLevel::Warning => eprintln!("Warning: {}", notice.message),
            NoticeLevel::Error => eprintln!("Error: {}", notice.message),
        }
    }
}
