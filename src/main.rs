use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use monthcal::config::Config;
use monthcal::console::{ConsolePresenter, ConsoleText};
use monthcal::day_command::{DayArgs, DayCommand};
use monthcal::event_source::JsonEventFile;
use monthcal::logger;
use monthcal::month_command::{MonthArgs, MonthCommand};

/// 月のカレンダーを表示し、同じ日に重なる予定を示すCLIアプリケーション。
///
/// # Examples
/// ```
/// $ cargo run -- month
/// $ cargo run -- month -m 2025-03 --shift -1
/// $ cargo run -- --events ./events.json day -d 2025-03-10
/// ```
#[derive(Debug, Parser)]
#[clap(version, about)]
struct Args {
    #[clap(
        long = "events",
        global = true,
        help = "Path to the events JSON file (defaults to $MONTHCAL_EVENTS or the data directory)"
    )]
    events: Option<PathBuf>,

    #[clap(
        short = 'v',
        long = "verbose",
        global = true,
        parse(from_occurrences),
        help = "Increases log verbosity (-v, -vv, -vvv)"
    )]
    verbose: u64,

    #[clap(subcommand)]
    subcommand: SubCommands,
}

/// サブコマンドを表す列挙型。
#[derive(Debug, Subcommand)]
enum SubCommands {
    Month(MonthArgs),
    Day(DayArgs),
}

fn main() -> Result<()> {
    let args = Args::parse();

    logger::setup_logger(args.verbose)?;

    let config = Config::load(args.events).context("Failed to load config")?;
    let repository = JsonEventFile::new(config.events_path);

    let stdout = io::stdout();
    let mut writer = stdout.lock();
    let mut presenter = ConsoleText::new(&mut writer);

    match args.subcommand {
        SubCommands::Month(month) => {
            let view = MonthCommand::new(&repository).run(month)?;
            presenter.show_month(&view)?;
        }
        SubCommands::Day(day) => {
            let (date, schedule) = DayCommand::new(&repository).run(day)?;
            presenter.show_day(date, &schedule)?;
        }
    }

    Ok(())
}
