//! Subcommands and their execution against a [`Ledger`].

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Subcommand;
use clubhouse_core::{
  event::{Category, EventInput},
  ledger::Ledger,
  snapshot::LedgerSnapshot,
  store::EventStore,
  year::YearFilter,
};
use uuid::Uuid;

use crate::render;

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Record the podium for one month and category.
  Record {
    /// Month as YYYY-MM.
    month:    String,
    /// "Net Stroke Play" or "Stable Ford".
    category: String,
    /// First, second, and third place, in order.
    #[arg(num_args = 3, value_names = ["FIRST", "SECOND", "THIRD"])]
    winners:  Vec<String>,
  },
  /// Remove a recorded result set by id.
  Remove { id: String },
  /// List recorded results, newest month first.
  Events {
    #[arg(long)]
    year: Option<String>,
  },
  /// Show the leaderboard.
  Standings {
    #[arg(long)]
    year:     Option<String>,
    /// Limit output to one category.
    #[arg(long)]
    category: Option<String>,
  },
  /// Years that have at least one recorded result.
  Years,
  /// Every player who has placed.
  Players,
  /// Write the whole ledger as JSON to stdout or a file.
  Export {
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
  },
  /// Replace the ledger with the contents of a JSON export.
  Import { file: PathBuf },
  /// Delete every recorded result.
  Reset {
    /// Confirm the reset.
    #[arg(long)]
    yes: bool,
  },
}

/// Run `command` and return the text to print.
pub async fn run<S: EventStore>(command: Command, ledger: &Ledger<S>) -> Result<String> {
  match command {
    Command::Record { month, category, winners } => {
      let event = ledger.create(EventInput::new(month, category, winners)).await?;
      Ok(format!(
        "recorded {} / {} ({})\n",
        event.month, event.category, event.id
      ))
    }

    Command::Remove { id } => {
      let id = Uuid::parse_str(id.trim()).with_context(|| format!("invalid event id {id:?}"))?;
      ledger.remove(id).await?;
      Ok(format!("removed {id}\n"))
    }

    Command::Events { year } => {
      let filter = YearFilter::parse(year.as_deref())?;
      Ok(render::events(&ledger.list(&filter).await?))
    }

    Command::Standings { year, category } => {
      let filter = YearFilter::parse(year.as_deref())?;
      let only = category.as_deref().map(Category::parse).transpose()?;
      let rankings = ledger.rankings(&filter).await?;
      Ok(render::leaderboard(filter.as_str(), &rankings, only))
    }

    Command::Years => Ok(render::list(&ledger.years().await?, "no events recorded")),

    Command::Players => Ok(render::list(&ledger.players().await?, "no players yet")),

    Command::Export { output } => {
      let json = ledger.export().await?.to_json_pretty()?;
      match output {
        Some(path) => {
          std::fs::write(&path, format!("{json}\n"))
            .with_context(|| format!("writing {}", path.display()))?;
          Ok(format!("exported to {}\n", path.display()))
        }
        None => Ok(format!("{json}\n")),
      }
    }

    Command::Import { file } => {
      let raw = std::fs::read_to_string(&file)
        .with_context(|| format!("reading {}", file.display()))?;
      let imported = ledger.import(LedgerSnapshot::from_json(&raw)?).await?;
      Ok(format!("imported {imported} events\n"))
    }

    Command::Reset { yes } => {
      if !yes {
        bail!("refusing to clear the ledger without --yes");
      }
      ledger.clear().await?;
      Ok("ledger cleared\n".to_string())
    }
  }
}
