mod app;
mod commands;
mod dates;
mod render;
mod utils;

use anyhow::Result;
use calrem_core::grid::ViewMode;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::commands::Target;
use crate::commands::edit::Changes;
use crate::commands::list::ListScope;
use crate::dates::{parse_date_arg, parse_month_arg, today};

#[derive(Parser)]
#[command(name = "calrem")]
#[command(about = "A calendar with per-user reminders, in your terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and log in
    Register {
        #[arg(short, long)]
        username: Option<String>,
    },
    /// Log in and remember the session
    Login {
        #[arg(short, long)]
        username: Option<String>,
    },
    /// Forget the saved session
    Logout,
    /// Print the logged-in user
    Whoami,
    /// Render the calendar grid with reminder counts
    Show {
        /// year, month, week or day (defaults to `default_view` in config)
        #[arg(short, long)]
        view: Option<ViewMode>,

        /// Selected date (YYYY-MM-DD or e.g. "next friday"), defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Move forward N periods of the view
        #[arg(long, conflicts_with = "prev")]
        next: Option<u16>,

        /// Move back N periods of the view
        #[arg(long)]
        prev: Option<u16>,
    },
    /// Add a reminder
    Add {
        title: Option<String>,

        #[arg(short, long)]
        date: Option<String>,

        /// e.g. "9:30 AM"
        #[arg(short, long)]
        time: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },
    /// List the reminders of a day (default today) or of a month
    List {
        #[arg(short, long, conflicts_with = "month")]
        date: Option<String>,

        /// YYYY-MM
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Reminders from today on
    Upcoming {
        /// Include past reminders
        #[arg(short, long)]
        all: bool,
    },
    /// Edit a reminder, found by id or by date, time and title
    Edit {
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        new_date: Option<String>,
        #[arg(long)]
        new_time: Option<String>,
        #[arg(long)]
        new_title: Option<String>,
        #[arg(long)]
        new_description: Option<String>,
    },
    /// Delete a reminder, found by id or by date, time and title
    Delete {
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        title: Option<String>,

        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

/// Log to stderr, filtered by `CALREM_LOG` (e.g. `CALREM_LOG=calrem_core=debug`).
fn init_tracing() {
    let filter = EnvFilter::try_from_env("CALREM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let app = App::load()?;

    match cli.command {
        Commands::Register { username } => commands::auth::register(&app, username).await,
        Commands::Login { username } => commands::auth::login(&app, username).await,
        Commands::Logout => commands::auth::logout(&app),
        Commands::Whoami => commands::auth::whoami(&app),
        Commands::Show {
            view,
            date,
            next,
            prev,
        } => {
            let date = date.as_deref().map(parse_date_arg).transpose()?;
            let steps = i32::from(next.unwrap_or(0)) - i32::from(prev.unwrap_or(0));
            commands::show::run(&app, view, date, steps).await
        }
        Commands::Add {
            title,
            date,
            time,
            description,
        } => commands::add::run(&app, title, date, time, description).await,
        Commands::List { date, month } => {
            let scope = match (date, month) {
                (_, Some(month)) => ListScope::Month(parse_month_arg(&month)?),
                (Some(date), None) => ListScope::Day(parse_date_arg(&date)?),
                (None, None) => ListScope::Day(today()),
            };
            commands::list::run(&app, scope).await
        }
        Commands::Upcoming { all } => commands::upcoming::run(&app, all).await,
        Commands::Edit {
            id,
            date,
            time,
            title,
            new_date,
            new_time,
            new_title,
            new_description,
        } => {
            let session = app.current_user()?;
            let target = Target::from_args(&session.username, id, date, time, title)?;
            let changes = Changes {
                date: new_date,
                time: new_time,
                title: new_title,
                description: new_description,
            };
            commands::edit::run(&app, target, changes).await
        }
        Commands::Delete {
            id,
            date,
            time,
            title,
            yes,
        } => {
            let session = app.current_user()?;
            let target = Target::from_args(&session.username, id, date, time, title)?;
            commands::delete::run(&app, target, yes).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn every_subcommand_has_help_text() {
        let cli = Cli::command();
        let undocumented: Vec<&str> = cli
            .get_subcommands()
            .filter(|sub| sub.get_about().is_none())
            .map(|sub| sub.get_name())
            .collect();
        assert!(undocumented.is_empty(), "missing about: {undocumented:?}");
    }
}
