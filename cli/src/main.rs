mod chart;
mod menu;
mod view;

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use prioritask_core::{AppConfig, Completion, SqliteTaskRepository, TaskError, TaskService};
use tracing_subscriber::EnvFilter;

use crate::chart::{ChartRenderer, PlainChart, TerminalChart};
use crate::menu::Menu;

#[derive(Parser)]
#[command(name = "prioritask")]
#[command(about = "Task prioritization assistant", long_about = None)]
struct Cli {
    /// Path to the SQLite task store (default: ~/.prioritask/tasks.db)
    #[arg(long, global = true, env = "PRIORITASK_DB")]
    db: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Open the interactive menu (default)
    Menu,
    /// Add a new task (usage: add Finish the urgent report --due 2025-01-01)
    Add {
        /// Task description
        #[arg(required = true)]
        description: Vec<String>,
        /// Due date in YYYY-MM-DD
        #[arg(long)]
        due: Option<String>,
    },
    /// List pending tasks by priority
    List {
        /// Include completed tasks
        #[arg(long)]
        all: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Mark a task as completed
    Complete {
        id: i64,
    },
    /// Draw a bar chart of pending task priorities
    Chart {
        /// Print text bars instead of opening the full-screen chart
        #[arg(long)]
        plain: bool,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = AppConfig::resolve(cli.db)?;
    let repo = SqliteTaskRepository::open(&config.db_path)
        .with_context(|| format!("Failed to open task store: {}", config.db_path.display()))?;
    let service = TaskService::new(repo);

    let result = run_command(&service, cli.command);

    // Close explicitly so close errors are reported.
    service.into_repository().close()?;
    result
}

/// Full-screen chart on a terminal, text bars otherwise.
fn chart_renderer(plain: bool) -> Box<dyn ChartRenderer> {
    if plain || !io::stdout().is_terminal() {
        Box::new(PlainChart::new(io::stdout()))
    } else {
        Box::new(TerminalChart)
    }
}

fn run_command(
    service: &TaskService<SqliteTaskRepository>,
    command: Option<Commands>,
) -> Result<()> {
    let mut stdout = io::stdout().lock();

    match command.unwrap_or(Commands::Menu) {
        Commands::Menu => {
            let stdin = io::stdin().lock();
            let mut menu = Menu::new(service, stdin, &mut stdout, chart_renderer(false));
            menu.run()?;
        }
        Commands::Add { description, due } => {
            match service.create_task(&description.join(" "), due.as_deref()) {
                Ok(task) => {
                    println!("Task added: {} (ID: {})", task.description, task.id);
                    if let Some(d) = task.due_date {
                        println!("  Due: {}", d);
                    }
                    println!("  Priority: {}", task.priority);
                }
                Err(TaskError::Validation(msg)) => {
                    println!("Error: {} Task not added.", msg);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Commands::List { all, json } => {
            let tasks = if all {
                service.all_tasks()?
            } else {
                service.pending_tasks()?
            };
            if json {
                view::write_json(&mut stdout, &tasks)?;
            } else {
                view::write_table(&mut stdout, &tasks)?;
            }
        }
        Commands::Complete { id } => match service.complete_task(id)? {
            Completion::Completed => println!("Task {} marked as completed!", id),
            Completion::Unchanged => println!("No pending task with ID {}.", id),
        },
        Commands::Chart { plain } => {
            let bars = service.priority_chart()?;
            if bars.is_empty() {
                println!("No tasks to visualize.");
            } else {
                chart_renderer(plain).render(&bars)?;
            }
        }
    }
    Ok(())
}
