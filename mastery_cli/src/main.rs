use anyhow::{Context, Result};
/// Python Mastery OS - terminal learning tracker
///
/// Provides the interactive dashboard and one-shot commands over the saved
/// progress state.
use clap::{Parser, Subcommand};
use mastery_cli::config::Config;
use mastery_cli::{clipboard, commands, ui};
use std::fs::OpenOptions;
use std::io::{self, BufRead};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mastery")]
#[command(about = "Python Mastery OS - learn, build, ship", long_about = None)]
struct Cli {
    /// Directory holding the saved state
    #[arg(long, global = true, env = "MASTERY_STATE_DIR")]
    state_dir: Option<PathBuf>,

    /// Curriculum YAML to use instead of the built-in one
    #[arg(long, global = true, env = "MASTERY_CATALOG")]
    catalog: Option<PathBuf>,

    /// High-contrast palette for the dashboard
    #[arg(long, global = true)]
    high_contrast: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive dashboard (default)
    Tui,
    /// Print overall, scoreboard, section and module progress
    Status {
        /// Only this section
        #[arg(short, long)]
        section: Option<String>,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Flip a checklist key, e.g. numpy::learn::n1 or scoreboard::sb_ml
    Toggle { key: String },
    /// Set the free-text note of a module
    Note { module: String, text: String },
    /// Override the URL of a resource link
    Link { link_id: String, url: String },
    /// List resource links with their effective URLs
    Links,
    /// Weekly planner
    Plan {
        #[command(subcommand)]
        action: PlanAction,
    },
    /// List checklist keys with their labels
    Keys {
        #[arg(short, long)]
        section: Option<String>,
    },
    /// Clear all progress, notes, links and the plan
    Reset {
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum PlanAction {
    /// Print the current plan
    Show,
    /// Fill the plan from the preset for the current week
    Generate,
    /// Set one field (focus, learn1, build-artifact, repo-name, ...)
    Set { field: String, value: String },
    /// Set the week number (0 becomes 1)
    Week { week: u32 },
    /// Render the plan as a Markdown checklist
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also send it to the terminal clipboard
        #[arg(long)]
        copy: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::new(cli.state_dir, cli.catalog, cli.high_contrast);

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            init_file_logging(&config)?;
            ui::run_tui(&config)
        }
        command => {
            env_logger::init_from_env(env_logger::Env::default().default_filter_or("warn"));
            run_command(&config, command)
        }
    }
}

fn run_command(config: &Config, command: Commands) -> Result<()> {
    let mut tracker = config.open_tracker()?;

    let output = match command {
        Commands::Tui => return ui::run_tui(config),
        Commands::Status { section, json } => commands::status(&tracker, section.as_deref(), json)?,
        Commands::Toggle { key } => commands::toggle(&mut tracker, &key)?,
        Commands::Note { module, text } => commands::note(&mut tracker, &module, &text)?,
        Commands::Link { link_id, url } => commands::link(&mut tracker, &link_id, &url)?,
        Commands::Links => commands::links(&tracker),
        Commands::Plan { action } => match action {
            PlanAction::Show => commands::plan_show(&tracker),
            PlanAction::Generate => commands::plan_generate(&mut tracker),
            PlanAction::Set { field, value } => commands::plan_set(&mut tracker, &field, &value)?,
            PlanAction::Week { week } => commands::plan_week(&mut tracker, week),
            PlanAction::Export { output, copy } => {
                if copy {
                    clipboard::copy(&tracker.export_plan());
                }
                commands::plan_export(&tracker, output.as_deref())?
            }
        },
        Commands::Keys { section } => commands::keys(&tracker, section.as_deref())?,
        Commands::Reset { yes } => {
            if !yes && !confirm("Reset all progress, notes, links and the weekly plan?")? {
                println!("Cancelled.");
                return Ok(());
            }
            commands::reset(&mut tracker)
        }
    };

    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}

/// Sends log output to a file so it cannot draw over the dashboard
fn init_file_logging(config: &Config) -> Result<()> {
    config.ensure_state_dir()?;
    let path = config.log_path();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    println!("{}", prompt);
    println!("Proceed? (y/N): ");

    let stdin = io::stdin();
    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;
    Ok(line.trim().eq_ignore_ascii_case("y"))
}
