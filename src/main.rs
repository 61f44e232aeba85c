mod config;
mod logging;
mod todo;
mod tui;

use anyhow::{Context, Result};
use clap::{Command, CommandFactory, Parser, Subcommand};
use clap_complete::{Generator, Shell, generate};
use config::{Config, ConfigError};
use crossterm::{
    event::{self, DisableFocusChange, EnableFocusChange},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::io;
use todo::models::Filter;
use todo::store::TodoStore;
use tracing::{error, info};
use tui::{app::App, ui};

#[derive(Parser)]
#[command(name = "todos")]
#[command(about = "A terminal to-do list that lives for one session")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(long, value_enum, help = "Filter to start with (overrides the configured default)")]
    filter: Option<Filter>,

    #[arg(long = "item", value_name = "TITLE", help = "Add an item before the list opens (repeatable)")]
    items: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Configuration management")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    #[command(about = "Generate shell completion scripts")]
    Completion {
        #[arg(help = "Shell to generate completions for")]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    #[command(about = "Set a configuration value")]
    Set {
        #[arg(help = "Configuration key ('default_filter' or 'initial_items')")]
        key: String,
        #[arg(help = "Configuration value; for 'initial_items' the title is appended")]
        value: String,
    },
    #[command(about = "Get a configuration value")]
    Get {
        #[arg(help = "Configuration key")]
        key: String,
    },
    #[command(about = "List all configuration values")]
    List,
}

fn main() {
    logging::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config { action }) => {
            if let Err(e) = handle_config_command(action) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            print_completions(shell, &mut cmd);
        }
        None => {
            if let Err(e) = run_main_app(cli.filter, cli.items) {
                error!("{:#}", e);
                eprintln!("Error: {:#}", e);
                std::process::exit(1);
            }
        }
    }
}

fn handle_config_command(action: ConfigAction) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            println!("Configuration saved successfully.");
        }
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            println!("{}", config.get(&key)?);
        }
        ConfigAction::List => {
            let config = Config::load()?;
            for key in config::KEYS {
                println!("{} = {}", key, config.get(key)?.replace('\n', ", "));
            }
        }
    }
    Ok(())
}

fn run_main_app(filter: Option<Filter>, items: Vec<String>) -> Result<()> {
    let config = Config::load().context("Configuration error")?;

    let mut store = TodoStore::new();
    for title in config.initial_items.iter().chain(items.iter()) {
        store.add(title.as_str());
    }
    let store = store.into_handle();

    let filter = filter.unwrap_or(config.default_filter);
    info!(%filter, items = store.borrow().len(), "starting session");

    let mut app = App::new(store, filter);
    run_tui(&mut app)
}

fn run_tui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        app.handle_event(event::read()?)?;
        if app.should_quit {
            break;
        }
    }
    info!("session ended");
    Ok(())
}

fn print_completions<G: Generator>(generator: G, cmd: &mut Command) {
    generate(generator, cmd, cmd.get_name().to_string(), &mut io::stdout());
}
