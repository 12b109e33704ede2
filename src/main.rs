use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{fs::OpenOptions, io, sync::Arc, sync::Mutex};
use taskers::{
    app::App,
    cli::{self, Cli, Command},
    client::{HttpTaskService, TaskService},
    config::Config,
    ui,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = cli.config()?;
    let command = cli.command.unwrap_or(Command::Tui);

    // The board owns the terminal, so its logs go to a file.
    init_logging(&config, matches!(command, Command::Tui))?;
    info!(api_url = %config.api_url, "starting");

    let service: Arc<dyn TaskService> = Arc::new(HttpTaskService::new(config)?);
    match command {
        Command::Tui => run_tui(service).await?,
        Command::List => cli::list(service.as_ref()).await?,
        Command::Add(args) => cli::add(service.as_ref(), args).await?,
    }
    Ok(())
}

fn init_logging(config: &Config, to_file: bool) -> io::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("taskers=info"));

    if to_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
    Ok(())
}

async fn run_tui(service: Arc<dyn TaskService>) -> Result<(), Box<dyn std::error::Error>> {
    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let result = ui::run_app(&mut terminal, &mut app, service).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("{:?}", err);
    }
    Ok(())
}
