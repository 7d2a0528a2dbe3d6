mod app;
mod components;
mod config;
mod error;
mod event;
mod explorer;
mod handler;
mod logging;
mod remote;
mod terminal;
mod theme;
mod tui;
mod ui;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::app::App;
use crate::config::{AppConfig, GeneralConfig, LoggingConfig, ServerConfig, ThemeConfig, TreeConfig};
use crate::event::{Event, EventHandler};
use crate::explorer::path::ExplorerPath;
use crate::remote::RemoteExecutor;
use crate::tui::{install_panic_hook, Tui};

/// Terminal explorer for a remote disk/partition simulator.
#[derive(Parser, Debug)]
#[command(name = "fsx", version, about)]
struct Cli {
    /// Simulator base URL (e.g. http://localhost:8000)
    #[arg(long, value_name = "URL")]
    server: Option<String>,

    /// Path to a TOML config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Color scheme: dark, light or custom
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// Disable mouse capture
    #[arg(long)]
    no_mouse: bool,

    /// Use ASCII markers instead of nerd font icons
    #[arg(long)]
    no_icons: bool,

    /// Write logs to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Open and select this node on start (e.g. disk-0/partition-0/%2F/users.txt)
    #[arg(long, value_name = "PATH")]
    select: Option<String>,
}

impl Cli {
    /// Flags expressed as a partial config, the highest-priority layer.
    fn overrides(&self) -> AppConfig {
        AppConfig {
            general: GeneralConfig {
                mouse: self.no_mouse.then_some(false),
            },
            server: ServerConfig {
                url: self.server.clone(),
                ..Default::default()
            },
            tree: TreeConfig {
                use_icons: self.no_icons.then_some(false),
            },
            theme: ThemeConfig {
                scheme: self.theme.clone(),
                ..Default::default()
            },
            logging: LoggingConfig {
                file: self.log_file.clone(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

#[tokio::main]
async fn main() -> error::Result<()> {
    let cli = Cli::parse();
    let reveal = cli.select.as_deref().map(ExplorerPath::parse).transpose()?;
    let config = AppConfig::load(cli.config.as_deref(), Some(&cli.overrides()));

    match logging::resolve_log_file_path(cli.log_file.clone(), config.logging.file.clone())
        .and_then(|path| logging::init_logging(config.log_level(), &path))
    {
        Ok(()) => {}
        Err(e) => eprintln!("Warning: logging disabled: {}", e),
    }

    let executor = RemoteExecutor::new(config.server_url(), config.request_timeout())?;
    tracing::info!(server = executor.endpoint(), "starting");

    install_panic_hook();

    let mut tui = Tui::new(config.mouse_enabled())?;
    let mut app = App::new(&config);
    app.reveal_on_load = reveal;
    let mut events = EventHandler::new(Duration::from_millis(100));
    let event_tx = events.sender();

    if let Some(request) = app.request_reload() {
        executor.dispatch(request, &event_tx);
    }

    loop {
        tui.draw(|frame| ui::render(&mut app, frame))?;

        let request = match events.next().await? {
            Event::Key(key) => handler::handle_key_event(&mut app, key),
            Event::Mouse(mouse) => {
                handler::handle_mouse_event(&mut app, mouse);
                None
            }
            Event::Tick => {
                app.clear_expired_status();
                None
            }
            Event::Resize(_, _) => None,
            Event::SnapshotLoaded(result) => {
                app.handle_snapshot_loaded(result);
                None
            }
            Event::CommandFinished { command, result } => {
                app.handle_command_finished(&command, result);
                None
            }
        };
        if let Some(request) = request {
            executor.dispatch(request, &event_tx);
        }

        if app.should_quit {
            break;
        }
    }

    tui.restore()?;
    tracing::info!("exiting");
    Ok(())
}
