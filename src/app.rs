use crate::config::Config;
use crate::events::network::{Event as NetworkEvent, Handler as NetworkEventHandler};
use crate::events::terminal::Handler as TerminalEventHandler;
use crate::logger::CustomLogger;
use crate::sonar::Sonar;
use crate::state::{PaneSettings, State};
use crate::ui::Theme;
use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::*;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout, Stdout};
use std::sync::Arc;
use tokio::sync::Mutex;

pub type NetworkEventSender = std::sync::mpsc::Sender<NetworkEvent>;
type NetworkEventReceiver = std::sync::mpsc::Receiver<NetworkEvent>;
pub type ConfigSaveSender = std::sync::mpsc::Sender<()>;
type ConfigSaveReceiver = std::sync::mpsc::Receiver<()>;
type LogReceiver = std::sync::mpsc::Receiver<String>;

/// Oversees event processing, state management, and terminal output.
///
pub struct App {
    state: Arc<Mutex<State>>,
    config: Config,
}

impl App {
    /// Start a new application according to the given configuration. Returns
    /// the result of the application execution.
    ///
    pub async fn start(config: Config, log_level: LevelFilter) -> Result<()> {
        let log_rx = CustomLogger::install(log_level)?;

        info!("Starting application...");
        let base_url = config.require_base_url()?.to_owned();
        let gate_id = config.require_gate_id()?.to_owned();

        let theme = Theme::from_name(&config.theme_name).unwrap_or_else(|| {
            warn!("Unknown theme '{}', using default", config.theme_name);
            Theme::default()
        });
        let settings = PaneSettings {
            base_url: base_url.clone(),
            read_only: config.read_only,
            page_size: config.page_size,
            labels: config.labels.clone(),
            tooltips: config.tooltips.clone(),
        };

        let (tx, rx) = std::sync::mpsc::channel::<NetworkEvent>();
        let (config_save_tx, config_save_rx) = std::sync::mpsc::channel::<()>();
        let state = State::new(
            tx.clone(),
            config_save_tx,
            settings,
            theme,
            config.hotkeys.clone(),
        );
        let sonar = Sonar::new(&base_url, config.token.as_deref());
        let mut app = App {
            state: Arc::new(Mutex::new(state)),
            config,
        };
        app.start_network(rx, sonar);
        app.start_config_saver(config_save_rx);

        tx.send(NetworkEvent::LoadGate { gate_id })?;
        app.start_ui(log_rx).await?;

        // Save config on exit
        {
            let state = app.state.lock().await;
            app.config.theme_name = state.get_theme().name.clone();
            if let Err(e) = app.config.save() {
                error!("Failed to save config on exit: {}", e);
            }
        }

        info!("Exiting application...");
        Ok(())
    }

    /// Start a thread to handle config save requests.
    ///
    fn start_config_saver(&self, receiver: ConfigSaveReceiver) {
        let state = Arc::clone(&self.state);
        let mut config = self.config.clone();
        std::thread::spawn(move || {
            while receiver.recv().is_ok() {
                config.theme_name = state.blocking_lock().get_theme().name.clone();
                match config.save() {
                    Ok(_) => debug!("Saved configuration"),
                    Err(e) => error!("Failed to save config: {}", e),
                }
            }
        });
    }

    /// Start a separate thread for asynchronous state mutations. Every event
    /// runs as its own task so requests complete in any order.
    ///
    fn start_network(&self, net_receiver: NetworkEventReceiver, sonar: Sonar) {
        debug!("Creating new thread for asynchronous networking...");
        let handler = NetworkEventHandler::new(Arc::clone(&self.state), sonar);
        std::thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(e) => {
                    error!("Failed to start network runtime: {}", e);
                    return;
                }
            };
            runtime.block_on(async move {
                while let Ok(network_event) = net_receiver.recv() {
                    let handler = handler.clone();
                    tokio::spawn(async move {
                        if let Err(e) = handler.handle(network_event).await {
                            error!("Failed to handle network event: {}", e);
                        }
                    });
                }
            })
        });
    }

    /// Begin the terminal event poll on a separate thread before starting the
    /// render loop on the main thread. Return the result following an exit
    /// request or unrecoverable error.
    ///
    async fn start_ui(&mut self, log_rx: LogReceiver) -> Result<()> {
        debug!("Starting user interface on main thread...");
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        enable_raw_mode()?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;

        let result = self.run(&mut terminal, &log_rx).await;

        disable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;
        terminal.show_cursor()?;

        result
    }

    /// Draw, wait for the next terminal event, apply it. The state lock is
    /// released while waiting so network completions can land.
    ///
    async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        log_rx: &LogReceiver,
    ) -> Result<()> {
        let terminal_event_handler = TerminalEventHandler::new();
        loop {
            {
                let mut state = self.state.lock().await;
                for entry in log_rx.try_iter() {
                    state.add_debug_entry(entry);
                }
                terminal.draw(|frame| crate::ui::render(frame, &mut state))?;
            }
            let event = terminal_event_handler.next()?;
            let mut state = self.state.lock().await;
            if !terminal_event_handler.handle(event, &mut state) {
                debug!("Received application exit request.");
                break;
            }
        }
        Ok(())
    }
}
