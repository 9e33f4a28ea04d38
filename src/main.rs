use anyhow::Context;
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    cursor::Show,
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
    tty::IsTty,
};
use glide::{
    config::{Config, ConfigStore, FileConfigStore},
    game::Game,
    input::InputId,
    logging,
    runtime::{CrosstermEventSource, FixedTicker, GameEvent, GameEventSource, Runner, Ticker},
    ui::{GameView, Viewport},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Frame, Terminal,
};
use std::{
    io::{self, stdin, Write},
    path::PathBuf,
    time::{Duration, Instant},
};
use tracing::{info, warn};

const POLL_INTERVAL_MS: u64 = 10;

/// steer a cursor across the terminal and watch its trail
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Steer a cursor glyph across a canvas with the arrow keys, wasd or the mouse. The trail is drawn behind it and its X and Y coordinates are plotted over time."
)]
pub struct Cli {
    /// canvas width in world units
    #[clap(long)]
    width: Option<f64>,

    /// canvas height in world units
    #[clap(long)]
    height: Option<f64>,

    /// glyph drawn at the cursor position
    #[clap(short = 'g', long)]
    glyph: Option<String>,

    /// config file to read instead of the default location
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// write logs to this file instead of the default state directory
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// increase log verbosity (-v debug, -vv trace)
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Layer command line overrides on top of a loaded config
    fn apply(&self, mut config: Config) -> Config {
        if let Some(w) = self.width {
            config.canvas_width = w;
        }
        if let Some(h) = self.height {
            config.canvas_height = h;
        }
        if let Some(g) = &self.glyph {
            config.cursor_glyph = g.clone();
        }
        config
    }

    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Flow {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub game: Game,
    pub glyph: String,
    pub viewport: Viewport,
}

impl App {
    pub fn new(config: &Config, release_events: bool) -> Self {
        let game = Game::new(config.session_config(release_events));
        let viewport = Viewport {
            area: Rect::default(),
            bounds: game.bounds(),
        };
        Self {
            game,
            glyph: config.cursor_glyph.clone(),
            viewport,
        }
    }

    fn on_key(&mut self, key: KeyEvent) -> Flow {
        if key.kind == KeyEventKind::Release {
            if let Some(id) = InputId::from_key_code(key.code) {
                self.game.on_key_up(id);
            }
            return Flow::Continue;
        }

        match key.code {
            KeyCode::Esc => return Flow::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Flow::Quit
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.game.start();
            }
            KeyCode::Char('r') => {
                self.game.reset();
            }
            code => {
                if let Some(id) = InputId::from_key_code(code) {
                    self.game.on_key_down(id);
                }
            }
        }
        Flow::Continue
    }

    fn on_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(at) = self.viewport.to_world(mouse.column, mouse.row) {
                    self.game.on_touch_start(at);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(at) = self.viewport.to_world(mouse.column, mouse.row) {
                    self.game.on_touch_move(at);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => self.game.on_touch_end(),
            _ => {}
        }
    }
}

fn load_config(cli: &Cli) -> Config {
    let store = cli.config_store();
    let loaded = store.load().unwrap_or_else(|e| {
        warn!(error = %e, "falling back to default config");
        Config::default()
    });
    let config = cli.apply(loaded);
    match config.validate() {
        Ok(()) => config,
        Err(e) => {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::InvalidValue, e.to_string()).exit();
        }
    }
}

/// Puts the terminal back into cooked mode when dropped, so setup errors
/// after raw mode is enabled still restore it.
#[derive(Debug)]
struct TerminalGuard<W: Write> {
    out: W,
    release_events: bool,
}

impl<W: Write> TerminalGuard<W> {
    fn new(out: W) -> Self {
        Self {
            out,
            release_events: false,
        }
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if self.release_events {
            let _ = execute!(self.out, PopKeyboardEnhancementFlags);
        }
        let _ = disable_raw_mode();
        let _ = execute!(self.out, DisableMouseCapture, LeaveAlternateScreen, Show);
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let _log_guard = logging::init(cli.log_file.as_deref(), cli.verbose)?;
    let config = load_config(&cli);

    enable_raw_mode().context("enabling raw mode")?;
    let mut guard = TerminalGuard::new(io::stdout());

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("entering alternate screen")?;
    let release_events = supports_keyboard_enhancement().unwrap_or(false);
    if release_events {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )
        .context("enabling key release events")?;
        guard.release_events = true;
    }
    info!(release_events, "terminal ready");

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config, release_events);
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(POLL_INTERVAL_MS)),
    );
    let result = start_tui(&mut terminal, &mut app, &runner);

    drop(terminal);
    drop(guard);
    info!("exiting");
    result
}

fn start_tui<B: Backend, E: GameEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> anyhow::Result<()> {
    let mut last = Instant::now();
    terminal.draw(|f| ui(app, f))?;

    loop {
        let event = runner.step();

        let now = Instant::now();
        app.game.advance(now.duration_since(last));
        last = now;

        let mut force_draw = false;
        match event {
            GameEvent::Tick => {}
            GameEvent::Resize => force_draw = true,
            GameEvent::Key(key) => {
                if app.on_key(key) == Flow::Quit {
                    break;
                }
            }
            GameEvent::Mouse(mouse) => app.on_mouse(mouse),
        }

        if app.game.take_redraw() || force_draw {
            terminal.draw(|f| ui(app, f))?;
        }
    }

    Ok(())
}

fn ui(app: &mut App, f: &mut Frame) {
    let area = f.area();
    app.viewport = Viewport::for_frame(area, app.game.bounds());
    f.render_widget(GameView::new(&app.game, &app.glyph), area);
}
