use std::fs;
use std::io;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use rnrscan::app::{App, InputMode};
use rnrscan::config;
use rnrscan::infrastructure::runtime::{RuntimeBridge, RuntimeCommand};
use rnrscan::ui;

#[derive(Debug, Parser)]
#[command(
    name = "rnrscan",
    version,
    about = "RNRScan: a terminal dashboard for an RNR node"
)]
struct Args {
    /// Node HTTP API endpoint (e.g. http://localhost:8080)
    #[arg(long)]
    api: Option<String>,

    /// Number of blocks to fetch per poll
    #[arg(long)]
    limit: Option<usize>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = config::load();
    if let Some(api) = args.api.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        config.api_url = normalize_http_endpoint(api);
    }
    if let Some(limit) = args.limit {
        config.blocks_limit = limit;
    }
    init_tracing();

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runtime = RuntimeBridge::new(config.poll_config())?;
    let app = App::new(&config);

    let res = run_app(&mut terminal, app, runtime);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    runtime: RuntimeBridge,
) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        for event in runtime.poll_events() {
            app.apply_event(event);
        }
        for cmd in app.take_commands() {
            let _ = runtime.send(cmd);
        }

        terminal.draw(|f| ui::draw(f, &app))?;
        if app.should_quit {
            let _ = runtime.send(RuntimeCommand::Shutdown);
            return Ok(());
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                handle_key(&mut app, key);
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if app.search_view.is_some() {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
            app.close_search();
        }
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Prompt(kind) => match key.code {
            KeyCode::Esc => app.exit_prompt(),
            KeyCode::Enter => app.apply_prompt(kind),
            KeyCode::Backspace => {
                app.input.pop();
            }
            KeyCode::Char(ch) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return;
                }
                app.input.push(ch);
            }
            _ => {}
        },
        InputMode::Search => match key.code {
            KeyCode::Esc => {
                app.input.clear();
                app.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => app.apply_search(),
            KeyCode::Backspace => {
                app.input.pop();
            }
            KeyCode::Char(ch) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return;
                }
                app.input.push(ch);
            }
            _ => {}
        },
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('r') => app.refresh(),
        KeyCode::Char('s') => app.begin_send(),
        KeyCode::Char('c') => app.copy_address(),
        KeyCode::Char('/') => app.enter_search(),
        _ => {}
    }
}

fn normalize_http_endpoint(endpoint: &str) -> String {
    let trimmed = endpoint.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}

/// Log to a file under the data dir; stdout belongs to the alternate screen.
fn init_tracing() {
    let Some(dir) = config::data_dir() else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = fs::File::create(dir.join("rnrscan.log")) else {
        return;
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}
