use std::fs;
use std::io;
use std::sync::Arc;
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
use tracing::{info, warn};

use tourdesk::app::{App, AppSettings, Collaborators, InputMode};
use tourdesk::config::{self, Config};
use tourdesk::controller::DashboardSettings;
use tourdesk::core::{Action, NavigateTarget, NotifyLevel};
use tourdesk::infrastructure::api::{self, ApiClient, RestDomainSource, RestFormBackend};
use tourdesk::infrastructure::demo::DemoBackend;
use tourdesk::infrastructure::runtime::RuntimeBridge;
use tourdesk::store::{SessionStore, AUTH_TOKEN_KEY};
use tourdesk::{logging, ui};

const DEMO_LATENCY: Duration = Duration::from_millis(150);

#[derive(Debug, Parser)]
#[command(
    name = "tourdesk",
    version,
    about = "Tourdesk: terminal admin dashboard for tour bookings"
)]
struct Args {
    /// Admin API root (e.g. https://api.example.com/admin)
    #[arg(long)]
    api: Option<String>,

    /// Use the built-in demo data even if an API is configured
    #[arg(long)]
    demo: bool,

    /// Store an authorization token and continue
    #[arg(long)]
    token: Option<String>,

    /// Forget the stored authorization token
    #[arg(long)]
    logout: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = config::load();

    if let Some(path) = config::log_path() {
        if let Err(err) = logging::init(&path) {
            eprintln!("logging disabled: {err:#}");
        }
    }

    let (token, session_warning) = session_token(&args);
    let (collaborators, backend_label) = collaborators(&args, &config, token.clone())?;

    let runtime = RuntimeBridge::new()?;
    let settings = AppSettings {
        dashboard: DashboardSettings {
            load_timeout: config.load_timeout(),
            visuals_settle: config.chart_settle(),
        },
        status_ttl: config.status_ttl(),
        export_dir: config::export_dir(),
        backend_label,
        token_present: token.is_some(),
    };
    let mut app = App::new(collaborators, runtime.dispatcher(), settings);

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    app.start();
    if let Some(message) = session_warning {
        app.set_status(message, NotifyLevel::Warning);
    }

    let res = run_app(&mut terminal, app, runtime);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{err:?}");
    }

    Ok(())
}

/// Apply `--token` / `--logout`, then read the stored token once
fn session_token(args: &Args) -> (Option<String>, Option<String>) {
    let Some(db_path) = config::session_db_path() else {
        return (args.token.clone(), None);
    };
    if let Some(parent) = db_path.parent() {
        if let Err(err) = fs::create_dir_all(parent) {
            warn!(path = %parent.display(), error = %err, "cannot create session directory");
        }
    }
    let result = SessionStore::open(&db_path).and_then(|store| {
        if args.logout {
            store.remove(AUTH_TOKEN_KEY)?;
            info!("stored token removed");
        }
        if let Some(token) = args.token.as_deref() {
            store.set(AUTH_TOKEN_KEY, token.trim())?;
            info!("token stored");
        }
        store.token()
    });
    match result {
        Ok(token) => (token, None),
        Err(err) => {
            warn!(error = %err, "session store unavailable");
            (
                args.token.clone(),
                Some(format!("Session store disabled: {err}")),
            )
        }
    }
}

fn collaborators(
    args: &Args,
    config: &Config,
    token: Option<String>,
) -> Result<(Collaborators, String)> {
    let base_url = args
        .api
        .clone()
        .or_else(|| config.base_url().map(str::to_string))
        .filter(|_| !args.demo);

    let Some(base_url) = base_url else {
        info!("using demo collaborators");
        let demo = DemoBackend::new(DEMO_LATENCY);
        let collaborators = Collaborators {
            registry: demo.registry(),
            domain_source: demo.domain_source(),
            forms: Arc::new(demo),
        };
        return Ok((collaborators, "demo".to_string()));
    };

    info!(%base_url, "using REST collaborators");
    let client = ApiClient::new(&base_url, token, config.load_timeout())?;
    let collaborators = Collaborators {
        registry: api::registry(&client),
        domain_source: Arc::new(RestDomainSource::new(client.clone())),
        forms: Arc::new(RestFormBackend::new(client)),
    };
    Ok((collaborators, base_url))
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    mut runtime: RuntimeBridge,
) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        app.pump(runtime.poll_completions());
        terminal.draw(|f| ui::draw(f, &app))?;
        if app.should_quit {
            info!("quit requested");
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
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.apply_action(Action::Quit);
        return;
    }

    if app.modal.is_open() {
        handle_modal_keys(app, key);
        return;
    }

    if app.help_open {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
            app.help_open = false;
        }
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Command => handle_command_mode(app, key),
    }
}

fn handle_modal_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.apply_action(Action::CloseOverlay),
        KeyCode::Tab => app.modal.focus_next(),
        KeyCode::BackTab => app.modal.focus_prev(),
        KeyCode::Enter => {
            let has_handler = app.modal.state().is_some_and(|state| state.has_handler());
            if !has_handler {
                app.modal.close();
            } else {
                app.modal.submit();
            }
        }
        KeyCode::Backspace => app.modal.backspace(),
        KeyCode::Char(ch) => app.modal.input_char(ch),
        _ => {}
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    let action = match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('?') => Action::ToggleHelp,
        KeyCode::Esc => Action::CloseOverlay,
        KeyCode::Char(':') => {
            app.enter_command();
            Action::None
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.move_selection(true);
            Action::None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.move_selection(false);
            Action::None
        }
        KeyCode::Char(']') | KeyCode::Tab => Action::Navigate(NavigateTarget::NextSection),
        KeyCode::Char('[') | KeyCode::BackTab => Action::Navigate(NavigateTarget::PrevSection),
        KeyCode::Char('d') => Action::Navigate(NavigateTarget::NextDomain),
        KeyCode::Enter => Action::OpenDetail,
        KeyCode::Char('n') => Action::OpenCreateForm,
        KeyCode::Char('r') => Action::Refresh,
        _ => Action::None,
    };
    app.apply_action(action);
}

fn handle_command_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.exit_command(),
        KeyCode::Enter => app.apply_command(),
        KeyCode::Backspace => {
            app.command.input.pop();
        }
        KeyCode::Char(ch) => app.command.input.push(ch),
        _ => {}
    }
}
