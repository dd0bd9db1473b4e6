mod app;
mod components;
mod draw;
mod keys;
mod state;
mod ui;

use crate::app::App;
use crate::state::messages::{NetworkRequest, NetworkResponse, UiEvent};
use crate::state::network::{LoadingState, NetworkWorker};
use crate::state::refresher::PeriodicRefresher;
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use log::error;
use std::io::Stdout;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tui::{Terminal, backend::CrosstermBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if handle_cli_args() {
        return Ok(());
    }

    better_panic::install();

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal();

    tui_logger::init_logger(log::LevelFilter::Error)?;
    tui_logger::set_default_level(log::LevelFilter::Error);

    let app = Arc::new(Mutex::new(App::new()));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (network_req_tx, network_req_rx) = mpsc::channel::<NetworkRequest>(100);
    let (network_resp_tx, network_resp_rx) = mpsc::channel::<NetworkResponse>(100);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Network thread
    let network_worker = NetworkWorker::new(network_req_rx, network_resp_tx);
    let network_task = tokio::spawn(network_worker.run());

    // Periodic bracket refresh thread (every 30s)
    let periodic_updater = PeriodicRefresher::new(ui_event_tx.clone());
    let periodic_task = tokio::spawn(periodic_updater.run());

    // Trigger the initial loads on startup
    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(terminal, app, ui_event_rx, network_req_tx, network_resp_rx).await;

    input_handler.abort();
    network_task.abort();
    periodic_task.abort();

    Ok(())
}

fn handle_cli_args() -> bool {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return false;
    };

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            true
        }
        "-V" | "--version" => {
            println!("arenatui {}", env!("CARGO_PKG_VERSION"));
            true
        }
        _ => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

fn usage_text() -> &'static str {
    "arenatui - Arena esports platform terminal dashboard

Usage:
  arenatui
  arenatui --help
  arenatui --version

Environment:
  ARENATUI_API_BASE       Backend base URL (default http://localhost:8000)
  ARENATUI_SESSION_JSON   Path to the saved session file
                          (default ~/.config/arenatui/session.json)"
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    network_requests: mpsc::Sender<NetworkRequest>,
    mut network_responses: mpsc::Receiver<NetworkResponse>,
) {
    let mut loading = LoadingState::default();

    loop {
        tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                let should_redraw = handle_ui_event(ui_event, &app, &network_requests).await;
                if should_redraw && !loading.is_loading {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }

            Some(response) = network_responses.recv() => {
                let should_redraw =
                    handle_network_response(response, &app, &network_requests, &mut loading).await;
                if should_redraw {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }
        }
    }
}

async fn handle_ui_event(
    ui_event: UiEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) -> bool {
    match ui_event {
        UiEvent::AppStarted => {
            let user_id = app.lock().await.user_id();
            let _ = network_requests.send(NetworkRequest::LoadTournaments { user_id }).await;
            let _ = network_requests.send(NetworkRequest::LoadGames).await;
            true
        }
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app, network_requests).await;
            true
        }
        UiEvent::Resize => true,
        UiEvent::RefreshTick => {
            let request = app.lock().await.refresh_request();
            if let Some(request) = request {
                let _ = network_requests.send(request).await;
            }
            false
        }
    }
}

/// Apply a network response to the app and fire the follow-up fetch for
/// mutations — every successful write re-fetches the view it touched.
async fn handle_network_response(
    response: NetworkResponse,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
    loading: &mut LoadingState,
) -> bool {
    let mut follow_up: Option<NetworkRequest> = None;

    match response {
        NetworkResponse::LoadingStateChanged { loading_state } => {
            *loading = loading_state;
            return true;
        }
        NetworkResponse::TournamentsLoaded { tournaments, registered } => {
            app.lock().await.on_tournaments_loaded(tournaments, registered);
        }
        NetworkResponse::TournamentDetailLoaded { detail } => {
            app.lock().await.on_tournament_detail_loaded(detail);
        }
        NetworkResponse::BracketLoaded { tournament_id, data } => {
            app.lock().await.on_bracket_loaded(tournament_id, data);
        }
        NetworkResponse::TeamsLoaded { teams, involvement } => {
            app.lock().await.on_teams_loaded(teams, involvement);
        }
        NetworkResponse::TeamDetailLoaded { team_id, detail } => {
            app.lock().await.on_team_detail_loaded(team_id, detail);
        }
        NetworkResponse::JoinRequestDecided { team_id } => {
            app.lock().await.on_join_request_decided();
            follow_up = Some(NetworkRequest::LoadTeamDetail { team_id });
        }
        NetworkResponse::TeamSettingsSaved { team_id } => {
            app.lock().await.on_team_settings_saved();
            follow_up = Some(NetworkRequest::LoadTeamDetail { team_id });
        }
        NetworkResponse::TeamCreated { team_id: _ } => {
            let mut guard = app.lock().await;
            guard.on_team_created();
            follow_up = Some(NetworkRequest::LoadTeams { user_id: guard.user_id() });
        }
        NetworkResponse::TeamDeleted => {
            let mut guard = app.lock().await;
            guard.on_team_deleted();
            follow_up = Some(NetworkRequest::LoadTeams { user_id: guard.user_id() });
        }
        NetworkResponse::ProfileLoaded { user } => {
            app.lock().await.on_profile_loaded(user);
        }
        NetworkResponse::ProfileSaved { user } => {
            app.lock().await.on_profile_saved(user);
        }
        NetworkResponse::AvatarUploaded { user_id, avatar_url } => {
            app.lock().await.on_avatar_uploaded(user_id, avatar_url);
        }
        NetworkResponse::UsersLoaded { users } => {
            app.lock().await.on_users_loaded(users);
        }
        NetworkResponse::UserActionApplied => {
            app.lock().await.on_user_action_applied();
            follow_up = Some(NetworkRequest::LoadUsers);
        }
        NetworkResponse::BrStatsSaved { tournament_id } => {
            let mut guard = app.lock().await;
            guard.on_br_stats_saved();
            follow_up = guard
                .state
                .bracket
                .tournament
                .as_ref()
                .filter(|t| t.id == tournament_id)
                .cloned()
                .map(|tournament| NetworkRequest::LoadBracket { tournament });
        }
        NetworkResponse::GamesLoaded { games } => {
            app.lock().await.on_games_loaded(games);
        }
        NetworkResponse::Error { scope, message } => {
            error!("Network error ({scope:?}): {message}");
            app.lock().await.on_error(scope, message);
        }
    }

    if let Some(request) = follow_up
        && let Err(e) = network_requests.send(request).await
    {
        error!("Failed to queue follow-up request: {e}");
    }

    !loading.is_loading
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        if let Ok(event) = crossterm_event::read() {
            let ui_event = match event {
                Event::Key(key_event) => Some(UiEvent::KeyPressed(key_event)),
                Event::Resize(_, _) => Some(UiEvent::Resize),
                _ => None,
            };

            if let Some(ui_event) = ui_event
                && ui_events.send(ui_event).await.is_err()
            {
                break;
            }
        }
    }
}

fn setup_terminal() {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide).unwrap();
    execute!(stdout, terminal::EnterAlternateScreen).unwrap();
    execute!(stdout, terminal::Clear(terminal::ClearType::All)).unwrap();
    terminal::enable_raw_mode().unwrap();
}

pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::MoveTo(0, 0)).unwrap();
    execute!(stdout, terminal::Clear(terminal::ClearType::All)).unwrap();
    execute!(stdout, terminal::LeaveAlternateScreen).unwrap();
    execute!(stdout, cursor::Show).unwrap();
    terminal::disable_raw_mode().unwrap();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
