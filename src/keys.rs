use crate::app::{App, MenuItem};
use crate::state::app_state::{FormState, TeamTab, TournamentTab};
use crate::state::messages::{AdminAction, NetworkRequest};
use arena_api::{BracketData, Tournament};
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;
    let mut outgoing: Option<NetworkRequest> = None;

    // The inline stat editor swallows all input while open.
    if guard.state.active_tab == MenuItem::Bracket && guard.state.bracket.editor.is_some() {
        handle_stat_editor_key(&mut guard, key_event, &mut outgoing);
        drop(guard);
        send(outgoing, network_requests).await;
        return;
    }

    // Likewise an actively edited text field: every printable key is content.
    if let Some(form) = editing_form(&mut guard) {
        match key_event.code {
            KeyCode::Esc | KeyCode::Enter => form.end_edit(),
            KeyCode::Backspace => form.backspace(),
            Char(c) => form.push_char(c),
            _ => {}
        }
        return;
    }

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => {
            guard.update_tab(MenuItem::Tournaments);
            outgoing = guard.fetch_for_tab(MenuItem::Tournaments);
        }
        (_, Char('2'), _) => {
            guard.update_tab(MenuItem::Bracket);
        }
        (_, Char('3'), _) => {
            guard.update_tab(MenuItem::Teams);
            outgoing = guard.fetch_for_tab(MenuItem::Teams);
        }
        (_, Char('4'), _) => {
            guard.update_tab(MenuItem::Profile);
            outgoing = guard.fetch_for_tab(MenuItem::Profile);
        }
        (_, Char('5'), _) => {
            if guard.is_admin() {
                guard.update_tab(MenuItem::Admin);
                outgoing = guard.fetch_for_tab(MenuItem::Admin);
            } else {
                guard.state.status_line = Some("Admin access required".to_owned());
            }
        }
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Manual retry of whatever fetch feeds the active screen
        (_, Char('R'), _) => outgoing = guard.retry_request(),

        // Tournaments: list navigation and detail
        (MenuItem::Tournaments, Char('j') | KeyCode::Down, _) => {
            if guard.state.tournaments.detail.is_none() {
                guard.state.tournaments.select_next();
            }
        }
        (MenuItem::Tournaments, Char('k') | KeyCode::Up, _) => {
            if guard.state.tournaments.detail.is_none() {
                guard.state.tournaments.select_prev();
            }
        }
        (MenuItem::Tournaments, KeyCode::Enter, _) => {
            if guard.state.tournaments.detail.is_none() {
                if let Some(t) = guard.state.tournaments.selected_tournament() {
                    outgoing = Some(NetworkRequest::LoadTournamentDetail { id: t.id });
                }
            } else if guard.state.tournaments.detail_tab == TournamentTab::Bracket
                && let Some(t) =
                    guard.state.tournaments.detail.as_ref().map(|d| d.tournament.clone())
            {
                open_bracket(&mut guard, t, &mut outgoing);
            }
        }
        (MenuItem::Tournaments, KeyCode::Tab, _) => {
            if guard.state.tournaments.detail.is_some() {
                guard.state.tournaments.cycle_detail_tab();
            }
        }
        (MenuItem::Tournaments, Char('b'), _) => {
            if let Some(t) = guard.state.tournaments.detail.as_ref().map(|d| d.tournament.clone())
            {
                open_bracket(&mut guard, t, &mut outgoing);
            }
        }
        (MenuItem::Tournaments, Char('G'), _) => {
            if guard.state.tournaments.detail.is_none() {
                let games = guard.state.games.clone();
                guard.state.tournaments.cycle_game_filter(&games);
            }
        }
        (MenuItem::Tournaments, KeyCode::Esc, _) => guard.state.tournaments.close_detail(),

        // Bracket navigation
        (MenuItem::Bracket, Char('l') | KeyCode::Right, _) => guard.state.bracket.next_round(),
        (MenuItem::Bracket, Char('h') | KeyCode::Left, _) => guard.state.bracket.prev_round(),
        (MenuItem::Bracket, Char('j') | KeyCode::Down, _) => {
            if matches!(guard.state.bracket.data, Some(BracketData::Elimination(_))) {
                guard.state.bracket.seed_down();
            } else {
                guard.state.bracket.row_down();
            }
        }
        (MenuItem::Bracket, Char('k') | KeyCode::Up, _) => {
            if matches!(guard.state.bracket.data, Some(BracketData::Elimination(_))) {
                guard.state.bracket.seed_up();
            } else {
                guard.state.bracket.row_up();
            }
        }
        (MenuItem::Bracket, Char('g'), _) => guard.state.bracket.cycle_group(),
        (MenuItem::Bracket, Char('e'), _) => {
            if !guard.is_admin() {
                guard.state.status_line = Some("Only admins can edit stats".to_owned());
            } else if !guard.state.bracket.begin_edit() {
                guard.state.status_line =
                    Some("Stat editing applies to battle royale leaderboards".to_owned());
            }
        }
        (MenuItem::Bracket, KeyCode::Esc, _) => guard.update_tab(MenuItem::Tournaments),

        // Teams: hub, create form, detail sub-tabs
        (MenuItem::Teams, Char('j') | KeyCode::Down, _) => {
            if let Some(form) = guard.state.teams.create_form.as_mut() {
                form.focus_next();
            } else if guard.state.teams.open_team.is_some() {
                match guard.state.teams.tab {
                    TeamTab::Requests => guard.state.teams.request_down(),
                    TeamTab::Settings => guard.state.teams.settings_form.focus_next(),
                    _ => {}
                }
            } else {
                guard.state.teams.select_next();
            }
        }
        (MenuItem::Teams, Char('k') | KeyCode::Up, _) => {
            if let Some(form) = guard.state.teams.create_form.as_mut() {
                form.focus_prev();
            } else if guard.state.teams.open_team.is_some() {
                match guard.state.teams.tab {
                    TeamTab::Requests => guard.state.teams.request_up(),
                    TeamTab::Settings => guard.state.teams.settings_form.focus_prev(),
                    _ => {}
                }
            } else {
                guard.state.teams.select_prev();
            }
        }
        (MenuItem::Teams, KeyCode::Tab, _) => {
            if guard.state.teams.open_team.is_some() && guard.state.teams.create_form.is_none() {
                guard.state.teams.tab = guard.state.teams.tab.next();
            }
        }
        (MenuItem::Teams, KeyCode::Enter | Char('i'), _) => {
            if let Some(form) = guard.state.teams.create_form.as_mut() {
                form.begin_edit();
            } else if guard.state.teams.open_team.is_none() {
                if key_event.code == KeyCode::Enter
                    && let Some(team) = guard.state.teams.selected_team().cloned()
                {
                    let team_id = team.id;
                    guard.state.teams.open_detail(team);
                    outgoing = Some(NetworkRequest::LoadTeamDetail { team_id });
                }
            } else if guard.state.teams.tab == TeamTab::Settings {
                let session = guard.state.session.clone();
                if guard.state.teams.owns_open_team(session.as_ref()) {
                    guard.state.teams.settings_form.begin_edit();
                } else {
                    guard.state.status_line = Some("Only the owner can edit settings".to_owned());
                }
            }
        }
        (MenuItem::Teams, Char('a'), _) => {
            if guard.state.teams.tab == TeamTab::Requests {
                decide_request(&mut guard, true, &mut outgoing);
            }
        }
        (MenuItem::Teams, Char('x'), _) => {
            if guard.state.teams.tab == TeamTab::Requests {
                decide_request(&mut guard, false, &mut outgoing);
            }
        }
        (MenuItem::Teams, Char('s'), _) => {
            if guard.state.teams.create_form.is_some() {
                if let Some((name, tag, description)) = guard.state.teams.create_form_values() {
                    if let Some(owner_id) = guard.user_id() {
                        outgoing =
                            Some(NetworkRequest::CreateTeam { owner_id, name, tag, description });
                    }
                } else {
                    guard.state.status_line = Some("Team name is required".to_owned());
                }
            } else if guard.state.teams.open_team.is_some()
                && guard.state.teams.tab == TeamTab::Settings
            {
                let session = guard.state.session.clone();
                if guard.state.teams.owns_open_team(session.as_ref()) {
                    let settings = guard.state.teams.settings_from_form();
                    if let Some(team) = guard.state.teams.open_team.as_ref() {
                        outgoing =
                            Some(NetworkRequest::SaveTeamSettings { team_id: team.id, settings });
                    }
                }
            }
        }
        (MenuItem::Teams, Char('n'), _) => {
            if guard.state.teams.open_team.is_none() && guard.state.teams.create_form.is_none() {
                if guard.user_id().is_none() {
                    guard.state.status_line = Some("Sign in on the web first".to_owned());
                } else if guard
                    .state
                    .teams
                    .involvement
                    .map(|i| i.is_free_agent())
                    .unwrap_or(true)
                {
                    guard.state.teams.start_create_form();
                } else {
                    guard.state.status_line =
                        Some("You already belong to (or applied to) a team".to_owned());
                }
            }
        }
        (MenuItem::Teams, Char('d'), _) => {
            let session = guard.state.session.clone();
            if guard.state.teams.owns_open_team(session.as_ref())
                && let Some(team) = guard.state.teams.open_team.as_ref()
            {
                outgoing = Some(NetworkRequest::DeleteTeam { team_id: team.id });
            }
        }
        (MenuItem::Teams, KeyCode::Esc, _) => {
            if guard.state.teams.create_form.is_some() {
                guard.state.teams.create_form = None;
            } else {
                guard.state.teams.close_detail();
            }
        }

        // Profile form
        (MenuItem::Profile, Char('j') | KeyCode::Down, _) => {
            guard.state.profile.form.focus_next();
        }
        (MenuItem::Profile, Char('k') | KeyCode::Up, _) => {
            guard.state.profile.form.focus_prev();
        }
        (MenuItem::Profile, KeyCode::Enter | Char('i'), _) => {
            guard.state.profile.form.begin_edit();
        }
        (MenuItem::Profile, Char('s'), _) => {
            if let Some(user_id) = guard.user_id() {
                outgoing = Some(NetworkRequest::SaveProfile {
                    update: guard.state.profile.update_from_form(user_id),
                });
            }
        }
        (MenuItem::Profile, Char('u'), _) => {
            if let Some(user_id) = guard.user_id() {
                match guard.state.profile.avatar_path() {
                    Some(path) => {
                        outgoing = Some(NetworkRequest::UploadAvatar { user_id, path });
                    }
                    None => {
                        guard.state.status_line =
                            Some("Fill the avatar file field with a path first".to_owned());
                    }
                }
            }
        }

        // Admin table
        (MenuItem::Admin, Char('j') | KeyCode::Down, _) => guard.state.admin.select_next(),
        (MenuItem::Admin, Char('k') | KeyCode::Up, _) => guard.state.admin.select_prev(),
        (MenuItem::Admin, Char('v'), _) => {
            admin_action(&mut guard, AdminAction::ToggleVerified, &mut outgoing);
        }
        (MenuItem::Admin, Char('t'), _) => {
            admin_action(&mut guard, AdminAction::CycleRole, &mut outgoing);
        }
        (MenuItem::Admin, Char('d'), _) => {
            admin_action(&mut guard, AdminAction::Delete, &mut outgoing);
        }

        // Global
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }

    drop(guard);
    send(outgoing, network_requests).await;
}

async fn send(outgoing: Option<NetworkRequest>, network_requests: &mpsc::Sender<NetworkRequest>) {
    if let Some(request) = outgoing {
        let _ = network_requests.send(request).await;
    }
}

/// The form whose focused field is currently capturing keystrokes, if any.
fn editing_form(app: &mut App) -> Option<&mut FormState> {
    let state = &mut app.state;
    let form = match state.active_tab {
        MenuItem::Teams => {
            if let Some(form) = state.teams.create_form.as_mut() {
                form
            } else if state.teams.open_team.is_some() && state.teams.tab == TeamTab::Settings {
                &mut state.teams.settings_form
            } else {
                return None;
            }
        }
        MenuItem::Profile => &mut state.profile.form,
        _ => return None,
    };
    if form.editing { Some(form) } else { None }
}

fn handle_stat_editor_key(
    app: &mut App,
    key_event: KeyEvent,
    outgoing: &mut Option<NetworkRequest>,
) {
    let Some(tournament_id) = app.state.bracket.tournament.as_ref().map(|t| t.id) else {
        app.state.bracket.editor = None;
        return;
    };
    match key_event.code {
        KeyCode::Esc => app.state.bracket.editor = None,
        KeyCode::Tab => {
            if let Some(editor) = app.state.bracket.editor.as_mut() {
                editor.toggle_field();
            }
        }
        KeyCode::Backspace => {
            if let Some(editor) = app.state.bracket.editor.as_mut() {
                editor.backspace();
            }
        }
        KeyCode::Enter => {
            if let Some(editor) = app.state.bracket.editor.take() {
                let participant = editor.commit();
                *outgoing = Some(NetworkRequest::SaveBrStats { tournament_id, participant });
            }
        }
        Char(c) => {
            if let Some(editor) = app.state.bracket.editor.as_mut() {
                editor.push_char(c);
            }
        }
        _ => {}
    }
}

fn open_bracket(app: &mut App, tournament: Tournament, outgoing: &mut Option<NetworkRequest>) {
    app.state.bracket.target(tournament.clone());
    app.update_tab(MenuItem::Bracket);
    *outgoing = Some(NetworkRequest::LoadBracket { tournament });
}

fn decide_request(app: &mut App, accept: bool, outgoing: &mut Option<NetworkRequest>) {
    let session = app.state.session.clone();
    if !app.state.teams.owns_open_team(session.as_ref()) {
        app.state.status_line = Some("Only the owner can manage requests".to_owned());
        return;
    }
    if let (Some(team), Some(request_id)) =
        (app.state.teams.open_team.as_ref(), app.state.teams.selected_request_id())
    {
        *outgoing =
            Some(NetworkRequest::DecideJoinRequest { team_id: team.id, request_id, accept });
    }
}

fn admin_action(app: &mut App, action: AdminAction, outgoing: &mut Option<NetworkRequest>) {
    if !app.is_admin() {
        return;
    }
    if let Some(user) = app.state.admin.selected_user() {
        *outgoing = Some(NetworkRequest::AdminUserAction { user_id: user.id, action });
    }
}
