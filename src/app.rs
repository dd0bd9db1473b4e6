use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use crate::state::messages::{NetworkRequest, RequestScope};
use crate::state::network::refresh_stamp;
use arena_api::{
    BracketData, GameTitle, Team, TeamDetail, TeamInvolvement, Tournament, TournamentDetail,
    TournamentStatus, User,
};
use log::warn;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Tournaments,
    Bracket,
    Teams,
    Profile,
    Admin,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new() -> Self {
        let settings = AppSettings::load();

        let app = Self { state: AppState::new(), settings };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    pub fn user_id(&self) -> Option<u32> {
        self.state.session.as_ref().map(|s| s.user_id)
    }

    pub fn is_admin(&self) -> bool {
        self.state.session.as_ref().map(|s| s.is_admin()).unwrap_or(false)
    }

    // -----------------------------------------------------------------------
    // Network response handlers — called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_tournaments_loaded(&mut self, tournaments: Vec<Tournament>, registered: Vec<u32>) {
        self.state.tournaments.on_loaded(tournaments, registered);
    }

    pub fn on_tournament_detail_loaded(&mut self, detail: TournamentDetail) {
        self.state.tournaments.on_detail_loaded(detail);
    }

    pub fn on_bracket_loaded(&mut self, tournament_id: u32, data: BracketData) {
        self.state.bracket.on_loaded(tournament_id, data, refresh_stamp());
    }

    pub fn on_teams_loaded(&mut self, teams: Vec<Team>, involvement: Option<TeamInvolvement>) {
        self.state.teams.on_loaded(teams, involvement);
    }

    pub fn on_team_detail_loaded(&mut self, team_id: u32, detail: TeamDetail) {
        self.state.teams.on_detail_loaded(team_id, detail);
    }

    pub fn on_join_request_decided(&mut self) {
        self.state.status_line = Some("Join request processed".to_owned());
    }

    pub fn on_team_settings_saved(&mut self) {
        self.state.status_line = Some("Team settings saved".to_owned());
    }

    pub fn on_team_created(&mut self) {
        self.state.teams.create_form = None;
        self.state.status_line = Some("Team created".to_owned());
    }

    pub fn on_team_deleted(&mut self) {
        self.state.teams.close_detail();
        self.state.status_line = Some("Team deleted".to_owned());
    }

    pub fn on_profile_loaded(&mut self, user: User) {
        self.state.profile.on_loaded(user);
    }

    /// Profile edits round-trip through the server; the echoed user is the
    /// truth and the cached session is patched to match (single writer).
    pub fn on_profile_saved(&mut self, user: User) {
        if let Some(session) = self.state.session.as_mut() {
            session.patch_from_user(&user);
            if let Err(e) = session.save() {
                warn!("could not persist session: {e}");
            }
        }
        self.state.profile.on_loaded(user);
        self.state.status_line = Some("Profile saved".to_owned());
    }

    pub fn on_avatar_uploaded(&mut self, user_id: u32, avatar_url: String) {
        if let Some(user) = self.state.profile.user.as_mut()
            && user.id == user_id
        {
            user.avatar = Some(avatar_url.clone());
        }
        if let Some(session) = self.state.session.as_mut()
            && session.user_id == user_id
        {
            session.avatar_url = Some(avatar_url);
            if let Err(e) = session.save() {
                warn!("could not persist session: {e}");
            }
        }
        self.state.status_line = Some("Avatar uploaded".to_owned());
    }

    pub fn on_users_loaded(&mut self, users: Vec<User>) {
        self.state.admin.on_loaded(users);
    }

    pub fn on_user_action_applied(&mut self) {
        self.state.status_line = Some("User updated".to_owned());
    }

    pub fn on_br_stats_saved(&mut self) {
        self.state.bracket.editor = None;
        self.state.status_line = Some("Leaderboard stats saved".to_owned());
    }

    pub fn on_games_loaded(&mut self, games: Vec<GameTitle>) {
        self.state.games = games;
    }

    /// Route a failure to its screen so only that screen shows the error and
    /// drops its stale data. Mutation failures keep data and land in the
    /// status line.
    pub fn on_error(&mut self, scope: RequestScope, message: String) {
        match scope {
            RequestScope::Tournaments => self.state.tournaments.on_error(message),
            RequestScope::TournamentDetail => self.state.tournaments.on_detail_error(message),
            RequestScope::Bracket => self.state.bracket.on_error(message),
            RequestScope::Teams => self.state.teams.on_error(message),
            RequestScope::TeamDetail => self.state.teams.on_detail_error(message),
            RequestScope::Profile => self.state.profile.on_error(message),
            RequestScope::Admin => self.state.admin.on_error(message),
            RequestScope::Mutation => {
                self.state.status_line = Some(format!("Action failed: {message}"));
            }
        }
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
        self.state.status_line = None;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    /// The fetch that fills the given tab, if it has nothing yet. Used on
    /// tab switches so every screen loads on first visit.
    pub fn fetch_for_tab(&self, tab: MenuItem) -> Option<NetworkRequest> {
        match tab {
            MenuItem::Tournaments if self.state.tournaments.tournaments.is_empty() => {
                Some(NetworkRequest::LoadTournaments { user_id: self.user_id() })
            }
            MenuItem::Teams if self.state.teams.teams.is_empty() => {
                Some(NetworkRequest::LoadTeams { user_id: self.user_id() })
            }
            MenuItem::Profile if self.state.profile.user.is_none() => {
                self.user_id().map(|user_id| NetworkRequest::LoadProfile { user_id })
            }
            MenuItem::Admin if self.is_admin() && self.state.admin.users.is_empty() => {
                Some(NetworkRequest::LoadUsers)
            }
            _ => None,
        }
    }

    /// The manual retry (`R`) re-issues whichever fetch feeds the active
    /// screen. Mutations are not replayed — the user redoes the action.
    pub fn retry_request(&self) -> Option<NetworkRequest> {
        match self.state.active_tab {
            MenuItem::Tournaments => match &self.state.tournaments.detail {
                Some(detail) => {
                    Some(NetworkRequest::LoadTournamentDetail { id: detail.tournament.id })
                }
                None => Some(NetworkRequest::LoadTournaments { user_id: self.user_id() }),
            },
            MenuItem::Bracket => self
                .state
                .bracket
                .tournament
                .clone()
                .map(|tournament| NetworkRequest::LoadBracket { tournament }),
            MenuItem::Teams => match &self.state.teams.open_team {
                Some(team) => Some(NetworkRequest::LoadTeamDetail { team_id: team.id }),
                None => Some(NetworkRequest::LoadTeams { user_id: self.user_id() }),
            },
            MenuItem::Profile => {
                self.user_id().map(|user_id| NetworkRequest::LoadProfile { user_id })
            }
            MenuItem::Admin => Some(NetworkRequest::LoadUsers),
            MenuItem::Help => None,
        }
    }

    /// Periodic refresh: only the open bracket of a live tournament is worth
    /// re-fetching in the background.
    pub fn refresh_request(&self) -> Option<NetworkRequest> {
        if self.state.active_tab != MenuItem::Bracket {
            return None;
        }
        let tournament = self.state.bracket.tournament.as_ref()?;
        if tournament.status != TournamentStatus::InProgress {
            return None;
        }
        // Don't yank the rug out from under an open stat editor.
        if self.state.bracket.editor.is_some() {
            return None;
        }
        Some(NetworkRequest::LoadBracket { tournament: tournament.clone() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_land_on_their_own_screen_only() {
        let mut app = App { settings: AppSettings::default(), state: AppState::default() };
        app.on_tournaments_loaded(vec![Tournament { id: 1, ..Default::default() }], vec![]);
        app.on_users_loaded(vec![User { id: 1, ..Default::default() }]);

        app.on_error(RequestScope::Admin, "boom".into());
        assert!(app.state.admin.users.is_empty());
        assert_eq!(app.state.admin.error.as_deref(), Some("boom"));
        assert_eq!(app.state.tournaments.tournaments.len(), 1, "other screens untouched");
    }

    #[test]
    fn mutation_errors_keep_data_and_use_the_status_line() {
        let mut app = App { settings: AppSettings::default(), state: AppState::default() };
        app.on_teams_loaded(vec![Team { id: 1, ..Default::default() }], None);

        app.on_error(RequestScope::Mutation, "rejected".into());
        assert_eq!(app.state.teams.teams.len(), 1);
        assert_eq!(app.state.status_line.as_deref(), Some("Action failed: rejected"));
    }

    #[test]
    fn refresh_only_targets_live_brackets() {
        let mut app = App { settings: AppSettings::default(), state: AppState::default() };
        app.state.active_tab = MenuItem::Bracket;
        assert!(app.refresh_request().is_none(), "no tournament, no refresh");

        app.state.bracket.target(Tournament {
            id: 4,
            status: TournamentStatus::Finished,
            ..Default::default()
        });
        assert!(app.refresh_request().is_none(), "finished brackets are static");

        app.state.bracket.target(Tournament {
            id: 5,
            status: TournamentStatus::InProgress,
            ..Default::default()
        });
        assert!(matches!(
            app.refresh_request(),
            Some(NetworkRequest::LoadBracket { tournament }) if tournament.id == 5
        ));
    }
}
