use crate::app::MenuItem;
use crate::state::session::Session;
use arena_api::{
    BracketData, BrParticipant, GameTitle, Team, TeamDetail, TeamInvolvement, TeamSettings,
    Tournament, TournamentDetail, User, UserUpdate,
};
use std::collections::HashSet;

// ---------------------------------------------------------------------------
// Sub-tab enums — closed sets, no string tags
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TournamentTab {
    #[default]
    Overview,
    Participants,
    Bracket,
}

impl TournamentTab {
    pub fn label(&self) -> &'static str {
        match self {
            TournamentTab::Overview => "Overview",
            TournamentTab::Participants => "Participants",
            TournamentTab::Bracket => "Bracket",
        }
    }

    pub fn next(self) -> Self {
        match self {
            TournamentTab::Overview => TournamentTab::Participants,
            TournamentTab::Participants => TournamentTab::Bracket,
            TournamentTab::Bracket => TournamentTab::Overview,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TeamTab {
    #[default]
    Overview,
    Members,
    Requests,
    Settings,
}

impl TeamTab {
    pub fn label(&self) -> &'static str {
        match self {
            TeamTab::Overview => "Overview",
            TeamTab::Members => "Members",
            TeamTab::Requests => "Requests",
            TeamTab::Settings => "Settings",
        }
    }

    pub fn next(self) -> Self {
        match self {
            TeamTab::Overview => TeamTab::Members,
            TeamTab::Members => TeamTab::Requests,
            TeamTab::Requests => TeamTab::Settings,
            TeamTab::Settings => TeamTab::Overview,
        }
    }
}

// ---------------------------------------------------------------------------
// Form editing — shared by settings, profile and create-team screens
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
}

/// A linear field editor: focus moves with j/k or Tab, `editing` routes
/// keystrokes into the focused value.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub fields: Vec<FormField>,
    pub focused: usize,
    pub editing: bool,
}

impl FormState {
    pub fn new(fields: &[(&'static str, String)]) -> Self {
        Self {
            fields: fields
                .iter()
                .map(|(label, value)| FormField { label: *label, value: value.clone() })
                .collect(),
            focused: 0,
            editing: false,
        }
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
        }
    }

    pub fn begin_edit(&mut self) {
        self.editing = !self.fields.is_empty();
    }

    pub fn end_edit(&mut self) {
        self.editing = false;
    }

    pub fn push_char(&mut self, c: char) {
        if self.editing
            && let Some(field) = self.fields.get_mut(self.focused)
        {
            field.value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if self.editing
            && let Some(field) = self.fields.get_mut(self.focused)
        {
            field.value.pop();
        }
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.value.as_str()).unwrap_or("")
    }

    fn trimmed(&self, index: usize) -> String {
        self.value(index).trim().to_owned()
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

// ---------------------------------------------------------------------------
// Tournaments screen
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct TournamentsState {
    pub tournaments: Vec<Tournament>,
    /// Ids of tournaments the signed-in user is registered in.
    pub registered: HashSet<u32>,
    /// Game name filter, cycled through the platform's game list.
    pub game_filter: Option<String>,
    pub selected: usize,
    pub detail: Option<TournamentDetail>,
    pub detail_tab: TournamentTab,
    pub error: Option<String>,
}

impl TournamentsState {
    pub fn on_loaded(&mut self, tournaments: Vec<Tournament>, registered: Vec<u32>) {
        self.error = None;
        self.tournaments = tournaments;
        self.registered = registered.into_iter().collect();
        self.selected = self.selected.min(self.visible().len().saturating_sub(1));
    }

    /// A failed list fetch leaves nothing stale on screen.
    pub fn on_error(&mut self, message: String) {
        self.tournaments.clear();
        self.registered.clear();
        self.detail = None;
        self.selected = 0;
        self.error = Some(message);
    }

    pub fn on_detail_loaded(&mut self, detail: TournamentDetail) {
        self.error = None;
        self.detail_tab = TournamentTab::Overview;
        self.detail = Some(detail);
    }

    pub fn on_detail_error(&mut self, message: String) {
        self.detail = None;
        self.error = Some(message);
    }

    /// The list as shown: every tournament, or only the filtered game's.
    pub fn visible(&self) -> Vec<&Tournament> {
        self.tournaments
            .iter()
            .filter(|t| self.game_filter.as_deref().is_none_or(|g| t.game == g))
            .collect()
    }

    /// Cycle the game filter: all → first game → ... → last game → all.
    pub fn cycle_game_filter(&mut self, games: &[GameTitle]) {
        let next = match &self.game_filter {
            None => games.first().map(|g| g.name.clone()),
            Some(current) => games
                .iter()
                .position(|g| g.name == *current)
                .and_then(|i| games.get(i + 1))
                .map(|g| g.name.clone()),
        };
        self.game_filter = next;
        self.selected = 0;
    }

    pub fn select_next(&mut self) {
        let max = self.visible().len().saturating_sub(1);
        if self.selected < max {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_tournament(&self) -> Option<&Tournament> {
        self.visible().get(self.selected).copied()
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
        self.detail_tab = TournamentTab::Overview;
    }

    pub fn cycle_detail_tab(&mut self) {
        self.detail_tab = self.detail_tab.next();
    }
}

// ---------------------------------------------------------------------------
// Bracket screen
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatField {
    Kills,
    Placement,
}

/// Inline editor for one battle-royale participant's totals (admin only).
/// The draft is committed as a whole: parse the focused input, re-derive
/// `total_points`, then hand the participant back for the save POST.
#[derive(Debug, Clone)]
pub struct StatEditor {
    pub draft: BrParticipant,
    pub field: StatField,
    pub input: String,
}

impl StatEditor {
    pub fn begin(participant: BrParticipant) -> Self {
        let input = participant.total_kills.to_string();
        Self { draft: participant, field: StatField::Kills, input }
    }

    pub fn toggle_field(&mut self) {
        self.apply_input();
        self.field = match self.field {
            StatField::Kills => StatField::Placement,
            StatField::Placement => StatField::Kills,
        };
        self.input = match self.field {
            StatField::Kills => self.draft.total_kills.to_string(),
            StatField::Placement => self.draft.total_placement_points.to_string(),
        };
    }

    pub fn push_char(&mut self, c: char) {
        if c.is_ascii_digit() && self.input.len() < 6 {
            self.input.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    fn apply_input(&mut self) {
        if let Ok(value) = self.input.trim().parse::<u32>() {
            match self.field {
                StatField::Kills => self.draft.total_kills = value,
                StatField::Placement => self.draft.total_placement_points = value,
            }
        }
    }

    pub fn commit(mut self) -> BrParticipant {
        self.apply_input();
        self.draft.recompute_total();
        self.draft
    }
}

#[derive(Debug, Default)]
pub struct BracketViewState {
    /// The tournament whose bracket is (being) shown.
    pub tournament: Option<Tournament>,
    pub data: Option<BracketData>,
    pub error: Option<String>,
    pub selected_round: usize,
    pub selected_seed: usize,
    pub group_index: usize,
    pub selected_row: usize,
    pub editor: Option<StatEditor>,
    pub last_refreshed: Option<String>,
}

impl BracketViewState {
    /// Point the screen at a tournament before its data arrives.
    pub fn target(&mut self, tournament: Tournament) {
        if self.tournament.as_ref().map(|t| t.id) != Some(tournament.id) {
            self.data = None;
            self.selected_round = 0;
            self.selected_seed = 0;
            self.group_index = 0;
            self.selected_row = 0;
            self.editor = None;
        }
        self.error = None;
        self.tournament = Some(tournament);
    }

    pub fn on_loaded(&mut self, tournament_id: u32, data: BracketData, stamp: String) {
        if self.tournament.as_ref().map(|t| t.id) != Some(tournament_id) {
            return; // stale response for a bracket we navigated away from
        }
        self.error = None;
        self.data = Some(data);
        self.last_refreshed = Some(stamp);
        self.clamp_selection();
    }

    pub fn on_error(&mut self, message: String) {
        self.data = None;
        self.editor = None;
        self.error = Some(message);
    }

    pub fn next_round(&mut self) {
        if self.selected_round + 1 < self.upper_round_count() {
            self.selected_round += 1;
            self.selected_seed = 0;
        }
    }

    pub fn prev_round(&mut self) {
        if self.selected_round > 0 {
            self.selected_round -= 1;
            self.selected_seed = 0;
        }
    }

    pub fn seed_down(&mut self) {
        let max = self.seeds_in_selected_round().saturating_sub(1);
        if self.selected_seed < max {
            self.selected_seed += 1;
        }
    }

    pub fn seed_up(&mut self) {
        self.selected_seed = self.selected_seed.saturating_sub(1);
    }

    pub fn cycle_group(&mut self) {
        if let Some(BracketData::Groups(groups)) = &self.data
            && !groups.is_empty()
        {
            self.group_index = (self.group_index + 1) % groups.len();
            self.selected_row = 0;
        }
    }

    pub fn row_down(&mut self) {
        let max = self.rows_in_view().saturating_sub(1);
        if self.selected_row < max {
            self.selected_row += 1;
        }
    }

    pub fn row_up(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    /// Open the inline stat editor on the highlighted leaderboard row.
    pub fn begin_edit(&mut self) -> bool {
        if let Some(BracketData::BattleRoyale(participants)) = &self.data
            && let Some(p) = participants.get(self.selected_row)
        {
            self.editor = Some(StatEditor::begin(p.clone()));
            return true;
        }
        false
    }

    fn upper_round_count(&self) -> usize {
        match &self.data {
            Some(BracketData::Elimination(b)) => b.upper.len(),
            _ => 0,
        }
    }

    fn seeds_in_selected_round(&self) -> usize {
        match &self.data {
            Some(BracketData::Elimination(b)) => {
                b.upper.get(self.selected_round).map(|r| r.seeds.len()).unwrap_or(0)
            }
            _ => 0,
        }
    }

    fn rows_in_view(&self) -> usize {
        match &self.data {
            Some(BracketData::Groups(groups)) => {
                groups.get(self.group_index).map(|g| g.standings.len()).unwrap_or(0)
            }
            Some(BracketData::BattleRoyale(participants)) => participants.len(),
            _ => 0,
        }
    }

    fn clamp_selection(&mut self) {
        self.selected_round = self.selected_round.min(self.upper_round_count().saturating_sub(1));
        self.selected_seed = self.selected_seed.min(self.seeds_in_selected_round().saturating_sub(1));
        if let Some(BracketData::Groups(groups)) = &self.data {
            self.group_index = self.group_index.min(groups.len().saturating_sub(1));
        }
        self.selected_row = self.selected_row.min(self.rows_in_view().saturating_sub(1));
    }
}

// ---------------------------------------------------------------------------
// Teams screen
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct TeamsState {
    pub teams: Vec<Team>,
    pub selected: usize,
    pub involvement: Option<TeamInvolvement>,
    /// The team whose detail page is open.
    pub open_team: Option<Team>,
    pub detail: Option<TeamDetail>,
    pub tab: TeamTab,
    pub selected_request: usize,
    pub settings_form: FormState,
    pub create_form: Option<FormState>,
    pub error: Option<String>,
    pub notice: Option<String>,
}

impl TeamsState {
    pub fn on_loaded(&mut self, teams: Vec<Team>, involvement: Option<TeamInvolvement>) {
        self.error = None;
        self.teams = teams;
        if involvement.is_some() {
            self.involvement = involvement;
        }
        self.selected = self.selected.min(self.teams.len().saturating_sub(1));
    }

    pub fn on_error(&mut self, message: String) {
        self.teams.clear();
        self.open_team = None;
        self.detail = None;
        self.selected = 0;
        self.error = Some(message);
    }

    pub fn open_detail(&mut self, team: Team) {
        self.tab = TeamTab::Overview;
        self.detail = None;
        self.selected_request = 0;
        self.notice = None;
        self.open_team = Some(team);
    }

    pub fn close_detail(&mut self) {
        self.open_team = None;
        self.detail = None;
        self.notice = None;
    }

    pub fn on_detail_loaded(&mut self, team_id: u32, detail: TeamDetail) {
        if self.open_team.as_ref().map(|t| t.id) != Some(team_id) {
            return;
        }
        self.error = None;
        self.settings_form = FormState::new(&[
            ("Name", detail.settings.name.clone()),
            ("Tag", detail.settings.tag.clone()),
            ("Description", detail.settings.description.clone()),
            ("Tier", detail.settings.tier.clone().unwrap_or_default()),
            ("Division", detail.settings.division.clone().unwrap_or_default()),
        ]);
        self.selected_request = self.selected_request.min(detail.requests.len().saturating_sub(1));
        self.detail = Some(detail);
    }

    pub fn on_detail_error(&mut self, message: String) {
        self.detail = None;
        self.error = Some(message);
    }

    pub fn select_next(&mut self) {
        let max = self.teams.len().saturating_sub(1);
        if self.selected < max {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_team(&self) -> Option<&Team> {
        self.teams.get(self.selected)
    }

    pub fn request_down(&mut self) {
        let count = self.detail.as_ref().map(|d| d.requests.len()).unwrap_or(0);
        if self.selected_request + 1 < count {
            self.selected_request += 1;
        }
    }

    pub fn request_up(&mut self) {
        self.selected_request = self.selected_request.saturating_sub(1);
    }

    pub fn selected_request_id(&self) -> Option<u32> {
        self.detail.as_ref()?.requests.get(self.selected_request).map(|r| r.id)
    }

    /// Current settings-form content as the payload to POST.
    pub fn settings_from_form(&self) -> TeamSettings {
        TeamSettings {
            name: self.settings_form.trimmed(0),
            tag: self.settings_form.trimmed(1),
            description: self.settings_form.trimmed(2),
            tier: non_empty(self.settings_form.trimmed(3)),
            division: non_empty(self.settings_form.trimmed(4)),
        }
    }

    pub fn start_create_form(&mut self) {
        self.create_form = Some(FormState::new(&[
            ("Name", String::new()),
            ("Tag", String::new()),
            ("Description", String::new()),
        ]));
    }

    /// (name, tag, description) if the form is open and the name is non-blank.
    pub fn create_form_values(&self) -> Option<(String, String, String)> {
        let form = self.create_form.as_ref()?;
        let name = form.trimmed(0);
        if name.is_empty() {
            return None;
        }
        Some((name, form.trimmed(1), form.trimmed(2)))
    }

    /// Whether the signed-in user owns the open team.
    pub fn owns_open_team(&self, session: Option<&Session>) -> bool {
        match (&self.open_team, session) {
            (Some(team), Some(session)) => team.owner_id == session.user_id,
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Profile screen
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ProfileState {
    pub user: Option<User>,
    pub form: FormState,
    pub error: Option<String>,
    pub notice: Option<String>,
}

impl ProfileState {
    pub fn on_loaded(&mut self, user: User) {
        self.error = None;
        self.form = FormState::new(&[
            ("Username", user.username.clone()),
            ("Email", user.email.clone()),
            ("Bio", user.bio.clone()),
            ("Avatar file", String::new()),
        ]);
        self.user = Some(user);
    }

    pub fn on_error(&mut self, message: String) {
        self.user = None;
        self.error = Some(message);
    }

    pub fn update_from_form(&self, user_id: u32) -> UserUpdate {
        UserUpdate {
            id: user_id,
            username: self.form.trimmed(0),
            email: self.form.trimmed(1),
            bio: self.form.trimmed(2),
        }
    }

    pub fn avatar_path(&self) -> Option<String> {
        non_empty(self.form.trimmed(3))
    }
}

// ---------------------------------------------------------------------------
// Admin screen
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AdminState {
    pub users: Vec<User>,
    pub selected: usize,
    pub error: Option<String>,
    pub notice: Option<String>,
}

impl AdminState {
    pub fn on_loaded(&mut self, users: Vec<User>) {
        self.error = None;
        self.users = users;
        self.selected = self.selected.min(self.users.len().saturating_sub(1));
    }

    pub fn on_error(&mut self, message: String) {
        self.users.clear();
        self.selected = 0;
        self.error = Some(message);
    }

    pub fn select_next(&mut self) {
        let max = self.users.len().saturating_sub(1);
        if self.selected < max {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_user(&self) -> Option<&User> {
        self.users.get(self.selected)
    }
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub session: Option<Session>,
    pub games: Vec<GameTitle>,
    /// One-line status for mutation outcomes, drawn under the tab bar.
    pub status_line: Option<String>,
    pub tournaments: TournamentsState,
    pub bracket: BracketViewState,
    pub teams: TeamsState,
    pub profile: ProfileState,
    pub admin: AdminState,
}

impl AppState {
    pub fn new() -> Self {
        Self { session: Session::load(), ..Self::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_api::{BracketRound, EliminationBracket, GroupStanding, GroupTable, Seed, SeedTeam};

    #[test]
    fn form_routes_keystrokes_into_the_focused_field() {
        let mut form = FormState::new(&[("Name", "Old".into()), ("Tag", String::new())]);
        form.push_char('x');
        assert_eq!(form.value(0), "Old", "no editing before begin_edit");

        form.begin_edit();
        form.push_char('!');
        form.backspace();
        form.backspace();
        assert_eq!(form.value(0), "Ol");

        form.end_edit();
        form.focus_next();
        form.begin_edit();
        form.push_char('O');
        form.push_char('W');
        assert_eq!(form.value(1), "OW");

        form.focus_next();
        assert_eq!(form.focused, 0, "focus wraps");
    }

    #[test]
    fn stat_editor_commit_recomputes_the_total() {
        let participant = BrParticipant {
            participant_id: 3,
            name: "Drift".into(),
            total_kills: 5,
            total_placement_points: 7,
            total_points: 12,
            ..Default::default()
        };

        let mut editor = StatEditor::begin(participant);
        editor.input = "14".into();
        editor.toggle_field();
        assert_eq!(editor.field, StatField::Placement);
        editor.input = "22".into();

        let edited = editor.commit();
        assert_eq!(edited.total_kills, 14);
        assert_eq!(edited.total_placement_points, 22);
        assert_eq!(edited.total_points, 36);
    }

    #[test]
    fn stat_editor_ignores_non_digit_input() {
        let mut editor = StatEditor::begin(BrParticipant::default());
        editor.input.clear();
        editor.push_char('x');
        editor.push_char('4');
        assert_eq!(editor.input, "4");
    }

    #[test]
    fn game_filter_cycles_back_to_all() {
        let mut state = TournamentsState::default();
        state.on_loaded(
            vec![
                Tournament { id: 1, game: "Valorant".into(), ..Default::default() },
                Tournament { id: 2, game: "Rocket League".into(), ..Default::default() },
            ],
            vec![],
        );
        let games = vec![
            GameTitle { id: 1, name: "Valorant".into() },
            GameTitle { id: 2, name: "Rocket League".into() },
        ];

        assert_eq!(state.visible().len(), 2);
        state.cycle_game_filter(&games);
        assert_eq!(state.game_filter.as_deref(), Some("Valorant"));
        assert_eq!(state.visible().len(), 1);
        assert_eq!(state.selected_tournament().map(|t| t.id), Some(1));
        state.cycle_game_filter(&games);
        assert_eq!(state.game_filter.as_deref(), Some("Rocket League"));
        state.cycle_game_filter(&games);
        assert!(state.game_filter.is_none(), "filter wraps back to all games");
    }

    #[test]
    fn tournaments_error_clears_stale_data() {
        let mut state = TournamentsState::default();
        state.on_loaded(vec![Tournament { id: 1, ..Default::default() }], vec![1]);
        assert_eq!(state.tournaments.len(), 1);

        state.on_error("HTTP 500".into());
        assert!(state.tournaments.is_empty(), "no stale rows after a failure");
        assert!(state.registered.is_empty());
        assert_eq!(state.error.as_deref(), Some("HTTP 500"));
    }

    #[test]
    fn bracket_error_clears_the_tree() {
        let mut state = BracketViewState::default();
        state.target(Tournament { id: 9, ..Default::default() });
        state.on_loaded(9, BracketData::Pending, "12:00".into());
        assert!(state.data.is_some());

        state.on_error("timed out".into());
        assert!(state.data.is_none());
        assert_eq!(state.error.as_deref(), Some("timed out"));
    }

    #[test]
    fn bracket_ignores_responses_for_other_tournaments() {
        let mut state = BracketViewState::default();
        state.target(Tournament { id: 9, ..Default::default() });
        state.on_loaded(4, BracketData::Pending, "12:00".into());
        assert!(state.data.is_none(), "stale tournament response must be dropped");
    }

    #[test]
    fn bracket_navigation_stays_in_bounds() {
        let seed = Seed { id: 1, teams: [SeedTeam::tbd(), SeedTeam::tbd()], ..Default::default() };
        let bracket = EliminationBracket {
            upper: vec![
                BracketRound { title: "Semi Finals".into(), seeds: vec![seed.clone(), seed.clone()] },
                BracketRound { title: "Finals".into(), seeds: vec![seed] },
            ],
            lower: Vec::new(),
        };
        let mut state = BracketViewState::default();
        state.target(Tournament { id: 2, ..Default::default() });
        state.on_loaded(2, BracketData::Elimination(bracket), "12:00".into());

        state.seed_down();
        state.seed_down();
        assert_eq!(state.selected_seed, 1, "clamped to the round's seed count");
        state.next_round();
        assert_eq!(state.selected_round, 1);
        assert_eq!(state.selected_seed, 0, "seed selection resets on round change");
        state.next_round();
        assert_eq!(state.selected_round, 1, "no round past the final");
    }

    #[test]
    fn group_cycling_wraps_and_resets_the_row() {
        let table = |name: &str| GroupTable {
            name: name.into(),
            standings: vec![GroupStanding::default(), GroupStanding::default()],
        };
        let mut state = BracketViewState::default();
        state.target(Tournament { id: 3, ..Default::default() });
        state.on_loaded(3, BracketData::Groups(vec![table("A"), table("B")]), "12:00".into());

        state.row_down();
        assert_eq!(state.selected_row, 1);
        state.cycle_group();
        assert_eq!(state.group_index, 1);
        assert_eq!(state.selected_row, 0);
        state.cycle_group();
        assert_eq!(state.group_index, 0);
    }

    #[test]
    fn settings_form_round_trips_through_the_payload() {
        let mut teams = TeamsState::default();
        teams.open_detail(Team { id: 7, ..Default::default() });
        teams.on_detail_loaded(
            7,
            TeamDetail {
                settings: TeamSettings {
                    name: "Night Owls".into(),
                    tag: "OWL".into(),
                    description: "late shift".into(),
                    tier: Some("B".into()),
                    division: None,
                },
                ..Default::default()
            },
        );

        // Untouched form reproduces exactly what was fetched.
        let payload = teams.settings_from_form();
        assert_eq!(payload.name, "Night Owls");
        assert_eq!(payload.tier.as_deref(), Some("B"));
        assert!(payload.division.is_none(), "blank optional fields stay None");
    }

    #[test]
    fn create_form_requires_a_name() {
        let mut teams = TeamsState::default();
        teams.start_create_form();
        assert!(teams.create_form_values().is_none());

        if let Some(form) = teams.create_form.as_mut() {
            form.begin_edit();
            for c in "Owls".chars() {
                form.push_char(c);
            }
        }
        let (name, tag, desc) = teams.create_form_values().expect("named form submits");
        assert_eq!(name, "Owls");
        assert!(tag.is_empty());
        assert!(desc.is_empty());
    }
}
