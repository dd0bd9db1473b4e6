use crate::state::network::LoadingState;
use arena_api::{
    BracketData, BrParticipant, GameTitle, Team, TeamDetail, TeamInvolvement, TeamSettings,
    Tournament, TournamentDetail, User, UserUpdate,
};
use crossterm::event::KeyEvent;

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadTournaments { user_id: Option<u32> },
    LoadTournamentDetail { id: u32 },
    LoadBracket { tournament: Tournament },
    LoadTeams { user_id: Option<u32> },
    LoadTeamDetail { team_id: u32 },
    DecideJoinRequest { team_id: u32, request_id: u32, accept: bool },
    SaveTeamSettings { team_id: u32, settings: TeamSettings },
    CreateTeam { owner_id: u32, name: String, tag: String, description: String },
    DeleteTeam { team_id: u32 },
    LoadProfile { user_id: u32 },
    SaveProfile { update: UserUpdate },
    UploadAvatar { user_id: u32, path: String },
    LoadUsers,
    AdminUserAction { user_id: u32, action: AdminAction },
    SaveBrStats { tournament_id: u32, participant: BrParticipant },
    LoadGames,
}

/// Admin table actions, translated to backend action strings by the worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAction {
    ToggleVerified,
    CycleRole,
    Delete,
}

impl AdminAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminAction::ToggleVerified => "toggle_verified",
            AdminAction::CycleRole => "cycle_type",
            AdminAction::Delete => "delete",
        }
    }
}

/// Which screen a request belongs to. Errors carry this so exactly one
/// screen shows the failure and drops its now-stale data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestScope {
    Tournaments,
    TournamentDetail,
    Bracket,
    Teams,
    TeamDetail,
    Profile,
    Admin,
    /// Fire-and-forget mutations: the failure is shown, data is kept.
    Mutation,
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    TournamentsLoaded { tournaments: Vec<Tournament>, registered: Vec<u32> },
    TournamentDetailLoaded { detail: TournamentDetail },
    BracketLoaded { tournament_id: u32, data: BracketData },
    TeamsLoaded { teams: Vec<Team>, involvement: Option<TeamInvolvement> },
    TeamDetailLoaded { team_id: u32, detail: TeamDetail },
    JoinRequestDecided { team_id: u32 },
    TeamSettingsSaved { team_id: u32 },
    TeamCreated { team_id: u32 },
    TeamDeleted,
    ProfileLoaded { user: User },
    ProfileSaved { user: User },
    AvatarUploaded { user_id: u32, avatar_url: String },
    UsersLoaded { users: Vec<User> },
    UserActionApplied,
    BrStatsSaved { tournament_id: u32 },
    GamesLoaded { games: Vec<GameTitle> },
    Error { scope: RequestScope, message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
    /// Periodic nudge from the refresher; the UI loop decides whether the
    /// open bracket is worth re-fetching.
    RefreshTick,
}
