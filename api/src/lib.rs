pub mod bracket;
pub mod client;
pub mod wire;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of the platform wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct Tournament {
    pub id: u32,
    pub name: String,
    pub game: String,
    pub status: TournamentStatus,
    pub bracket_type: BracketType,
    pub participation: ParticipationType,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub max_participants: u32,
    pub registered_count: u32,
    pub prize_pool: Option<String>,
    /// Rules arrive as one newline-delimited blob; split into lines for display.
    pub rules: Vec<String>,
}

impl Tournament {
    pub fn slots_label(&self) -> String {
        format!("{}/{}", self.registered_count, self.max_participants)
    }
}

/// Tournament lifecycle as the backend reports it. The server mixes machine
/// tags ("registration_open") with display strings ("En cours", "Terminé"),
/// so parsing keeps an Other arm rather than guessing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TournamentStatus {
    #[default]
    RegistrationOpen,
    InProgress,
    Finished,
    Other(String),
}

impl TournamentStatus {
    pub fn parse(s: &str) -> Self {
        match s {
            "registration_open" | "Registration Open" => TournamentStatus::RegistrationOpen,
            "En cours" | "in_progress" => TournamentStatus::InProgress,
            "Terminé" | "finished" => TournamentStatus::Finished,
            other => TournamentStatus::Other(other.to_owned()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TournamentStatus::RegistrationOpen => "Registration Open",
            TournamentStatus::InProgress => "In Progress",
            TournamentStatus::Finished => "Finished",
            TournamentStatus::Other(s) => s.as_str(),
        }
    }

    pub fn is_live(&self) -> bool {
        *self == TournamentStatus::InProgress
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BracketType {
    #[default]
    SingleElimination,
    DoubleElimination,
    RoundRobin,
    BattleRoyale,
    Unknown,
}

impl BracketType {
    pub fn parse(s: &str) -> Self {
        match s {
            "Single Elimination" | "single_elimination" => BracketType::SingleElimination,
            "Double Elimination" | "double_elimination" => BracketType::DoubleElimination,
            "Round Robin" | "round_robin" => BracketType::RoundRobin,
            "Battle Royale" | "battle_royale" => BracketType::BattleRoyale,
            _ => BracketType::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BracketType::SingleElimination => "Single Elimination",
            BracketType::DoubleElimination => "Double Elimination",
            BracketType::RoundRobin => "Round Robin",
            BracketType::BattleRoyale => "Battle Royale",
            BracketType::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParticipationType {
    #[default]
    Team,
    Individual,
}

impl ParticipationType {
    pub fn parse(s: &str) -> Self {
        match s {
            "individual" | "solo" => ParticipationType::Individual,
            _ => ParticipationType::Team,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ParticipationType::Team => "Team",
            ParticipationType::Individual => "Individual",
        }
    }
}

/// One registered entrant of a tournament (a team or a lone player,
/// depending on the tournament's participation type).
#[derive(Debug, Clone, Default)]
pub struct Participant {
    pub id: u32,
    pub name: String,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TournamentDetail {
    pub tournament: Tournament,
    pub participants: Vec<Participant>,
}

// ---------------------------------------------------------------------------
// Bracket types — output of the normalizer in bracket.rs
// ---------------------------------------------------------------------------

/// One competitor slot inside a seed. Placeholder slots are named "TBD".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedTeam {
    pub id: Option<u32>,
    pub name: String,
    pub score: u32,
    pub winner: bool,
    pub avatar: Option<String>,
}

impl SeedTeam {
    pub fn tbd() -> Self {
        Self { id: None, name: "TBD".to_owned(), score: 0, winner: false, avatar: None }
    }

    pub fn is_tbd(&self) -> bool {
        self.name == "TBD"
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SeedStatus {
    #[default]
    Pending,
    Played,
}

/// One match slot in a bracket round. Placeholder seeds carry synthetic
/// negative ids so they never collide with server match ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Seed {
    pub id: i64,
    pub status: SeedStatus,
    pub teams: [SeedTeam; 2],
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BracketRound {
    pub title: String,
    pub seeds: Vec<Seed>,
}

/// Normalized elimination tree. `lower` is empty for single elimination.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EliminationBracket {
    pub upper: Vec<BracketRound>,
    pub lower: Vec<BracketRound>,
}

impl EliminationBracket {
    /// The tournament champion, read from the upper final's winner flag.
    pub fn champion(&self) -> Option<&SeedTeam> {
        bracket::champion(&self.upper)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupStanding {
    pub team_id: u32,
    pub team_name: String,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupTable {
    pub name: String,
    pub standings: Vec<GroupStanding>,
}

/// One entrant of a battle-royale leaderboard. Totals are summed server-side
/// across matches; the client recomputes them only in the admin edit flow.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrParticipant {
    pub participant_id: u32,
    pub name: String,
    pub image: Option<String>,
    pub total_kills: u32,
    pub total_placement_points: u32,
    pub total_points: u32,
    pub matches_played: u32,
}

impl BrParticipant {
    /// Re-derive the combined score after an inline stat edit.
    pub fn recompute_total(&mut self) {
        self.total_points = self.total_kills + self.total_placement_points;
    }
}

/// What a tournament's bracket endpoint yielded, keyed by bracket type.
/// `Pending` means the server has no matches yet — the caller must render a
/// "bracket not available yet" state, never an empty tree.
#[derive(Debug, Clone, PartialEq)]
pub enum BracketData {
    Pending,
    Elimination(EliminationBracket),
    Groups(Vec<GroupTable>),
    BattleRoyale(Vec<BrParticipant>),
}

// ---------------------------------------------------------------------------
// Teams
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct Team {
    pub id: u32,
    pub name: String,
    pub tag: String,
    pub description: String,
    pub logo: Option<String>,
    pub banner: Option<String>,
    pub owner_id: u32,
    pub tier: Option<String>,
    pub division: Option<String>,
    pub socials: Vec<SocialLink>,
}

#[derive(Debug, Clone, Default)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TeamStats {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub win_rate: f32,
}

#[derive(Debug, Clone, Default)]
pub struct TeamMember {
    pub user_id: u32,
    pub username: String,
    pub avatar: Option<String>,
    pub role: String,
}

impl TeamMember {
    /// Ownership is not a stored flag; it is derived from the team record.
    pub fn is_owner(&self, team: &Team) -> bool {
        self.user_id == team.owner_id
    }
}

#[derive(Debug, Clone, Default)]
pub struct JoinRequest {
    pub id: u32,
    pub user_id: u32,
    pub username: String,
    pub rank: Option<String>,
    pub region: Option<String>,
}

/// The editable slice of a team, as the settings tab sees it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamSettings {
    pub name: String,
    pub tag: String,
    pub description: String,
    pub tier: Option<String>,
    pub division: Option<String>,
}

/// The four team-detail payloads fetched together when a team page opens.
#[derive(Debug, Clone, Default)]
pub struct TeamDetail {
    pub stats: TeamStats,
    pub members: Vec<TeamMember>,
    pub requests: Vec<JoinRequest>,
    pub settings: TeamSettings,
}

/// Where the current user stands relative to teams — used to gate the
/// create/join actions on the team hub.
#[derive(Debug, Clone, Copy, Default)]
pub struct TeamInvolvement {
    pub owns_team: Option<u32>,
    pub member_of: Option<u32>,
    pub pending_request: Option<u32>,
}

impl TeamInvolvement {
    pub fn is_free_agent(&self) -> bool {
        self.owns_team.is_none() && self.member_of.is_none() && self.pending_request.is_none()
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Admin,
    Participant,
    #[default]
    Viewer,
}

impl UserRole {
    pub fn parse(s: &str) -> Self {
        match s {
            "admin" => UserRole::Admin,
            "participant" => UserRole::Participant,
            _ => UserRole::Viewer,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Participant => "participant",
            UserRole::Viewer => "viewer",
        }
    }

    /// Cycle order used by the admin table's role toggle.
    pub fn next(self) -> Self {
        match self {
            UserRole::Admin => UserRole::Participant,
            UserRole::Participant => UserRole::Viewer,
            UserRole::Viewer => UserRole::Admin,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct User {
    pub id: u32,
    pub username: String,
    pub email: String,
    pub bio: String,
    pub avatar: Option<String>,
    pub points: u32,
    pub rank: Option<String>,
    pub role: UserRole,
    pub is_verified: bool,
}

/// POST body for profile edits. Only the self-service fields travel.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    pub id: u32,
    pub username: String,
    pub email: String,
    pub bio: String,
}

#[derive(Debug, Clone, Default)]
pub struct GameTitle {
    pub id: u32,
    pub name: String,
}
