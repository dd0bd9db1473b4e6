/// Raw wire types for the Arena platform's PHP backend — serde shapes only.
/// Every field is optional or defaulted: the backend omits keys freely and a
/// missing field must become a mapped default, not a deserialize failure.
/// Mapping to the clean domain types lives in client.rs and bracket.rs.
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Response envelope
// ---------------------------------------------------------------------------

/// Standard platform envelope: `{"success": bool, "message": ..., "data": ...}`.
#[derive(Debug, Deserialize, Default)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

// ---------------------------------------------------------------------------
// Tournaments
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawTournament {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub game: Option<String>,
    pub status: Option<String>,
    pub bracket_type: Option<String>,
    pub participation_type: Option<String>,
    pub start_date: Option<String>, // "YYYY-MM-DD"
    pub end_date: Option<String>,
    pub max_participants: Option<u32>,
    pub registered_count: Option<u32>,
    pub prize_pool: Option<String>,
    /// Newline-delimited rules text.
    pub rules: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawTournamentDetail {
    pub tournament: Option<RawTournament>,
    #[serde(default)]
    pub participants: Vec<RawParticipant>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawParticipant {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub avatar: Option<String>,
}

// ---------------------------------------------------------------------------
// Brackets
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default)]
pub struct RawBracketResponse {
    pub total_rounds: Option<u32>,
    #[serde(default)]
    pub matches: Vec<RawBracketMatch>,
    /// Double elimination only: lower-bracket matches, absent otherwise.
    #[serde(default)]
    pub lower_matches: Vec<RawBracketMatch>,
    pub lower_rounds: Option<u32>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawBracketMatch {
    pub id: Option<i64>,
    /// 1-based round number.
    pub round: Option<u32>,
    /// 0-based slot within the round.
    pub position: Option<u32>,
    #[serde(default)]
    pub teams: Vec<RawSeedTeam>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawSeedTeam {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub score: Option<u32>,
    pub winner: Option<bool>,
    pub avatar: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawGroupsResponse {
    #[serde(default)]
    pub groups: Vec<RawGroup>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawGroup {
    pub name: Option<String>,
    #[serde(default)]
    pub standings: Vec<RawStanding>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawStanding {
    pub team_id: Option<u32>,
    pub team_name: Option<String>,
    pub wins: Option<u32>,
    pub draws: Option<u32>,
    pub losses: Option<u32>,
    pub logo: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawLeaderboardResponse {
    #[serde(default)]
    pub participants: Vec<RawBrParticipant>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawBrParticipant {
    pub participant_id: Option<u32>,
    pub name: Option<String>,
    pub image: Option<String>,
    pub total_kills: Option<u32>,
    pub total_placement_points: Option<u32>,
    pub total_points: Option<u32>,
    pub matches_played: Option<u32>,
}

/// POST body for `save_battle_royale_match_results.php`. The submitted totals
/// replace the server's stored ones.
#[derive(Debug, Serialize)]
pub struct BrStatsPayload {
    pub tournament_id: u32,
    pub participant_id: u32,
    pub total_kills: u32,
    pub total_placement_points: u32,
    pub total_points: u32,
}

// ---------------------------------------------------------------------------
// Teams
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawTeam {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub tag: Option<String>,
    pub description: Option<String>,
    pub logo: Option<String>,
    pub banner: Option<String>,
    pub owner_id: Option<u32>,
    pub tier: Option<String>,
    pub division: Option<String>,
    #[serde(default)]
    pub socials: Vec<RawSocial>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawSocial {
    pub platform: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawTeamStats {
    pub wins: Option<u32>,
    pub losses: Option<u32>,
    pub draws: Option<u32>,
    pub win_rate: Option<f32>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawTeamMember {
    pub user_id: Option<u32>,
    pub username: Option<String>,
    pub avatar: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawJoinRequest {
    pub id: Option<u32>,
    pub user_id: Option<u32>,
    pub username: Option<String>,
    pub rank: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawTeamSettings {
    pub name: Option<String>,
    pub tag: Option<String>,
    pub description: Option<String>,
    pub tier: Option<String>,
    pub division: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawInvolvement {
    pub owns_team: Option<u32>,
    pub member_of: Option<u32>,
    pub pending_request: Option<u32>,
}

/// `create_team.php` answers with the new team's id.
#[derive(Debug, Deserialize, Default)]
pub struct RawCreatedTeam {
    pub id: Option<u32>,
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawUser {
    pub id: Option<u32>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub points: Option<u32>,
    pub rank: Option<String>,
    #[serde(rename = "type")]
    pub user_type: Option<String>, // "admin" | "participant" | "viewer"
    pub is_verified: Option<bool>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawGame {
    pub id: Option<u32>,
    pub name: Option<String>,
}

/// `upload_avatar.php` answers with the stored file's public path.
#[derive(Debug, Deserialize, Default)]
pub struct RawUploadedFile {
    pub url: Option<String>,
}
