use crate::wire::{
    BrStatsPayload, Envelope, RawBracketMatch, RawBracketResponse, RawCreatedTeam, RawGame,
    RawBrParticipant, RawGroupsResponse, RawInvolvement, RawJoinRequest, RawLeaderboardResponse,
    RawParticipant,
    RawStanding, RawTeam, RawTeamMember, RawTeamSettings, RawTeamStats, RawTournament,
    RawTournamentDetail, RawUploadedFile, RawUser,
};
use crate::{
    bracket, BracketData, BracketType, BrParticipant, EliminationBracket, GameTitle, GroupStanding,
    GroupTable, JoinRequest, Participant, ParticipationType, SocialLink, Team, TeamInvolvement,
    TeamMember, TeamSettings, TeamStats, Tournament, TournamentDetail, TournamentStatus, User,
    UserRole, UserUpdate,
};
use chrono::NaiveDate;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::Path;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const DEFAULT_BASE: &str = "http://localhost:8000";

/// Arena platform client backed by the PHP REST endpoints.
///
/// The base URL comes from `ARENATUI_API_BASE` (default `http://localhost:8000`);
/// all requests carry a 10s timeout so one stalled endpoint cannot wedge an
/// aggregate screen load.
#[derive(Debug, Clone)]
pub struct ArenaApi {
    client: Client,
    base: String,
    timeout: Duration,
}

impl Default for ArenaApi {
    fn default() -> Self {
        let base = std::env::var("ARENATUI_API_BASE")
            .ok()
            .filter(|b| !b.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE.to_owned());
        Self::with_base(base)
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    /// Non-2xx status. 4xx and 5xx are equally terminal for a request; the
    /// only recovery is a user-initiated retry.
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    /// Envelope `success=false` with the backend's own message.
    Backend(String),
    NotFound(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Backend(msg) => write!(f, "Backend rejected the request: {msg}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl ArenaApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a client against an explicit base URL (tests, alternate hosts).
    pub fn with_base(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self {
            client: Client::builder()
                .user_agent("arenatui/0.1 (terminal dashboard)")
                .build()
                .unwrap_or_default(),
            base,
            timeout: Duration::from_secs(10),
        }
    }

    // -----------------------------------------------------------------------
    // Tournaments + brackets
    // -----------------------------------------------------------------------

    pub async fn fetch_tournaments(&self) -> ApiResult<Vec<Tournament>> {
        let raw: Vec<RawTournament> = self.get("tournaments.php").await?;
        Ok(raw.into_iter().map(map_tournament).collect())
    }

    pub async fn fetch_tournament(&self, id: u32) -> ApiResult<TournamentDetail> {
        let raw: RawTournamentDetail = self.get(&format!("tournaments.php?id={id}")).await?;
        let tournament = raw
            .tournament
            .map(map_tournament)
            .ok_or_else(|| ApiError::NotFound(format!("tournament {id} not found")))?;
        Ok(TournamentDetail {
            tournament,
            participants: raw.participants.into_iter().map(map_participant).collect(),
        })
    }

    /// Ids of tournaments the user is registered in, for flagging the list.
    pub async fn fetch_my_tournaments(&self, user_id: u32) -> ApiResult<Vec<u32>> {
        let raw: Vec<RawTournament> =
            self.get(&format!("my-tournament.php?user_id={user_id}")).await?;
        Ok(raw.into_iter().filter_map(|t| t.id).collect())
    }

    /// Fetch and normalize the bracket for a tournament, dispatching on its
    /// bracket type. Yields `BracketData::Pending` when the server has not
    /// generated matches yet.
    pub async fn fetch_bracket(&self, tournament: &Tournament) -> ApiResult<BracketData> {
        match tournament.bracket_type {
            BracketType::SingleElimination | BracketType::DoubleElimination => {
                self.fetch_elimination(tournament.id).await
            }
            BracketType::RoundRobin => self.fetch_groups(tournament.id).await,
            BracketType::BattleRoyale => self.fetch_leaderboard(tournament.id).await,
            BracketType::Unknown => Err(ApiError::Other(format!(
                "tournament {} has an unrecognized bracket type",
                tournament.id
            ))),
        }
    }

    async fn fetch_elimination(&self, tournament_id: u32) -> ApiResult<BracketData> {
        let raw: RawBracketResponse = self
            .get(&format!("fetch_matches_bracket.php?tournament_id={tournament_id}"))
            .await?;
        if raw.matches.is_empty() {
            return Ok(BracketData::Pending);
        }
        let total_rounds = raw
            .total_rounds
            .filter(|&n| n > 0)
            .unwrap_or_else(|| infer_total_rounds(&raw.matches));
        Ok(BracketData::Elimination(EliminationBracket {
            upper: bracket::normalize(&raw.matches, total_rounds),
            lower: bracket::normalize_lower(&raw.lower_matches, raw.lower_rounds.unwrap_or(0)),
        }))
    }

    async fn fetch_groups(&self, tournament_id: u32) -> ApiResult<BracketData> {
        let raw: RawGroupsResponse = self
            .get(&format!("get_tournament_groups.php?tournament_id={tournament_id}"))
            .await?;
        if raw.groups.is_empty() {
            return Ok(BracketData::Pending);
        }
        let groups = raw
            .groups
            .into_iter()
            .enumerate()
            .map(|(i, g)| {
                let mut standings: Vec<GroupStanding> =
                    g.standings.iter().map(map_standing).collect();
                bracket::rank_standings(&mut standings);
                GroupTable {
                    name: g.name.unwrap_or_else(|| format!("Group {}", i + 1)),
                    standings,
                }
            })
            .collect();
        Ok(BracketData::Groups(groups))
    }

    async fn fetch_leaderboard(&self, tournament_id: u32) -> ApiResult<BracketData> {
        let raw: RawLeaderboardResponse = self
            .get(&format!("get_battle_royale_leaderboard.php?tournament_id={tournament_id}"))
            .await?;
        if raw.participants.is_empty() {
            return Ok(BracketData::Pending);
        }
        let mut participants: Vec<BrParticipant> =
            raw.participants.iter().map(map_br_participant).collect();
        bracket::rank_leaderboard(&mut participants);
        Ok(BracketData::BattleRoyale(participants))
    }

    /// Overwrite a participant's stored battle-royale totals with the edited
    /// values. The server does not re-derive them from match history.
    pub async fn save_br_stats(&self, tournament_id: u32, p: &BrParticipant) -> ApiResult<()> {
        let payload = BrStatsPayload {
            tournament_id,
            participant_id: p.participant_id,
            total_kills: p.total_kills,
            total_placement_points: p.total_placement_points,
            total_points: p.total_points,
        };
        self.post_ok("save_battle_royale_match_results.php", &payload).await
    }

    // -----------------------------------------------------------------------
    // Teams
    // -----------------------------------------------------------------------

    pub async fn fetch_teams(&self) -> ApiResult<Vec<Team>> {
        let raw: Vec<RawTeam> = self.get("get_teams.php").await?;
        Ok(raw.into_iter().map(map_team).collect())
    }

    pub async fn fetch_team_stats(&self, team_id: u32) -> ApiResult<TeamStats> {
        let raw: RawTeamStats =
            self.get(&format!("team_api.php?endpoint=team-stats&team_id={team_id}")).await?;
        Ok(TeamStats {
            wins: raw.wins.unwrap_or(0),
            losses: raw.losses.unwrap_or(0),
            draws: raw.draws.unwrap_or(0),
            win_rate: raw.win_rate.unwrap_or(0.0),
        })
    }

    pub async fn fetch_team_members(&self, team_id: u32) -> ApiResult<Vec<TeamMember>> {
        let raw: Vec<RawTeamMember> =
            self.get(&format!("team_api.php?endpoint=team-members&team_id={team_id}")).await?;
        Ok(raw.into_iter().map(map_member).collect())
    }

    pub async fn fetch_team_requests(&self, team_id: u32) -> ApiResult<Vec<JoinRequest>> {
        let raw: Vec<RawJoinRequest> =
            self.get(&format!("team_api.php?endpoint=team-requests&team_id={team_id}")).await?;
        Ok(raw.into_iter().map(map_request).collect())
    }

    pub async fn fetch_team_settings(&self, team_id: u32) -> ApiResult<TeamSettings> {
        let raw: RawTeamSettings =
            self.get(&format!("team_api.php?endpoint=team-settings&team_id={team_id}")).await?;
        Ok(map_settings(raw))
    }

    pub async fn save_team_settings(
        &self,
        team_id: u32,
        settings: &TeamSettings,
    ) -> ApiResult<()> {
        self.post_ok(
            &format!("team_api.php?endpoint=team-settings&team_id={team_id}"),
            settings,
        )
        .await
    }

    pub async fn decide_join_request(
        &self,
        team_id: u32,
        request_id: u32,
        accept: bool,
    ) -> ApiResult<()> {
        let body = serde_json::json!({
            "team_id": team_id,
            "request_id": request_id,
            "action": if accept { "accept" } else { "reject" },
        });
        self.post_ok("team_api.php?endpoint=join-request", &body).await
    }

    pub async fn create_team(
        &self,
        owner_id: u32,
        name: &str,
        tag: &str,
        description: &str,
    ) -> ApiResult<u32> {
        let body = serde_json::json!({
            "owner_id": owner_id,
            "name": name,
            "tag": tag,
            "description": description,
        });
        let url = format!("{}/api/create_team.php", self.base);
        let raw: RawCreatedTeam = self.post("create_team.php", &body).await?;
        raw.id.ok_or_else(|| ApiError::NotFound(format!("no team id returned from {url}")))
    }

    pub async fn delete_team(&self, team_id: u32) -> ApiResult<()> {
        let body = serde_json::json!({ "team_id": team_id });
        self.post_ok("team_api.php?endpoint=delete-team", &body).await
    }

    pub async fn check_involvement(&self, user_id: u32) -> ApiResult<TeamInvolvement> {
        let raw: RawInvolvement =
            self.get(&format!("check_team_involvement.php?user_id={user_id}")).await?;
        Ok(TeamInvolvement {
            owns_team: raw.owns_team,
            member_of: raw.member_of,
            pending_request: raw.pending_request,
        })
    }

    // -----------------------------------------------------------------------
    // Users
    // -----------------------------------------------------------------------

    pub async fn fetch_user(&self, id: u32) -> ApiResult<User> {
        let raw: RawUser = self.get(&format!("get_user.php?id={id}")).await?;
        Ok(map_user(raw))
    }

    /// Save profile edits; the server echoes the stored user back.
    pub async fn update_user(&self, update: &UserUpdate) -> ApiResult<User> {
        let raw: RawUser = self.post("update_user.php", update).await?;
        Ok(map_user(raw))
    }

    /// Multipart avatar upload; answers with the stored file's public path.
    pub async fn upload_avatar(&self, user_id: u32, path: &Path) -> ApiResult<String> {
        let url = format!("{}/api/upload_avatar.php", self.base);
        let bytes = std::fs::read(path)
            .map_err(|e| ApiError::Other(format!("could not read {}: {e}", path.display())))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("avatar")
            .to_owned();
        let form = reqwest::multipart::Form::new()
            .text("user_id", user_id.to_string())
            .part("avatar", reqwest::multipart::Part::bytes(bytes).file_name(file_name));

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.clone()))?
            .error_for_status()
            .map_err(|e| ApiError::Api(e, url.clone()))?;
        let envelope: Envelope<RawUploadedFile> = response
            .json()
            .await
            .map_err(|e| ApiError::Parsing(e, url.clone()))?;
        let uploaded = unwrap_envelope(envelope, &url)?;
        uploaded
            .url
            .ok_or_else(|| ApiError::NotFound(format!("no file url returned from {url}")))
    }

    pub async fn fetch_games(&self) -> ApiResult<Vec<GameTitle>> {
        let raw: Vec<RawGame> = self.get("all_games.php").await?;
        Ok(raw
            .into_iter()
            .map(|g| GameTitle { id: g.id.unwrap_or(0), name: g.name.unwrap_or_default() })
            .collect())
    }

    /// Full user table for the admin screen.
    pub async fn fetch_users(&self) -> ApiResult<Vec<User>> {
        let raw: Vec<RawUser> = self.get("manage_users.php").await?;
        Ok(raw.into_iter().map(map_user).collect())
    }

    /// Apply an admin action to a user. Actions the backend understands:
    /// `toggle_verified`, `cycle_type`, `delete`.
    pub async fn admin_user_action(&self, user_id: u32, action: &str) -> ApiResult<()> {
        let body = serde_json::json!({ "user_id": user_id, "action": action });
        self.post_ok("manage_users.php", &body).await
    }

    // -----------------------------------------------------------------------
    // Transport helpers
    // -----------------------------------------------------------------------

    async fn get<T: DeserializeOwned>(&self, path_and_query: &str) -> ApiResult<T> {
        let url = format!("{}/api/{path_and_query}", self.base);
        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.clone()))?
            .error_for_status()
            .map_err(|e| ApiError::Api(e, url.clone()))?;
        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| ApiError::Parsing(e, url.clone()))?;
        unwrap_envelope(envelope, &url)
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path_and_query: &str,
        body: &B,
    ) -> ApiResult<T> {
        let url = format!("{}/api/{path_and_query}", self.base);
        let response = self
            .client
            .post(&url)
            .json(body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.clone()))?
            .error_for_status()
            .map_err(|e| ApiError::Api(e, url.clone()))?;
        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| ApiError::Parsing(e, url.clone()))?;
        unwrap_envelope(envelope, &url)
    }

    /// POST where only the envelope's success flag matters.
    async fn post_ok<B: Serialize + ?Sized>(&self, path_and_query: &str, body: &B) -> ApiResult<()> {
        let url = format!("{}/api/{path_and_query}", self.base);
        let response = self
            .client
            .post(&url)
            .json(body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.clone()))?
            .error_for_status()
            .map_err(|e| ApiError::Api(e, url.clone()))?;
        let envelope: Envelope<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| ApiError::Parsing(e, url.clone()))?;
        if envelope.success {
            Ok(())
        } else {
            Err(ApiError::Backend(
                envelope.message.unwrap_or_else(|| "request rejected".to_owned()),
            ))
        }
    }
}

fn unwrap_envelope<T>(envelope: Envelope<T>, url: &str) -> ApiResult<T> {
    if !envelope.success {
        return Err(ApiError::Backend(
            envelope.message.unwrap_or_else(|| "request rejected".to_owned()),
        ));
    }
    envelope
        .data
        .ok_or_else(|| ApiError::NotFound(format!("empty response body from {url}")))
}

/// Total round count when the server omits it: the highest 1-based round tag.
fn infer_total_rounds(matches: &[RawBracketMatch]) -> u32 {
    matches.iter().filter_map(|m| m.round).max().unwrap_or(1)
}

// ---------------------------------------------------------------------------
// Mapping: wire types → clean domain types
// ---------------------------------------------------------------------------

fn map_tournament(raw: RawTournament) -> Tournament {
    Tournament {
        id: raw.id.unwrap_or(0),
        name: raw.name.unwrap_or_default(),
        game: raw.game.unwrap_or_default(),
        status: raw.status.as_deref().map(TournamentStatus::parse).unwrap_or_default(),
        bracket_type: raw.bracket_type.as_deref().map(BracketType::parse).unwrap_or_default(),
        participation: raw
            .participation_type
            .as_deref()
            .map(ParticipationType::parse)
            .unwrap_or_default(),
        start_date: raw.start_date.as_deref().and_then(parse_date),
        end_date: raw.end_date.as_deref().and_then(parse_date),
        max_participants: raw.max_participants.unwrap_or(0),
        registered_count: raw.registered_count.unwrap_or(0),
        prize_pool: raw.prize_pool.filter(|p| !p.trim().is_empty()),
        rules: raw
            .rules
            .map(|r| {
                r.lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default(),
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

fn map_participant(raw: RawParticipant) -> Participant {
    Participant {
        id: raw.id.unwrap_or(0),
        name: raw.name.unwrap_or_else(|| "Unknown".to_owned()),
        avatar: raw.avatar,
    }
}

fn map_team(raw: RawTeam) -> Team {
    Team {
        id: raw.id.unwrap_or(0),
        name: raw.name.unwrap_or_default(),
        tag: raw.tag.unwrap_or_default(),
        description: raw.description.unwrap_or_default(),
        logo: raw.logo,
        banner: raw.banner,
        owner_id: raw.owner_id.unwrap_or(0),
        tier: raw.tier,
        division: raw.division,
        socials: raw
            .socials
            .into_iter()
            .filter_map(|s| {
                let url = s.url?;
                Some(SocialLink { platform: s.platform.unwrap_or_default(), url })
            })
            .collect(),
    }
}

fn map_member(raw: RawTeamMember) -> TeamMember {
    TeamMember {
        user_id: raw.user_id.unwrap_or(0),
        username: raw.username.unwrap_or_else(|| "Unknown".to_owned()),
        avatar: raw.avatar,
        role: raw.role.unwrap_or_else(|| "Member".to_owned()),
    }
}

fn map_request(raw: RawJoinRequest) -> JoinRequest {
    JoinRequest {
        id: raw.id.unwrap_or(0),
        user_id: raw.user_id.unwrap_or(0),
        username: raw.username.unwrap_or_else(|| "Unknown".to_owned()),
        rank: raw.rank,
        region: raw.region,
    }
}

fn map_settings(raw: RawTeamSettings) -> TeamSettings {
    TeamSettings {
        name: raw.name.unwrap_or_default(),
        tag: raw.tag.unwrap_or_default(),
        description: raw.description.unwrap_or_default(),
        tier: raw.tier,
        division: raw.division,
    }
}

fn map_user(raw: RawUser) -> User {
    User {
        id: raw.id.unwrap_or(0),
        username: raw.username.unwrap_or_default(),
        email: raw.email.unwrap_or_default(),
        bio: raw.bio.unwrap_or_default(),
        avatar: raw.avatar,
        points: raw.points.unwrap_or(0),
        rank: raw.rank,
        role: raw.user_type.as_deref().map(UserRole::parse).unwrap_or_default(),
        is_verified: raw.is_verified.unwrap_or(false),
    }
}

fn map_standing(raw: &RawStanding) -> GroupStanding {
    GroupStanding {
        team_id: raw.team_id.unwrap_or(0),
        team_name: raw.team_name.clone().unwrap_or_default(),
        wins: raw.wins.unwrap_or(0),
        draws: raw.draws.unwrap_or(0),
        losses: raw.losses.unwrap_or(0),
        logo: raw.logo.clone(),
    }
}

fn map_br_participant(raw: &RawBrParticipant) -> BrParticipant {
    let total_kills = raw.total_kills.unwrap_or(0);
    let total_placement_points = raw.total_placement_points.unwrap_or(0);
    BrParticipant {
        participant_id: raw.participant_id.unwrap_or(0),
        name: raw.name.clone().unwrap_or_else(|| "Unknown".to_owned()),
        image: raw.image.clone(),
        total_kills,
        total_placement_points,
        // The server sends the sum; fall back to deriving it if omitted.
        total_points: raw.total_points.unwrap_or(total_kills + total_placement_points),
        matches_played: raw.matches_played.unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tournament_mapping_parses_status_and_dates() {
        let raw = RawTournament {
            id: Some(3),
            name: Some("Summer Clash".into()),
            game: Some("Valorant".into()),
            status: Some("En cours".into()),
            bracket_type: Some("Single Elimination".into()),
            participation_type: Some("team".into()),
            start_date: Some("2026-07-01".into()),
            end_date: Some("not-a-date".into()),
            max_participants: Some(16),
            registered_count: Some(12),
            prize_pool: Some("  ".into()),
            rules: Some("No smurfing\n\nBe on time\n".into()),
        };
        let t = map_tournament(raw);
        assert_eq!(t.status, TournamentStatus::InProgress);
        assert_eq!(t.bracket_type, BracketType::SingleElimination);
        assert_eq!(t.start_date, NaiveDate::from_ymd_opt(2026, 7, 1));
        assert!(t.end_date.is_none(), "garbage dates must map to None");
        assert!(t.prize_pool.is_none(), "blank prize pool must map to None");
        assert_eq!(t.rules, vec!["No smurfing".to_owned(), "Be on time".to_owned()]);
        assert_eq!(t.slots_label(), "12/16");
    }

    #[test]
    fn unknown_status_is_preserved_verbatim() {
        let status = TournamentStatus::parse("Annulé");
        assert_eq!(status, TournamentStatus::Other("Annulé".into()));
        assert_eq!(status.label(), "Annulé");
    }

    #[test]
    fn total_rounds_inferred_from_highest_round_tag() {
        let matches = vec![
            RawBracketMatch { round: Some(2), ..Default::default() },
            RawBracketMatch { round: Some(4), ..Default::default() },
            RawBracketMatch { round: None, ..Default::default() },
        ];
        assert_eq!(infer_total_rounds(&matches), 4);
        assert_eq!(infer_total_rounds(&[]), 1);
    }

    #[test]
    fn role_parse_and_cycle() {
        assert_eq!(UserRole::parse("admin"), UserRole::Admin);
        assert_eq!(UserRole::parse("weird"), UserRole::Viewer);
        assert_eq!(UserRole::Admin.next(), UserRole::Participant);
        assert_eq!(UserRole::Viewer.next(), UserRole::Admin);
    }

    #[test]
    fn br_participant_total_falls_back_to_derived_sum() {
        let raw = RawBrParticipant {
            participant_id: Some(1),
            total_kills: Some(5),
            total_placement_points: Some(7),
            total_points: None,
            ..Default::default()
        };
        assert_eq!(map_br_participant(&raw).total_points, 12);
    }

    // -----------------------------------------------------------------------
    // HTTP behavior against a mock backend
    // -----------------------------------------------------------------------

    fn envelope(data: &str) -> String {
        format!(r#"{{"success":true,"data":{data}}}"#)
    }

    #[tokio::test]
    async fn fetch_tournaments_unwraps_the_envelope() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/tournaments.php")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(envelope(
                r#"[{"id":1,"name":"Winter Cup","status":"registration_open","bracket_type":"Round Robin"}]"#,
            ))
            .create_async()
            .await;

        let api = ArenaApi::with_base(server.url());
        let tournaments = api.fetch_tournaments().await.expect("list should parse");
        assert_eq!(tournaments.len(), 1);
        assert_eq!(tournaments[0].name, "Winter Cup");
        assert_eq!(tournaments[0].status, TournamentStatus::RegistrationOpen);
        assert_eq!(tournaments[0].bracket_type, BracketType::RoundRobin);
    }

    #[tokio::test]
    async fn envelope_failure_surfaces_the_backend_message() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/tournaments.php")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success":false,"message":"maintenance window"}"#)
            .create_async()
            .await;

        let api = ArenaApi::with_base(server.url());
        match api.fetch_tournaments().await {
            Err(ApiError::Backend(msg)) => assert_eq!(msg, "maintenance window"),
            other => panic!("expected Backend error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_2xx_statuses_are_uniformly_terminal() {
        let mut server = mockito::Server::new_async().await;
        let _client_err = server
            .mock("GET", "/api/get_user.php?id=1")
            .with_status(404)
            .create_async()
            .await;
        let _server_err = server
            .mock("GET", "/api/get_user.php?id=2")
            .with_status(500)
            .create_async()
            .await;

        let api = ArenaApi::with_base(server.url());
        assert!(matches!(api.fetch_user(1).await, Err(ApiError::Api(..))));
        assert!(matches!(api.fetch_user(2).await, Err(ApiError::Api(..))));
    }

    #[tokio::test]
    async fn malformed_body_is_a_parsing_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/all_games.php")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let api = ArenaApi::with_base(server.url());
        assert!(matches!(api.fetch_games().await, Err(ApiError::Parsing(..))));
    }

    #[tokio::test]
    async fn empty_bracket_is_reported_as_pending() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/fetch_matches_bracket.php?tournament_id=5")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(envelope(r#"{"total_rounds":3,"matches":[]}"#))
            .create_async()
            .await;

        let api = ArenaApi::with_base(server.url());
        let tournament = Tournament {
            id: 5,
            bracket_type: BracketType::SingleElimination,
            ..Default::default()
        };
        let data = api.fetch_bracket(&tournament).await.expect("bracket fetch");
        assert_eq!(data, BracketData::Pending);
    }

    #[tokio::test]
    async fn team_settings_survive_a_save_then_fetch_round_trip() {
        let mut server = mockito::Server::new_async().await;
        let submitted = TeamSettings {
            name: "Night Owls".into(),
            tag: "OWL".into(),
            description: "late shift".into(),
            tier: Some("B".into()),
            division: None,
        };

        let _save = server
            .mock("POST", "/api/team_api.php?endpoint=team-settings&team_id=7")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success":true}"#)
            .create_async()
            .await;
        // The backend echoes what it stored; blank division stays null.
        let _fetch = server
            .mock("GET", "/api/team_api.php?endpoint=team-settings&team_id=7")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(envelope(
                r#"{"name":"Night Owls","tag":"OWL","description":"late shift","tier":"B","division":null}"#,
            ))
            .create_async()
            .await;

        let api = ArenaApi::with_base(server.url());
        api.save_team_settings(7, &submitted).await.expect("save should succeed");
        let fetched = api.fetch_team_settings(7).await.expect("fetch should parse");
        assert_eq!(fetched, submitted);
    }
}
