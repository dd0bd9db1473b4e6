use crate::state::messages::{NetworkRequest, NetworkResponse, RequestScope};
use arena_api::client::{ApiError, ArenaApi};
use arena_api::TeamDetail;
use chrono::Local;
use futures_util::future::try_join4;
use log::{debug, error, warn};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Owns the API client and serves typed requests from the UI loop. All
/// requests run sequentially on this task; concurrency happens inside a
/// handler (the four-way team-detail fetch), never across the channel.
pub struct NetworkWorker {
    client: ArenaApi,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    is_loading: Arc<AtomicBool>,
}

impl NetworkWorker {
    pub fn new(
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client: ArenaApi::new(),
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            let scope = scope_for(&request);
            self.start_loading_animation().await;

            let result = self.handle(request).await;

            debug!("network request complete");
            self.stop_loading_animation(result.is_ok()).await;

            let response = result.unwrap_or_else(|err| NetworkResponse::Error {
                scope,
                message: err.to_string(),
            });

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn handle(&self, request: NetworkRequest) -> Result<NetworkResponse, ApiError> {
        match request {
            NetworkRequest::LoadTournaments { user_id } => {
                debug!("loading tournament list");
                let tournaments = self.client.fetch_tournaments().await?;
                // Registration flags are cosmetic; a failure here must not
                // take the whole list down.
                let registered = match user_id {
                    Some(uid) => self.client.fetch_my_tournaments(uid).await.unwrap_or_else(|e| {
                        warn!("could not load registered tournaments: {e}");
                        Vec::new()
                    }),
                    None => Vec::new(),
                };
                Ok(NetworkResponse::TournamentsLoaded { tournaments, registered })
            }
            NetworkRequest::LoadTournamentDetail { id } => {
                debug!("loading tournament {id}");
                let detail = self.client.fetch_tournament(id).await?;
                Ok(NetworkResponse::TournamentDetailLoaded { detail })
            }
            NetworkRequest::LoadBracket { tournament } => {
                debug!("loading bracket for tournament {} ({})", tournament.id, tournament.bracket_type.label());
                let data = self.client.fetch_bracket(&tournament).await?;
                Ok(NetworkResponse::BracketLoaded { tournament_id: tournament.id, data })
            }
            NetworkRequest::LoadTeams { user_id } => {
                debug!("loading team hub");
                let teams = self.client.fetch_teams().await?;
                let involvement = match user_id {
                    Some(uid) => self.client.check_involvement(uid).await.ok(),
                    None => None,
                };
                Ok(NetworkResponse::TeamsLoaded { teams, involvement })
            }
            NetworkRequest::LoadTeamDetail { team_id } => {
                debug!("loading team {team_id} detail (stats/members/requests/settings)");
                let (stats, members, requests, settings) = try_join4(
                    self.client.fetch_team_stats(team_id),
                    self.client.fetch_team_members(team_id),
                    self.client.fetch_team_requests(team_id),
                    self.client.fetch_team_settings(team_id),
                )
                .await?;
                Ok(NetworkResponse::TeamDetailLoaded {
                    team_id,
                    detail: TeamDetail { stats, members, requests, settings },
                })
            }
            NetworkRequest::DecideJoinRequest { team_id, request_id, accept } => {
                debug!("join request {request_id}: accept={accept}");
                self.client.decide_join_request(team_id, request_id, accept).await?;
                Ok(NetworkResponse::JoinRequestDecided { team_id })
            }
            NetworkRequest::SaveTeamSettings { team_id, settings } => {
                debug!("saving settings for team {team_id}");
                self.client.save_team_settings(team_id, &settings).await?;
                Ok(NetworkResponse::TeamSettingsSaved { team_id })
            }
            NetworkRequest::CreateTeam { owner_id, name, tag, description } => {
                debug!("creating team {name}");
                let team_id = self.client.create_team(owner_id, &name, &tag, &description).await?;
                Ok(NetworkResponse::TeamCreated { team_id })
            }
            NetworkRequest::DeleteTeam { team_id } => {
                debug!("deleting team {team_id}");
                self.client.delete_team(team_id).await?;
                Ok(NetworkResponse::TeamDeleted)
            }
            NetworkRequest::LoadProfile { user_id } => {
                debug!("loading profile {user_id}");
                let user = self.client.fetch_user(user_id).await?;
                Ok(NetworkResponse::ProfileLoaded { user })
            }
            NetworkRequest::SaveProfile { update } => {
                debug!("saving profile {}", update.id);
                let user = self.client.update_user(&update).await?;
                Ok(NetworkResponse::ProfileSaved { user })
            }
            NetworkRequest::UploadAvatar { user_id, path } => {
                debug!("uploading avatar for {user_id} from {path}");
                let avatar_url = self.client.upload_avatar(user_id, Path::new(&path)).await?;
                Ok(NetworkResponse::AvatarUploaded { user_id, avatar_url })
            }
            NetworkRequest::LoadUsers => {
                debug!("loading user table");
                let users = self.client.fetch_users().await?;
                Ok(NetworkResponse::UsersLoaded { users })
            }
            NetworkRequest::AdminUserAction { user_id, action } => {
                debug!("admin action {} on user {user_id}", action.as_str());
                self.client.admin_user_action(user_id, action.as_str()).await?;
                Ok(NetworkResponse::UserActionApplied)
            }
            NetworkRequest::SaveBrStats { tournament_id, participant } => {
                debug!(
                    "saving BR stats for participant {} in tournament {tournament_id}",
                    participant.participant_id
                );
                self.client.save_br_stats(tournament_id, &participant).await?;
                Ok(NetworkResponse::BrStatsSaved { tournament_id })
            }
            NetworkRequest::LoadGames => {
                debug!("loading game list");
                let games = self.client.fetch_games().await?;
                Ok(NetworkResponse::GamesLoaded { games })
            }
        }
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state = LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}

/// Timestamp shown next to refreshed data.
pub fn refresh_stamp() -> String {
    Local::now().format("%H:%M").to_string()
}

fn scope_for(request: &NetworkRequest) -> RequestScope {
    match request {
        NetworkRequest::LoadTournaments { .. } => RequestScope::Tournaments,
        NetworkRequest::LoadTournamentDetail { .. } => RequestScope::TournamentDetail,
        NetworkRequest::LoadBracket { .. } => RequestScope::Bracket,
        NetworkRequest::LoadTeams { .. } | NetworkRequest::LoadGames => RequestScope::Teams,
        NetworkRequest::LoadTeamDetail { .. } => RequestScope::TeamDetail,
        NetworkRequest::LoadProfile { .. } => RequestScope::Profile,
        NetworkRequest::LoadUsers => RequestScope::Admin,
        NetworkRequest::DecideJoinRequest { .. }
        | NetworkRequest::SaveTeamSettings { .. }
        | NetworkRequest::CreateTeam { .. }
        | NetworkRequest::DeleteTeam { .. }
        | NetworkRequest::SaveProfile { .. }
        | NetworkRequest::UploadAvatar { .. }
        | NetworkRequest::AdminUserAction { .. }
        | NetworkRequest::SaveBrStats { .. } => RequestScope::Mutation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::messages::AdminAction;
    use arena_api::Tournament;

    #[test]
    fn fetches_and_mutations_map_to_the_right_scope() {
        assert_eq!(
            scope_for(&NetworkRequest::LoadTournaments { user_id: None }),
            RequestScope::Tournaments
        );
        assert_eq!(
            scope_for(&NetworkRequest::LoadBracket { tournament: Tournament::default() }),
            RequestScope::Bracket
        );
        assert_eq!(
            scope_for(&NetworkRequest::AdminUserAction {
                user_id: 1,
                action: AdminAction::Delete
            }),
            RequestScope::Mutation
        );
        assert_eq!(
            scope_for(&NetworkRequest::SaveTeamSettings {
                team_id: 1,
                settings: Default::default()
            }),
            RequestScope::Mutation
        );
    }
}
