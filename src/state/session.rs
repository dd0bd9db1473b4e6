use arena_api::{User, UserRole};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The signed-in identity, persisted between runs.
///
/// This replaces the platform web client's ad hoc local-storage blob with a
/// typed store: the App is the single writer, and changes propagate through
/// the normal message channels rather than synthetic storage events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub user_id: u32,
    pub username: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub role: UserRole,
    pub points: u32,
}

impl Session {
    /// Sync the cached identity after a profile edit round-trips.
    pub fn patch_from_user(&mut self, user: &User) {
        self.username = user.username.clone();
        self.email = user.email.clone();
        self.avatar_url = user.avatar.clone();
        self.role = user.role;
        self.points = user.points;
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn load() -> Option<Session> {
        load_from(&session_path())
    }

    pub fn save(&self) -> Result<(), String> {
        save_to(self, &session_path())
    }
}

pub fn load_from(path: &Path) -> Option<Session> {
    let content = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

pub fn save_to(session: &Session, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| format!("create dir failed: {e}"))?;
    }
    let payload = serde_json::to_string_pretty(session)
        .map_err(|e| format!("serialize session failed: {e}"))?;
    std::fs::write(path, payload).map_err(|e| format!("write session failed: {e}"))
}

fn session_path() -> PathBuf {
    if let Ok(path) = std::env::var("ARENATUI_SESSION_JSON")
        && !path.trim().is_empty()
    {
        return PathBuf::from(path);
    }
    if let Ok(config_dir) = std::env::var("XDG_CONFIG_HOME")
        && !config_dir.trim().is_empty()
    {
        return PathBuf::from(config_dir).join("arenatui").join("session.json");
    }
    if let Ok(home) = std::env::var("HOME")
        && !home.trim().is_empty()
    {
        return PathBuf::from(home).join(".config").join("arenatui").join("session.json");
    }
    PathBuf::from("session.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Session {
        Session {
            user_id: 42,
            username: "kestrel".into(),
            email: "kestrel@example.com".into(),
            avatar_url: Some("/uploads/avatars/42.png".into()),
            role: UserRole::Participant,
            points: 310,
        }
    }

    #[test]
    fn session_round_trips_through_disk() {
        let dir = std::env::temp_dir().join("arenatui-session-test");
        let path = dir.join("session.json");
        let session = sample();

        save_to(&session, &path).expect("save should succeed");
        let loaded = load_from(&path).expect("saved session should load");
        assert_eq!(loaded, session);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn corrupt_session_file_loads_as_none() {
        let dir = std::env::temp_dir().join("arenatui-session-corrupt-test");
        let path = dir.join("session.json");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(&path, "{not json").unwrap();

        assert!(load_from(&path).is_none());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn patch_from_user_updates_the_cached_identity() {
        let mut session = sample();
        let user = User {
            id: 42,
            username: "kestrel2".into(),
            email: "k2@example.com".into(),
            avatar: None,
            role: UserRole::Admin,
            points: 400,
            ..Default::default()
        };
        session.patch_from_user(&user);
        assert_eq!(session.username, "kestrel2");
        assert_eq!(session.email, "k2@example.com");
        assert!(session.avatar_url.is_none());
        assert!(session.is_admin());
        assert_eq!(session.points, 400);
    }
}
