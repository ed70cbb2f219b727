//! Creates a valid Google session (access token) that we can use to call the gcal API

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use google_calendar::{AccessToken, Client};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::app_config::{self, Credentials};
use super::redirect_uri;

/// Refresh a little before Google considers the token expired.
const EXPIRY_MARGIN_SECS: i64 = 60;

pub struct Session {
    path: PathBuf,
    creds: Credentials,
    data: SessionData,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SessionData {
    access_token: String,
    refresh_token: String,
    expires_at: DateTime<Utc>,
}

impl SessionData {
    pub fn from_tokens(tokens: &AccessToken, previous_refresh_token: Option<&str>) -> Self {
        // Google typically doesn't return a new refresh_token on refresh
        let refresh_token = match previous_refresh_token {
            Some(previous) if tokens.refresh_token.is_empty() => previous.to_string(),
            _ => tokens.refresh_token.clone(),
        };

        SessionData {
            access_token: tokens.access_token.clone(),
            refresh_token,
            expires_at: Utc::now() + Duration::seconds(tokens.expires_in),
        }
    }

    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_MARGIN_SECS) >= self.expires_at
    }
}

impl Session {
    fn path_in(base_dir: &Path) -> PathBuf {
        base_dir.join("session.toml")
    }

    pub fn new(base_dir: &Path, creds: Credentials, data: SessionData) -> Self {
        Session {
            path: Self::path_in(base_dir),
            creds,
            data,
        }
    }

    pub fn client(&self) -> Client {
        Client::new(
            self.creds.client_id.clone(),
            self.creds.client_secret.clone(),
            redirect_uri(),
            self.data.access_token.clone(),
            self.data.refresh_token.clone(),
        )
    }

    // Load a session and refresh it if expired:
    pub async fn load_valid(base_dir: &Path) -> Result<Self> {
        let mut session = Self::load(base_dir)?;

        if session.data.is_expired(Utc::now()) {
            tracing::debug!("access token expired, refreshing");
            session.refresh().await?;
        }

        Ok(session)
    }

    fn load(base_dir: &Path) -> Result<Self> {
        let creds = app_config::load(base_dir)?;
        let path = Self::path_in(base_dir);

        if !path.exists() {
            anyhow::bail!(
                "Google OAuth session not found at {}.\nRun `bcscal auth` first.",
                path.display()
            );
        }

        let contents = std::fs::read_to_string(&path).with_context(|| {
            format!(
                "Failed to read Google OAuth session from {}",
                path.display()
            )
        })?;

        let data: SessionData = toml::from_str(&contents).with_context(|| {
            format!(
                "Failed to parse Google OAuth session from {}",
                path.display()
            )
        })?;

        Ok(Session { path, creds, data })
    }

    pub fn save(&self) -> Result<()> {
        let contents = toml::to_string_pretty(&self.data).context("Failed to serialize session")?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        std::fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write session to {}", self.path.display()))?;

        // Set to owner-only (0600) since file contains OAuth tokens:
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("Failed to set permissions on {}", self.path.display()))?;
        }

        Ok(())
    }

    async fn refresh(&mut self) -> Result<()> {
        let tokens = self
            .client()
            .refresh_access_token()
            .await
            .context("Failed to refresh Google access token")?;

        self.data = SessionData::from_tokens(&tokens, Some(&self.data.refresh_token));
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn creds() -> Credentials {
        Credentials {
            client_id: "id".into(),
            client_secret: "secret".into(),
        }
    }

    fn data(expires_at: DateTime<Utc>) -> SessionData {
        SessionData {
            access_token: "access".into(),
            refresh_token: "refresh".into(),
            expires_at,
        }
    }

    #[test]
    fn expiry_includes_margin() {
        let now = Utc::now();
        assert!(data(now - Duration::seconds(1)).is_expired(now));
        assert!(data(now + Duration::seconds(30)).is_expired(now));
        assert!(!data(now + Duration::hours(1)).is_expired(now));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("app_config.toml"),
            "client_id = \"id\"\nclient_secret = \"secret\"\n",
        )
        .unwrap();

        let expires_at = Utc::now() + Duration::hours(1);
        Session::new(dir.path(), creds(), data(expires_at)).save().unwrap();

        let loaded = Session::load(dir.path()).unwrap();
        assert_eq!(loaded.data, data(expires_at));
        assert_eq!(loaded.creds, creds());

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(dir.path().join("session.toml"))
                .unwrap()
                .permissions()
                .mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn missing_session_points_to_auth() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("app_config.toml"),
            "client_id = \"id\"\nclient_secret = \"secret\"\n",
        )
        .unwrap();

        let err = Session::load(dir.path()).err().unwrap();
        assert!(err.to_string().contains("bcscal auth"));
    }
}
