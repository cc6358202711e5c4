use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

/// Read-side views of the club service. The bot only ever issues GET
/// requests; registration and every director action stay on the web side.
#[derive(Debug, Clone, Deserialize)]
pub struct TournamentSummary {
    pub id: Uuid,
    pub name: String,
    pub buy_in_cost: i32,
    pub buy_in_chips: i32,
    pub start_time: DateTime<Utc>,
    pub registered_players: i64,
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TournamentPlayer {
    pub user_id: Uuid,
    pub display_name: String,
    pub telegram_username: Option<String>,
    pub chips: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TournamentDetail {
    pub id: Uuid,
    pub name: String,
    pub status: String,
    pub players: Vec<TournamentPlayer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RatingEntry {
    pub player_name: String,
    pub telegram_username: Option<String>,
    pub score: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RatingInfo {
    pub score: i32,
    pub position: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub display_name: String,
    pub telegram_username: Option<String>,
    pub role: String,
    pub rating: Option<RatingInfo>,
}

#[derive(Debug, Clone, Deserialize)]
struct ProfileResponse {
    profile: Profile,
}

#[derive(Clone)]
pub struct ClubClient {
    http: reqwest::Client,
    base_url: String,
}

impl ClubClient {
    pub fn new(http: reqwest::Client, base_url: String) -> Self {
        Self { http, base_url }
    }

    pub async fn list_tournaments(&self) -> Result<Vec<TournamentSummary>> {
        let url = format!("{}/api/tournaments", self.base_url);
        let tournaments = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("decoding tournament list")?;
        Ok(tournaments)
    }

    pub async fn tournament_detail(&self, id: Uuid) -> Result<TournamentDetail> {
        let url = format!("{}/api/tournaments/{}", self.base_url, id);
        let detail = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("decoding tournament detail")?;
        Ok(detail)
    }

    pub async fn rating(&self) -> Result<Vec<RatingEntry>> {
        let url = format!("{}/api/rating", self.base_url);
        let entries = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("decoding rating list")?;
        Ok(entries)
    }

    /// Profile lookup by handle. `None` when the service does not know the
    /// player.
    pub async fn profile_by_telegram(&self, handle: &str) -> Result<Option<Profile>> {
        let url = format!("{}/api/users/telegram/{}/profile", self.base_url, handle);
        let response = self.http.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body: ProfileResponse = response
            .error_for_status()?
            .json()
            .await
            .context("decoding profile")?;
        Ok(Some(body.profile))
    }
}
