//! Leaderboard persistence against a hosted PostgREST-style row store.
//! Failures are logged and swallowed; the game never waits on or retries them.

use serde::{Deserialize, Serialize};

use crate::error::LeaderboardError;

pub const DEFAULT_TABLE: &str = "leaderboards";
pub const DEFAULT_LIMIT: usize = 10;
const MAX_USERNAME_CHARS: usize = 32;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreRow {
    pub username: String,
    pub biome: String,
    pub score: u32,
    /// Elapsed game time in seconds.
    pub time: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LeaderboardConfig {
    /// Project URL, e.g. `https://<project>.supabase.co`. `None` disables the store.
    pub base_url: Option<String>,
    pub api_key: String,
    pub table: String,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: String::new(),
            table: DEFAULT_TABLE.to_string(),
        }
    }
}

impl LeaderboardConfig {
    /// Read `LEADERBOARD_URL` / `LEADERBOARD_KEY` at compile time.
    pub fn from_env() -> Self {
        Self {
            base_url: option_env!("LEADERBOARD_URL")
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            api_key: option_env!("LEADERBOARD_KEY").unwrap_or_default().to_string(),
            table: DEFAULT_TABLE.to_string(),
        }
    }

    pub fn table_url(&self) -> Option<String> {
        self.base_url
            .as_ref()
            .map(|base| format!("{}/rest/v1/{}", base.trim_end_matches('/'), self.table))
    }

    pub fn top_scores_url(&self, limit: usize) -> Option<String> {
        self.table_url()
            .map(|url| format!("{}?select=*&order=score.desc&limit={}", url, limit))
    }
}

pub fn sanitize_username(raw: &str) -> String {
    let name: String = raw.trim().chars().take(MAX_USERNAME_CHARS).collect();
    if name.is_empty() {
        "Anonymous".to_string()
    } else {
        name
    }
}

#[derive(Clone, Debug)]
pub struct LeaderboardStore {
    client: reqwest::Client,
    config: LeaderboardConfig,
}

impl LeaderboardStore {
    pub fn new(config: LeaderboardConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.base_url.is_some()
    }

    pub async fn submit_score(&self, username: &str, biome: &str, score: u32, elapsed_secs: u64) {
        let row = ScoreRow {
            username: sanitize_username(username),
            biome: biome.to_string(),
            score,
            time: elapsed_secs,
        };
        match self.try_submit(&row).await {
            Ok(()) => log::info!("saved score {} for {}", row.score, row.username),
            Err(e) => log::error!("error saving score: {}", e),
        }
    }

    pub async fn fetch_top_scores(&self, limit: usize) -> Vec<ScoreRow> {
        match self.try_fetch(limit).await {
            Ok(rows) => rows,
            Err(e) => {
                log::error!("error fetching leaderboard: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn try_submit(&self, row: &ScoreRow) -> Result<(), LeaderboardError> {
        let url = self.config.table_url().ok_or(LeaderboardError::Disabled)?;
        let resp = self
            .authorized(self.client.post(url))
            .header("Prefer", "return=minimal")
            .json(&[row])
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(LeaderboardError::Status(resp.status().as_u16()));
        }
        Ok(())
    }

    pub async fn try_fetch(&self, limit: usize) -> Result<Vec<ScoreRow>, LeaderboardError> {
        let url = self
            .config
            .top_scores_url(limit)
            .ok_or(LeaderboardError::Disabled)?;
        let resp = self.authorized(self.client.get(url)).send().await?;
        if !resp.status().is_success() {
            return Err(LeaderboardError::Status(resp.status().as_u16()));
        }
        Ok(resp.json::<Vec<ScoreRow>>().await?)
    }

    fn authorized(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("apikey", self.config.api_key.as_str())
            .header("Authorization", format!("Bearer {}", self.config.api_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> LeaderboardConfig {
        LeaderboardConfig {
            base_url: Some("https://example.supabase.co/".into()),
            api_key: "anon".into(),
            ..Default::default()
        }
    }

    #[test]
    fn urls_follow_rest_conventions() {
        let c = configured();
        assert_eq!(
            c.table_url().as_deref(),
            Some("https://example.supabase.co/rest/v1/leaderboards")
        );
        assert_eq!(
            c.top_scores_url(10).as_deref(),
            Some("https://example.supabase.co/rest/v1/leaderboards?select=*&order=score.desc&limit=10")
        );
        assert_eq!(LeaderboardConfig::default().top_scores_url(10), None);
    }

    #[test]
    fn store_enabled_only_with_url() {
        assert!(LeaderboardStore::new(configured()).is_enabled());
        assert!(!LeaderboardStore::new(LeaderboardConfig::default()).is_enabled());
    }

    #[test]
    fn row_wire_format() {
        let row = ScoreRow {
            username: "diver".into(),
            biome: "Safe Shallows".into(),
            score: 4985,
            time: 73,
        };
        let v = serde_json::to_value([&row]).unwrap();
        assert_eq!(
            v,
            serde_json::json!([{"username":"diver","biome":"Safe Shallows","score":4985,"time":73}])
        );
        let rows: Vec<ScoreRow> = serde_json::from_str(
            r#"[{"id":1,"username":"a","biome":"b","score":10,"time":5,"created_at":"x"}]"#,
        )
        .unwrap();
        assert_eq!(rows[0].score, 10);
    }

    #[test]
    fn usernames_are_trimmed_and_defaulted() {
        assert_eq!(sanitize_username("  Ryley "), "Ryley");
        assert_eq!(sanitize_username("   "), "Anonymous");
        assert_eq!(sanitize_username(&"x".repeat(50)).len(), 32);
    }

    #[test]
    fn disabled_store_swallows_errors() {
        use futures::executor::block_on;

        let store = LeaderboardStore::new(LeaderboardConfig::default());
        assert!(block_on(store.fetch_top_scores(DEFAULT_LIMIT)).is_empty());
        block_on(store.submit_score("diver", "Kelp Forest", 4200, 61));

        let row = ScoreRow {
            username: "diver".into(),
            biome: "Kelp Forest".into(),
            score: 4200,
            time: 61,
        };
        assert!(matches!(
            block_on(store.try_fetch(DEFAULT_LIMIT)),
            Err(LeaderboardError::Disabled)
        ));
        assert!(matches!(
            block_on(store.try_submit(&row)),
            Err(LeaderboardError::Disabled)
        ));
    }
}
