// Error types shared across the viewport, round and leaderboard code.

#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("invalid fly-to target: expected [y, x] or {{x, y}}, got {0}")]
    InvalidFlyTarget(String),
    #[error("invalid map options: {0}")]
    InvalidOptions(String),
}

#[derive(Debug, thiserror::Error)]
pub enum LeaderboardError {
    #[error("leaderboard is not configured")]
    Disabled,
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("leaderboard returned HTTP {0}")]
    Status(u16),
}

#[derive(Debug, thiserror::Error)]
pub enum LocationsError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("locations request returned HTTP {0}")]
    Status(u16),
    #[error("malformed locations data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("no locations available")]
    Empty,
    #[error("no window origin to resolve {0}")]
    NoOrigin(String),
}
