use serde::{Deserialize, Serialize};

/// Tunable rules of a match.
///
/// Deserializes from partial JSON; missing fields take their default values.
///
/// ```
/// use pushy_engine::MatchConfig;
///
/// let config: MatchConfig = serde_json::from_str(r#"{ "initial_lives": 3 }"#).unwrap();
/// assert_eq!(config.initial_lives, 3);
/// assert_eq!(config.spawn_interval, MatchConfig::default().spawn_interval);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Lives each player starts with.
    pub initial_lives: u32,
    /// Turns of a player between two of its spawns. Also the initial countdown.
    pub spawn_interval: u32,
    /// Squares each player owns when the match starts.
    pub initial_squares: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            initial_lives: 5,
            spawn_interval: 3,
            initial_squares: 1,
        }
    }
}
