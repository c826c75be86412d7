use push_match_core::BoardConfig;

/// Session host configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub board: BoardConfig,
    /// Capacity of the inbound request channel
    pub max_pending_commands: usize,
    /// Append every outbound effect as a JSON line to this file
    pub journal_path: Option<String>,
    /// Turn limit for the headless runner
    pub max_turns: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            max_pending_commands: 16,
            journal_path: None,
            max_turns: 500,
        }
    }
}

impl SessionConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();

        let max_pending_commands = env::var("PUSH_MATCH_MAX_PENDING")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_pending_commands);

        let journal_path = env::var("PUSH_MATCH_JOURNAL_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        let max_turns = env::var("PUSH_MATCH_MAX_TURNS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_turns);

        Self {
            board: BoardConfig::from_env(),
            max_pending_commands,
            journal_path,
            max_turns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_config_from_env() {
        // This test just ensures it doesn't panic
        let config = SessionConfig::from_env();
        assert!(config.board.level >= 1);
    }
}
