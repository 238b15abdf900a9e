//! Game configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Table setup for a game.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of players (2 by default; 2..=4 supported)
    pub players: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig { players: 2 }
    }
}

impl GameConfig {
    pub fn with_players(players: usize) -> Self {
        GameConfig { players }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.factory_count()
            .map(|_| ())
            .ok_or(ConfigError::UnsupportedPlayerCount(self.players))
    }

    /// Number of factories for the configured player count
    pub fn factory_count(&self) -> Option<usize> {
        match self.players {
            2 => Some(5),
            3 => Some(7),
            4 => Some(9),
            _ => None,
        }
    }

    /// With two players the 100-tile supply always covers a full deal, so a
    /// short draw pile can only mean lost tiles. Larger tables can run dry.
    pub(crate) fn supply_covers_every_round(&self) -> bool {
        self.players == 2
    }
}
