pub mod clock_guess;
pub mod coins_count;
pub mod coins_math;
pub mod terminal;

use crate::config::{GameConfig, GameId};
use crate::error::Error;

pub struct GameDescriptor
{
    pub id: GameId,
    pub command: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub fn registry() -> Vec<GameDescriptor>
{
    vec![GameDescriptor {
        id: GameId::CoinsCount,
        command: "coins-count",
        name: "Coins Count",
        description: "Count the coins and type how much they are worth",
    },
    GameDescriptor {
        id: GameId::CoinsMath,
        command: "coins-math",
        name: "Coins Math",
        description: "Build the amount shown from pennies, nickels, dimes and quarters",
    },
    GameDescriptor {
        id: GameId::ClockGuess,
        command: "clock",
        name: "Analog Clock",
        description: "Read the clock and type the time",
    }]
}

pub fn descriptor(id: GameId) -> Option<GameDescriptor>
{
    registry().into_iter().find(|game| game.id == id)
}

/// Play one game with its configuration. Returns the correct answers
/// scored before the player left.
pub fn launch(config: GameConfig, profile: &str) -> Result<u32, Error>
{
    tracing::info!(game = %config.game_id(), profile, "starting game");
    match config {
        GameConfig::CoinsCount(config) => coins_count::run(config, profile),
        GameConfig::CoinsMath(config) => coins_math::run(config, profile),
        GameConfig::ClockGuess(config) => clock_guess::run(config, profile),
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn every_game_is_registered_once()
    {
        let games = registry();
        assert_eq!(games.len(), GameId::ALL.len());
        for id in GameId::ALL {
            assert_eq!(games.iter().filter(|game| game.id == id).count(), 1);
            assert!(descriptor(id).is_some());
        }
    }
}
