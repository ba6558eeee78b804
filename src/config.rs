//! Per-game configuration as parents set it up for a profile.

use crate::coins;
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

pub const MIN_PROGRESS_PER_ANSWER: u32 = 1;
pub const MAX_PROGRESS_PER_ANSWER: u32 = 100;
/// Largest amount the three-digit counting keypad can type.
pub const MAX_COUNT_AMOUNT: u32 = 999;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameId
{
    #[serde(rename = "coins-count")]
    CoinsCount,
    #[serde(rename = "coins-math")]
    CoinsMath,
    #[serde(rename = "analog-clock-guess")]
    ClockGuess,
}

impl GameId
{
    pub const ALL: [GameId; 3] = [GameId::CoinsCount, GameId::CoinsMath, GameId::ClockGuess];

    pub fn as_str(self) -> &'static str
    {
        match self {
            GameId::CoinsCount => "coins-count",
            GameId::CoinsMath => "coins-math",
            GameId::ClockGuess => "analog-clock-guess",
        }
    }
}

impl fmt::Display for GameId
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Granularity
{
    #[default]
    #[serde(rename = "hour")]
    Hour,
    #[serde(rename = "30-minutes")]
    HalfHour,
    #[serde(rename = "15-minutes")]
    QuarterHour,
    #[serde(rename = "5-minutes")]
    FiveMinutes,
    #[serde(rename = "1-minute")]
    Minute,
}

impl Granularity
{
    pub fn minute_step(self) -> u32
    {
        match self {
            Granularity::Hour => 60,
            Granularity::HalfHour => 30,
            Granularity::QuarterHour => 15,
            Granularity::FiveMinutes => 5,
            Granularity::Minute => 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoinsCountConfig
{
    pub visible: bool,
    pub lower_bound: u32,
    pub upper_bound: u32,
    pub hint_direction_when_wrong: bool,
}

impl Default for CoinsCountConfig
{
    fn default() -> Self
    {
        Self {
            visible: true,
            lower_bound: 1,
            upper_bound: 10,
            hint_direction_when_wrong: true,
        }
    }
}

impl CoinsCountConfig
{
    pub fn validate(&self) -> Result<(), Error>
    {
        check_bounds(GameId::CoinsCount, self.lower_bound, self.upper_bound)?;
        check_ceiling(GameId::CoinsCount, self.upper_bound, MAX_COUNT_AMOUNT)
    }

    /// Clamp the way the settings form does: at least one cent, nothing the
    /// keypad cannot type, and the upper bound never below the lower one.
    pub fn sanitized(mut self) -> Self
    {
        let lower = self.lower_bound.clamp(1, MAX_COUNT_AMOUNT);
        let upper = self.upper_bound.clamp(lower, MAX_COUNT_AMOUNT);
        note_clamp(GameId::CoinsCount, "lowerBound", self.lower_bound, lower);
        note_clamp(GameId::CoinsCount, "upperBound", self.upper_bound, upper);
        self.lower_bound = lower;
        self.upper_bound = upper;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoinsMathConfig
{
    pub visible: bool,
    pub lower_bound: u32,
    pub upper_bound: u32,
    pub prevent_overuse: bool,
    pub display_coin_name: bool,
    pub display_coin_value: bool,
    pub display_amount_when_wrong: bool,
    pub show_progress_bar: bool,
    pub progress_per_answer: u32,
}

impl Default for CoinsMathConfig
{
    fn default() -> Self
    {
        Self {
            visible: true,
            lower_bound: 1,
            upper_bound: 10,
            prevent_overuse: true,
            display_coin_name: true,
            display_coin_value: true,
            display_amount_when_wrong: false,
            show_progress_bar: true,
            progress_per_answer: 10,
        }
    }
}

impl CoinsMathConfig
{
    pub fn validate(&self) -> Result<(), Error>
    {
        check_bounds(GameId::CoinsMath, self.lower_bound, self.upper_bound)?;
        check_ceiling(GameId::CoinsMath, self.upper_bound, self.max_amount())?;
        check_progress(GameId::CoinsMath, self.progress_per_answer)
    }

    /// Largest target the palette can still build under these settings.
    pub fn max_amount(&self) -> u32
    {
        if self.prevent_overuse { coins::max_capped_total() } else { u32::MAX }
    }

    pub fn sanitized(mut self) -> Self
    {
        let ceiling = self.max_amount();
        let lower = self.lower_bound.min(ceiling);
        let upper = self.upper_bound.max(1).max(lower).min(ceiling);
        let per_answer = clamp_progress(self.progress_per_answer);
        note_clamp(GameId::CoinsMath, "lowerBound", self.lower_bound, lower);
        note_clamp(GameId::CoinsMath, "upperBound", self.upper_bound, upper);
        note_clamp(GameId::CoinsMath, "progressPerAnswer", self.progress_per_answer, per_answer);
        self.lower_bound = lower;
        self.upper_bound = upper;
        self.progress_per_answer = per_answer;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClockGuessConfig
{
    pub visible: bool,
    pub granularity: Granularity,
    pub show_progress_bar: bool,
    pub progress_per_answer: u32,
}

impl Default for ClockGuessConfig
{
    fn default() -> Self
    {
        Self {
            visible: true,
            granularity: Granularity::Hour,
            show_progress_bar: true,
            progress_per_answer: 10,
        }
    }
}

impl ClockGuessConfig
{
    pub fn validate(&self) -> Result<(), Error>
    {
        check_progress(GameId::ClockGuess, self.progress_per_answer)
    }

    pub fn sanitized(mut self) -> Self
    {
        let per_answer = clamp_progress(self.progress_per_answer);
        note_clamp(GameId::ClockGuess, "progressPerAnswer", self.progress_per_answer, per_answer);
        self.progress_per_answer = per_answer;
        self
    }
}

/// One game's configuration, tagged by the game it belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameConfig
{
    CoinsCount(CoinsCountConfig),
    CoinsMath(CoinsMathConfig),
    ClockGuess(ClockGuessConfig),
}

impl GameConfig
{
    pub fn game_id(&self) -> GameId
    {
        match self {
            GameConfig::CoinsCount(_) => GameId::CoinsCount,
            GameConfig::CoinsMath(_) => GameId::CoinsMath,
            GameConfig::ClockGuess(_) => GameId::ClockGuess,
        }
    }

    pub fn visible(&self) -> bool
    {
        match self {
            GameConfig::CoinsCount(config) => config.visible,
            GameConfig::CoinsMath(config) => config.visible,
            GameConfig::ClockGuess(config) => config.visible,
        }
    }

    pub fn validate(&self) -> Result<(), Error>
    {
        match self {
            GameConfig::CoinsCount(config) => config.validate(),
            GameConfig::CoinsMath(config) => config.validate(),
            GameConfig::ClockGuess(config) => config.validate(),
        }
    }
}

/// Every game's configuration for one profile. Games missing from a file
/// stay missing, which hides them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig
{
    #[serde(rename = "coins-count", default, skip_serializing_if = "Option::is_none")]
    pub coins_count: Option<CoinsCountConfig>,
    #[serde(rename = "coins-math", default, skip_serializing_if = "Option::is_none")]
    pub coins_math: Option<CoinsMathConfig>,
    #[serde(rename = "analog-clock-guess", default, skip_serializing_if = "Option::is_none")]
    pub clock_guess: Option<ClockGuessConfig>,
}

impl Default for AppConfig
{
    fn default() -> Self
    {
        Self {
            coins_count: Some(CoinsCountConfig::default()),
            coins_math: Some(CoinsMathConfig::default()),
            clock_guess: Some(ClockGuessConfig::default()),
        }
    }
}

impl AppConfig
{
    pub fn get(&self, game: GameId) -> Option<GameConfig>
    {
        match game {
            GameId::CoinsCount => self.coins_count.clone().map(GameConfig::CoinsCount),
            GameId::CoinsMath => self.coins_math.clone().map(GameConfig::CoinsMath),
            GameId::ClockGuess => self.clock_guess.clone().map(GameConfig::ClockGuess),
        }
    }

    pub fn set(&mut self, config: GameConfig)
    {
        match config {
            GameConfig::CoinsCount(config) => self.coins_count = Some(config),
            GameConfig::CoinsMath(config) => self.coins_math = Some(config),
            GameConfig::ClockGuess(config) => self.clock_guess = Some(config),
        }
    }

    pub fn sanitized(self) -> Self
    {
        Self {
            coins_count: self.coins_count.map(CoinsCountConfig::sanitized),
            coins_math: self.coins_math.map(CoinsMathConfig::sanitized),
            clock_guess: self.clock_guess.map(ClockGuessConfig::sanitized),
        }
    }

    pub fn validate(&self) -> Result<(), Error>
    {
        for game in GameId::ALL {
            if let Some(config) = self.get(game) {
                config.validate()?;
            }
        }
        Ok(())
    }
}

fn check_bounds(game: GameId, lower: u32, upper: u32) -> Result<(), Error>
{
    if lower > upper {
        return Err(Error::InvalidConfig {
            game,
            reason: format!("lowerBound {lower} is above upperBound {upper}"),
        });
    }
    Ok(())
}

fn check_ceiling(game: GameId, upper: u32, max: u32) -> Result<(), Error>
{
    if upper > max {
        return Err(Error::InvalidConfig {
            game,
            reason: format!("upperBound {upper} is above the playable maximum {max}"),
        });
    }
    Ok(())
}

fn check_progress(game: GameId, per_answer: u32) -> Result<(), Error>
{
    if !(MIN_PROGRESS_PER_ANSWER..=MAX_PROGRESS_PER_ANSWER).contains(&per_answer) {
        return Err(Error::InvalidConfig {
            game,
            reason: format!(
                "progressPerAnswer {per_answer} must be {MIN_PROGRESS_PER_ANSWER}-{MAX_PROGRESS_PER_ANSWER}"
            ),
        });
    }
    Ok(())
}

fn clamp_progress(per_answer: u32) -> u32
{
    per_answer.clamp(MIN_PROGRESS_PER_ANSWER, MAX_PROGRESS_PER_ANSWER)
}

fn note_clamp(game: GameId, field: &str, before: u32, after: u32)
{
    if before != after {
        warn!(%game, field, before, after, "clamped config value");
    }
}
