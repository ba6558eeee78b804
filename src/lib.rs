//! Educational mini-games for kids: counting coins, making change and
//! reading an analog clock.
//!
//! Each game is a [`round::RoundGame`] driven by the shared
//! [`round::RoundController`]; the terminal screens in [`games`] are one
//! way to put them in front of a player.

pub mod clock;
pub mod coins;
pub mod config;
pub mod error;
pub mod games;
pub mod money;
pub mod profile;
pub mod round;
pub mod timer;

pub use error::Error;
