//! Make the amount: the player builds a target value from the coin palette.

use crate::coins::{self, CATALOGUE, CoinId, CoinIds, CoinPool, Denomination, SelectedCoin};
use crate::config::CoinsMathConfig;
use crate::error::Error;
use crate::games::terminal::{self, Key};
use crate::money::format_cents;
use crate::round::{Phase, RoundController, RoundGame, Timing, Verdict};
use rand::RngCore;
use std::cell::Cell;
use std::time::{Duration, Instant};
use tracing::debug;

const OVERUSE_MESSAGE: &str = "Try something else!";

pub struct CoinsMath
{
    config: CoinsMathConfig,
    ids: CoinIds,
}

impl CoinsMath
{
    pub fn new(config: CoinsMathConfig) -> Self
    {
        Self {
            config,
            ids: CoinIds::new(),
        }
    }

    pub fn config(&self) -> &CoinsMathConfig
    {
        &self.config
    }
}

#[derive(Debug)]
pub struct MathRound
{
    pub target: u32,
    pub pool: CoinPool,
}

impl RoundGame for CoinsMath
{
    type Round = MathRound;

    fn new_round(&mut self, rng: &mut dyn RngCore) -> MathRound
    {
        MathRound {
            target: coins::draw_amount(self.config.lower_bound, self.config.upper_bound, rng),
            pool: CoinPool::new(),
        }
    }

    fn judge(&self, round: &MathRound, _attempts: u32) -> Verdict
    {
        let total = round.pool.total();
        if total == round.target {
            Verdict::Correct(format!("Correct! That's {}", format_cents(total)))
        } else if self.config.display_amount_when_wrong {
            Verdict::Incorrect(format!("Wrong! You have {}, try again.", format_cents(total)))
        } else {
            Verdict::Incorrect("Wrong! Try again.".to_string())
        }
    }

    fn timing(&self) -> Timing
    {
        Timing {
            after_correct: Duration::from_secs(3),
            after_incorrect: Duration::from_secs(3),
            feedback: Duration::from_secs(3),
        }
    }

    fn progress_per_answer(&self) -> u32
    {
        self.config.progress_per_answer
    }
}

impl RoundController<CoinsMath>
{
    /// Put a coin in the pool. Refused (with a hint) when the denomination is
    /// used up and overuse is prevented.
    pub fn add_coin(&mut self, denomination: Denomination, now: Instant) -> Option<SelectedCoin>
    {
        let added = self.with_round(|game, round| {
            round
                .pool
                .add(denomination, game.config.prevent_overuse, &mut game.ids)
        })?;
        match added {
            Ok(coin) => {
                self.clear_feedback();
                Some(coin)
            }
            Err(overuse) => {
                debug!(%overuse, "coin refused");
                self.flash(now, OVERUSE_MESSAGE.to_string());
                None
            }
        }
    }

    pub fn remove_coin(&mut self, id: CoinId) -> Option<SelectedCoin>
    {
        let removed = self.with_round(|_, round| round.pool.remove(id))?;
        self.clear_feedback();
        removed
    }

    pub fn total(&self) -> u32
    {
        self.round().pool.total()
    }
}

pub fn run(config: CoinsMathConfig, profile: &str) -> Result<u32, Error>
{
    let game = RoundController::new(CoinsMath::new(config));
    let cursor = Cell::new(0usize);
    terminal::play(
        game,
        |game, key, now| handle_key(game, key, now, &cursor),
        |game| render(game, profile, cursor.get()),
    )
}

fn handle_key(game: &mut RoundController<CoinsMath>, key: Key, now: Instant, cursor: &Cell<usize>)
{
    let len = game.round().pool.len();
    match key {
        Key::Digit(digit) => {
            if let Some(denomination) = palette_key(digit) {
                if game.add_coin(denomination, now).is_some() {
                    cursor.set(game.round().pool.len() - 1);
                }
            }
        }
        Key::Left => cursor.set(cursor.get().saturating_sub(1)),
        Key::Right => cursor.set((cursor.get() + 1).min(len.saturating_sub(1))),
        Key::Backspace | Key::Delete => {
            if let Some(coin) = game.round().pool.coins().get(cursor.get()).copied() {
                game.remove_coin(coin.id);
            }
        }
        Key::Enter => {
            game.submit(now);
        }
        _ => {}
    }
    let len = game.round().pool.len();
    cursor.set(cursor.get().min(len.saturating_sub(1)));
}

/// Keys `1`-`4` pick from the palette in catalogue order.
fn palette_key(digit: u8) -> Option<Denomination>
{
    let index = usize::from(digit).checked_sub(1)?;
    CATALOGUE.get(index).copied()
}

pub fn render(game: &RoundController<CoinsMath>, profile: &str, cursor: usize) -> Vec<String>
{
    let view = game.snapshot();
    let config = game.game().config();
    let mut lines = Vec::new();
    lines.push("Kid Games - Coins Math".to_string());
    lines.push(format!("Player: {profile}"));
    if config.show_progress_bar {
        lines.push(terminal::progress_bar(view.progress_percent));
    }
    lines.push(terminal::feedback_line(view.phase, view.feedback));
    lines.push(String::new());
    lines.push(format!("Make {}", format_cents(view.round.target)));
    lines.push(String::new());

    let coins = view.round.pool.coins();
    if coins.is_empty() {
        lines.push("  Tap coins below to add them".to_string());
    } else {
        let cells: Vec<String> = coins
            .iter()
            .enumerate()
            .map(|(idx, coin)| {
                if idx == cursor {
                    format!("[{}]", coin.denomination.name)
                } else {
                    format!(" {} ", coin.denomination.name)
                }
            })
            .collect();
        lines.push(format!("  {}", cells.join("")));
    }
    lines.push(format!("  You have {}", format_cents(view.round.pool.total())));
    lines.push(String::new());

    let palette: Vec<String> = CATALOGUE
        .iter()
        .enumerate()
        .map(|(idx, denomination)| palette_label(idx + 1, denomination, config))
        .collect();
    lines.push(palette.join("   "));
    lines.push(String::new());
    if view.phase == Phase::Correct {
        lines.push("Get ready for the next one...".to_string());
    } else {
        lines.push(
            "1-4 add a coin, Left/Right pick, Backspace removes, Enter checks, Esc quits".to_string(),
        );
    }
    lines
}

fn palette_label(key: usize, denomination: &Denomination, config: &CoinsMathConfig) -> String
{
    let mut label = format!("{key}:");
    if config.display_coin_name {
        label.push(' ');
        label.push_str(denomination.name);
    }
    if config.display_coin_value {
        label.push_str(&format!(" {}", format_cents(denomination.value)));
    }
    label
}
