//! Count the coins: a shuffled pile is shown and the player types its value.

use crate::coins::{self, CoinIds, SelectedCoin};
use crate::config::CoinsCountConfig;
use crate::error::Error;
use crate::games::terminal::{self, Key};
use crate::money::format_cents;
use crate::round::{Phase, RoundController, RoundGame, Timing, Verdict};
use rand::RngCore;
use std::time::{Duration, Instant};

/// Enough for `config::MAX_COUNT_AMOUNT`.
const MAX_GUESS_DIGITS: usize = 3;
/// Wrong answers after which the right one is shown instead of a hint.
const REVEAL_AFTER_ATTEMPTS: u32 = 2;
const COINS_PER_ROW: usize = 6;

pub struct CoinsCount
{
    config: CoinsCountConfig,
    ids: CoinIds,
}

impl CoinsCount
{
    pub fn new(config: CoinsCountConfig) -> Self
    {
        Self {
            config,
            ids: CoinIds::new(),
        }
    }

    pub fn config(&self) -> &CoinsCountConfig
    {
        &self.config
    }
}

#[derive(Debug)]
pub struct CountRound
{
    pub target: u32,
    pub coins: Vec<SelectedCoin>,
    pub guess: String,
}

impl RoundGame for CoinsCount
{
    type Round = CountRound;

    fn new_round(&mut self, rng: &mut dyn RngCore) -> CountRound
    {
        let target = coins::draw_amount(self.config.lower_bound, self.config.upper_bound, rng);
        CountRound {
            target,
            coins: coins::coin_pool_for(target, &mut self.ids, rng),
            guess: String::new(),
        }
    }

    fn judge(&self, round: &CountRound, attempts: u32) -> Verdict
    {
        let Ok(guess) = round.guess.parse::<u32>() else {
            return Verdict::Rejected(None);
        };
        if guess == round.target {
            return Verdict::Correct(format!("Correct! That's {}", format_cents(round.target)));
        }
        let message = if attempts >= REVEAL_AFTER_ATTEMPTS {
            format!("The correct answer is {}", format_cents(round.target))
        } else if self.config.hint_direction_when_wrong {
            if guess > round.target {
                "Too high! Try again.".to_string()
            } else {
                "Too low! Try again.".to_string()
            }
        } else {
            "Wrong! Try again.".to_string()
        };
        Verdict::Incorrect(message)
    }

    fn timing(&self) -> Timing
    {
        Timing {
            after_correct: Duration::from_secs(2),
            after_incorrect: Duration::from_secs(2),
            feedback: Duration::from_secs(2),
        }
    }
}

impl RoundController<CoinsCount>
{
    pub fn press_digit(&mut self, digit: u8) -> bool
    {
        self.with_round(|_, round| {
            if digit > 9 || round.guess.len() >= MAX_GUESS_DIGITS {
                return false;
            }
            round.guess.push(char::from(b'0' + digit));
            true
        })
        .unwrap_or(false)
    }

    pub fn backspace(&mut self)
    {
        self.with_round(|_, round| {
            round.guess.pop();
        });
    }
}

pub fn run(config: CoinsCountConfig, profile: &str) -> Result<u32, Error>
{
    let game = RoundController::new(CoinsCount::new(config));
    terminal::play(game, handle_key, |game| render(game, profile))
}

fn handle_key(game: &mut RoundController<CoinsCount>, key: Key, now: Instant)
{
    match key {
        Key::Digit(digit) => {
            game.press_digit(digit);
        }
        Key::Backspace | Key::Delete => game.backspace(),
        Key::Enter => {
            game.submit(now);
        }
        _ => {}
    }
}

pub fn render(game: &RoundController<CoinsCount>, profile: &str) -> Vec<String>
{
    let view = game.snapshot();
    let mut lines = Vec::new();
    lines.push("Kid Games - Coins Count".to_string());
    lines.push(format!("Player: {profile}"));
    lines.push(terminal::progress_bar(view.progress_percent));
    lines.push(terminal::feedback_line(view.phase, view.feedback));
    lines.push(String::new());
    lines.push("How much money is this?".to_string());
    lines.push(String::new());

    if view.round.coins.is_empty() {
        lines.push("  (no coins)".to_string());
    }
    for row in view.round.coins.chunks(COINS_PER_ROW) {
        let cells: Vec<String> = row
            .iter()
            .map(|coin| format!("({:^9})", coin.denomination.name))
            .collect();
        lines.push(format!("  {}", cells.join(" ")));
    }

    lines.push(String::new());
    let guess = if view.round.guess.is_empty() {
        "___".to_string()
    } else {
        view.round.guess.clone()
    };
    lines.push(format!("Your answer: {guess}¢"));
    lines.push(String::new());
    if view.phase == Phase::Correct {
        lines.push("Get ready for the next one...".to_string());
    } else {
        lines.push("Type digits, Backspace to fix, Enter to check, Esc to quit".to_string());
    }
    lines
}
