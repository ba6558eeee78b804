//! Read the clock: an analog face is drawn and the player types `H:MM`.

use crate::clock::{ClockTime, GuessBuffer};
use crate::config::ClockGuessConfig;
use crate::error::Error;
use crate::games::terminal::{self, Key};
use crate::round::{Phase, RoundController, RoundGame, Timing, Verdict};
use rand::RngCore;
use std::time::{Duration, Instant};

const INVALID_TIME: &str = "Please enter a valid time";
const FACE_RADIUS: f64 = 9.0;
const HOUR_HAND: f64 = 5.0;
const MINUTE_HAND: f64 = 8.0;
/// Terminal cells are about twice as tall as they are wide.
const X_STRETCH: f64 = 2.0;

pub struct ClockGuess
{
    config: ClockGuessConfig,
}

impl ClockGuess
{
    pub fn new(config: ClockGuessConfig) -> Self
    {
        Self { config }
    }

    pub fn config(&self) -> &ClockGuessConfig
    {
        &self.config
    }
}

#[derive(Debug)]
pub struct ClockRound
{
    pub target: ClockTime,
    pub guess: GuessBuffer,
}

impl RoundGame for ClockGuess
{
    type Round = ClockRound;

    fn new_round(&mut self, rng: &mut dyn RngCore) -> ClockRound
    {
        ClockRound {
            target: ClockTime::random(self.config.granularity, rng),
            guess: GuessBuffer::new(),
        }
    }

    fn judge(&self, round: &ClockRound, _attempts: u32) -> Verdict
    {
        match round.guess.parse() {
            Err(_) => Verdict::Rejected(Some(INVALID_TIME.to_string())),
            Ok(guess) if guess == round.target => Verdict::Correct("Correct! Great job!".to_string()),
            Ok(_) => Verdict::Incorrect(format!("Try again! The correct time is {}", round.target)),
        }
    }

    fn timing(&self) -> Timing
    {
        Timing {
            after_correct: Duration::from_secs(2),
            after_incorrect: Duration::from_secs(2),
            feedback: Duration::from_secs(2),
        }
    }

    fn progress_per_answer(&self) -> u32
    {
        self.config.progress_per_answer
    }
}

impl RoundController<ClockGuess>
{
    pub fn press_digit(&mut self, digit: u8) -> bool
    {
        self.with_round(|_, round| round.guess.push_digit(digit))
            .unwrap_or(false)
    }

    pub fn press_colon(&mut self) -> bool
    {
        self.with_round(|_, round| round.guess.push_colon())
            .unwrap_or(false)
    }

    pub fn backspace(&mut self)
    {
        self.with_round(|_, round| round.guess.backspace());
    }
}

pub fn run(config: ClockGuessConfig, profile: &str) -> Result<u32, Error>
{
    let game = RoundController::new(ClockGuess::new(config));
    terminal::play(game, handle_key, |game| render(game, profile))
}

fn handle_key(game: &mut RoundController<ClockGuess>, key: Key, now: Instant)
{
    match key {
        Key::Digit(digit) => {
            game.press_digit(digit);
        }
        Key::Colon => {
            game.press_colon();
        }
        Key::Backspace | Key::Delete => game.backspace(),
        Key::Enter => {
            game.submit(now);
        }
        _ => {}
    }
}

pub fn render(game: &RoundController<ClockGuess>, profile: &str) -> Vec<String>
{
    let view = game.snapshot();
    let mut lines = Vec::new();
    lines.push("Kid Games - Analog Clock".to_string());
    lines.push(format!("Player: {profile}"));
    if game.game().config().show_progress_bar {
        lines.push(terminal::progress_bar(view.progress_percent));
    }
    lines.push(terminal::feedback_line(view.phase, view.feedback));
    lines.push("Enter the time as hour:minutes (example: 3:15)".to_string());
    lines.push(String::new());
    lines.extend(clock_face(view.round.target));
    lines.push(String::new());
    lines.push(format!("Your answer: {}", view.round.guess.display()));
    lines.push(String::new());
    if view.phase == Phase::Correct {
        lines.push("Get ready for the next one...".to_string());
    } else {
        lines.push("Digits and ':' to type, Backspace to fix, Enter to check, Esc to quit".to_string());
    }
    lines
}

/// Character-cell clock face with hands at the time's hand angles.
pub fn clock_face(time: ClockTime) -> Vec<String>
{
    let rows = (FACE_RADIUS * 2.0) as usize + 1;
    let cols = (FACE_RADIUS * 2.0 * X_STRETCH) as usize + 3;
    let center_row = FACE_RADIUS;
    let center_col = FACE_RADIUS * X_STRETCH + 1.0;
    let mut grid = vec![vec![' '; cols]; rows];

    let plot = |grid: &mut Vec<Vec<char>>, radius: f64, angle: f64, ch: char| {
        let radians = angle.to_radians();
        let col = (center_col + radius * X_STRETCH * radians.cos()).round();
        let row = (center_row + radius * radians.sin()).round();
        if row >= 0.0 && col >= 0.0 && (row as usize) < rows && (col as usize) < cols {
            grid[row as usize][col as usize] = ch;
        }
    };

    for step in 0..60 {
        plot(&mut grid, FACE_RADIUS, step as f64 * 6.0, '.');
    }

    for (angle, ch) in [
        (time.hour_hand_angle(), 'o'),
        (time.minute_hand_angle(), '*'),
    ] {
        let length = if ch == 'o' { HOUR_HAND } else { MINUTE_HAND };
        let mut radius = 1.0;
        while radius <= length {
            plot(&mut grid, radius, angle, ch);
            radius += 0.5;
        }
    }

    for hour in 1..=12u32 {
        let angle = hour as f64 * 30.0 - 90.0;
        let label = hour.to_string();
        let radians = angle.to_radians();
        let radius = FACE_RADIUS - 1.0;
        let row = (center_row + radius * radians.sin()).round() as usize;
        let col = (center_col + radius * X_STRETCH * radians.cos()).round() as usize;
        let start = col.saturating_sub(label.len() / 2);
        for (offset, ch) in label.chars().enumerate() {
            if let Some(cell) = grid.get_mut(row).and_then(|line| line.get_mut(start + offset)) {
                *cell = ch;
            }
        }
    }

    grid[center_row as usize][center_col as usize] = '+';
    grid.into_iter()
        .map(|line| line.into_iter().collect::<String>().trim_end().to_string())
        .collect()
}
