//! The round lifecycle every game shares: play, judge, show feedback, then
//! either retry the same round or move on to a fresh one.

use crate::timer::{DelaySlot, TimerHandle};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Correct answers needed to fill the bar when a game has no
/// `progressPerAnswer` setting.
pub const DEFAULT_MAX_PROGRESS: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase
{
    Playing,
    Correct,
    Incorrect,
}

/// How a game judged a submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict
{
    Correct(String),
    Incorrect(String),
    /// Not a real answer (empty, malformed). No attempt is used.
    Rejected(Option<String>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome
{
    Correct,
    Incorrect,
    Rejected,
    Ignored,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition
{
    NextRound,
    Retry,
    ClearFeedback,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing
{
    pub after_correct: Duration,
    pub after_incorrect: Duration,
    pub feedback: Duration,
}

pub trait RoundGame
{
    /// Target plus whatever the player has entered so far.
    type Round: fmt::Debug;

    fn new_round(&mut self, rng: &mut dyn RngCore) -> Self::Round;

    /// `attempts` counts the submissions made before this one.
    fn judge(&self, round: &Self::Round, attempts: u32) -> Verdict;

    fn timing(&self) -> Timing;

    fn progress_per_answer(&self) -> u32
    {
        100 / DEFAULT_MAX_PROGRESS
    }
}

/// Read-only view handed to whatever draws the game.
#[derive(Debug)]
pub struct Snapshot<'a, R>
{
    pub phase: Phase,
    pub round: &'a R,
    pub attempts: u32,
    pub progress: u32,
    pub progress_percent: u32,
    pub feedback: Option<&'a str>,
}

pub struct RoundController<G: RoundGame>
{
    game: G,
    round: G::Round,
    phase: Phase,
    attempts: u32,
    progress: u32,
    feedback: Option<String>,
    timer: DelaySlot<Transition>,
    rng: StdRng,
    active: bool,
}

impl<G: RoundGame> RoundController<G>
{
    pub fn new(game: G) -> Self
    {
        Self::with_rng(game, StdRng::from_entropy())
    }

    pub fn with_rng(mut game: G, mut rng: StdRng) -> Self
    {
        let round = game.new_round(&mut rng);
        debug!(?round, "round started");
        Self {
            game,
            round,
            phase: Phase::Playing,
            attempts: 0,
            progress: 0,
            feedback: None,
            timer: DelaySlot::new(),
            rng,
            active: true,
        }
    }

    pub fn game(&self) -> &G
    {
        &self.game
    }

    pub fn round(&self) -> &G::Round
    {
        &self.round
    }

    pub fn phase(&self) -> Phase
    {
        self.phase
    }

    pub fn attempts(&self) -> u32
    {
        self.attempts
    }

    pub fn progress(&self) -> u32
    {
        self.progress
    }

    pub fn progress_percent(&self) -> u32
    {
        self.progress
            .saturating_mul(self.game.progress_per_answer())
            .min(100)
    }

    pub fn feedback(&self) -> Option<&str>
    {
        self.feedback.as_deref()
    }

    pub fn pending(&self) -> Option<(TimerHandle, Transition)>
    {
        Some((self.timer.handle()?, *self.timer.action()?))
    }

    pub fn is_active(&self) -> bool
    {
        self.active
    }

    pub fn snapshot(&self) -> Snapshot<'_, G::Round>
    {
        Snapshot {
            phase: self.phase,
            round: &self.round,
            attempts: self.attempts,
            progress: self.progress,
            progress_percent: self.progress_percent(),
            feedback: self.feedback(),
        }
    }

    /// Throw the current round away and draw a new one. Progress stays.
    pub fn reset(&mut self)
    {
        self.timer.cancel();
        self.round = self.game.new_round(&mut self.rng);
        self.phase = Phase::Playing;
        self.attempts = 0;
        self.feedback = None;
        debug!(round = ?self.round, "round started");
    }

    pub fn submit(&mut self, now: Instant) -> Outcome
    {
        if !self.accepts_input() {
            return Outcome::Ignored;
        }
        let timing = self.game.timing();
        match self.game.judge(&self.round, self.attempts) {
            Verdict::Correct(message) => {
                self.attempts += 1;
                self.progress += 1;
                info!(attempts = self.attempts, progress = self.progress, "correct answer");
                self.phase = Phase::Correct;
                self.feedback = Some(message);
                self.timer.schedule(now, timing.after_correct, Transition::NextRound);
                Outcome::Correct
            }
            Verdict::Incorrect(message) => {
                self.attempts += 1;
                debug!(attempts = self.attempts, "incorrect answer");
                self.phase = Phase::Incorrect;
                self.feedback = Some(message);
                self.timer.schedule(now, timing.after_incorrect, Transition::Retry);
                Outcome::Incorrect
            }
            Verdict::Rejected(message) => {
                if let Some(message) = message {
                    self.flash(now, message);
                }
                Outcome::Rejected
            }
        }
    }

    /// Apply the pending transition if it is due.
    pub fn tick(&mut self, now: Instant) -> Option<Transition>
    {
        if !self.active {
            return None;
        }
        let transition = self.timer.take_due(now)?;
        self.apply(transition);
        Some(transition)
    }

    /// Apply the pending transition from an external timer. Handles that
    /// were replaced or cancelled in the meantime do nothing.
    pub fn fire(&mut self, handle: TimerHandle) -> Option<Transition>
    {
        if !self.active {
            return None;
        }
        let transition = self.timer.take_if_current(handle)?;
        self.apply(transition);
        Some(transition)
    }

    /// The game screen is going away. Nothing pending may run after this.
    pub fn shutdown(&mut self)
    {
        self.timer.cancel();
        self.active = false;
        debug!(progress = self.progress, "controller shut down");
    }

    /// Run an input operation against the round, only while playing.
    pub(crate) fn with_round<T>(&mut self, op: impl FnOnce(&mut G, &mut G::Round) -> T) -> Option<T>
    {
        if !self.accepts_input() {
            return None;
        }
        Some(op(&mut self.game, &mut self.round))
    }

    /// Show a transient message that clears itself.
    pub(crate) fn flash(&mut self, now: Instant, message: String)
    {
        let delay = self.game.timing().feedback;
        self.feedback = Some(message);
        self.timer.schedule(now, delay, Transition::ClearFeedback);
    }

    pub(crate) fn clear_feedback(&mut self)
    {
        if self.timer.action() == Some(&Transition::ClearFeedback) {
            self.timer.cancel();
        }
        if self.phase == Phase::Playing {
            self.feedback = None;
        }
    }

    fn accepts_input(&self) -> bool
    {
        self.active && self.phase == Phase::Playing
    }

    fn apply(&mut self, transition: Transition)
    {
        match transition {
            Transition::NextRound => self.reset(),
            Transition::Retry => {
                self.phase = Phase::Playing;
                self.feedback = None;
            }
            Transition::ClearFeedback => self.feedback = None,
        }
    }
}
