//! The game-session state machine.
//!
//! A [`GameSession`] owns the shuffled `current` sequence, the sorted
//! `target` it is measured against, the mode configuration, the attempt and
//! time counters, and the timer handle. It is driven by four events:
//! `start`, `swap`, `check` and `tick`.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::timer::{NullTimer, TickTimer};

/// How a round is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Continuous feedback, no clock pressure.
    #[default]
    Free,
    /// Countdown from the configured limit; loss at zero.
    Timed,
    /// A limited number of explicit checks; feedback only on check.
    Challenge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
}

/// `Ended` is terminal; a restart builds fresh state rather than resuming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    Running,
    Ended(Outcome),
}

impl SessionState {
    pub fn is_running(&self) -> bool {
        matches!(self, SessionState::Running)
    }

    pub fn is_over(&self) -> bool {
        matches!(self, SessionState::Ended(_))
    }
}

/// Result of a drag-and-drop swap, for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapOutcome {
    /// Not running, identical indices, or an index out of range.
    Ignored,
    /// Swapped without feedback; challenge mode scores on explicit check.
    Swapped,
    /// Swapped, with live match feedback (free and timed play).
    Progress { matched: usize, total: usize },
    /// The swap completed the target order.
    Won,
}

/// Result of an explicit challenge-mode check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Not in challenge mode, or not running.
    Ignored,
    Won,
    /// Wrong arrangement with attempts to spare.
    Missed {
        matched: usize,
        total: usize,
        attempts_left: u32,
    },
    /// Wrong arrangement on the last attempt.
    Lost { matched: usize, total: usize },
}

/// Result of a one-second timer tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Ignored,
    /// Seconds since start (free and challenge play, informational).
    Elapsed(u32),
    /// Seconds left on the countdown (timed play).
    Remaining(u32),
    /// The countdown hit zero; the round is lost.
    TimedOut,
}

/// One round of the sorting game.
///
/// The timer handle is owned here so that every transition out of
/// [`SessionState::Running`] cancels it on the same code path that changes
/// the state; a stale callback can never mutate a finished round.
pub struct GameSession<T: TickTimer = NullTimer> {
    mode: Mode,
    attempt_limit: u32,
    time_limit: u32,
    count: usize,
    palette: Vec<String>,
    current: Vec<String>,
    target: Vec<String>,
    state: SessionState,
    attempts_left: u32,
    elapsed: u32,
    timer: T,
}

impl GameSession<NullTimer> {
    /// Session without a scheduled timer; `tick` is driven by the caller.
    pub fn new(config: &GameConfig) -> Self {
        Self::with_timer(config, NullTimer)
    }
}

impl<T: TickTimer> GameSession<T> {
    pub fn with_timer(config: &GameConfig, timer: T) -> Self {
        let attempt_limit = config.resolved_attempt_limit();
        Self {
            mode: config.mode,
            attempt_limit,
            time_limit: config.resolved_time_limit(),
            count: config.resolved_count(),
            palette: config.palette(),
            current: Vec::new(),
            target: Vec::new(),
            state: SessionState::NotStarted,
            attempts_left: attempt_limit,
            elapsed: 0,
            timer,
        }
    }

    /// Deal a fresh round: draw the containers, fix the sorted target,
    /// shuffle, reset the counters and start the clock.
    ///
    /// Safe to call mid-round; the previous schedule is cancelled before any
    /// state is reset so two timers never race on one session.
    pub fn start<R: Rng>(&mut self, rng: &mut R) {
        self.timer.cancel();
        self.current = self.palette[..self.count].to_vec();
        let mut target = self.current.clone();
        target.sort();
        self.target = target;
        self.current.shuffle(rng);
        self.attempts_left = self.attempt_limit;
        self.elapsed = 0;
        self.state = SessionState::Running;
        if self.current.len() <= 1 {
            // Nothing to order; the round is won before the clock matters.
            self.finish(Outcome::Win);
        } else {
            self.timer.start();
        }
    }

    /// Exchange two containers. Out-of-range indices and `i == j` are
    /// rejected as no-ops, with no feedback side effects.
    pub fn swap(&mut self, i: usize, j: usize) -> SwapOutcome {
        if !self.state.is_running()
            || i == j
            || i >= self.current.len()
            || j >= self.current.len()
        {
            return SwapOutcome::Ignored;
        }
        self.current.swap(i, j);
        match self.mode {
            Mode::Challenge => SwapOutcome::Swapped,
            Mode::Free | Mode::Timed => {
                let matched = self.match_count();
                let total = self.current.len();
                if matched == total {
                    self.finish(Outcome::Win);
                    SwapOutcome::Won
                } else {
                    SwapOutcome::Progress { matched, total }
                }
            }
        }
    }

    /// Spend one challenge-mode attempt on the current arrangement.
    pub fn check(&mut self) -> CheckOutcome {
        if self.mode != Mode::Challenge || !self.state.is_running() {
            return CheckOutcome::Ignored;
        }
        let matched = self.match_count();
        let total = self.current.len();
        if matched == total {
            self.finish(Outcome::Win);
            return CheckOutcome::Won;
        }
        self.attempts_left = self.attempts_left.saturating_sub(1);
        if self.attempts_left == 0 {
            self.finish(Outcome::Loss);
            CheckOutcome::Lost { matched, total }
        } else {
            CheckOutcome::Missed {
                matched,
                total,
                attempts_left: self.attempts_left,
            }
        }
    }

    /// Advance the clock by one second.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.is_running() {
            return TickOutcome::Ignored;
        }
        self.elapsed += 1;
        match self.mode {
            Mode::Free | Mode::Challenge => TickOutcome::Elapsed(self.elapsed),
            Mode::Timed => {
                let remaining = self.time_limit.saturating_sub(self.elapsed);
                if remaining == 0 {
                    self.finish(Outcome::Loss);
                    TickOutcome::TimedOut
                } else {
                    TickOutcome::Remaining(remaining)
                }
            }
        }
    }

    /// Positions where `current` already agrees with `target`.
    pub fn match_count(&self) -> usize {
        self.current
            .iter()
            .zip(&self.target)
            .filter(|(a, b)| a == b)
            .count()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn current(&self) -> &[String] {
        &self.current
    }

    pub fn target(&self) -> &[String] {
        &self.target
    }

    pub fn attempts_left(&self) -> u32 {
        self.attempts_left
    }

    /// Seconds since start.
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    /// Seconds left on the countdown. Meaningful in timed play only.
    pub fn remaining(&self) -> u32 {
        self.time_limit.saturating_sub(self.elapsed)
    }

    fn finish(&mut self, outcome: Outcome) {
        self.timer.cancel();
        self.state = SessionState::Ended(outcome);
    }
}
