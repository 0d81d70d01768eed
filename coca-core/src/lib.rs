//! Game-state engine for the color-container sorting widget.
//!
//! A session deals a shuffled row of colored containers and tracks the
//! player's progress toward the sorted reference order under one of three
//! modes (free play, countdown, limited checks). Everything here is
//! presentation-free: rendering, drag-and-drop and audio live with the host.

pub mod config;
pub mod locale;
pub mod session;
pub mod sound;
pub mod timer;

pub use config::{ConfigError, GameConfig};
pub use locale::{BundledLocales, LocaleError, LocaleProvider, Strings};
pub use session::{
    CheckOutcome, GameSession, Mode, Outcome, SessionState, SwapOutcome, TickOutcome,
};
pub use sound::{SoundBank, SoundEvent};
pub use timer::{NullTimer, TickTimer};
