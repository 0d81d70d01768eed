//! Browser bindings for the sorting-game session.
//!
//! `CocaGame` wraps a [`coca_core::GameSession`] behind wasm-bindgen. The
//! host page owns all rendering: it constructs the widget with a config
//! object, forwards drag-and-drop as `swap` calls, and receives a JSON
//! snapshot through its update callback after every state change. Each
//! widget is an independently constructed object; nothing here is global.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::Function;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use coca_core::{
    BundledLocales, CheckOutcome, ConfigError, GameConfig, GameSession, Mode, Outcome,
    SessionState, SoundBank, SoundEvent, Strings, SwapOutcome, TickOutcome, locale,
};

mod interval;
mod utils;

use interval::JsInterval;

/// Snapshot pushed to the host after every state change.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct Update {
    state: &'static str,
    mode: &'static str,
    /// The current container arrangement, for the host to render.
    colors: Vec<String>,
    matched: usize,
    total: usize,
    status_text: String,
    timer_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    attempts_text: Option<String>,
    dir: String,
    /// Audio resource the host should play for this change, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    sound: Option<String>,
}

struct Widget {
    session: GameSession<JsInterval>,
    strings: Strings,
    sounds: SoundBank,
    on_update: Option<Function>,
    /// Sticky result line: live match feedback, then the win or game-over
    /// message once the round ends.
    status_text: String,
}

impl Widget {
    fn snapshot(&self, sound: Option<SoundEvent>) -> Update {
        let session = &self.session;
        Update {
            state: match session.state() {
                SessionState::NotStarted => "notStarted",
                SessionState::Running => "running",
                SessionState::Ended(Outcome::Win) => "won",
                SessionState::Ended(Outcome::Loss) => "lost",
            },
            mode: match session.mode() {
                Mode::Free => "free",
                Mode::Timed => "timed",
                Mode::Challenge => "challenge",
            },
            colors: session.current().to_vec(),
            matched: session.match_count(),
            total: session.current().len(),
            status_text: self.status_text.clone(),
            timer_text: self.timer_text(),
            attempts_text: (session.mode() == Mode::Challenge)
                .then(|| self.strings.attempts_text(session.attempts_left())),
            dir: self.strings.dir.clone(),
            sound: sound.map(|event| self.sounds.resource(event).to_string()),
        }
    }

    fn timer_text(&self) -> String {
        match self.session.mode() {
            Mode::Timed => self.strings.time_text(self.session.remaining()),
            Mode::Free | Mode::Challenge => self.strings.time_text(self.session.elapsed()),
        }
    }
}

/// The sorting-game widget, one instance per host container.
#[wasm_bindgen]
pub struct CocaGame {
    inner: Rc<RefCell<Widget>>,
}

#[wasm_bindgen]
impl CocaGame {
    /// Build a widget from a host-supplied config object. Query-string
    /// parameters (`?locale=fa&mode=timed`) override the config the same way
    /// the host page uses them for deep links.
    #[wasm_bindgen(constructor)]
    pub fn new(config: &JsValue) -> Result<CocaGame, JsValue> {
        utils::init_console_log();
        let mut config =
            parse_config(config).map_err(|err| JsValue::from_str(&err.to_string()))?;
        apply_query_overrides(&mut config);
        let strings = locale::resolve(&BundledLocales, config.locale.as_deref());
        let sounds = config.sound_effects.clone();
        let inner = Rc::new_cyclic(|weak: &Weak<RefCell<Widget>>| {
            let weak = weak.clone();
            // The interval closure holds a weak reference; a callback that
            // outlives the widget finds nothing to tick.
            let timer = JsInterval::new(move || {
                if let Some(widget) = weak.upgrade() {
                    handle_tick(&widget);
                }
            });
            RefCell::new(Widget {
                session: GameSession::with_timer(&config, timer),
                strings,
                sounds,
                on_update: None,
                status_text: String::new(),
            })
        });
        Ok(CocaGame { inner })
    }

    /// Register a callback receiving a JSON snapshot after every change.
    pub fn set_onupdate(&self, callback: &Function) {
        self.inner.borrow_mut().on_update = Some(callback.clone());
    }

    /// Deal and shuffle a fresh round.
    pub fn start(&self) {
        let event = {
            let mut widget = self.inner.borrow_mut();
            widget.status_text.clear();
            widget.session.start(&mut rand::thread_rng());
            if widget.session.state() == SessionState::Ended(Outcome::Win) {
                widget.status_text = widget.strings.win_message.clone();
                SoundEvent::Win
            } else {
                SoundEvent::Start
            }
        };
        emit_update(&self.inner, Some(event));
    }

    /// Restarting is dealing again; the previous round's timer is cancelled
    /// before any state is reset.
    pub fn restart(&self) {
        self.start();
    }

    /// Exchange two containers after a drag-and-drop.
    pub fn swap(&self, from: usize, to: usize) {
        let event = {
            let mut widget = self.inner.borrow_mut();
            match widget.session.swap(from, to) {
                SwapOutcome::Ignored => return,
                SwapOutcome::Swapped => Some(SoundEvent::Swap),
                SwapOutcome::Progress { matched, total } => {
                    widget.status_text = widget.strings.correct_count_text(matched, total);
                    Some(SoundEvent::Swap)
                }
                SwapOutcome::Won => {
                    widget.status_text = widget.strings.win_message.clone();
                    Some(SoundEvent::Win)
                }
            }
        };
        emit_update(&self.inner, event);
    }

    /// Challenge-mode explicit answer check.
    pub fn check(&self) {
        let event = {
            let mut widget = self.inner.borrow_mut();
            match widget.session.check() {
                CheckOutcome::Ignored => return,
                CheckOutcome::Won => {
                    widget.status_text = widget.strings.win_message.clone();
                    Some(SoundEvent::Win)
                }
                CheckOutcome::Missed { matched, total, .. } => {
                    widget.status_text = widget.strings.correct_count_text(matched, total);
                    Some(SoundEvent::Click)
                }
                CheckOutcome::Lost { .. } => {
                    widget.status_text = widget.strings.game_over_message.clone();
                    Some(SoundEvent::GameOver)
                }
            }
        };
        emit_update(&self.inner, event);
    }

    /// The resolved display strings, as JSON, for the host's static labels.
    pub fn strings(&self) -> String {
        serde_json::to_string(&self.inner.borrow().strings).unwrap_or_default()
    }

    /// The current state, as JSON, without waiting for a change.
    pub fn snapshot(&self) -> String {
        serde_json::to_string(&self.inner.borrow().snapshot(None)).unwrap_or_default()
    }

    pub fn dir(&self) -> String {
        self.inner.borrow().strings.dir.clone()
    }

    pub fn is_over(&self) -> bool {
        self.inner.borrow().session.state().is_over()
    }
}

fn handle_tick(inner: &Rc<RefCell<Widget>>) {
    let event = {
        let mut widget = inner.borrow_mut();
        match widget.session.tick() {
            TickOutcome::Ignored => return,
            TickOutcome::TimedOut => {
                widget.status_text = widget.strings.game_over_message.clone();
                Some(SoundEvent::GameOver)
            }
            TickOutcome::Elapsed(_) | TickOutcome::Remaining(_) => None,
        }
    };
    emit_update(inner, event);
}

/// Serialize inside the borrow, call out after it is released; a host that
/// re-enters the widget from its callback cannot hit a double borrow.
fn emit_update(inner: &Rc<RefCell<Widget>>, sound: Option<SoundEvent>) {
    let (callback, payload) = {
        let widget = inner.borrow();
        let callback = match &widget.on_update {
            Some(cb) => cb.clone(),
            None => return,
        };
        match serde_json::to_string(&widget.snapshot(sound)) {
            Ok(payload) => (callback, payload),
            Err(_) => return,
        }
    };
    let _ = callback.call1(&JsValue::NULL, &JsValue::from_str(&payload));
}

fn parse_config(value: &JsValue) -> Result<GameConfig, ConfigError> {
    if value.is_undefined() || value.is_null() {
        return Ok(GameConfig::default());
    }
    let text = js_sys::JSON::stringify(value)
        .ok()
        .and_then(|s| s.as_string())
        .unwrap_or_else(|| "{}".to_string());
    GameConfig::from_json(&text)
}

fn apply_query_overrides(config: &mut GameConfig) {
    let search = match web_sys::window().and_then(|w| w.location().search().ok()) {
        Some(s) => s,
        None => return,
    };
    if let Some(locale) = utils::get_query_param(&search, "locale") {
        config.locale = Some(locale);
    }
    if let Some(mode) = utils::get_query_param(&search, "mode") {
        match mode.as_str() {
            "free" => config.mode = Mode::Free,
            "timed" => config.mode = Mode::Timed,
            "challenge" => config.mode = Mode::Challenge,
            other => utils::log(&format!("unknown mode '{}' in query string", other)),
        }
    }
}
