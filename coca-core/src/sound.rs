//! Event-to-audio-resource mapping. The core only resolves which resource
//! a state change should play; fetching and playback belong to the host.

use serde::{Deserialize, Serialize};

/// Cue points surfaced to the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEvent {
    /// A round was dealt.
    Start,
    /// Two containers traded places.
    Swap,
    Win,
    GameOver,
    /// A challenge check that neither won nor lost the round.
    Click,
}

/// Per-event audio resource references, overridable from the config's
/// `soundEffects` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundBank {
    pub start: String,
    pub swap: String,
    pub win: String,
    pub gameover: String,
    pub click: String,
}

impl Default for SoundBank {
    fn default() -> Self {
        Self {
            start: "sounds/start.mp3".to_string(),
            swap: "sounds/swap.mp3".to_string(),
            win: "sounds/win.mp3".to_string(),
            gameover: "sounds/gameover.mp3".to_string(),
            click: "sounds/click.mp3".to_string(),
        }
    }
}

impl SoundBank {
    pub fn resource(&self, event: SoundEvent) -> &str {
        match event {
            SoundEvent::Start => &self.start,
            SoundEvent::Swap => &self.swap,
            SoundEvent::Win => &self.win,
            SoundEvent::GameOver => &self.gameover,
            SoundEvent::Click => &self.click,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_event_has_a_default_resource() {
        let bank = SoundBank::default();
        for event in [
            SoundEvent::Start,
            SoundEvent::Swap,
            SoundEvent::Win,
            SoundEvent::GameOver,
            SoundEvent::Click,
        ] {
            assert!(!bank.resource(event).is_empty());
        }
    }

    #[test]
    fn overrides_keep_defaults_for_other_events() {
        let bank: SoundBank = serde_json::from_str(r#"{"gameover": "loss.ogg"}"#).unwrap();
        assert_eq!(bank.resource(SoundEvent::GameOver), "loss.ogg");
        assert_eq!(bank.resource(SoundEvent::Swap), "sounds/swap.mp3");
    }
}
