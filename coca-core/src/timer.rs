/// Cancellable once-per-second timer handle owned by a session.
///
/// Implementations schedule a recurring callback that drives the session's
/// `tick`; the session guarantees `cancel` runs on every path that leaves
/// the running state, so an implementation never outlives the round it was
/// started for.
pub trait TickTimer {
    /// Begin ticking, replacing any previous schedule.
    fn start(&mut self);
    /// Stop ticking. Must be idempotent.
    fn cancel(&mut self);
}

/// Timer for headless sessions driven by explicit `tick` calls.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTimer;

impl TickTimer for NullTimer {
    fn start(&mut self) {}
    fn cancel(&mut self) {}
}
