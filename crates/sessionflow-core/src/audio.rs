//! Injectable audio side channel.
//!
//! Synthesis itself is out of scope; the engine only decides *when* the
//! ambient loop runs and which cue fires. Tests and headless callers use
//! [`NoopAudio`].

/// Short notification sounds fired at playback transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Fired on entry into `transition`.
    TaskComplete,
    /// Fired on entry into `completed`.
    SessionComplete,
}

/// Process-wide audio sink with an explicit lifecycle: ambient noise is
/// switched on at session start (when zen mode is enabled) and off
/// deterministically on stop or completion.
pub trait AudioService: Send + Sync {
    fn set_ambient(&self, enabled: bool);
    fn cue(&self, cue: Cue);
}

/// Does nothing; the default for tests and non-interactive use.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAudio;

impl AudioService for NoopAudio {
    fn set_ambient(&self, _enabled: bool) {}
    fn cue(&self, _cue: Cue) {}
}
