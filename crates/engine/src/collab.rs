//! External collaborators: sound, score storage and settings navigation.
//!
//! The game loop calls these inline, so implementations must return quickly.
//! Sound is best effort: a sink that cannot play simply does nothing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::types::SoundKind;

/// Fire-and-forget sound output
pub trait SoundSink: Send + Sync {
    fn play(&self, sound: SoundKind);
}

impl<F> SoundSink for F
where
    F: Fn(SoundKind) + Send + Sync,
{
    fn play(&self, sound: SoundKind) {
        self(sound)
    }
}

/// Persistent score
pub trait ScoreStore: Send + Sync {
    fn score(&self) -> u32;
    fn set_score(&self, score: u32);
}

/// Host settings screen
pub trait SettingsNav: Send + Sync {
    fn open_settings(&self);
}

/// Sound sink that only logs the cue
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggedSound;

impl SoundSink for LoggedSound {
    fn play(&self, sound: SoundKind) {
        debug!(sound = sound.as_str(), "play sound");
    }
}

/// In-memory score store
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    score: AtomicU32,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn score(&self) -> u32 {
        self.score.load(Ordering::Relaxed)
    }

    fn set_score(&self, score: u32) {
        self.score.store(score, Ordering::Relaxed);
    }
}

/// Settings navigation that only logs the request
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggedSettings;

impl SettingsNav for LoggedSettings {
    fn open_settings(&self) {
        debug!("open settings requested");
    }
}

/// Everything the game loop talks to outside the state machine
#[derive(Clone)]
pub struct Collaborators {
    pub sound: Arc<dyn SoundSink>,
    pub score: Arc<dyn ScoreStore>,
    pub settings: Arc<dyn SettingsNav>,
}

impl Collaborators {
    pub fn with_sound(mut self, sound: Arc<dyn SoundSink>) -> Self {
        self.sound = sound;
        self
    }

    pub fn with_score(mut self, score: Arc<dyn ScoreStore>) -> Self {
        self.score = score;
        self
    }

    pub fn with_settings(mut self, settings: Arc<dyn SettingsNav>) -> Self {
        self.settings = settings;
        self
    }
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            sound: Arc::new(LoggedSound),
            score: Arc::new(MemoryScoreStore::new()),
            settings: Arc::new(LoggedSettings),
        }
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators")
            .field("score", &self.score.score())
            .finish_non_exhaustive()
    }
}
