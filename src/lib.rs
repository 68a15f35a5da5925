pub mod game; // Level session: populate, play, grade
pub mod instrument;
pub mod levels;
pub mod player; // The sequencer and its trigger scheduler
pub mod sequencing; // Beat-based tracks of chord/rest events

#[cfg(feature = "rtrb")]
pub mod audio;

pub use instrument::Instrument;
pub use player::Sequencer;

/// Tempo used when a level does not specify one.
pub const DEFAULT_BEATS_PER_MINUTE: f64 = 120.0;
