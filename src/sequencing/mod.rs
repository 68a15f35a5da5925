pub mod event;
pub mod notes;
pub mod tempo;
pub mod track;

pub use event::{ChordEvent, Pitch, TimedChord};
pub use tempo::{beats_to_millis, millis_per_beat};
pub use track::Track;
