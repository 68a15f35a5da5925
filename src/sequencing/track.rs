use super::event::{ChordEvent, Pitch, TimedChord};
use super::tempo::beats_to_millis;

/// A named, independently timed sequence of chord events.
///
/// A track is append-only: chords and rests are added at the cursor, and
/// the cursor advances by the duration of every append. Rests never
/// produce an event (they only advance the cursor), so the event list is
/// sparse, with each event carrying its own cumulative `delay_beats`.
/// The only way back to a clean state is [`Track::clear`].
#[derive(Debug, Clone, Default)]
pub struct Track {
    events: Vec<ChordEvent>,
    cursor_beat: f64,
}

impl Track {
    /// Create an empty track with the cursor at beat zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a track from a flat list of timed chords and rests.
    pub fn from_timed_chords(steps: &[TimedChord]) -> Self {
        let mut track = Self::new();
        for step in steps {
            match &step.pitches {
                Some(pitches) => track.append_chord(pitches, step.duration_beats),
                None => track.append_rest(step.duration_beats),
            }
        }
        track
    }

    /// Append a chord at the cursor and advance the cursor.
    ///
    /// Non-positive durations are a caller contract violation.
    pub fn append_chord(&mut self, pitches: &[Pitch], duration_beats: f64) {
        debug_assert!(duration_beats > 0.0, "chord duration must be > 0 beats");

        self.events.push(ChordEvent {
            pitches: pitches.to_vec(),
            duration_beats,
            delay_beats: self.cursor_beat,
        });
        self.cursor_beat += duration_beats;
    }

    /// Advance the cursor without emitting an event.
    pub fn append_rest(&mut self, duration_beats: f64) {
        debug_assert!(duration_beats > 0.0, "rest duration must be > 0 beats");

        self.cursor_beat += duration_beats;
    }

    /// The events appended so far, in timeline order.
    pub fn events(&self) -> &[ChordEvent] {
        &self.events
    }

    /// A deep, independent copy of the event list. Mutating the returned
    /// value cannot affect the track.
    pub fn snapshot(&self) -> Vec<ChordEvent> {
        self.events.clone()
    }

    /// Total beats consumed so far, rests included.
    pub fn cursor_beat(&self) -> f64 {
        self.cursor_beat
    }

    /// Wall-clock length of this track at the given tempo.
    pub fn duration_millis(&self, beats_per_minute: f64) -> f64 {
        beats_to_millis(self.cursor_beat, beats_per_minute)
    }

    /// Discard all events and return the cursor to beat zero.
    pub fn clear(&mut self) {
        self.events.clear();
        self.cursor_beat = 0.0;
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
