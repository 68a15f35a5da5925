/// MIDI note number (60 = C4). Treated as opaque; no range validation.
pub type Pitch = u8;

/// A chord (or single note) placed on a track's timeline.
///
/// `delay_beats` is the cumulative offset from the start of the track,
/// computed when the event is appended, never supplied by the caller.
/// Rests are not stored as events; they only advance the track cursor,
/// so consecutive events are contiguous: each event's delay equals the
/// previous event's delay plus its duration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChordEvent {
    /// Pitches sounded simultaneously. A single pitch is one note.
    pub pitches: Vec<Pitch>,
    /// How long the chord sounds, in beats. Always positive.
    pub duration_beats: f64,
    /// Offset from the start of the track, in beats.
    pub delay_beats: f64,
}

/// One step of a flat melody description: a chord to sound, or a rest.
///
/// This is the exchange format between level data (or a generated
/// program) and the player: an ordered list of `TimedChord`s populates a
/// track in one pass.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimedChord {
    /// Pitches to sound, or `None` for silence.
    pub pitches: Option<Vec<Pitch>>,
    /// Duration in beats. Always positive.
    pub duration_beats: f64,
}

impl TimedChord {
    /// A sounded chord.
    pub fn chord(pitches: &[Pitch], duration_beats: f64) -> Self {
        Self {
            pitches: Some(pitches.to_vec()),
            duration_beats,
        }
    }

    /// A single note.
    pub fn note(pitch: Pitch, duration_beats: f64) -> Self {
        Self::chord(&[pitch], duration_beats)
    }

    /// Silence that still advances timing.
    pub fn rest(duration_beats: f64) -> Self {
        Self {
            pitches: None,
            duration_beats,
        }
    }
}
