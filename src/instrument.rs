use crate::sequencing::Pitch;

/// Output collaborator: something that can sound a chord.
///
/// The player calls this from its scheduler thread when a trigger fires,
/// never inspects a result, and never retries; output latency and
/// failure are the implementation's concern. Implementations must be
/// callable through a shared reference.
pub trait Instrument: Send + Sync {
    /// Sound `pitches` together for `duration_beats` at the given tempo.
    fn play_note(&self, pitches: &[Pitch], duration_beats: f64, beats_per_minute: f64);
}

/// An instrument that produces no sound. Useful for headless grading and
/// tests that only care about timing and track contents.
pub struct NullInstrument;

impl Instrument for NullInstrument {
    fn play_note(&self, _pitches: &[Pitch], _duration_beats: f64, _beats_per_minute: f64) {}
}
