use std::time::Duration;

/// Wall-clock milliseconds per beat at the given tempo.
///
/// Tracks store timing in beats only; tempo is applied at play time, so
/// the same track data can be replayed at any `beats_per_minute` without
/// re-deriving offsets.
pub fn millis_per_beat(beats_per_minute: f64) -> f64 {
    60_000.0 / beats_per_minute
}

/// Convert a beat count to wall-clock milliseconds at the given tempo.
pub fn beats_to_millis(beats: f64, beats_per_minute: f64) -> f64 {
    beats * millis_per_beat(beats_per_minute)
}

/// Convert a beat count to a `Duration` at the given tempo.
pub fn beats_to_duration(beats: f64, beats_per_minute: f64) -> Duration {
    Duration::from_secs_f64(beats_to_millis(beats, beats_per_minute) / 1000.0)
}
