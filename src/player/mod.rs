//! The music player: named tracks plus wall-clock playback scheduling.
//!
//! Composition is in beats; tempo is applied only when `play*` converts
//! beat offsets to wall-clock delays. Audio output goes through the
//! caller-supplied [`Instrument`], never directly from here.

pub mod scheduler;

use std::fmt;
use std::sync::Arc;

use crate::instrument::Instrument;
use crate::sequencing::{beats_to_millis, ChordEvent, Pitch, TimedChord, Track};
use scheduler::TriggerScheduler;

/// Name of the track holding the player's own melody.
pub const MELODY: &str = "melody";
/// Name of the track holding the accompaniment line.
pub const BASS: &str = "bass";

/// Callback invoked once when playback of the requested tracks finishes.
pub type CompletionCallback = Box<dyn FnOnce() + Send + 'static>;

/// Errors surfaced to the player's collaborators. Both variants indicate
/// a programming error in the caller, not a runtime condition; nothing is
/// retried or recovered internally.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerError {
    /// A track name outside the set registered at construction time.
    UnknownTrack { name: String },
    /// A zero or negative duration passed to an append operation.
    NonPositiveDuration { beats: f64 },
}

impl fmt::Display for PlayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerError::UnknownTrack { name } => {
                write!(f, "unknown track name: {:?}", name)
            }
            PlayerError::NonPositiveDuration { beats } => {
                write!(f, "duration must be > 0 beats, got {}", beats)
            }
        }
    }
}

impl std::error::Error for PlayerError {}

/// Accumulates timed chord/rest data per named track and plays it back
/// with correct relative timing against an [`Instrument`].
///
/// Track names form a fixed set registered at construction; passing any
/// other name fails with [`PlayerError::UnknownTrack`]. The player is
/// either idle (no pending triggers) or playing; `reset` forces idle from
/// any state by cancelling every pending trigger and clearing all tracks.
/// There is no paused state; suspension is only total.
pub struct Sequencer {
    // Registration order is deliberate: it fixes the firing order of
    // triggers whose deadlines coincide across tracks.
    tracks: Vec<(String, Track)>,
    scheduler: TriggerScheduler,
    instrument: Arc<dyn Instrument>,
}

impl Sequencer {
    /// A player with the game's standard tracks, `melody` and `bass`.
    pub fn new(instrument: Arc<dyn Instrument>) -> Self {
        Self::with_tracks(instrument, &[MELODY, BASS])
    }

    /// A player with a custom fixed set of track names.
    pub fn with_tracks(instrument: Arc<dyn Instrument>, names: &[&str]) -> Self {
        Self {
            tracks: names.iter().map(|n| (n.to_string(), Track::new())).collect(),
            scheduler: TriggerScheduler::new(),
            instrument,
        }
    }

    /// Cancel every pending trigger and discard all track content. Always
    /// succeeds; the only way back to a clean state.
    pub fn reset(&mut self) {
        self.scheduler.cancel_all();
        for (_, track) in &mut self.tracks {
            track.clear();
        }
    }

    /// Append a chord to a track. Pure data mutation; nothing sounds
    /// until playback.
    pub fn append_chord(
        &mut self,
        track_name: &str,
        pitches: &[Pitch],
        duration_beats: f64,
    ) -> Result<(), PlayerError> {
        Self::check_duration(duration_beats)?;
        self.track_mut(track_name)?.append_chord(pitches, duration_beats);
        Ok(())
    }

    /// Append silence to a track: the cursor advances, no event is stored.
    pub fn append_rest(&mut self, track_name: &str, duration_beats: f64) -> Result<(), PlayerError> {
        Self::check_duration(duration_beats)?;
        self.track_mut(track_name)?.append_rest(duration_beats);
        Ok(())
    }

    /// Populate a track from a flat instruction list in one pass: each
    /// step appends a chord, or a rest when its pitches are `None`.
    pub fn set_track_from_timed_chords(
        &mut self,
        track_name: &str,
        steps: &[TimedChord],
    ) -> Result<(), PlayerError> {
        for step in steps {
            Self::check_duration(step.duration_beats)?;
        }
        let track = self.track_mut(track_name)?;
        for step in steps {
            match &step.pitches {
                Some(pitches) => track.append_chord(pitches, step.duration_beats),
                None => track.append_rest(step.duration_beats),
            }
        }
        Ok(())
    }

    /// Wall-clock length of a track at the given tempo, in milliseconds.
    pub fn track_duration_millis(
        &self,
        track_name: &str,
        beats_per_minute: f64,
    ) -> Result<f64, PlayerError> {
        Ok(self.track(track_name)?.duration_millis(beats_per_minute))
    }

    /// A deep, independent copy of a track's event list.
    pub fn track_snapshot(&self, track_name: &str) -> Result<Vec<ChordEvent>, PlayerError> {
        Ok(self.track(track_name)?.snapshot())
    }

    /// The registered track names, in registration order.
    pub fn track_names(&self) -> Vec<&str> {
        self.tracks.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Schedule playback of the named tracks from a shared zero time.
    ///
    /// Every event is scheduled at `delay_beats * ms_per_beat` from now;
    /// when its trigger fires, the instrument sounds the chord. Tracks
    /// played together share the same tempo and zero time, which is all
    /// the synchronization polyphony needs. If `on_complete` is given it
    /// fires exactly once, at the latest end time across the requested
    /// tracks. Returns immediately; nothing is scheduled on error.
    pub fn play(
        &self,
        track_names: &[&str],
        beats_per_minute: f64,
        on_complete: Option<CompletionCallback>,
    ) -> Result<(), PlayerError> {
        for name in track_names {
            self.track(name)?;
        }

        let mut scheduled = 0usize;
        let mut end_millis = 0.0f64;

        // Iterate in registration order so coinciding deadlines across
        // tracks resolve deterministically.
        for (name, track) in &self.tracks {
            if !track_names.contains(&name.as_str()) {
                continue;
            }
            end_millis = end_millis.max(track.duration_millis(beats_per_minute));

            for event in track.events() {
                // Rests are never stored, so empty pitch sets should not
                // occur; skip them rather than trigger a silent call.
                if event.pitches.is_empty() {
                    continue;
                }

                let delay = millis_to_duration(beats_to_millis(event.delay_beats, beats_per_minute));
                let instrument = Arc::clone(&self.instrument);
                let pitches = event.pitches.clone();
                let duration_beats = event.duration_beats;
                self.scheduler.schedule(delay, move || {
                    instrument.play_note(&pitches, duration_beats, beats_per_minute);
                });
                scheduled += 1;
            }
        }

        if let Some(on_complete) = on_complete {
            self.scheduler.schedule(millis_to_duration(end_millis), on_complete);
        }

        log::debug!(
            target: "player",
            "scheduled {} trigger(s) across {:?} at {} bpm",
            scheduled,
            track_names,
            beats_per_minute
        );
        Ok(())
    }

    /// Play a single track.
    pub fn play_track(
        &self,
        track_name: &str,
        beats_per_minute: f64,
        on_complete: Option<CompletionCallback>,
    ) -> Result<(), PlayerError> {
        self.play(&[track_name], beats_per_minute, on_complete)
    }

    /// Play every registered track together.
    pub fn play_all(
        &self,
        beats_per_minute: f64,
        on_complete: Option<CompletionCallback>,
    ) -> Result<(), PlayerError> {
        let names: Vec<&str> = self.track_names();
        self.play(&names, beats_per_minute, on_complete)
    }

    fn check_duration(duration_beats: f64) -> Result<(), PlayerError> {
        if duration_beats > 0.0 {
            Ok(())
        } else {
            Err(PlayerError::NonPositiveDuration {
                beats: duration_beats,
            })
        }
    }

    fn track(&self, name: &str) -> Result<&Track, PlayerError> {
        self.tracks
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, t)| t)
            .ok_or_else(|| PlayerError::UnknownTrack {
                name: name.to_string(),
            })
    }

    fn track_mut(&mut self, name: &str) -> Result<&mut Track, PlayerError> {
        self.tracks
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, t)| t)
            .ok_or_else(|| PlayerError::UnknownTrack {
                name: name.to_string(),
            })
    }
}

fn millis_to_duration(millis: f64) -> std::time::Duration {
    std::time::Duration::from_secs_f64(millis.max(0.0) / 1000.0)
}
