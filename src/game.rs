//! One level of the melody game: load a line into the player, play it
//! back behind a two-beat countoff, and grade it against the level's
//! expected melody.

use std::sync::Arc;

use crate::instrument::Instrument;
use crate::levels::Level;
use crate::player::{CompletionCallback, PlayerError, Sequencer, BASS, MELODY};
use crate::sequencing::notes::E6;
use crate::sequencing::{Pitch, TimedChord, Track};

/// Beats of countoff before a graded line starts sounding.
pub const COUNTOFF_BEATS: f64 = 2.0;

/// Track holding the countoff clicks.
const COUNT: &str = "count";

/// Pitch of the countoff click: high and short, clearly apart from the
/// game's melody range.
const COUNTOFF_PITCH: Pitch = E6;

/// Outcome of grading a played line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    /// The melody structurally equals the level's expected line.
    Correct,
    /// It does not.
    Incorrect,
    /// The level has no expected line; anything counts.
    FreePlay,
}

/// Callback receiving the grade once playback of the attempt finishes.
pub type GradeCallback = Box<dyn FnOnce(Grade) + Send + 'static>;

/// A session playing one level.
///
/// The session owns a [`Sequencer`] with three tracks: the countoff
/// clicks, the player's melody, and the accompaniment bass line. Graded
/// playback places the melody (and bass) two beats after the clicks by
/// prefixing both with a countoff-length rest; grading builds the
/// expected track with the same prefix, so the offset cancels out of the
/// comparison.
pub struct GameSession {
    player: Sequencer,
    level: Level,
}

impl GameSession {
    pub fn new(instrument: Arc<dyn Instrument>, level: Level) -> Self {
        Self {
            player: Sequencer::with_tracks(instrument, &[COUNT, MELODY, BASS]),
            level,
        }
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Grade a melody without playing it.
    pub fn grade(&self, melody: &[TimedChord]) -> Grade {
        match &self.level.expected_line {
            None => Grade::FreePlay,
            Some(expected) => {
                // Exact structural equality of the event sequences: same
                // pitch sets, same order, same durations.
                if Track::from_timed_chords(expected).events()
                    == Track::from_timed_chords(melody).events()
                {
                    Grade::Correct
                } else {
                    Grade::Incorrect
                }
            }
        }
    }

    /// Play `melody` behind the countoff and report its grade when
    /// playback finishes.
    pub fn play_and_grade(
        &mut self,
        melody: &[TimedChord],
        on_graded: GradeCallback,
    ) -> Result<(), PlayerError> {
        self.load_attempt(melody, false)?;
        self.play_loaded(&[COUNT, MELODY], on_graded)
    }

    /// Like [`GameSession::play_and_grade`], with the level's
    /// accompaniment sounding on the bass track.
    pub fn play_with_accompaniment_and_grade(
        &mut self,
        melody: &[TimedChord],
        on_graded: GradeCallback,
    ) -> Result<(), PlayerError> {
        self.load_attempt(melody, true)?;
        self.play_loaded(&[COUNT, MELODY, BASS], on_graded)
    }

    /// Play the level's expected line so the player can hear the target.
    /// Does nothing for a free-play level.
    pub fn play_expected_line(
        &mut self,
        on_complete: Option<CompletionCallback>,
    ) -> Result<(), PlayerError> {
        self.player.reset();
        let Some(expected) = self.level.expected_line.clone() else {
            if let Some(on_complete) = on_complete {
                on_complete();
            }
            return Ok(());
        };
        self.player.set_track_from_timed_chords(BASS, &expected)?;
        self.player
            .play_track(BASS, self.level.beats_per_minute, on_complete)
    }

    /// Silence everything and clear all tracks.
    pub fn reset(&mut self) {
        self.player.reset();
    }

    fn load_attempt(
        &mut self,
        melody: &[TimedChord],
        with_accompaniment: bool,
    ) -> Result<(), PlayerError> {
        self.player.reset();

        // Two clicks, one beat apart, ending before the line starts.
        self.player.set_track_from_timed_chords(
            COUNT,
            &[
                TimedChord::note(COUNTOFF_PITCH, 0.25),
                TimedChord::rest(0.75),
                TimedChord::note(COUNTOFF_PITCH, 0.25),
            ],
        )?;

        self.player.append_rest(MELODY, COUNTOFF_BEATS)?;
        self.player.set_track_from_timed_chords(MELODY, melody)?;

        if with_accompaniment {
            if let Some(accompaniment) = self.level.accompaniment.clone() {
                self.player.append_rest(BASS, COUNTOFF_BEATS)?;
                self.player.set_track_from_timed_chords(BASS, &accompaniment)?;
            }
        }
        Ok(())
    }

    fn play_loaded(&self, tracks: &[&str], on_graded: GradeCallback) -> Result<(), PlayerError> {
        // The attempt's melody is final once loaded, so the grade can be
        // computed now and reported when playback completes.
        let grade = match &self.level.expected_line {
            None => Grade::FreePlay,
            Some(expected) => {
                let mut expected_track = Track::new();
                expected_track.append_rest(COUNTOFF_BEATS);
                for step in expected {
                    match &step.pitches {
                        Some(pitches) => expected_track.append_chord(pitches, step.duration_beats),
                        None => expected_track.append_rest(step.duration_beats),
                    }
                }
                if self.player.track_snapshot(MELODY)? == expected_track.snapshot() {
                    Grade::Correct
                } else {
                    Grade::Incorrect
                }
            }
        };

        self.player.play(
            tracks,
            self.level.beats_per_minute,
            Some(Box::new(move || on_graded(grade))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instrument::NullInstrument;
    use crate::sequencing::notes::*;
    use std::sync::mpsc;
    use std::time::Duration;

    // Fast tempo keeps the countoff and line playback in the
    // millisecond range for tests.
    fn quick_level(expected: Option<Vec<TimedChord>>) -> Level {
        Level {
            instructions: "test",
            expected_line: expected,
            beats_per_minute: 24_000.0,
            accompaniment: Some(vec![TimedChord::note(C3, 1.0)]),
        }
    }

    fn session(expected: Option<Vec<TimedChord>>) -> GameSession {
        GameSession::new(Arc::new(NullInstrument), quick_level(expected))
    }

    #[test]
    fn test_grade_without_playing() {
        let expected = vec![TimedChord::note(C4, 1.0), TimedChord::note(E4, 1.0)];
        let session = session(Some(expected.clone()));

        assert_eq!(session.grade(&expected), Grade::Correct);
        assert_eq!(
            session.grade(&[TimedChord::note(C4, 1.0)]),
            Grade::Incorrect
        );
        // Same pitches, different duration
        assert_eq!(
            session.grade(&[TimedChord::note(C4, 1.0), TimedChord::note(E4, 2.0)]),
            Grade::Incorrect
        );
    }

    #[test]
    fn test_free_play_always_passes() {
        let session = session(None);
        assert_eq!(session.grade(&[TimedChord::note(B5, 0.5)]), Grade::FreePlay);
        assert_eq!(session.grade(&[]), Grade::FreePlay);
    }

    #[test]
    fn test_play_and_grade_reports_correct() {
        let expected = vec![TimedChord::note(C4, 1.0)];
        let mut session = session(Some(expected.clone()));

        let (tx, rx) = mpsc::channel();
        session
            .play_and_grade(
                &expected,
                Box::new(move |grade| {
                    tx.send(grade).unwrap();
                }),
            )
            .unwrap();

        let grade = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(grade, Grade::Correct);
    }

    #[test]
    fn test_play_and_grade_reports_incorrect() {
        let mut session = session(Some(vec![TimedChord::note(C4, 1.0)]));

        let (tx, rx) = mpsc::channel();
        session
            .play_with_accompaniment_and_grade(
                &[TimedChord::note(D4, 1.0)],
                Box::new(move |grade| {
                    tx.send(grade).unwrap();
                }),
            )
            .unwrap();

        let grade = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(grade, Grade::Incorrect);
    }

    #[test]
    fn test_rests_count_toward_grading() {
        let expected = vec![TimedChord::rest(1.0), TimedChord::note(C4, 1.0)];
        let session = session(Some(expected.clone()));

        assert_eq!(session.grade(&expected), Grade::Correct);
        // Same sounded note, missing the leading rest
        assert_eq!(session.grade(&[TimedChord::note(C4, 1.0)]), Grade::Incorrect);
    }

    #[test]
    fn test_play_expected_line_on_free_play_completes_immediately() {
        let mut session = session(None);
        let (tx, rx) = mpsc::channel();
        session
            .play_expected_line(Some(Box::new(move || tx.send(()).unwrap())))
            .unwrap();
        assert!(rx.recv_timeout(Duration::from_secs(1)).is_ok());
    }
}
