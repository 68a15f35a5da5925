//! End-to-end playback timing: real scheduler, recording instrument.

use std::sync::{mpsc, Arc, Mutex};
use std::time::{Duration, Instant};

use cadenza::instrument::Instrument;
use cadenza::player::{Sequencer, BASS, MELODY};
use cadenza::sequencing::notes::{C3, C4, E4, G4};
use cadenza::sequencing::Pitch;

/// Records every chord the player triggers, with its arrival time.
struct RecordingInstrument {
    start: Instant,
    notes: Mutex<Vec<(Vec<Pitch>, f64, Duration)>>,
}

impl RecordingInstrument {
    fn new() -> Self {
        Self {
            start: Instant::now(),
            notes: Mutex::new(Vec::new()),
        }
    }

    fn recorded(&self) -> Vec<(Vec<Pitch>, f64, Duration)> {
        self.notes.lock().unwrap().clone()
    }
}

impl Instrument for RecordingInstrument {
    fn play_note(&self, pitches: &[Pitch], duration_beats: f64, _beats_per_minute: f64) {
        self.notes
            .lock()
            .unwrap()
            .push((pitches.to_vec(), duration_beats, self.start.elapsed()));
    }
}

// 6000 bpm = 10 ms per beat; fast enough for tests, slow enough that
// scheduling order is unambiguous.
const TEST_BPM: f64 = 6_000.0;

#[test]
fn plays_melody_in_order_and_completes_once() {
    let instrument = Arc::new(RecordingInstrument::new());
    let mut player = Sequencer::new(Arc::clone(&instrument) as Arc<dyn Instrument>);

    player.append_chord(MELODY, &[C4], 1.0).unwrap();
    player.append_chord(MELODY, &[E4, G4], 2.0).unwrap();

    let (tx, rx) = mpsc::channel();
    player
        .play_track(
            MELODY,
            TEST_BPM,
            Some(Box::new(move || {
                tx.send(Instant::now()).unwrap();
            })),
        )
        .unwrap();

    // Completion fires after the full 3-beat line.
    assert!(rx.recv_timeout(Duration::from_secs(2)).is_ok());
    // Exactly once.
    assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());

    let notes = instrument.recorded();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].0, vec![C4]);
    assert_eq!(notes[0].1, 1.0);
    assert_eq!(notes[1].0, vec![E4, G4]);
    assert_eq!(notes[1].1, 2.0);
    // Second chord fires one beat after the first, never before it.
    assert!(notes[1].2 >= notes[0].2);
}

#[test]
fn tracks_played_together_share_a_zero_time() {
    let instrument = Arc::new(RecordingInstrument::new());
    let mut player = Sequencer::new(Arc::clone(&instrument) as Arc<dyn Instrument>);

    // Melody sounds at beats 0 and 2; bass at beat 1.
    player.append_chord(MELODY, &[C4], 2.0).unwrap();
    player.append_chord(MELODY, &[E4], 1.0).unwrap();
    player.append_rest(BASS, 1.0).unwrap();
    player.append_chord(BASS, &[C3], 1.0).unwrap();

    let (tx, rx) = mpsc::channel();
    player
        .play_all(
            TEST_BPM,
            Some(Box::new(move || {
                tx.send(()).unwrap();
            })),
        )
        .unwrap();
    assert!(rx.recv_timeout(Duration::from_secs(2)).is_ok());

    let notes = instrument.recorded();
    let pitches: Vec<_> = notes.iter().map(|(p, _, _)| p.clone()).collect();
    // Interleaved by beat offset: melody@0, bass@1, melody@2.
    assert_eq!(pitches, vec![vec![C4], vec![C3], vec![E4]]);
}

#[test]
fn reset_before_deadline_silences_everything() {
    let instrument = Arc::new(RecordingInstrument::new());
    let mut player = Sequencer::new(Arc::clone(&instrument) as Arc<dyn Instrument>);

    player.append_chord(MELODY, &[C4], 1.0).unwrap();
    player.append_chord(MELODY, &[E4], 1.0).unwrap();

    let (tx, rx) = mpsc::channel();
    // Slow tempo so no deadline can elapse before the reset below.
    player
        .play_track(
            MELODY,
            60.0,
            Some(Box::new(move || {
                tx.send(()).unwrap();
            })),
        )
        .unwrap();
    player.reset();

    // Nothing fires: no notes, no completion.
    assert!(rx.recv_timeout(Duration::from_millis(300)).is_err());
    assert!(instrument.recorded().is_empty());
    assert!(player.track_snapshot(MELODY).unwrap().is_empty());
}

#[test]
fn play_after_reset_starts_from_a_clean_slate() {
    let instrument = Arc::new(RecordingInstrument::new());
    let mut player = Sequencer::new(Arc::clone(&instrument) as Arc<dyn Instrument>);

    player.append_chord(MELODY, &[C4], 1.0).unwrap();
    player.reset();
    player.append_chord(MELODY, &[E4], 1.0).unwrap();

    let (tx, rx) = mpsc::channel();
    player
        .play_track(
            MELODY,
            TEST_BPM,
            Some(Box::new(move || {
                tx.send(()).unwrap();
            })),
        )
        .unwrap();
    assert!(rx.recv_timeout(Duration::from_secs(2)).is_ok());

    let notes = instrument.recorded();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].0, vec![E4]);
}
