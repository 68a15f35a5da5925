//! Demo driver: wires the audio synth to a game session and walks one
//! level from instructions to grade.

use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use color_eyre::eyre::{eyre, Result};

use cadenza::audio;
use cadenza::game::{GameSession, Grade};
use cadenza::levels;
use cadenza::sequencing::notes::{C4, C5, E4, G4};
use cadenza::sequencing::TimedChord;

const MAX_VOICES: usize = 16;

/// Pause after playback so release tails are not cut off.
const RELEASE_TAIL: Duration = Duration::from_millis(400);

pub fn run(set_name: &str, level_index: usize) -> Result<()> {
    let set = levels::level_set(set_name)
        .ok_or_else(|| eyre!("unknown level set {:?} (try \"tutorial\" or \"beginner\")", set_name))?;
    let level = set
        .levels
        .get(level_index)
        .cloned()
        .ok_or_else(|| {
            eyre!(
                "level set {:?} has levels 0..{}, got {}",
                set.name,
                set.levels.len(),
                level_index
            )
        })?;

    println!("=== cadenza ===");
    println!("Level set: {} (level {} of {})", set.name, level_index + 1, set.levels.len());
    println!();
    println!("{}", level.instructions);
    println!();

    // Audio output must outlive every play call; dropping it stops sound.
    let (_audio, instrument) = audio::start(MAX_VOICES)?;
    let mut session = GameSession::new(Arc::new(instrument), level.clone());

    if level.expected_line.is_some() {
        println!("Target melody:");
        let (tx, rx) = mpsc::channel();
        session.play_expected_line(Some(Box::new(move || {
            let _ = tx.send(());
        })))?;
        rx.recv()?;
        thread::sleep(RELEASE_TAIL);
    }

    // The demo "plays" the expected line as its attempt; free-play levels
    // get a stock arpeggio.
    let attempt = level.expected_line.clone().unwrap_or_else(default_tune);
    let with_accompaniment = level.accompaniment.is_some();
    println!(
        "Attempt (countoff, then the line{}):",
        if with_accompaniment { ", with accompaniment" } else { "" }
    );

    let (tx, rx) = mpsc::channel();
    let on_graded = Box::new(move |grade| {
        let _ = tx.send(grade);
    });
    if with_accompaniment {
        session.play_with_accompaniment_and_grade(&attempt, on_graded)?;
    } else {
        session.play_and_grade(&attempt, on_graded)?;
    }

    let grade = rx.recv()?;
    thread::sleep(RELEASE_TAIL);

    match grade {
        Grade::Correct => println!("Correct!"),
        Grade::Incorrect => println!("Incorrect."),
        Grade::FreePlay => println!("Nice tune!"),
    }
    Ok(())
}

fn default_tune() -> Vec<TimedChord> {
    vec![
        TimedChord::note(C4, 0.5),
        TimedChord::note(E4, 0.5),
        TimedChord::note(G4, 0.5),
        TimedChord::note(C5, 1.0),
        TimedChord::rest(0.5),
        TimedChord::chord(&[C4, E4, G4], 1.0),
    ]
}
