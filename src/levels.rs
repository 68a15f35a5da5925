//! Level sets for the melody game.
//!
//! Each level carries the expected melody line as a flat timed-chord
//! list, the tempo to play and grade at, and an optional accompaniment
//! line for the bass track. A level with no expected line is free play:
//! anything the player builds counts as correct.

use crate::sequencing::notes::*;
use crate::sequencing::TimedChord;

/// One level of the game.
#[derive(Debug, Clone)]
pub struct Level {
    /// What the player is asked to build.
    pub instructions: &'static str,
    /// The melody that counts as correct, or `None` for free play.
    pub expected_line: Option<Vec<TimedChord>>,
    /// Tempo used for both playback and the duration of the grading wait.
    pub beats_per_minute: f64,
    /// Optional bass-track line played alongside the melody.
    pub accompaniment: Option<Vec<TimedChord>>,
}

/// A named, ordered collection of levels.
#[derive(Debug, Clone)]
pub struct LevelSet {
    pub name: &'static str,
    pub levels: Vec<Level>,
}

/// Every shipped level set, in difficulty order.
pub fn all_level_sets() -> Vec<LevelSet> {
    vec![tutorial(), beginner()]
}

/// Look up a level set by name.
pub fn level_set(name: &str) -> Option<LevelSet> {
    all_level_sets().into_iter().find(|set| set.name == name)
}

/// Introductory levels: single notes, then short sequences and chords.
pub fn tutorial() -> LevelSet {
    LevelSet {
        name: "tutorial",
        levels: vec![
            Level {
                instructions: "Play a single note, C2.",
                expected_line: Some(vec![TimedChord::note(C2, 1.0)]),
                beats_per_minute: 80.0,
                accompaniment: None,
            },
            Level {
                instructions: "Change the note to E2 instead.",
                expected_line: Some(vec![TimedChord::note(E2, 1.0)]),
                beats_per_minute: 80.0,
                accompaniment: None,
            },
            Level {
                instructions: "Play the sequence G2, A2, F2, in that order.",
                expected_line: Some(vec![
                    TimedChord::note(G2, 1.0),
                    TimedChord::note(A2, 1.0),
                    TimedChord::note(F2, 1.0),
                ]),
                beats_per_minute: 80.0,
                accompaniment: None,
            },
            Level {
                instructions: "Play the chord C2-E2-G2.",
                expected_line: Some(vec![TimedChord::chord(&[C2, E2, G2], 1.0)]),
                beats_per_minute: 80.0,
                accompaniment: None,
            },
            Level {
                instructions: "Play the chord C2-F2-A2, then the chord C2-E2-G2.",
                expected_line: Some(vec![
                    TimedChord::chord(&[C2, F2, A2], 1.0),
                    TimedChord::chord(&[C2, E2, G2], 1.0),
                ]),
                beats_per_minute: 80.0,
                accompaniment: None,
            },
        ],
    }
}

/// Short well-known melodies, some with accompaniment.
pub fn beginner() -> LevelSet {
    // Accompaniment shared by both Lion King levels.
    let lion_king_accompaniment = vec![
        TimedChord::note(G4, 3.0),
        TimedChord::note(E4, 1.0),
        TimedChord::note(D4, 2.0),
        TimedChord::note(G4, 1.0),
        TimedChord::note(E4, 3.0),
        TimedChord::note(C4, 1.0),
        TimedChord::note(A3, 4.0),
    ];

    let mary_melody = vec![
        TimedChord::note(E3, 1.0),
        TimedChord::note(D3, 1.0),
        TimedChord::note(C3, 1.0),
        TimedChord::note(D3, 1.0),
        TimedChord::note(E3, 1.0),
        TimedChord::note(E3, 1.0),
        TimedChord::note(E3, 1.0),
    ];

    LevelSet {
        name: "beginner",
        levels: vec![
            Level {
                instructions:
                    "Play Mary Had a Little Lamb: E3, D3, C3, D3, E3, E3, E3. \
                     Try to use only six blocks.",
                expected_line: Some(mary_melody.clone()),
                beats_per_minute: 100.0,
                accompaniment: None,
            },
            Level {
                instructions:
                    "Play Can You Feel the Love Tonight: \
                     G3 (3 beats), E3, D3 (2 beats), G3, E3 (3 beats), C3, A2 (4 beats).",
                expected_line: Some(vec![
                    TimedChord::note(G3, 3.0),
                    TimedChord::note(E3, 1.0),
                    TimedChord::note(D3, 2.0),
                    TimedChord::note(G3, 1.0),
                    TimedChord::note(E3, 3.0),
                    TimedChord::note(C3, 1.0),
                    TimedChord::note(A2, 4.0),
                ]),
                beats_per_minute: 120.0,
                accompaniment: None,
            },
            Level {
                instructions: "Play The Entertainer: D3, E3, C3, A2 (1 beat), B2, G2.",
                expected_line: Some(vec![
                    TimedChord::note(D3, 0.5),
                    TimedChord::note(E3, 0.5),
                    TimedChord::note(C3, 0.5),
                    TimedChord::note(A2, 1.0),
                    TimedChord::note(B2, 0.5),
                    TimedChord::note(G2, 0.5),
                ]),
                beats_per_minute: 80.0,
                accompaniment: None,
            },
            Level {
                instructions:
                    "Play Happy Birthday: G2 (dotted), G2, A2, G2, C3, B2 (2 beats), \
                     then again with D3, C3 ending.",
                expected_line: Some(vec![
                    TimedChord::note(G2, 0.75),
                    TimedChord::note(G2, 0.25),
                    TimedChord::note(A2, 1.0),
                    TimedChord::note(G2, 1.0),
                    TimedChord::note(C3, 1.0),
                    TimedChord::note(B2, 2.0),
                    TimedChord::note(G2, 0.75),
                    TimedChord::note(G2, 0.25),
                    TimedChord::note(A2, 1.0),
                    TimedChord::note(G2, 1.0),
                    TimedChord::note(D3, 1.0),
                    TimedChord::note(C3, 2.0),
                ]),
                beats_per_minute: 100.0,
                accompaniment: None,
            },
            Level {
                instructions:
                    "Mary Had a Little Lamb, with harmony: play the chord C2-F2-A2 \
                     seven times. Use only two blocks!",
                expected_line: Some(vec![TimedChord::chord(&[C2, F2, A2], 1.0); 7]),
                beats_per_minute: 100.0,
                accompaniment: Some(mary_melody),
            },
            Level {
                instructions:
                    "Lion King: play C3, then G2, then A2, then F2. \
                     Make each note 4 beats long.",
                expected_line: Some(vec![
                    TimedChord::note(C3, 4.0),
                    TimedChord::note(G2, 4.0),
                    TimedChord::note(A2, 4.0),
                    TimedChord::note(F2, 4.0),
                ]),
                beats_per_minute: 120.0,
                accompaniment: Some(lion_king_accompaniment.clone()),
            },
            Level {
                instructions:
                    "Lion King (reprise): play C3 for 2 beats then G3 for 2 beats; \
                     repeat the pattern for G2-D3, A2-E3 and F2-C3.",
                expected_line: Some(vec![
                    TimedChord::note(C3, 2.0),
                    TimedChord::note(G3, 2.0),
                    TimedChord::note(G2, 2.0),
                    TimedChord::note(D3, 2.0),
                    TimedChord::note(A2, 2.0),
                    TimedChord::note(E3, 2.0),
                    TimedChord::note(F2, 2.0),
                    TimedChord::note(C3, 2.0),
                ]),
                beats_per_minute: 120.0,
                accompaniment: Some(lion_king_accompaniment),
            },
            Level {
                instructions:
                    "Edelweiss: play C3 then the chord E3/G3 twice (1 beat each); \
                     repeat the shape for G2, A2 and F2.",
                expected_line: Some(vec![
                    TimedChord::note(C3, 1.0),
                    TimedChord::chord(&[E3, G3], 1.0),
                    TimedChord::chord(&[E3, G3], 1.0),
                    TimedChord::note(G2, 1.0),
                    TimedChord::chord(&[B2, D3], 1.0),
                    TimedChord::chord(&[B2, D3], 1.0),
                    TimedChord::note(A2, 1.0),
                    TimedChord::chord(&[Cs3, E3], 1.0),
                    TimedChord::chord(&[Cs3, E3], 1.0),
                    TimedChord::note(F2, 1.0),
                    TimedChord::chord(&[A2, C3], 1.0),
                    TimedChord::chord(&[A2, C3], 1.0),
                ]),
                beats_per_minute: 120.0,
                accompaniment: Some(vec![
                    TimedChord::note(E4, 2.0),
                    TimedChord::note(G4, 1.0),
                    TimedChord::note(D5, 3.0),
                    TimedChord::note(C5, 2.0),
                    TimedChord::note(G4, 1.0),
                    TimedChord::note(F4, 3.0),
                ]),
            },
            Level {
                instructions:
                    "Frozen: alternate the chord C4/E4 with G3 four times quickly \
                     (half a beat each), then do the same with B3/D4 over G3, \
                     A3/C4 over E3, and A3/C4 over F3.",
                expected_line: Some(frozen_line()),
                beats_per_minute: 140.0,
                accompaniment: Some(vec![
                    TimedChord::note(C5, 2.5),
                    TimedChord::note(G4, 0.5),
                    TimedChord::note(E5, 0.5),
                    TimedChord::note(D5, 3.5),
                    TimedChord::note(C5, 1.0),
                    TimedChord::note(A4, 1.0),
                    TimedChord::note(A4, 0.5),
                    TimedChord::note(A4, 0.5),
                    TimedChord::note(A4, 0.5),
                    TimedChord::note(B4, 1.0),
                    TimedChord::note(C5, 1.0),
                    TimedChord::note(D5, 0.5),
                    TimedChord::note(C5, 3.0),
                ]),
            },
            Level {
                instructions: "Play anything you like.",
                expected_line: None,
                beats_per_minute: 120.0,
                accompaniment: None,
            },
        ],
    }
}

fn frozen_line() -> Vec<TimedChord> {
    let mut line = Vec::new();
    for (chord, between) in [
        ([C4, E4], G3),
        ([B3, D4], G3),
        ([A3, C4], E3),
        ([A3, C4], F3),
    ] {
        for _ in 0..4 {
            line.push(TimedChord::chord(&chord, 0.5));
            line.push(TimedChord::note(between, 0.5));
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequencing::Track;

    #[test]
    fn test_shipped_sets() {
        let sets = all_level_sets();
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].name, "tutorial");
        assert_eq!(sets[0].levels.len(), 5);
        assert_eq!(sets[1].name, "beginner");
        assert_eq!(sets[1].levels.len(), 10);
    }

    #[test]
    fn test_level_set_lookup() {
        assert!(level_set("tutorial").is_some());
        assert!(level_set("virtuoso").is_none());
    }

    #[test]
    fn test_all_durations_positive() {
        for set in all_level_sets() {
            for level in &set.levels {
                for line in [&level.expected_line, &level.accompaniment] {
                    if let Some(line) = line {
                        assert!(line.iter().all(|step| step.duration_beats > 0.0));
                    }
                }
                assert!(level.beats_per_minute > 0.0);
            }
        }
    }

    #[test]
    fn test_only_final_beginner_level_is_free_play() {
        let set = beginner();
        let (last, rest) = set.levels.split_last().unwrap();
        assert!(last.expected_line.is_none());
        assert!(rest.iter().all(|level| level.expected_line.is_some()));
    }

    #[test]
    fn test_frozen_line_shape() {
        let line = frozen_line();
        assert_eq!(line.len(), 32);
        let track = Track::from_timed_chords(&line);
        assert_eq!(track.cursor_beat(), 16.0);
    }
}
