/*
MIDI Pitch Constants
====================

Readable names for the MIDI note numbers used by the game's level data
and tests. Middle C (C4) = MIDI note 60.

Naming: naturals as C4, D4...; sharps as Cs4; flats as Db4 (alias of the
same number as the sharp). The formula: number = 12 * (octave + 1) + semitone,
with C=0, C#=1, ... B=11.

Only octaves 2-6 are defined; the game's melodies and accompaniments all
fall in that range.
*/

#![allow(non_upper_case_globals)]

use super::event::Pitch;

// Octave 2
pub const C2: Pitch = 36;
pub const Cs2: Pitch = 37;
pub const Db2: Pitch = 37;
pub const D2: Pitch = 38;
pub const Ds2: Pitch = 39;
pub const Eb2: Pitch = 39;
pub const E2: Pitch = 40;
pub const F2: Pitch = 41;
pub const Fs2: Pitch = 42;
pub const Gb2: Pitch = 42;
pub const G2: Pitch = 43;
pub const Gs2: Pitch = 44;
pub const Ab2: Pitch = 44;
pub const A2: Pitch = 45;
pub const As2: Pitch = 46;
pub const Bb2: Pitch = 46;
pub const B2: Pitch = 47;

// Octave 3
pub const C3: Pitch = 48;
pub const Cs3: Pitch = 49;
pub const Db3: Pitch = 49;
pub const D3: Pitch = 50;
pub const Ds3: Pitch = 51;
pub const Eb3: Pitch = 51;
pub const E3: Pitch = 52;
pub const F3: Pitch = 53;
pub const Fs3: Pitch = 54;
pub const Gb3: Pitch = 54;
pub const G3: Pitch = 55;
pub const Gs3: Pitch = 56;
pub const Ab3: Pitch = 56;
pub const A3: Pitch = 57;
pub const As3: Pitch = 58;
pub const Bb3: Pitch = 58;
pub const B3: Pitch = 59;

// Octave 4
pub const C4: Pitch = 60;
pub const Cs4: Pitch = 61;
pub const Db4: Pitch = 61;
pub const D4: Pitch = 62;
pub const Ds4: Pitch = 63;
pub const Eb4: Pitch = 63;
pub const E4: Pitch = 64;
pub const F4: Pitch = 65;
pub const Fs4: Pitch = 66;
pub const Gb4: Pitch = 66;
pub const G4: Pitch = 67;
pub const Gs4: Pitch = 68;
pub const Ab4: Pitch = 68;
pub const A4: Pitch = 69;
pub const As4: Pitch = 70;
pub const Bb4: Pitch = 70;
pub const B4: Pitch = 71;

// Octave 5
pub const C5: Pitch = 72;
pub const Cs5: Pitch = 73;
pub const Db5: Pitch = 73;
pub const D5: Pitch = 74;
pub const Ds5: Pitch = 75;
pub const Eb5: Pitch = 75;
pub const E5: Pitch = 76;
pub const F5: Pitch = 77;
pub const Fs5: Pitch = 78;
pub const Gb5: Pitch = 78;
pub const G5: Pitch = 79;
pub const Gs5: Pitch = 80;
pub const Ab5: Pitch = 80;
pub const A5: Pitch = 81;
pub const As5: Pitch = 82;
pub const Bb5: Pitch = 82;
pub const B5: Pitch = 83;

// Octave 6
pub const C6: Pitch = 84;
pub const Cs6: Pitch = 85;
pub const Db6: Pitch = 85;
pub const D6: Pitch = 86;
pub const Ds6: Pitch = 87;
pub const Eb6: Pitch = 87;
pub const E6: Pitch = 88;
pub const F6: Pitch = 89;
pub const Fs6: Pitch = 90;
pub const Gb6: Pitch = 90;
pub const G6: Pitch = 91;
pub const Gs6: Pitch = 92;
pub const Ab6: Pitch = 92;
pub const A6: Pitch = 93;
pub const As6: Pitch = 94;
pub const Bb6: Pitch = 94;
pub const B6: Pitch = 95;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_pitches() {
        assert_eq!(C4, 60); // Middle C
        assert_eq!(A4, 69); // 440 Hz
        assert_eq!(C2, 36);
    }

    #[test]
    fn test_enharmonic_aliases() {
        assert_eq!(Cs4, Db4);
        assert_eq!(As3, Bb3);
    }
}
