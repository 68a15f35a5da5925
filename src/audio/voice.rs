use super::NoteMessage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Free,      // Available for allocation
    Holding,   // Sounding for the note's duration
    Releasing, // Duration elapsed, envelope decaying to silence
}

/// Attack ramp length in seconds. Short enough to feel immediate, long
/// enough to avoid a click at note onset.
const ATTACK_SECS: f32 = 0.005;

/// Envelope level below which a releasing voice is considered silent.
const SILENCE_FLOOR: f32 = 1.0e-4;

/// One sine voice with a linear attack and an exponential release.
///
/// Unlike a gate-driven voice there is no note-off message: the voice is
/// started with its full duration and releases itself once the hold time
/// has elapsed, mirroring how the player triggers each chord exactly once.
pub struct Voice {
    state: VoiceState,
    note: u8,
    phase: f32,
    phase_inc: f32,
    env: f32,
    attack_inc: f32,
    release_coeff: f32,
    hold_samples: u32,
    age: u64,
    sample_rate: f32,
}

impl Voice {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            state: VoiceState::Free,
            note: 0,
            phase: 0.0,
            phase_inc: 0.0,
            env: 0.0,
            attack_inc: 1.0 / (ATTACK_SECS * sample_rate),
            // Roughly -60 dB over 150 ms
            release_coeff: (-1.0 / (0.022 * sample_rate)).exp(),
            hold_samples: 0,
            age: 0,
            sample_rate,
        }
    }

    pub fn start(&mut self, msg: NoteMessage, age: u64) {
        self.state = VoiceState::Holding;
        self.note = msg.note;
        self.phase = 0.0;
        self.phase_inc = midi_to_freq(msg.note) / self.sample_rate;
        self.env = 0.0;
        self.hold_samples = (msg.duration_secs * self.sample_rate) as u32;
        self.age = age;
    }

    /// Render and mix this voice into `out`.
    pub fn render_into(&mut self, out: &mut [f32], gain: f32) {
        for sample in out.iter_mut() {
            match self.state {
                VoiceState::Free => return,
                VoiceState::Holding => {
                    self.env = (self.env + self.attack_inc).min(1.0);
                    if self.hold_samples == 0 {
                        self.state = VoiceState::Releasing;
                    } else {
                        self.hold_samples -= 1;
                    }
                }
                VoiceState::Releasing => {
                    self.env *= self.release_coeff;
                    if self.env < SILENCE_FLOOR {
                        self.state = VoiceState::Free;
                        return;
                    }
                }
            }

            *sample += gain * self.env * (self.phase * std::f32::consts::TAU).sin();
            self.phase += self.phase_inc;
            if self.phase >= 1.0 {
                self.phase -= 1.0;
            }
        }
    }

    pub fn is_free(&self) -> bool {
        self.state == VoiceState::Free
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }

    pub fn age(&self) -> u64 {
        self.age
    }
}

/// Standard equal-temperament conversion, A4 (MIDI 69) = 440 Hz.
pub fn midi_to_freq(note: u8) -> f32 {
    440.0 * 2.0_f32.powf((note as f32 - 69.0) / 12.0)
}
