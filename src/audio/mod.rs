//! Audio output: a small polyphonic sine synth behind the
//! [`Instrument`](crate::instrument::Instrument) trait.
//!
//! The player's scheduler thread pushes note messages into a lock-free
//! ring buffer; the cpal audio callback drains it and renders voices.
//! The caller keeps the [`AudioOutput`] alive for as long as sound
//! should play; dropping it stops the stream.

pub mod voice;

use std::fmt;
use std::sync::Mutex;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{Consumer, Producer, RingBuffer};

use crate::instrument::Instrument;
use crate::sequencing::Pitch;
use voice::{Voice, VoiceState};

const MAX_BLOCK_SIZE: usize = 2048;
const MESSAGE_QUEUE_CAPACITY: usize = 256;
const VOICE_GAIN: f32 = 0.15;

/// One note for the audio callback to sound. The voice holds for
/// `duration_secs` and then releases itself; there is no note-off.
#[derive(Debug, Copy, Clone)]
pub struct NoteMessage {
    pub note: u8,
    pub duration_secs: f32,
}

#[derive(Debug)]
pub enum AudioError {
    NoOutputDevice,
    DefaultConfig(cpal::DefaultStreamConfigError),
    BuildStream(cpal::BuildStreamError),
    PlayStream(cpal::PlayStreamError),
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::NoOutputDevice => write!(f, "no default audio output device available"),
            AudioError::DefaultConfig(e) => write!(f, "failed to fetch output config: {}", e),
            AudioError::BuildStream(e) => write!(f, "failed to build output stream: {}", e),
            AudioError::PlayStream(e) => write!(f, "failed to start output stream: {}", e),
        }
    }
}

impl std::error::Error for AudioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AudioError::NoOutputDevice => None,
            AudioError::DefaultConfig(e) => Some(e),
            AudioError::BuildStream(e) => Some(e),
            AudioError::PlayStream(e) => Some(e),
        }
    }
}

/// Keeps the cpal stream alive. Not `Send`; owned by the thread that
/// started the audio (normally `main`).
pub struct AudioOutput {
    _stream: cpal::Stream,
    pub sample_rate: f32,
    pub channels: usize,
}

/// The sending half: an [`Instrument`] that forwards chords to the audio
/// callback. Cheap to share behind an `Arc`.
pub struct SynthInstrument {
    tx: Mutex<Producer<NoteMessage>>,
}

/// Open the default output device and start the synth.
pub fn start(max_voices: usize) -> Result<(AudioOutput, SynthInstrument), AudioError> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or(AudioError::NoOutputDevice)?;
    let config = device
        .default_output_config()
        .map_err(AudioError::DefaultConfig)?;

    let sample_rate = config.sample_rate().0 as f32;
    let channels = config.channels() as usize;
    log::debug!(target: "audio", "output: {} Hz, {} channel(s)", sample_rate, channels);

    let (tx, rx) = RingBuffer::<NoteMessage>::new(MESSAGE_QUEUE_CAPACITY);
    let mut synth = ChordSynth::new(sample_rate, max_voices, rx);
    let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

    let stream = device
        .build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                let total_frames = data.len() / channels;
                let mut frames_written = 0;
                while frames_written < total_frames {
                    let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);

                    let block = &mut render_buf[..frames_to_render];
                    synth.render_block(block);

                    // Mono to all channels
                    let out_off = frames_written * channels;
                    for (i, &s) in block.iter().enumerate() {
                        for ch in 0..channels {
                            data[out_off + i * channels + ch] = s;
                        }
                    }
                    frames_written += frames_to_render;
                }
            },
            |err| log::warn!(target: "audio", "stream error: {}", err),
            None,
        )
        .map_err(AudioError::BuildStream)?;
    stream.play().map_err(AudioError::PlayStream)?;

    Ok((
        AudioOutput {
            _stream: stream,
            sample_rate,
            channels,
        },
        SynthInstrument { tx: Mutex::new(tx) },
    ))
}

impl Instrument for SynthInstrument {
    fn play_note(&self, pitches: &[Pitch], duration_beats: f64, beats_per_minute: f64) {
        let duration_secs = (duration_beats * 60.0 / beats_per_minute) as f32;
        let mut tx = self.tx.lock().unwrap();
        for &note in pitches {
            if tx
                .push(NoteMessage {
                    note,
                    duration_secs,
                })
                .is_err()
            {
                log::warn!(target: "audio", "note queue full, dropping note {}", note);
            }
        }
    }
}

/// Renders messages into mixed sine voices. Lives in the audio callback.
struct ChordSynth {
    voices: Vec<Voice>,
    rx: Consumer<NoteMessage>,
    frame_counter: u64,
    temp_buffer: Vec<f32>,
}

impl ChordSynth {
    fn new(sample_rate: f32, max_voices: usize, rx: Consumer<NoteMessage>) -> Self {
        Self {
            voices: (0..max_voices).map(|_| Voice::new(sample_rate)).collect(),
            rx,
            frame_counter: 0,
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    fn render_block(&mut self, out: &mut [f32]) {
        while let Ok(msg) = self.rx.pop() {
            let age = self.frame_counter;
            if let Some(voice) = self.allocate_voice() {
                voice.start(msg, age);
            }
        }

        out.fill(0.0);
        for voice in &mut self.voices {
            if !voice.is_free() {
                let block = &mut self.temp_buffer[..out.len()];
                block.fill(0.0);
                voice.render_into(block, VOICE_GAIN);

                for (o, v) in out.iter_mut().zip(block.iter()) {
                    *o += v;
                }
            }
        }

        self.frame_counter += out.len() as u64;
    }

    fn allocate_voice(&mut self) -> Option<&mut Voice> {
        // First pass: a free voice
        if let Some(idx) = self.voices.iter().position(|v| v.is_free()) {
            return Some(&mut self.voices[idx]);
        }

        // Second pass: steal the oldest releasing voice
        let steal_idx = self
            .voices
            .iter()
            .enumerate()
            .filter(|(_, v)| v.state() == VoiceState::Releasing)
            .min_by_key(|(_, v)| v.age())
            .map(|(idx, _)| idx);

        steal_idx.map(|idx| &mut self.voices[idx])
    }
}
