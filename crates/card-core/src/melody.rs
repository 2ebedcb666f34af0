//! Synthesized fallback tune and the gate that decides when to play it.

use crate::constants::{FALLBACK_ATTACK_SEC, FALLBACK_FLOOR_GAIN, FALLBACK_PEAK_GAIN};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Note {
    pub frequency_hz: f32,
    /// Offset from the start of the phrase.
    pub start_sec: f64,
    pub duration_sec: f64,
}

/// Opening phrase of "Happy Birthday": C5 C5 D5 C5 F5 E5.
pub const BIRTHDAY_PHRASE: [Note; 6] = [
    Note { frequency_hz: 523.25, start_sec: 0.0, duration_sec: 0.5 },
    Note { frequency_hz: 523.25, start_sec: 0.5, duration_sec: 0.5 },
    Note { frequency_hz: 587.33, start_sec: 1.0, duration_sec: 0.5 },
    Note { frequency_hz: 523.25, start_sec: 1.5, duration_sec: 0.5 },
    Note { frequency_hz: 698.46, start_sec: 2.0, duration_sec: 0.5 },
    Note { frequency_hz: 659.25, start_sec: 2.5, duration_sec: 1.0 },
];

/// Gain envelope breakpoints for one note: silent at start, linear rise to the
/// peak, exponential fall to near silence at the note end.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Envelope {
    pub start: f64,
    pub peak_at: f64,
    pub peak_gain: f32,
    pub end: f64,
    pub floor_gain: f32,
}

pub fn envelope(note: &Note, phrase_start: f64) -> Envelope {
    let start = phrase_start + note.start_sec;
    Envelope {
        start,
        peak_at: start + FALLBACK_ATTACK_SEC.min(note.duration_sec),
        peak_gain: FALLBACK_PEAK_GAIN,
        end: start + note.duration_sec,
        floor_gain: FALLBACK_FLOOR_GAIN,
    }
}

/// Length of the phrase in seconds (end of the last note).
pub fn phrase_length_sec(phrase: &[Note]) -> f64 {
    phrase
        .iter()
        .map(|n| n.start_sec + n.duration_sec)
        .fold(0.0, f64::max)
}

/// Why music fell back to the synthesizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FallbackReason {
    PlayRejected,
    MediaError,
    NotLoaded,
}

/// Ensures the fallback engages once no matter how many failure signals
/// arrive (a rejected play, an `error` event and a load probe can all fire
/// for the same missing file).
///
/// The failure watchers themselves are armed lazily, on the first play
/// attempt, so nothing engages before the page has tried to play.
#[derive(Debug, Default)]
pub struct FallbackGate {
    engaged: Option<FallbackReason>,
    watching: bool,
}

impl FallbackGate {
    /// Returns true when the caller should start the synthesizer.
    pub fn engage(&mut self, reason: FallbackReason) -> bool {
        if self.engaged.is_some() {
            return false;
        }
        self.engaged = Some(reason);
        true
    }

    #[inline]
    pub fn reason(&self) -> Option<FallbackReason> {
        self.engaged
    }

    #[inline]
    pub fn is_engaged(&self) -> bool {
        self.engaged.is_some()
    }

    /// Returns true the first time only: the caller installs the media
    /// `error` listener and the load probe then.
    pub fn arm_watch(&mut self) -> bool {
        !std::mem::replace(&mut self.watching, true)
    }

    #[inline]
    pub fn is_watching(&self) -> bool {
        self.watching
    }

    /// Re-arm after the synthesizer was stopped (page reset). Installed
    /// watchers stay in place.
    pub fn release(&mut self) {
        self.engaged = None;
    }
}

/// Load probe verdict: a track that is not playing and still reports no
/// usable duration counts as missing.
pub fn track_missing(duration_sec: f64, playing: bool) -> bool {
    !playing && (duration_sec.is_nan() || duration_sec <= 0.0)
}
