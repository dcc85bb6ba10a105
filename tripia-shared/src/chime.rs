//! Two-tone notification chime played when the assistant starts answering.
//!
//! Only the schedule lives here; the browser crate turns it into Web Audio
//! oscillators.

/// One sine tone of the chime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Frequency in hertz.
    pub frequency: f32,
    /// Start offset from the audio context's current time, in seconds.
    pub offset: f64,
    /// Tone length in seconds.
    pub duration: f64,
}

impl Tone {
    /// Time at which the fade-in reaches [`PEAK_GAIN`], relative to `now`.
    pub fn peak_at(&self, now: f64) -> f64 {
        now + self.offset + FADE_IN
    }

    /// Time at which the tone stops, relative to `now`.
    pub fn end_at(&self, now: f64) -> f64 {
        now + self.offset + self.duration
    }
}

/// Gain reached after the linear fade-in.
pub const PEAK_GAIN: f32 = 0.08;
/// Gain the exponential fade-out ends on; must stay above zero.
pub const FLOOR_GAIN: f32 = 0.001;
/// Linear fade-in length in seconds.
pub const FADE_IN: f64 = 0.02;

/// The chime, in playback order.
pub const CHIME: [Tone; 2] = [
    Tone {
        frequency: 800.0,
        offset: 0.0,
        duration: 0.15,
    },
    Tone {
        frequency: 1000.0,
        offset: 0.1,
        duration: 0.15,
    },
];

/// Seconds after which every tone has finished and the context can close.
pub fn total_duration() -> f64 {
    CHIME
        .iter()
        .map(|tone| tone.offset + tone.duration)
        .fold(0.0, f64::max)
}

/// Milliseconds to wait before closing the audio context, with some slack
/// for scheduling jitter.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn close_delay_ms() -> u32 {
    ((total_duration() * 1000.0).round() + 100.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chime_is_two_rising_tones() {
        assert_eq!(CHIME.len(), 2);
        assert!((CHIME[0].frequency - 800.0).abs() < f32::EPSILON);
        assert!((CHIME[1].frequency - 1000.0).abs() < f32::EPSILON);
        assert!(CHIME[1].offset > CHIME[0].offset);
    }

    #[test]
    fn fade_in_ends_before_the_tone() {
        for tone in CHIME {
            assert!(tone.peak_at(1.0) < tone.end_at(1.0));
        }
        assert!(FLOOR_GAIN > 0.0);
    }

    #[test]
    fn context_closes_after_last_tone() {
        assert!((total_duration() - 0.25).abs() < 1e-9);
        assert_eq!(close_delay_ms(), 350);
    }
}
