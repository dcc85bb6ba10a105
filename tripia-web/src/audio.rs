//! Web Audio playback of the notification chime.

use gloo_timers::callback::Timeout;
use tripia_shared::chime::{CHIME, FLOOR_GAIN, PEAK_GAIN, close_delay_ms};
use wasm_bindgen::JsValue;
use web_sys::{AudioContext, OscillatorType};

use crate::diagnostics;

/// Plays the chime when `enabled`. Failures are logged and swallowed.
pub fn play_chime(enabled: bool) {
    if !enabled {
        return;
    }
    if let Err(error) = schedule_chime() {
        diagnostics::warn(&format!("Failed to play notification sound: {error:?}"));
    }
}

fn schedule_chime() -> Result<(), JsValue> {
    let context = AudioContext::new()?;
    let now = context.current_time();

    for tone in CHIME {
        let oscillator = context.create_oscillator()?;
        let gain = context.create_gain()?;
        oscillator.connect_with_audio_node(&gain)?;
        gain.connect_with_audio_node(&context.destination())?;

        oscillator.set_type(OscillatorType::Sine);
        let start = now + tone.offset;
        oscillator.frequency().set_value_at_time(tone.frequency, start)?;

        let level = gain.gain();
        level.set_value_at_time(0.0, start)?;
        level.linear_ramp_to_value_at_time(PEAK_GAIN, tone.peak_at(now))?;
        level.exponential_ramp_to_value_at_time(FLOOR_GAIN, tone.end_at(now))?;

        oscillator.start_with_when(start)?;
        oscillator.stop_with_when(tone.end_at(now))?;
    }

    // One context per chime; release it once the last tone is done.
    Timeout::new(close_delay_ms(), move || {
        if let Err(error) = context.close() {
            diagnostics::warn(&format!("Failed to close audio context: {error:?}"));
        }
    })
    .forget();
    Ok(())
}
