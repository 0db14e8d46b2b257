//! pure classifiers that turn raw sensor numbers into display labels.
//!
//! thresholds match the node hardware: the microphone reports an adc peak,
//! the bh1750 reports lux. temperature and humidity stay raw and are never
//! classified.

use serde::Serialize;
use std::fmt;

/// coarse loudness bucket for a microphone adc peak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AudioLevel {
    Quiet,
    Talking,
    Loud,
}

impl AudioLevel {
    pub const fn label(self) -> &'static str {
        match self {
            AudioLevel::Quiet => "Quiet",
            AudioLevel::Talking => "Talking",
            AudioLevel::Loud => "Loud",
        }
    }
}

impl fmt::Display for AudioLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// coarse brightness bucket for a lux reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LightLevel {
    Dark,
    Bright,
    #[serde(rename = "Very Bright")]
    VeryBright,
}

impl LightLevel {
    pub const fn label(self) -> &'static str {
        match self {
            LightLevel::Dark => "Dark",
            LightLevel::Bright => "Bright",
            LightLevel::VeryBright => "Very Bright",
        }
    }
}

impl fmt::Display for LightLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// classify a microphone peak; None in, None out.
/// peaks at or below 50 read as quiet, at or below 500 as talking.
pub fn interpret_audio(peak: Option<f64>) -> Option<AudioLevel> {
    let peak = peak?;
    Some(if peak <= 50.0 {
        AudioLevel::Quiet
    } else if peak <= 500.0 {
        AudioLevel::Talking
    } else {
        AudioLevel::Loud
    })
}

/// classify a lux reading; None in, None out.
/// below 50 lux reads as dark, 50 through 500 as bright.
pub fn interpret_light(lux: Option<f64>) -> Option<LightLevel> {
    let lux = lux?;
    Some(if lux < 50.0 {
        LightLevel::Dark
    } else if lux <= 500.0 {
        LightLevel::Bright
    } else {
        LightLevel::VeryBright
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_bucket_boundaries() {
        assert_eq!(interpret_audio(Some(0.0)), Some(AudioLevel::Quiet));
        assert_eq!(interpret_audio(Some(50.0)), Some(AudioLevel::Quiet));
        assert_eq!(interpret_audio(Some(51.0)), Some(AudioLevel::Talking));
        assert_eq!(interpret_audio(Some(500.0)), Some(AudioLevel::Talking));
        assert_eq!(interpret_audio(Some(501.0)), Some(AudioLevel::Loud));
    }

    #[test]
    fn audio_null_passes_through() {
        assert_eq!(interpret_audio(None), None);
    }

    #[test]
    fn light_bucket_boundaries() {
        assert_eq!(interpret_light(Some(0.0)), Some(LightLevel::Dark));
        assert_eq!(interpret_light(Some(49.0)), Some(LightLevel::Dark));
        assert_eq!(interpret_light(Some(50.0)), Some(LightLevel::Bright));
        assert_eq!(interpret_light(Some(500.0)), Some(LightLevel::Bright));
        assert_eq!(interpret_light(Some(501.0)), Some(LightLevel::VeryBright));
    }

    #[test]
    fn light_null_passes_through() {
        assert_eq!(interpret_light(None), None);
    }

    #[test]
    fn labels_are_display_friendly() {
        assert_eq!(AudioLevel::Talking.to_string(), "Talking");
        assert_eq!(LightLevel::VeryBright.to_string(), "Very Bright");
        assert_eq!(
            serde_json::to_string(&LightLevel::VeryBright).unwrap(),
            "\"Very Bright\""
        );
    }
}
