use std::{f32::consts::PI, fmt::Display, str::FromStr};

/// Shape of a pluck's oscillator, sampled by phase in [0, 1). The toy defaults to
/// sine everywhere; the rest are selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Waveform {
    #[default]
    Sine,
    Triangle,
    Saw,
    Pulse,
}

impl Waveform {
    pub fn sample(self, state_01: f32) -> f32 {
        match self {
            Self::Sine => (state_01 * PI * 2.0).sin(),
            Self::Triangle => (((state_01 * 2.0) - 1.0).abs() * 2.0) - 1.0,
            Self::Saw => (state_01 * 2.0) - 1.0,
            Self::Pulse => {
                if state_01 < 0.5 {
                    -1.0
                } else {
                    1.0
                }
            }
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sine => "sine",
            Self::Triangle => "triangle",
            Self::Saw => "saw",
            Self::Pulse => "pulse",
        }
    }
}

impl Display for Waveform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Waveform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sine" => Ok(Self::Sine),
            "triangle" => Ok(Self::Triangle),
            "saw" => Ok(Self::Saw),
            "pulse" => Ok(Self::Pulse),
            other => Err(format!(
                "Unknown waveform {:?} (expected sine, triangle, saw or pulse).",
                other
            )),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sine_peaks_at_quarter_phase() {
        assert!((Waveform::Sine.sample(0.25) - 1.0).abs() < 1e-6);
        assert!((Waveform::Sine.sample(0.75) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn saw_ramps_across_the_period() {
        assert_eq!(Waveform::Saw.sample(0.0), -1.0);
        assert_eq!(Waveform::Saw.sample(0.5), 0.0);
    }

    #[test]
    fn triangle_is_symmetric() {
        assert_eq!(Waveform::Triangle.sample(0.0), 1.0);
        assert_eq!(Waveform::Triangle.sample(0.25), 0.0);
        assert_eq!(Waveform::Triangle.sample(0.5), -1.0);
        assert_eq!(Waveform::Triangle.sample(0.75), 0.0);
    }

    #[test]
    fn name_round_trip() {
        for waveform in [
            Waveform::Sine,
            Waveform::Triangle,
            Waveform::Saw,
            Waveform::Pulse,
        ] {
            assert_eq!(waveform.as_str().parse::<Waveform>(), Ok(waveform));
        }
    }

    #[test]
    fn unknown_names_are_errors() {
        assert!("square".parse::<Waveform>().is_err());
    }
}
