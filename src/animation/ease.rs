use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Timing curves, named after the `powerN` family: `powerN` raises progress
/// to the (N + 1)th power, so `power2` is cubic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ease {
    Linear,
    In(u8),
    Out(u8),
    InOut(u8),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseEaseError {
    #[error("unknown ease family `{0}`")]
    UnknownFamily(String),
    #[error("unknown ease direction `{0}`")]
    UnknownDirection(String),
    #[error("power level {0} is out of range (0-4)")]
    PowerOutOfRange(u8),
}

impl Ease {
    /// Maps linear progress in `[0, 1]` onto the curve. Input outside the
    /// range is clamped.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::In(level) => t.powi(exponent(level)),
            Ease::Out(level) => 1.0 - (1.0 - t).powi(exponent(level)),
            Ease::InOut(level) => {
                let p = exponent(level);
                if t < 0.5 {
                    (2.0 * t).powi(p) / 2.0
                } else {
                    1.0 - (2.0 * (1.0 - t)).powi(p) / 2.0
                }
            }
        }
    }
}

fn exponent(level: u8) -> i32 {
    i32::from(level) + 1
}

impl Default for Ease {
    fn default() -> Self {
        Ease::Out(1)
    }
}

impl FromStr for Ease {
    type Err = ParseEaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "none" || s == "linear" {
            return Ok(Ease::Linear);
        }

        let (family, direction) = s.split_once('.').unwrap_or((s, "out"));
        let level = family
            .strip_prefix("power")
            .and_then(|n| n.parse::<u8>().ok())
            .ok_or_else(|| ParseEaseError::UnknownFamily(family.to_string()))?;
        if level > 4 {
            return Err(ParseEaseError::PowerOutOfRange(level));
        }
        if level == 0 {
            return Ok(Ease::Linear);
        }

        match direction {
            "in" => Ok(Ease::In(level)),
            "out" => Ok(Ease::Out(level)),
            "inOut" => Ok(Ease::InOut(level)),
            other => Err(ParseEaseError::UnknownDirection(other.to_string())),
        }
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ease::Linear => write!(f, "none"),
            Ease::In(level) => write!(f, "power{}.in", level),
            Ease::Out(level) => write!(f, "power{}.out", level),
            Ease::InOut(level) => write!(f, "power{}.inOut", level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_fixed_for_every_curve() {
        for ease in [Ease::Linear, Ease::In(2), Ease::Out(2), Ease::InOut(3)] {
            assert_eq!(ease.apply(0.0), 0.0, "{ease}");
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-12, "{ease}");
        }
    }

    #[test]
    fn power2_out_is_cubic_deceleration() {
        let ease: Ease = "power2.out".parse().unwrap();
        assert!((ease.apply(0.5) - 0.875).abs() < 1e-12);
        // Decelerating: the first half covers more ground than the second.
        assert!(ease.apply(0.5) > 0.5);
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(Ease::Out(2).apply(-1.0), 0.0);
        assert_eq!(Ease::Out(2).apply(3.0), 1.0);
    }

    #[test]
    fn parses_names() {
        assert_eq!("power2.out".parse(), Ok(Ease::Out(2)));
        assert_eq!("power3".parse(), Ok(Ease::Out(3)));
        assert_eq!("power1.inOut".parse(), Ok(Ease::InOut(1)));
        assert_eq!("none".parse(), Ok(Ease::Linear));
        assert_eq!("power0.in".parse(), Ok(Ease::Linear));
    }

    #[test]
    fn rejects_unknown_names() {
        assert_eq!(
            "elastic.out".parse::<Ease>(),
            Err(ParseEaseError::UnknownFamily("elastic".into()))
        );
        assert_eq!(
            "power2.sideways".parse::<Ease>(),
            Err(ParseEaseError::UnknownDirection("sideways".into()))
        );
        assert_eq!("power9".parse::<Ease>(), Err(ParseEaseError::PowerOutOfRange(9)));
    }

    #[test]
    fn display_round_trips_through_parse() {
        let ease = Ease::InOut(4);
        assert_eq!(ease.to_string().parse(), Ok(ease));
    }
}
