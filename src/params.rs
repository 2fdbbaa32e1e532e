use serde::{Deserialize, Serialize};
use std::fmt;

pub const FEED_STEP: f64 = 0.001;
pub const KILL_STEP: f64 = 0.001;
pub const DIFFUSION_A_STEP: f64 = 0.01;

/// Tunables read by the stepper once per frame.
///
/// Values are not range-checked: the keyboard can drive any of them negative
/// or past 1. The stepper clamps concentrations, so only non-finite values are
/// treated as a defect.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    pub feed: f64,
    pub kill: f64,
    pub diffusion_a: f64,
    pub diffusion_b: f64,
    pub time_step: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            feed: 0.0545,
            kill: 0.06093,
            diffusion_a: 0.9,
            diffusion_b: 0.5,
            time_step: 1.0,
        }
    }
}

impl Params {
    pub fn is_finite(&self) -> bool {
        self.feed.is_finite()
            && self.kill.is_finite()
            && self.diffusion_a.is_finite()
            && self.diffusion_b.is_finite()
            && self.time_step.is_finite()
    }

    /// Applies one tuning event and returns the parameter's new value.
    pub fn apply(&mut self, t: Tuning) -> f64 {
        let slot = match t {
            Tuning::IncreaseFeed | Tuning::DecreaseFeed => &mut self.feed,
            Tuning::IncreaseKill | Tuning::DecreaseKill => &mut self.kill,
            Tuning::IncreaseDiffusionA | Tuning::DecreaseDiffusionA => &mut self.diffusion_a,
        };
        *slot += t.delta();
        *slot
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "feed:{:.4}  kill:{:.5}  dA:{:.2}  dB:{:.2}  dt:{:.2}",
            self.feed, self.kill, self.diffusion_a, self.diffusion_b, self.time_step
        )
    }
}

/// Discrete tuning events delivered by the input source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tuning {
    IncreaseFeed,
    DecreaseFeed,
    IncreaseKill,
    DecreaseKill,
    IncreaseDiffusionA,
    DecreaseDiffusionA,
}

impl Tuning {
    pub fn delta(self) -> f64 {
        match self {
            Tuning::IncreaseFeed => FEED_STEP,
            Tuning::DecreaseFeed => -FEED_STEP,
            Tuning::IncreaseKill => KILL_STEP,
            Tuning::DecreaseKill => -KILL_STEP,
            Tuning::IncreaseDiffusionA => DIFFUSION_A_STEP,
            Tuning::DecreaseDiffusionA => -DIFFUSION_A_STEP,
        }
    }

    /// Name of the parameter this event changes.
    pub fn label(self) -> &'static str {
        match self {
            Tuning::IncreaseFeed | Tuning::DecreaseFeed => "feed",
            Tuning::IncreaseKill | Tuning::DecreaseKill => "kill",
            Tuning::IncreaseDiffusionA | Tuning::DecreaseDiffusionA => "diffusionA",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn defaults_match_reference_values() {
        let p = Params::default();
        assert_eq!(p.feed, 0.0545);
        assert_eq!(p.kill, 0.06093);
        assert_eq!(p.diffusion_a, 0.9);
        assert_eq!(p.diffusion_b, 0.5);
        assert_eq!(p.time_step, 1.0);
    }

    #[test]
    fn tuning_moves_one_parameter_by_its_step() {
        let mut p = Params::default();
        let feed = p.apply(Tuning::IncreaseFeed);
        assert!((feed - 0.0555).abs() < EPS);
        let kill = p.apply(Tuning::DecreaseKill);
        assert!((kill - 0.05993).abs() < EPS);
        let da = p.apply(Tuning::DecreaseDiffusionA);
        assert!((da - 0.89).abs() < EPS);
        p.apply(Tuning::IncreaseDiffusionA);
        assert!((p.diffusion_a - 0.9).abs() < EPS);
        assert_eq!(p.diffusion_b, 0.5);
        assert_eq!(p.time_step, 1.0);
    }

    #[test]
    fn tuning_is_unbounded() {
        let mut p = Params {
            feed: 0.0,
            ..Params::default()
        };
        p.apply(Tuning::DecreaseFeed);
        assert!(p.feed < 0.0);
    }

    #[test]
    fn labels_name_the_parameter() {
        assert_eq!(Tuning::IncreaseKill.label(), "kill");
        assert_eq!(Tuning::DecreaseDiffusionA.label(), "diffusionA");
    }

    #[test]
    fn partial_json_fills_defaults() {
        let p: Params = serde_json::from_str(r#"{ "feed": 0.03 }"#).unwrap();
        assert_eq!(p.feed, 0.03);
        assert_eq!(p.kill, Params::default().kill);
    }

    #[test]
    fn detects_non_finite() {
        let p = Params {
            kill: f64::NAN,
            ..Params::default()
        };
        assert!(!p.is_finite());
        assert!(Params::default().is_finite());
    }
}
