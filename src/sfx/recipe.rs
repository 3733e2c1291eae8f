//! The recipe table — declarative synthesis descriptions for every effect.
//!
//! A recipe is pure static data: an ordered list of signal stages, each
//! pairing a frequency program with an amplitude envelope and an optional
//! filter. The table is looked up once per play request and never modified.

use super::effect::SoundEffect;
use super::filter::{FilterKind, FilterSpec};
use super::oscillator::Waveform;

/// Floor for exponential decays and ramps. Exponential interpolation toward
/// exactly zero is undefined, so every decay targets this instead.
pub const DECAY_FLOOR: f32 = 0.01;

/// An anchor point in a frequency program: reach `hz` at `at` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreqPoint {
    pub at: f32,
    pub hz: f32,
}

/// How a stage's oscillator frequency evolves over its lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrequencyProgram {
    /// Fixed frequency for the whole stage.
    Constant(f32),
    /// Instantaneous step changes; each point holds until the next.
    /// The first point must be at t = 0.
    Steps(&'static [FreqPoint]),
    /// Piecewise exponential ramp through the points. The first point is the
    /// t = 0 anchor; between anchors the frequency interpolates
    /// multiplicatively.
    ExpRamp(&'static [FreqPoint]),
}

impl FrequencyProgram {
    /// Frequency in Hz at `t` seconds into the stage.
    pub fn value_at(self, t: f32) -> f32 {
        match self {
            FrequencyProgram::Constant(hz) => hz,
            FrequencyProgram::Steps(points) => {
                let mut current = points[0].hz;
                for p in points {
                    if t >= p.at {
                        current = p.hz;
                    } else {
                        break;
                    }
                }
                current
            }
            FrequencyProgram::ExpRamp(points) => {
                let last = points[points.len() - 1];
                if t >= last.at {
                    return last.hz;
                }
                let mut from = points[0];
                for &to in &points[1..] {
                    if t < to.at {
                        let span = to.at - from.at;
                        let frac = ((t - from.at) / span).clamp(0.0, 1.0);
                        return from.hz * (to.hz / from.hz).powf(frac);
                    }
                    from = to;
                }
                last.hz
            }
        }
    }
}

/// A gain set-point: the envelope jumps to `gain` at `at` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainPoint {
    pub at: f32,
    pub gain: f32,
}

/// Amplitude envelope: gain set-points followed by an exponential decay from
/// the last set-point down to `floor` at the end of the stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub points: &'static [GainPoint],
    pub floor: f32,
}

impl Envelope {
    /// Gain at `t` seconds into a stage of the given total `duration`.
    pub fn gain_at(self, t: f32, duration: f32) -> f32 {
        let last = self.points[self.points.len() - 1];
        if t < last.at {
            let mut current = self.points[0].gain;
            for p in self.points {
                if t >= p.at {
                    current = p.gain;
                } else {
                    break;
                }
            }
            return current;
        }
        let span = duration - last.at;
        if span <= 0.0 || t >= duration {
            return self.floor;
        }
        let frac = (t - last.at) / span;
        last.gain * (self.floor / last.gain).powf(frac)
    }
}

/// One stage of a recipe: a fresh oscillator/envelope/(filter) graph with a
/// fixed lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalStage {
    pub waveform: Waveform,
    pub frequency: FrequencyProgram,
    pub envelope: Envelope,
    pub filter: Option<FilterSpec>,
    pub duration: f32,
}

/// A complete synthesis recipe for one effect.
#[derive(Debug, Clone, Copy)]
pub struct SynthesisRecipe {
    pub stages: &'static [SignalStage],
}

impl SynthesisRecipe {
    /// Total scheduled duration across all stages, in seconds.
    pub fn total_duration(self) -> f32 {
        self.stages.iter().map(|s| s.duration).sum()
    }
}

// Every stock stage opens at a fixed gain and decays exponentially to the
// floor over its full lifetime.

const fn flat_gain(gain: &'static [GainPoint]) -> Envelope {
    Envelope {
        points: gain,
        floor: DECAY_FLOOR,
    }
}

const BEEP: &[SignalStage] = &[SignalStage {
    waveform: Waveform::Sine,
    frequency: FrequencyProgram::Constant(800.0),
    envelope: flat_gain(&[GainPoint { at: 0.0, gain: 0.3 }]),
    filter: None,
    duration: 0.1,
}];

const ALERT: &[SignalStage] = &[SignalStage {
    waveform: Waveform::Sine,
    frequency: FrequencyProgram::Steps(&[
        FreqPoint { at: 0.0, hz: 1000.0 },
        FreqPoint { at: 0.1, hz: 800.0 },
        FreqPoint { at: 0.2, hz: 1000.0 },
    ]),
    envelope: flat_gain(&[GainPoint { at: 0.0, gain: 0.3 }]),
    filter: None,
    duration: 0.3,
}];

const PHASER: &[SignalStage] = &[SignalStage {
    waveform: Waveform::Sine,
    frequency: FrequencyProgram::ExpRamp(&[
        FreqPoint { at: 0.0, hz: 150.0 },
        FreqPoint { at: 0.5, hz: 400.0 },
    ]),
    envelope: flat_gain(&[GainPoint { at: 0.0, gain: 0.2 }]),
    filter: Some(FilterSpec {
        kind: FilterKind::Highpass,
        cutoff_hz: 200.0,
    }),
    duration: 0.5,
}];

const TRANSPORTER: &[SignalStage] = &[SignalStage {
    waveform: Waveform::Sine,
    frequency: FrequencyProgram::ExpRamp(&[
        FreqPoint { at: 0.0, hz: 400.0 },
        FreqPoint { at: 0.3, hz: 200.0 },
        FreqPoint { at: 0.6, hz: 600.0 },
    ]),
    envelope: flat_gain(&[GainPoint { at: 0.0, gain: 0.25 }]),
    filter: None,
    duration: 0.6,
}];

const SHIELD: &[SignalStage] = &[SignalStage {
    waveform: Waveform::Sine,
    frequency: FrequencyProgram::ExpRamp(&[
        FreqPoint { at: 0.0, hz: 600.0 },
        FreqPoint { at: 0.2, hz: 800.0 },
    ]),
    envelope: flat_gain(&[GainPoint { at: 0.0, gain: 0.2 }]),
    filter: None,
    duration: 0.2,
}];

const WARP: &[SignalStage] = &[SignalStage {
    waveform: Waveform::Sine,
    frequency: FrequencyProgram::ExpRamp(&[
        FreqPoint { at: 0.0, hz: 100.0 },
        FreqPoint { at: 1.0, hz: 800.0 },
    ]),
    envelope: flat_gain(&[GainPoint { at: 0.0, gain: 0.15 }]),
    filter: None,
    duration: 1.0,
}];

const SCAN: &[SignalStage] = &[SignalStage {
    waveform: Waveform::Sine,
    frequency: FrequencyProgram::ExpRamp(&[
        FreqPoint { at: 0.0, hz: 300.0 },
        FreqPoint { at: 0.4, hz: 800.0 },
    ]),
    envelope: flat_gain(&[GainPoint { at: 0.0, gain: 0.2 }]),
    filter: None,
    duration: 0.4,
}];

const ERROR: &[SignalStage] = &[SignalStage {
    waveform: Waveform::Sine,
    frequency: FrequencyProgram::Steps(&[
        FreqPoint { at: 0.0, hz: 200.0 },
        FreqPoint { at: 0.1, hz: 100.0 },
    ]),
    envelope: flat_gain(&[GainPoint { at: 0.0, gain: 0.3 }]),
    filter: None,
    duration: 0.2,
}];

const SUCCESS: &[SignalStage] = &[SignalStage {
    waveform: Waveform::Sine,
    frequency: FrequencyProgram::Steps(&[
        FreqPoint { at: 0.0, hz: 600.0 },
        FreqPoint { at: 0.1, hz: 800.0 },
    ]),
    envelope: flat_gain(&[GainPoint { at: 0.0, gain: 0.2 }]),
    filter: None,
    duration: 0.2,
}];

/// Look up the recipe for an effect.
pub fn recipe(effect: SoundEffect) -> SynthesisRecipe {
    let stages = match effect {
        SoundEffect::Beep => BEEP,
        SoundEffect::Alert => ALERT,
        SoundEffect::Phaser => PHASER,
        SoundEffect::Transporter => TRANSPORTER,
        SoundEffect::Shield => SHIELD,
        SoundEffect::Warp => WARP,
        SoundEffect::Scan => SCAN,
        SoundEffect::Error => ERROR,
        SoundEffect::Success => SUCCESS,
    };
    SynthesisRecipe { stages }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn every_effect_has_a_nonempty_recipe() {
        for effect in SoundEffect::ALL {
            let r = recipe(effect);
            assert!(!r.stages.is_empty(), "{effect} has no stages");
            assert!(r.total_duration() > 0.0, "{effect} has zero duration");
        }
    }

    #[test]
    fn recipe_durations_match_the_table() {
        let expected = [
            (SoundEffect::Beep, 0.1),
            (SoundEffect::Alert, 0.3),
            (SoundEffect::Phaser, 0.5),
            (SoundEffect::Transporter, 0.6),
            (SoundEffect::Shield, 0.2),
            (SoundEffect::Warp, 1.0),
            (SoundEffect::Scan, 0.4),
            (SoundEffect::Error, 0.2),
            (SoundEffect::Success, 0.2),
        ];
        for (effect, duration) in expected {
            assert_approx_eq!(recipe(effect).total_duration(), duration, 1e-6);
        }
    }

    #[test]
    fn decays_never_target_zero() {
        for effect in SoundEffect::ALL {
            for stage in recipe(effect).stages {
                assert!(stage.envelope.floor > 0.0, "{effect} decays to zero");
            }
        }
    }

    #[test]
    fn constant_program_holds() {
        let p = FrequencyProgram::Constant(800.0);
        assert_eq!(p.value_at(0.0), 800.0);
        assert_eq!(p.value_at(0.05), 800.0);
    }

    #[test]
    fn alert_steps_hold_until_next_change() {
        let stage = &recipe(SoundEffect::Alert).stages[0];
        assert_approx_eq!(stage.frequency.value_at(0.0), 1000.0, 1e-3);
        assert_approx_eq!(stage.frequency.value_at(0.05), 1000.0, 1e-3);
        assert_approx_eq!(stage.frequency.value_at(0.15), 800.0, 1e-3);
        assert_approx_eq!(stage.frequency.value_at(0.25), 1000.0, 1e-3);
    }

    #[test]
    fn error_and_success_step_down_and_up() {
        let err = &recipe(SoundEffect::Error).stages[0];
        assert_approx_eq!(err.frequency.value_at(0.05), 200.0, 1e-3);
        assert_approx_eq!(err.frequency.value_at(0.15), 100.0, 1e-3);

        let ok = &recipe(SoundEffect::Success).stages[0];
        assert_approx_eq!(ok.frequency.value_at(0.05), 600.0, 1e-3);
        assert_approx_eq!(ok.frequency.value_at(0.15), 800.0, 1e-3);
    }

    #[test]
    fn phaser_ramp_is_exponential() {
        let stage = &recipe(SoundEffect::Phaser).stages[0];
        assert_approx_eq!(stage.frequency.value_at(0.0), 150.0, 1e-3);
        // Midpoint of an exponential ramp is the geometric mean.
        let mid = (150.0f32 * 400.0).sqrt();
        assert_approx_eq!(stage.frequency.value_at(0.25), mid, 0.5);
        assert_approx_eq!(stage.frequency.value_at(0.5), 400.0, 1e-3);
    }

    #[test]
    fn transporter_ramp_has_two_legs() {
        let stage = &recipe(SoundEffect::Transporter).stages[0];
        assert_approx_eq!(stage.frequency.value_at(0.0), 400.0, 1e-3);
        assert_approx_eq!(stage.frequency.value_at(0.3), 200.0, 1e-3);
        assert_approx_eq!(stage.frequency.value_at(0.6), 600.0, 1e-3);
        // First leg descends, second ascends.
        assert!(stage.frequency.value_at(0.15) < 400.0);
        assert!(stage.frequency.value_at(0.45) > 200.0);
    }

    #[test]
    fn ramp_clamps_past_the_last_anchor() {
        let stage = &recipe(SoundEffect::Warp).stages[0];
        assert_approx_eq!(stage.frequency.value_at(2.0), 800.0, 1e-3);
    }

    #[test]
    fn envelope_starts_at_gain_and_decays_to_floor() {
        let stage = &recipe(SoundEffect::Beep).stages[0];
        let env = stage.envelope;
        assert_approx_eq!(env.gain_at(0.0, stage.duration), 0.3, 1e-6);
        // Halfway through an exponential decay: geometric mean of start and floor.
        let mid = (0.3f32 * DECAY_FLOOR).sqrt();
        assert_approx_eq!(env.gain_at(0.05, stage.duration), mid, 1e-3);
        assert_approx_eq!(env.gain_at(stage.duration, stage.duration), DECAY_FLOOR, 1e-6);
    }

    #[test]
    fn envelope_is_monotonically_decreasing_for_single_point() {
        let stage = &recipe(SoundEffect::Warp).stages[0];
        let mut prev = f32::MAX;
        for i in 0..=100 {
            let t = stage.duration * i as f32 / 100.0;
            let g = stage.envelope.gain_at(t, stage.duration);
            assert!(g <= prev + 1e-6, "gain rose at t={t}");
            prev = g;
        }
    }

    #[test]
    fn only_phaser_declares_a_filter() {
        for effect in SoundEffect::ALL {
            let has_filter = recipe(effect).stages.iter().any(|s| s.filter.is_some());
            assert_eq!(has_filter, effect == SoundEffect::Phaser, "{effect}");
        }
    }

    #[test]
    fn all_stock_recipes_use_sine() {
        for effect in SoundEffect::ALL {
            for stage in recipe(effect).stages {
                assert_eq!(stage.waveform, Waveform::Sine, "{effect}");
            }
        }
    }
}
