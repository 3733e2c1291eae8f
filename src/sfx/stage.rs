//! Stage voices — the running synthesis state behind one scheduled stage.
//!
//! A [`StageVoice`] is built on the control thread and handed to the audio
//! thread, where it is pulled one sample at a time until its lifetime ends.
//! Voices are independent; overlapping play calls simply mix their voices.

use super::filter::Biquad;
use super::recipe::{recipe, SignalStage};
use super::SoundEffect;

/// One scheduled oscillator/envelope/(filter) graph.
#[derive(Debug)]
pub struct StageVoice {
    stage: &'static SignalStage,
    /// Frames of silence before the stage starts sounding.
    delay: u64,
    /// Frames in the stage lifetime proper.
    total: u64,
    /// Frames consumed so far, delay included.
    pos: u64,
    phase: f64,
    filter: Option<Biquad>,
    sample_rate: u32,
}

impl StageVoice {
    /// Schedule `stage` to start `start_offset` seconds from now.
    pub fn new(stage: &'static SignalStage, start_offset: f32, sample_rate: u32) -> Self {
        let delay = (start_offset.max(0.0) as f64 * sample_rate as f64).round() as u64;
        let total = (stage.duration as f64 * sample_rate as f64).round() as u64;
        let filter = stage
            .filter
            .map(|spec| Biquad::from_spec(spec, sample_rate));
        Self {
            stage,
            delay,
            total,
            pos: 0,
            phase: 0.0,
            filter,
            sample_rate,
        }
    }

    /// True once the voice has played out its full lifetime.
    pub fn finished(&self) -> bool {
        self.pos >= self.delay + self.total
    }

    /// Stage duration in frames, delay excluded.
    pub fn len_frames(&self) -> u64 {
        self.total
    }

    /// Produce the next mono sample. Returns silence while the voice is
    /// still in its start delay or after it has finished.
    pub fn next_sample(&mut self) -> f32 {
        if self.finished() {
            return 0.0;
        }
        if self.pos < self.delay {
            self.pos += 1;
            return 0.0;
        }

        let t = (self.pos - self.delay) as f32 / self.sample_rate as f32;
        let freq = self.stage.frequency.value_at(t);
        self.phase += freq as f64 / self.sample_rate as f64;
        self.phase -= self.phase.floor();

        let raw = self.stage.waveform.sample(self.phase);
        let shaped = match &mut self.filter {
            Some(filter) => filter.process(raw),
            None => raw,
        };
        let gain = self.stage.envelope.gain_at(t, self.stage.duration);

        self.pos += 1;
        shaped * gain
    }
}

/// Build the voices for one play request, stages scheduled back-to-back
/// relative to now.
pub fn build_voices(effect: SoundEffect, sample_rate: u32) -> Vec<StageVoice> {
    let mut offset = 0.0f32;
    recipe(effect)
        .stages
        .iter()
        .map(|stage| {
            let voice = StageVoice::new(stage, offset, sample_rate);
            offset += stage.duration;
            voice
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: u32 = 44100;

    fn drain(voice: &mut StageVoice) -> Vec<f32> {
        let mut out = Vec::new();
        while !voice.finished() {
            out.push(voice.next_sample());
        }
        out
    }

    #[test]
    fn every_effect_builds_at_least_one_voice() {
        for effect in SoundEffect::ALL {
            let voices = build_voices(effect, SAMPLE_RATE);
            assert!(!voices.is_empty(), "{effect}");
            for v in &voices {
                assert!(v.len_frames() > 0, "{effect} voice has zero duration");
            }
        }
    }

    #[test]
    fn voice_length_matches_stage_duration() {
        let mut voices = build_voices(SoundEffect::Beep, SAMPLE_RATE);
        let samples = drain(&mut voices[0]);
        let expected = (0.1 * SAMPLE_RATE as f64).round() as usize;
        assert_eq!(samples.len(), expected);
    }

    #[test]
    fn voice_output_is_audible_and_bounded() {
        for effect in SoundEffect::ALL {
            for mut voice in build_voices(effect, SAMPLE_RATE) {
                let samples = drain(&mut voice);
                let peak = samples.iter().fold(0.0f32, |m, &s| m.max(s.abs()));
                assert!(peak > 0.001, "{effect} rendered silence");
                assert!(peak <= 0.35, "{effect} peaked at {peak}");
            }
        }
    }

    #[test]
    fn start_delay_renders_as_leading_silence() {
        let stage = &recipe(SoundEffect::Beep).stages[0];
        let mut voice = StageVoice::new(stage, 0.05, SAMPLE_RATE);
        let delay_frames = (0.05 * SAMPLE_RATE as f64).round() as usize;
        let samples = drain(&mut voice);
        assert!(samples[..delay_frames].iter().all(|&s| s == 0.0));
        assert!(samples[delay_frames..].iter().any(|&s| s.abs() > 0.01));
    }

    #[test]
    fn finished_voice_yields_silence() {
        let mut voices = build_voices(SoundEffect::Shield, SAMPLE_RATE);
        drain(&mut voices[0]);
        assert!(voices[0].finished());
        assert_eq!(voices[0].next_sample(), 0.0);
        assert_eq!(voices[0].next_sample(), 0.0);
    }

    #[test]
    fn envelope_decays_across_the_voice() {
        let mut voices = build_voices(SoundEffect::Warp, SAMPLE_RATE);
        let samples = drain(&mut voices[0]);
        let head = &samples[..samples.len() / 10];
        let tail = &samples[samples.len() * 9 / 10..];
        let head_peak = head.iter().fold(0.0f32, |m, &s| m.max(s.abs()));
        let tail_peak = tail.iter().fold(0.0f32, |m, &s| m.max(s.abs()));
        assert!(
            tail_peak < head_peak * 0.3,
            "tail {tail_peak} not quieter than head {head_peak}"
        );
    }

    #[test]
    fn phaser_voice_carries_its_filter() {
        let voices = build_voices(SoundEffect::Phaser, SAMPLE_RATE);
        assert!(voices[0].filter.is_some());
        let beep = build_voices(SoundEffect::Beep, SAMPLE_RATE);
        assert!(beep[0].filter.is_none());
    }
}
