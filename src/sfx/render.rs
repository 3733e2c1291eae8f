//! Offline rendering — effect synthesis without an audio device.
//!
//! Used by the WAV exporter and by tests; the audible path in
//! [`audio::callback`](crate::audio::callback) pulls the same voices.

use std::path::Path;

use super::stage::build_voices;
use super::SoundEffect;

/// Render an effect to a mono f32 buffer at `sample_rate`.
pub fn render_effect(effect: SoundEffect, sample_rate: u32) -> Vec<f32> {
    let mut voices = build_voices(effect, sample_rate);
    let frames: u64 = voices.iter().map(|v| v.len_frames()).sum();
    let mut out = Vec::with_capacity(frames as usize);
    for _ in 0..frames {
        let mix: f32 = voices.iter_mut().map(|v| v.next_sample()).sum();
        out.push(mix);
    }
    out
}

/// Write a mono buffer as a 16-bit PCM WAV file.
pub fn write_wav(path: &Path, samples: &[f32], sample_rate: u32) -> Result<(), hound::Error> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;
    for &sample in samples {
        let clamped = sample.clamp(-1.0, 1.0);
        writer.write_sample((clamped * i16::MAX as f32) as i16)?;
    }
    writer.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sfx::recipe::recipe;

    const SAMPLE_RATE: u32 = 44100;

    #[test]
    fn render_length_matches_recipe_duration() {
        for effect in SoundEffect::ALL {
            let samples = render_effect(effect, SAMPLE_RATE);
            let expected =
                (recipe(effect).total_duration() as f64 * SAMPLE_RATE as f64).round() as usize;
            assert_eq!(samples.len(), expected, "{effect}");
        }
    }

    #[test]
    fn renders_are_audible() {
        for effect in SoundEffect::ALL {
            let samples = render_effect(effect, SAMPLE_RATE);
            assert!(
                samples.iter().any(|&s| s.abs() > 0.001),
                "{effect} rendered silence"
            );
        }
    }

    #[test]
    fn render_is_deterministic() {
        let a = render_effect(SoundEffect::Transporter, SAMPLE_RATE);
        let b = render_effect(SoundEffect::Transporter, SAMPLE_RATE);
        assert_eq!(a, b);
    }

    #[test]
    fn wav_export_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("beep.wav");
        let samples = render_effect(SoundEffect::Beep, SAMPLE_RATE);
        write_wav(&path, &samples, SAMPLE_RATE).unwrap();

        let mut reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, SAMPLE_RATE);
        let read: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(read.len(), samples.len());
        assert!(read.iter().any(|&s| s != 0));
    }
}
