//! Offline rendering: run the engine without a device and write a WAV file.

use std::path::Path;

use crate::engine::Engine;
use crate::error::RenderError;

/// Most 32-bit samples a WAV data chunk can hold.
pub const MAX_WAV_SAMPLES: usize = (u32::MAX / 4) as usize;

/// Render `frames` frames, interleaved over `channels` identical channels.
///
/// Fails before allocating if the result would not fit in a WAV file.
pub fn render_frames(engine: &mut Engine, frames: usize, channels: u16) -> Result<Vec<f32>, RenderError> {
    let channels = channels.max(1);
    let len = frames
        .checked_mul(usize::from(channels))
        .filter(|&n| n <= MAX_WAV_SAMPLES)
        .ok_or(RenderError::TooLong { frames, channels })?;
    let mut out = vec![0.0_f32; len];
    if channels == 1 {
        engine.render(&mut out);
    } else {
        engine.render_interleaved(&mut out, usize::from(channels));
    }
    Ok(out)
}

/// Write interleaved 32-bit float samples as a WAV file.
pub fn write_wav(
    path: impl AsRef<Path>,
    sample_rate: u32,
    channels: u16,
    samples: &[f32],
) -> Result<(), RenderError> {
    let spec = hound::WavSpec {
        channels: channels.max(1),
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(path.as_ref(), spec)?;
    for &s in samples {
        writer.write_sample(s)?;
    }
    writer.finalize()?;
    tracing::debug!(
        path = %path.as_ref().display(),
        frames = samples.len() / usize::from(channels.max(1)),
        channels,
        "wrote WAV"
    );
    Ok(())
}

/// Render `seconds` of audio from `engine` straight into a WAV file.
/// Returns the number of frames written.
pub fn render_to_wav(
    engine: &mut Engine,
    path: impl AsRef<Path>,
    seconds: f64,
    channels: u16,
) -> Result<usize, RenderError> {
    let sample_rate = engine.synth().config().sample_rate_hz();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let frames = (seconds.max(0.0) * f64::from(sample_rate)).round() as usize;
    let samples = render_frames(engine, frames, channels)?;
    write_wav(path, sample_rate, channels, &samples)?;
    Ok(frames)
}
