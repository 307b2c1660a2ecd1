//! cpal output: device selection, format negotiation and the audio callback.
//!
//! The preferred stream is mono `f32` at 48 kHz with fixed 800-frame buffers.
//! Devices that cannot do that get the nearest supported channel count and
//! rate; the block size is rescaled so the buffer cadence stays the same, and
//! the [`Synth`] is only built once the real geometry is known.
//!
//! Muting pauses the stream, so the synth simply stops being invoked and
//! resumes phase-continuously.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use theremin_core::config::{DEFAULT_BUFFER_FRAMES, DEFAULT_SAMPLE_RATE};
use theremin_core::{Patch, Synth, SynthConfig};

use crate::control::{channel, Controller, DEFAULT_CONTROL_CAPACITY};
use crate::engine::Engine;
use crate::error::PlayerError;

/// What the caller would like from the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamRequest {
    /// `None` picks the host's default output device.
    pub device_name: Option<String>,
    pub sample_rate_hz: u32,
    pub channels: u16,
    pub buffer_frames: u32,
    pub control_capacity: usize,
}

impl Default for StreamRequest {
    fn default() -> Self {
        Self {
            device_name: None,
            sample_rate_hz: DEFAULT_SAMPLE_RATE,
            channels: 1,
            buffer_frames: DEFAULT_BUFFER_FRAMES,
            control_capacity: DEFAULT_CONTROL_CAPACITY,
        }
    }
}

/// What the device actually agreed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Negotiated {
    pub sample_rate_hz: u32,
    pub channels: u16,
    /// Synth block size (rescaled if the rate was substituted).
    pub buffer_frames: u32,
    /// Whether the device accepted a fixed callback size.
    pub fixed_buffer: bool,
    pub sample_format: cpal::SampleFormat,
}

/// A running output stream. Dropping it closes the device.
pub struct Player {
    stream: cpal::Stream,
    device_name: String,
    negotiated: Negotiated,
    muted: bool,
}

impl Player {
    /// Open the device, negotiate the format, build the synth and start playing.
    pub fn open(request: &StreamRequest, patch: Patch) -> Result<(Self, Controller), PlayerError> {
        let device = pick_device(request.device_name.as_deref())?;
        let device_name = device.name()?;

        let supported = choose_config(&device, request.sample_rate_hz, request.channels)?;
        let sample_format = supported.sample_format();
        let mut cfg = supported.config();

        let buffer_frames = rescale_frames(request.buffer_frames, request.sample_rate_hz, cfg.sample_rate.0);
        let fixed_buffer = match supported.buffer_size() {
            cpal::SupportedBufferSize::Range { min, max } => (*min..=*max).contains(&buffer_frames),
            cpal::SupportedBufferSize::Unknown => false,
        };
        if fixed_buffer {
            cfg.buffer_size = cpal::BufferSize::Fixed(buffer_frames);
        }

        if cfg.sample_rate.0 != request.sample_rate_hz || cfg.channels != request.channels {
            tracing::warn!(
                requested_rate = request.sample_rate_hz,
                requested_channels = request.channels,
                rate = cfg.sample_rate.0,
                channels = cfg.channels,
                "device substituted stream format"
            );
        }
        if !fixed_buffer {
            tracing::warn!(buffer_frames, "device rejected fixed buffer size, using its default");
        }

        let synth = Synth::new(SynthConfig::new(cfg.sample_rate.0, buffer_frames)?, patch)?;
        let (controller, inbox) = channel(request.control_capacity);
        let engine = Engine::new(synth, inbox);

        let stream = match sample_format {
            cpal::SampleFormat::F32 => build_stream::<f32>(&device, &cfg, engine)?,
            cpal::SampleFormat::F64 => build_stream::<f64>(&device, &cfg, engine)?,
            cpal::SampleFormat::I16 => build_stream::<i16>(&device, &cfg, engine)?,
            cpal::SampleFormat::I32 => build_stream::<i32>(&device, &cfg, engine)?,
            cpal::SampleFormat::U16 => build_stream::<u16>(&device, &cfg, engine)?,
            cpal::SampleFormat::U8 => build_stream::<u8>(&device, &cfg, engine)?,
            other => return Err(PlayerError::UnsupportedFormat(other)),
        };
        stream.play()?;

        let negotiated = Negotiated {
            sample_rate_hz: cfg.sample_rate.0,
            channels: cfg.channels,
            buffer_frames,
            fixed_buffer,
            sample_format,
        };
        tracing::info!(device = %device_name, ?negotiated, "output stream started");

        Ok((Self { stream, device_name, negotiated, muted: false }, controller))
    }

    #[inline] pub fn negotiated(&self) -> Negotiated { self.negotiated }
    #[inline] pub fn device_name(&self) -> &str { &self.device_name }
    #[inline] pub fn is_muted(&self) -> bool { self.muted }

    /// Mute by pausing the stream; unmute by resuming it.
    pub fn set_muted(&mut self, muted: bool) -> Result<(), PlayerError> {
        if muted == self.muted {
            return Ok(());
        }
        if muted {
            self.stream.pause()?;
        } else {
            self.stream.play()?;
        }
        self.muted = muted;
        tracing::info!(muted, "mute changed");
        Ok(())
    }

    /// Flip the mute state and return the new one.
    pub fn toggle_mute(&mut self) -> Result<bool, PlayerError> {
        self.set_muted(!self.muted)?;
        Ok(self.muted)
    }
}

impl core::fmt::Debug for Player {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Player")
            .field("device", &self.device_name)
            .field("negotiated", &self.negotiated)
            .field("muted", &self.muted)
            .finish_non_exhaustive()
    }
}

/// Names of every output device on the default host.
pub fn list_output_devices() -> Result<Vec<String>, PlayerError> {
    let host = cpal::default_host();
    let mut names = Vec::new();
    for dev in host.output_devices()? {
        names.push(dev.name()?);
    }
    Ok(names)
}

fn pick_device(name: Option<&str>) -> Result<cpal::Device, PlayerError> {
    let host = cpal::default_host();
    if let Some(name) = name {
        for d in host.output_devices()? {
            if d.name()? == name {
                return Ok(d);
            }
        }
        return Err(PlayerError::DeviceNotFound(name.to_string()));
    }
    host.default_output_device().ok_or(PlayerError::NoDefaultDevice)
}

/// Pick the supported range closest to the request, preferring `f32`, and pin
/// a concrete sample rate inside it. Ranges in formats we cannot stream are skipped.
fn choose_config(
    device: &cpal::Device,
    req_sr: u32,
    req_ch: u16,
) -> Result<cpal::SupportedStreamConfig, PlayerError> {
    let mut best: Option<(u64, cpal::SupportedStreamConfigRange)> = None;
    for range in device.supported_output_configs()? {
        let Some(score) = config_score(
            range.channels(),
            range.min_sample_rate().0,
            range.max_sample_rate().0,
            range.sample_format(),
            req_sr,
            req_ch,
        ) else {
            tracing::debug!(format = ?range.sample_format(), "skipping unsupported sample format");
            continue;
        };
        if best.as_ref().map_or(true, |(s, _)| score < *s) {
            best = Some((score, range));
        }
    }

    let Some((_, range)) = best else {
        // Some backends list nothing but still have a usable default.
        return device.default_output_config().map_err(PlayerError::from);
    };
    let rate = req_sr.clamp(range.min_sample_rate().0, range.max_sample_rate().0);
    Ok(range.with_sample_rate(cpal::SampleRate(rate)))
}

/// Penalty for a device sample format, `None` if `build_stream` cannot drive it.
fn format_penalty(format: cpal::SampleFormat) -> Option<u64> {
    match format {
        cpal::SampleFormat::F32 => Some(0),
        cpal::SampleFormat::F64 | cpal::SampleFormat::I32 => Some(1),
        cpal::SampleFormat::I16 | cpal::SampleFormat::U16 => Some(2),
        cpal::SampleFormat::U8 => Some(3),
        _ => None,
    }
}

/// Lower is better: rate distance dominates, then channel distance, then format.
fn config_score(
    ch: u16,
    sr_min: u32,
    sr_max: u32,
    format: cpal::SampleFormat,
    req_sr: u32,
    req_ch: u16,
) -> Option<u64> {
    let fmt_pen = format_penalty(format)?;
    let sr_pen = if (sr_min..=sr_max).contains(&req_sr) {
        0
    } else {
        u64::from(sr_min.abs_diff(req_sr).min(sr_max.abs_diff(req_sr)))
    };
    let ch_pen = u64::from(ch.abs_diff(req_ch));
    Some(sr_pen.saturating_mul(1000) + ch_pen * 10 + fmt_pen)
}

/// Keep the buffer cadence when the device substitutes the sample rate.
fn rescale_frames(frames: u32, requested_sr: u32, actual_sr: u32) -> u32 {
    if requested_sr == 0 || requested_sr == actual_sr {
        return frames.max(1);
    }
    let scaled = (u64::from(frames) * u64::from(actual_sr) + u64::from(requested_sr) / 2) / u64::from(requested_sr);
    u32::try_from(scaled).unwrap_or(u32::MAX).max(1)
}

fn build_stream<T>(
    device: &cpal::Device,
    cfg: &cpal::StreamConfig,
    mut engine: Engine,
) -> Result<cpal::Stream, PlayerError>
where
    T: cpal::Sample + cpal::FromSample<f32> + cpal::SizedSample + Send + 'static,
{
    let channels = usize::from(cfg.channels).max(1);

    let stream = device.build_output_stream(
        cfg,
        move |output: &mut [T], _: &cpal::OutputCallbackInfo| {
            // no allocation, locking or logging in here
            for frame in output.chunks_mut(channels) {
                let v: T = T::from_sample(engine.next_sample());
                for ch in frame.iter_mut() {
                    *ch = v;
                }
            }
        },
        |err| tracing::error!("stream error: {err}"),
        None,
    )?;

    Ok(stream)
}
