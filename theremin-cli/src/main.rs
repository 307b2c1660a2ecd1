//! Theremin CLI: real-time player and offline renderer.
//!
//! # Usage
//!
//! ```bash
//! theremin                                   # FM tone on the default device
//! theremin --waveform swept --duration 10    # rising sweep for 10 s
//! theremin --waveform plain --render a.wav   # 5 s to a WAV file, no device
//! theremin --interactive                     # stdin console (m, +N, -N, c HZ, q)
//! ```

mod console;

use std::path::{Path, PathBuf};
use std::sync::mpsc::RecvTimeoutError;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use theremin_engine::render::render_to_wav;
use theremin_engine::theremin_core::config::{DEFAULT_BUFFER_FRAMES, DEFAULT_SAMPLE_RATE};
use theremin_engine::theremin_core::synth::{
    DEFAULT_CARRIER_HZ, DEFAULT_DECAY_SECS, DEFAULT_MAX_DEPTH, DEFAULT_MODULATOR_HZ,
};
use theremin_engine::theremin_core::{FmParams, Patch, SweepCeiling, SweepParams, Synth, SynthConfig};
use theremin_engine::{
    channel, list_output_devices, ControlError, Controller, Engine, Player, StreamRequest, Telemetry,
};

use crate::console::Action;

/// Seconds rendered by `--render` when no `--duration` is given.
const DEFAULT_RENDER_SECS: f64 = 5.0;

/// How often the telemetry line is logged.
const REPORT_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum WaveformArg {
    /// Fixed-pitch sine
    Plain,
    /// Sine whose pitch rises every buffer
    Swept,
    /// Frequency-modulated sine with a pulsing depth envelope
    Fm,
}

#[derive(Parser, Debug)]
#[command(name = "theremin")]
#[command(author, version, about = "Theremin - phase-continuous sine/FM synth player")]
struct Args {
    /// List output devices and exit
    #[arg(long)]
    list_devices: bool,

    /// Output device name (default: host default)
    #[arg(long)]
    device: Option<String>,

    /// Synthesis policy
    #[arg(long, value_enum, default_value_t = WaveformArg::Fm)]
    waveform: WaveformArg,

    /// Carrier pitch in Hz
    #[arg(long, default_value_t = DEFAULT_CARRIER_HZ)]
    carrier: u32,

    /// Modulator pitch in Hz (fm)
    #[arg(long, default_value_t = DEFAULT_MODULATOR_HZ)]
    modulator: u32,

    /// Maximum modulation depth (fm)
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    depth: f64,

    /// Seconds for the depth to decay to zero before it resets (fm)
    #[arg(long, default_value_t = DEFAULT_DECAY_SECS)]
    decay: f64,

    /// Hz added to the carrier every buffer (swept)
    #[arg(long, default_value_t = 1)]
    sweep_step: u32,

    /// Stop the sweep at this pitch (default: Nyquist)
    #[arg(long, conflicts_with = "unbounded_sweep")]
    sweep_ceiling: Option<u32>,

    /// Let the sweep climb without a ceiling
    #[arg(long)]
    unbounded_sweep: bool,

    /// Requested sample rate
    #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
    sample_rate: u32,

    /// Requested buffer size in frames
    #[arg(long, default_value_t = DEFAULT_BUFFER_FRAMES)]
    buffer_frames: u32,

    /// Requested output channels (mono is duplicated)
    #[arg(long, default_value_t = 1)]
    channels: u16,

    /// Output gain, 0..1
    #[arg(long, default_value_t = 1.0)]
    gain: f32,

    /// Stop after this many seconds
    #[arg(long)]
    duration: Option<f64>,

    /// Render to this WAV file instead of playing
    #[arg(long)]
    render: Option<PathBuf>,

    /// Read control commands from stdin
    #[arg(long)]
    interactive: bool,
}

impl Args {
    fn patch(&self) -> Patch {
        match self.waveform {
            WaveformArg::Plain => Patch::plain(self.carrier),
            WaveformArg::Swept => {
                // Nyquist is resolved against the rate the device grants
                let ceiling = match (self.unbounded_sweep, self.sweep_ceiling) {
                    (true, _) => SweepCeiling::Unbounded,
                    (false, Some(hz)) => SweepCeiling::Hz(hz),
                    (false, None) => SweepCeiling::Nyquist,
                };
                Patch::swept(self.carrier, SweepParams { step_hz: self.sweep_step, ceiling })
            }
            WaveformArg::Fm => Patch::fm(
                self.carrier,
                FmParams { modulator_hz: self.modulator, max_depth: self.depth, decay_secs: self.decay },
            ),
        }
    }

    fn stream_request(&self) -> StreamRequest {
        StreamRequest {
            device_name: self.device.clone(),
            sample_rate_hz: self.sample_rate,
            channels: self.channels,
            buffer_frames: self.buffer_frames,
            ..StreamRequest::default()
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    if args.list_devices {
        println!("Available output devices:");
        for name in list_output_devices().context("listing output devices")? {
            println!("- {name}");
        }
        return Ok(());
    }

    match &args.render {
        Some(path) => render(&args, path),
        None => play(&args),
    }
}

fn render(args: &Args, path: &Path) -> Result<()> {
    let config = SynthConfig::new(args.sample_rate, args.buffer_frames).context("invalid stream geometry")?;
    let synth = Synth::new(config, args.patch()).context("invalid patch")?;
    let (mut controller, inbox) = channel(1);
    controller.set_gain(args.gain)?;
    let mut engine = Engine::new(synth, inbox);

    let seconds = args.duration.unwrap_or(DEFAULT_RENDER_SECS);
    let frames = render_to_wav(&mut engine, path, seconds, args.channels)
        .with_context(|| format!("rendering to {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        frames,
        blocks = engine.blocks_rendered(),
        "render finished"
    );
    report(&controller.telemetry());
    Ok(())
}

fn play(args: &Args) -> Result<()> {
    let (mut player, mut controller) =
        Player::open(&args.stream_request(), args.patch()).context("opening output stream")?;
    controller.set_gain(args.gain)?;

    let negotiated = player.negotiated();
    tracing::info!(
        device = player.device_name(),
        waveform = ?args.waveform,
        rate = negotiated.sample_rate_hz,
        channels = negotiated.channels,
        buffer_frames = negotiated.buffer_frames,
        "playing; Ctrl+C to stop"
    );

    let telemetry = controller.telemetry();
    let lines = args.interactive.then(console::spawn_stdin_reader);
    let deadline = args
        .duration
        .and_then(|d| Duration::try_from_secs_f64(d.max(0.0)).ok())
        .and_then(|d| Instant::now().checked_add(d));
    let mut last_report = Instant::now();

    loop {
        if deadline.is_some_and(|d| Instant::now() >= d) {
            break;
        }

        if let Some(rx) = &lines {
            match rx.recv_timeout(Duration::from_millis(50)) {
                Ok(line) => match console::parse_line(&line) {
                    Some(Action::Quit) => break,
                    Some(action) => handle(action, &mut player, &mut controller, &telemetry)?,
                    None => tracing::warn!(%line, "unrecognised command"),
                },
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    // stdin closed: stop now unless a duration keeps us running
                    if deadline.is_none() {
                        break;
                    }
                    std::thread::sleep(Duration::from_millis(50));
                }
            }
        } else {
            std::thread::sleep(Duration::from_millis(50));
        }

        if last_report.elapsed() >= REPORT_INTERVAL {
            if !player.is_muted() {
                report(&telemetry);
            }
            last_report = Instant::now();
        }
    }

    tracing::info!("stopping");
    Ok(())
}

fn handle(action: Action, player: &mut Player, controller: &mut Controller, telemetry: &Telemetry) -> Result<()> {
    let sent = match action {
        Action::ToggleMute => {
            let muted = player.toggle_mute().context("toggling mute")?;
            println!("{}", if muted { "muted" } else { "unmuted" });
            Ok(())
        }
        Action::Nudge(delta) => controller.nudge_carrier_hz(delta),
        Action::SetCarrier(hz) => controller.set_carrier_hz(hz),
        Action::SetModulator(hz) => controller.set_modulator_hz(hz),
        Action::Gain(g) => controller.set_gain(g),
        Action::Status => {
            report(telemetry);
            Ok(())
        }
        Action::Quit => Ok(()),
    };
    if let Err(ControlError::QueueFull(cmd)) = sent {
        tracing::warn!(?cmd, "control queue full, try again");
    }
    Ok(())
}

fn report(telemetry: &Telemetry) {
    let t = telemetry.snapshot();
    tracing::info!(
        carrier_hz = t.carrier_hz,
        modulator_hz = t.modulator_hz,
        depth = format_args!("{:.3}", t.modulator_amplitude),
        peak = format_args!("{:.3}", t.peak),
        gain = t.gain,
        blocks = t.blocks_rendered,
        "synth"
    );
}
