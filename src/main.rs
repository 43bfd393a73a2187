//! Synthviz - drive visual responders from the spectrum of a playing song
//!
//! Loads a show file, arms its tracks, plays the master track and ticks the
//! stage at a fixed frame rate, logging an ASCII view of every armed track's
//! normalized spectrum.

use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;

use synthviz::audio::{AudioTransport, CpalTransport, SimulatedTransport};
use synthviz::cli::Args;
use synthviz::music::{MusicController, Track};
use synthviz::params::ShowConfig;
use synthviz::responder::Stage;

/// Characters from silence to full scale
const LEVELS: &[u8] = b" .:-=+*#%@";

/// Columns in the spectrum report
const REPORT_COLUMNS: usize = 48;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut show = ShowConfig::load(&args.show)
        .with_context(|| format!("loading show {}", args.show.display()))?;
    if let Some(start_percent) = args.start_percent {
        show.controller.start_percent = start_percent;
    }
    show.controller.validate()?;
    let start_percent = show.controller.start_percent;
    // Playback is started below so the CLI fade-in applies
    show.controller.play_on_start = false;

    let mut stage = Stage::from_show(&show, open_transport(args.headless));
    stage.begin_play();
    if !stage.controller().is_armed() {
        bail!("master track failed to arm, nothing to play");
    }
    stage.controller_mut().play(start_percent, args.fade_in);

    run(&mut stage, &args);

    if stage.controller().is_playing() {
        stage.controller_mut().stop();
    }
    Ok(())
}

fn open_transport(headless: bool) -> Box<dyn AudioTransport> {
    if headless {
        log::info!("Headless mode: simulated transport");
        return Box::new(SimulatedTransport::new());
    }
    match CpalTransport::new() {
        Ok(transport) => Box::new(transport),
        Err(e) => {
            log::warn!("Audio device unavailable ({}), falling back to simulated transport", e);
            Box::new(SimulatedTransport::new())
        }
    }
}

/// Tick until the song ends or the requested duration has elapsed
fn run(stage: &mut Stage, args: &Args) {
    let frame = Duration::from_secs_f32(args.frame_s());
    let started = Instant::now();
    let mut last_frame = Instant::now();
    let mut since_report_s = f32::MAX;

    while stage.controller().is_playing() {
        std::thread::sleep(frame.saturating_sub(last_frame.elapsed()));
        let delta_s = last_frame.elapsed().as_secs_f32();
        last_frame = Instant::now();

        stage.tick(delta_s);

        since_report_s += delta_s;
        if since_report_s >= args.report_interval {
            since_report_s = 0.0;
            report(stage);
        }

        if let Some(limit) = args.duration {
            if started.elapsed().as_secs_f32() >= limit {
                log::info!("Duration limit reached ({}s)", limit);
                break;
            }
        }
    }
}

fn report(stage: &Stage) {
    let controller = stage.controller();
    log::info!(
        "[{}] {:5.1}%",
        controller.current_time_text(),
        controller.current_song_percent() * 100.0
    );
    for track in controller.song().tracks().filter(|t| t.is_armed()) {
        log::info!("  {}", spectrum_line(controller, track));
    }
    for responder in stage.responders().iter() {
        log::info!("  {}", responder.describe());
    }
}

/// `#rrggbb id |ascii spectrum|` for one track
fn spectrum_line(controller: &MusicController, track: &Track) -> String {
    let [r, g, b, _] = track.config().colour;
    let bars: String = (0..REPORT_COLUMNS)
        .map(|column| {
            let frequency = column as f32 / (REPORT_COLUMNS - 1) as f32;
            let signal = controller.evaluate_normalized_spectrum(frequency, track.id().as_str());
            let level = (signal * (LEVELS.len() - 1) as f32).round() as usize;
            LEVELS[level.min(LEVELS.len() - 1)] as char
        })
        .collect();
    format!("#{:02x}{:02x}{:02x} {:<12} |{}|", r, g, b, track.id().as_str(), bars)
}
