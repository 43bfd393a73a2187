//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "synthviz")]
#[command(about = "Music-driven spectrum visualizer core", long_about = None)]
pub struct Args {
    /// Show file (JSON) describing the song, tracks and responders
    #[arg(value_name = "SHOW")]
    pub show: PathBuf,

    /// Run without an audio device (simulated play head)
    #[arg(long)]
    pub headless: bool,

    /// Stop after this many seconds (default: until the song ends)
    #[arg(long, value_name = "SECONDS")]
    pub duration: Option<f32>,

    /// Tick rate (frames per second)
    #[arg(long, value_name = "N", default_value = "60")]
    pub fps: u32,

    /// Start position as a fraction of the song (overrides the show file)
    #[arg(long, value_name = "PERCENT")]
    pub start_percent: Option<f32>,

    /// Fade-in time when playback starts (seconds)
    #[arg(long, value_name = "SECONDS", default_value = "0")]
    pub fade_in: f32,

    /// Seconds between spectrum reports
    #[arg(long, value_name = "SECONDS", default_value = "1")]
    pub report_interval: f32,
}

impl Args {
    /// Frame duration in seconds
    pub fn frame_s(&self) -> f32 {
        1.0 / self.fps.max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["synthviz", "show.json"]);
        assert_eq!(args.show, PathBuf::from("show.json"));
        assert!(!args.headless);
        assert_eq!(args.fps, 60);
        assert_eq!(args.report_interval, 1.0);
        assert!(args.start_percent.is_none());
    }

    #[test]
    fn test_flags() {
        let args = Args::parse_from([
            "synthviz",
            "show.json",
            "--headless",
            "--duration",
            "12.5",
            "--fps",
            "30",
            "--start-percent",
            "0.5",
        ]);
        assert!(args.headless);
        assert_eq!(args.duration, Some(12.5));
        assert_eq!(args.start_percent, Some(0.5));
        assert_eq!(args.frame_s(), 1.0 / 30.0);
    }
}
