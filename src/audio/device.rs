//! Audio output through the default cpal device.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::{Arc, Mutex};

use super::{AudioAsset, AudioTransport, TransportEvent};
use crate::error::TransportError;

/// Play head shared between the audio callback and the controller thread
#[derive(Default)]
struct PlayHead {
    asset: Option<Arc<AudioAsset>>,
    /// Position in asset samples (fractional, assets are resampled on the fly)
    position: f64,
    /// Position at the last `play` call
    origin: f64,
    paused: bool,
    fade_in_samples: f64,
    finished: bool,
}

impl PlayHead {
    /// Next output sample, advancing by `step` asset samples
    fn next_sample(&mut self, step: f64) -> f32 {
        if self.paused || self.finished {
            return 0.0;
        }
        let Some(asset) = self.asset.as_ref() else {
            return 0.0;
        };

        let index = self.position as usize;
        let Some(&sample) = asset.samples().get(index) else {
            self.finished = true;
            return 0.0;
        };

        let played = self.position - self.origin;
        let gain = if self.fade_in_samples > 0.0 {
            (played / self.fade_in_samples).min(1.0) as f32
        } else {
            1.0
        };

        self.position += step;
        // Safety limiter: hard clip to ±1.0
        (sample * gain).clamp(-1.0, 1.0)
    }
}

/// Transport streaming the master asset to the default output device
pub struct CpalTransport {
    head: Arc<Mutex<PlayHead>>,

    /// Audio output stream (kept alive)
    _stream: cpal::Stream,
}

impl CpalTransport {
    /// Open the default output device and start an (initially silent) stream
    pub fn new() -> Result<Self, TransportError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(TransportError::NoDevice)?;

        let config = device
            .default_output_config()
            .map_err(|e| TransportError::Config(e.to_string()))?;

        let device_rate = config.sample_rate().0;
        let channels = usize::from(config.channels().max(1));
        log::info!(
            "Audio: {} @ {}Hz",
            device.name().unwrap_or_else(|_| "Unknown".to_string()),
            device_rate
        );

        let head = Arc::new(Mutex::new(PlayHead::default()));
        let head_clone = Arc::clone(&head);

        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    let Ok(mut head) = head_clone.lock() else {
                        data.fill(0.0);
                        return;
                    };
                    let step = head
                        .asset
                        .as_ref()
                        .map(|a| f64::from(a.sample_rate()) / f64::from(device_rate))
                        .unwrap_or(1.0);

                    for frame in data.chunks_mut(channels) {
                        let sample = head.next_sample(step);
                        frame.fill(sample);
                    }
                },
                |err| log::error!("Audio stream error: {}", err),
                None,
            )
            .map_err(|e| TransportError::StreamBuild(e.to_string()))?;

        stream
            .play()
            .map_err(|e| TransportError::StreamPlay(e.to_string()))?;

        Ok(Self {
            head,
            _stream: stream,
        })
    }

    fn with_head(&self, f: impl FnOnce(&mut PlayHead)) {
        match self.head.lock() {
            Ok(mut head) => f(&mut head),
            Err(_) => log::error!("Audio play head poisoned, command ignored"),
        }
    }
}

impl AudioTransport for CpalTransport {
    fn play(&mut self, asset: &Arc<AudioAsset>, start_s: f32, fade_in_s: f32) {
        let rate = f64::from(asset.sample_rate());
        self.with_head(|head| {
            let start = f64::from(start_s.max(0.0)) * rate;
            *head = PlayHead {
                asset: Some(Arc::clone(asset)),
                position: start,
                origin: start,
                paused: false,
                fade_in_samples: f64::from(fade_in_s.max(0.0)) * rate,
                finished: false,
            };
        });
    }

    fn pause(&mut self) {
        self.with_head(|head| head.paused = true);
    }

    fn resume(&mut self) {
        self.with_head(|head| head.paused = false);
    }

    fn stop(&mut self) {
        self.with_head(|head| *head = PlayHead::default());
    }

    fn poll_events(&mut self, _elapsed_s: f32) -> Vec<TransportEvent> {
        let mut events = Vec::new();
        self.with_head(|head| {
            let Some(asset) = head.asset.clone() else {
                return;
            };
            if head.paused {
                return;
            }

            let total = asset.samples().len() as f64;
            if total > 0.0 {
                let played = (head.position.min(total) - head.origin).max(0.0);
                events.push(TransportEvent::PlaybackPercent((played / total) as f32));
            }

            if head.finished {
                events.push(TransportEvent::Finished);
                head.asset = None;
            }
        });
        events
    }
}
