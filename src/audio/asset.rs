//! Decoded audio assets.

use std::path::Path;

use crate::error::AssetError;

/// Mono PCM audio held in memory
///
/// Tracks hold assets through `Arc` handles; the asset itself is owned by
/// whatever loaded it (usually [`crate::music::Song::load`]).
#[derive(Debug, Clone, PartialEq)]
pub struct AudioAsset {
    name: String,
    samples: Vec<f32>,
    sample_rate: u32,
}

impl AudioAsset {
    /// Wrap already-decoded mono samples
    pub fn from_samples(name: impl Into<String>, samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            name: name.into(),
            samples,
            sample_rate,
        }
    }

    /// Decode a WAV file (any bit depth) and mix it down to mono
    pub fn load_wav(path: &Path) -> Result<Self, AssetError> {
        let decode_err = |source| AssetError::Decode {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = hound::WavReader::open(path).map_err(decode_err)?;
        let spec = reader.spec();

        let interleaved: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .samples::<f32>()
                .collect::<Result<_, _>>()
                .map_err(decode_err)?,
            hound::SampleFormat::Int => {
                let scale = 1.0 / (1u64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 * scale))
                    .collect::<Result<_, _>>()
                    .map_err(decode_err)?
            }
        };

        let channels = usize::from(spec.channels.max(1));
        let samples: Vec<f32> = interleaved
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
            .collect();

        if samples.is_empty() || spec.sample_rate == 0 {
            return Err(AssetError::Empty(path.to_path_buf()));
        }

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        log::debug!(
            "Loaded {} ({} Hz, {} ch, {:.2}s)",
            name,
            spec.sample_rate,
            spec.channels,
            samples.len() as f32 / spec.sample_rate as f32
        );

        Ok(Self::from_samples(name, samples, spec.sample_rate))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Playable length in seconds (0 for an invalid asset)
    pub fn duration_s(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }

    /// An asset with no samples or no sample rate cannot be armed
    pub fn is_valid(&self) -> bool {
        self.sample_rate > 0 && !self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_wav(path: &Path, spec: hound::WavSpec, frames: &[[i16; 2]]) {
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for frame in frames {
            writer.write_sample(frame[0]).unwrap();
            writer.write_sample(frame[1]).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_load_stereo_int_wav_mixes_to_mono() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bass.wav");
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 1000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let frames = vec![[16384i16, 0i16]; 500];
        write_wav(&path, spec, &frames);

        let asset = AudioAsset::load_wav(&path).unwrap();
        assert_eq!(asset.name(), "bass");
        assert_eq!(asset.sample_rate(), 1000);
        assert_eq!(asset.samples().len(), 500);
        assert!((asset.duration_s() - 0.5).abs() < 1e-6);
        // 0.5 full scale on the left, silence on the right
        assert!((asset.samples()[0] - 0.25).abs() < 1e-4);
        assert!(asset.is_valid());
    }

    #[test]
    fn test_load_empty_wav_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.wav");
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 1000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        write_wav(&path, spec, &[]);

        assert!(matches!(
            AudioAsset::load_wav(&path),
            Err(AssetError::Empty(_))
        ));
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(matches!(
            AudioAsset::load_wav(Path::new("/no/such/track.wav")),
            Err(AssetError::Decode { .. })
        ));
    }

    #[test]
    fn test_invalid_assets() {
        assert!(!AudioAsset::from_samples("silent", Vec::new(), 44100).is_valid());
        let no_rate = AudioAsset::from_samples("broken", vec![0.0; 10], 0);
        assert!(!no_rate.is_valid());
        assert_eq!(no_rate.duration_s(), 0.0);
    }
}
