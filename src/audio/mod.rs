//! Audio assets, spectrum analysis and playback transports.
//!
//! Everything the music controller treats as an external collaborator:
//! decoded assets, the spectrum analysis function and the output device.

mod asset;
mod device;
mod fft;
mod transport;

// Re-export public types
pub use asset::AudioAsset;
pub use device::CpalTransport;
pub use fft::{amplitude_to_db, hann_window, FftAnalyzer, SpectrumAnalyzer};
pub use transport::{AudioTransport, SimulatedTransport, TransportEvent};
