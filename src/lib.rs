//! Synthviz library - music spectrum core for audio-reactive visuals

pub mod audio;
pub mod cli;
pub mod error;
pub mod music;
pub mod params;
pub mod responder;
