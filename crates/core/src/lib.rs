#![forbid(unsafe_code)]

pub mod error;
pub mod media;
pub mod model;
pub mod subtitles;
pub mod text;

pub use error::Error;
