//! Domain layer - decoding errors

pub mod error;

pub use error::DecodeError;
