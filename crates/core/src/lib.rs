#![forbid(unsafe_code)]

pub mod content;
pub mod error;
pub mod model;

pub use error::Error;
