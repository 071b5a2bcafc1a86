#![deny(clippy::all)]

pub mod constants;
pub mod utils;
pub mod value;
