#[macro_use]
mod macros;

pub mod electric;
pub mod energy;
pub mod ratios;
pub mod thermal;
pub mod time;
