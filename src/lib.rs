#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

pub mod config;
pub mod core;
pub mod demo;
pub mod ingest;
pub mod model;
pub mod prelude;
pub mod quantity;

pub use crate::core::analyzer::{Analyzer, analyze};
