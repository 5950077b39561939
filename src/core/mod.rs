//! Core building blocks: configuration, errors, and the shared result model.

pub mod config;
pub mod error;
pub mod models;
