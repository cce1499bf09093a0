//! Core application modules
//!
//! This module contains configuration, logging, and the upstream client.

pub mod client;
pub mod config;
pub mod logging;
