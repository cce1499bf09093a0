//! API data models
//!
//! This module contains data structures for the inbound relay payload and
//! the Gemini generateContent wire format.

pub mod gemini;
pub mod relay;
