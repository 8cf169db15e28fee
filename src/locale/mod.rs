//! Locale-specific document checks.

pub mod pt_br;
