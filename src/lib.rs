#![doc(test(attr(deny(warnings))))]

//! Contact Book keeps named contact records with phone numbers and birthdays,
//! persists them as JSON, and reports whose birthday falls in the coming week.

pub mod book;
pub mod cli;
pub mod clock;
pub mod config;
pub mod core;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Contact Book tracing initialized.");
    });
}
