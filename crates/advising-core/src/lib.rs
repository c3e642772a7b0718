//! Core types and services for the advising-session booking system.
//!
//! This crate is free of HTTP and storage dependencies. Storage backends
//! implement [`store::AdvisingStore`]; the [`auth::Authority`] and
//! [`booking::BookingEngine`] services hold all of the rules on top of it.

pub mod auth;
pub mod booking;
pub mod clock;
pub mod error;
pub mod identity;
pub mod session;
pub mod store;
pub mod token;
pub mod window;

pub use error::{Error, Result};
