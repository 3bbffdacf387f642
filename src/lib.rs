//! TeamMatch Client Session Core
//!
//! This crate maintains the authenticated user's identity, bearer token, and
//! profile-completion state for the TeamMatch web client, and gates
//! navigation between pages based on that state.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
