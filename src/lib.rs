//! passkeep: a local, single-user password organizer.
//!
//! Passwords live either inside named categories or in a flat unassigned list.
//! The crate validates and generates passwords against a strength policy and
//! exports categories to a line-oriented text file behind a reversible
//! obfuscation cipher. It does no console I/O; menus and prompts belong to the
//! caller.

pub mod managers;
pub mod platform;
pub mod services;
pub mod types;
