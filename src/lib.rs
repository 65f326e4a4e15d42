//! Client library for the Android Emulator's gRPC control endpoint.
//!
//! A running emulator exposes an `EmulatorController` service on a
//! local gRPC port (8554 for an emulator on the default console port)
//! and advertises itself through a discovery file. This crate resolves
//! the endpoint ([`channel::resolve`]), opens an authenticated channel
//! ([`channel::connect`]), and drives the virtual keyboard:
//! [`keystrokes::type_text`] sends one `KeyboardEvent` per character
//! with a fixed pause between keys.

pub mod channel;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod keystrokes;
pub mod proto;
