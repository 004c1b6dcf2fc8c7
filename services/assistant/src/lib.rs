//! Attend Assistant Library Crate
//!
//! This library contains the concurrent runtime of the accessibility
//! assistant: the shared session state, the serialized output sink, the
//! sensor collaborator traits with their scripted/simulated backends, the
//! two capture loops, and the session controller. The `assistant` binary is
//! a thin wrapper around this library.

pub mod capture;
pub mod config;
pub mod overlay;
pub mod sensor;
pub mod session;
pub mod sink;
pub mod state;
pub mod tts;
