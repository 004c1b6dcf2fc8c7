//! The two capture loops.
//!
//! Each loop is an independent, long-running task with the same shape:
//! while its own activity flag is set and shutdown has not been requested,
//! acquire one unit of sensor input, run it through the pure classifier or
//! interpreter, and push the result into the output sink. Flags are checked
//! only between units; every blocking acquisition carries its own timeout,
//! which bounds how long a stop request can go unobserved.

pub mod vision;
pub mod voice;

pub use vision::run_vision_loop;
pub use voice::{VoiceTiming, run_voice_loop};
