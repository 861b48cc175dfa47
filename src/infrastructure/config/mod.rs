//! Infrastructure configuration modules.

pub mod logging;
pub mod reset;
pub mod settings;
