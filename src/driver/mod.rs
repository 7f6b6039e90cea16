//! Build driver: runs the instrumented build and captures its stderr.
//!
//! The driver is the only part of diagsift that spawns processes. Everything
//! downstream works on the captured [`BuildOutput`] once the build has fully
//! terminated.

mod error;
mod interrupt;
mod tool;
pub mod tools;

pub use error::DriverError;
pub use interrupt::Interrupt;
pub use tool::{BuildDriver, BuildOutput, BuildRequest};
pub use tools::{KernelBuild, SingleFileBuild};

/// Check whether `program` resolves on `PATH`.
pub fn command_exists(program: &str) -> bool {
    which::which(program).is_ok()
}
