//! Concrete build drivers.

mod kernel;
mod single_file;

pub use kernel::KernelBuild;
pub use single_file::SingleFileBuild;

/// Base compiler flags followed by the request's extra flags.
fn merged_flags(base: &[String], extra: &[String]) -> Vec<String> {
    base.iter().chain(extra).cloned().collect()
}
