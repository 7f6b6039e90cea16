//! Build driver errors.

/// Failures starting or completing an external build.
///
/// A build that runs but exits non-zero is not an error: its stderr is
/// still returned in [`super::BuildOutput`].
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("'{program}' not found in PATH")]
    NotAvailable { program: String },

    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Build command is empty")]
    EmptyCommand,

    #[error("Build interrupted; captured output is incomplete")]
    Interrupted,

    #[error("Failed to install interrupt handler: {0}")]
    Signal(#[from] ctrlc::Error),
}
