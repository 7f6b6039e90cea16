//! Standalone compilation of one source file.

use super::merged_flags;
use crate::config::BuildConfig;
use crate::driver::tool::{BuildDriver, BuildRequest};

/// Compiles a single `.c` file to `/dev/null` with the instrumentation
/// flags. Used for the detector's regression sources.
#[derive(Debug, Clone)]
pub struct SingleFileBuild {
    compiler: String,
    base_flags: Vec<String>,
}

impl SingleFileBuild {
    pub fn new(compiler: impl Into<String>, base_flags: Vec<String>) -> Self {
        Self {
            compiler: compiler.into(),
            base_flags,
        }
    }

    pub fn from_config(config: &BuildConfig) -> Self {
        Self::new(config.compiler.clone(), config.base_flags.clone())
    }
}

impl BuildDriver for SingleFileBuild {
    fn name(&self) -> &'static str {
        "single-file"
    }

    fn program(&self) -> &str {
        &self.compiler
    }

    fn command(&self, request: &BuildRequest) -> Vec<String> {
        let mut argv = vec![
            self.compiler.clone(),
            request.target.display().to_string(),
            "-o".to_string(),
            "/dev/null".to_string(),
        ];
        argv.extend(merged_flags(&self.base_flags, &request.compiler_flags));
        argv
    }
}
