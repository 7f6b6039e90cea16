//! Kernel tree build through make.

use super::merged_flags;
use crate::config::BuildConfig;
use crate::driver::tool::{BuildDriver, BuildRequest};

/// Builds a kernel tree with `make`, injecting the instrumentation flags
/// through `KCFLAGS` and forcing the configured compiler for both target
/// and host objects.
#[derive(Debug, Clone)]
pub struct KernelBuild {
    compiler: String,
    base_flags: Vec<String>,
}

impl KernelBuild {
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

impl BuildDriver for KernelBuild {
    fn name(&self) -> &'static str {
        "kernel"
    }

    fn program(&self) -> &str {
        "make"
    }

    fn command(&self, request: &BuildRequest) -> Vec<String> {
        let kcflags = merged_flags(&self.base_flags, &request.compiler_flags).join(" ");

        let mut argv = vec![
            self.program().to_string(),
            "-C".to_string(),
            request.target.display().to_string(),
            format!("-j{}", request.jobs),
            format!("KCFLAGS+={}", kcflags),
            "LLVM_IAS=0".to_string(),
            format!("CC={}", self.compiler),
            format!("HOSTCC={}", self.compiler),
        ];
        argv.extend(request.make_flags.iter().cloned());
        argv
    }
}
