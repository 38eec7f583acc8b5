//! Configuration constants and utilities for reqline
//!
//! Everything reqline reads from the environment lives here so the rest of
//! the crate can take plain values.

use std::path::PathBuf;

/// Environment variable naming the directory oversized bodies are saved to
pub const OUTPUT_DIR_ENV_VAR: &str = "REQLINE_OUTPUT_DIR";

/// Environment variable holding a tracing filter directive
pub const LOG_FILTER_ENV_VAR: &str = "REQLINE_LOG";

/// Filter used when `REQLINE_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "reqline=warn";

/// Filter used when `REQLINE_LOG` is unset and `--verbose` was given
pub const VERBOSE_LOG_FILTER: &str = "reqline=debug";

/// Get the output directory, checking the environment variable first.
///
/// An empty path means the current directory; joining a file name onto it
/// yields the bare file name, which is what gets shown to the user.
pub fn get_output_dir() -> PathBuf {
    std::env::var_os(OUTPUT_DIR_ENV_VAR)
        .filter(|val| !val.is_empty())
        .map(PathBuf::from)
        .unwrap_or_default()
}

/// Get the tracing filter directive, falling back on the verbosity default
pub fn get_log_filter(verbose: bool) -> String {
    std::env::var(LOG_FILTER_ENV_VAR).unwrap_or_else(|_| {
        if verbose {
            VERBOSE_LOG_FILTER.to_string()
        } else {
            DEFAULT_LOG_FILTER.to_string()
        }
    })
}

/// Runtime settings gathered once at startup
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Where `response_<token>.txt` files are written
    pub output_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            output_dir: get_output_dir(),
        }
    }
}
