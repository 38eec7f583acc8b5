//! # reqline - Command-Line HTTP Client
//!
//! Sends one HTTP request per invocation, or many from an interactive
//! prompt, and prints the URL, status, headers and body of each response.
//!
//! ## Flow
//!
//! ```text
//! ┌──────────────┐   ┌────────────┐   ┌─────────────┐   ┌───────────────────┐
//! │  cmd_args    │──▶│ key_value  │──▶│ HttpService │──▶│ ResponseFormatter │
//! │ (or repl     │   │ k=v,k=v    │   │  reqwest    │   │ stdout + files    │
//! │  prompts)    │   └────────────┘   └─────────────┘   └───────────────────┘
//! └──────────────┘
//! ```
//!
//! Long bodies (over 100 characters once formatted) are written to
//! `response_<uuid>.txt` and only their first 100 characters are printed.

pub mod cmd;
pub mod cmd_args;
pub mod config;
pub mod format;
pub mod http;
pub mod key_value;
pub mod repl;

pub use cmd_args::CommandLineArgs;
pub use format::ResponseFormatter;
pub use http::{DispatchError, HttpService, Method, RequestSpec, ResponseView};
pub use key_value::KeyValues;
pub use repl::InteractiveSession;
