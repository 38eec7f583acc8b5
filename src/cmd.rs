//! # Command Execution
//!
//! Turns parsed command-line arguments into either one request or an
//! interactive session, and holds the request/format step both share.

use crate::cmd_args::{CommandLineArgs, Mode};
use crate::config::AppConfig;
use crate::format::ResponseFormatter;
use crate::http::{DispatchError, HttpService, Method, RequestSpec};
use crate::key_value;
use crate::repl::{self, InteractiveSession};
use anyhow::Result;
use std::error::Error as _;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

pub const MISSING_MODE: &str =
    "Error: You must either use --interactive mode or provide method and URL.";

/// Unparsed key-value arguments for one request
#[derive(Debug, Clone, Default)]
pub struct RawFields {
    pub headers: Option<String>,
    pub params: Option<String>,
    pub data: Option<String>,
    pub json: Option<String>,
}

impl From<&CommandLineArgs> for RawFields {
    fn from(args: &CommandLineArgs) -> Self {
        Self {
            headers: args.headers().map(str::to_string),
            params: args.params().map(str::to_string),
            data: args.data().map(str::to_string),
            json: args.json().map(str::to_string),
        }
    }
}

/// Fill the key-value fields of `spec`, reporting malformed ones to `out`
pub fn parse_fields<W: Write>(
    spec: &mut RequestSpec,
    raw: &RawFields,
    out: &mut W,
) -> io::Result<()> {
    spec.query_params = key_value::parse_or_empty(raw.params.as_deref(), out)?;
    spec.headers = key_value::parse_or_empty(raw.headers.as_deref(), out)?;
    spec.form_data = key_value::parse_or_empty(raw.data.as_deref(), out)?;
    spec.json_body = key_value::parse_or_empty(raw.json.as_deref(), out)?;
    Ok(())
}

/// Send the request and print the response.
///
/// A failed request is reported to `out` and handed back as the inner
/// error; the outer one is for failures writing the output itself.
pub fn execute<W: Write>(
    service: &HttpService,
    formatter: &ResponseFormatter,
    spec: &RequestSpec,
    out: &mut W,
) -> io::Result<Result<(), DispatchError>> {
    match service.send(spec) {
        Ok(response) => {
            formatter.format(&response, out)?;
            Ok(Ok(()))
        }
        Err(e) => {
            report_error(&e, out)?;
            Ok(Err(e))
        }
    }
}

fn report_error<W: Write>(err: &DispatchError, out: &mut W) -> io::Result<()> {
    writeln!(out, "Error: {err}")?;
    let mut source = err.source();
    while let Some(cause) = source {
        writeln!(out, "  Caused by: {cause}")?;
        source = cause.source();
    }
    out.flush()
}

/// Send a single request built from command-line arguments.
///
/// Exits with failure when the request could not be completed.
pub fn run_single<W: Write>(
    service: &HttpService,
    formatter: &ResponseFormatter,
    method: Method,
    url: &str,
    raw: &RawFields,
    out: &mut W,
) -> io::Result<ExitCode> {
    let mut spec = RequestSpec::new(method, url);
    parse_fields(&mut spec, raw, out)?;
    match execute(service, formatter, &spec, out)? {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(_) => Ok(ExitCode::FAILURE),
    }
}

/// Run with explicit I/O streams
pub fn run_with_io<R: BufRead, W: Write>(
    args: &CommandLineArgs,
    config: &AppConfig,
    input: R,
    mut output: W,
) -> Result<ExitCode> {
    let mode = args.mode();
    if mode == Mode::Missing {
        writeln!(output, "{MISSING_MODE}")?;
        writeln!(output, "{}", CommandLineArgs::help_text())?;
        return Ok(ExitCode::FAILURE);
    }

    let service = HttpService::new()?;
    let formatter = ResponseFormatter::new(&config.output_dir);

    match mode {
        Mode::Interactive => {
            InteractiveSession::new(input, output, &service, &formatter).run()?;
            Ok(ExitCode::SUCCESS)
        }
        Mode::Single { method, url } => Ok(run_single(
            &service,
            &formatter,
            method,
            url,
            &RawFields::from(args),
            &mut output,
        )?),
        Mode::Missing => Ok(ExitCode::FAILURE),
    }
}

/// Run against the process's stdin and stdout
pub fn run(args: &CommandLineArgs) -> Result<ExitCode> {
    let config = AppConfig::from_env();
    if args.mode() == Mode::Interactive {
        repl::install_interrupt_handler()?;
    }
    // stdout stays unlocked so the interrupt watcher can still print
    let stdin = io::stdin();
    run_with_io(args, &config, stdin.lock(), io::stdout())
}
