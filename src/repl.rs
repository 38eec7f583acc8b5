//! # Interactive Session
//!
//! A line-based prompt loop. Each round asks for the request fields one by
//! one, sends the request and prints the response. Typing `exit` at any
//! prompt, or closing the input, ends the session.
//!
//! Input and output are injected so the loop can be driven from tests with
//! in-memory buffers.

use crate::cmd::{execute, parse_fields, RawFields};
use crate::format::ResponseFormatter;
use crate::http::{HttpService, Method, RequestSpec};
use std::io::{self, BufRead, Write};

pub const BANNER: &str = "Entering interactive mode. Type 'exit' to quit.";
pub const FAREWELL: &str = "\nExiting interactive mode.";
pub const INVALID_METHOD: &str = "Invalid method.";

pub const METHOD_PROMPT: &str = "Method (GET, POST, PUT, DELETE, PATCH): ";
pub const URL_PROMPT: &str = "URL: ";
pub const PARAMS_PROMPT: &str = "Params (key1=value1,key2=value2, or leave empty): ";
pub const HEADERS_PROMPT: &str = "Headers (key1=value1,key2=value2, or leave empty): ";
pub const DATA_PROMPT: &str = "Data (key1=value1,key2=value2, or leave empty): ";
pub const JSON_PROMPT: &str = "JSON (key1=value1,key2=value2, or leave empty): ";

/// Outcome of a single prompt
#[derive(Debug, PartialEq, Eq)]
enum Reply {
    Line(String),
    Exit,
    EndOfInput,
}

/// How a session round ended
enum Round {
    Continue,
    Stop,
}

pub struct InteractiveSession<'a, R: BufRead, W: Write> {
    input: R,
    output: W,
    service: &'a HttpService,
    formatter: &'a ResponseFormatter,
    requests_sent: usize,
}

impl<'a, R: BufRead, W: Write> InteractiveSession<'a, R, W> {
    pub fn new(
        input: R,
        output: W,
        service: &'a HttpService,
        formatter: &'a ResponseFormatter,
    ) -> Self {
        Self {
            input,
            output,
            service,
            formatter,
            requests_sent: 0,
        }
    }

    /// Number of requests dispatched so far, failed ones included
    pub fn requests_sent(&self) -> usize {
        self.requests_sent
    }

    /// Consume the session, handing back its output
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run rounds until the user exits or input runs out
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "{BANNER}")?;
        while let Round::Continue = self.round()? {}
        self.output.flush()
    }

    fn round(&mut self) -> io::Result<Round> {
        let method = match self.prompt(METHOD_PROMPT)? {
            Reply::Line(line) => line,
            reply => return self.stop(reply),
        };
        let method: Method = match method.parse() {
            Ok(method) => method,
            Err(_) => {
                writeln!(self.output, "{INVALID_METHOD}")?;
                return Ok(Round::Continue);
            }
        };

        let mut raw = RawFields::default();
        let url = match self.prompt(URL_PROMPT)? {
            Reply::Line(line) => line,
            reply => return self.stop(reply),
        };
        for (prompt, field) in [
            (PARAMS_PROMPT, &mut raw.params),
            (HEADERS_PROMPT, &mut raw.headers),
            (DATA_PROMPT, &mut raw.data),
            (JSON_PROMPT, &mut raw.json),
        ] {
            match self.prompt(prompt)? {
                Reply::Line(line) => *field = Some(line),
                reply => return self.stop(reply),
            }
        }

        let mut spec = RequestSpec::new(method, url);
        parse_fields(&mut spec, &raw, &mut self.output)?;

        self.requests_sent += 1;
        // a failed request has already been reported; keep prompting
        if let Err(e) = execute(self.service, self.formatter, &spec, &mut self.output)? {
            tracing::debug!("continuing after failed request: {e}");
        }
        Ok(Round::Continue)
    }

    fn stop(&mut self, reply: Reply) -> io::Result<Round> {
        if reply == Reply::EndOfInput {
            writeln!(self.output, "{FAREWELL}")?;
        }
        Ok(Round::Stop)
    }

    fn prompt(&mut self, label: &str) -> io::Result<Reply> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(Reply::EndOfInput);
        }
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().eq_ignore_ascii_case("exit") {
            tracing::debug!("exit requested at prompt {label:?}");
            return Ok(Reply::Exit);
        }
        Ok(Reply::Line(line.to_string()))
    }
}

/// Print the farewell and leave the process when Ctrl-C arrives.
///
/// Line reads block in the OS, so the signal is awaited on a dedicated
/// thread with its own single-threaded runtime. That thread ends the process
/// with `std::process::exit(0)`: destructors on the main thread do not run,
/// and a response that was half printed stays half printed. A saved body
/// file is only reported after it has been fully written, so an interrupt
/// can leave an unreported file but never a truncated one that was named.
pub fn install_interrupt_handler() -> io::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    std::thread::Builder::new()
        .name("interrupt-watcher".to_string())
        .spawn(move || {
            runtime.block_on(async {
                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::debug!("interrupt received");
                    println!("{FAREWELL}");
                    std::process::exit(0);
                }
            })
        })?;
    Ok(())
}
