use std::ffi::OsString;

use crate::http::Method;
pub use clap::{CommandFactory, Parser};
use clap::ValueEnum;

/// Method names accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum MethodArg {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl From<MethodArg> for Method {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Get => Method::Get,
            MethodArg::Post => Method::Post,
            MethodArg::Put => Method::Put,
            MethodArg::Delete => Method::Delete,
            MethodArg::Patch => Method::Patch,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "CLI HTTP Client", long_about = None)]
struct ClapArgs {
    /// Interactive mode
    /// Prompt for each request field in a loop instead of sending one request.
    #[clap(long, help = "Enable interactive mode")]
    interactive: bool,

    #[clap(value_enum, ignore_case = true, help = "HTTP method")]
    method: Option<MethodArg>,

    #[clap(help = "Request URL")]
    url: Option<String>,

    #[clap(long, help = "Request headers (key1=value1,key2=value2)")]
    headers: Option<String>,

    #[clap(long, help = "Query parameters (key1=value1,key2=value2)")]
    params: Option<String>,

    #[clap(long, help = "Form data (key1=value1,key2=value2)")]
    data: Option<String>,

    #[clap(long, help = "JSON data (key1=value1,key2=value2)")]
    json: Option<String>,

    /// Verbose mode
    /// Optional. Log request details to stderr.
    #[clap(short = 'v', long, help = "Print verbose message")]
    verbose: bool,
}

/// What a run should do, decided from the arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode<'a> {
    Interactive,
    Single { method: Method, url: &'a str },
    Missing,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    interactive: bool,
    method: Option<Method>,
    url: Option<String>,
    headers: Option<String>,
    params: Option<String>,
    data: Option<String>,
    json: Option<String>,
    verbose: bool,
}

impl From<ClapArgs> for CommandLineArgs {
    fn from(args: ClapArgs) -> Self {
        Self {
            interactive: args.interactive,
            method: args.method.map(Method::from),
            url: args.url,
            headers: args.headers,
            params: args.params,
            data: args.data,
            json: args.json,
            verbose: args.verbose,
        }
    }
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        ClapArgs::parse().into()
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::parse_from(itr).into()
    }

    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::try_parse_from(itr).map(Self::from)
    }

    /// Full help text, as printed by `--help`
    pub fn help_text() -> String {
        ClapArgs::command().render_help().to_string()
    }

    pub fn mode(&self) -> Mode<'_> {
        if self.interactive {
            return Mode::Interactive;
        }
        match (self.method, self.url.as_deref()) {
            (Some(method), Some(url)) => Mode::Single { method, url },
            _ => Mode::Missing,
        }
    }

    pub fn headers(&self) -> Option<&str> {
        self.headers.as_deref()
    }

    pub fn params(&self) -> Option<&str> {
        self.params.as_deref()
    }

    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }

    pub fn json(&self) -> Option<&str> {
        self.json.as_deref()
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}
