use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

use crate::render::DEFAULT_TEMPLATE;
use crate::storage::DEFAULT_DATASTORE;

pub const DEFAULT_BIND: &str = "0.0.0.0:2222";

#[derive(Parser, Debug)]
#[command(name = "jotter")]
#[command(version, about = "A tiny note pad served over HTTP")]
pub struct Cli {
    /// Where to read/write the datastore
    #[arg(long = "ds", visible_alias = "datastore", value_name = "PATH", default_value = DEFAULT_DATASTORE)]
    pub datastore: PathBuf,

    /// Index page template
    #[arg(long, value_name = "PATH", default_value = DEFAULT_TEMPLATE)]
    pub template: PathBuf,

    /// Address to listen on
    #[arg(long, value_name = "ADDR", default_value = DEFAULT_BIND)]
    pub bind: String,

    /// More log output (repeat for trace)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Rewrite the single-dash `-ds` / `-ds=PATH` spelling to `--ds`.
///
/// clap only knows one-character short flags, so without this `-ds` would be
/// read as a cluster of `-d` and `-s`.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut out = Vec::new();
    let mut passthrough = false;
    for arg in args {
        if passthrough {
            out.push(arg);
            continue;
        }
        let rewritten = match arg.to_str() {
            Some("--") => {
                passthrough = true;
                None
            }
            Some("-ds") => Some(OsString::from("--ds")),
            Some(s) => s.strip_prefix("-ds=").map(|path| OsString::from(format!("--ds={}", path))),
            None => None,
        };
        out.push(rewritten.unwrap_or(arg));
    }
    out
}

/// Everything `serve` needs, detached from argument parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServeConfig {
    pub datastore: PathBuf,
    pub template: PathBuf,
    pub bind: String,
}

impl From<&Cli> for ServeConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            datastore: cli.datastore.clone(),
            template: cli.template.clone(),
            bind: cli.bind.clone(),
        }
    }
}
