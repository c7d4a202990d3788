//! Destinations for a finished listing

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use chrono::{DateTime, Local};
use clap::ValueEnum;

use crate::error::{Error, Result};

const DEFAULT_FILENAME_FORMAT: &str = "listall_%y.%m.%d_%H-%M.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputTarget {
    /// Print to standard output
    Stdout,
    /// Write to a file
    File,
    /// Both of the above
    All,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sink {
    Stdout,
    File(PathBuf),
}

impl Sink {
    /// Expand requested targets into sinks, stdout first, without duplicates.
    ///
    /// No targets means stdout. Without an explicit `filename`, file output
    /// goes to a timestamped name in the working directory.
    pub fn from_targets(
        targets: &[OutputTarget],
        filename: Option<PathBuf>,
        now: DateTime<Local>,
    ) -> Vec<Sink> {
        let wants = |t: OutputTarget| targets.contains(&t) || targets.contains(&OutputTarget::All);
        let mut sinks = Vec::new();
        if targets.is_empty() || wants(OutputTarget::Stdout) {
            sinks.push(Sink::Stdout);
        }
        if wants(OutputTarget::File) {
            sinks.push(Sink::File(
                filename.unwrap_or_else(|| default_filename(now)),
            ));
        }
        sinks
    }

    pub fn deliver(&self, text: &str) -> Result<()> {
        match self {
            Sink::Stdout => {
                let mut stdout = io::stdout().lock();
                writeln!(stdout, "{text}")
                    .and_then(|()| stdout.flush())
                    .map_err(|e| Error::from_io("<stdout>", e))
            }
            Sink::File(path) => fs::write(path, format!("{text}\n"))
                .map_err(|e| Error::from_io(path.clone(), e)),
        }
    }
}

pub fn default_filename(now: DateTime<Local>) -> PathBuf {
    PathBuf::from(now.format(DEFAULT_FILENAME_FORMAT).to_string())
}
