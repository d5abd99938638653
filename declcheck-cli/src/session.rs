//! Scripted, stage-by-stage driving of a single pipeline.
//!
//! Each script line is one command. This is the command-line stand-in for
//! an editor with one button per stage: the user loads text, then presses
//! `lexical`, `syntax` and `semantic` in turn, and `reset` to start over.

use std::fs;
use std::io::Write;

use anyhow::{Context, Result, bail};
use declcheck_core::{Diagnostic, Pipeline, Stage};
use tracing::debug;

use crate::render::{write_failure, write_tokens};

#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    /// Replace the source with a file's contents.
    Load(&'a str),
    /// Replace the source with the rest of the line.
    Source(&'a str),
    /// Add the rest of the line as a new source line.
    Append(&'a str),
    Run(Stage),
    Reset,
    Status,
    Tokens,
}

fn parse_command(line: &str) -> Option<Command<'_>> {
    let (name, rest) = line
        .split_once(char::is_whitespace)
        .map(|(name, rest)| (name, rest.trim()))
        .unwrap_or((line, ""));
    let command = match name {
        "load" if !rest.is_empty() => Command::Load(rest),
        "source" => Command::Source(rest),
        "append" => Command::Append(rest),
        "lexical" => Command::Run(Stage::Lexical),
        "syntax" => Command::Run(Stage::Syntax),
        "semantic" => Command::Run(Stage::Semantic),
        "reset" => Command::Reset,
        "status" => Command::Status,
        "tokens" => Command::Tokens,
        _ => return None,
    };
    Some(command)
}

#[derive(Debug, Default)]
pub struct Session {
    pipeline: Pipeline,
    source: String,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    /// Execute every command of `script`, writing results to `out`.
    ///
    /// Blank lines and lines starting with `#` are ignored. An unknown
    /// command aborts the script; stage failures do not.
    pub fn run_script(&mut self, script: &str, out: &mut impl Write) -> Result<()> {
        for (index, raw) in script.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some(command) = parse_command(line) else {
                bail!("unknown session command on line {}: {line}", index + 1);
            };
            debug!(?command, "session command");
            self.execute(command, out)?;
        }
        Ok(())
    }

    fn execute(&mut self, command: Command<'_>, out: &mut impl Write) -> Result<()> {
        match command {
            Command::Load(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("failed to read input file {path}"))?;
                self.replace_source(text);
                writeln!(out, "loaded {path} ({} bytes)", self.source.len())?;
            }
            Command::Source(text) => {
                self.replace_source(text.to_string());
            }
            Command::Append(text) => {
                let mut source = std::mem::take(&mut self.source);
                if !source.is_empty() {
                    source.push('\n');
                }
                source.push_str(text);
                self.replace_source(source);
            }
            Command::Run(stage) => match self.pipeline.run_stage(stage, &self.source) {
                Ok(()) => writeln!(out, "{}", stage.verdict(true))?,
                Err(err) => {
                    let refused = err.is_not_ready();
                    write_failure(out, &Diagnostic::from(err), refused)?;
                }
            },
            Command::Reset => {
                self.replace_source(String::new());
                writeln!(out, "pipeline reset")?;
            }
            Command::Status => {
                let next = self
                    .pipeline
                    .next_stage()
                    .map_or("none", |stage| stage.name());
                writeln!(out, "phase: {}, next: {next}", self.pipeline.phase())?;
            }
            Command::Tokens => write_tokens(out, self.pipeline.lines())?,
        }
        Ok(())
    }

    // New text always invalidates the token buffer.
    fn replace_source(&mut self, source: String) {
        self.pipeline.reset();
        self.source = source;
    }
}
