use std::io::{self, Write};

use declcheck_core::{Diagnostic, Line, Report, Stage};

/// One listing line per source line: `  line 1: data_type:int identifier:x ...`.
pub fn write_tokens(out: &mut impl Write, lines: &[Line]) -> io::Result<()> {
    for line in lines {
        let tokens: Vec<String> = line.tokens().iter().map(ToString::to_string).collect();
        writeln!(out, "  line {}: {}", line.number(), tokens.join(" "))?;
    }
    Ok(())
}

/// Refusals (a stage run out of order) carry no verdict, only the hint.
pub fn write_failure(out: &mut impl Write, diagnostic: &Diagnostic, refused: bool) -> io::Result<()> {
    if refused {
        writeln!(out, "{diagnostic}")
    } else {
        writeln!(out, "{}", diagnostic.stage.verdict(false))?;
        writeln!(out, "  {diagnostic}")
    }
}

pub fn write_report(out: &mut impl Write, report: &Report, show_tokens: bool) -> io::Result<()> {
    for stage in &report.passed {
        writeln!(out, "{}", stage.verdict(true))?;
        if show_tokens && *stage == Stage::Lexical {
            write_tokens(out, &report.lines)?;
        }
    }
    if let Some(diagnostic) = &report.failure {
        write_failure(out, diagnostic, false)?;
    }
    Ok(())
}
