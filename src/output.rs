//! Output formatting for ripgrep-like match results

use crate::query::executor::{PatternResult, TextMatch};
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Print matches in ripgrep-style format
///
/// With `heading` the source is printed once above its matches, otherwise
/// every line is prefixed with it.
pub fn print_matches(
    source: &str,
    results: &[PatternResult],
    choice: ColorChoice,
    heading: bool,
) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(choice);
    write_matches(&mut stdout, source, results, heading)
}

/// Write matches to any color-aware writer
pub fn write_matches<W: WriteColor>(
    out: &mut W,
    source: &str,
    results: &[PatternResult],
    heading: bool,
) -> io::Result<()> {
    let mut merged: Vec<&TextMatch> = results.iter().flat_map(|r| &r.matches).collect();
    if merged.is_empty() {
        return Ok(());
    }
    merged.sort_by_key(|m| m.offset);

    if heading {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)).set_bold(true))?;
        writeln!(out, "{}", source)?;
        out.reset()?;
    }

    for m in merged {
        print_match_line(out, source, m, heading)?;
    }

    Ok(())
}

/// Print a match line with the match highlighted
fn print_match_line<W: WriteColor>(
    out: &mut W,
    source: &str,
    m: &TextMatch,
    heading: bool,
) -> io::Result<()> {
    if !heading {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
        write!(out, "{}", source)?;
        out.reset()?;
        write!(out, ":")?;
    }

    out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    write!(out, "{}", m.line_number)?;
    out.reset()?;
    write!(out, ":")?;
    write!(out, "{}", m.column)?;
    write!(out, ":")?;

    let content = &m.line_content;
    // Lossy decoding may shift byte positions; fall back to no highlight
    let (start, end) = if content.is_char_boundary(m.match_start)
        && content.is_char_boundary(m.match_end.min(content.len()))
    {
        (m.match_start, m.match_end.min(content.len()))
    } else {
        (content.len(), content.len())
    };

    write!(out, "{}", &content[..start])?;
    if end > start {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        write!(out, "{}", &content[start..end])?;
        out.reset()?;
    }
    writeln!(out, "{}", &content[end..])?;

    Ok(())
}

/// Print match count per pattern (for -c flag)
pub fn print_counts(counts: &[(String, usize)], choice: ColorChoice) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(choice);

    // A single pattern prints the bare number, like `rg -c` on one file
    if let [(_, count)] = counts {
        writeln!(stdout, "{}", count)?;
        return Ok(());
    }

    for (pattern, count) in counts {
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
        write!(stdout, "{}", pattern)?;
        stdout.reset()?;
        write!(stdout, ":")?;
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        writeln!(stdout, "{}", count)?;
        stdout.reset()?;
    }

    Ok(())
}

/// Print results as JSON (one document for all patterns)
pub fn print_json(results: &[PatternResult]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, results)?;
    writeln!(out)
}
