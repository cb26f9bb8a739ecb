//! Interactive file selection.
//!
//! Looks for rosters and session archives in the working directory and asks
//! which ones to use. Prompts and answers go through the supplied writer and
//! reader so the flow can be driven from tests.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use tally_core::error::{Result, TallyError};
use tally_data::discovery::{find_archives, find_rosters};

/// Files chosen by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub roster: PathBuf,
    pub archives: Vec<PathBuf>,
}

/// Run the roster and archive prompts against the files in `cwd`.
pub fn run_prompts(cwd: &Path, input: &mut dyn BufRead, out: &mut dyn Write) -> Result<Selection> {
    let roster = choose_roster(cwd, input, out)?;
    writeln!(out, "Found roster: {}\n", short_name(&roster))?;

    let archives = choose_archives(cwd, input, out)?;
    let names: Vec<String> = archives.iter().map(|p| short_name(p)).collect();
    writeln!(out, "Found clicker data: {}\n", names.join(", "))?;

    Ok(Selection { roster, archives })
}

/// Turn an answer into 0-based indices into a list of `count` items.
///
/// Accepts a single 1-based number, an inclusive range `a-b`, or `all`.
pub fn parse_selection(answer: &str, count: usize) -> Result<Vec<usize>> {
    let answer = answer.trim();
    if answer.eq_ignore_ascii_case("all") {
        return Ok((0..count).collect());
    }

    if let Some((start, end)) = answer.split_once('-') {
        let start = parse_index(start, count)?;
        let end = parse_index(end, count)?;
        if start > end {
            return Err(TallyError::Selection(format!(
                "range {answer:?} runs backwards"
            )));
        }
        return Ok((start..=end).collect());
    }

    Ok(vec![parse_index(answer, count)?])
}

// ── Private ───────────────────────────────────────────────────────────────────

fn choose_roster(cwd: &Path, input: &mut dyn BufRead, out: &mut dyn Write) -> Result<PathBuf> {
    let mut rosters = find_rosters(cwd);
    match rosters.len() {
        0 => Err(TallyError::NoInputFiles(format!(
            "no .csv roster in {}; use `standard --roster <file>` instead",
            cwd.display()
        ))),
        1 => Ok(rosters.remove(0)),
        _ => {
            writeln!(out, "Please select file to pull roster from.")?;
            list_files(&rosters, out)?;
            let answer = ask(input, out, "Please enter a number> ")?;
            let idx = parse_index(&answer, rosters.len())?;
            Ok(rosters.swap_remove(idx))
        }
    }
}

fn choose_archives(
    cwd: &Path,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<Vec<PathBuf>> {
    let archives = find_archives(cwd);
    if archives.is_empty() {
        return Err(TallyError::NoInputFiles(format!(
            "no .tpzx session files in {}",
            cwd.display()
        )));
    }

    writeln!(out, "Please select file(s) to pull clicker data from.")?;
    list_files(&archives, out)?;
    let answer = ask(
        input,
        out,
        "Enter a number, a range separated by '-', or 'all' for all\n> ",
    )?;

    let picked = parse_selection(&answer, archives.len())?;
    Ok(picked.into_iter().map(|i| archives[i].clone()).collect())
}

fn list_files(files: &[PathBuf], out: &mut dyn Write) -> Result<()> {
    for (i, file) in files.iter().enumerate() {
        writeln!(out, " {}. {}", i + 1, short_name(file))?;
    }
    Ok(())
}

fn ask(input: &mut dyn BufRead, out: &mut dyn Write, prompt: &str) -> Result<String> {
    write!(out, "{prompt}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(TallyError::Selection("no answer given".to_string()));
    }
    Ok(line.trim().to_string())
}

/// 1-based answer to a 0-based index.
fn parse_index(raw: &str, count: usize) -> Result<usize> {
    let raw = raw.trim();
    let n: usize = raw
        .parse()
        .map_err(|_| TallyError::Selection(format!("{raw:?} is not a number")))?;
    if n == 0 || n > count {
        return Err(TallyError::Selection(format!(
            "{n} is out of range 1-{count}"
        )));
    }
    Ok(n - 1)
}

fn short_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
