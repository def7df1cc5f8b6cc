//! Interactive front-end for users who launch the tool without arguments.
//!
//! Prompts for the Champions folder and run options, runs the scan on a
//! worker thread and streams its log lines while polling for the result.

mod worker;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;

use itemset_core::core_api::{Engine, RunOptions, RunResult, flatten_changes};
use itemset_render::{format_summary, render_change_table};

pub use worker::{RunHandle, spawn_run};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Drive prompt/run cycles until the user declines another run or input ends.
pub fn run_interactive<R, W>(
    engine: &Engine,
    default_root: Option<PathBuf>,
    map_code: &str,
    mut input: R,
    mut output: W,
) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "LoL ItemSet ID Fixer (map {map_code})")?;

    loop {
        let Some(root) = prompt_root(&mut input, &mut output, default_root.as_deref())? else {
            return Ok(());
        };
        let Some(apply_changes) =
            prompt_yes_no(&mut input, &mut output, "Apply changes (write JSON)?", true)?
        else {
            return Ok(());
        };
        let Some(backup) = prompt_yes_no(&mut input, &mut output, "Create .bak backups?", true)?
        else {
            return Ok(());
        };

        let options = RunOptions {
            apply_changes,
            backup,
            map_code: map_code.to_string(),
        };
        writeln!(output, "Running...")?;
        let handle = spawn_run(engine.clone(), root, options);
        if let Some(result) = pump(&handle, &mut output)? {
            render_result(engine, &result, &mut output)?;
        }
        handle.join();

        match prompt_yes_no(&mut input, &mut output, "Run again?", false)? {
            Some(true) => continue,
            _ => return Ok(()),
        }
    }
}

// Forward log lines as they arrive until the worker hands back its result.
fn pump<W: Write>(handle: &RunHandle, output: &mut W) -> io::Result<Option<RunResult>> {
    loop {
        while let Ok(line) = handle.log_rx.try_recv() {
            writeln!(output, "{line}")?;
        }

        match handle.result_rx.recv_timeout(POLL_INTERVAL) {
            Ok(result) => {
                while let Ok(line) = handle.log_rx.try_recv() {
                    writeln!(output, "{line}")?;
                }
                return Ok(result.ok());
            }
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => {
                writeln!(output, "ERROR: run stopped before producing a result")?;
                return Ok(None);
            }
        }
    }
}

fn render_result<W: Write>(engine: &Engine, result: &RunResult, output: &mut W) -> io::Result<()> {
    let rows = flatten_changes(result, engine.id_map());
    if rows.is_empty() {
        writeln!(output, "No replacements matched the embedded mapping.")?;
    } else {
        write!(output, "\n{}", render_change_table(&rows))?;
    }

    for warning in &result.warnings {
        writeln!(output, "WARN: {warning}")?;
    }
    if !result.groups_detected.is_empty() {
        writeln!(
            output,
            "Detected champions ({}): {}",
            result.map_code,
            result.groups_detected.join(", ")
        )?;
    }
    writeln!(
        output,
        "Summary: {}",
        format_summary(&result.map_code, &result.stats)
    )?;
    if result.applied {
        writeln!(
            output,
            "Applied changes. Backups are created as .bak (if enabled)."
        )?;
    } else {
        writeln!(output, "Dry-run: no files were modified.")?;
    }
    Ok(())
}

fn prompt_root<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    default_root: Option<&Path>,
) -> io::Result<Option<PathBuf>> {
    loop {
        let question = match default_root {
            Some(root) => format!("Champions folder [{}]:", root.display()),
            None => "Champions folder:".to_string(),
        };
        let Some(answer) = prompt_line(input, output, &question)? else {
            return Ok(None);
        };

        let answer = answer.trim_matches('"');
        let root = if answer.is_empty() {
            match default_root {
                Some(root) => root.to_path_buf(),
                None => {
                    writeln!(output, "Please select the Champions folder.")?;
                    continue;
                }
            }
        } else {
            PathBuf::from(answer)
        };

        if root.is_dir() {
            return Ok(Some(root));
        }
        writeln!(output, "Not a folder: {}", root.display())?;
    }
}

fn prompt_yes_no<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
    default: bool,
) -> io::Result<Option<bool>> {
    let hint = if default { "[Y/n]" } else { "[y/N]" };
    loop {
        let Some(answer) = prompt_line(input, output, &format!("{question} {hint}"))? else {
            return Ok(None);
        };
        match answer.to_ascii_lowercase().as_str() {
            "" => return Ok(Some(default)),
            "y" | "yes" => return Ok(Some(true)),
            "n" | "no" => return Ok(Some(false)),
            _ => writeln!(output, "Please answer y or n.")?,
        }
    }
}

// Returns `None` at end of input.
fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> io::Result<Option<String>> {
    write!(output, "{question} ")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
