//! Output formatting utilities for CLI operations.

use std::io::{self, Write};

use pullgen::{EnumerationError, OutputFormat, PullRequest};

const HEADERS: [&str; 4] = ["NUMBER", "BRANCH", "TARGET", "HEAD"];

/// Writes the listing in the requested format.
pub fn write_listing<W: Write>(
    writer: &mut W,
    format: OutputFormat,
    pull_requests: &[PullRequest],
) -> Result<(), EnumerationError> {
    match format {
        OutputFormat::Table => write_table(writer, pull_requests),
        OutputFormat::Json => write_json_lines(writer, pull_requests),
    }
}

/// Writes one aligned row per pull request under a header row.
pub fn write_table<W: Write>(
    writer: &mut W,
    pull_requests: &[PullRequest],
) -> Result<(), EnumerationError> {
    if pull_requests.is_empty() {
        return writeln!(writer, "No open pull requests matched.").map_err(|e| io_error(&e));
    }

    let rows: Vec<[String; 4]> = pull_requests
        .iter()
        .map(|pr| {
            [
                format!("#{}", pr.number),
                pr.branch.clone(),
                pr.target_branch.clone(),
                pr.head_sha.clone(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_row(writer, &HEADERS.map(str::to_owned), &widths)?;
    for row in &rows {
        write_row(writer, row, &widths)?;
    }
    Ok(())
}

fn write_row<W: Write>(
    writer: &mut W,
    cells: &[String; 4],
    widths: &[usize; 4],
) -> Result<(), EnumerationError> {
    let [number, branch, target, head] = cells;
    let [number_width, branch_width, target_width, _] = *widths;
    writeln!(
        writer,
        "{number:<number_width$}  {branch:<branch_width$}  {target:<target_width$}  {head}"
    )
    .map_err(|e| io_error(&e))
}

/// Writes one JSON object per pull request, one per line.
pub fn write_json_lines<W: Write>(
    writer: &mut W,
    pull_requests: &[PullRequest],
) -> Result<(), EnumerationError> {
    for pr in pull_requests {
        let line = serde_json::to_string(pr).map_err(|error| EnumerationError::Io {
            message: error.to_string(),
        })?;
        writeln!(writer, "{line}").map_err(|e| io_error(&e))?;
    }
    Ok(())
}

/// Converts an I/O error to an [`EnumerationError::Io`].
pub(crate) fn io_error(error: &io::Error) -> EnumerationError {
    EnumerationError::Io {
        message: error.to_string(),
    }
}
