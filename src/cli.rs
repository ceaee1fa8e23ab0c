//! Argument model and reporting loop for the `pathnorm` binary.
use crate::error::CliError;
use clap::{Parser, ValueEnum};
use pathnorm_jpath::{JPathError, NormalizedPath, normalize};
use serde::Serialize;
use std::io::{BufRead, Write};

#[derive(Parser, Debug)]
#[command(version, about = "Normalize JSONPath expressions into selector nodes", long_about = None)]
pub struct Cli {
    /// Expressions to normalize. Read one per line from stdin when omitted.
    pub expressions: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Stop at the first malformed expression
    #[arg(long, default_value_t = false)]
    pub fail_fast: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// One JSON record per line
    Json,
    /// Indented JSON records
    Pretty,
    /// Token notation, e.g. `[root, property('a')]`
    Tokens,
}

/// How many expressions were processed and how many were rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Report {
    pub total: usize,
    pub failed: usize,
}

#[derive(Serialize)]
struct Record<'a> {
    expression: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    nodes: Option<&'a NormalizedPath>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorRecord>,
}

#[derive(Serialize)]
struct ErrorRecord {
    code: &'static str,
    message: String,
}

/// Normalizes every expression named by `cli` (or read from `input`) and
/// writes one result per expression to `out`.
///
/// Malformed expressions are reported in the output and counted, unless
/// `--fail-fast` is set, in which case the first one aborts the run.
pub fn run<R: BufRead, W: Write>(cli: &Cli, input: R, mut out: W) -> Result<Report, CliError> {
    let mut report = Report::default();
    if cli.expressions.is_empty() {
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            process(cli, &line, &mut out, &mut report)?;
        }
    } else {
        for expression in &cli.expressions {
            process(cli, expression, &mut out, &mut report)?;
        }
    }
    out.flush()?;
    Ok(report)
}

fn process<W: Write>(
    cli: &Cli,
    expression: &str,
    out: &mut W,
    report: &mut Report,
) -> Result<(), CliError> {
    report.total += 1;
    let result = normalize(expression);
    if let Err(e) = &result {
        report.failed += 1;
        if cli.fail_fast {
            return Err(CliError::Normalize {
                expression: expression.to_string(),
                source: e.clone(),
            });
        }
    }
    write_result(cli.format, expression, &result, out)
}

fn write_result<W: Write>(
    format: OutputFormat,
    expression: &str,
    result: &Result<NormalizedPath, JPathError>,
    out: &mut W,
) -> Result<(), CliError> {
    if format == OutputFormat::Tokens {
        match result {
            Ok(path) => writeln!(out, "{} => {}", expression, path)?,
            Err(e) => writeln!(out, "{} => error[{}]: {}", expression, e.code(), e)?,
        }
        return Ok(());
    }

    let record = Record {
        expression,
        nodes: result.as_ref().ok(),
        error: result.as_ref().err().map(|e| ErrorRecord {
            code: e.code(),
            message: e.to_string(),
        }),
    };
    if format == OutputFormat::Pretty {
        serde_json::to_writer_pretty(&mut *out, &record)?;
    } else {
        serde_json::to_writer(&mut *out, &record)?;
    }
    writeln!(out)?;
    Ok(())
}
