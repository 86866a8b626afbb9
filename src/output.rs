//! Shared output formatting for kan CLI commands.

use serde::Serialize;

use crate::error::{Error, Result};

pub const SCHEMA_VERSION: &str = "kan.v1";

#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub json: bool,
    pub quiet: bool,
}

/// Human-readable command output: a header, `key: value` summary lines and
/// free-form body lines.
#[derive(Debug, Clone)]
pub struct HumanOutput {
    header: String,
    summary: Vec<(String, String)>,
    lines: Vec<String>,
}

impl HumanOutput {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            summary: Vec::new(),
            lines: Vec::new(),
        }
    }

    pub fn push_summary(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.summary.push((key.into(), value.into()));
    }

    pub fn push_line(&mut self, value: impl Into<String>) {
        self.lines.push(value.into());
    }
}

pub fn emit_success<T: Serialize>(
    options: OutputOptions,
    command: &str,
    data: &T,
    human: &HumanOutput,
) -> Result<()> {
    if options.json {
        #[derive(Serialize)]
        struct Envelope<'a, T: Serialize> {
            schema_version: &'static str,
            command: &'a str,
            status: &'static str,
            data: &'a T,
        }

        let payload = Envelope {
            schema_version: SCHEMA_VERSION,
            command,
            status: "success",
            data,
        };

        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    if options.quiet {
        return Ok(());
    }

    println!("{}", format_human(human));
    Ok(())
}

pub fn emit_error(command: &str, err: &Error, json: bool) -> Result<()> {
    let hint = error_hint(err);
    if json {
        #[derive(Serialize)]
        struct ErrorBody<'a> {
            message: &'a str,
            code: i32,
            kind: &'static str,
            #[serde(skip_serializing_if = "Option::is_none")]
            details: Option<serde_json::Value>,
        }

        #[derive(Serialize)]
        struct Envelope<'a> {
            schema_version: &'static str,
            command: &'a str,
            status: &'static str,
            error: ErrorBody<'a>,
            #[serde(skip_serializing_if = "Option::is_none")]
            hint: Option<String>,
        }

        let payload = Envelope {
            schema_version: SCHEMA_VERSION,
            command,
            status: "error",
            error: ErrorBody {
                message: &err.to_string(),
                code: err.exit_code(),
                kind: error_kind(err),
                details: err.details(),
            },
            hint,
        };

        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    eprintln!("error: {err}");
    if let Some(hint) = hint {
        eprintln!("hint: {hint}");
    }
    Ok(())
}

pub fn format_human(output: &HumanOutput) -> String {
    let mut lines = Vec::new();
    if !output.header.is_empty() {
        lines.push(output.header.clone());
    }

    let width = output
        .summary
        .iter()
        .map(|(key, _)| key.len())
        .max()
        .unwrap_or(0);
    for (key, value) in &output.summary {
        lines.push(format!("  {:<width$}  {value}", format!("{key}:"), width = width + 1));
    }
    lines.extend(output.lines.iter().cloned());

    lines.join("\n")
}

/// Best-effort command name for error envelopes, taken from raw argv.
pub fn infer_command_name_from_args() -> String {
    let mut args = std::env::args().skip(1);
    let mut skip_value = false;
    for arg in args.by_ref() {
        if skip_value {
            skip_value = false;
            continue;
        }
        if arg == "--file" {
            skip_value = true;
            continue;
        }
        if arg.starts_with('-') {
            continue;
        }
        return arg;
    }
    "kan".to_string()
}

fn error_kind(err: &Error) -> &'static str {
    match err {
        Error::ItemNotFound(_) => "not_found",
        _ if err.exit_code() == crate::error::exit_codes::USER_ERROR => "user_error",
        _ => "operation_failed",
    }
}

fn error_hint(err: &Error) -> Option<String> {
    match err {
        Error::ItemNotFound(_) => Some("kan ls".to_string()),
        Error::UnknownCommand(_) => Some("kan help".to_string()),
        Error::InvalidConfig(_) => Some("fix .kan.toml then retry".to_string()),
        Error::LockFailed(_) => Some("another kan command is using the board; retry".to_string()),
        _ => None,
    }
}
