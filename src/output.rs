//! Shared output formatting for td CLI commands.

use serde::Serialize;

use crate::error::{Error, Result};

pub const SCHEMA_VERSION: &str = "td.v1";

#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub json: bool,
    pub quiet: bool,
}

/// Human-readable rendering of a command result.
///
/// `lines` are printed verbatim (tables, trees). `warnings` go to stderr.
#[derive(Debug, Clone, Default)]
pub struct HumanOutput {
    lines: Vec<String>,
    warnings: Vec<String>,
}

impl HumanOutput {
    pub fn new(first_line: impl Into<String>) -> Self {
        Self {
            lines: vec![first_line.into()],
            warnings: Vec::new(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn push_warning(&mut self, value: impl Into<String>) {
        self.warnings.push(value.into());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

pub fn emit_success<T: Serialize>(
    options: OutputOptions,
    command: &str,
    data: &T,
    human: Option<&HumanOutput>,
) -> Result<()> {
    if options.json {
        let warnings = human.map(|h| h.warnings.clone()).unwrap_or_default();

        #[derive(Serialize)]
        struct Envelope<'a, T: Serialize> {
            schema_version: &'static str,
            command: &'a str,
            status: &'static str,
            data: &'a T,
            #[serde(skip_serializing_if = "Vec::is_empty")]
            warnings: Vec<String>,
        }

        let payload = Envelope {
            schema_version: SCHEMA_VERSION,
            command,
            status: "success",
            data,
            warnings,
        };

        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    if options.quiet {
        return Ok(());
    }

    if let Some(human) = human {
        for warning in &human.warnings {
            eprintln!("warning: {warning}");
        }
        if !human.lines.is_empty() {
            println!("{}", human.lines.join("\n"));
        }
    }

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
            hint: Option<&'a str>,
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
            hint: hint.as_deref(),
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

/// First non-flag argument, used to label JSON envelopes.
pub fn infer_command_name_from_args() -> String {
    infer_command_name(std::env::args().skip(1))
}

fn infer_command_name(args: impl IntoIterator<Item = String>) -> String {
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if arg == "--dir" {
            args.next();
            continue;
        }
        if arg.starts_with('-') {
            continue;
        }
        return arg;
    }
    "td".to_string()
}

fn error_kind(err: &Error) -> &'static str {
    match err {
        Error::NotInitialized(_) => "not_initialized",
        Error::AlreadyInitialized(_) => "already_initialized",
        Error::NotFound(_) => "not_found",
        Error::AlreadyExists(_) => "already_exists",
        Error::Invalid { .. } => "invalid",
        Error::Corrupt { .. } => "corrupt",
        Error::AmbiguousId { .. } => "ambiguous_id",
        Error::InvalidConfig(_) => "invalid_config",
        Error::Aborted => "aborted",
        Error::LockFailed(_) => "lock_failed",
        _ => "operation_failed",
    }
}

fn error_hint(err: &Error) -> Option<String> {
    match err {
        Error::NotInitialized(_) => Some("td init".to_string()),
        Error::AmbiguousId { .. } => Some("use a longer id prefix".to_string()),
        Error::AlreadyExists(_) => Some("choose another --id or omit it".to_string()),
        Error::Corrupt { id, .. } => Some(format!("fix or remove .td/tasks/{id}.yaml")),
        Error::InvalidConfig(_) => Some("fix .td/config.toml then retry".to_string()),
        _ => None,
    }
}
