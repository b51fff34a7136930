//! External command execution.

use crate::error::{Result, SentinelError};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Result of executing an external command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Capture stdout (if false, inherits from parent).
    pub capture_stdout: bool,

    /// Capture stderr (if false, inherits from parent).
    pub capture_stderr: bool,
}

/// Execute a command line through the system shell.
pub fn execute(command: &str, options: &CommandOptions) -> Result<CommandResult> {
    let mut cmd = Command::new(shell());
    cmd.arg(shell_flag());
    cmd.arg(command);
    run(cmd, command, options)
}

/// Execute a program directly with the given arguments, bypassing the shell.
pub fn execute_program<I, S>(program: &str, args: I, options: &CommandOptions) -> Result<CommandResult>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let args: Vec<String> = args.into_iter().map(|a| a.as_ref().to_string()).collect();
    let display = if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    };

    let mut cmd = Command::new(program);
    cmd.args(&args);
    run(cmd, &display, options)
}

/// Execute a shell command and capture its output.
pub fn execute_quiet(command: &str) -> Result<CommandResult> {
    let options = CommandOptions {
        capture_stdout: true,
        capture_stderr: true,
        ..Default::default()
    };
    execute(command, &options)
}

fn run(mut cmd: Command, display: &str, options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();

    cmd.stdin(Stdio::null());

    if options.capture_stdout {
        cmd.stdout(Stdio::piped());
    } else {
        cmd.stdout(Stdio::inherit());
    }

    if options.capture_stderr {
        cmd.stderr(Stdio::piped());
    } else {
        cmd.stderr(Stdio::inherit());
    }

    let output = cmd.output().map_err(|source| SentinelError::CommandSpawn {
        command: display.to_string(),
        source,
    })?;

    let duration = start.elapsed();

    let stdout = if options.capture_stdout {
        String::from_utf8_lossy(&output.stdout).to_string()
    } else {
        String::new()
    };

    let stderr = if options.capture_stderr {
        String::from_utf8_lossy(&output.stderr).to_string()
    } else {
        String::new()
    };

    if output.status.success() {
        Ok(CommandResult::success(stdout, stderr, duration))
    } else {
        Ok(CommandResult::failure(
            output.status.code(),
            stdout,
            stderr,
            duration,
        ))
    }
}

fn shell() -> String {
    if cfg!(target_os = "windows") {
        std::env::var("COMSPEC").unwrap_or_else(|_| "cmd.exe".to_string())
    } else {
        "/bin/sh".to_string()
    }
}

fn shell_flag() -> &'static str {
    if cfg!(target_os = "windows") {
        "/C"
    } else {
        "-c"
    }
}
