//! Converter subprocess execution.
//!
//! Runs sass-convert with the document piped to stdin and both output
//! streams drained on dedicated threads, under an optional deadline that
//! kills the child when exceeded. Every call is a single independent
//! attempt: no retries, no state shared between requests.

use std::io::{ErrorKind, Read, Write};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use super::ConvertError;
use super::command::ConverterCommand;

/// Captured result of one converter run.
#[derive(Debug, Clone)]
pub struct ConvertOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub success: bool,
}

/// Executor for converter subprocesses.
#[derive(Debug, Clone, Copy)]
pub struct ConvertExecutor {
    /// Deadline per run in milliseconds; 0 disables the bound.
    timeout_ms: u64,
}

impl ConvertExecutor {
    pub fn new(timeout_ms: u64) -> Self {
        Self { timeout_ms }
    }

    /// Run the converter, writing `input` to its stdin and draining both
    /// output pipes to completion.
    pub fn run(&self, command: &ConverterCommand, args: &[String], input: &str) -> Result<ConvertOutput, ConvertError> {
        let program = command.display().to_string();

        let mut child = Command::new(command.program())
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ConvertError::Launch {
                program: program.clone(),
                source: e,
            })?;

        // Drain stdout and stderr on separate threads so a chatty converter
        // cannot deadlock against a full pipe buffer.
        let mut stdout_handle = child.stdout.take().map(|out| thread::spawn(move || read_pipe(out)));
        let mut stderr_handle = child.stderr.take().map(|err| thread::spawn(move || read_pipe(err)));

        // Write the document and drop the handle so the converter sees EOF.
        if let Some(mut stdin) = child.stdin.take()
            && let Err(e) = stdin.write_all(input.as_bytes())
        {
            // A converter that dies before draining stdin closes the pipe
            // early; fall through and report its exit status instead.
            if e.kind() != ErrorKind::BrokenPipe {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ConvertError::Io {
                    context: format!("failed to write to {program} stdin"),
                    source: e,
                });
            }
        }

        let timeout = Duration::from_millis(self.timeout_ms);
        let status = if timeout.is_zero() {
            child.wait().map_err(|e| ConvertError::Io {
                context: format!("failed to wait for {program}"),
                source: e,
            })?
        } else {
            let start = Instant::now();
            loop {
                let polled = child.try_wait().map_err(|e| ConvertError::Io {
                    context: format!("failed to poll {program}"),
                    source: e,
                })?;
                if let Some(status) = polled {
                    break status;
                }
                if start.elapsed() >= timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    let _ = join_reader(stdout_handle.take());
                    let _ = join_reader(stderr_handle.take());
                    return Err(ConvertError::Timeout {
                        program,
                        timeout_ms: self.timeout_ms,
                    });
                }
                thread::sleep(Duration::from_millis(10));
            }
        };

        let stdout = join_reader(stdout_handle.take()).map_err(|e| ConvertError::Io {
            context: format!("failed to read {program} stdout"),
            source: e,
        })?;
        let stderr = join_reader(stderr_handle.take()).map_err(|e| ConvertError::Io {
            context: format!("failed to read {program} stderr"),
            source: e,
        })?;

        Ok(ConvertOutput {
            stdout,
            stderr,
            exit_code: status.code().unwrap_or(-1),
            success: status.success(),
        })
    }
}

fn read_pipe<R: Read>(mut pipe: R) -> std::io::Result<String> {
    let mut buf = Vec::new();
    pipe.read_to_end(&mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn join_reader(handle: Option<thread::JoinHandle<std::io::Result<String>>>) -> std::io::Result<String> {
    match handle {
        Some(handle) => match handle.join() {
            Ok(result) => result,
            Err(_) => Err(std::io::Error::other("output reader thread panicked")),
        },
        None => Ok(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command_for(program: &str) -> ConverterCommand {
        ConverterCommand::for_program(program)
    }

    #[test]
    #[cfg(unix)]
    fn test_run_captures_stdout_and_status() {
        let command = command_for("sh");
        let output = ConvertExecutor::new(5000)
            .run(&command, &["-c".to_string(), "cat".to_string()], "a { color: red; }")
            .unwrap();
        assert!(output.success);
        assert_eq!(output.exit_code, 0);
        assert_eq!(output.stdout, "a { color: red; }");
        assert_eq!(output.stderr, "");
    }

    #[test]
    #[cfg(unix)]
    fn test_run_captures_stderr_and_failure() {
        let command = command_for("sh");
        let output = ConvertExecutor::new(5000)
            .run(
                &command,
                &["-c".to_string(), "echo oops >&2; exit 65".to_string()],
                "",
            )
            .unwrap();
        assert!(!output.success);
        assert_eq!(output.exit_code, 65);
        assert_eq!(output.stderr, "oops\n");
    }

    #[test]
    fn test_missing_program_is_a_launch_error() {
        let command = command_for("definitely-not-a-real-converter-9f2d");
        let err = ConvertExecutor::new(1000).run(&command, &[], "").unwrap_err();
        assert!(matches!(err, ConvertError::Launch { .. }));
    }

    #[test]
    #[cfg(unix)]
    fn test_timeout_kills_the_child() {
        let command = command_for("sh");
        let start = Instant::now();
        let err = ConvertExecutor::new(200)
            .run(&command, &["-c".to_string(), "sleep 5".to_string()], "")
            .unwrap_err();
        assert!(matches!(err, ConvertError::Timeout { timeout_ms: 200, .. }));
        // Must come back well before the sleep would have finished.
        assert!(start.elapsed() < Duration::from_secs(3));
    }

    #[test]
    #[cfg(unix)]
    fn test_zero_timeout_waits_indefinitely() {
        let command = command_for("sh");
        let output = ConvertExecutor::new(0)
            .run(
                &command,
                &["-c".to_string(), "sleep 0.2; echo done".to_string()],
                "",
            )
            .unwrap();
        assert!(output.success);
        assert_eq!(output.stdout, "done\n");
    }

    #[test]
    #[cfg(unix)]
    fn test_early_exit_does_not_mask_status_with_broken_pipe() {
        let command = command_for("sh");
        // The child never reads stdin; a large enough write would hit a
        // closed pipe and must still surface the exit status.
        let big_input = "x".repeat(1 << 20);
        let output = ConvertExecutor::new(5000)
            .run(&command, &["-c".to_string(), "exit 3".to_string()], &big_input)
            .unwrap();
        assert!(!output.success);
        assert_eq!(output.exit_code, 3);
    }
}
