use crate::workflow::UpdateError;
use aurbump_common::errors::*;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

/// Executes external tools on behalf of the update workflow.
///
/// Every call gets an explicit working directory, nothing relies on the
/// working directory of the process.
pub trait Runner {
    fn run(&mut self, cwd: &Path, program: &str, args: &[&str]) -> Result<()>;

    /// Like `run`, but returns what the command wrote to stdout.
    fn capture(&mut self, cwd: &Path, program: &str, args: &[&str]) -> Result<Vec<u8>>;
}

fn command_line(program: &str, args: &[&str]) -> String {
    let mut out = program.to_string();
    for arg in args {
        out.push(' ');
        out.push_str(arg);
    }
    out
}

fn check_status(program: &str, args: &[&str], status: ExitStatus) -> Result<()> {
    if status.success() {
        Ok(())
    } else {
        Err(UpdateError::ToolFailure {
            command: command_line(program, args),
            code: status.code(),
        }
        .into())
    }
}

#[derive(Debug, Default)]
pub struct SystemRunner;

impl Runner for SystemRunner {
    fn run(&mut self, cwd: &Path, program: &str, args: &[&str]) -> Result<()> {
        info!("Running {:?} in {:?}", command_line(program, args), cwd);
        let status = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .status()
            .with_context(|| anyhow!("Failed to spawn {:?}", program))?;
        debug!("{:?} finished: {:?}", program, status);
        check_status(program, args, status)
    }

    fn capture(&mut self, cwd: &Path, program: &str, args: &[&str]) -> Result<Vec<u8>> {
        info!("Running {:?} in {:?}", command_line(program, args), cwd);
        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .with_context(|| anyhow!("Failed to spawn {:?}", program))?;
        debug!("{:?} finished: {:?}", program, output.status);
        check_status(program, args, output.status)?;
        Ok(output.stdout)
    }
}

#[cfg(test)]
pub mod fake {
    use super::*;

    /// Records every invocation instead of executing it.
    #[derive(Debug, Default)]
    pub struct RecordingRunner {
        pub calls: Vec<String>,
        pub fail_on: Option<String>,
        pub stdout: Vec<u8>,
    }

    impl RecordingRunner {
        pub fn new() -> RecordingRunner {
            RecordingRunner::default()
        }

        pub fn failing_on(command: &str) -> RecordingRunner {
            RecordingRunner {
                fail_on: Some(command.to_string()),
                ..Default::default()
            }
        }

        fn record(&mut self, program: &str, args: &[&str]) -> Result<()> {
            let command = command_line(program, args);
            self.calls.push(command.clone());
            if self.fail_on.as_deref() == Some(command.as_str()) {
                return Err(UpdateError::ToolFailure {
                    command,
                    code: Some(1),
                }
                .into());
            }
            Ok(())
        }
    }

    impl Runner for RecordingRunner {
        fn run(&mut self, _cwd: &Path, program: &str, args: &[&str]) -> Result<()> {
            self.record(program, args)
        }

        fn capture(&mut self, _cwd: &Path, program: &str, args: &[&str]) -> Result<Vec<u8>> {
            self.record(program, args)?;
            Ok(self.stdout.clone())
        }
    }
}
