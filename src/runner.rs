use std::io;
use std::process::Command;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to run `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` exited with status {}: {stderr}", exit_status_text(.code))]
    Exit {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

fn exit_status_text(code: &Option<i32>) -> String {
    code.map_or_else(|| "signal".to_owned(), |c| c.to_string())
}

impl RunError {
    /// Exit code of a command that ran but failed.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Exit { code, .. } => *code,
            Self::Launch { .. } => None,
        }
    }
}

/// Runs external programs.
///
/// `args[0]` is the program. Every git lookup and the URL opener go through
/// this single seam so tests can intercept and assert on invocations.
pub trait CommandRunner {
    /// Run to completion and capture standard output.
    fn run(&self, args: &[&str]) -> Result<String, RunError>;

    /// Run to completion attached to the user's terminal (inherited stdio).
    fn launch(&self, args: &[&str]) -> Result<(), RunError> {
        self.run(args).map(drop)
    }
}

fn split_program<'a, 'b>(args: &'a [&'b str]) -> Result<(&'b str, &'a [&'b str]), RunError> {
    match args.split_first() {
        Some((program, rest)) => Ok((*program, rest)),
        None => Err(RunError::Launch {
            program: String::new(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "empty command"),
        }),
    }
}

fn launch_error(program: &str) -> impl FnOnce(io::Error) -> RunError + '_ {
    move |source| RunError::Launch {
        program: program.to_owned(),
        source,
    }
}

/// Runs real processes, blocking until they exit.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, args: &[&str]) -> Result<String, RunError> {
        let (program, rest) = split_program(args)?;

        tracing::debug!("run: {}", args.join(" "));
        let output = Command::new(program)
            .args(rest)
            .output()
            .map_err(launch_error(program))?;

        if !output.status.success() {
            return Err(RunError::Exit {
                command: args.join(" "),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn launch(&self, args: &[&str]) -> Result<(), RunError> {
        let (program, rest) = split_program(args)?;

        tracing::debug!("launch: {}", args.join(" "));
        let status = Command::new(program)
            .args(rest)
            .status()
            .map_err(launch_error(program))?;

        if !status.success() {
            return Err(RunError::Exit {
                command: args.join(" "),
                code: status.code(),
                stderr: String::new(),
            });
        }
        Ok(())
    }
}
