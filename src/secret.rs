use std::io;
use std::process::{Command, ExitStatus};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SecretError {
    #[error("no token command was given")]
    NoCommand,

    #[error("unable to run token command {program:?}: {source}")]
    Spawn { program: Box<str>, source: io::Error },

    #[error("token command {program:?} failed ({status}): {stderr}")]
    Failed {
        program: Box<str>,
        status: ExitStatus,
        stderr: Box<str>,
    },

    #[error("token command {program:?} printed something that is not UTF-8")]
    InvalidUtf8 { program: Box<str> },

    #[error("token command {program:?} printed nothing")]
    Empty { program: Box<str> },
}

/// Source of the Duck DNS account token.
pub trait SecretProvider {
    fn resolve(&self) -> Result<String, SecretError>;
}

/// Obtains the token from the standard output of a command, typically a
/// password manager. The command is run directly, not through a shell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandSecret {
    command: Vec<Box<str>>,
}

impl CommandSecret {
    pub fn new(command: &[Box<str>]) -> Self {
        Self {
            command: command.to_vec(),
        }
    }
}

impl SecretProvider for CommandSecret {
    fn resolve(&self) -> Result<String, SecretError> {
        let (program, args) = self.command.split_first().ok_or(SecretError::NoCommand)?;

        tracing::debug!(program = %program, "Running token command");

        let process = Command::new(&**program)
            .args(args.iter().map(|arg| &**arg))
            .output()
            .map_err(|source| SecretError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !process.status.success() {
            return Err(SecretError::Failed {
                program: program.clone(),
                status: process.status,
                stderr: String::from_utf8_lossy(&process.stderr).trim().into(),
            });
        }

        let output = String::from_utf8(process.stdout).map_err(|_| SecretError::InvalidUtf8 {
            program: program.clone(),
        })?;

        let token = output.trim();
        if token.is_empty() {
            return Err(SecretError::Empty {
                program: program.clone(),
            });
        }

        Ok(token.to_owned())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn command(argv: &[&str]) -> CommandSecret {
        let argv = argv.iter().map(|&arg| Box::from(arg)).collect::<Vec<Box<str>>>();
        CommandSecret::new(&argv)
    }

    #[test]
    fn output_is_trimmed() {
        let token = command(&["echo", "  3f1c9b2e-token  "]).resolve().unwrap();
        assert_eq!(token, "3f1c9b2e-token");
    }

    #[test]
    fn arguments_are_not_split_by_a_shell() {
        let token = command(&["printf", "%s", "a b"]).resolve().unwrap();
        assert_eq!(token, "a b");
    }

    #[test]
    fn non_zero_exit_is_an_error() {
        let err = command(&["sh", "-c", "echo locked >&2; exit 3"])
            .resolve()
            .unwrap_err();

        match err {
            SecretError::Failed { program, status, stderr } => {
                assert_eq!(&*program, "sh");
                assert_eq!(status.code(), Some(3));
                assert_eq!(&*stderr, "locked");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_program_is_an_error() {
        let err = command(&["dduckdns-no-such-program"]).resolve().unwrap_err();
        assert!(matches!(err, SecretError::Spawn { .. }));
    }

    #[test]
    fn blank_output_is_an_error() {
        let err = command(&["echo"]).resolve().unwrap_err();
        assert!(matches!(err, SecretError::Empty { .. }));
    }

    #[test]
    fn empty_command_is_an_error() {
        let err = command(&[]).resolve().unwrap_err();
        assert!(matches!(err, SecretError::NoCommand));
    }
}
