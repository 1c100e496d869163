// Command Execution Port
// Abstraction for running an external program and capturing its output

use crate::domain::error::CommandError;

/// Runs external programs to completion
///
/// Implementations:
/// - SubprocessRunner (infra-system): spawns a real child process
/// - MockCommandRunner: canned output for tests
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` and return its captured stdout
    ///
    /// # Errors
    /// CommandError if the program cannot be started or exits unsuccessfully.
    /// `CommandError::command` carries the full command line.
    fn run(&self, program: &str, args: &[&str]) -> Result<String, CommandError>;
}

/// "ip address show"
pub fn command_line(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Mock runner with canned per-program responses
    ///
    /// Programs without a response fail with "command not found".
    #[derive(Clone, Default)]
    pub struct MockCommandRunner {
        responses: Arc<Mutex<HashMap<String, Result<String, String>>>>,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl MockCommandRunner {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_output(self, program: impl Into<String>, stdout: impl Into<String>) -> Self {
            self.responses
                .lock()
                .unwrap()
                .insert(program.into(), Ok(stdout.into()));
            self
        }

        pub fn with_failure(self, program: impl Into<String>, message: impl Into<String>) -> Self {
            self.responses
                .lock()
                .unwrap()
                .insert(program.into(), Err(message.into()));
            self
        }

        /// Command lines run so far, in order
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl CommandRunner for MockCommandRunner {
        fn run(&self, program: &str, args: &[&str]) -> Result<String, CommandError> {
            let command = command_line(program, args);
            self.calls.lock().unwrap().push(command.clone());

            match self.responses.lock().unwrap().get(program) {
                Some(Ok(stdout)) => Ok(stdout.clone()),
                Some(Err(message)) => Err(CommandError::new(command, message.clone())),
                None => Err(CommandError::new(command, "command not found")),
            }
        }
    }
}
