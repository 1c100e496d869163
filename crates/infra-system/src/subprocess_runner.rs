// Subprocess runner implementation
// Spawns a child process, waits for it, and captures stdout
use std::collections::HashMap;
use std::process::{Command, Stdio};

use tracing::debug;

use hostq_core::domain::error::CommandError;
use hostq_core::port::{command_line, CommandRunner};

/// Variables passed through to children unless configured otherwise
const DEFAULT_ENV_ALLOWLIST: [&str; 2] = ["PATH", "HOME"];

/// Subprocess runner
///
/// Children get a cleared environment rebuilt from an allowlist, plus
/// `LC_ALL=C` so tool output does not vary with the user's locale.
/// No timeout is applied: a hung tool blocks the query.
pub struct SubprocessRunner {
    env_allowlist: Vec<String>,
}

impl SubprocessRunner {
    /// Create a new subprocess runner
    ///
    /// # Arguments
    /// * `env_allowlist` - Environment variables copied from this process
    ///
    /// # Example
    /// ```ignore
    /// let runner = SubprocessRunner::new(vec!["PATH".to_string()]);
    /// let stdout = runner.run("ip", &["address", "show"])?;
    /// ```
    pub fn new(env_allowlist: Vec<String>) -> Self {
        Self { env_allowlist }
    }

    /// Filter environment variables to allowlist only
    fn filter_env<I>(&self, env: I) -> HashMap<String, String>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        env.into_iter()
            .filter(|(k, _)| self.env_allowlist.contains(k))
            .collect()
    }

    /// Turn process output into stdout or a CommandError
    fn build_result(
        &self,
        command: String,
        output: std::process::Output,
    ) -> Result<String, CommandError> {
        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let message = if stderr.is_empty() {
            match output.status.code() {
                Some(code) => format!("exited with status {}", code),
                None => "terminated by signal".to_string(),
            }
        } else {
            stderr
        };

        Err(CommandError::new(command, message))
    }
}

impl Default for SubprocessRunner {
    fn default() -> Self {
        Self::new(DEFAULT_ENV_ALLOWLIST.iter().map(|s| s.to_string()).collect())
    }
}

impl CommandRunner for SubprocessRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String, CommandError> {
        let command = command_line(program, args);
        debug!(command = %command, "Starting subprocess");

        let output = Command::new(program)
            .args(args)
            .env_clear()
            .envs(self.filter_env(std::env::vars()))
            .env("LC_ALL", "C")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| CommandError::new(command.clone(), e.to_string()))?;

        debug!(
            command = %command,
            exit_code = ?output.status.code(),
            stdout_bytes = output.stdout.len(),
            "Subprocess completed"
        );

        self.build_result(command, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_run_success() {
        let runner = SubprocessRunner::default();

        let stdout = runner.run("echo", &["hello"]).unwrap();

        assert_eq!(stdout.trim(), "hello");
    }

    #[cfg(unix)]
    #[test]
    fn test_run_nonzero_exit_uses_stderr() {
        let runner = SubprocessRunner::default();

        let err = runner
            .run("sh", &["-c", "echo broken >&2; exit 3"])
            .unwrap_err();

        assert_eq!(err.command, "sh -c echo broken >&2; exit 3");
        assert_eq!(err.message, "broken");
    }

    #[cfg(unix)]
    #[test]
    fn test_run_nonzero_exit_without_stderr() {
        let runner = SubprocessRunner::default();

        let err = runner.run("sh", &["-c", "exit 4"]).unwrap_err();

        assert_eq!(err.message, "exited with status 4");
    }

    #[cfg(unix)]
    #[test]
    fn test_locale_is_pinned() {
        let runner = SubprocessRunner::default();

        let stdout = runner.run("sh", &["-c", "echo $LC_ALL"]).unwrap();

        assert_eq!(stdout.trim(), "C");
    }

    #[test]
    fn test_spawn_failure_is_command_error() {
        let runner = SubprocessRunner::default();

        let err = runner
            .run("hostq-definitely-not-installed", &["--version"])
            .unwrap_err();

        assert_eq!(err.command, "hostq-definitely-not-installed --version");
        assert!(!err.message.is_empty());
    }

    #[test]
    fn test_env_filtering() {
        let runner = SubprocessRunner::new(vec!["ALLOWED_VAR".to_string()]);

        let filtered = runner.filter_env(vec![
            ("ALLOWED_VAR".to_string(), "value1".to_string()),
            ("BLOCKED_VAR".to_string(), "value2".to_string()),
        ]);

        assert_eq!(filtered.len(), 1);
        assert!(filtered.contains_key("ALLOWED_VAR"));
        assert!(!filtered.contains_key("BLOCKED_VAR"));
    }
}
