//! Commands run through an external transport program
//!
//! Each command spawns `<program> <args...> <command>` and takes its stdout,
//! e.g. `ssh -T admin@switch1 "show interfaces"`. Session setup such as
//! authentication and paging belongs to the program.

use std::process::Command;

use super::CommandChannel;
use crate::models::ChannelError;

/// Channel backed by one child process per command
#[derive(Debug, Clone)]
pub struct ProcessChannel {
    program: String,
    args: Vec<String>,
}

impl ProcessChannel {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build from a full argv such as `["ssh", "-T", "admin@switch1"]`
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self::new(program.clone(), args.to_vec()))
    }
}

impl CommandChannel for ProcessChannel {
    fn execute(&mut self, command: &str) -> Result<String, ChannelError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(command)
            .output()
            .map_err(|e| ChannelError::Transport {
                command: command.to_string(),
                reason: format!("failed to run {}: {}", self.program, e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ChannelError::Transport {
                command: command.to_string(),
                reason: format!("{} exited with {}: {}", self.program, output.status, stderr.trim()),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
