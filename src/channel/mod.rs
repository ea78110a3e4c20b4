//! Command channel module
//!
//! Handles:
//! - The `CommandChannel` seam between the driver and a device session
//! - Falling through candidate commands the device rejects
//! - Replaying captured output from a directory (see [`capture`])
//! - Running commands through an external transport program (see [`process`])

use crate::constants::INVALID_COMMAND_MARKER;
use crate::models::ChannelError;

pub mod capture;
pub mod process;

pub use capture::CaptureChannel;
pub use process::ProcessChannel;

/// True when the device refused the command rather than answering it
pub fn is_rejected(output: &str) -> bool {
    output.contains(INVALID_COMMAND_MARKER)
}

/// A session that sends one CLI command and returns its full text output
pub trait CommandChannel {
    fn execute(&mut self, command: &str) -> Result<String, ChannelError>;

    /// Send each candidate in order and return the first output the device
    /// accepted. Transport failures stop the walk immediately.
    fn execute_first_valid(&mut self, commands: &[String]) -> Result<String, ChannelError> {
        let mut last_rejection = None;

        for command in commands {
            log::debug!("sending '{}'", command);
            let output = self.execute(command)?;
            if !is_rejected(&output) {
                return Ok(output);
            }
            log::debug!("device rejected '{}', trying next candidate", command);
            last_rejection = Some(ChannelError::Rejected {
                command: command.clone(),
                output: output.trim().to_string(),
            });
        }

        Err(last_rejection.unwrap_or_else(|| ChannelError::Rejected {
            command: String::new(),
            output: "no candidate commands".to_string(),
        }))
    }
}

impl<C: CommandChannel + ?Sized> CommandChannel for &mut C {
    fn execute(&mut self, command: &str) -> Result<String, ChannelError> {
        (**self).execute(command)
    }
}

impl<C: CommandChannel + ?Sized> CommandChannel for Box<C> {
    fn execute(&mut self, command: &str) -> Result<String, ChannelError> {
        (**self).execute(command)
    }
}
