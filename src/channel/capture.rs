//! Replay of captured command output
//!
//! A capture directory holds one text file per command, named after the
//! command with spaces and slashes replaced by underscores:
//! `show system stack-unit 0` is read from `show_system_stack-unit_0.txt`.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::CommandChannel;
use crate::constants::INVALID_COMMAND_RESPONSE;
use crate::models::ChannelError;

/// File name a command's output is captured under
pub fn capture_file_name(command: &str) -> String {
    let stem: String = command
        .trim()
        .chars()
        .map(|c| if c == ' ' || c == '/' { '_' } else { c })
        .collect();
    format!("{}.txt", stem)
}

/// Channel that answers from a directory of captured output
#[derive(Debug, Clone)]
pub struct CaptureChannel {
    dir: PathBuf,
}

impl CaptureChannel {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl CommandChannel for CaptureChannel {
    fn execute(&mut self, command: &str) -> Result<String, ChannelError> {
        let path = self.dir.join(capture_file_name(command));
        match fs::read_to_string(&path) {
            Ok(text) => Ok(text),
            // Nothing captured: answer the way the device does for commands it lacks
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("no capture at {}", path.display());
                Ok(INVALID_COMMAND_RESPONSE.to_string())
            }
            Err(source) => Err(ChannelError::Io {
                command: command.to_string(),
                source,
            }),
        }
    }
}
