//! Scripted [`ProcessRunner`] for exercising the tool wrappers without
//! spawning anything

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use super::error::ToolError;
use super::runner::{ProcessRunner, ToolCommand, ToolOutput};

/// Replies are queued per program. Once a program's queue is empty every
/// further call succeeds with no output.
#[derive(Default)]
pub struct ScriptedRunner {
    replies: Mutex<HashMap<String, VecDeque<ToolOutput>>>,
    calls: Mutex<Vec<ToolCommand>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, program: &str, code: i32, stderr: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .entry(program.to_string())
            .or_default()
            .push_back(ToolOutput {
                code: Some(code),
                stdout: String::new(),
                stderr: stderr.to_string(),
            });
        self
    }

    pub fn calls(&self) -> Vec<ToolCommand> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, program: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.program == program)
            .count()
    }
}

#[async_trait]
impl ProcessRunner for ScriptedRunner {
    async fn run(&self, command: ToolCommand) -> Result<ToolOutput, ToolError> {
        let reply = self
            .replies
            .lock()
            .unwrap()
            .get_mut(&command.program)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| ToolOutput::exited(0));
        self.calls.lock().unwrap().push(command);
        Ok(reply)
    }
}
