use std::sync::Mutex;

use async_trait::async_trait;

use crate::answer::Completer;
use crate::{Error, Result};

/// Records prompts and replies with a canned answer
#[derive(Default)]
pub(crate) struct RecordingCompleter {
    pub prompts: Mutex<Vec<String>>,
    pub fail: bool,
}

impl RecordingCompleter {
    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl Completer for RecordingCompleter {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if self.fail {
            return Err(Error::Completion("upstream unavailable".into()));
        }
        Ok(format!("canned answer from {} prompt chars", prompt.chars().count()))
    }

    fn name(&self) -> &str {
        "recording"
    }
}
