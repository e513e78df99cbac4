use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;

use crate::llm::{GenerationParams, LlmClient};

/// LLM fake that replays scripted outputs in order and records the prompts
/// it was given. An unscripted call fails the request, which doubles as an
/// assertion that a pipeline stage was never reached.
pub struct ScriptedLlm {
    outputs: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedLlm {
    pub fn new(outputs: &[&str]) -> Self {
        Self {
            outputs: Mutex::new(outputs.iter().map(|output| output.to_string()).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().expect("prompt lock").len()
    }

    pub fn prompt(&self, index: usize) -> String {
        self.prompts.lock().expect("prompt lock")[index].clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn complete(&self, prompt: &str, _params: GenerationParams) -> Result<String> {
        self.prompts.lock().expect("prompt lock").push(prompt.to_string());
        match self.outputs.lock().expect("output lock").pop_front() {
            Some(output) => Ok(output),
            None => bail!("scripted llm exhausted: unexpected generation call"),
        }
    }
}
