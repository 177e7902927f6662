//! In-memory `TextGenerator` for tests. Records every request it receives.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::analysis::request::GenerationRequest;
use crate::llm_client::{LlmError, TextGenerator};

type Reply = Box<dyn Fn() -> Result<String, LlmError> + Send + Sync>;

pub struct ScriptedGenerator {
    reply: Reply,
    calls: Mutex<Vec<[String; 3]>>,
}

impl ScriptedGenerator {
    pub fn replying(text: &str) -> Self {
        let text = text.to_string();
        Self::with_reply(Box::new(move || Ok(text.clone())))
    }

    pub fn failing(error: impl Fn() -> LlmError + Send + Sync + 'static) -> Self {
        Self::with_reply(Box::new(move || Err(error())))
    }

    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every request received so far, as owned `[instruction, job description, resume]`.
    pub fn calls(&self) -> Vec<[String; 3]> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        self.calls
            .lock()
            .unwrap()
            .push(request.parts().map(str::to_string));
        (self.reply)()
    }
}
