//! Scripted mock driver that records every request.

use animatic_core::{GenerateRequest, GenerateResponse, Output, Role};
use animatic_error::{AnimaticResult, ModelsError, ModelsErrorKind};
use animatic_interface::AnimaticDriver;
use animatic_pipeline::{Agent, StageAgents, StageKind};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return this text
    Text(String),
    /// Fail with this model error
    Error(ModelsErrorKind),
}

impl MockResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

/// A request as seen by a mock, flattened to its system and user text.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub model: String,
    pub system: String,
    pub user: String,
}

/// Driver replaying scripted responses in order; the last one repeats.
#[derive(Debug, Clone)]
pub struct MockDriver {
    model: String,
    script: Arc<Mutex<VecDeque<MockResponse>>>,
    log: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockDriver {
    pub fn new(model: impl Into<String>, responses: Vec<MockResponse>) -> Self {
        Self::with_log(model, responses, Arc::new(Mutex::new(Vec::new())))
    }

    pub fn with_log(
        model: impl Into<String>,
        responses: Vec<MockResponse>,
        log: Arc<Mutex<Vec<RecordedCall>>>,
    ) -> Self {
        Self {
            model: model.into(),
            script: Arc::new(Mutex::new(responses.into())),
            log,
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.model == self.model)
            .cloned()
            .collect()
    }

    fn next_response(&self) -> Option<MockResponse> {
        let mut script = self.script.lock().unwrap();
        if script.len() > 1 {
            script.pop_front()
        } else {
            script.front().cloned()
        }
    }
}

#[async_trait]
impl AnimaticDriver for MockDriver {
    async fn generate(&self, req: &GenerateRequest) -> AnimaticResult<GenerateResponse> {
        let text_for = |role: Role| {
            req.messages()
                .iter()
                .filter(|m| m.role == role)
                .map(|m| m.content.clone())
                .collect::<Vec<_>>()
                .join("\n")
        };
        self.log.lock().unwrap().push(RecordedCall {
            model: self.model.clone(),
            system: text_for(Role::System),
            user: text_for(Role::User),
        });

        match self.next_response() {
            Some(MockResponse::Text(text)) => Ok(GenerateResponse::new(vec![Output::Text(text)])),
            Some(MockResponse::Error(kind)) => Err(ModelsError::new(kind).into()),
            None => Err(ModelsError::new(ModelsErrorKind::EmptyOutput(format!(
                "mock '{}' has no scripted response",
                self.model
            )))
            .into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Five mock drivers, one per stage, sharing a single call log.
///
/// Each driver's model name is the stage name, so the log shows call order
/// across stages.
pub struct MockStages {
    log: Arc<Mutex<Vec<RecordedCall>>>,
    agents: StageAgents,
}

impl MockStages {
    pub fn new() -> Self {
        Self {
            log: Arc::new(Mutex::new(Vec::new())),
            agents: StageAgents::new(),
        }
    }

    /// Script one stage.
    pub fn stage(mut self, stage: StageKind, responses: Vec<MockResponse>) -> Self {
        let driver = MockDriver::with_log(stage.to_string(), responses, self.log.clone());
        self.agents.insert(Agent::new(
            stage,
            Arc::new(driver),
            format!("{stage} system prompt"),
        ));
        self
    }

    pub fn agents(&self) -> StageAgents {
        self.agents.clone()
    }

    /// Every call, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.log.lock().unwrap().clone()
    }

    /// Calls made to one stage, in order.
    pub fn calls_for(&self, stage: StageKind) -> Vec<RecordedCall> {
        let name = stage.to_string();
        self.calls().into_iter().filter(|c| c.model == name).collect()
    }

    /// Stage names in call order.
    pub fn sequence(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.model).collect()
    }
}
