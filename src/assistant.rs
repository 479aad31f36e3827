//! QA and quiz request flow.
//!
//! Glues the safety gate, retrieval engine, prompt templates, chat client,
//! and telemetry sink together. The same flow serves the interactive
//! session, the one-shot CLI commands, and the offline evaluation
//! harness.

use anyhow::Result;
use std::time::Instant;

use crate::config::Config;
use crate::engine::RagEngine;
use crate::llm::ChatClient;
use crate::prompts;
use crate::safety;
use crate::telemetry::{log_request, RequestRecord};

/// What the model is asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Qa,
    Quiz,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Qa => "qa",
            Mode::Quiz => "quiz",
        }
    }
}

/// Whether retrieval context is attached to the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pathway {
    Rag,
    None,
}

impl Pathway {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pathway::Rag => "rag",
            Pathway::None => "none",
        }
    }
}

/// Why the safety gate rejected an input. Rejected requests make no
/// network call and write no telemetry record.
#[derive(Debug, Clone)]
pub enum Refusal {
    TooLong { limit: usize },
    Injection { pattern: &'static str },
}

impl Refusal {
    /// Canonical refusal text. The injection wording is stable because
    /// the evaluation suite asserts on it.
    pub fn message(&self) -> String {
        match self {
            Refusal::TooLong { limit } => format!(
                "[Error] Input is too long (>{} characters). Please shorten your question.",
                limit
            ),
            Refusal::Injection { .. } => {
                "I cannot follow instructions that try to override my safety rules.".to_string()
            }
        }
    }
}

/// A successful chat reply with its measured cost.
#[derive(Debug, Clone)]
pub struct Response {
    pub reply: String,
    pub latency_sec: f64,
    pub tokens: Option<u64>,
}

/// Outcome of one request: either the gate refused the input, or the
/// model answered.
#[derive(Debug, Clone)]
pub enum RequestOutcome {
    Refused(Refusal),
    Answered(Response),
}

/// The assembled application: retrieval index, chat client, and config.
pub struct Assistant {
    engine: RagEngine,
    chat: ChatClient,
    config: Config,
}

impl Assistant {
    /// Build the retrieval index and both API clients. Fails fast on a
    /// missing API key, an unreadable notes directory, or any embedding
    /// failure during ingestion.
    pub fn new(config: Config) -> Result<Self> {
        let engine = RagEngine::build(&config)?;
        let chat = ChatClient::new(&config.openai)?;
        Ok(Self {
            engine,
            chat,
            config,
        })
    }

    pub fn engine(&self) -> &RagEngine {
        &self.engine
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run one request through gate, retrieval, chat, and telemetry.
    ///
    /// Safety rejections come back as `Ok(Refused(..))`. A retrieval or
    /// chat failure is an `Err`; chat failures are logged to telemetry
    /// before propagating, retrieval failures happen before the chat
    /// timer starts and are not logged.
    pub fn run(&self, mode: Mode, pathway: Pathway, user_text: &str) -> Result<RequestOutcome> {
        if safety::input_too_long(user_text, self.config.safety.max_input_chars) {
            return Ok(RequestOutcome::Refused(Refusal::TooLong {
                limit: self.config.safety.max_input_chars,
            }));
        }
        if let Some(pattern) = safety::detect_injection(user_text) {
            return Ok(RequestOutcome::Refused(Refusal::Injection { pattern }));
        }

        let context = match pathway {
            Pathway::Rag => {
                let docs = self
                    .engine
                    .search(user_text, self.config.retrieval.top_k)?;
                prompts::format_context(&docs)
            }
            Pathway::None => String::new(),
        };

        let system = prompts::system_prompt();
        let user = match mode {
            Mode::Qa => prompts::qa_prompt(user_text, &context),
            Mode::Quiz => prompts::quiz_prompt(user_text, &context),
        };

        let start = Instant::now();
        match self.chat.chat(&system, &user) {
            Ok(reply) => {
                let latency_sec = start.elapsed().as_secs_f64();
                let mut record = RequestRecord::new(pathway.as_str(), mode.as_str(), latency_sec);
                record.tokens = reply.total_tokens;
                self.write_telemetry(&record);

                Ok(RequestOutcome::Answered(Response {
                    reply: reply.content,
                    latency_sec,
                    tokens: reply.total_tokens,
                }))
            }
            Err(e) => {
                let latency_sec = start.elapsed().as_secs_f64();
                let mut record = RequestRecord::new(pathway.as_str(), mode.as_str(), latency_sec);
                record.error = Some(e.to_string());
                self.write_telemetry(&record);
                Err(e)
            }
        }
    }

    /// Telemetry failures must not mask the request result; warn and move on.
    fn write_telemetry(&self, record: &RequestRecord) {
        if let Err(e) = log_request(&self.config.telemetry.log_path, record) {
            eprintln!("warning: failed to write telemetry record: {}", e);
        }
    }
}
