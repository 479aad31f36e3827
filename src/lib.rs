//! # StudyBuddy
//!
//! A retrieval-augmented study assistant for personal notes.
//!
//! StudyBuddy ingests a directory of markdown and plain-text notes, chunks
//! and embeds them into an in-memory index, and answers study questions or
//! generates quiz content by retrieving the most relevant passages and
//! forwarding them, together with the user's query, to a chat model.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────┐   ┌──────────────┐   ┌────────────────┐
//! │ notes dir │──▶│   Pipeline   │──▶│   RagEngine    │
//! │ *.md *.txt│   │ Chunk+Embed  │   │ chunks+vectors │
//! └───────────┘   └──────────────┘   └──────┬─────────┘
//!                                           │ top-k
//!                      ┌────────────────────┤
//!                      ▼                    ▼
//!                 ┌──────────┐        ┌──────────┐
//!                 │   CLI    │        │   Eval   │
//!                 │ (buddy)  │        │ harness  │
//!                 └──────────┘        └──────────┘
//! ```
//!
//! The index is rebuilt from source files on every run. There is no
//! persistence, no incremental update, and no approximate search: the
//! corpus is small enough that a full linear scan per query is the
//! simplest correct design.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`chunk`] | Word-boundary text chunking |
//! | [`embedding`] | OpenAI embeddings client + cosine similarity |
//! | [`engine`] | Note discovery, ingestion, in-memory retrieval index |
//! | [`llm`] | OpenAI chat-completions client |
//! | [`prompts`] | Prompt templates and retrieval-context formatting |
//! | [`safety`] | Input length and prompt-injection gate |
//! | [`telemetry`] | Append-only JSON request log |
//! | [`assistant`] | QA/quiz request flow |
//! | [`eval`] | Offline evaluation harness |
//! | [`repl`] | Interactive menu loop |
//! | [`style`] | TTY-gated ANSI colors |

pub mod assistant;
pub mod chunk;
pub mod config;
pub mod embedding;
pub mod engine;
pub mod eval;
pub mod llm;
pub mod prompts;
pub mod repl;
pub mod safety;
pub mod style;
pub mod telemetry;
