//! Note ingestion and the in-memory retrieval index.
//!
//! [`RagEngine::build`] discovers `*.md` and `*.txt` files directly under
//! the notes directory, chunks each file, embeds every chunk, and keeps
//! two index-aligned vectors: chunk texts and their embeddings. The build
//! is eager and one-shot; the index is immutable for the process lifetime
//! and rebuilt from scratch on every run.
//!
//! Queries are a full linear scan: the query is embedded once, scored
//! against every stored vector, and the top-k chunks come back ranked.
//! Discovered paths are sorted so index order, and therefore tie-breaking,
//! is reproducible.

use anyhow::{bail, Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::chunk::chunk_text;
use crate::config::Config;
use crate::embedding::{cosine_similarity, EmbeddingClient};

/// File patterns recognized as notes.
const NOTE_GLOBS: &[&str] = &["*.md", "*.txt"];

/// In-memory retrieval index over a notes corpus.
///
/// `chunks` and `vectors` are index-aligned: position `i` of one
/// corresponds to position `i` of the other. All vectors come from the
/// same embedding model, so they share one dimensionality.
pub struct RagEngine {
    chunks: Vec<String>,
    vectors: Vec<Vec<f32>>,
    files_ingested: usize,
    embedder: EmbeddingClient,
}

impl RagEngine {
    /// Ingest the notes directory and build the index.
    ///
    /// An unreadable file or a failed embedding call aborts the whole
    /// build. An empty corpus is not an error; the engine comes up with
    /// an empty index and every search returns no results.
    pub fn build(config: &Config) -> Result<Self> {
        let embedder = EmbeddingClient::new(&config.openai)?;
        let paths = discover_notes(&config.notes.dir)?;

        let mut chunks = Vec::new();
        let mut vectors = Vec::new();

        for path in &paths {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read note file: {}", path.display()))?;

            for chunk in chunk_text(&text, config.chunking.max_chars) {
                let vector = embedder.embed(&chunk)?;
                chunks.push(chunk);
                vectors.push(vector);
            }
        }

        Ok(Self {
            chunks,
            vectors,
            files_ingested: paths.len(),
            embedder,
        })
    }

    /// Number of chunks in the index.
    pub fn num_chunks(&self) -> usize {
        self.chunks.len()
    }

    /// Number of note files ingested at build time.
    pub fn num_files(&self) -> usize {
        self.files_ingested
    }

    /// Return the `min(k, n)` most relevant chunks for `query`, best first.
    pub fn search(&self, query: &str, k: usize) -> Result<Vec<String>> {
        Ok(self
            .search_scored(query, k)?
            .into_iter()
            .map(|(chunk, _)| chunk)
            .collect())
    }

    /// Like [`search`](Self::search), but keeps the similarity score per
    /// chunk. Used by the debug CLI and the evaluation output.
    ///
    /// `k == 0` or an empty index short-circuits to an empty result
    /// without touching the embedding service.
    pub fn search_scored(&self, query: &str, k: usize) -> Result<Vec<(String, f32)>> {
        if k == 0 || self.chunks.is_empty() {
            return Ok(Vec::new());
        }

        let query_vec = self.embedder.embed(query)?;
        let ranked = rank_vectors(&query_vec, &self.vectors, k);

        Ok(ranked
            .into_iter()
            .map(|(i, score)| (self.chunks[i].clone(), score))
            .collect())
    }
}

/// Score `query` against every stored vector and return the top `k`
/// (index, score) pairs in non-increasing score order. The sort is
/// stable, so equal scores keep insertion order.
pub fn rank_vectors(query: &[f32], vectors: &[Vec<f32>], k: usize) -> Vec<(usize, f32)> {
    let mut scored: Vec<(usize, f32)> = vectors
        .iter()
        .map(|v| cosine_similarity(query, v))
        .enumerate()
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(k);
    scored
}

/// Discover note files directly under `dir` (non-recursive), sorted by
/// path for a deterministic index order.
pub fn discover_notes(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        bail!("Notes directory does not exist: {}", dir.display());
    }

    let include_set = build_globset(NOTE_GLOBS)?;
    let mut paths = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if include_set.is_match(&name) {
            paths.push(entry.into_path());
        }
    }

    paths.sort();
    Ok(paths)
}

fn build_globset(patterns: &[&str]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
