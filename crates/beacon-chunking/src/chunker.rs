use beacon_core::config::ChunkingConfig;
use beacon_core::errors::BeaconResult;
use beacon_core::models::{Section, TextChunk};
use beacon_tokens::TokenCounter;
use tracing::debug;

use crate::heading_stack::HeadingStack;
use crate::window::token_windows;

const SECTION_SEPARATOR: &str = "\n\n";

/// Heading-aware chunker.
///
/// Consecutive sections are merged greedily while they fit the token budget.
/// A section that cannot fit on its own is cut into overlapping token windows.
/// Without sections the flat text is windowed directly.
#[derive(Debug, Clone)]
pub struct HeadingChunker {
    counter: TokenCounter,
    config: ChunkingConfig,
    separator_tokens: usize,
}

impl HeadingChunker {
    /// Validates the sizing before any work is done.
    pub fn new(counter: TokenCounter, config: ChunkingConfig) -> BeaconResult<Self> {
        config.validate()?;
        let separator_tokens = counter.count(SECTION_SEPARATOR);
        Ok(Self {
            counter,
            config,
            separator_tokens,
        })
    }

    pub fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    pub fn chunk(&self, text: &str, sections: Option<&[Section]>) -> Vec<TextChunk> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        let mut out = ChunkSink::default();
        match sections {
            Some(sections) if !sections.is_empty() => self.chunk_sections(sections, &mut out),
            _ => self.push_windows(text, Vec::new(), &mut out),
        }
        debug!(
            chunks = out.chunks.len(),
            chunk_size = self.config.chunk_size_tokens,
            "chunked text"
        );
        out.chunks
    }

    fn chunk_sections(&self, sections: &[Section], out: &mut ChunkSink) {
        let budget = self.config.chunk_size_tokens;
        let mut stack = HeadingStack::new();
        let mut pending = Pending::default();

        for section in sections {
            if section.is_blank() {
                continue;
            }
            stack.enter(section);
            let path = stack.path();
            let text = section.text();
            let tokens = self.counter.count_cached(&text);

            if tokens > budget {
                self.flush_at(&mut pending, path.clone(), out);
                self.push_windows(&text, path, out);
                continue;
            }

            let cost = if pending.is_empty() {
                tokens
            } else {
                pending.tokens + self.separator_tokens + tokens
            };
            if cost > budget {
                self.flush_at(&mut pending, path.clone(), out);
                pending.admit(text, tokens, path);
            } else {
                pending.parts.push(text);
                pending.tokens = cost;
                pending.heading_path = path;
            }
        }
        self.flush(&mut pending, out);
    }

    /// Flush tagged with the heading path in force when the flush happens.
    fn flush_at(&self, pending: &mut Pending, heading_path: Vec<String>, out: &mut ChunkSink) {
        if !pending.is_empty() {
            pending.heading_path = heading_path;
        }
        self.flush(pending, out);
    }

    fn flush(&self, pending: &mut Pending, out: &mut ChunkSink) {
        if pending.is_empty() {
            return;
        }
        let text = pending.parts.join(SECTION_SEPARATOR);
        let heading_path = std::mem::take(&mut pending.heading_path);
        pending.parts.clear();
        pending.tokens = 0;

        let token_count = self.counter.count(&text);
        if token_count > self.config.chunk_size_tokens {
            // BPE merges across the joins pushed the buffer over budget.
            self.push_windows(&text, heading_path, out);
        } else {
            out.push(text, token_count, heading_path, None);
        }
    }

    fn push_windows(&self, text: &str, heading_path: Vec<String>, out: &mut ChunkSink) {
        let tokens = self.counter.encode(text);
        for window in token_windows(
            tokens.len(),
            self.config.chunk_size_tokens,
            self.config.overlap_tokens,
        ) {
            let slice = &tokens[window.start..window.end];
            out.push(
                self.counter.decode_lossy(slice),
                slice.len(),
                heading_path.clone(),
                Some(window),
            );
        }
    }
}

/// One-shot form of [`HeadingChunker::chunk`].
pub fn chunk(
    counter: &TokenCounter,
    text: &str,
    sections: Option<&[Section]>,
    chunk_size_tokens: usize,
    overlap_tokens: usize,
) -> BeaconResult<Vec<TextChunk>> {
    let chunker = HeadingChunker::new(
        counter.clone(),
        ChunkingConfig::new(chunk_size_tokens, overlap_tokens),
    )?;
    Ok(chunker.chunk(text, sections))
}

#[derive(Default)]
struct Pending {
    parts: Vec<String>,
    tokens: usize,
    heading_path: Vec<String>,
}

impl Pending {
    fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    fn admit(&mut self, text: String, tokens: usize, heading_path: Vec<String>) {
        self.parts.push(text);
        self.tokens = tokens;
        self.heading_path = heading_path;
    }
}

#[derive(Default)]
struct ChunkSink {
    chunks: Vec<TextChunk>,
}

impl ChunkSink {
    fn push(
        &mut self,
        text: String,
        token_count: usize,
        heading_path: Vec<String>,
        window: Option<beacon_core::models::TokenWindow>,
    ) {
        self.chunks.push(TextChunk {
            index: self.chunks.len(),
            text,
            token_count,
            heading_path,
            window,
        });
    }
}
