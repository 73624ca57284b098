use beacon_chunking::{chunk, token_windows, HeadingChunker};
use beacon_core::config::ChunkingConfig;
use beacon_core::models::Section;
use beacon_tokens::TokenCounter;
use proptest::prelude::*;

fn counter() -> TokenCounter {
    TokenCounter::new(1_000).unwrap()
}

fn sizing() -> impl Strategy<Value = (usize, usize)> {
    (1usize..80).prop_flat_map(|size| (Just(size), 0..size))
}

fn section() -> impl Strategy<Value = Section> {
    (0u8..=4, "[A-Z][a-z]{0,8}", "[a-z ]{0,300}").prop_map(|(level, h, b)| Section::new(level, h, b))
}

proptest! {
    #[test]
    fn windows_cover_the_stream((size, overlap) in sizing(), len in 0usize..2_000) {
        let windows = token_windows(len, size, overlap);
        if len == 0 {
            prop_assert!(windows.is_empty());
        } else {
            prop_assert_eq!(windows[0].start, 0);
            prop_assert_eq!(windows.last().unwrap().end, len);
            for pair in windows.windows(2) {
                prop_assert_eq!(pair[1].start, pair[0].end - overlap);
            }
            for w in &windows {
                prop_assert!(w.end - w.start <= size);
                prop_assert!(w.end > w.start);
            }
        }
    }

    #[test]
    fn flat_text_windows_reconstruct_tokens(text in "[a-z .,]{1,400}", (size, overlap) in sizing()) {
        let counter = counter();
        let chunks = chunk(&counter, &text, None, size, overlap).unwrap();
        if text.trim().is_empty() {
            prop_assert!(chunks.is_empty());
        } else {
            let tokens = counter.encode(&text);
            let mut expected_start = 0;
            for (i, c) in chunks.iter().enumerate() {
                let w = c.window.unwrap();
                prop_assert_eq!(w.start, expected_start);
                prop_assert_eq!(c.token_count, w.end - w.start);
                prop_assert_eq!(&c.text, &counter.decode_lossy(&tokens[w.start..w.end]));
                prop_assert_eq!(c.index, i);
                expected_start = w.end.saturating_sub(overlap);
            }
            prop_assert_eq!(chunks.last().unwrap().window.unwrap().end, tokens.len());
        }
    }

    #[test]
    fn section_chunks_respect_budget(
        sections in prop::collection::vec(section(), 0..12),
        (size, overlap) in sizing(),
    ) {
        let counter = counter();
        let chunker = HeadingChunker::new(counter.clone(), ChunkingConfig::new(size, overlap)).unwrap();
        let text: String = sections.iter().map(Section::text).collect::<Vec<_>>().join("\n\n");
        let chunks = chunker.chunk(&text, Some(&sections));
        for (i, c) in chunks.iter().enumerate() {
            prop_assert_eq!(c.index, i);
            prop_assert!(c.token_count <= size);
            if c.window.is_none() {
                prop_assert_eq!(c.token_count, counter.count(&c.text));
            }
        }
    }

    #[test]
    fn heading_paths_are_ancestor_chains(sections in prop::collection::vec(section(), 1..12)) {
        let counter = counter();
        let chunker = HeadingChunker::new(counter, ChunkingConfig::new(30, 5)).unwrap();
        let text: String = sections.iter().map(Section::text).collect::<Vec<_>>().join("\n\n");
        let headings: std::collections::HashSet<&str> =
            sections.iter().map(|s| s.heading.as_str()).collect();
        for c in chunker.chunk(&text, Some(&sections)) {
            // Levels 0..=4 with strictly increasing levels on the stack.
            prop_assert!(c.heading_path.len() <= 5);
            for h in &c.heading_path {
                prop_assert!(headings.contains(h.as_str()));
            }
        }
    }
}
