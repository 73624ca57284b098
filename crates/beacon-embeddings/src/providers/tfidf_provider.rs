//! Hashed term-frequency provider.
//!
//! Terms are hashed into a fixed number of signed buckets and weighted by
//! sublinear term frequency. Deterministic, dependency-free, and good enough
//! to exercise the full retrieval path offline.

use std::collections::HashMap;

use beacon_core::errors::BeaconResult;
use beacon_core::traits::IEmbeddingProvider;

use crate::vectors::l2_normalize;

pub struct TfIdfProvider {
    dimensions: usize,
    model_id: String,
}

impl TfIdfProvider {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
            model_id: format!("tfidf-hash-{dimensions}"),
        }
    }

    /// FNV-1a bucket; the top bit of the hash picks the sign.
    fn bucket(&self, term: &str) -> (usize, f32) {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325;
        for b in term.as_bytes() {
            h ^= u64::from(*b);
            h = h.wrapping_mul(0x0100_0000_01b3);
        }
        let sign = if h >> 63 == 0 { 1.0 } else { -1.0 };
        ((h % self.dimensions as u64) as usize, sign)
    }

    /// Lowercased alphanumeric runs. Runs of non-ASCII letters (CJK text has no
    /// spaces) contribute overlapping character bigrams instead.
    fn terms(text: &str) -> Vec<String> {
        let mut terms = Vec::new();
        for run in text.split(|c: char| !c.is_alphanumeric()) {
            if run.is_empty() {
                continue;
            }
            if run.is_ascii() {
                if run.len() >= 2 {
                    terms.push(run.to_ascii_lowercase());
                }
                continue;
            }
            let chars: Vec<char> = run.to_lowercase().chars().collect();
            if chars.len() == 1 {
                terms.push(chars[0].to_string());
            }
            terms.extend(chars.windows(2).map(|w| w.iter().collect::<String>()));
        }
        terms
    }

    fn vector(&self, text: &str) -> Vec<f32> {
        let mut tf: HashMap<String, u32> = HashMap::new();
        for term in Self::terms(text) {
            *tf.entry(term).or_default() += 1;
        }

        let mut v = vec![0.0f32; self.dimensions];
        for (term, count) in &tf {
            let weight = 1.0 + (*count as f32).ln();
            // Longer terms are rarer; a cheap stand-in for document frequency.
            let idf = 1.0 + (term.chars().count() as f32).ln();
            let (i, sign) = self.bucket(term);
            v[i] += sign * weight * idf;
        }
        l2_normalize(&mut v);
        v
    }
}

impl IEmbeddingProvider for TfIdfProvider {
    fn embed_batch(&self, texts: &[String]) -> BeaconResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.vector(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn name(&self) -> &str {
        "tfidf"
    }

    fn is_available(&self) -> bool {
        true
    }
}
