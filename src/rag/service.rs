//! Retrieval Service - build once, then serve read-only k-NN page lookups
//!
//! ```text
//! build:  Extractor → pages → Embedder (batched) → FlatIndex
//! search: query → Embedder::embed_one → FlatIndex::search → page texts
//! ```
//!
//! A service value only exists once every build phase has succeeded, so a
//! partially built index can never be queried.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::embeddings::{Embedder, ModelError};
use crate::extract::{PageRecord, TextExtractor};
use crate::index::{FlatIndex, IndexHandle, SearchResult};

use super::config::RetrievalConfig;
use super::corpus::Corpus;
use super::error::{Result, RetrievalError};

/// A retrieved page with its citation and distance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassageHit {
    pub handle: IndexHandle,
    pub page_number: u32,
    /// Squared L2 distance to the query embedding
    pub distance: f32,
    pub content: String,
}

/// Per-phase build timings in microseconds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildTimings {
    pub extract_us: u64,
    pub embed_us: u64,
    pub index_us: u64,
    pub total_us: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildStats {
    pub pages: usize,
    pub empty_pages: usize,
    pub dimensions: usize,
    pub model_id: String,
    pub timings: BuildTimings,
}

/// Owned retrieval state: corpus, index and the embedder that built it
///
/// All query methods take `&self`; share it across threads behind an `Arc`
/// or a plain reference.
pub struct RetrievalService<E: Embedder> {
    embedder: E,
    corpus: Corpus,
    index: FlatIndex,
    config: RetrievalConfig,
    stats: BuildStats,
}

impl<E: Embedder> RetrievalService<E> {
    /// Extract, embed and index a document
    pub fn build<X>(
        extractor: &X,
        source: &Path,
        embedder: E,
        config: RetrievalConfig,
    ) -> Result<Self>
    where
        X: TextExtractor + ?Sized,
    {
        let start = instant::Instant::now();
        config.validate()?;

        let pages = extractor.extract(source)?;
        let extract_us = start.elapsed().as_micros() as u64;
        log::debug!("Extracted {} pages from {}", pages.len(), source.display());

        let mut service = Self::index_pages(pages, embedder, config)?;
        service.stats.timings.extract_us = extract_us;
        service.stats.timings.total_us = start.elapsed().as_micros() as u64;

        service.log_ready();
        Ok(service)
    }

    /// Embed and index pages that were extracted elsewhere
    pub fn from_pages(
        pages: Vec<PageRecord>,
        embedder: E,
        config: RetrievalConfig,
    ) -> Result<Self> {
        let start = instant::Instant::now();
        config.validate()?;

        let mut service = Self::index_pages(pages, embedder, config)?;
        service.stats.timings.total_us = start.elapsed().as_micros() as u64;

        service.log_ready();
        Ok(service)
    }

    fn index_pages(pages: Vec<PageRecord>, embedder: E, config: RetrievalConfig) -> Result<Self> {
        if pages.is_empty() {
            return Err(RetrievalError::EmptyCorpus);
        }

        let empty_pages = pages.iter().filter(|p| p.content.trim().is_empty()).count();
        if empty_pages > 0 {
            log::warn!(
                "{} of {} pages have no text; keeping them to preserve page order",
                empty_pages,
                pages.len()
            );
        }

        let corpus = Corpus::new(pages);

        let embed_start = instant::Instant::now();
        let embeddings = embed_corpus(&embedder, &corpus, config.batch_size)?;
        let embed_us = embed_start.elapsed().as_micros() as u64;

        let index_start = instant::Instant::now();
        let index = FlatIndex::with_dimension(embedder.dimensions(), embeddings)?;
        let index_us = index_start.elapsed().as_micros() as u64;

        let stats = BuildStats {
            pages: corpus.len(),
            empty_pages,
            dimensions: index.dimension(),
            model_id: embedder.model_id().to_string(),
            timings: BuildTimings {
                embed_us,
                index_us,
                ..Default::default()
            },
        };

        Ok(Self {
            embedder,
            corpus,
            index,
            config,
            stats,
        })
    }

    fn log_ready(&self) {
        log::info!(
            "Retrieval index ready: {} pages, {}d, model {} (embed {}us, index {}us, total {}us)",
            self.stats.pages,
            self.stats.dimensions,
            self.stats.model_id,
            self.stats.timings.embed_us,
            self.stats.timings.index_us,
            self.stats.timings.total_us,
        );
    }

    /// Top-k page texts for a query, closest first
    ///
    /// Never returns an empty vector: when nothing is found the configured
    /// placeholder is returned as the single element.
    pub fn search(&self, query: &str, k: usize) -> Result<Vec<String>> {
        let hits = self.search_hits(query, k)?;

        if hits.is_empty() {
            return Ok(vec![self.config.no_results_marker.clone()]);
        }

        Ok(hits.into_iter().map(|hit| hit.content).collect())
    }

    /// `search` with the configured default k
    pub fn search_default(&self, query: &str) -> Result<Vec<String>> {
        self.search(query, self.config.default_k)
    }

    /// Top-k hits with page numbers and distances (may be empty)
    pub fn search_hits(&self, query: &str, k: usize) -> Result<Vec<PassageHit>> {
        let start = instant::Instant::now();
        let result = self.nearest(query, k)?;

        let hits = resolve_hits(&self.corpus, result)?;

        log::debug!(
            "Search k={} returned {} hits in {}us",
            k,
            hits.len(),
            start.elapsed().as_micros()
        );

        Ok(hits)
    }

    /// Raw (distance, handle) neighbors for a query
    pub fn nearest(&self, query: &str, k: usize) -> Result<SearchResult> {
        if k == 0 {
            return Err(RetrievalError::InvalidK);
        }

        let query_vector = self.embedder.embed_one(query)?;
        Ok(self.index.search(&query_vector, k)?)
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn index(&self) -> &FlatIndex {
        &self.index
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }
}

/// Map neighbors to their pages; a handle with no page is an error
fn resolve_hits(corpus: &Corpus, result: SearchResult) -> Result<Vec<PassageHit>> {
    result
        .into_iter()
        .map(|neighbor| {
            let page = corpus
                .get(neighbor.handle)
                .ok_or(RetrievalError::MissingPage {
                    handle: neighbor.handle,
                    pages: corpus.len(),
                })?;
            Ok(PassageHit {
                handle: neighbor.handle,
                page_number: page.page_number,
                distance: neighbor.distance,
                content: page.content.clone(),
            })
        })
        .collect()
}

/// Embed all page contents in corpus order, `batch_size` pages per call
fn embed_corpus<E: Embedder + ?Sized>(
    embedder: &E,
    corpus: &Corpus,
    batch_size: usize,
) -> Result<Vec<Vec<f32>>> {
    let contents = corpus.contents();
    let mut embeddings = Vec::with_capacity(contents.len());

    for batch in contents.chunks(batch_size.max(1)) {
        let vectors = embedder.embed(batch)?;
        if vectors.len() != batch.len() {
            return Err(ModelError::CountMismatch {
                expected: batch.len(),
                got: vectors.len(),
            }
            .into());
        }
        embeddings.extend(vectors);
    }

    Ok(embeddings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_hits_in_distance_order() {
        let corpus = Corpus::new(vec![PageRecord::new(1, "a"), PageRecord::new(2, "b")]);
        let index = FlatIndex::build(vec![vec![0.0, 0.0], vec![1.0, 0.0]]).unwrap();
        let result = index.search(&[1.0, 0.0], 2).unwrap();

        let hits = resolve_hits(&corpus, result).unwrap();
        assert_eq!(hits[0].content, "b");
        assert_eq!(hits[1].page_number, 1);
    }

    #[test]
    fn test_resolve_hits_rejects_handle_without_page() {
        let corpus = Corpus::new(vec![PageRecord::new(1, "a"), PageRecord::new(2, "b")]);
        let index = FlatIndex::build(vec![vec![5.0], vec![4.0], vec![0.0]]).unwrap();
        let result = index.search(&[0.0], 3).unwrap();

        let err = resolve_hits(&corpus, result).unwrap_err();
        assert!(matches!(err, RetrievalError::MissingPage { handle: 2, pages: 2 }));
    }
}
