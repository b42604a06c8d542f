//! Transformation entry points.
//!
//! A [`TransformEngine`] couples an [`EngineConfig`] with a shared
//! [`ParseCache`]. Every call works on a private copy of the cached tree:
//! locate, mutate, print, validate, then store the re-parsed output so the
//! next call on the same file hits the cache.

use std::sync::Arc;

use stitch_syntax::{LineIndex, ParseCache, PrinterKind, SourceTree, render_checked};
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::data_source;
use crate::element::ElementEntry;
use crate::error::{EngineError, ErrorKind};
use crate::locator::ElementLocator;
use crate::mutate;
use crate::request::{
    BatchTransformRequest, BatchTransformResult, ChangeRecord, LocatorCriteria, NodeInfo,
    Operation, Strategy, TransformRequest, TransformResult,
};

const ENGINE_TARGET: &str = "stitch_engine::engine";

/// Locates and edits elements in markup-in-code source files.
#[derive(Debug, Clone)]
pub struct TransformEngine {
    config: EngineConfig,
    cache: Arc<ParseCache>,
}

impl Default for TransformEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default(), Arc::new(ParseCache::new()))
    }
}

impl TransformEngine {
    /// Creates an engine sharing `cache` with any other holder of it.
    #[must_use]
    pub const fn new(config: EngineConfig, cache: Arc<ParseCache>) -> Self {
        Self { config, cache }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the parse cache.
    #[must_use]
    pub fn cache(&self) -> &ParseCache {
        &self.cache
    }

    /// Applies one edit.
    ///
    /// Failures are reported in the result; the request's source text is
    /// never modified.
    #[must_use]
    pub fn transform(&self, request: &TransformRequest) -> TransformResult {
        let outcome = self.try_transform(
            &request.source_text,
            &request.file_path,
            &request.locator,
            &request.operation,
        );
        match outcome {
            Ok((text, changes, strategy)) => {
                debug!(
                    target: ENGINE_TARGET,
                    file = %request.file_path,
                    operation = request.operation.name(),
                    %strategy,
                    changes = changes.len(),
                    "transform applied"
                );
                TransformResult::succeeded(text, changes, strategy)
            }
            Err(err) => {
                debug!(
                    target: ENGINE_TARGET,
                    file = %request.file_path,
                    operation = request.operation.name(),
                    kind = %err.kind(),
                    error = %err,
                    "transform failed"
                );
                TransformResult::failed(&err)
            }
        }
    }

    /// Applies `request.edits` in order, each to the previous edit's output.
    ///
    /// Stops at the first failure; earlier edits stay applied in
    /// `new_source_text`.
    #[must_use]
    pub fn batch(&self, request: &BatchTransformRequest) -> BatchTransformResult {
        let mut current = request.source_text.clone();
        let mut results = Vec::with_capacity(request.edits.len());
        let mut failed_at = None;
        for (index, edit) in request.edits.iter().enumerate() {
            let result = self.transform(&TransformRequest {
                source_text: current.clone(),
                file_path: request.file_path.clone(),
                locator: edit.locator.clone(),
                operation: edit.operation.clone(),
            });
            let succeeded = result.success;
            if let Some(text) = &result.new_source_text {
                current.clone_from(text);
            }
            results.push(result);
            if !succeeded {
                failed_at = Some(index);
                break;
            }
        }
        debug!(
            target: ENGINE_TARGET,
            file = %request.file_path,
            edits = request.edits.len(),
            applied = results.iter().filter(|result| result.success).count(),
            "batch finished"
        );
        BatchTransformResult {
            success: failed_at.is_none(),
            new_source_text: current,
            results,
            failed_at,
        }
    }

    /// Lists every named element of `source`, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Parse`] when `source` is malformed.
    pub fn find_nodes(&self, source: &str, file_path: &str) -> Result<Vec<NodeInfo>, EngineError> {
        let tree = self.cache.parse(source, file_path)?;
        let lines = LineIndex::new(source);
        let locator = ElementLocator::new(&tree, source, &self.config);
        Ok(locator
            .elements()
            .iter()
            .map(|entry| node_info(entry, source, &lines))
            .collect())
    }

    /// Drops the cached tree for `file_path`. Returns whether one existed.
    #[must_use = "a false return means nothing was cached for the file"]
    pub fn invalidate(&self, file_path: &str) -> bool {
        self.cache.invalidate(file_path)
    }

    /// Drops every cached tree.
    pub fn clear(&self) {
        self.cache.clear();
    }

    fn try_transform(
        &self,
        source: &str,
        file_path: &str,
        criteria: &LocatorCriteria,
        operation: &Operation,
    ) -> Result<(String, Vec<ChangeRecord>, Strategy), EngineError> {
        let mut tree = self.cache.parse(source, file_path)?;
        let located = ElementLocator::new(&tree, source, &self.config).locate(criteria);
        let (changes, strategy) = match located {
            Ok((path, strategy)) => {
                let changes = mutate::apply(&mut tree, &path, operation, &self.config)?;
                (changes, strategy)
            }
            Err(err) => {
                let change = self.edit_data_source(&mut tree, criteria, operation, err)?;
                (vec![change], Strategy::DataSource)
            }
        };

        let rendered = render_checked(&tree)?;
        if rendered.printer == PrinterKind::Fallback {
            warn!(
                target: ENGINE_TARGET,
                file = file_path,
                "edited source was reformatted by the fallback printer"
            );
        }
        self.cache.store(file_path, &rendered.text, rendered.tree);
        Ok((rendered.text, changes, strategy))
    }

    /// Retries a text edit against string literals after markup lookup
    /// failed, returning `err` when that is not possible.
    fn edit_data_source(
        &self,
        tree: &mut SourceTree,
        criteria: &LocatorCriteria,
        operation: &Operation,
        err: EngineError,
    ) -> Result<ChangeRecord, EngineError> {
        let (Operation::Text { text }, Some(hint)) = (operation, criteria.by_text.as_ref()) else {
            return Err(err);
        };
        if err.kind() != ErrorKind::NodeNotFound || !self.config.data_source.enabled {
            return Err(err);
        }
        let Some(found) = data_source::find_literal(tree, &hint.original, &self.config) else {
            return Err(err);
        };
        data_source::apply_literal_edit(tree, &found, text, &self.config)
    }
}

fn node_info(entry: &ElementEntry, source: &str, lines: &LineIndex) -> NodeInfo {
    let (line, column) = entry
        .span
        .map_or((0, 0), |span| start_position(source, lines, span.start_byte()));
    NodeInfo {
        path: entry.path.to_string(),
        stable_id: entry.stable_id.clone(),
        element_name: entry.name.clone(),
        attributes: entry.attributes.clone(),
        text: entry.text.clone(),
        child_count: entry.child_count,
        line,
        column,
        depth: entry.depth,
    }
}

/// One-based line and zero-based UTF-16 column of `offset`.
fn start_position(source: &str, lines: &LineIndex, offset: usize) -> (u32, u32) {
    let row = lines.line_of(offset);
    let column = lines
        .line_start(row)
        .and_then(|start| source.get(start..offset))
        .map_or(0, |prefix| prefix.encode_utf16().count());
    (
        u32::try_from(row.saturating_add(1)).unwrap_or(u32::MAX),
        u32::try_from(column).unwrap_or(u32::MAX),
    )
}
