//! Check, render and dump expand trees described as JSON

use super::{read_tree, CliError};
use crate::ast::{ExpandTermToken, ExpandToken, QueryTokenKind};
use crate::normalize::ExpandTreeNormalizer;
use crate::output::{to_json, to_query_text_with, RenderOptions};
use crate::visitor::SyntacticTreeVisitor;
use log::debug;

/// Options shared by the CLI commands
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// JSON description of the expand clause
    pub tree: String,
    /// Merge terms that expand the same navigation path
    pub normalize: bool,
    /// Text rendering settings
    pub render: RenderOptions,
}

/// Size of an expand tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TreeSummary {
    /// Expand terms at every level
    pub terms: usize,
    /// Deepest chain of nested expands, 0 for an empty clause
    pub depth: usize,
}

/// Counts terms and nesting depth by walking nested expands.
#[derive(Debug, Default)]
pub struct TreeStats;

impl SyntacticTreeVisitor for TreeStats {
    type Output = TreeSummary;

    fn visit_unsupported(&mut self, _kind: QueryTokenKind) -> TreeSummary {
        TreeSummary::default()
    }

    fn visit_expand(&mut self, token: &ExpandToken) -> TreeSummary {
        token
            .iter()
            .map(|term| term.accept(self))
            .fold(TreeSummary::default(), |acc, s| TreeSummary {
                terms: acc.terms + s.terms,
                depth: acc.depth.max(s.depth),
            })
    }

    fn visit_expand_term(&mut self, token: &ExpandTermToken) -> TreeSummary {
        let nested = token
            .expand_option()
            .map(|expand| expand.accept(self))
            .unwrap_or_default();
        TreeSummary {
            terms: nested.terms + 1,
            depth: nested.depth + 1,
        }
    }
}

fn load(options: &CheckOptions) -> Result<ExpandToken, CliError> {
    if options.tree.trim().is_empty() {
        return Err(CliError::NoInput);
    }
    let tree = read_tree(&options.tree)?;
    debug!("loaded expand clause with {} top-level term(s)", tree.len());
    // JSON paths are written in reading order, so only the combining pass applies.
    if options.normalize {
        Ok(ExpandTreeNormalizer::new().combine_terms(tree))
    } else {
        Ok(tree)
    }
}

/// Build the tree and summarize it.
pub fn execute_check(options: &CheckOptions) -> Result<TreeSummary, CliError> {
    let tree = load(options)?;
    Ok(tree.accept(&mut TreeStats))
}

/// Build the tree and render it as `$expand=` text.
pub fn execute_render(options: &CheckOptions) -> Result<String, CliError> {
    let tree = load(options)?;
    Ok(to_query_text_with(&tree, options.render))
}

/// Build the tree and render it as structural JSON.
pub fn execute_dump(options: &CheckOptions) -> Result<serde_json::Value, CliError> {
    let tree = load(options)?;
    Ok(to_json(&tree))
}
