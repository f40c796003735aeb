//! TypeScript/JavaScript source code analysis
//!
//! Parses JS/TS/JSX/TSX with tree-sitter and walks the tree once to collect
//! structural facts:
//!
//! - exported functions, classes, components and module variables
//! - the import table
//! - cyclomatic/cognitive counters
//! - behavioural pattern flags (async, hooks, API calls, validation, domain context)
//!
//! # Example
//!
//! ```ignore
//! use testforge::analyzers::typescript::TypeScriptAnalyzer;
//! use testforge::analyzers::FactExtractor;
//!
//! let facts = TypeScriptAnalyzer::new().extract(source_code, "src/utils/helpers.ts")?;
//! ```

pub mod dependencies;
pub mod parser;
pub mod visitor;

use crate::analyzers::FactExtractor;
use crate::core::{AnalysisMode, CodeFacts};
use crate::errors::Result;

/// AST-backed fact extractor
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptAnalyzer;

impl TypeScriptAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl FactExtractor for TypeScriptAnalyzer {
    fn mode(&self) -> AnalysisMode {
        AnalysisMode::Ast
    }

    fn extract(&self, source: &str, path: &str) -> Result<CodeFacts> {
        let ast = parser::parse_source(source, path)?;
        Ok(visitor::walk(&ast))
    }
}
