use serde::{Deserialize, Serialize};

/// Grammar flavour used to parse a JavaScript-family source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JsLanguageVariant {
    JavaScript,
    Jsx,
    TypeScript,
    Tsx,
}

impl JsLanguageVariant {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "js" | "mjs" | "cjs" => Some(Self::JavaScript),
            "jsx" => Some(Self::Jsx),
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            "tsx" => Some(Self::Tsx),
            _ => None,
        }
    }

    /// Whether the grammar accepts JSX elements
    pub fn is_jsx(self) -> bool {
        matches!(self, Self::Jsx | Self::Tsx)
    }
}

/// A parsed source file together with the text it was parsed from.
///
/// Tree-sitter nodes only carry byte offsets, so every consumer that needs
/// identifier text reads it back out of `source`.
#[derive(Clone, Debug)]
pub struct SourceAst {
    pub tree: tree_sitter::Tree,
    pub source: String,
    pub path: String,
    pub language_variant: JsLanguageVariant,
}
