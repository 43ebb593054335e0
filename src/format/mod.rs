//! Document formats, dispatched by file extension.
//!
//! A [`FormatHandler`] loads a file into a [`Document`] and writes one back.
//! The [`FormatRegistry`] maps lowercase extensions to handlers.
//!
//! # Example
//!
//! ```no_run
//! use restyle::format::FormatRegistry;
//! use std::path::Path;
//!
//! fn main() -> restyle::Result<()> {
//!     let registry = FormatRegistry::with_defaults();
//!     let doc = registry.load(Path::new("notes.md"))?;
//!     registry.save(&doc, Path::new("notes_styled.md"))?;
//!     Ok(())
//! }
//! ```

mod json;
mod markdown;
mod text;

pub use json::{JsonFormat, JsonHandler};
pub use markdown::MarkdownHandler;
pub use text::TextHandler;

use crate::error::{Error, Result};
use crate::model::Document;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Trait for document format handlers.
///
/// Implement this trait to add support for a new document format.
pub trait FormatHandler: Send + Sync {
    /// Get the supported file extensions for this handler.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["md"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Get the name of this handler.
    fn name(&self) -> &str;

    /// Parse file content into a document.
    fn parse(&self, content: &str) -> Result<Document>;

    /// Serialize a document into file content.
    fn render(&self, doc: &Document) -> Result<String>;

    /// Load a document from a file.
    fn load(&self, path: &Path) -> Result<Document> {
        let content = fs::read_to_string(path)?;
        self.parse(&content)
    }

    /// Write a document to a file.
    fn save(&self, doc: &Document, path: &Path) -> Result<()> {
        let content = self.render(doc)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Check if this handler supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry for format handlers.
pub struct FormatRegistry {
    handlers: HashMap<String, Arc<dyn FormatHandler>>,
    by_name: HashMap<String, Arc<dyn FormatHandler>>,
}

impl FormatRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the built-in handlers (JSON, Markdown, text).
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(JsonHandler::new()));
        registry.register(Arc::new(MarkdownHandler::new()));
        registry.register(Arc::new(TextHandler::new()));
        registry
    }

    /// Register a handler for all its supported extensions.
    ///
    /// A later registration replaces an earlier one for the same extension.
    pub fn register(&mut self, handler: Arc<dyn FormatHandler>) {
        for ext in handler.supported_extensions() {
            self.handlers.insert(ext.to_lowercase(), handler.clone());
        }
        self.by_name.insert(handler.name().to_lowercase(), handler);
    }

    /// Get a handler by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn FormatHandler>> {
        self.handlers.get(&ext.to_lowercase()).cloned()
    }

    /// Get a handler by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn FormatHandler>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.handlers.contains_key(&ext.to_lowercase())
    }

    /// Get all supported extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.handlers.keys().map(|s| s.as_str()).collect();
        exts.sort_unstable();
        exts
    }

    /// Find the handler for a path's extension.
    pub fn for_path(&self, path: &Path) -> Result<Arc<dyn FormatHandler>> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| {
                Error::UnsupportedFormat(format!("{} has no extension", path.display()))
            })?;

        self.get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedFormat(format!("no handler for extension: {}", ext)))
    }

    /// Load a document using the handler for its extension.
    pub fn load(&self, path: &Path) -> Result<Document> {
        self.for_path(path)?.load(path)
    }

    /// Save a document using the handler for the target extension.
    pub fn save(&self, doc: &Document, path: &Path) -> Result<()> {
        self.for_path(path)?.save(doc, path)
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
