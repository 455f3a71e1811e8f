//! # termdown
//!
//! Render HTML documents as styled, wrapped text for a terminal.
//!
//! The heavy lifting lives in [`termdown_core`]: a tree renderer that turns
//! a document tree into styled text and a layout pass that wraps it to a
//! column width. This crate adds what sits around that pipeline:
//!
//! - **HTML parsing** into the document tree (feature `html`, on by default)
//! - **Configuration** loaded from TOML: theme entries and layout settings
//! - **Built-in pages** for the start screen and for failures
//! - [`TermdownService`], which ties theme, options and layout together
//!
//! ## Example (Node-based)
//!
//! ```rust
//! use termdown::{Node, NodeKind, TermdownService};
//!
//! let service = TermdownService::new();
//!
//! let mut h1 = Node::element(NodeKind::H1);
//! h1.add_child(Node::text("Hello World"));
//!
//! let text = service.render_to_width(&Node::root(h1), 80);
//! assert!(text.contains("Hello World"));
//! ```
//!
//! ## Example (HTML string)
//!
//! ```rust
//! use termdown::TermdownService;
//!
//! let service = TermdownService::new();
//! let text = service.render_html("<ul><li>one</li><li>two</li></ul>", 80);
//! assert!(text.contains("• one"));
//! ```

pub mod config;
mod document;
#[cfg(feature = "html")]
pub mod html;
pub mod pages;
mod service;

use std::path::PathBuf;

pub use config::Config;
pub use document::Document;
#[cfg(feature = "html")]
pub use html::parse_html;
pub use service::TermdownService;
pub use termdown_core::{
    display_width, strip_ansi, Color, Decoration, GapLimit, Node, NodeKind, NoStyles,
    RenderOptions, StyleResolver, Theme,
};

/// Error type for termdown operations
#[derive(Debug, thiserror::Error)]
pub enum TermdownError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid colour value: {0:?}")]
    InvalidColor(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, TermdownError>;
