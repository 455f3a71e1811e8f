//! termdown-core - document tree rendering and terminal line layout
//!
//! This crate provides the document tree and the two-stage pipeline that
//! turns it into text for a character-grid terminal. It is used by
//! `termdown` (HTML parsing, configuration, service facade) and by the
//! `termdown` command line tool.
//!
//! # Architecture
//!
//! ```text
//!                ┌───────────────┐   styled text   ┌──────────────┐
//! Document Tree ▶│ Tree Renderer │ ──────────────▶ │ Line Layout  │ ──▶ final text
//!                └───────────────┘                 └──────────────┘
//!                        ▲                          width, gap limit
//!                  StyleResolver
//! ```
//!
//! Both stages are pure functions of their inputs.
//!
//! # Example
//!
//! ```rust
//! use termdown_core::{render, wrap, Node, NodeKind, NoStyles, RenderOptions};
//!
//! let mut list = Node::element(NodeKind::OrderedList);
//! for text in ["First", "Second"] {
//!     let mut item = Node::element(NodeKind::ListItem);
//!     item.add_child(Node::text(text));
//!     list.add_child(item);
//! }
//!
//! let raw = render(&Node::root(list), &NoStyles, &RenderOptions::default());
//! let text = wrap(&raw, 40, 3);
//! assert!(text.contains("1. First\n  2. Second"));
//! ```

pub mod ansi;
mod layout;
pub mod node;
mod options;
mod render;
pub mod style;

pub use ansi::{display_width, is_visually_blank, strip_ansi, trim_end_visible};
pub use layout::wrap;
pub use node::{Element, Node, NodeKind};
pub use options::{GapLimit, RenderOptions};
pub use render::{render, ListCounter};
pub use style::{parse_color, Align, BorderType, Color, Decoration, NoStyles, StyleResolver, Theme};
