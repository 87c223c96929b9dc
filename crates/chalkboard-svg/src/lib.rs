//! Chalkboard SVG
//!
//! A tiny builder for the inline vector markup the classroom widgets emit.
//!
//! # Determinism
//!
//! Output depends only on the elements pushed and their order. No ids,
//! timestamps or randomness are ever generated, so rendering the same
//! scene twice yields byte-identical documents.
//!
//! # Primitives
//!
//! Only `line`, `circle`, `rect` and `text` are needed by the widgets.
//! Every attribute value and every text body is escaped.

mod document;
mod point;

pub use document::{escape, Element, SvgDocument};
pub use point::Point;

/// Namespace written on every root `<svg>` element.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
