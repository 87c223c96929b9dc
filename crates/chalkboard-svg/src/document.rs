//! SVG document and element builders.

use std::borrow::Cow;
use std::fmt::{Display, Write as _};

use crate::{Point, SVG_NAMESPACE};

/// Escape text for use in an attribute value or element body.
///
/// Borrows the input unchanged when nothing needs escaping.
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// A single SVG element with ordered attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    body: Option<String>,
}

impl Element {
    fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            body: None,
        }
    }

    /// A straight segment between two points.
    pub fn line(from: Point, to: Point) -> Self {
        Self::new("line")
            .attr("x1", from.x)
            .attr("y1", from.y)
            .attr("x2", to.x)
            .attr("y2", to.y)
    }

    /// A circle centred on `center`.
    pub fn circle(center: Point, radius: i64) -> Self {
        Self::new("circle")
            .attr("cx", center.x)
            .attr("cy", center.y)
            .attr("r", radius)
    }

    /// An axis-aligned rectangle anchored at its top-left corner.
    pub fn rect(corner: Point, width: i64, height: i64) -> Self {
        Self::new("rect")
            .attr("x", corner.x)
            .attr("y", corner.y)
            .attr("width", width)
            .attr("height", height)
    }

    /// A rectangle covering the whole canvas.
    pub fn backdrop(fill: &str) -> Self {
        Self::new("rect")
            .attr("width", "100%")
            .attr("height", "100%")
            .attr("fill", fill)
    }

    /// A text label anchored at `at`. The content is escaped on output.
    pub fn text(at: Point, content: impl Into<String>) -> Self {
        let mut element = Self::new("text").attr("x", at.x).attr("y", at.y);
        element.body = Some(content.into());
        element
    }

    /// Append an attribute. Attributes are written in insertion order.
    pub fn attr(mut self, name: &'static str, value: impl Display) -> Self {
        self.attrs.push((name, value.to_string()));
        self
    }

    /// The element's tag name.
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// Look up an attribute value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    fn write_to(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attrs {
            // Writing to a String cannot fail.
            let _ = write!(out, " {}=\"{}\"", name, escape(value));
        }
        match &self.body {
            Some(body) => {
                out.push('>');
                out.push_str(&escape(body));
                out.push_str("</");
                out.push_str(self.tag);
                out.push('>');
            }
            None => out.push_str("/>"),
        }
    }
}

/// An SVG document under construction.
#[derive(Debug, Clone)]
pub struct SvgDocument {
    width: i64,
    height: i64,
    view_box: bool,
    elements: Vec<Element>,
}

impl SvgDocument {
    /// Create an empty document of the given size.
    pub fn new(width: i64, height: i64) -> Self {
        Self {
            width,
            height,
            view_box: true,
            elements: Vec::new(),
        }
    }

    /// Omit the `viewBox` attribute (fixed-size maps).
    pub fn without_view_box(mut self) -> Self {
        self.view_box = false;
        self
    }

    pub fn width(&self) -> i64 {
        self.width
    }

    pub fn height(&self) -> i64 {
        self.height
    }

    /// Append an element. Later elements paint over earlier ones.
    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Append several elements in order.
    pub fn extend(&mut self, elements: impl IntoIterator<Item = Element>) {
        self.elements.extend(elements);
    }

    /// Elements pushed so far.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Serialize to markup, one element per line.
    pub fn finish(self) -> String {
        let mut out = String::with_capacity(64 + self.elements.len() * 96);
        let _ = write!(
            out,
            "<svg xmlns=\"{}\" width=\"{}\" height=\"{}\"",
            SVG_NAMESPACE, self.width, self.height
        );
        if self.view_box {
            let _ = write!(out, " viewBox=\"0 0 {} {}\"", self.width, self.height);
        }
        out.push('>');
        for element in &self.elements {
            out.push('\n');
            element.write_to(&mut out);
        }
        out.push_str("\n</svg>");
        out
    }
}
