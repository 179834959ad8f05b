//! HTML document model.
//!
//! Documents are parsed with html5ever into an arena tree ([`ArenaDom`]),
//! edited in place, and written back out with html5ever's serializer.
//!
//! # Example
//!
//! ```
//! use faleproxy::dom::{parse_html, serialize_html};
//!
//! let dom = parse_html("<p>Hello</p>");
//! assert_eq!(
//!     serialize_html(&dom),
//!     "<html><head></head><body><p>Hello</p></body></html>"
//! );
//! ```

mod arena;
mod serialize;
mod tree_sink;

use std::io::{self, Write};

pub use arena::{ArenaDom, Attribute, ChildrenIter, Descendants, Node, NodeData, NodeId};
pub use serialize::SerializableNode;
pub use tree_sink::ArenaSink;

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::serialize::{SerializeOpts, TraversalScope, serialize};
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use tracing::debug;

/// Parse an HTML document.
///
/// Never fails: malformed markup is recovered the way browsers recover it,
/// and any input (including the empty string or plain text) yields a
/// document with `html`, `head` and `body` elements.
pub fn parse_html(html: &str) -> ArenaDom {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: false,
            ..Default::default()
        },
        ..Default::default()
    };

    let sink = parse_document(ArenaSink::new(), opts)
        .from_utf8()
        .one(html.as_bytes());
    if sink.parse_errors() > 0 {
        debug!(errors = sink.parse_errors(), "recovered from malformed html");
    }
    sink.into_dom()
}

/// Write the document as HTML.
///
/// A doctype carrying public or system identifiers is written in full;
/// html5ever's serializer only emits the name.
pub fn write_html<W: Write>(dom: &ArenaDom, mut writer: W) -> io::Result<()> {
    let include_node = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    for child in dom.children(dom.document()) {
        if let Some(NodeData::Doctype {
            name,
            public_id,
            system_id,
        }) = dom.get(child).map(|n| &n.data)
            && !(public_id.is_empty() && system_id.is_empty())
        {
            write_doctype(&mut writer, name, public_id, system_id)?;
            continue;
        }
        let node = SerializableNode::new(dom, child);
        serialize(&mut writer, &node, include_node.clone())?;
    }
    Ok(())
}

fn write_doctype<W: Write>(
    writer: &mut W,
    name: &str,
    public_id: &str,
    system_id: &str,
) -> io::Result<()> {
    write!(writer, "<!DOCTYPE {name}")?;
    if !public_id.is_empty() {
        write!(writer, " PUBLIC \"{public_id}\"")?;
        if !system_id.is_empty() {
            write!(writer, " \"{system_id}\"")?;
        }
    } else {
        write!(writer, " SYSTEM \"{system_id}\"")?;
    }
    writer.write_all(b">")
}

/// Serialize the document to an HTML string.
pub fn serialize_html(dom: &ArenaDom) -> String {
    let mut bytes = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_html(dom, &mut bytes);
    String::from_utf8(bytes).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}
