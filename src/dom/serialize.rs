//! Serialization of an [`ArenaDom`] through html5ever's HTML serializer.

use std::io;

use html5ever::QualName;
use html5ever::serialize::{Serialize, Serializer, TraversalScope};

use super::arena::{ArenaDom, NodeData, NodeId};

/// A node of an [`ArenaDom`] that html5ever can serialize.
pub struct SerializableNode<'a> {
    dom: &'a ArenaDom,
    id: NodeId,
}

impl<'a> SerializableNode<'a> {
    pub fn new(dom: &'a ArenaDom, id: NodeId) -> Self {
        Self { dom, id }
    }
}

enum SerializeOp {
    Open(NodeId),
    Close(QualName),
}

impl Serialize for SerializableNode<'_> {
    fn serialize<S>(&self, serializer: &mut S, traversal_scope: TraversalScope) -> io::Result<()>
    where
        S: Serializer,
    {
        let dom = self.dom;
        // Stack of pending operations, popped from the end
        let mut ops: Vec<SerializeOp> = match traversal_scope {
            TraversalScope::IncludeNode => vec![SerializeOp::Open(self.id)],
            TraversalScope::ChildrenOnly(_) => children_rev(dom, self.id),
        };

        while let Some(op) = ops.pop() {
            let id = match op {
                SerializeOp::Close(name) => {
                    serializer.end_elem(name)?;
                    continue;
                }
                SerializeOp::Open(id) => id,
            };
            let Some(node) = dom.get(id) else {
                continue;
            };

            match &node.data {
                NodeData::Element { name, attrs } => {
                    serializer.start_elem(
                        name.clone(),
                        attrs.iter().map(|a| (&a.name, a.value.as_str())),
                    )?;
                    ops.push(SerializeOp::Close(name.clone()));
                    ops.extend(children_rev(dom, id));
                }
                NodeData::Document => ops.extend(children_rev(dom, id)),
                NodeData::Text(text) => serializer.write_text(text)?,
                NodeData::Comment(text) => serializer.write_comment(text)?,
                NodeData::Doctype { name, .. } => serializer.write_doctype(name)?,
            }
        }

        Ok(())
    }
}

fn children_rev(dom: &ArenaDom, id: NodeId) -> Vec<SerializeOp> {
    let mut children: Vec<_> = dom.children(id).map(SerializeOp::Open).collect();
    children.reverse();
    children
}
