//! HTML serialization of a [`Document`] through html5ever's serializer.

use std::io;

use html5ever::serialize::{Serialize, SerializeOpts, Serializer, TraversalScope, serialize};

use super::arena::{Document, NodeData, NodeId};

/// A node handle html5ever can serialize.
pub struct SerializableNode<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> SerializableNode<'a> {
    pub fn new(doc: &'a Document, id: NodeId) -> Self {
        Self { doc, id }
    }
}

enum SerializeOp {
    Open(NodeId),
    Close(NodeId),
}

impl Serialize for SerializableNode<'_> {
    fn serialize<S>(&self, serializer: &mut S, traversal_scope: TraversalScope) -> io::Result<()>
    where
        S: Serializer,
    {
        let doc = self.doc;
        let mut ops = match traversal_scope {
            TraversalScope::IncludeNode => vec![SerializeOp::Open(self.id)],
            TraversalScope::ChildrenOnly(_) => child_ops(doc, self.id),
        };

        while let Some(op) = ops.pop() {
            let id = match op {
                SerializeOp::Open(id) => id,
                SerializeOp::Close(id) => {
                    if let Some(NodeData::Element { name, .. }) = doc.get(id).map(|n| &n.data) {
                        serializer.end_elem(name.clone())?;
                    }
                    continue;
                }
            };
            let Some(node) = doc.get(id) else {
                continue;
            };

            match &node.data {
                NodeData::Document | NodeData::Fragment => ops.extend(child_ops(doc, id)),
                NodeData::Element { name, attrs, .. } => {
                    serializer.start_elem(
                        name.clone(),
                        attrs.iter().map(|a| (&a.name, a.value.as_str())),
                    )?;
                    ops.push(SerializeOp::Close(id));
                    if let Some(contents) = doc.template_contents(id) {
                        ops.extend(child_ops(doc, contents));
                    }
                    ops.extend(child_ops(doc, id));
                }
                NodeData::Doctype { name, .. } => serializer.write_doctype(name)?,
                NodeData::Text(text) => serializer.write_text(text)?,
                NodeData::Comment(text) => serializer.write_comment(text)?,
            }
        }
        Ok(())
    }
}

/// Open operations for the children of `id`, last child on top of the stack.
fn child_ops(doc: &Document, id: NodeId) -> Vec<SerializeOp> {
    let mut ops: Vec<_> = doc.children(id).map(SerializeOp::Open).collect();
    ops.reverse();
    ops
}

/// Serialize the whole document, doctype included.
pub fn to_html(doc: &Document) -> String {
    write_html(doc, doc.document(), TraversalScope::ChildrenOnly(None))
}

/// Serialize a node and its subtree (`outerHTML`).
pub fn outer_html(doc: &Document, id: NodeId) -> String {
    write_html(doc, id, TraversalScope::IncludeNode)
}

fn write_html(doc: &Document, id: NodeId, traversal_scope: TraversalScope) -> String {
    let mut bytes = Vec::new();
    let opts = SerializeOpts {
        traversal_scope,
        ..Default::default()
    };

    // Writing into a Vec cannot fail.
    if serialize(&mut bytes, &SerializableNode::new(doc, id), opts).is_err() {
        return String::new();
    }
    String::from_utf8(bytes).unwrap_or_default()
}
