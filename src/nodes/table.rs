//! Editable table extension.
//!
//! Pure composition: the table node gets its view, and the caption, cell,
//! header and row nodes are registered alongside it, cells and headers with
//! their own views.

use serde::Serialize;

/// View components the rendering layer mounts for table nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NodeView {
    Table,
    TableCell,
    TableHeader,
}

impl NodeView {
    pub fn component_name(&self) -> &'static str {
        match self {
            NodeView::Table => "TableView",
            NodeView::TableCell => "TableCellView",
            NodeView::TableHeader => "TableHeaderView",
        }
    }
}

/// A node extension registered with the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extension {
    pub name: &'static str,
    pub node_view: Option<NodeView>,
    pub extensions: Vec<Extension>,
}

impl Extension {
    pub fn node(name: &'static str) -> Self {
        Self {
            name,
            node_view: None,
            extensions: Vec::new(),
        }
    }

    /// The same node, rendered through `view`.
    pub fn with_node_view(mut self, view: NodeView) -> Self {
        self.node_view = Some(view);
        self
    }

    pub fn with_extensions(mut self, extensions: Vec<Extension>) -> Self {
        self.extensions = extensions;
        self
    }

    /// Find an extension by name in this tree, depth first.
    pub fn find(&self, name: &str) -> Option<&Extension> {
        if self.name == name {
            return Some(self);
        }
        self.extensions.iter().find_map(|e| e.find(name))
    }
}

/// The table extension used by the editor.
pub fn editable_table() -> Extension {
    Extension::node("table")
        .with_node_view(NodeView::Table)
        .with_extensions(vec![
            Extension::node("tableCaption"),
            Extension::node("tableCell").with_node_view(NodeView::TableCell),
            Extension::node("tableHeader").with_node_view(NodeView::TableHeader),
            Extension::node("tableHeadRow"),
            Extension::node("tableRow"),
        ])
}
