//! Layout tree management

use slotmap::{new_key_type, SlotMap};
use taffy::prelude::{AvailableSpace, NodeId, Style, TaffyTree};
use taffy::Layout;

use crate::element::ElementBounds;
use crate::error::{LayoutError, Result};

new_key_type! {
    pub struct LayoutNodeId;
}

/// Maps between dragsheet node IDs and Taffy node IDs
pub struct LayoutTree {
    taffy: TaffyTree,
    node_map: SlotMap<LayoutNodeId, NodeId>,
}

impl LayoutTree {
    pub fn new() -> Self {
        Self {
            taffy: TaffyTree::new(),
            node_map: SlotMap::with_key(),
        }
    }

    fn taffy_node(&self, id: LayoutNodeId) -> Result<NodeId> {
        self.node_map.get(id).copied().ok_or(LayoutError::UnknownNode)
    }

    /// Create a new layout node with the given style
    pub fn create_node(&mut self, style: Style) -> Result<LayoutNodeId> {
        let taffy_node = self.taffy.new_leaf(style)?;
        Ok(self.node_map.insert(taffy_node))
    }

    /// Set the style for a node
    pub fn set_style(&mut self, id: LayoutNodeId, style: Style) -> Result<()> {
        let node = self.taffy_node(id)?;
        self.taffy.set_style(node, style)?;
        Ok(())
    }

    /// Add a child to a parent node
    pub fn add_child(&mut self, parent: LayoutNodeId, child: LayoutNodeId) -> Result<()> {
        let parent_node = self.taffy_node(parent)?;
        let child_node = self.taffy_node(child)?;
        self.taffy.add_child(parent_node, child_node)?;
        Ok(())
    }

    /// Create a node and attach it under `parent`
    pub fn create_child(&mut self, parent: LayoutNodeId, style: Style) -> Result<LayoutNodeId> {
        let child = self.create_node(style)?;
        self.add_child(parent, child)?;
        Ok(child)
    }

    /// Compute layout for a tree rooted at the given node
    pub fn compute_layout(&mut self, root: LayoutNodeId, width: f32, height: f32) -> Result<()> {
        let node = self.taffy_node(root)?;
        let available = taffy::geometry::Size {
            width: AvailableSpace::Definite(width),
            height: AvailableSpace::Definite(height),
        };
        self.taffy.compute_layout(node, available)?;
        Ok(())
    }

    /// Get the computed layout for a node
    pub fn get_layout(&self, id: LayoutNodeId) -> Result<&Layout> {
        let node = self.taffy_node(id)?;
        Ok(self.taffy.layout(node)?)
    }

    /// Computed bounds of a node, offset by its parent's absolute bounds
    pub fn bounds(&self, id: LayoutNodeId, parent: Option<ElementBounds>) -> Result<ElementBounds> {
        let offset = parent.map(|p| (p.x, p.y)).unwrap_or((0.0, 0.0));
        Ok(ElementBounds::from_layout(self.get_layout(id)?, offset))
    }

    /// Remove a node
    pub fn remove_node(&mut self, id: LayoutNodeId) -> Result<()> {
        let node = self.node_map.remove(id).ok_or(LayoutError::UnknownNode)?;
        self.taffy.remove(node)?;
        Ok(())
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.node_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_map.is_empty()
    }
}

impl Default for LayoutTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::LayoutStyle;

    #[test]
    fn test_bottom_anchored_child() {
        let mut tree = LayoutTree::new();
        let root = tree
            .create_node(LayoutStyle::fixed_column(390.0, 844.0))
            .unwrap();
        tree.create_child(root, LayoutStyle::spacer()).unwrap();
        let panel = tree
            .create_child(root, LayoutStyle::full_width_height(422.0))
            .unwrap();

        tree.compute_layout(root, 390.0, 844.0).unwrap();

        let root_bounds = tree.bounds(root, None).unwrap();
        let panel_bounds = tree.bounds(panel, Some(root_bounds)).unwrap();
        assert_eq!(panel_bounds.y, 422.0);
        assert_eq!(panel_bounds.width, 390.0);
        assert_eq!(panel_bounds.height, 422.0);
    }

    #[test]
    fn test_unknown_node_after_remove() {
        let mut tree = LayoutTree::new();
        let node = tree.create_node(LayoutStyle::spacer()).unwrap();
        tree.remove_node(node).unwrap();

        assert!(tree.is_empty());
        assert!(matches!(tree.get_layout(node), Err(LayoutError::UnknownNode)));
    }
}
