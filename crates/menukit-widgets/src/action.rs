#![forbid(unsafe_code)]

//! Action tree: the hierarchical data model behind a menu.
//!
//! An [`Action`] is one selectable entry. An action carrying one or more
//! sub-actions is a *branch node* (activation expands/collapses it); one
//! without is a *leaf node* (activation selects it). The host owns the tree
//! and replaces it wholesale to change it; the engine only traverses.
//!
//! Nodes are addressed by [`NodePath`], the child-index path from the root
//! list. Names are deliberately NOT required to be unique — the reference
//! data model ships duplicate names and resolves them identically wherever
//! they occur — so a name is never a node identity.
//!
//! # Example
//!
//! ```
//! use menukit_widgets::action::{Action, ActionTree, NodePath};
//!
//! let tree = ActionTree::new(vec![
//!     Action::new("ADD", "Add"),
//!     Action::new("SHARE", "Share")
//!         .child(Action::new("pdf", "PDF"))
//!         .child(Action::new("HOME", "Home")),
//! ]);
//!
//! let share = NodePath::root(1);
//! assert!(tree.get(&share).unwrap().is_branch());
//! assert_eq!(tree.get(&share.join(0)).unwrap().name, "pdf");
//! ```

/// Icon rendering style hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum IconStyle {
    /// Filled icon font.
    Filled,
    /// Outlined icon font.
    Outlined,
}

/// One selectable entry in the menu, possibly bearing nested sub-actions.
///
/// Malformed nodes (empty `name` or `label`) are passed through as-is;
/// validation is a host concern, identity resolution is this layer's only
/// job.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct Action {
    /// Identifier used by the disable/hide maps and the selection event.
    pub name: String,

    /// Display label.
    pub label: String,

    /// Optional leading icon identifier.
    pub icon: Option<String>,

    /// Icon font style (`iconFont` in the host's wire shape).
    #[cfg_attr(feature = "serde", serde(rename = "iconFont"))]
    pub icon_style: Option<IconStyle>,

    /// Opaque icon/text color hint, passed through to the renderer.
    pub icon_color: Option<String>,

    /// Semantic styling hint for destructive entries.
    pub danger: bool,

    /// Whether a separator accompanies this entry at render time.
    pub divider: bool,

    /// Reserve the leading icon gutter even without an icon.
    pub has_leading_icon_space: bool,

    /// Nested sub-actions. Non-empty marks this a branch node.
    pub sub_actions: Vec<Action>,
}

impl Default for Action {
    fn default() -> Self {
        Self {
            name: String::new(),
            label: String::new(),
            icon: None,
            icon_style: None,
            icon_color: None,
            danger: false,
            divider: false,
            has_leading_icon_space: false,
            sub_actions: Vec::new(),
        }
    }
}

impl Action {
    /// Create a new action with the given name and label.
    #[must_use]
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            ..Self::default()
        }
    }

    /// Set the leading icon.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set the icon style.
    #[must_use]
    pub fn with_icon_style(mut self, style: IconStyle) -> Self {
        self.icon_style = Some(style);
        self
    }

    /// Set the icon color hint.
    #[must_use]
    pub fn with_icon_color(mut self, color: impl Into<String>) -> Self {
        self.icon_color = Some(color.into());
        self
    }

    /// Mark this entry as destructive.
    #[must_use]
    pub fn danger(mut self) -> Self {
        self.danger = true;
        self
    }

    /// Attach a separator to this entry.
    #[must_use]
    pub fn with_divider(mut self) -> Self {
        self.divider = true;
        self
    }

    /// Reserve the icon gutter even without an icon.
    #[must_use]
    pub fn with_leading_icon_space(mut self) -> Self {
        self.has_leading_icon_space = true;
        self
    }

    /// Add a sub-action.
    #[must_use]
    pub fn child(mut self, action: Action) -> Self {
        self.sub_actions.push(action);
        self
    }

    /// Set sub-actions from a vec.
    #[must_use]
    pub fn with_sub_actions(mut self, actions: Vec<Action>) -> Self {
        self.sub_actions = actions;
        self
    }

    /// Whether this action carries sub-actions.
    #[must_use]
    pub fn is_branch(&self) -> bool {
        !self.sub_actions.is_empty()
    }

    /// Whether activation selects (rather than expands) this action.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.sub_actions.is_empty()
    }
}

/// Child-index path addressing a node in an [`ActionTree`].
///
/// The empty path addresses no node (the root *list* has no node of its
/// own). `NodePath::root(i)` addresses the i-th top-level action.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    /// Path to the i-th top-level action.
    #[must_use]
    pub fn root(index: usize) -> Self {
        Self(vec![index])
    }

    /// Extend this path down into the given child index.
    #[must_use]
    pub fn join(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// Path to the parent node, or `None` for a top-level path.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.0.len() > 1 {
            Some(Self(self.0[..self.0.len() - 1].to_vec()))
        } else {
            None
        }
    }

    /// Tree depth of the addressed node; top-level nodes are depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// The index of the addressed node within its sibling list.
    #[must_use]
    pub fn last_index(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// The raw child-index sequence.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.0
    }
}

impl From<&[usize]> for NodePath {
    fn from(indices: &[usize]) -> Self {
        Self(indices.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for NodePath {
    fn from(indices: [usize; N]) -> Self {
        Self(indices.to_vec())
    }
}

/// Read-only hierarchical collection of actions.
///
/// Missing host input degrades to an empty tree; there is no error path.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ActionTree {
    roots: Vec<Action>,
}

impl ActionTree {
    /// Create a tree from an ordered sequence of top-level actions.
    #[must_use]
    pub fn new(roots: Vec<Action>) -> Self {
        Self { roots }
    }

    /// An empty tree.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The top-level actions.
    #[must_use]
    pub fn roots(&self) -> &[Action] {
        &self.roots
    }

    /// Whether the tree has no actions at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Get the node addressed by `path`, if present.
    #[must_use]
    pub fn get(&self, path: &NodePath) -> Option<&Action> {
        let (first, rest) = path.indices().split_first()?;
        let mut current = self.roots.get(*first)?;
        for &idx in rest {
            current = current.sub_actions.get(idx)?;
        }
        Some(current)
    }

    /// Children of the node at `path`; an empty path yields the roots.
    #[must_use]
    pub fn children(&self, path: &NodePath) -> &[Action] {
        if path.indices().is_empty() {
            &self.roots
        } else {
            self.get(path).map_or(&[], |a| &a.sub_actions)
        }
    }

    /// Preorder walk over every node, yielding `(path, action)`.
    pub fn walk(&self) -> Walk<'_> {
        let mut stack = Vec::with_capacity(self.roots.len());
        for (i, action) in self.roots.iter().enumerate().rev() {
            stack.push((NodePath::root(i), action));
        }
        Walk { stack }
    }
}

/// Preorder iterator over an [`ActionTree`]. Created by [`ActionTree::walk`].
#[derive(Debug)]
pub struct Walk<'a> {
    stack: Vec<(NodePath, &'a Action)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (NodePath, &'a Action);

    fn next(&mut self) -> Option<Self::Item> {
        let (path, action) = self.stack.pop()?;
        for (i, child) in action.sub_actions.iter().enumerate().rev() {
            self.stack.push((path.join(i), child));
        }
        Some((path, action))
    }
}
