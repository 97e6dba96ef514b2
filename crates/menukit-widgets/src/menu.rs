#![forbid(unsafe_code)]

//! The menu engine façade.
//!
//! A [`Menu`] owns the host-supplied inputs (action tree, hidden/disabled
//! tables, surface config) and the per-instance state (keyboard activation,
//! collapse arenas, open flag). Hosts replace inputs wholesale between
//! renders; the engine owns every mutation of its own state.
//!
//! Input reaches the engine two ways, both following the same branch/leaf
//! dispatch rule:
//!
//! - [`Menu::handle_event`] for keyboard input: Up/Down move the activation
//!   over the top-level filtered-and-enabled list, Enter dispatches the
//!   activated entry, Escape asks the host to close.
//! - [`Menu::activate`] for pointer input: the rendering collaborator
//!   hit-tests a row and activates it by node path, at any depth.
//!
//! Dispatching a branch node toggles its collapsible region and reports the
//! new disclosure state; dispatching a leaf emits the selection and, unless
//! auto-close is suppressed, a close request. Disabled entries are inert
//! apart from presenting their tooltip. Events come back as a small
//! [`MenuEvent`] batch rather than callbacks, so the host applies them in
//! input order within the current event turn.

use std::time::Duration;

use menukit_core::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use unicode_width::UnicodeWidthStr;

use crate::action::{Action, ActionTree, NodePath};
use crate::collapse::{CollapseController, Extent};
use crate::navigate::ActivationNavigator;
use crate::resolve::{DisabledMap, HiddenSet, resolve_level};
use crate::surface::{AnchorId, Placement, SurfaceSpec, show_header};

/// Outbound event produced by dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEvent {
    /// A leaf action was selected; carries the action's name.
    Selected {
        /// The selected action's `name`.
        name: String,
    },

    /// The engine asks the surface-lifecycle collaborator to close the menu.
    CloseRequested,

    /// A branch node's disclosure state flipped.
    OpenedChanged {
        /// The branch node.
        path: NodePath,
        /// Its new target openness.
        opened: bool,
    },
}

/// One renderable row of the menu, produced by [`Menu::visible_rows`].
#[derive(Debug, Clone, PartialEq)]
pub struct MenuRow<'a> {
    /// Node path of this row.
    pub path: NodePath,

    /// The underlying action.
    pub action: &'a Action,

    /// Tree depth; top-level rows are depth 1.
    pub depth: usize,

    /// Whether activation is inert for this row.
    pub disabled: bool,

    /// Tooltip text shown on the disabled row, if any.
    pub tooltip: Option<&'a str>,

    /// Whether this row's sibling set reserves the icon gutter.
    pub gutter: bool,

    /// Disclosure state for branch rows (swaps the more/less icon).
    pub opened: bool,

    /// Rendered extent of the branch's collapsible region, `None` for
    /// leaves. The renderer clips the child rows to this.
    pub extent: Option<Extent>,

    /// Whether this row holds the keyboard activation.
    pub activated: bool,
}

/// Hierarchical, keyboard-navigable action menu engine.
#[derive(Debug, Clone, Default)]
pub struct Menu {
    tree: ActionTree,
    hidden: HiddenSet,
    disabled: DisabledMap,
    mobile_mode: bool,
    heading: Option<String>,
    show_close: bool,
    disable_auto_close: bool,
    placement: Placement,
    anchor: Option<AnchorId>,
    keep_anchor_visible: bool,
    open: bool,
    nav: ActivationNavigator,
    collapse: CollapseController,
}

impl Menu {
    /// Create a menu over the given action tree.
    #[must_use]
    pub fn new(tree: ActionTree) -> Self {
        Self {
            tree,
            ..Self::default()
        }
    }

    /// Set the hidden-name table (builder).
    #[must_use]
    pub fn with_hidden(mut self, hidden: HiddenSet) -> Self {
        self.hidden = hidden;
        self
    }

    /// Set the disablement table (builder).
    #[must_use]
    pub fn with_disabled(mut self, disabled: DisabledMap) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the device class (builder). Mobile gets the bottom-sheet modal.
    #[must_use]
    pub fn with_mobile_mode(mut self, mobile: bool) -> Self {
        self.mobile_mode = mobile;
        self
    }

    /// Set the header heading (builder).
    #[must_use]
    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }

    /// Request a close affordance in the header (builder).
    #[must_use]
    pub fn with_show_close(mut self, show: bool) -> Self {
        self.show_close = show;
        self
    }

    /// Suppress the close request after a leaf selection (builder).
    #[must_use]
    pub fn with_disable_auto_close(mut self, disable: bool) -> Self {
        self.disable_auto_close = disable;
        self
    }

    /// Set the requested popover placement (builder).
    #[must_use]
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Attach the opaque anchor handle (builder).
    #[must_use]
    pub fn with_anchor(mut self, anchor: AnchorId) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// Keep the anchor visible while the surface is up (builder).
    #[must_use]
    pub fn with_keep_anchor_visible(mut self, keep: bool) -> Self {
        self.keep_anchor_visible = keep;
        self
    }

    /// Set the expand/collapse transition duration (builder).
    #[must_use]
    pub fn with_transition_duration(mut self, duration: Duration) -> Self {
        self.collapse = self.collapse.with_duration(duration);
        self
    }

    // -----------------------------------------------------------------------
    // Host inputs (replaced wholesale between renders)
    // -----------------------------------------------------------------------

    /// Replace the action tree.
    ///
    /// Collapse state is keyed to the tree identity, so it is dropped here;
    /// stale entries for removed nodes never leak into the next render.
    pub fn set_actions(&mut self, tree: ActionTree) {
        self.tree = tree;
        self.collapse.clear();
        self.reclamp();
    }

    /// Replace the hidden-name table.
    pub fn set_hidden(&mut self, hidden: HiddenSet) {
        self.hidden = hidden;
        self.reclamp();
    }

    /// Replace the disablement table.
    pub fn set_disabled(&mut self, disabled: DisabledMap) {
        self.disabled = disabled;
        self.reclamp();
    }

    /// Replace the device class.
    pub fn set_mobile_mode(&mut self, mobile: bool) {
        self.mobile_mode = mobile;
    }

    /// Replace the header heading. Header visibility follows immediately.
    pub fn set_heading(&mut self, heading: Option<String>) {
        self.heading = heading;
    }

    /// Replace the close-affordance request. Header visibility follows
    /// immediately.
    pub fn set_show_close(&mut self, show: bool) {
        self.show_close = show;
    }

    /// The current action tree.
    #[must_use]
    pub fn actions(&self) -> &ActionTree {
        &self.tree
    }

    /// The opaque anchor handle, if any.
    #[must_use]
    pub fn anchor(&self) -> Option<AnchorId> {
        self.anchor
    }

    /// Whether the anchor stays visible while the surface is up.
    #[must_use]
    pub fn keep_anchor_visible(&self) -> bool {
        self.keep_anchor_visible
    }

    // -----------------------------------------------------------------------
    // Surface
    // -----------------------------------------------------------------------

    /// The resolved presentation surface for the current inputs.
    #[must_use]
    pub fn surface(&self) -> SurfaceSpec {
        SurfaceSpec::select(self.mobile_mode, self.placement)
    }

    /// Whether the surface shows a header row.
    #[must_use]
    pub fn show_header(&self) -> bool {
        show_header(self.heading.as_deref(), self.show_close)
    }

    /// The header heading, if any.
    #[must_use]
    pub fn heading(&self) -> Option<&str> {
        self.heading.as_deref()
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Open the menu, resetting per-instance state to defaults.
    pub fn open(&mut self) {
        if !self.open {
            self.nav.reset();
            self.collapse.clear();
        }
        self.open = true;
    }

    /// Close the menu, cancelling every pending expand/collapse step across
    /// the tree so nothing mutates state after teardown.
    pub fn close(&mut self) {
        self.collapse.clear();
        self.nav.reset();
        self.open = false;
    }

    /// Whether the menu is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Advance in-flight expand/collapse transitions by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        self.collapse.tick(dt);
    }

    /// Whether any expand/collapse transition is in flight (the host keeps
    /// ticking while this holds).
    #[must_use]
    pub fn transitioning(&self) -> bool {
        self.collapse.transitioning()
    }

    // -----------------------------------------------------------------------
    // Activation
    // -----------------------------------------------------------------------

    /// The keyboard-activated top-level action, if any.
    #[must_use]
    pub fn activated_action(&self) -> Option<&Action> {
        let index = self.nav.activated()?;
        let list = self.activation_list();
        list.get(index).map(|(_, action)| *action)
    }

    /// Node path of the keyboard-activated entry, if any.
    #[must_use]
    pub fn activated_path(&self) -> Option<NodePath> {
        let index = self.nav.activated()?;
        let list = self.activation_list();
        list.get(index).map(|(path, _)| path.clone())
    }

    /// Handle a host input event. Returns the outbound events, in order.
    ///
    /// A closed menu ignores input entirely.
    pub fn handle_event(&mut self, event: &Event) -> Vec<MenuEvent> {
        if !self.open {
            return Vec::new();
        }
        match event {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => self.handle_key(*code),
            _ => Vec::new(),
        }
    }

    fn handle_key(&mut self, code: KeyCode) -> Vec<MenuEvent> {
        match code {
            KeyCode::Up => {
                self.nav.move_up();
                Vec::new()
            }
            KeyCode::Down => {
                let len = self.activation_list().len();
                self.nav.move_down(len);
                Vec::new()
            }
            KeyCode::Enter => match self.activated_path() {
                Some(path) => self.activate(&path),
                None => Vec::new(),
            },
            KeyCode::Escape => vec![MenuEvent::CloseRequested],
            _ => Vec::new(),
        }
    }

    /// Activate the entry at `path` (pointer input, any depth).
    ///
    /// Branch nodes toggle their collapsible region; leaf nodes emit the
    /// selection and, unless auto-close is suppressed, a close request.
    /// Hidden or disabled entries — and paths naming no node — are inert.
    pub fn activate(&mut self, path: &NodePath) -> Vec<MenuEvent> {
        if !self.open {
            return Vec::new();
        }
        let Some(action) = self.tree.get(path) else {
            return Vec::new();
        };
        if self.is_hidden_at(path) || self.disabled.is_disabled(&action.name) {
            return Vec::new();
        }

        #[cfg(feature = "tracing")]
        let _span =
            tracing::debug_span!("menu_dispatch", name = %action.name, branch = action.is_branch())
                .entered();

        if action.is_branch() {
            let measured = self.measure_region(path);
            let opened = self.collapse.toggle(path, measured);
            vec![MenuEvent::OpenedChanged {
                path: path.clone(),
                opened,
            }]
        } else {
            let mut events = vec![MenuEvent::Selected {
                name: action.name.clone(),
            }];
            if !self.disable_auto_close {
                events.push(MenuEvent::CloseRequested);
            }
            events
        }
    }

    // -----------------------------------------------------------------------
    // Render model
    // -----------------------------------------------------------------------

    /// The flattened renderable rows for the current inputs and state.
    ///
    /// Children of a branch appear while its region occupies any rows (open
    /// or mid-transition); the renderer clips them to the row's `extent`.
    #[must_use]
    pub fn visible_rows(&self) -> Vec<MenuRow<'_>> {
        let activated = self.activated_path();
        let mut rows = Vec::new();
        self.collect_rows(&NodePath::default(), activated.as_ref(), &mut rows);
        rows
    }

    /// Popover sizing hint: the widest visible row in columns, counting
    /// depth indentation, the icon gutter, and the disclosure marker.
    #[must_use]
    pub fn natural_width(&self) -> u16 {
        let mut width = 0usize;
        for row in self.visible_rows() {
            let indent = 2 * row.depth.saturating_sub(1);
            let gutter = if row.gutter { 2 } else { 0 };
            let marker = if row.action.is_branch() { 2 } else { 0 };
            let label = row.action.label.as_str().width();
            width = width.max(indent + gutter + label + marker);
        }
        width.min(usize::from(u16::MAX)) as u16
    }

    fn collect_rows<'a>(
        &'a self,
        parent: &NodePath,
        activated: Option<&NodePath>,
        out: &mut Vec<MenuRow<'a>>,
    ) {
        let siblings = self.tree.children(parent);
        for resolved in resolve_level(siblings, &self.hidden, &self.disabled) {
            let path = parent.join(resolved.index);
            let branch = resolved.action.is_branch();
            out.push(MenuRow {
                path: path.clone(),
                action: resolved.action,
                depth: path.depth(),
                disabled: resolved.disabled,
                tooltip: resolved.tooltip,
                gutter: resolved.gutter,
                opened: branch && self.collapse.is_open(&path),
                extent: if branch {
                    Some(self.collapse.extent(&path))
                } else {
                    None
                },
                activated: activated == Some(&path),
            });
            if branch && self.collapse.reveals_children(&path) {
                self.collect_rows(&path, activated, out);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Top-level filtered-and-enabled entries, in render order. This is the
    /// keyboard activation list; nested entries are pointer-only.
    fn activation_list(&self) -> Vec<(NodePath, &Action)> {
        resolve_level(self.tree.roots(), &self.hidden, &self.disabled)
            .into_iter()
            .filter(|resolved| !resolved.disabled)
            .map(|resolved| (NodePath::root(resolved.index), resolved.action))
            .collect()
    }

    fn reclamp(&mut self) {
        let len = self.activation_list().len();
        self.nav.reclamp(len);
    }

    /// Whether `path` or any of its ancestors is hidden, making the node
    /// unreachable in the rendered tree.
    fn is_hidden_at(&self, path: &NodePath) -> bool {
        let mut prefix = NodePath::default();
        for &index in path.indices() {
            prefix = prefix.join(index);
            if let Some(node) = self.tree.get(&prefix)
                && self.hidden.contains(&node.name)
            {
                return true;
            }
        }
        false
    }

    /// Natural row count of the collapsible region under `path`: its
    /// resolved children, plus the regions of nested branches that are
    /// themselves open.
    fn measure_region(&self, path: &NodePath) -> u16 {
        let children = self.tree.children(path);
        let mut rows = 0u16;
        for resolved in resolve_level(children, &self.hidden, &self.disabled) {
            rows = rows.saturating_add(1);
            let child_path = path.join(resolved.index);
            if resolved.action.is_branch() && self.collapse.is_open(&child_path) {
                rows = rows.saturating_add(self.measure_region(&child_path));
            }
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menukit_core::event::Modifiers;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code))
    }

    fn sample_menu() -> Menu {
        let tree = ActionTree::new(vec![
            Action::new("ADD", "Add").with_icon("add"),
            Action::new("SHARE", "Share")
                .child(Action::new("pdf", "PDF"))
                .child(Action::new("HOME", "Home")),
            Action::new("DELETE", "Delete").danger(),
        ]);
        let mut menu = Menu::new(tree);
        menu.open();
        menu
    }

    #[test]
    fn closed_menu_ignores_input() {
        let mut menu = sample_menu();
        menu.close();
        assert!(menu.handle_event(&key(KeyCode::Down)).is_empty());
        assert!(menu.activate(&NodePath::root(0)).is_empty());
        assert_eq!(menu.activated_action(), None);
    }

    #[test]
    fn leaf_dispatch_selects_and_closes() {
        let mut menu = sample_menu();
        let events = menu.activate(&NodePath::root(2));
        assert_eq!(
            events,
            vec![
                MenuEvent::Selected {
                    name: "DELETE".into()
                },
                MenuEvent::CloseRequested,
            ]
        );
    }

    #[test]
    fn disable_auto_close_suppresses_close_request() {
        let mut menu = sample_menu().with_disable_auto_close(true);
        let events = menu.activate(&NodePath::root(2));
        assert_eq!(
            events,
            vec![MenuEvent::Selected {
                name: "DELETE".into()
            }]
        );
    }

    #[test]
    fn branch_dispatch_toggles_never_selects() {
        let mut menu = sample_menu();
        let share = NodePath::root(1);
        let events = menu.activate(&share);
        assert_eq!(
            events,
            vec![MenuEvent::OpenedChanged {
                path: share.clone(),
                opened: true,
            }]
        );
        // One pending completion toward Expanded; no selection ever fires.
        assert!(menu.transitioning());
        menu.tick(Duration::from_millis(500));
        assert!(!menu.transitioning());

        let events = menu.activate(&share);
        assert_eq!(
            events,
            vec![MenuEvent::OpenedChanged {
                path: share,
                opened: false,
            }]
        );
    }

    #[test]
    fn disabled_leaf_is_inert() {
        let mut menu = sample_menu();
        menu.set_disabled(DisabledMap::new().disable_with("DELETE", "read only"));
        assert!(menu.activate(&NodePath::root(2)).is_empty());
        // The tooltip still surfaces through the render model.
        let rows = menu.visible_rows();
        let delete = rows.iter().find(|r| r.action.name == "DELETE").unwrap();
        assert!(delete.disabled);
        assert_eq!(delete.tooltip, Some("read only"));
    }

    #[test]
    fn hidden_node_is_inert() {
        let mut menu = sample_menu();
        menu.set_hidden(HiddenSet::from_names(["DELETE"]));
        assert!(menu.activate(&NodePath::root(2)).is_empty());
    }

    #[test]
    fn node_under_hidden_ancestor_is_inert() {
        let mut menu = sample_menu();
        menu.activate(&NodePath::root(1));
        menu.set_hidden(HiddenSet::from_names(["SHARE"]));
        assert!(menu.activate(&NodePath::from([1, 0])).is_empty());
    }

    #[test]
    fn unknown_path_is_inert() {
        let mut menu = sample_menu();
        assert!(menu.activate(&NodePath::from([9, 9])).is_empty());
    }

    #[test]
    fn keyboard_walks_enabled_entries_and_dispatches() {
        let mut menu = sample_menu();
        menu.set_disabled(DisabledMap::new().disable("ADD"));

        // ADD is disabled, so the activation list is [SHARE, DELETE].
        menu.handle_event(&key(KeyCode::Down));
        assert_eq!(menu.activated_action().unwrap().name, "SHARE");
        menu.handle_event(&key(KeyCode::Down));
        assert_eq!(menu.activated_action().unwrap().name, "DELETE");
        // Saturates at the last entry.
        menu.handle_event(&key(KeyCode::Down));
        assert_eq!(menu.activated_action().unwrap().name, "DELETE");

        let events = menu.handle_event(&key(KeyCode::Enter));
        assert!(events.contains(&MenuEvent::Selected {
            name: "DELETE".into()
        }));
    }

    #[test]
    fn enter_on_activated_branch_expands() {
        let mut menu = sample_menu();
        menu.handle_event(&key(KeyCode::Down));
        menu.handle_event(&key(KeyCode::Down));
        assert_eq!(menu.activated_action().unwrap().name, "SHARE");
        let events = menu.handle_event(&key(KeyCode::Enter));
        assert_eq!(
            events,
            vec![MenuEvent::OpenedChanged {
                path: NodePath::root(1),
                opened: true,
            }]
        );
    }

    #[test]
    fn enter_without_activation_is_inert() {
        let mut menu = sample_menu();
        assert!(menu.handle_event(&key(KeyCode::Enter)).is_empty());
    }

    #[test]
    fn escape_requests_close() {
        let mut menu = sample_menu();
        assert_eq!(
            menu.handle_event(&key(KeyCode::Escape)),
            vec![MenuEvent::CloseRequested]
        );
    }

    #[test]
    fn key_releases_are_ignored() {
        let mut menu = sample_menu();
        let release = Event::Key(
            KeyEvent::new(KeyCode::Down)
                .with_modifiers(Modifiers::NONE)
                .with_kind(KeyEventKind::Release),
        );
        menu.handle_event(&release);
        assert_eq!(menu.activated_action(), None);
    }

    #[test]
    fn reopen_resets_state() {
        let mut menu = sample_menu();
        menu.handle_event(&key(KeyCode::Down));
        menu.activate(&NodePath::root(1));
        menu.close();
        menu.open();
        assert_eq!(menu.activated_action(), None);
        assert!(!menu.transitioning());
        assert_eq!(
            menu.visible_rows().len(),
            3,
            "collapse state must not survive reopen"
        );
    }

    #[test]
    fn replacing_tree_drops_collapse_state() {
        let mut menu = sample_menu();
        menu.activate(&NodePath::root(1));
        menu.tick(Duration::from_millis(500));
        assert_eq!(menu.visible_rows().len(), 5);

        menu.set_actions(ActionTree::new(vec![
            Action::new("A", "Alpha").child(Action::new("B", "Beta")),
            Action::new("C", "Gamma"),
        ]));
        // Node [1] exists in the new tree too, but the old expansion must
        // not leak onto it.
        assert_eq!(menu.visible_rows().len(), 2);
        assert!(!menu.transitioning());
    }

    #[test]
    fn shrinking_list_reclamps_activation() {
        let mut menu = sample_menu();
        for _ in 0..3 {
            menu.handle_event(&key(KeyCode::Down));
        }
        assert_eq!(menu.activated_action().unwrap().name, "DELETE");
        menu.set_hidden(HiddenSet::from_names(["SHARE", "DELETE"]));
        assert_eq!(menu.activated_action(), None);
    }

    #[test]
    fn visible_rows_follow_expansion() {
        let mut menu = sample_menu();
        assert_eq!(menu.visible_rows().len(), 3);

        menu.activate(&NodePath::root(1));
        menu.tick(Duration::from_millis(500));
        let rows = menu.visible_rows();
        let names: Vec<&str> = rows.iter().map(|r| r.action.name.as_str()).collect();
        assert_eq!(names, ["ADD", "SHARE", "pdf", "HOME", "DELETE"]);
        assert_eq!(rows[2].depth, 2);

        let share = &rows[1];
        assert!(share.opened);
        assert_eq!(share.extent, Some(Extent::Auto));
    }

    #[test]
    fn children_stay_visible_while_collapsing() {
        let mut menu = sample_menu();
        let share = NodePath::root(1);
        menu.activate(&share);
        menu.tick(Duration::from_millis(500));
        menu.activate(&share);

        // Pinned extent: children still render, disclosure already flipped.
        let rows = menu.visible_rows();
        assert_eq!(rows.len(), 5);
        assert!(!rows[1].opened);
        assert_eq!(rows[1].extent, Some(Extent::Fixed(2)));

        menu.tick(Duration::ZERO);
        menu.tick(Duration::from_millis(500));
        assert_eq!(menu.visible_rows().len(), 3);
    }

    #[test]
    fn activated_flag_marks_top_level_row() {
        let mut menu = sample_menu();
        menu.handle_event(&key(KeyCode::Down));
        let rows = menu.visible_rows();
        assert!(rows[0].activated);
        assert!(rows[1..].iter().all(|r| !r.activated));
    }

    #[test]
    fn nested_branch_measures_into_parent() {
        let tree = ActionTree::new(vec![
            Action::new("top", "Top")
                .child(
                    Action::new("mid", "Mid")
                        .child(Action::new("leaf1", "One"))
                        .child(Action::new("leaf2", "Two")),
                )
                .child(Action::new("leaf3", "Three")),
        ]);
        let mut menu = Menu::new(tree).with_transition_duration(Duration::from_millis(100));
        menu.open();

        let top = NodePath::root(0);
        let mid = NodePath::from([0, 0]);
        menu.activate(&top);
        menu.tick(Duration::from_millis(100));
        menu.activate(&mid);
        menu.tick(Duration::from_millis(100));

        // Collapse top again: its region now measures mid + 2 leaves + leaf3.
        menu.activate(&top);
        let rows = menu.visible_rows();
        assert_eq!(rows[0].extent, Some(Extent::Fixed(4)));
    }

    #[test]
    fn natural_width_accounts_for_depth_and_gutter() {
        let mut menu = sample_menu();
        // Top level: gutter (ADD has an icon) + "Delete" (6) = 8, "Share" +
        // marker = 9.
        assert_eq!(menu.natural_width(), 9);

        menu.activate(&NodePath::root(1));
        menu.tick(Duration::from_millis(500));
        // "Home" at depth 2: indent 2 + width 4 = 6; top level still wins.
        assert_eq!(menu.natural_width(), 9);
    }

    #[test]
    fn surface_and_header_follow_inputs() {
        let menu = Menu::new(ActionTree::empty())
            .with_heading("Share")
            .with_placement(Placement::BottomEnd);
        assert_eq!(menu.surface().mode, crate::surface::SurfaceMode::Popover);
        assert_eq!(menu.surface().placement, Placement::BottomEnd);
        assert!(menu.show_header());

        let mut mobile = Menu::new(ActionTree::empty()).with_mobile_mode(true);
        assert_eq!(mobile.surface().mode, crate::surface::SurfaceMode::Modal);
        assert_eq!(mobile.surface().placement, Placement::Bottom);
        assert!(!mobile.show_header());

        // Header visibility tracks input changes, independent of mode.
        mobile.set_show_close(true);
        assert!(mobile.show_header());
        mobile.set_show_close(false);
        mobile.set_heading(Some("Actions".into()));
        assert!(mobile.show_header());
        mobile.set_heading(None);
        assert!(!mobile.show_header());
    }

    #[test]
    fn empty_tree_degrades_gracefully() {
        let mut menu = Menu::new(ActionTree::empty());
        menu.open();
        menu.handle_event(&key(KeyCode::Down));
        assert_eq!(menu.activated_action(), None);
        assert!(menu.visible_rows().is_empty());
        assert_eq!(menu.natural_width(), 0);
    }

    #[test]
    fn duplicate_names_disable_everywhere() {
        let tree = ActionTree::new(vec![
            Action::new("DELETE", "Delete one"),
            Action::new("GROUP", "Group").child(Action::new("DELETE", "Delete two")),
        ]);
        let mut menu = Menu::new(tree)
            .with_disabled(DisabledMap::new().disable("DELETE"))
            .with_transition_duration(Duration::from_millis(100));
        menu.open();
        menu.activate(&NodePath::root(1));
        menu.tick(Duration::from_millis(100));

        assert!(menu.activate(&NodePath::root(0)).is_empty());
        assert!(menu.activate(&NodePath::from([1, 0])).is_empty());
        let rows = menu.visible_rows();
        assert!(rows.iter().filter(|r| r.action.name == "DELETE").all(|r| r.disabled));
    }

    #[test]
    fn branch_phase_reaches_expanded_via_single_completion() {
        let mut menu = sample_menu();
        let share = NodePath::root(1);
        menu.activate(&share);
        // Half the duration: still expanding.
        menu.tick(Duration::from_millis(250));
        assert!(menu.transitioning());
        menu.tick(Duration::from_millis(250));
        assert!(!menu.transitioning());
        // Settled at natural extent.
        let rows = menu.visible_rows();
        assert_eq!(rows[1].extent, Some(Extent::Auto));
    }
}
