#![forbid(unsafe_code)]

//! Visibility and disablement resolution.
//!
//! The host supplies two global lookup tables keyed by action *name*:
//! a [`HiddenSet`] of names to exclude and a [`DisabledMap`] of names that
//! render but cannot be activated, optionally with a tooltip explaining why.
//! Both apply at every depth of the tree through plain string equality —
//! a name that repeats across branches is hidden/disabled everywhere it
//! occurs. That ambiguity is inherited from the source data model and is
//! deliberately not corrected here.
//!
//! Resolution is per level: a node's children are filtered independently of
//! the node itself, with the same tables reused recursively. [`resolve_level`]
//! is a pure function of its inputs and is re-invoked on every render;
//! caching is left to the host.

use std::collections::{HashMap, HashSet};

use crate::action::Action;

/// A disablement entry: either a bare flag or a flag with tooltip text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disabled {
    /// Disabled with no explanatory tooltip.
    Flag,
    /// Disabled with tooltip text shown on the inert entry.
    Reason(String),
}

impl Disabled {
    /// Tooltip text for this entry, if any.
    ///
    /// Empty reasons behave like [`Disabled::Flag`]: the entry is inert but
    /// no tooltip is presented.
    #[must_use]
    pub fn tooltip(&self) -> Option<&str> {
        match self {
            Self::Flag => None,
            Self::Reason(text) => {
                if text.is_empty() {
                    None
                } else {
                    Some(text)
                }
            }
        }
    }
}

/// Global action-name → disablement table.
///
/// Unknown names (entries naming no node in the tree) are inert, not errors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisabledMap {
    entries: HashMap<String, Disabled>,
}

impl DisabledMap {
    /// An empty map (nothing disabled).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable `name` with no tooltip.
    #[must_use]
    pub fn disable(mut self, name: impl Into<String>) -> Self {
        self.entries.insert(name.into(), Disabled::Flag);
        self
    }

    /// Disable `name` with tooltip text.
    #[must_use]
    pub fn disable_with(mut self, name: impl Into<String>, reason: impl Into<String>) -> Self {
        self.entries
            .insert(name.into(), Disabled::Reason(reason.into()));
        self
    }

    /// Look up the entry for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Disabled> {
        self.entries.get(name)
    }

    /// Whether `name` is disabled.
    #[must_use]
    pub fn is_disabled(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Tooltip text for `name`, if disabled with a reason.
    #[must_use]
    pub fn tooltip(&self, name: &str) -> Option<&str> {
        self.entries.get(name).and_then(Disabled::tooltip)
    }

    /// Whether the map disables nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Disabled)> for DisabledMap {
    fn from_iter<T: IntoIterator<Item = (String, Disabled)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Global set of action names excluded from rendering.
///
/// Built from an ordered name sequence with set semantics; duplicates in the
/// input are harmless.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HiddenSet {
    names: HashSet<String>,
}

impl HiddenSet {
    /// An empty set (nothing hidden).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a sequence of names.
    #[must_use]
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Hide `name`.
    #[must_use]
    pub fn hide(mut self, name: impl Into<String>) -> Self {
        self.names.insert(name.into());
        self
    }

    /// Whether `name` is hidden.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Whether the set hides nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// One renderable entry produced by [`resolve_level`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAction<'a> {
    /// Index of this action within the *unfiltered* sibling list.
    pub index: usize,

    /// The underlying action node.
    pub action: &'a Action,

    /// Whether activation is inert for this entry.
    pub disabled: bool,

    /// Tooltip text presented on the disabled entry, if any.
    pub tooltip: Option<&'a str>,

    /// Whether this sibling set reserves the leading icon gutter.
    pub gutter: bool,
}

/// Resolve one sibling level of the tree.
///
/// Filters out hidden names, derives disablement and tooltip text for the
/// survivors, and computes the shared icon-gutter flag. The gutter is a
/// property of the sibling *set*, judged over the unfiltered siblings, so
/// rows keep consistent indentation whether or not their iconed sibling is
/// currently hidden.
#[must_use]
pub fn resolve_level<'a>(
    siblings: &'a [Action],
    hidden: &HiddenSet,
    disabled: &'a DisabledMap,
) -> Vec<ResolvedAction<'a>> {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("resolve_level", siblings = siblings.len()).entered();

    let gutter = siblings
        .iter()
        .any(|a| a.icon.is_some() || a.has_leading_icon_space);

    siblings
        .iter()
        .enumerate()
        .filter(|(_, action)| !hidden.contains(&action.name))
        .map(|(index, action)| ResolvedAction {
            index,
            action,
            disabled: disabled.is_disabled(&action.name),
            tooltip: disabled.tooltip(&action.name),
            gutter,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;

    fn siblings() -> Vec<Action> {
        vec![
            Action::new("A", "Alpha").with_icon("add"),
            Action::new("B", "Beta"),
            Action::new("C", "Gamma"),
        ]
    }

    #[test]
    fn hidden_names_filtered_per_level() {
        let level = siblings();
        let hidden = HiddenSet::from_names(["B"]);
        let disabled = DisabledMap::new();
        let out = resolve_level(&level, &hidden, &disabled);
        let names: Vec<&str> = out.iter().map(|r| r.action.name.as_str()).collect();
        assert_eq!(names, ["A", "C"]);
        // Surviving entries keep their unfiltered sibling index.
        assert_eq!(out[1].index, 2);
    }

    #[test]
    fn unknown_hidden_names_are_inert() {
        let level = siblings();
        let hidden = HiddenSet::from_names(["NOPE"]);
        let disabled = DisabledMap::new();
        let out = resolve_level(&level, &hidden, &disabled);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn flag_disables_without_tooltip() {
        let level = siblings();
        let disabled = DisabledMap::new().disable("A");
        let out = resolve_level(&level, &HiddenSet::new(), &disabled);
        assert!(out[0].disabled);
        assert_eq!(out[0].tooltip, None);
        assert!(!out[1].disabled);
    }

    #[test]
    fn reason_disables_with_tooltip() {
        let level = siblings();
        let disabled = DisabledMap::new().disable_with("B", "no permission");
        let out = resolve_level(&level, &HiddenSet::new(), &disabled);
        assert!(out[1].disabled);
        assert_eq!(out[1].tooltip, Some("no permission"));
    }

    #[test]
    fn empty_reason_behaves_like_flag() {
        let level = siblings();
        let disabled = DisabledMap::new().disable_with("C", "");
        let out = resolve_level(&level, &HiddenSet::new(), &disabled);
        assert!(out[2].disabled);
        assert_eq!(out[2].tooltip, None);
    }

    #[test]
    fn gutter_propagates_across_siblings() {
        let level = siblings();
        let disabled = DisabledMap::new();
        let out = resolve_level(&level, &HiddenSet::new(), &disabled);
        assert!(out.iter().all(|r| r.gutter));
    }

    #[test]
    fn gutter_false_without_icons() {
        let level = vec![Action::new("A", "Alpha"), Action::new("B", "Beta")];
        let disabled = DisabledMap::new();
        let out = resolve_level(&level, &HiddenSet::new(), &disabled);
        assert!(out.iter().all(|r| !r.gutter));
    }

    #[test]
    fn gutter_from_leading_icon_space() {
        let level = vec![
            Action::new("A", "Alpha").with_leading_icon_space(),
            Action::new("B", "Beta"),
        ];
        let disabled = DisabledMap::new();
        let out = resolve_level(&level, &HiddenSet::new(), &disabled);
        assert!(out.iter().all(|r| r.gutter));
    }

    #[test]
    fn gutter_judged_before_filtering() {
        // The only iconed sibling is hidden; the survivors still reserve
        // the gutter.
        let level = vec![
            Action::new("A", "Alpha").with_icon("add"),
            Action::new("B", "Beta"),
        ];
        let hidden = HiddenSet::from_names(["A"]);
        let disabled = DisabledMap::new();
        let out = resolve_level(&level, &hidden, &disabled);
        assert_eq!(out.len(), 1);
        assert!(out[0].gutter);
    }

    #[test]
    fn duplicate_names_resolve_identically() {
        let level = vec![
            Action::new("DELETE", "Delete"),
            Action::new("KEEP", "Keep"),
            Action::new("DELETE", "Delete again"),
        ];
        let disabled = DisabledMap::new().disable_with("DELETE", "read only");
        let out = resolve_level(&level, &HiddenSet::new(), &disabled);
        assert!(out[0].disabled && out[2].disabled);
        assert_eq!(out[0].tooltip, out[2].tooltip);
        assert!(!out[1].disabled);
    }

    #[test]
    fn empty_level_resolves_empty() {
        let disabled = DisabledMap::new();
        let out = resolve_level(&[], &HiddenSet::new(), &disabled);
        assert!(out.is_empty());
    }

    #[test]
    fn hidden_set_from_duplicate_names() {
        let hidden = HiddenSet::from_names(["X", "X", "Y"]);
        assert!(hidden.contains("X"));
        assert!(hidden.contains("Y"));
        assert!(!hidden.contains("Z"));
    }
}
