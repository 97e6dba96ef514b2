#![forbid(unsafe_code)]

//! Hierarchical action-menu engine for menukit.
//!
//! The engine is headless: it owns the action tree's derived state
//! (visibility, disablement, collapse animation, keyboard activation,
//! surface choice, dispatch) and leaves row rendering, positioning, and the
//! dialog chrome to host collaborators.
//!
//! # Example
//!
//! ```
//! use menukit_widgets::action::{Action, ActionTree, NodePath};
//! use menukit_widgets::menu::{Menu, MenuEvent};
//! use menukit_widgets::resolve::DisabledMap;
//!
//! let mut menu = Menu::new(ActionTree::new(vec![
//!     Action::new("SHARE", "Share").child(Action::new("pdf", "PDF")),
//!     Action::new("DELETE", "Delete").danger(),
//! ]))
//! .with_disabled(DisabledMap::new().disable_with("SHARE", "nothing to share"));
//!
//! menu.open();
//! let events = menu.activate(&NodePath::root(1));
//! assert_eq!(
//!     events,
//!     vec![
//!         MenuEvent::Selected { name: "DELETE".into() },
//!         MenuEvent::CloseRequested,
//!     ]
//! );
//! ```

pub mod action;
pub mod collapse;
pub mod menu;
pub mod navigate;
pub mod resolve;
pub mod surface;

pub use action::{Action, ActionTree, IconStyle, NodePath};
pub use collapse::{CollapseController, CollapsePhase, Extent};
pub use menu::{Menu, MenuEvent, MenuRow};
pub use navigate::ActivationNavigator;
pub use resolve::{Disabled, DisabledMap, HiddenSet, ResolvedAction, resolve_level};
pub use surface::{AnchorId, Placement, SurfaceMode, SurfaceSpec};
