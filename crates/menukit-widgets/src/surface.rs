#![forbid(unsafe_code)]

//! Presentation-surface selection.
//!
//! A menu presents as an anchored popover on desktop/tablet and as a
//! bottom-sheet modal on compact devices. Device class arrives as an
//! explicit `mobile_mode` input — the engine never reads ambient device
//! state. The physical dialog chrome, focus trapping, and positioning math
//! belong to host collaborators; this module only decides *which* surface
//! and *where*.

/// Presentation mode of the menu surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SurfaceMode {
    /// Anchored popover (desktop and tablet).
    Popover,
    /// Bottom-sheet / full-surface modal (compact devices).
    Modal,
}

/// Placement of the surface relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Placement {
    /// Above the anchor, aligned to its start edge (popover default).
    #[default]
    TopStart,
    /// Above the anchor, aligned to its end edge.
    TopEnd,
    /// Below the anchor, aligned to its start edge.
    BottomStart,
    /// Below the anchor, aligned to its end edge.
    BottomEnd,
    /// Pinned to the bottom of the viewport (modal sheet).
    Bottom,
}

/// Opaque anchor/trigger handle, passed through to the positioning
/// collaborator untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnchorId(pub u64);

/// The resolved surface decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSpec {
    /// Popover or modal.
    pub mode: SurfaceMode,
    /// Where the surface lands.
    pub placement: Placement,
}

impl SurfaceSpec {
    /// Decide the surface for a device class and requested placement.
    ///
    /// Mobile always wins: compact devices get a bottom sheet regardless of
    /// the requested placement. Otherwise the caller-supplied placement is
    /// honored.
    #[must_use]
    pub fn select(mobile_mode: bool, requested: Placement) -> Self {
        if mobile_mode {
            Self {
                mode: SurfaceMode::Modal,
                placement: Placement::Bottom,
            }
        } else {
            Self {
                mode: SurfaceMode::Popover,
                placement: requested,
            }
        }
    }
}

/// Whether the surface shows a header row.
///
/// True when a heading is present (non-empty) or a close affordance is
/// requested; independent of the surface mode.
#[must_use]
pub fn show_header(heading: Option<&str>, show_close: bool) -> bool {
    heading.is_some_and(|h| !h.is_empty()) || show_close
}
