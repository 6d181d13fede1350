//! Sticky product-panel placement.
//!
//! On the product page the details panel tracks the gallery as the visitor
//! scrolls: it starts in normal flow, pins to the viewport once scrolled past,
//! and parks at the bottom of its container when the gallery runs out. The
//! resolver is a pure function of viewport and layout measurements; the same
//! transitions are applied client-side from data attributes.

/// Viewport width below which the panel never leaves normal flow.
pub const STICKY_MIN_VIEWPORT_WIDTH: u32 = 1024;

/// Distance kept between the pinned panel and the viewport top, in pixels.
pub const STICKY_TOP_OFFSET: i64 = 24;

/// Where the panel sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Normal document flow.
    Static,
    /// Fixed relative to the viewport.
    Pinned,
    /// Absolutely positioned at the bottom of its container.
    Bottom,
}

impl Placement {
    /// CSS class applied for this placement.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Static => "panel--static",
            Self::Pinned => "panel--pinned",
            Self::Bottom => "panel--bottom",
        }
    }
}

/// Measurements the resolver works from, all in pixels.
#[derive(Debug, Clone, Copy)]
pub struct StickyLayout {
    pub viewport_width: u32,
    /// Document offset of the container's top edge.
    pub container_top: i64,
    /// Document offset of the container's bottom edge.
    pub container_bottom: i64,
    /// Height of the panel itself.
    pub panel_height: i64,
}

/// Placement for the initial server render.
///
/// No measurements exist server-side, so the resolver runs against an
/// unmeasured layout: a zero-width viewport resolves to normal flow, which
/// is also what a visitor without JavaScript gets.
#[must_use]
pub fn initial_placement() -> Placement {
    resolve_placement(
        StickyLayout {
            viewport_width: 0,
            container_top: 0,
            container_bottom: 0,
            panel_height: 0,
        },
        0,
    )
}

/// Resolve the panel placement for a scroll offset.
///
/// Narrow viewports always resolve to [`Placement::Static`], regardless of
/// scroll position.
#[must_use]
pub fn resolve_placement(layout: StickyLayout, scroll_y: i64) -> Placement {
    if layout.viewport_width < STICKY_MIN_VIEWPORT_WIDTH {
        return Placement::Static;
    }

    let pin_start = layout.container_top - STICKY_TOP_OFFSET;
    let pin_end = layout.container_bottom - layout.panel_height - STICKY_TOP_OFFSET;

    // A panel taller than its container never pins.
    if pin_end <= pin_start {
        return Placement::Static;
    }

    if scroll_y < pin_start {
        Placement::Static
    } else if scroll_y < pin_end {
        Placement::Pinned
    } else {
        Placement::Bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYOUT: StickyLayout = StickyLayout {
        viewport_width: 1440,
        container_top: 200,
        container_bottom: 3000,
        panel_height: 800,
    };

    #[test]
    fn test_narrow_viewport_always_static() {
        let narrow = StickyLayout {
            viewport_width: 1023,
            ..LAYOUT
        };
        for scroll_y in [0, 500, 2500, 10_000] {
            assert_eq!(resolve_placement(narrow, scroll_y), Placement::Static);
        }
    }

    #[test]
    fn test_placement_transitions() {
        // Above the container: normal flow.
        assert_eq!(resolve_placement(LAYOUT, 0), Placement::Static);
        // Scrolled past the top: pinned.
        assert_eq!(resolve_placement(LAYOUT, 500), Placement::Pinned);
        // Past the point where the panel bottom would leave the container.
        assert_eq!(resolve_placement(LAYOUT, 2500), Placement::Bottom);
    }

    #[test]
    fn test_boundaries() {
        let pin_start = LAYOUT.container_top - STICKY_TOP_OFFSET;
        let pin_end = LAYOUT.container_bottom - LAYOUT.panel_height - STICKY_TOP_OFFSET;

        assert_eq!(resolve_placement(LAYOUT, pin_start - 1), Placement::Static);
        assert_eq!(resolve_placement(LAYOUT, pin_start), Placement::Pinned);
        assert_eq!(resolve_placement(LAYOUT, pin_end - 1), Placement::Pinned);
        assert_eq!(resolve_placement(LAYOUT, pin_end), Placement::Bottom);
    }

    #[test]
    fn test_initial_placement_is_normal_flow() {
        assert_eq!(initial_placement(), Placement::Static);
        assert_eq!(initial_placement().css_class(), "panel--static");
    }

    #[test]
    fn test_oversized_panel_never_pins() {
        let oversized = StickyLayout {
            panel_height: 5000,
            ..LAYOUT
        };
        for scroll_y in [0, 1000, 10_000] {
            assert_eq!(resolve_placement(oversized, scroll_y), Placement::Static);
        }
    }
}
