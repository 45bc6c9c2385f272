//! Enlarged hit area around the thumb.
//!
//! A visually small thumb stays easy to grab: the touch rect is the
//! configured touch size, centered on the thumb horizontally and on the
//! container vertically.

use slidekit_ui::{PxPosition, PxRect, PxSize};

use super::layout::LayoutSnapshot;

/// How far the touch size exceeds the thumb (width) and container (height).
/// Never negative.
pub fn touch_overflow(layout: &LayoutSnapshot, touch_size: PxSize) -> PxSize {
    PxSize::new(
        (touch_size.width - layout.thumb.width).max(0.0),
        (touch_size.height - layout.container.height).max(0.0),
    )
}

/// Computes the thumb's touch rect for a thumb whose left edge sits at
/// `thumb_offset`.
pub fn compute_touch_rect(
    thumb_offset: f32,
    layout: &LayoutSnapshot,
    touch_size: PxSize,
) -> PxRect {
    let overflow = touch_overflow(layout, touch_size);
    PxRect::new(
        overflow.width / 2.0 + thumb_offset + (layout.thumb.width - touch_size.width) / 2.0,
        overflow.height / 2.0 + (layout.container.height - touch_size.height) / 2.0,
        touch_size.width,
        touch_size.height,
    )
}

/// Inclusive point-in-rect test.
pub fn contains_point(rect: &PxRect, x: f32, y: f32) -> bool {
    rect.contains(PxPosition::new(x, y))
}
