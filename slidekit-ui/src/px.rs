//! Pixel geometry for slidekit components.
//!
//! Layout passes in the host framework report fractional pixel sizes, so
//! every type here carries `f32` components.
//!
//! # Key Types
//!
//! - [`PxSize`] - A measured 2D size (width, height), never negative
//! - [`PxPosition`] - A point relative to a component's top-left corner
//! - [`PxRect`] - An axis-aligned rectangle used for hit-testing
//!
//! # Coordinate System
//!
//! - Origin (0, 0) at the top-left corner of the slider container
//! - X-axis increases to the right
//! - Y-axis increases downward
//!
//! # Example
//!
//! ```
//! use slidekit_ui::px::{PxPosition, PxRect, PxSize};
//!
//! let size = PxSize::new(40.0, 40.0);
//! let rect = PxRect::new(10.0, 0.0, size.width, size.height);
//!
//! assert!(rect.contains(PxPosition::new(50.0, 40.0)));
//! assert!(!rect.contains(PxPosition::new(50.1, 40.0)));
//! ```

/// A measured size in pixel space.
///
/// Negative and non-finite inputs are normalized to zero by
/// [`PxSize::sanitized`], which is what layout consumers should store.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PxSize {
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl PxSize {
    /// A zero-sized value.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Creates a new size.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns a copy with negative or non-finite components replaced by zero.
    ///
    /// ```
    /// use slidekit_ui::px::PxSize;
    ///
    /// let size = PxSize::new(-3.0, f32::NAN).sanitized();
    /// assert_eq!(size, PxSize::ZERO);
    /// ```
    pub fn sanitized(self) -> Self {
        fn clean(v: f32) -> f32 {
            if v.is_finite() { v.max(0.0) } else { 0.0 }
        }
        Self {
            width: clean(self.width),
            height: clean(self.height),
        }
    }

    /// Whether both components are finite and non-negative.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }
}

impl From<(f32, f32)> for PxSize {
    fn from((width, height): (f32, f32)) -> Self {
        Self::new(width, height)
    }
}

/// A point in pixel space.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PxPosition {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl PxPosition {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a new position.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in pixel space.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PxRect {
    /// The x-coordinate of the top-left corner.
    pub x: f32,
    /// The y-coordinate of the top-left corner.
    pub y: f32,
    /// The width of the rectangle.
    pub width: f32,
    /// The height of the rectangle.
    pub height: f32,
}

impl PxRect {
    /// A zero rectangle at the origin.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Creates a new rectangle.
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Width and height.
    pub fn size(&self) -> PxSize {
        PxSize::new(self.width, self.height)
    }

    /// Center point.
    pub fn center(&self) -> PxPosition {
        PxPosition::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Checks whether a point lies inside the rectangle.
    ///
    /// Bounds are inclusive on all four sides, so a point exactly on the right
    /// or bottom edge is still a hit.
    pub fn contains(&self, point: PxPosition) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && point.x <= self.x + self.width
            && point.y <= self.y + self.height
    }
}
