// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Positioned items fed in by the host.

use kurbo::Rect;
use understory_index::Aabb2D;

/// A positioned, axis-aligned item in world coordinates.
///
/// Positions are owned by an external layout; the culling engine only reads them.
/// An item whose origin or size is not finite, or whose size is negative, has no
/// usable bounds and is never reported as visible while culling is enabled.
#[derive(Clone, Debug, PartialEq)]
pub struct Item<K, P = ()> {
    /// Caller-chosen identifier.
    pub id: K,
    /// Left edge in world units.
    pub x: f64,
    /// Top edge in world units.
    pub y: f64,
    /// Width in world units.
    pub width: f64,
    /// Height in world units.
    pub height: f64,
    /// Opaque caller data carried alongside the box.
    pub payload: P,
}

impl<K, P> Item<K, P> {
    /// Create an item from its origin, size and payload.
    pub const fn new(id: K, x: f64, y: f64, width: f64, height: f64, payload: P) -> Self {
        Self {
            id,
            x,
            y,
            width,
            height,
            payload,
        }
    }

    /// Create an item covering `rect`.
    pub fn from_rect(id: K, rect: Rect, payload: P) -> Self {
        let rect = rect.abs();
        Self::new(id, rect.x0, rect.y0, rect.width(), rect.height(), payload)
    }

    /// Create an item that has not been placed by layout yet.
    ///
    /// It stays in the item set (and counts towards totals) but is never visible
    /// while culling is enabled.
    pub const fn unplaced(id: K, payload: P) -> Self {
        Self::new(id, f64::NAN, f64::NAN, 0.0, 0.0, payload)
    }

    /// World-space bounds, or `None` if the position or size is unusable.
    pub fn bounds(&self) -> Option<Rect> {
        self.aabb()
            .map(|a| Rect::new(a.min_x, a.min_y, a.max_x, a.max_y))
    }

    pub(crate) fn aabb(&self) -> Option<Aabb2D<f64>> {
        let finite = self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite();
        if !finite || self.width < 0.0 || self.height < 0.0 {
            return None;
        }
        let aabb = Aabb2D::<f64>::from_xywh(self.x, self.y, self.width, self.height);
        // Huge finite inputs can still overflow to infinity.
        (aabb.max_x.is_finite() && aabb.max_y.is_finite()).then_some(aabb)
    }
}

impl<K> Item<K, ()> {
    /// Create an item without a payload.
    pub const fn bare(id: K, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(id, x, y, width, height, ())
    }
}

pub(crate) fn rect_to_aabb(rect: Rect) -> Aabb2D<f64> {
    Aabb2D::new(rect.x0, rect.y0, rect.x1, rect.y1)
}
