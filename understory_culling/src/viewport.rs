// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pan/zoom transform to world-space viewport mapping.
//!
//! The host's pan/zoom handler reports a [`ViewTransform`] that maps world
//! coordinates to canvas pixels (`screen = world * scale + translate`). The
//! [`ViewportTracker`] inverts it for the current canvas size and adds a padding
//! margin that is constant in screen pixels, so it shrinks in world units as the
//! user zooms in.

use kurbo::{Affine, Point, Rect, Vec2};

/// Pan/zoom transform mapping world coordinates to canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewTransform {
    /// Horizontal pan in pixels.
    pub translate_x: f64,
    /// Vertical pan in pixels.
    pub translate_y: f64,
    /// Uniform zoom factor; must be positive and finite.
    pub scale: f64,
}

impl ViewTransform {
    /// No pan, no zoom.
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 1.0);

    /// Create a transform from a pan offset and zoom factor.
    pub const fn new(translate_x: f64, translate_y: f64, scale: f64) -> Self {
        Self {
            translate_x,
            translate_y,
            scale,
        }
    }

    /// True if the transform can be inverted into a viewport.
    pub fn is_valid(&self) -> bool {
        self.translate_x.is_finite()
            && self.translate_y.is_finite()
            && self.scale.is_finite()
            && self.scale > 0.0
    }

    /// Screen-from-world transform as a Kurbo affine.
    pub fn to_affine(&self) -> Affine {
        Affine::translate(Vec2::new(self.translate_x, self.translate_y)) * Affine::scale(self.scale)
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// The world-space rectangle currently shown on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Left edge in world units.
    pub x: f64,
    /// Top edge in world units.
    pub y: f64,
    /// Visible width in world units.
    pub width: f64,
    /// Visible height in world units.
    pub height: f64,
    /// Zoom factor the viewport was derived from.
    pub scale: f64,
    /// Pre-fetch margin in world units, added on every side.
    pub padding: f64,
}

impl Viewport {
    /// Derive a viewport from a transform and canvas size in pixels.
    ///
    /// Returns `None` for a transform that is not [valid](ViewTransform::is_valid),
    /// a canvas without positive finite area, or a padding that is negative or not
    /// finite.
    pub fn from_transform(
        transform: ViewTransform,
        canvas_width_px: f64,
        canvas_height_px: f64,
        padding_px: f64,
    ) -> Option<Self> {
        let canvas_ok = canvas_width_px.is_finite()
            && canvas_height_px.is_finite()
            && canvas_width_px > 0.0
            && canvas_height_px > 0.0;
        let padding_ok = padding_px.is_finite() && padding_px >= 0.0;
        if !transform.is_valid() || !canvas_ok || !padding_ok {
            return None;
        }
        let scale = transform.scale;
        let vp = Self {
            x: -transform.translate_x / scale,
            y: -transform.translate_y / scale,
            width: canvas_width_px / scale,
            height: canvas_height_px / scale,
            scale,
            padding: padding_px / scale,
        };
        // Tiny scales can overflow the division.
        let finite = vp.x.is_finite()
            && vp.y.is_finite()
            && vp.x + vp.width < f64::INFINITY
            && vp.y + vp.height < f64::INFINITY
            && vp.padding.is_finite();
        finite.then_some(vp)
    }

    /// Visible rectangle without padding.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Visible rectangle grown by `padding` on every side; this is the culling region.
    pub fn padded_rect(&self) -> Rect {
        self.rect().inflate(self.padding, self.padding)
    }

    /// Screen-from-world transform for this viewport.
    pub fn screen_from_world(&self) -> Affine {
        Affine::scale(self.scale) * Affine::translate(Vec2::new(-self.x, -self.y))
    }

    /// Map a canvas pixel position to world coordinates.
    pub fn screen_to_world(&self, p: Point) -> Point {
        self.screen_from_world().inverse() * p
    }

    /// Map a world position to canvas pixels.
    pub fn world_to_screen(&self, p: Point) -> Point {
        self.screen_from_world() * p
    }

    /// True if `rect` overlaps the padded culling region (touching edges count).
    pub fn intersects(&self, rect: Rect) -> bool {
        let region = self.padded_rect();
        rect.x0 <= region.x1 && region.x0 <= rect.x1 && rect.y0 <= region.y1 && region.y0 <= rect.y1
    }

    /// True if `rect` lies wholly inside the unpadded visible rectangle.
    pub fn contains_rect(&self, rect: Rect) -> bool {
        let view = self.rect();
        view.x0 <= rect.x0 && view.y0 <= rect.y0 && rect.x1 <= view.x1 && rect.y1 <= view.y1
    }
}

/// Tracks the current viewport across pan/zoom events.
#[derive(Clone, Debug)]
pub struct ViewportTracker {
    padding_px: f64,
    transform: ViewTransform,
    canvas: (f64, f64),
    current: Option<Viewport>,
}

impl ViewportTracker {
    /// Create a tracker with the given screen-space padding.
    ///
    /// No viewport is known until the first [`update`](Self::update). A negative or
    /// non-finite padding is treated as zero.
    pub fn new(padding_px: f64) -> Self {
        Self {
            padding_px: sanitize_padding(padding_px),
            transform: ViewTransform::IDENTITY,
            canvas: (0.0, 0.0),
            current: None,
        }
    }

    /// Recompute the viewport for a new transform and canvas size.
    ///
    /// Degenerate input (non-positive or non-finite scale, empty canvas) clears the
    /// viewport and returns `None`; callers then see an empty visible set until a
    /// valid update arrives.
    pub fn update(
        &mut self,
        transform: ViewTransform,
        canvas_width_px: f64,
        canvas_height_px: f64,
    ) -> Option<Viewport> {
        self.transform = transform;
        self.canvas = (canvas_width_px, canvas_height_px);
        self.current = Viewport::from_transform(
            transform,
            canvas_width_px,
            canvas_height_px,
            self.padding_px,
        );
        if self.current.is_none() {
            log::debug!(
                "rejected degenerate viewport: {transform:?} on {canvas_width_px}x{canvas_height_px} px"
            );
        }
        self.current
    }

    /// Change the screen-space padding and re-derive the current viewport.
    pub fn set_padding_px(&mut self, padding_px: f64) -> Option<Viewport> {
        self.padding_px = sanitize_padding(padding_px);
        if self.current.is_some() {
            self.current = Viewport::from_transform(
                self.transform,
                self.canvas.0,
                self.canvas.1,
                self.padding_px,
            );
        }
        self.current
    }

    /// The current viewport, if the last update was valid.
    pub fn viewport(&self) -> Option<Viewport> {
        self.current
    }

    /// The last transform reported by the host, valid or not.
    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    /// Screen-space padding in pixels.
    pub fn padding_px(&self) -> f64 {
        self.padding_px
    }
}

fn sanitize_padding(padding_px: f64) -> f64 {
    if padding_px.is_finite() && padding_px > 0.0 {
        padding_px
    } else {
        0.0
    }
}
