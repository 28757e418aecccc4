//! Drawing-surface sizing.
//!
//! Each chart surface is resized to its container's current width before
//! every repaint; height is a fixed constant regardless of content volume.
//! The device pixel ratio is carried so the raster backend can allocate a
//! physical buffer that stays crisp on high-density displays.

/// Fixed chart height in logical units. Content that would overflow is
/// truncated by the chart routines rather than the surface growing.
pub const CHART_HEIGHT: f32 = 300.0;

/// Logical width used when the container reports no width (not laid out yet).
pub const FALLBACK_WIDTH: f32 = 400.0;

/// Horizontal container padding subtracted from the reported width.
const CONTAINER_PADDING: f32 = 20.0;

/// Logical and physical dimensions of one chart surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    logical_width: f32,
    scale_factor: f32,
}

impl Surface {
    /// Size a surface from the container's current width and the display's
    /// device pixel ratio.
    pub fn from_container(container_width: f32, scale_factor: f32) -> Self {
        let width = if container_width > 0.0 {
            container_width
        } else {
            FALLBACK_WIDTH
        };
        let scale_factor = if scale_factor > 0.0 { scale_factor } else { 1.0 };
        Surface {
            logical_width: width - CONTAINER_PADDING,
            scale_factor,
        }
    }

    pub fn logical_width(&self) -> f32 {
        self.logical_width
    }

    pub fn logical_height(&self) -> f32 {
        CHART_HEIGHT
    }

    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    /// Physical buffer width in device pixels.
    pub fn physical_width(&self) -> u32 {
        (self.logical_width * self.scale_factor).round() as u32
    }

    /// Physical buffer height in device pixels.
    pub fn physical_height(&self) -> u32 {
        (CHART_HEIGHT * self.scale_factor).round() as u32
    }
}
