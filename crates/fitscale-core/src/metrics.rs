#![forbid(unsafe_code)]

//! Display metric value types.

/// The four scalar metrics a live display view carries.
///
/// This is both the input to unit conversion and the payload handed to a
/// [`MetricsSink`](crate::engine::MetricsSink) when an adaptation is applied.
/// The live, framework-owned metrics objects themselves stay outside this
/// crate; only their scalar values pass through here.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisplayMetrics {
    /// Physical pixels per design unit (dp).
    pub density: f32,
    /// Density scaled to the 160-dpi baseline.
    pub density_dpi: i32,
    /// Density adjusted for the user's font-scale preference.
    pub scaled_density: f32,
    /// Physical pixels per subunit (pt / in / mm conversions).
    pub xdpi: f32,
}

impl DisplayMetrics {
    /// Create a new metrics value.
    #[inline]
    #[must_use]
    pub const fn new(density: f32, density_dpi: i32, scaled_density: f32, xdpi: f32) -> Self {
        Self {
            density,
            density_dpi,
            scaled_density,
            xdpi,
        }
    }
}

/// An immutable computed adaptation result.
///
/// Every field derives from one `(design size, basis, screen extent,
/// font scale)` tuple. Once a snapshot is cached under a packed key, any
/// later resolution of that key returns a bit-identical value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsSnapshot {
    /// Physical pixels per design unit along the chosen basis.
    pub density: f32,
    /// `trunc(density * 160)`.
    pub density_dpi: i32,
    /// Density with the font-scale policy applied.
    pub scaled_density: f32,
    /// Physical pixels per design subunit along the chosen basis.
    pub xdpi: f32,
    /// Screen width expressed in design units.
    pub screen_width_dp: i32,
    /// Screen height expressed in design units.
    pub screen_height_dp: i32,
}

impl MetricsSnapshot {
    /// The four scalar fields that get written into live views.
    #[inline]
    #[must_use]
    pub const fn display_metrics(&self) -> DisplayMetrics {
        DisplayMetrics::new(
            self.density,
            self.density_dpi,
            self.scaled_density,
            self.xdpi,
        )
    }
}
