#![forbid(unsafe_code)]

//! Length units and conversion to physical pixels.
//!
//! Conversion is pure: a unit, a value, and a metrics view in — pixels out.
//! No side effects, safe for concurrent use.

use bitflags::bitflags;

use crate::metrics::DisplayMetrics;

/// An abstract length unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// Raw physical pixels.
    Px,
    /// Device-independent pixels (design units).
    Dp,
    /// Scale-independent pixels (follow the user font-scale preference).
    Sp,
    /// Points, 1/72 inch.
    Pt,
    /// Inches.
    In,
    /// Millimeters.
    Mm,
}

/// Convert a length in `unit` to physical pixels under `metrics`.
///
/// `Dp` deliberately multiplies by `density_dpi`, matching the upstream
/// dimension table this crate reproduces.
#[inline]
#[must_use]
pub fn apply_dimension(unit: Unit, value: f32, metrics: &DisplayMetrics) -> f32 {
    match unit {
        Unit::Px => value,
        Unit::Dp => value * metrics.density_dpi as f32,
        Unit::Sp => value * metrics.scaled_density,
        Unit::Pt => value * metrics.xdpi * (1.0 / 72.0),
        Unit::In => value * metrics.xdpi,
        Unit::Mm => value * metrics.xdpi * (1.0 / 25.4),
    }
}

/// Convert to integer pixels, rounding half up.
#[inline]
#[must_use]
pub fn to_px(unit: Unit, value: f32, metrics: &DisplayMetrics) -> i32 {
    (apply_dimension(unit, value, metrics) + 0.5) as i32
}

/// `dp` to rounded integer pixels.
#[inline]
#[must_use]
pub fn dp_to_px(value: f32, metrics: &DisplayMetrics) -> i32 {
    to_px(Unit::Dp, value, metrics)
}

/// `sp` to rounded integer pixels.
#[inline]
#[must_use]
pub fn sp_to_px(value: f32, metrics: &DisplayMetrics) -> i32 {
    to_px(Unit::Sp, value, metrics)
}

/// `pt` to rounded integer pixels.
#[inline]
#[must_use]
pub fn pt_to_px(value: f32, metrics: &DisplayMetrics) -> i32 {
    to_px(Unit::Pt, value, metrics)
}

/// Inches to rounded integer pixels.
#[inline]
#[must_use]
pub fn in_to_px(value: f32, metrics: &DisplayMetrics) -> i32 {
    to_px(Unit::In, value, metrics)
}

/// `mm` to rounded integer pixels.
#[inline]
#[must_use]
pub fn mm_to_px(value: f32, metrics: &DisplayMetrics) -> i32 {
    to_px(Unit::Mm, value, metrics)
}

bitflags! {
    /// Which main units an adaptation is allowed to overwrite.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct UnitFlags: u8 {
        /// Honor `dp`: overwrite `density` and `density_dpi`.
        const DP = 1 << 0;
        /// Honor `sp`: overwrite `scaled_density`.
        const SP = 1 << 1;
    }
}

impl Default for UnitFlags {
    fn default() -> Self {
        UnitFlags::DP | UnitFlags::SP
    }
}

/// The active subunit mode, selecting how the written `xdpi` is scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Subunit {
    /// Subunits disabled; `xdpi` keeps its baseline value.
    #[default]
    None,
    /// Points: written `xdpi` is the linear value × 72.
    Pt,
    /// Inches: written `xdpi` is the linear value as-is.
    In,
    /// Millimeters: written `xdpi` is the linear value × 25.4.
    Mm,
}

impl Subunit {
    /// Multiplier converting linear pixels-per-subunit into the written
    /// `xdpi` convention, or `None` when subunits are disabled.
    #[inline]
    #[must_use]
    pub const fn write_scale(self) -> Option<f32> {
        match self {
            Subunit::None => None,
            Subunit::Pt => Some(72.0),
            Subunit::In => Some(1.0),
            Subunit::Mm => Some(25.4),
        }
    }
}

/// Which of dp / sp / subunits an adaptation honors.
///
/// Unsupported fields keep the configured baseline instead of the computed
/// value when a snapshot is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnitSupport {
    /// dp / sp enablement.
    pub flags: UnitFlags,
    /// Active subunit mode.
    pub subunit: Subunit,
}

impl UnitSupport {
    /// Support for all main units with the given subunit mode.
    #[must_use]
    pub fn with_subunit(subunit: Subunit) -> Self {
        Self {
            flags: UnitFlags::default(),
            subunit,
        }
    }

    /// Whether `dp` lengths are honored.
    #[inline]
    #[must_use]
    pub const fn supports_dp(&self) -> bool {
        self.flags.contains(UnitFlags::DP)
    }

    /// Whether `sp` lengths are honored.
    #[inline]
    #[must_use]
    pub const fn supports_sp(&self) -> bool {
        self.flags.contains(UnitFlags::SP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(density: f32, density_dpi: i32, scaled_density: f32, xdpi: f32) -> DisplayMetrics {
        DisplayMetrics::new(density, density_dpi, scaled_density, xdpi)
    }

    #[test]
    fn px_is_identity() {
        let m = metrics(3.0, 480, 3.0, 160.0);
        assert_eq!(apply_dimension(Unit::Px, 17.5, &m), 17.5);
    }

    #[test]
    fn dp_multiplies_by_density_dpi() {
        let m = metrics(3.0, 480, 3.0, 160.0);
        assert_eq!(apply_dimension(Unit::Dp, 2.0, &m), 960.0);
    }

    #[test]
    fn sp_multiplies_by_scaled_density() {
        let m = metrics(3.0, 480, 3.5, 160.0);
        assert_eq!(apply_dimension(Unit::Sp, 10.0, &m), 35.0);
    }

    #[test]
    fn one_inch_is_xdpi_pixels() {
        let m = metrics(1.0, 160, 1.0, 72.0);
        assert!((apply_dimension(Unit::In, 1.0, &m) - 72.0).abs() < 1e-4);
    }

    #[test]
    fn seventy_two_points_is_one_inch() {
        let m = metrics(1.0, 160, 1.0, 72.0);
        assert!((apply_dimension(Unit::Pt, 72.0, &m) - 72.0).abs() < 1e-4);
    }

    #[test]
    fn one_inch_of_millimeters_is_one_inch() {
        let m = metrics(1.0, 160, 1.0, 1.0);
        assert!((apply_dimension(Unit::Mm, 25.4, &m) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn to_px_rounds_half_up() {
        let m = metrics(1.0, 160, 1.5, 160.0);
        // 3.0 sp * 1.5 = 4.5 -> 5
        assert_eq!(sp_to_px(3.0, &m), 5);
        // 1.0 px short of the boundary stays down
        assert_eq!(to_px(Unit::Px, 4.49, &m), 4);
    }

    #[test]
    fn dp_helper_matches_apply_dimension() {
        let m = metrics(2.0, 320, 2.0, 320.0);
        assert_eq!(dp_to_px(1.0, &m), 320);
        assert_eq!(pt_to_px(72.0, &m), 320);
        assert_eq!(in_to_px(1.0, &m), 320);
        assert_eq!(mm_to_px(25.4, &m), 320);
    }

    #[test]
    fn default_support_honors_dp_and_sp_without_subunits() {
        let support = UnitSupport::default();
        assert!(support.supports_dp());
        assert!(support.supports_sp());
        assert_eq!(support.subunit, Subunit::None);
    }

    #[test]
    fn subunit_write_scales() {
        assert_eq!(Subunit::None.write_scale(), None);
        assert_eq!(Subunit::Pt.write_scale(), Some(72.0));
        assert_eq!(Subunit::In.write_scale(), Some(1.0));
        assert_eq!(Subunit::Mm.write_scale(), Some(25.4));
    }

    #[test]
    fn support_can_disable_individual_units() {
        let support = UnitSupport {
            flags: UnitFlags::DP,
            subunit: Subunit::Mm,
        };
        assert!(support.supports_dp());
        assert!(!support.supports_sp());
    }
}
