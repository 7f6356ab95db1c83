#![forbid(unsafe_code)]

//! Immutable process-wide scaling configuration.
//!
//! A [`ScaleConfig`] is built once at bootstrap through
//! [`ScaleConfigBuilder`] and handed to the engine by value. There are no
//! setters after `build()`; the initialization-before-first-adaptation
//! happens-before requirement is discharged at the type level instead of by
//! convention.

use std::fmt;

use crate::metrics::DisplayMetrics;
use crate::units::UnitSupport;

// ─────────────────────────────────────────────────────────────────────────────
// Error Types
// ─────────────────────────────────────────────────────────────────────────────

/// Errors produced while validating a configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A design dimension was zero or negative.
    NonPositiveDesignSize { width_dp: f32, height_dp: f32 },
    /// A screen extent was zero or negative.
    NonPositiveScreenExtent { width_px: i32, height_px: i32 },
    /// The initial device metrics contained a non-positive scalar.
    InvalidInitMetrics(DisplayMetrics),
    /// A subunit design dimension was set but not positive.
    NonPositiveSubunitSize(f32),
    /// The private font scale was set but not positive.
    NonPositiveFontScale(f32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositiveDesignSize {
                width_dp,
                height_dp,
            } => write!(
                f,
                "design size must be positive: {width_dp} x {height_dp} dp"
            ),
            ConfigError::NonPositiveScreenExtent {
                width_px,
                height_px,
            } => write!(
                f,
                "screen size must be positive: {width_px} x {height_px} px"
            ),
            ConfigError::InvalidInitMetrics(m) => write!(
                f,
                "initial device metrics must be positive: density {}, densityDpi {}, scaledDensity {}, xdpi {}",
                m.density, m.density_dpi, m.scaled_density, m.xdpi
            ),
            ConfigError::NonPositiveSubunitSize(v) => {
                write!(f, "subunit design size must be positive, got {v}")
            }
            ConfigError::NonPositiveFontScale(v) => {
                write!(f, "private font scale must be positive, got {v}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ─────────────────────────────────────────────────────────────────────────────
// ScaleConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Frozen global scaling settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleConfig {
    design_width_dp: f32,
    design_height_dp: f32,
    screen_width_px: i32,
    screen_height_px: i32,
    init_metrics: DisplayMetrics,
    unit_support: UnitSupport,
    subunit_design_width: Option<f32>,
    subunit_design_height: Option<f32>,
    private_font_scale: Option<f32>,
    exclude_font_scale: bool,
    use_device_size: bool,
    base_on_width: bool,
}

impl ScaleConfig {
    /// Start building a configuration from the design size (in dp), the
    /// current screen size (in px), and the pre-adaptation device metrics.
    #[must_use]
    pub fn builder(
        design_width_dp: f32,
        design_height_dp: f32,
        screen_width_px: i32,
        screen_height_px: i32,
        init_metrics: DisplayMetrics,
    ) -> ScaleConfigBuilder {
        ScaleConfigBuilder {
            design_width_dp,
            design_height_dp,
            screen_width_px,
            screen_height_px,
            init_metrics,
            unit_support: UnitSupport::default(),
            subunit_design_width: None,
            subunit_design_height: None,
            private_font_scale: None,
            exclude_font_scale: false,
            use_device_size: false,
            base_on_width: true,
        }
    }

    /// Design width in dp.
    #[inline]
    #[must_use]
    pub const fn design_width_dp(&self) -> f32 {
        self.design_width_dp
    }

    /// Design height in dp.
    #[inline]
    #[must_use]
    pub const fn design_height_dp(&self) -> f32 {
        self.design_height_dp
    }

    /// The design dimension for a basis.
    #[inline]
    #[must_use]
    pub const fn design_size_dp(&self, base_on_width: bool) -> f32 {
        if base_on_width {
            self.design_width_dp
        } else {
            self.design_height_dp
        }
    }

    /// Current screen width in px.
    #[inline]
    #[must_use]
    pub const fn screen_width_px(&self) -> i32 {
        self.screen_width_px
    }

    /// Current screen height in px.
    #[inline]
    #[must_use]
    pub const fn screen_height_px(&self) -> i32 {
        self.screen_height_px
    }

    /// The screen extent for a basis.
    #[inline]
    #[must_use]
    pub const fn screen_extent_px(&self, base_on_width: bool) -> i32 {
        if base_on_width {
            self.screen_width_px
        } else {
            self.screen_height_px
        }
    }

    /// Pre-adaptation device metrics, captured at initialization.
    #[inline]
    #[must_use]
    pub const fn init_metrics(&self) -> DisplayMetrics {
        self.init_metrics
    }

    /// Which units adaptations honor.
    #[inline]
    #[must_use]
    pub const fn unit_support(&self) -> UnitSupport {
        self.unit_support
    }

    /// Subunit design size for a basis, if configured.
    #[inline]
    #[must_use]
    pub const fn subunit_design_size(&self, base_on_width: bool) -> Option<f32> {
        if base_on_width {
            self.subunit_design_width
        } else {
            self.subunit_design_height
        }
    }

    /// Private font-scale override, if configured.
    #[inline]
    #[must_use]
    pub const fn private_font_scale(&self) -> Option<f32> {
        self.private_font_scale
    }

    /// Whether the user's system font scale is ignored.
    #[inline]
    #[must_use]
    pub const fn exclude_font_scale(&self) -> bool {
        self.exclude_font_scale
    }

    /// Whether device size rather than design size is in effect.
    #[inline]
    #[must_use]
    pub const fn use_device_size(&self) -> bool {
        self.use_device_size
    }

    /// Global default basis: `true` for width.
    #[inline]
    #[must_use]
    pub const fn base_on_width(&self) -> bool {
        self.base_on_width
    }
}

/// Builder for [`ScaleConfig`].
#[derive(Debug, Clone)]
pub struct ScaleConfigBuilder {
    design_width_dp: f32,
    design_height_dp: f32,
    screen_width_px: i32,
    screen_height_px: i32,
    init_metrics: DisplayMetrics,
    unit_support: UnitSupport,
    subunit_design_width: Option<f32>,
    subunit_design_height: Option<f32>,
    private_font_scale: Option<f32>,
    exclude_font_scale: bool,
    use_device_size: bool,
    base_on_width: bool,
}

impl ScaleConfigBuilder {
    /// Set which units adaptations honor.
    #[must_use]
    pub fn unit_support(mut self, support: UnitSupport) -> Self {
        self.unit_support = support;
        self
    }

    /// Set the design size in subunits, per basis.
    ///
    /// Unset dimensions fall back to the dp design size of the request.
    #[must_use]
    pub fn subunit_design(mut self, width: Option<f32>, height: Option<f32>) -> Self {
        self.subunit_design_width = width;
        self.subunit_design_height = height;
        self
    }

    /// Pin the font scale to a fixed value instead of following the system.
    #[must_use]
    pub fn private_font_scale(mut self, scale: f32) -> Self {
        self.private_font_scale = Some(scale);
        self
    }

    /// Ignore the user's system font scale entirely.
    #[must_use]
    pub fn exclude_font_scale(mut self, exclude: bool) -> Self {
        self.exclude_font_scale = exclude;
        self
    }

    /// Use the physical device size rather than the design size.
    #[must_use]
    pub fn use_device_size(mut self, use_device: bool) -> Self {
        self.use_device_size = use_device;
        self
    }

    /// Set the global default basis: `true` for width, `false` for height.
    #[must_use]
    pub fn base_on_width(mut self, base_on_width: bool) -> Self {
        self.base_on_width = base_on_width;
        self
    }

    /// Validate and freeze the configuration.
    pub fn build(self) -> Result<ScaleConfig, ConfigError> {
        if self.design_width_dp <= 0.0 || self.design_height_dp <= 0.0 {
            return Err(ConfigError::NonPositiveDesignSize {
                width_dp: self.design_width_dp,
                height_dp: self.design_height_dp,
            });
        }
        if self.screen_width_px <= 0 || self.screen_height_px <= 0 {
            return Err(ConfigError::NonPositiveScreenExtent {
                width_px: self.screen_width_px,
                height_px: self.screen_height_px,
            });
        }
        let m = self.init_metrics;
        if m.density <= 0.0 || m.density_dpi <= 0 || m.scaled_density <= 0.0 || m.xdpi <= 0.0 {
            return Err(ConfigError::InvalidInitMetrics(m));
        }
        for size in [self.subunit_design_width, self.subunit_design_height] {
            if let Some(v) = size
                && v <= 0.0
            {
                return Err(ConfigError::NonPositiveSubunitSize(v));
            }
        }
        if let Some(v) = self.private_font_scale
            && v <= 0.0
        {
            return Err(ConfigError::NonPositiveFontScale(v));
        }
        Ok(ScaleConfig {
            design_width_dp: self.design_width_dp,
            design_height_dp: self.design_height_dp,
            screen_width_px: self.screen_width_px,
            screen_height_px: self.screen_height_px,
            init_metrics: self.init_metrics,
            unit_support: self.unit_support,
            subunit_design_width: self.subunit_design_width,
            subunit_design_height: self.subunit_design_height,
            private_font_scale: self.private_font_scale,
            exclude_font_scale: self.exclude_font_scale,
            use_device_size: self.use_device_size,
            base_on_width: self.base_on_width,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{Subunit, UnitSupport};

    fn device() -> DisplayMetrics {
        DisplayMetrics::new(2.0, 320, 2.0, 320.0)
    }

    fn base() -> ScaleConfigBuilder {
        ScaleConfig::builder(360.0, 640.0, 1080, 1920, device())
    }

    #[test]
    fn build_with_defaults() {
        let config = base().build().unwrap();
        assert_eq!(config.design_width_dp(), 360.0);
        assert_eq!(config.design_height_dp(), 640.0);
        assert_eq!(config.screen_extent_px(true), 1080);
        assert_eq!(config.screen_extent_px(false), 1920);
        assert!(config.base_on_width());
        assert!(!config.use_device_size());
        assert!(!config.exclude_font_scale());
        assert_eq!(config.private_font_scale(), None);
        assert_eq!(config.subunit_design_size(true), None);
    }

    #[test]
    fn design_size_selects_basis() {
        let config = base().build().unwrap();
        assert_eq!(config.design_size_dp(true), 360.0);
        assert_eq!(config.design_size_dp(false), 640.0);
    }

    #[test]
    fn rejects_non_positive_design_size() {
        let err = ScaleConfig::builder(0.0, 640.0, 1080, 1920, device())
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::NonPositiveDesignSize { .. }));
    }

    #[test]
    fn rejects_non_positive_screen_extent() {
        let err = ScaleConfig::builder(360.0, 640.0, 1080, 0, device())
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::NonPositiveScreenExtent { .. }));
    }

    #[test]
    fn rejects_zeroed_init_metrics() {
        let err = ScaleConfig::builder(360.0, 640.0, 1080, 1920, DisplayMetrics::default())
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidInitMetrics(_)));
    }

    #[test]
    fn rejects_non_positive_subunit_size() {
        let err = base().subunit_design(Some(-1.0), None).build().unwrap_err();
        assert_eq!(err, ConfigError::NonPositiveSubunitSize(-1.0));
    }

    #[test]
    fn rejects_non_positive_private_font_scale() {
        let err = base().private_font_scale(0.0).build().unwrap_err();
        assert_eq!(err, ConfigError::NonPositiveFontScale(0.0));
    }

    #[test]
    fn builder_options_stick() {
        let config = base()
            .unit_support(UnitSupport::with_subunit(Subunit::Pt))
            .subunit_design(Some(1440.0), Some(2560.0))
            .private_font_scale(1.5)
            .exclude_font_scale(true)
            .use_device_size(true)
            .base_on_width(false)
            .build()
            .unwrap();
        assert_eq!(config.unit_support().subunit, Subunit::Pt);
        assert_eq!(config.subunit_design_size(true), Some(1440.0));
        assert_eq!(config.subunit_design_size(false), Some(2560.0));
        assert_eq!(config.private_font_scale(), Some(1.5));
        assert!(config.exclude_font_scale());
        assert!(config.use_device_size());
        assert!(!config.base_on_width());
    }

    #[test]
    fn config_error_display_is_descriptive() {
        let err = ConfigError::NonPositiveDesignSize {
            width_dp: 0.0,
            height_dp: 640.0,
        };
        assert!(err.to_string().contains("design size"));
    }
}
