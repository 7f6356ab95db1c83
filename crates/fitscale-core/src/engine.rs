#![forbid(unsafe_code)]

//! The adaptation engine.
//!
//! [`AdaptEngine`] owns the frozen [`ScaleConfig`], the metrics cache, and
//! the override registry. The process bootstrap constructs it once and
//! threads it to wherever unit activation happens; there is no global
//! accessor.
//!
//! # Threading
//!
//! `adapt*`, `activate`, and `revert` mutate framework-owned live metrics
//! views through the sink, and the rendering path reads those views without
//! synchronization. They must therefore run on the framework's designated
//! event thread — the thread that constructed the engine. Violations are
//! caller bugs and fail fast with a panic. The cache and registry remain
//! independently lock-guarded so that setup code on other threads can
//! register overrides safely.
//!
//! # Applying a snapshot
//!
//! A resolved snapshot is not written verbatim: each field is gated by the
//! configured [`UnitSupport`](crate::units::UnitSupport). Unsupported fields keep the initial device
//! baseline, and the written `xdpi` is scaled into the active subunit's
//! pixels-per-unit convention (pt ×72, in ×1, mm ×25.4). The gated update
//! then goes to the sink twice — once for the per-unit view, once for the
//! process-wide view — because the two views may diverge in ownership
//! lifetime.

use std::thread::{self, ThreadId};

use crate::cache::{CacheKey, MetricsCache};
use crate::config::ScaleConfig;
use crate::metrics::{DisplayMetrics, MetricsSnapshot};
use crate::registry::{CustomAdaptInfo, OverrideRegistry, UnitTypeId};
use crate::units::Subunit;

/// Receives computed metric values and writes them into the live views.
///
/// Implemented by the integrating application; this crate never holds a
/// reference to the live metrics objects beyond these calls.
pub trait MetricsSink {
    /// Write the values into the activating unit's own metrics view.
    fn apply_to_unit(&mut self, metrics: &DisplayMetrics);

    /// Write the values into the process-wide metrics view.
    fn apply_to_process(&mut self, metrics: &DisplayMetrics);
}

/// Adaptation parameters a UI unit declares for itself.
pub trait CustomAdapt {
    /// Design size in dp along the declared basis. Non-positive means
    /// "use the global design default".
    fn size_in_dp(&self) -> f32;

    /// `true` to adapt proportionally to width, `false` to height.
    fn is_base_on_width(&self) -> bool;
}

/// Computes, memoizes, and applies display scaling metrics.
#[derive(Debug)]
pub struct AdaptEngine {
    config: ScaleConfig,
    cache: MetricsCache,
    registry: OverrideRegistry,
    ui_thread: ThreadId,
}

impl AdaptEngine {
    /// Construct the engine, designating the current thread as the UI
    /// thread all adaptation calls must come from.
    #[must_use]
    pub fn new(config: ScaleConfig) -> Self {
        Self {
            config,
            cache: MetricsCache::new(),
            registry: OverrideRegistry::new(),
            ui_thread: thread::current().id(),
        }
    }

    /// The frozen configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &ScaleConfig {
        &self.config
    }

    /// The snapshot cache.
    #[inline]
    #[must_use]
    pub const fn cache(&self) -> &MetricsCache {
        &self.cache
    }

    /// The per-type override registry.
    #[inline]
    #[must_use]
    pub const fn registry(&self) -> &OverrideRegistry {
        &self.registry
    }

    fn assert_ui_thread(&self) {
        assert_eq!(
            thread::current().id(),
            self.ui_thread,
            "adaptation must run on the thread that constructed the engine"
        );
    }

    /// Resolve and apply the adaptation a unit activation calls for.
    ///
    /// Resolution order: an excluded type reverts to the device metrics; a
    /// registry entry supplies third-party parameters; otherwise the unit's
    /// own [`CustomAdapt`] declaration, if any; otherwise the global
    /// defaults.
    pub fn activate(
        &self,
        type_id: UnitTypeId,
        custom: Option<&dyn CustomAdapt>,
        sink: &mut dyn MetricsSink,
    ) {
        if self.registry.is_excluded(type_id) {
            #[cfg(feature = "tracing")]
            tracing::debug!(type_id = %type_id, "excluded from adaptation, reverting");
            self.revert(sink);
            return;
        }
        if let Some(info) = self.registry.custom_for(type_id) {
            self.adapt_with(&info, sink);
            return;
        }
        match custom {
            Some(custom) => self.adapt_custom(custom, sink),
            None => self.adapt_global(sink),
        }
    }

    /// Adapt using the global design defaults.
    pub fn adapt_global(&self, sink: &mut dyn MetricsSink) {
        let base_on_width = self.config.base_on_width();
        self.adapt(self.config.design_size_dp(base_on_width), base_on_width, sink);
    }

    /// Adapt using a unit's own declared parameters.
    ///
    /// A non-positive declared size falls back to the global design default
    /// for the declared basis.
    pub fn adapt_custom(&self, custom: &dyn CustomAdapt, sink: &mut dyn MetricsSink) {
        let base_on_width = custom.is_base_on_width();
        let mut size_in_dp = custom.size_in_dp();
        if size_in_dp <= 0.0 {
            size_in_dp = self.config.design_size_dp(base_on_width);
        }
        self.adapt(size_in_dp, base_on_width, sink);
    }

    /// Adapt using registry-supplied third-party parameters.
    ///
    /// Same non-positive fallback as [`adapt_custom`](Self::adapt_custom).
    pub fn adapt_with(&self, info: &CustomAdaptInfo, sink: &mut dyn MetricsSink) {
        let mut size_in_dp = info.size_in_dp;
        if size_in_dp <= 0.0 {
            size_in_dp = self.config.design_size_dp(info.base_on_width);
        }
        self.adapt(size_in_dp, info.base_on_width, sink);
    }

    /// Compute (or retrieve) the metrics for a design size and apply them.
    ///
    /// # Panics
    ///
    /// Panics when called off the designated UI thread or with a
    /// non-positive `size_in_dp`; both signal caller bugs.
    pub fn adapt(&self, size_in_dp: f32, base_on_width: bool, sink: &mut dyn MetricsSink) {
        self.assert_ui_thread();
        assert!(
            size_in_dp > 0.0,
            "design size must be positive, got {size_in_dp}"
        );

        let subunit_design_size = self
            .config
            .subunit_design_size(base_on_width)
            .unwrap_or(size_in_dp);
        let screen_extent = self.config.screen_extent_px(base_on_width);
        let init = self.config.init_metrics();

        let key = CacheKey::pack(
            size_in_dp,
            subunit_design_size,
            screen_extent,
            init.scaled_density,
            base_on_width,
            self.config.use_device_size(),
        );

        let snapshot = self.cache.resolve(key, || {
            self.compute(size_in_dp, subunit_design_size, screen_extent)
        });

        #[cfg(feature = "tracing")]
        tracing::debug!(
            size_in_dp,
            base_on_width,
            key = key.bits(),
            density = snapshot.density,
            density_dpi = snapshot.density_dpi,
            scaled_density = snapshot.scaled_density,
            xdpi = snapshot.xdpi,
            screen_width_dp = snapshot.screen_width_dp,
            screen_height_dp = snapshot.screen_height_dp,
            "adapted"
        );

        self.apply(snapshot.display_metrics(), sink);
    }

    /// Restore the initial device metrics in both live views.
    ///
    /// Recomputes from the stored pre-adaptation snapshot instead of the
    /// cache: the baseline `xdpi` is pre-divided by the subunit convention
    /// so that the shared apply step's scaling lands back on the captured
    /// value exactly.
    ///
    /// # Panics
    ///
    /// Panics when called off the designated UI thread.
    pub fn revert(&self, sink: &mut dyn MetricsSink) {
        self.assert_ui_thread();
        let mut metrics = self.config.init_metrics();
        match self.config.unit_support().subunit {
            Subunit::Pt => metrics.xdpi /= 72.0,
            Subunit::Mm => metrics.xdpi /= 25.4,
            Subunit::None | Subunit::In => {}
        }
        #[cfg(feature = "tracing")]
        tracing::debug!("reverted to initial device metrics");
        self.apply(metrics, sink);
    }

    fn compute(
        &self,
        size_in_dp: f32,
        subunit_design_size: f32,
        screen_extent: i32,
    ) -> MetricsSnapshot {
        let init = self.config.init_metrics();
        let density = screen_extent as f32 / size_in_dp;
        let scaled_density = match self.config.private_font_scale() {
            Some(font_scale) => density * font_scale,
            None => {
                let system_font_scale = if self.config.exclude_font_scale() {
                    1.0
                } else {
                    init.scaled_density / init.density
                };
                density * system_font_scale
            }
        };
        MetricsSnapshot {
            density,
            density_dpi: (density * 160.0) as i32,
            scaled_density,
            xdpi: screen_extent as f32 / subunit_design_size,
            screen_width_dp: (self.config.screen_width_px() as f32 / density) as i32,
            screen_height_dp: (self.config.screen_height_px() as f32 / density) as i32,
        }
    }

    /// Gate each field by unit support, then write the update into the
    /// per-unit view and the process-wide view as two explicit calls.
    fn apply(&self, computed: DisplayMetrics, sink: &mut dyn MetricsSink) {
        let support = self.config.unit_support();
        // Unsupported fields keep the initial device baseline.
        let mut update = self.config.init_metrics();
        if support.supports_dp() {
            update.density = computed.density;
            update.density_dpi = computed.density_dpi;
        }
        if support.supports_sp() {
            update.scaled_density = computed.scaled_density;
        }
        if let Some(scale) = support.subunit.write_scale() {
            update.xdpi = computed.xdpi * scale;
        }
        sink.apply_to_unit(&update);
        sink.apply_to_process(&update);
    }
}
