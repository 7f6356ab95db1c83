#![forbid(unsafe_code)]

//! Bootstrap demo: builds a configuration for a simulated 1080×1920 phone,
//! constructs the engine, registers third-party overrides, and drives a
//! few unit activations against in-memory metrics views.
//!
//! Run with `RUST_LOG=debug` to see the engine's own tracing output.

use fitscale_core::config::ScaleConfig;
use fitscale_core::engine::{AdaptEngine, CustomAdapt, MetricsSink};
use fitscale_core::metrics::DisplayMetrics;
use fitscale_core::registry::{CustomAdaptInfo, UnitTypeId};
use fitscale_core::units::{Unit, apply_dimension};
use tracing::info;
use tracing_subscriber::EnvFilter;

const HOME: UnitTypeId = UnitTypeId::new("demo.home");
const SETTINGS: UnitTypeId = UnitTypeId::new("demo.settings");
const VENDOR_PLAYER: UnitTypeId = UnitTypeId::new("vendor.player");
const VENDOR_MAP: UnitTypeId = UnitTypeId::new("vendor.map");

/// Stand-in for the framework's live metrics objects.
#[derive(Debug, Default)]
struct LiveViews {
    unit: DisplayMetrics,
    process: DisplayMetrics,
}

impl MetricsSink for LiveViews {
    fn apply_to_unit(&mut self, metrics: &DisplayMetrics) {
        self.unit = *metrics;
    }

    fn apply_to_process(&mut self, metrics: &DisplayMetrics) {
        self.process = *metrics;
    }
}

/// A screen that declares its own design size (a 600 dp wide dialog).
struct SettingsScreen;

impl CustomAdapt for SettingsScreen {
    fn size_in_dp(&self) -> f32 {
        600.0
    }

    fn is_base_on_width(&self) -> bool {
        true
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // A 1080×1920 device reporting density 2.0 before adaptation, with a
    // layout designed against 360 dp of width.
    let device = DisplayMetrics::new(2.0, 320, 2.0, 320.0);
    let config = ScaleConfig::builder(360.0, 640.0, 1080, 1920, device)
        .build()
        .expect("demo config is valid");
    let engine = AdaptEngine::new(config);

    // Third-party screens registered during setup.
    engine
        .registry()
        .set_custom(VENDOR_PLAYER, CustomAdaptInfo::new(540.0, true));
    engine.registry().exclude(VENDOR_MAP);

    let mut views = LiveViews::default();

    for (label, type_id, custom) in [
        ("home (global defaults)", HOME, None),
        (
            "settings (declares 600 dp)",
            SETTINGS,
            Some(&SettingsScreen as &dyn CustomAdapt),
        ),
        ("vendor player (registered 540 dp)", VENDOR_PLAYER, None),
        ("vendor map (excluded)", VENDOR_MAP, None),
    ] {
        engine.activate(type_id, custom, &mut views);
        info!(
            screen = label,
            density = views.unit.density,
            density_dpi = views.unit.density_dpi,
            scaled_density = views.unit.scaled_density,
            one_sp_px = apply_dimension(Unit::Sp, 1.0, &views.unit),
            "activated"
        );
    }

    engine.revert(&mut views);
    info!(
        density = views.process.density,
        cached_snapshots = engine.cache().len(),
        "reverted to device metrics"
    );
}
