#![forbid(unsafe_code)]

//! Packed cache keys and the compute-once metrics cache.
//!
//! # Key layout
//!
//! A [`CacheKey`] is one `u32`:
//!
//! | Bits  | Meaning |
//! |-------|---------|
//! | 0–29  | `round((size_in_dp + subunit_design_size + screen_extent) * init_scaled_density)`, top two bits cleared |
//! | 30    | basis: 1 = width, 0 = height |
//! | 31    | 1 = device size in effect rather than design size |
//!
//! The layout is semantic, not a hash: two requests that would produce the
//! same snapshot collapse to the same key, and flipping either flag always
//! changes the key.
//!
//! # Cache contract
//!
//! For a fixed key the first computed snapshot is authoritative for the
//! rest of the process lifetime. There is no invalidation primitive; if the
//! underlying screen configuration changes without changing the packed
//! inputs, the stored snapshot keeps being served. Entries accumulate one
//! per distinct screen configuration observed, typically a handful.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::metrics::MetricsSnapshot;

const MODE_SHIFT: u32 = 30;
const MODE_MASK: u32 = 0x3 << MODE_SHIFT;
const MODE_ON_WIDTH: u32 = 1 << MODE_SHIFT;
const MODE_DEVICE_SIZE: u32 = 2 << MODE_SHIFT;

/// A packed adaptation-request key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey(u32);

impl CacheKey {
    /// Pack a request into its key.
    ///
    /// `size_in_dp` and `subunit_design_size` are the design extents the
    /// request resolves to, `screen_extent` the screen width or height in
    /// pixels along the chosen basis.
    #[must_use]
    pub fn pack(
        size_in_dp: f32,
        subunit_design_size: f32,
        screen_extent: i32,
        init_scaled_density: f32,
        base_on_width: bool,
        use_device_size: bool,
    ) -> Self {
        let magnitude = (size_in_dp + subunit_design_size + screen_extent as f32)
            * init_scaled_density;
        let mut key = (magnitude.round() as i32 as u32) & !MODE_MASK;
        key = if base_on_width {
            key | MODE_ON_WIDTH
        } else {
            key & !MODE_ON_WIDTH
        };
        key = if use_device_size {
            key | MODE_DEVICE_SIZE
        } else {
            key & !MODE_DEVICE_SIZE
        };
        Self(key)
    }

    /// Raw packed bits.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether the basis bit says width.
    #[inline]
    #[must_use]
    pub const fn is_base_on_width(self) -> bool {
        self.0 & MODE_ON_WIDTH != 0
    }

    /// Whether the device-size bit is set.
    #[inline]
    #[must_use]
    pub const fn uses_device_size(self) -> bool {
        self.0 & MODE_DEVICE_SIZE != 0
    }
}

/// Memoization table from packed key to computed snapshot.
///
/// Safe for concurrent `resolve` calls; the compute closure runs exactly
/// once per key, under the table lock, so two racing resolutions of the
/// same fresh key cannot both compute.
#[derive(Debug, Default)]
pub struct MetricsCache {
    entries: Mutex<HashMap<u32, MetricsSnapshot>>,
}

impl MetricsCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the snapshot for `key`, computing and storing it on a miss.
    pub fn resolve<F>(&self, key: CacheKey, compute: F) -> MetricsSnapshot
    where
        F: FnOnce() -> MetricsSnapshot,
    {
        let mut entries = self.entries.lock().expect("metrics cache lock");
        *entries.entry(key.bits()).or_insert_with(compute)
    }

    /// Whether a snapshot is stored for `key`.
    #[must_use]
    pub fn contains(&self, key: CacheKey) -> bool {
        self.entries
            .lock()
            .expect("metrics cache lock")
            .contains_key(&key.bits())
    }

    /// Number of stored snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().expect("metrics cache lock").len()
    }

    /// Whether the cache holds no snapshots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
