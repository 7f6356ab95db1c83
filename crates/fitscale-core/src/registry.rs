#![forbid(unsafe_code)]

//! Per-unit-type adaptation overrides.
//!
//! Units that come from third-party code cannot declare their own
//! adaptation parameters, so the integrating application registers them
//! here at setup time: either an exclusion (the unit keeps the device
//! metrics) or a custom design size to adapt against. Entries are keyed by
//! an explicit application-assigned [`UnitTypeId`] and are never removed;
//! the registry grows monotonically for the life of the process.
//!
//! Registration may happen from several initialization paths concurrently
//! while lookups run during activation, so all operations take one mutex
//! region per registry instance.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Mutex;

/// Stable identity for a UI unit type.
///
/// Assigned by the integrating application, typically a `const`, one per
/// screen/unit type it wants this crate to recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnitTypeId(&'static str);

impl UnitTypeId {
    /// Create a type tag from a stable name.
    #[inline]
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// The tag's name.
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for UnitTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Externally supplied adaptation parameters for one unit type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CustomAdaptInfo {
    /// Design size in dp along the declared basis. A non-positive value
    /// means "use the global design default".
    pub size_in_dp: f32,
    /// `true` to adapt proportionally to width, `false` to height.
    pub base_on_width: bool,
}

impl CustomAdaptInfo {
    /// Create adaptation parameters.
    #[inline]
    #[must_use]
    pub const fn new(size_in_dp: f32, base_on_width: bool) -> Self {
        Self {
            size_in_dp,
            base_on_width,
        }
    }
}

#[derive(Debug, Default)]
struct RegistryInner {
    excluded: HashSet<UnitTypeId>,
    custom: HashMap<UnitTypeId, CustomAdaptInfo>,
    has_run: bool,
}

/// Registry of per-type exclusions and custom adaptation parameters.
#[derive(Debug, Default)]
pub struct OverrideRegistry {
    inner: Mutex<RegistryInner>,
}

impl OverrideRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Exclude a unit type from adaptation. Idempotent.
    pub fn exclude(&self, type_id: UnitTypeId) {
        let mut inner = self.inner.lock().expect("override registry lock");
        inner.has_run = true;
        inner.excluded.insert(type_id);
    }

    /// Register custom adaptation parameters for a unit type.
    ///
    /// Upserts: a second registration for the same type replaces the first.
    pub fn set_custom(&self, type_id: UnitTypeId, info: CustomAdaptInfo) {
        let mut inner = self.inner.lock().expect("override registry lock");
        inner.has_run = true;
        inner.custom.insert(type_id, info);
    }

    /// Whether the type is excluded from adaptation.
    #[must_use]
    pub fn is_excluded(&self, type_id: UnitTypeId) -> bool {
        self.inner
            .lock()
            .expect("override registry lock")
            .excluded
            .contains(&type_id)
    }

    /// The custom parameters registered for the type, if any.
    #[must_use]
    pub fn custom_for(&self, type_id: UnitTypeId) -> Option<CustomAdaptInfo> {
        self.inner
            .lock()
            .expect("override registry lock")
            .custom
            .get(&type_id)
            .copied()
    }

    /// Whether any registration has ever happened.
    #[must_use]
    pub fn has_run(&self) -> bool {
        self.inner.lock().expect("override registry lock").has_run
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOGIN: UnitTypeId = UnitTypeId::new("vendor.login");
    const GALLERY: UnitTypeId = UnitTypeId::new("vendor.gallery");

    #[test]
    fn fresh_registry_has_no_entries() {
        let registry = OverrideRegistry::new();
        assert!(!registry.is_excluded(LOGIN));
        assert_eq!(registry.custom_for(LOGIN), None);
        assert!(!registry.has_run());
    }

    #[test]
    fn exclusion_is_per_type() {
        let registry = OverrideRegistry::new();
        registry.exclude(LOGIN);
        assert!(registry.is_excluded(LOGIN));
        assert!(!registry.is_excluded(GALLERY));
    }

    #[test]
    fn exclude_is_idempotent() {
        let registry = OverrideRegistry::new();
        registry.exclude(LOGIN);
        registry.exclude(LOGIN);
        assert!(registry.is_excluded(LOGIN));
    }

    #[test]
    fn set_custom_latest_wins() {
        let registry = OverrideRegistry::new();
        registry.set_custom(LOGIN, CustomAdaptInfo::new(400.0, true));
        registry.set_custom(LOGIN, CustomAdaptInfo::new(720.0, false));
        assert_eq!(
            registry.custom_for(LOGIN),
            Some(CustomAdaptInfo::new(720.0, false))
        );
    }

    #[test]
    fn any_registration_marks_run() {
        let registry = OverrideRegistry::new();
        registry.set_custom(GALLERY, CustomAdaptInfo::new(400.0, true));
        assert!(registry.has_run());

        let registry = OverrideRegistry::new();
        registry.exclude(GALLERY);
        assert!(registry.has_run());
    }

    #[test]
    fn distinct_type_ids_do_not_collide() {
        let registry = OverrideRegistry::new();
        registry.set_custom(LOGIN, CustomAdaptInfo::new(400.0, true));
        assert_eq!(registry.custom_for(GALLERY), None);
    }

    #[test]
    fn concurrent_registration_and_lookup() {
        use std::sync::Arc;

        let registry = Arc::new(OverrideRegistry::new());
        let writers: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    registry.exclude(LOGIN);
                    registry.set_custom(GALLERY, CustomAdaptInfo::new(400.0, true));
                })
            })
            .collect();
        for w in writers {
            w.join().unwrap();
        }
        assert!(registry.is_excluded(LOGIN));
        assert_eq!(
            registry.custom_for(GALLERY),
            Some(CustomAdaptInfo::new(400.0, true))
        );
    }
}
