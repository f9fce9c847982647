//! Collapsible navigation sidebar.
//!
//! The controller owns the mode and derives everything the view renders from
//! it (CSS class, content offset, per-entry tooltips), so those can never
//! drift out of sync with the mode.

use crate::storage::PreferenceStore;

/// Key of the persisted preference.
pub const STORAGE_KEY: &str = "sidebarCollapsed";

/// Viewports narrower than this always show the collapsed sidebar.
pub const COLLAPSE_BREAKPOINT_PX: u32 = 768;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarConfig {
    pub breakpoint_px: u32,
    /// Left offset of the content region while expanded.
    pub expanded_offset_px: u32,
    /// Left offset of the content region while collapsed.
    pub collapsed_offset_px: u32,
    pub storage_key: String,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            breakpoint_px: COLLAPSE_BREAKPOINT_PX,
            expanded_offset_px: 250,
            collapsed_offset_px: 70,
            storage_key: STORAGE_KEY.to_string(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SidebarMode {
    Expanded,
    Collapsed,
}

impl SidebarMode {
    pub fn toggled(self) -> Self {
        match self {
            SidebarMode::Expanded => SidebarMode::Collapsed,
            SidebarMode::Collapsed => SidebarMode::Expanded,
        }
    }

    fn stored_value(self) -> &'static str {
        match self {
            SidebarMode::Collapsed => "true",
            SidebarMode::Expanded => "false",
        }
    }

    fn from_stored(value: &str) -> Option<Self> {
        match value.trim() {
            "true" => Some(SidebarMode::Collapsed),
            "false" => Some(SidebarMode::Expanded),
            _ => None,
        }
    }
}

/// One link of the navigation panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub label: String,
    pub href: String,
}

impl NavEntry {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self { label: label.into(), href: href.into() }
    }
}

#[derive(Debug)]
pub struct Sidebar<S> {
    config: SidebarConfig,
    store: S,
    mode: SidebarMode,
    entries: Vec<NavEntry>,
}

impl<S: PreferenceStore> Sidebar<S> {
    /// Restore the persisted mode for a viewport of `viewport_width` px.
    ///
    /// No stored value means expanded. A narrow viewport forces collapsed
    /// regardless of what is stored.
    pub fn restore(config: SidebarConfig, store: S, entries: Vec<NavEntry>, viewport_width: u32) -> Self {
        let stored = store
            .get(&config.storage_key)
            .and_then(|v| SidebarMode::from_stored(&v));
        let mode = if viewport_width < config.breakpoint_px {
            SidebarMode::Collapsed
        } else {
            stored.unwrap_or(SidebarMode::Expanded)
        };
        tracing::debug!(?mode, ?stored, viewport_width, "sidebar restored");

        Self { config, store, mode, entries }
    }

    pub fn mode(&self) -> SidebarMode {
        self.mode
    }

    pub fn is_collapsed(&self) -> bool {
        self.mode == SidebarMode::Collapsed
    }

    pub fn entries(&self) -> &[NavEntry] {
        &self.entries
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Left offset of the content region for the current mode.
    pub fn content_offset_px(&self) -> u32 {
        match self.mode {
            SidebarMode::Expanded => self.config.expanded_offset_px,
            SidebarMode::Collapsed => self.config.collapsed_offset_px,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self.mode {
            SidebarMode::Expanded => "sidebar",
            SidebarMode::Collapsed => "sidebar collapsed",
        }
    }

    /// Hover tooltip of each entry: its label while collapsed, none while
    /// expanded.
    pub fn tooltips(&self) -> impl Iterator<Item = (&NavEntry, Option<&str>)> + '_ {
        let collapsed = self.is_collapsed();
        self.entries
            .iter()
            .map(move |e| (e, collapsed.then_some(e.label.as_str())))
    }

    /// Invert the mode and persist it. A failed write keeps the new mode.
    pub fn toggle(&mut self) -> SidebarMode {
        self.mode = self.mode.toggled();
        if let Err(err) = self
            .store
            .set(&self.config.storage_key, self.mode.stored_value())
        {
            tracing::warn!(error = %err, "failed to persist sidebar preference");
        }
        self.mode
    }

    /// Collapse when the viewport shrinks below the breakpoint. Never
    /// expands and never writes the preference. Returns whether the mode
    /// changed.
    pub fn on_resize(&mut self, viewport_width: u32) -> bool {
        if viewport_width < self.config.breakpoint_px && self.mode == SidebarMode::Expanded {
            self.mode = SidebarMode::Collapsed;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, StorageError};

    fn entries() -> Vec<NavEntry> {
        vec![
            NavEntry::new("Dashboard", "/"),
            NavEntry::new("Vouchers", "/vouchers"),
            NavEntry::new("Tax rules", "/rules"),
        ]
    }

    fn restore(store: MemoryStore, width: u32) -> Sidebar<MemoryStore> {
        Sidebar::restore(SidebarConfig::default(), store, entries(), width)
    }

    struct ReadOnlyStore;

    impl PreferenceStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write { key: key.to_string(), reason: "quota exceeded".to_string() })
        }
    }

    #[test]
    fn defaults_to_expanded_without_preference() {
        let sidebar = restore(MemoryStore::new(), 1280);
        assert_eq!(sidebar.mode(), SidebarMode::Expanded);
        assert_eq!(sidebar.content_offset_px(), 250);
    }

    #[test]
    fn restores_collapsed_preference() {
        let store = MemoryStore::new().with_entry(STORAGE_KEY, "true");
        let sidebar = restore(store, 1280);
        assert!(sidebar.is_collapsed());
        assert_eq!(sidebar.content_offset_px(), 70);
        assert_eq!(sidebar.css_class(), "sidebar collapsed");
    }

    #[test]
    fn unknown_stored_value_is_ignored() {
        let store = MemoryStore::new().with_entry(STORAGE_KEY, "maybe");
        assert_eq!(restore(store, 1280).mode(), SidebarMode::Expanded);
    }

    #[test]
    fn narrow_viewport_forces_collapsed() {
        let store = MemoryStore::new().with_entry(STORAGE_KEY, "false");
        let sidebar = restore(store, 600);
        assert!(sidebar.is_collapsed());
        assert_eq!(sidebar.content_offset_px(), 70);
        // Forced collapse is not recorded as a preference.
        assert_eq!(sidebar.store().get(STORAGE_KEY).as_deref(), Some("false"));
    }

    #[test]
    fn toggling_twice_restores_offset_and_persists() {
        let mut sidebar = restore(MemoryStore::new(), 1280);
        let initial = sidebar.content_offset_px();

        assert_eq!(sidebar.toggle(), SidebarMode::Collapsed);
        assert_eq!(sidebar.store().get(STORAGE_KEY).as_deref(), Some("true"));
        assert_ne!(sidebar.content_offset_px(), initial);

        assert_eq!(sidebar.toggle(), SidebarMode::Expanded);
        assert_eq!(sidebar.store().get(STORAGE_KEY).as_deref(), Some("false"));
        assert_eq!(sidebar.content_offset_px(), initial);
    }

    #[test]
    fn preference_survives_reload() {
        let mut sidebar = restore(MemoryStore::new(), 1280);
        sidebar.toggle();
        let store = sidebar.store().clone();

        let reloaded = restore(store, 1280);
        assert!(reloaded.is_collapsed());
    }

    #[test]
    fn resize_only_collapses() {
        let mut sidebar = restore(MemoryStore::new(), 1280);
        assert!(!sidebar.on_resize(1024));
        assert!(sidebar.on_resize(700));
        assert!(sidebar.is_collapsed());
        assert!(!sidebar.on_resize(1600), "never auto-expands");
        assert!(sidebar.is_collapsed());
        assert_eq!(sidebar.store().get(STORAGE_KEY), None);
    }

    #[test]
    fn tooltips_follow_mode() {
        let mut sidebar = restore(MemoryStore::new(), 1280);
        assert!(sidebar.tooltips().all(|(_, tip)| tip.is_none()));

        sidebar.toggle();
        let tips: Vec<_> = sidebar.tooltips().map(|(_, tip)| tip).collect();
        assert_eq!(tips, vec![Some("Dashboard"), Some("Vouchers"), Some("Tax rules")]);
    }

    #[test]
    fn storage_failure_keeps_new_mode() {
        let mut sidebar = Sidebar::restore(SidebarConfig::default(), ReadOnlyStore, entries(), 1280);
        assert_eq!(sidebar.toggle(), SidebarMode::Collapsed);
        assert!(sidebar.is_collapsed());
    }
}
