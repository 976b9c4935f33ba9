// settings/mod.rs
//
// Player settings that survive restarts: the active theme and the set of
// unlocked themes. Loaded once at startup, written back on every change.

pub mod store;
pub mod theme;

pub use store::{KeyValueStore, MemoryStore};
pub use theme::{Palette, Theme, BASELINE_THEME, THEMES};

use crate::puzzle::error::Rejection;

pub const THEME_KEY: &str = "wordcircle.theme";
pub const UNLOCKED_KEY: &str = "wordcircle.unlockedThemes";

/// Theme settings bound to the store they persist into.
pub struct Settings<S: KeyValueStore> {
    store: S,
    selected: String,
    unlocked: Vec<String>,
}

impl<S: KeyValueStore> Settings<S> {
    /// Read settings from `store`. Missing or unreadable values fall back to
    /// the baseline theme; unknown theme ids are dropped.
    pub fn load(store: S) -> Self {
        let mut unlocked: Vec<String> = store
            .get(UNLOCKED_KEY)
            .and_then(|json| match serde_json::from_str::<Vec<String>>(&json) {
                Ok(ids) => Some(ids),
                Err(err) => {
                    log::warn!("ignoring unreadable {UNLOCKED_KEY}: {err}");
                    None
                }
            })
            .unwrap_or_default();
        unlocked.retain(|id| theme::find(id).is_some());
        if !unlocked.iter().any(|id| id == BASELINE_THEME) {
            unlocked.insert(0, BASELINE_THEME.to_string());
        }
        let mut seen: Vec<String> = Vec::new();
        unlocked.retain(|id| {
            let fresh = !seen.contains(id);
            seen.push(id.clone());
            fresh
        });

        let selected = store
            .get(THEME_KEY)
            .filter(|id| unlocked.contains(id))
            .unwrap_or_else(|| BASELINE_THEME.to_string());

        Self {
            store,
            selected,
            unlocked,
        }
    }

    /// Make `id` the active theme. Locked or unknown ids are refused.
    pub fn select(&mut self, id: &str) -> Result<(), Rejection> {
        if !self.is_unlocked(id) {
            return Err(Rejection::ThemeLocked(id.to_string()));
        }
        if self.selected != id {
            self.selected = id.to_string();
            self.store.set(THEME_KEY, &self.selected);
        }
        Ok(())
    }

    /// Unlock every theme earned by finishing `level_index`.
    /// Returns the indices (into `THEMES`) of themes that were newly unlocked.
    pub fn unlock_for_level(&mut self, level_index: usize) -> Vec<usize> {
        let fresh: Vec<usize> = THEMES
            .iter()
            .enumerate()
            .filter(|(_, t)| t.earned_by(level_index) && !self.is_unlocked(t.id))
            .map(|(i, _)| i)
            .collect();
        if !fresh.is_empty() {
            for &i in &fresh {
                self.unlocked.push(THEMES[i].id.to_string());
            }
            self.persist_unlocked();
        }
        fresh
    }

    fn persist_unlocked(&mut self) {
        match serde_json::to_string(&self.unlocked) {
            Ok(json) => self.store.set(UNLOCKED_KEY, &json),
            Err(err) => log::warn!("could not encode unlocked themes: {err}"),
        }
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.unlocked.iter().any(|u| u == id)
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    /// The active theme. Falls back to the baseline if the id is unknown.
    pub fn theme(&self) -> &'static Theme {
        theme::find(&self.selected)
            .or_else(|| theme::find(BASELINE_THEME))
            .map_or(&THEMES[0], |(_, t)| t)
    }

    pub fn unlocked(&self) -> &[String] {
        &self.unlocked
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_gives_baseline() {
        let settings = Settings::load(MemoryStore::new());
        assert_eq!(settings.selected(), BASELINE_THEME);
        assert_eq!(settings.unlocked(), &[BASELINE_THEME.to_string()]);
        assert!(settings.store().is_empty());
    }

    #[test]
    fn round_trips_through_store() {
        let mut settings = Settings::load(MemoryStore::new());
        assert_eq!(settings.unlock_for_level(2), vec![1]);
        settings.select("night").unwrap();

        let reloaded = Settings::load(settings.store().clone());
        assert_eq!(reloaded.selected(), "night");
        assert_eq!(reloaded.unlocked(), &["classic".to_string(), "night".to_string()]);
        assert_eq!(
            reloaded.store().get(UNLOCKED_KEY).as_deref(),
            Some(r#"["classic","night"]"#)
        );
    }

    #[test]
    fn selecting_locked_theme_is_a_no_op() {
        let mut settings = Settings::load(MemoryStore::new());
        assert_eq!(
            settings.select("sunny"),
            Err(Rejection::ThemeLocked("sunny".into()))
        );
        assert_eq!(settings.selected(), BASELINE_THEME);
        assert!(settings.store().get(THEME_KEY).is_none());
    }

    #[test]
    fn unlocking_is_monotonic_and_idempotent() {
        let mut settings = Settings::load(MemoryStore::new());
        assert_eq!(settings.unlock_for_level(5), vec![1, 2]);
        assert!(settings.unlock_for_level(5).is_empty());
        assert!(settings.unlock_for_level(0).is_empty());
        assert_eq!(settings.unlocked().len(), 3);
    }

    #[test]
    fn garbage_in_store_falls_back() {
        let mut store = MemoryStore::new();
        store.set(UNLOCKED_KEY, "not json");
        store.set(THEME_KEY, "sunny");
        let settings = Settings::load(store);
        assert_eq!(settings.selected(), BASELINE_THEME);
        assert_eq!(settings.unlocked(), &[BASELINE_THEME.to_string()]);
    }

    #[test]
    fn unknown_ids_are_dropped() {
        let mut store = MemoryStore::new();
        store.set(UNLOCKED_KEY, r#"["neon","sunny"]"#);
        store.set(THEME_KEY, "sunny");
        let settings = Settings::load(store);
        assert_eq!(settings.selected(), "sunny");
        assert_eq!(settings.unlocked(), &["classic".to_string(), "sunny".to_string()]);
        assert_eq!(settings.theme().name, "Sunny Day");
    }
}
