//! Light/dark preference, persisted under [`THEME_KEY`].

use std::str::FromStr;
use std::sync::{Arc, PoisonError, RwLock};

use store::KeyValueStore;
use tracing::warn;

pub const THEME_KEY: &str = "ma:theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ThemePreference {
    Light,
    Dark,
    /// Follow the operating system setting.
    #[default]
    System,
}

impl ThemePreference {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
            ThemePreference::System => "system",
        }
    }
}

impl FromStr for ThemePreference {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            "system" => Ok(ThemePreference::System),
            _ => Err(()),
        }
    }
}

/// The user's theme choice, shared by clone.
#[derive(Clone)]
pub struct ThemeStore {
    storage: Arc<dyn KeyValueStore>,
    preference: Arc<RwLock<ThemePreference>>,
}

impl ThemeStore {
    /// Reads the stored preference. Missing or unknown values mean
    /// [`ThemePreference::System`].
    pub fn restore(storage: Arc<dyn KeyValueStore>) -> Self {
        let preference = storage
            .get(THEME_KEY)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default();
        Self {
            storage,
            preference: Arc::new(RwLock::new(preference)),
        }
    }

    pub fn preference(&self) -> ThemePreference {
        *self.preference.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Changes and persists the preference. A failed write only loses
    /// persistence.
    pub fn set(&self, preference: ThemePreference) {
        *self.preference.write().unwrap_or_else(PoisonError::into_inner) = preference;
        if let Err(e) = self.storage.set(THEME_KEY, preference.as_str()) {
            warn!(error = %e, "Failed to persist theme preference");
        }
    }

    /// Whether dark mode is in effect given the system setting.
    pub fn is_dark(&self, system_prefers_dark: bool) -> bool {
        match self.preference() {
            ThemePreference::Dark => true,
            ThemePreference::Light => false,
            ThemePreference::System => system_prefers_dark,
        }
    }

    /// Reaction to the OS switching color scheme: the dark flag to apply
    /// while following the system, `None` when an explicit choice wins.
    pub fn on_system_change(&self, system_prefers_dark: bool) -> Option<bool> {
        (self.preference() == ThemePreference::System).then_some(system_prefers_dark)
    }

    /// Flip the effective mode, pinning an explicit preference.
    pub fn toggle(&self, system_prefers_dark: bool) -> ThemePreference {
        let next = if self.is_dark(system_prefers_dark) {
            ThemePreference::Light
        } else {
            ThemePreference::Dark
        };
        self.set(next);
        next
    }
}
