use serde::{Deserialize, Serialize};
use thiserror::Error;

use chromalab_palette::Rgb;

use crate::store::KeyValueStore;

const STORAGE_KEY: &str = "saved_colors";

/// A blend the user kept under a name of their own choosing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedColor {
    /// Creation timestamp, doubling as the stable identifier.
    pub id: String,
    pub custom_name: String,
    /// Name the mixer gave the blend when it was produced.
    pub name: String,
    pub rgb: Rgb,
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("a name is required")]
    EmptyName,
    #[error("the name {0:?} is already in use")]
    DuplicateName(String),
    #[error("there is no blended color to save")]
    NothingToSave,
}

/// The user's personal color list, persisted through a [`KeyValueStore`].
pub struct SavedColors {
    store: Box<dyn KeyValueStore>,
    colors: Vec<SavedColor>,
}

impl SavedColors {
    /// Load the saved list. Unreadable or corrupt data is logged and treated
    /// as an empty list so a bad file never blocks startup.
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let colors = match store.get(STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(colors) => colors,
                Err(e) => {
                    log::warn!("ignoring corrupt saved colors: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("failed to load saved colors: {}", e);
                Vec::new()
            }
        };
        log::debug!("loaded {} saved colors", colors.len());
        SavedColors { store, colors }
    }

    pub fn all(&self) -> &[SavedColor] {
        &self.colors
    }

    /// Keep a blend under `custom_name`. Newest entries come first.
    pub fn save(
        &mut self,
        custom_name: &str,
        name: &str,
        rgb: Rgb,
    ) -> Result<&SavedColor, SaveError> {
        let custom_name = custom_name.trim();
        if custom_name.is_empty() {
            return Err(SaveError::EmptyName);
        }
        if self.colors.iter().any(|c| c.custom_name == custom_name) {
            return Err(SaveError::DuplicateName(custom_name.to_string()));
        }

        let entry = SavedColor {
            id: self.next_id(),
            custom_name: custom_name.to_string(),
            name: name.to_string(),
            rgb,
        };
        self.colors.insert(0, entry);
        self.persist();
        Ok(&self.colors[0])
    }

    /// Remove the entry with `id`. Returns false when no entry matched.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.colors.len();
        self.colors.retain(|c| c.id != id);
        if self.colors.len() == before {
            return false;
        }
        self.persist();
        true
    }

    // Timestamps are nanosecond precision, but two saves can still land in
    // the same instant. A numeric suffix keeps ids unique within the list.
    fn next_id(&self) -> String {
        let base = chrono::Utc::now().to_rfc3339();
        if !self.colors.iter().any(|c| c.id == base) {
            return base;
        }
        let mut n = 1;
        loop {
            let candidate = format!("{}-{}", base, n);
            if !self.colors.iter().any(|c| c.id == candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    fn persist(&mut self) {
        let raw = match serde_json::to_string_pretty(&self.colors) {
            Ok(raw) => raw,
            Err(e) => {
                log::error!("failed to serialize saved colors: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.set(STORAGE_KEY, &raw) {
            log::error!("failed to persist saved colors: {}", e);
        }
    }
}
