//! Settings held in memory.

use tokio::sync::RwLock;

use ballie_core::error::CoreError;
use ballie_core::settings::{Settings, SettingsPatch, SettingsSection};

#[derive(Default)]
pub struct SettingsStore {
    settings: RwLock<Settings>,
}

impl SettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: RwLock::new(settings),
        }
    }

    pub async fn get(&self) -> Settings {
        self.settings.read().await.clone()
    }

    /// Merge `patch` into its section and return the saved section.
    ///
    /// On a validation failure nothing is stored.
    pub async fn save(&self, patch: &SettingsPatch) -> Result<serde_json::Value, CoreError> {
        let section = patch.section();
        let mut settings = self.settings.write().await;
        let next = settings.patched(patch)?;
        *settings = next;
        tracing::info!(section = %section, "Settings section saved");
        Ok(settings.section_value(section))
    }

    pub async fn section(&self, section: SettingsSection) -> serde_json::Value {
        self.settings.read().await.section_value(section)
    }
}
