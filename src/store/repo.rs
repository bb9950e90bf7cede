use anyhow::Result;

use crate::domain::settings::{SettingKey, Settings};

pub trait SettingsStore: Send {
    fn get(&self, key: SettingKey) -> Result<Option<String>>;
    fn set(&self, key: SettingKey, value: &str) -> Result<()>;

    /// Write the default for every key that has no stored value yet.
    /// Returns how many keys were written.
    fn seed_defaults(&self) -> Result<usize>;

    fn load(&self) -> Result<Settings>;

    fn reset(&self, key: SettingKey) -> Result<()> {
        self.set(key, key.default_value())
    }
}
