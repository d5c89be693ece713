//! Settings store implementations.

mod file;
mod memory;

pub use file::FileSettingsStore;
pub use memory::MemorySettingsStore;

use proofreader_protocols::settings::SettingsMap;

/// Apply a write to a map: `null` removes, anything else replaces.
pub(crate) fn merge_values(target: &mut SettingsMap, values: SettingsMap) {
    for (key, value) in values {
        if value.is_null() {
            target.remove(&key);
        } else {
            target.insert(key, value);
        }
    }
}

/// Project a map down to the requested keys.
pub(crate) fn select_keys(source: &SettingsMap, keys: &[&str]) -> SettingsMap {
    keys.iter()
        .filter_map(|key| source.get(*key).map(|value| (key.to_string(), value.clone())))
        .collect()
}
