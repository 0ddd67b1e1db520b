use gloo::storage::{LocalStorage, Storage};
use serde::{Deserialize, Serialize};
use wordspy_core::{STORAGE_KEY, SessionStore, StoreError, StoreResult};

use crate::utils::StorageKey;

/// The language the player picked last, applied to the next new game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct LanguagePreference(pub String);

impl LanguagePreference {
    pub(crate) const DEFAULT: &'static str = "vi";
}

impl Default for LanguagePreference {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl StorageKey for LanguagePreference {
    const KEY: &'static str = "wordspy:language";
}

/// The save slot in `window.localStorage`.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct LocalSlot;

impl SessionStore for LocalSlot {
    fn read(&self) -> StoreResult<Option<String>> {
        LocalStorage::raw()
            .get_item(STORAGE_KEY)
            .map_err(|err| StoreError::Read(format!("{err:?}")))
    }

    fn write(&mut self, value: &str) -> StoreResult<()> {
        LocalStorage::raw()
            .set_item(STORAGE_KEY, value)
            .map_err(|err| StoreError::Write(format!("{err:?}")))
    }

    fn clear(&mut self) -> StoreResult<()> {
        LocalStorage::raw()
            .remove_item(STORAGE_KEY)
            .map_err(|err| StoreError::Write(format!("{err:?}")))
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn local_slot_writes_reads_and_clears() {
        let mut slot = LocalSlot;

        slot.write("{\"saved\":true}").unwrap();
        assert_eq!(slot.read().unwrap().as_deref(), Some("{\"saved\":true}"));

        slot.clear().unwrap();
        assert_eq!(slot.read().unwrap(), None);
    }
}
