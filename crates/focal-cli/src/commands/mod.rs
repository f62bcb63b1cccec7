pub mod config;
pub mod recommend;
pub mod stats;
pub mod timer;

use focal_core::{Config, Database, FocusStore};

const STORE_KEY: &str = "focus_store";

/// Load the persisted store, falling back to a config-seeded one when the
/// slot is empty or holds an unreadable payload.
pub fn load_store(db: &Database) -> FocusStore {
    if let Ok(Some(json)) = db.kv_get(STORE_KEY) {
        match serde_json::from_str::<FocusStore>(&json) {
            Ok(store) => return store,
            Err(e) => log::warn!("discarding corrupt store state: {e}"),
        }
    }
    FocusStore::from_config(&Config::load())
}

pub fn save_store(
    db: &Database,
    store: &FocusStore,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(store)?;
    db.kv_set(STORE_KEY, &json)?;
    Ok(())
}
