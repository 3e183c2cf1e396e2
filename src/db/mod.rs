pub mod normalize;
pub mod persistent;
pub mod seed;
pub mod storage;

pub use persistent::PersistentStore;
pub use storage::{FileStorage, MemoryStorage, Storage};

use log::{error, info};
use rocket::fairing::AdHoc;

use crate::config::Config;
use crate::state::AppState;

pub fn init() -> AdHoc {
    AdHoc::on_ignite("Storage", |rocket| async {
        let dir = Config::data_dir();
        let state = match FileStorage::open(&dir) {
            Ok(storage) => {
                info!("✓ Storage opened at {}", dir);
                AppState::from_config(storage)
            }
            Err(e) => {
                error!("✗ Failed to open storage at {}: {}. Falling back to memory", dir, e);
                AppState::from_config(MemoryStorage::new())
            }
        };
        rocket.manage(state)
    })
}
