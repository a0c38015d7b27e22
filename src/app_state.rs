// Application state management

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::info;

use crate::categories;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::store::Store;
use crate::verdict::VerdictProvider;

/// One lock around the whole state: each request runs its operation while holding it
pub type SharedState = Arc<Mutex<AppState>>;

pub struct AppState {
    pub store: Store,
    pub verdicts: Box<dyn VerdictProvider>,
}

impl AppState {
    pub fn new(store: Store, verdicts: Box<dyn VerdictProvider>) -> Self {
        Self { store, verdicts }
    }

    /// Open the configured database and seed categories when enabled
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let store = Store::open(&config.data_dir)?;
        let verdicts = config.verdict_provider.build();
        info!("Verdict provider: {}", verdicts.name());

        if config.seed_categories {
            let inserted = categories::seed(&store)?;
            if inserted == 0 {
                info!("Categories already present, skipping seed");
            }
        }

        Ok(Self::new(store, verdicts))
    }

    pub fn shared(self) -> SharedState {
        Arc::new(Mutex::new(self))
    }

    pub fn save_to_disk(&self) -> AppResult<()> {
        let bytes = self.store.flush()?;
        info!("Flushed {} bytes to disk", bytes);
        Ok(())
    }
}

pub fn lock(state: &SharedState) -> AppResult<MutexGuard<'_, AppState>> {
    state.lock().map_err(|_| AppError::StatePoisoned)
}
