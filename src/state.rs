use crate::charts::ChartRegistry;
use crate::storage::StoreData;
use crate::validation::ErrorSlots;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub store: Arc<Mutex<StoreData>>,
    pub charts: Arc<Mutex<ChartRegistry>>,
    pub errors: Arc<Mutex<ErrorSlots>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, store: StoreData) -> Self {
        Self {
            data_path,
            store: Arc::new(Mutex::new(store)),
            charts: Arc::new(Mutex::new(ChartRegistry::new())),
            errors: Arc::new(Mutex::new(ErrorSlots::default())),
        }
    }
}
