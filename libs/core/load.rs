use crate::{config, day_lock::DayLocks, Core};
use daybook_store::{
    store::{in_memory::InMemoryStoreConfig, local::LocalStoreConfig},
    BuiltinStoreType, StoreConfig,
};

pub async fn load(store_type: BuiltinStoreType, config_path: &str) -> eyre::Result<Core> {
    match store_type {
        BuiltinStoreType::Local => load_core::<LocalStoreConfig>(config_path).await,
        BuiltinStoreType::InMemory => load_core::<InMemoryStoreConfig>(config_path).await,
    }
}

pub async fn load_core<SC>(config_path: &str) -> eyre::Result<Core>
where
    SC: StoreConfig,
{
    let mut found_config_file = Ok(());
    let config = match config::get_config_from_path::<SC>(config_path).await {
        Ok(v) => v,
        Err(e) => {
            found_config_file = Err(e);
            config::get_default_config::<SC>()
        }
    };

    let uploader = config.store.to_uploader();
    let store = config.store.to_store();

    Ok(Core {
        store,
        uploader,
        day_locks: DayLocks::new(),
        config: config.core,
        ai: config.ai,
        http: reqwest::Client::new(),
        found_config_file,
    })
}
