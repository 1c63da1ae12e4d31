mod settings;

pub use settings::{
    ContentConfig, DatabaseConfig, LogConfig, LogFormat, Settings, StoreConfig, TransportMode,
};
