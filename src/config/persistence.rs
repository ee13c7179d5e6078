//! File persistence configuration

/// Path for saving/loading application UI state
pub const APP_STATE_PATH: &str = ".states.json";

pub struct SnapshotConfig {
    /// Directory where offline snapshots live
    pub directory: &'static str,
    pub filename: &'static str,
    /// Current version of the snapshot file layout
    pub version: u32,
}

pub struct PersistenceConfig {
    pub app_state_path: &'static str,
    pub snapshot: SnapshotConfig,
}

pub const PERSISTENCE: PersistenceConfig = PersistenceConfig {
    app_state_path: APP_STATE_PATH,
    snapshot: SnapshotConfig {
        directory: "snapshots",
        filename: "analytics_snapshot.json",
        version: 1,
    },
};
