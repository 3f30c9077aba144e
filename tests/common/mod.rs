pub mod fake_admin_connection;
pub mod fake_identity;

use biznet_admin::storage::profile::ConnectionProfile;
use biznet_admin::storage::store::ProfileStore;
use tempfile::TempDir;
use tokio::sync::broadcast;

/// A profile store in a throw-away directory with `profile_name` saved and
/// marked current. Keep the returned `TempDir` alive for the whole test.
pub fn profile_store_with_current(profile_name: &str) -> (ProfileStore, TempDir) {
    let dir = tempfile::tempdir().expect("temp dir should be creatable");
    let store = ProfileStore::with_dir(dir.path().join("profiles")).expect("store should open");
    store
        .save(&ConnectionProfile::Web {
            name: profile_name.to_string(),
        })
        .expect("profile should save");
    store
        .set_current(profile_name)
        .expect("current marker should save");
    (store, dir)
}

/// Collect every busy-status message published so far.
pub fn drain_busy(rx: &mut broadcast::Receiver<String>) -> Vec<String> {
    let mut out = Vec::new();
    while let Ok(message) = rx.try_recv() {
        out.push(message);
    }
    out
}
