use gleaner_db::SqliteStore;

/// Shared application state for all handlers.
///
/// This is wrapped in Arc internally by Axum when using `with_state()`,
/// so all fields must implement Clone (which the store does via its
/// internal pool handle).
#[derive(Clone)]
pub struct AppState {
    /// Record store backing every listing endpoint
    pub store: SqliteStore,
}

impl AppState {
    /// Creates a new application state around an opened store.
    pub fn new(store: SqliteStore) -> Self {
        Self { store }
    }
}
