use std::sync::Arc;

use crate::identity::IdentityService;
use crate::roster::SharedRoster;
use crate::storage::EntityStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EntityStore>,
    pub roster: SharedRoster,
    pub identity: Arc<dyn IdentityService>,
}
