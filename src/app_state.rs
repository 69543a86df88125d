use std::sync::Arc;

use crate::config::Config;
use crate::db::DatabaseRepo;
use crate::session::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn DatabaseRepo>,
    pub env: Arc<Config>,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(repo: Arc<dyn DatabaseRepo>, env: Config) -> Self {
        let sessions = Arc::new(SessionStore::new(env.session.lifetime));
        Self {
            repo,
            env: Arc::new(env),
            sessions,
        }
    }
}
