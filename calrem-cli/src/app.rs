use std::sync::Arc;

use anyhow::Result;
use calrem_core::config::CalRemConfig;
use calrem_core::session::{Session, SessionFile};
use calrem_core::store::{Store, open_store};

/// Everything a command needs: configuration, the opened store and the
/// session file.
pub struct App {
    pub config: CalRemConfig,
    pub store: Arc<dyn Store>,
    pub session: SessionFile,
}

impl App {
    pub fn load() -> Result<Self> {
        let config = CalRemConfig::load()?;
        let store = open_store(&config.store)?;
        let session = SessionFile::default_location()?;
        tracing::debug!(
            view = %config.default_view,
            session = %session.path().display(),
            "configuration loaded"
        );
        Ok(App {
            config,
            store,
            session,
        })
    }

    pub fn current_user(&self) -> Result<Session> {
        Ok(self.session.require()?)
    }
}
