use anyhow::bail;
use tuki_api::TukiApi;
use tuki_core::{AppConfig, SessionUser};
use tuki_store::{CartStore, FileStorage, SessionStore};

/// Everything a command needs: configuration, the API, and client storage.
pub(crate) struct App {
    pub config: AppConfig,
    pub api: TukiApi,
    pub cart: CartStore,
    pub session: SessionStore,
}

impl App {
    pub(crate) fn new(config: AppConfig) -> anyhow::Result<Self> {
        let api = TukiApi::from_config(&config)?;
        let storage = FileStorage::new(config.data_dir.clone());
        tracing::debug!(data_dir = %storage.dir().display(), env = %config.env, "client ready");
        Ok(Self {
            api,
            cart: CartStore::new(storage.clone()),
            session: SessionStore::new(storage),
            config,
        })
    }

    /// The signed-in user, or an error asking to log in.
    pub(crate) fn require_user(&self) -> anyhow::Result<SessionUser> {
        match self.session.current_user() {
            Some(user) => Ok(user),
            None => bail!("you need to log in first (tuki login --email ...)"),
        }
    }

    pub(crate) fn require_admin(&self) -> anyhow::Result<SessionUser> {
        let user = self.require_user()?;
        if !user.is_admin() {
            bail!("this command is only available to administrators");
        }
        Ok(user)
    }
}
