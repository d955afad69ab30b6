use std::sync::Arc;

use launcher_ads::service::AdsService;
use launcher_core::error::CoreError;
use launcher_core::templates::TemplateCatalog;
use launcher_db::directory::CustomerDirectory;
use launcher_pipeline::Provisioner;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind `Arc` or already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Cached reader over the customer directory.
    pub directory: Arc<CustomerDirectory>,
    /// Static campaign templates offered by the form.
    pub catalog: Arc<TemplateCatalog>,
    /// Advertising platform access, if credentials were supplied.
    pub ads: AdsHandle,
}

/// Advertising platform access as resolved at startup.
///
/// Missing credentials do not stop the server: the form still renders and
/// every provisioning attempt is refused with the missing names.
#[derive(Clone)]
pub enum AdsHandle {
    Ready(Arc<dyn AdsService>),
    Unconfigured { missing: Vec<&'static str> },
}

impl AdsHandle {
    pub fn is_configured(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Names of the absent credentials; empty when configured.
    pub fn missing(&self) -> &[&'static str] {
        match self {
            Self::Ready(_) => &[],
            Self::Unconfigured { missing } => missing,
        }
    }

    /// A provisioner bound to the configured service.
    pub fn provisioner(&self) -> Result<Provisioner, CoreError> {
        match self {
            Self::Ready(ads) => Ok(Provisioner::new(Arc::clone(ads))),
            Self::Unconfigured { missing } => Err(CoreError::ConfigurationMissing(missing.clone())),
        }
    }
}
