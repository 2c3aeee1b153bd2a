//! Services module
//!
//! This module contains business logic services

pub mod company;
pub mod event;
pub mod image;
pub mod registration;

// Re-export commonly used services
pub use company::CompanyService;
pub use event::EventService;
pub use image::ImageService;
pub use registration::RegistrationService;

use std::sync::Arc;

use crate::config::Settings;
use crate::sheets::store::SheetStore;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub company_service: CompanyService,
    pub event_service: EventService,
    pub registration_service: RegistrationService,
    pub image_service: ImageService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(store: Arc<dyn SheetStore>, settings: Settings) -> Result<Self> {
        let image_service = ImageService::new(settings.images.clone())?;
        let company_service =
            CompanyService::new(store.clone(), image_service.clone(), settings.clone());
        let event_service = EventService::new(store.clone(), image_service.clone(), settings.clone());
        let registration_service = RegistrationService::new(store, settings);

        Ok(Self {
            company_service,
            event_service,
            registration_service,
            image_service,
        })
    }

    /// Health check for all upstream collaborators
    pub async fn health_check(&self) -> ServiceHealthStatus {
        ServiceHealthStatus {
            store_reachable: self.company_service.ping_store().await,
            image_host_configured: self.image_service.is_configured(),
        }
    }
}

/// Health status for upstream collaborators
#[derive(Debug, Clone)]
pub struct ServiceHealthStatus {
    pub store_reachable: bool,
    pub image_host_configured: bool,
}

impl ServiceHealthStatus {
    /// Check if the critical path is usable
    pub fn is_healthy(&self) -> bool {
        self.store_reachable
    }
}
