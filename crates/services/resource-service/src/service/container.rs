//! Service Container - Centralized service access.
//!
//! Depends on service traits, not implementations, so the HTTP surface can
//! be exercised against in-memory services.

use std::sync::Arc;

use async_trait::async_trait;

use common::{AppError, AppResult};

use super::{
    GrantAllPrivileges, OrganizationManager, OrganizationService, ProjectManager, ProjectService,
    UserManager, UserService,
};
use crate::infra::Database;
use crate::repository::{OrganizationStore, ProjectStore, UserStore};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Storage liveness check.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn ping(&self) -> AppResult<()>;
}

#[async_trait]
impl HealthCheck for Database {
    async fn ping(&self) -> AppResult<()> {
        Database::ping(self).await.map_err(AppError::from)
    }
}

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get organization service
    fn organizations(&self) -> Arc<dyn OrganizationService>;

    /// Get project service
    fn projects(&self) -> Arc<dyn ProjectService>;

    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get storage health check
    fn health(&self) -> Arc<dyn HealthCheck>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    organization_service: Arc<dyn OrganizationService>,
    project_service: Arc<dyn ProjectService>,
    user_service: Arc<dyn UserService>,
    health: Arc<dyn HealthCheck>,
}

impl Services {
    /// Create a service container from already-built services
    pub fn new(
        organization_service: Arc<dyn OrganizationService>,
        project_service: Arc<dyn ProjectService>,
        user_service: Arc<dyn UserService>,
        health: Arc<dyn HealthCheck>,
    ) -> Self {
        Self {
            organization_service,
            project_service,
            user_service,
            health,
        }
    }

    /// Wire every service to the store behind `db`
    pub fn from_database(db: Database) -> Self {
        let connection = db.pool();

        let organization_repo = Arc::new(OrganizationStore::new(connection.clone()));
        let project_repo = Arc::new(ProjectStore::new(connection.clone()));
        let user_repo = Arc::new(UserStore::new(connection));

        Self {
            organization_service: Arc::new(OrganizationManager::new(
                organization_repo,
                project_repo.clone(),
            )),
            project_service: Arc::new(ProjectManager::new(project_repo)),
            user_service: Arc::new(UserManager::new(user_repo, Arc::new(GrantAllPrivileges))),
            health: Arc::new(db),
        }
    }
}

impl ServiceContainer for Services {
    fn organizations(&self) -> Arc<dyn OrganizationService> {
        self.organization_service.clone()
    }

    fn projects(&self) -> Arc<dyn ProjectService> {
        self.project_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn health(&self) -> Arc<dyn HealthCheck> {
        self.health.clone()
    }
}
