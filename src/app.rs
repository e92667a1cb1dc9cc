use std::{str::FromStr, sync::Arc};

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use tracing::info;

use crate::{
    adapters::outbound::persistence::{
        InMemoryClientRepository, InMemoryContractRepository, InMemoryVehicleRepository,
        SqlClientRepository, SqlContractRepository, SqlVehicleRepository,
    },
    ports::repositories::{ClientStorageProvider, ContractStorageProvider, VehicleStorageProvider},
    services::{ClientsService, ContractsService, VehiclesService},
};

/// Configuration for the application
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub repository_backend: RepositoryBackend,
}

/// Repository backend configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RepositoryBackend {
    #[default]
    InMemory,
    Sqlite {
        connection_string: String,
    },
}

/// Application dependencies container
pub struct AppDependencies {
    pub client_repository: Arc<dyn ClientStorageProvider>,
    pub vehicle_repository: Arc<dyn VehicleStorageProvider>,
    pub contract_repository: Arc<dyn ContractStorageProvider>,
}

/// Application services container
#[derive(Clone)]
pub struct AppServices {
    pub clients: ClientsService,
    pub vehicles: VehiclesService,
    pub contracts: ContractsService,
}

/// Application builder for dependency injection
pub struct AppBuilder {
    config: AppConfig,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    /// Configure the application with custom settings
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_repository_backend(mut self, backend: RepositoryBackend) -> Self {
        self.config.repository_backend = backend;
        self
    }

    /// Build the repositories selected by the configuration
    pub async fn build_dependencies(self) -> Result<AppDependencies, AppError> {
        match &self.config.repository_backend {
            RepositoryBackend::InMemory => {
                info!("using in-memory repositories");
                Ok(AppDependencies {
                    client_repository: Arc::new(InMemoryClientRepository::new()),
                    vehicle_repository: Arc::new(InMemoryVehicleRepository::new()),
                    contract_repository: Arc::new(InMemoryContractRepository::new()),
                })
            }
            RepositoryBackend::Sqlite { connection_string } => {
                info!(connection_string = %connection_string, "using sqlite repositories");
                let pool = connect_sqlite(connection_string).await?;
                Self::create_sql_repositories(pool).await
            }
        }
    }

    /// Build the complete application with services
    pub async fn build(self) -> Result<AppServices, AppError> {
        let deps = self.build_dependencies().await?;
        Ok(AppServices::from_dependencies(deps))
    }

    async fn create_sql_repositories(pool: SqlitePool) -> Result<AppDependencies, AppError> {
        let clients = SqlClientRepository::new(pool.clone());
        let vehicles = SqlVehicleRepository::new(pool.clone());
        let contracts = SqlContractRepository::new(pool);

        clients.migrate().await.map_err(AppError::migration)?;
        vehicles.migrate().await.map_err(AppError::migration)?;
        contracts.migrate().await.map_err(AppError::migration)?;

        Ok(AppDependencies {
            client_repository: Arc::new(clients),
            vehicle_repository: Arc::new(vehicles),
            contract_repository: Arc::new(contracts),
        })
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AppServices {
    /// Wire the domain services on top of already built repositories
    pub fn from_dependencies(deps: AppDependencies) -> Self {
        let clients = ClientsService::new(deps.client_repository.clone());
        let vehicles = VehiclesService::new(deps.vehicle_repository.clone());
        let contracts = ContractsService::new(
            deps.contract_repository,
            deps.client_repository,
            deps.vehicle_repository,
        );

        Self {
            clients,
            vehicles,
            contracts,
        }
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Repository initialization error: {message}")]
    RepositoryInit { message: String },
}

impl AppError {
    fn migration(err: sqlx::Error) -> Self {
        AppError::RepositoryInit {
            message: format!("migration failed: {}", err),
        }
    }
}

async fn connect_sqlite(connection_string: &str) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(connection_string)
        .map_err(|e| AppError::Configuration {
            message: format!("invalid sqlite connection string '{}': {}", connection_string, e),
        })?
        .create_if_missing(true);

    // Every connection to an in-memory database sees its own empty database,
    // and it is lost once that connection closes.
    let pool_options = if connection_string.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };

    pool_options
        .connect_with(options)
        .await
        .map_err(|e| AppError::RepositoryInit {
            message: format!("cannot open '{}': {}", connection_string, e),
        })
}

/// Create an in-memory application for testing and development
pub async fn create_in_memory_app() -> Result<AppServices, AppError> {
    AppBuilder::new()
        .with_repository_backend(RepositoryBackend::InMemory)
        .build()
        .await
}

/// Create an application persisting to SQLite, running the migrations first
pub async fn create_sqlite_app(
    connection_string: impl Into<String>,
) -> Result<AppServices, AppError> {
    AppBuilder::new()
        .with_repository_backend(RepositoryBackend::Sqlite {
            connection_string: connection_string.into(),
        })
        .build()
        .await
}

/// Read the repository backend from `REPOSITORY_BACKEND` and `DATABASE_URL`
pub fn repository_backend_from_env() -> Result<RepositoryBackend, AppError> {
    match std::env::var("REPOSITORY_BACKEND").as_deref() {
        Ok("sqlite") | Ok("database") => {
            let connection_string =
                std::env::var("DATABASE_URL").map_err(|_| AppError::Configuration {
                    message: "DATABASE_URL environment variable required".to_string(),
                })?;
            Ok(RepositoryBackend::Sqlite { connection_string })
        }
        Ok("memory") | Ok("in-memory") | Err(_) => Ok(RepositoryBackend::InMemory),
        Ok(other) => Err(AppError::Configuration {
            message: format!("unknown repository backend '{}'", other),
        }),
    }
}

/// Create application from environment variables
pub async fn create_app_from_env() -> Result<AppServices, AppError> {
    AppBuilder::new()
        .with_repository_backend(repository_backend_from_env()?)
        .build()
        .await
}
