use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use rental_backend::{
    AppBuilder, AppConfig, AppServices, ClientUpdate, ContractStatus, ContractUpdate, NewClient,
    NewContract, NewVehicle, RepositoryBackend, UpdatableValue, VehicleStatus, VehicleUpdate,
};
use serde_json::{json, Value};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "rental-cli")]
#[command(about = "Manage the clients, vehicles and contracts of a rental agency", long_about = None)]
struct Cli {
    /// Repository backend (memory, sqlite)
    #[arg(long, env = "REPOSITORY_BACKEND", default_value = "sqlite")]
    repository_backend: String,

    /// SQLite connection string
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://rental.db")]
    database_url: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage clients
    Client {
        #[command(subcommand)]
        command: ClientCommands,
    },

    /// Manage vehicles
    Vehicle {
        #[command(subcommand)]
        command: VehicleCommands,
    },

    /// Manage rental contracts
    Contract {
        #[command(subcommand)]
        command: ContractCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ClientCommands {
    /// Register a new client
    Create(NewClientArgs),
    /// Show one client
    Get { id: Uuid },
    /// List all clients
    List,
    /// Change the given fields of a client, leaving the others untouched
    Update {
        id: Uuid,
        #[command(flatten)]
        fields: ClientUpdateArgs,
    },
    /// Remove a client
    Delete { id: Uuid },
}

#[derive(Args, Debug)]
struct NewClientArgs {
    #[arg(long)]
    last_name: String,
    #[arg(long)]
    first_name: String,
    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    date_of_birth: NaiveDate,
    /// Driving license number, e.g. AB123CD
    #[arg(long)]
    license_number: String,
    #[arg(long)]
    address: String,
}

#[derive(Args, Debug)]
struct ClientUpdateArgs {
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    first_name: Option<String>,
    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    date_of_birth: Option<String>,
    #[arg(long)]
    address: Option<String>,
}

#[derive(Subcommand, Debug)]
enum VehicleCommands {
    /// Add a vehicle to the fleet
    Create(NewVehicleArgs),
    Get { id: Uuid },
    List,
    /// Change the given fields of a vehicle, leaving the others untouched
    Update {
        id: Uuid,
        #[command(flatten)]
        fields: VehicleUpdateArgs,
    },
    Delete { id: Uuid },
}

#[derive(Args, Debug)]
struct NewVehicleArgs {
    #[arg(long)]
    brand: String,
    #[arg(long)]
    model: String,
    #[arg(long)]
    license_plate: String,
    #[arg(long)]
    color: Option<String>,
    #[arg(long)]
    acquisition_date: Option<NaiveDate>,
}

#[derive(Args, Debug)]
struct VehicleUpdateArgs {
    #[arg(long)]
    brand: Option<String>,
    #[arg(long)]
    model: Option<String>,
    #[arg(long)]
    license_plate: Option<String>,
    #[arg(long, conflicts_with = "clear_color")]
    color: Option<String>,
    /// Remove the recorded color
    #[arg(long)]
    clear_color: bool,
    #[arg(long, conflicts_with = "clear_acquisition_date")]
    acquisition_date: Option<NaiveDate>,
    /// Remove the recorded acquisition date
    #[arg(long)]
    clear_acquisition_date: bool,
    /// available, rented or maintenance
    #[arg(long)]
    status: Option<VehicleStatus>,
}

#[derive(Subcommand, Debug)]
enum ContractCommands {
    /// Book a vehicle for a client
    Create {
        #[arg(long)]
        client_id: Uuid,
        #[arg(long)]
        vehicle_id: Uuid,
        #[arg(long)]
        start_date: NaiveDate,
        #[arg(long)]
        end_date: NaiveDate,
    },
    Get {
        id: Uuid,
    },
    List,
    /// Change the period or the status of a contract
    Update {
        id: Uuid,
        #[arg(long)]
        start_date: Option<NaiveDate>,
        #[arg(long)]
        end_date: Option<NaiveDate>,
        /// pending, ongoing, completed, late or cancelled
        #[arg(long)]
        status: Option<ContractStatus>,
    },
    Delete {
        id: Uuid,
    },
    /// List the contracts of a client
    ByClient {
        client_id: Uuid,
    },
    /// List the contracts of a vehicle, optionally restricted to a period
    ByVehicle {
        vehicle_id: Uuid,
        #[arg(long, requires = "to")]
        from: Option<NaiveDate>,
        #[arg(long, requires = "from")]
        to: Option<NaiveDate>,
    },
}

impl Cli {
    fn to_app_config(&self) -> Result<AppConfig> {
        let repository_backend = match self.repository_backend.as_str() {
            "memory" => RepositoryBackend::InMemory,
            "sqlite" | "database" | "db" => RepositoryBackend::Sqlite {
                connection_string: self.database_url.clone(),
            },
            _ => anyhow::bail!("Unknown repository backend: {}", self.repository_backend),
        };

        Ok(AppConfig { repository_backend })
    }

    fn init_logging(&self) -> Result<()> {
        let env_filter = EnvFilter::try_new(self.log_level.to_lowercase())
            .with_context(|| format!("Invalid log level: {}", self.log_level))?;

        // stdout carries the JSON output
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();

        Ok(())
    }
}

/// An omitted flag leaves the stored field untouched
fn updatable<T>(value: Option<T>) -> UpdatableValue<T> {
    value.map(UpdatableValue::of).unwrap_or_default()
}

fn clearable<T>(value: Option<T>, clear: bool) -> UpdatableValue<Option<T>> {
    if clear {
        UpdatableValue::of(None)
    } else {
        value.map(|v| UpdatableValue::of(Some(v))).unwrap_or_default()
    }
}

impl From<ClientUpdateArgs> for ClientUpdate {
    fn from(args: ClientUpdateArgs) -> Self {
        ClientUpdate {
            last_name: updatable(args.last_name),
            first_name: updatable(args.first_name),
            date_of_birth: updatable(args.date_of_birth),
            address: updatable(args.address),
        }
    }
}

impl From<VehicleUpdateArgs> for VehicleUpdate {
    fn from(args: VehicleUpdateArgs) -> Self {
        VehicleUpdate {
            brand: updatable(args.brand),
            model: updatable(args.model),
            license_plate: updatable(args.license_plate),
            color: clearable(args.color, args.clear_color),
            acquisition_date: clearable(args.acquisition_date, args.clear_acquisition_date),
            status: updatable(args.status),
        }
    }
}

fn found<T: serde::Serialize>(kind: &str, id: &Uuid, value: Option<T>) -> Result<Value> {
    let value = value.with_context(|| format!("{} not found: {}", kind, id))?;
    Ok(serde_json::to_value(value)?)
}

async fn run_client(app: &AppServices, command: ClientCommands) -> Result<Value> {
    let clients = &app.clients;
    let output = match command {
        ClientCommands::Create(args) => serde_json::to_value(
            clients
                .create(NewClient {
                    last_name: args.last_name,
                    first_name: args.first_name,
                    date_of_birth: args.date_of_birth,
                    license_number: args.license_number,
                    address: args.address,
                })
                .await?,
        )?,
        ClientCommands::Get { id } => found("Client", &id, clients.get_one(&id).await?)?,
        ClientCommands::List => serde_json::to_value(clients.get_all().await?)?,
        ClientCommands::Update { id, fields } => {
            serde_json::to_value(clients.patch(&id, fields.into()).await?)?
        }
        ClientCommands::Delete { id } => {
            clients.delete(&id).await?;
            json!({ "deleted": id })
        }
    };
    Ok(output)
}

async fn run_vehicle(app: &AppServices, command: VehicleCommands) -> Result<Value> {
    let vehicles = &app.vehicles;
    let output = match command {
        VehicleCommands::Create(args) => serde_json::to_value(
            vehicles
                .create(NewVehicle {
                    brand: args.brand,
                    model: args.model,
                    license_plate: args.license_plate,
                    color: args.color,
                    acquisition_date: args.acquisition_date,
                })
                .await?,
        )?,
        VehicleCommands::Get { id } => found("Vehicle", &id, vehicles.get_one(&id).await?)?,
        VehicleCommands::List => serde_json::to_value(vehicles.get_all().await?)?,
        VehicleCommands::Update { id, fields } => {
            serde_json::to_value(vehicles.patch(&id, fields.into()).await?)?
        }
        VehicleCommands::Delete { id } => {
            vehicles.delete(&id).await?;
            json!({ "deleted": id })
        }
    };
    Ok(output)
}

async fn run_contract(app: &AppServices, command: ContractCommands) -> Result<Value> {
    let contracts = &app.contracts;
    let output = match command {
        ContractCommands::Create {
            client_id,
            vehicle_id,
            start_date,
            end_date,
        } => serde_json::to_value(
            contracts
                .create(NewContract {
                    client_id,
                    vehicle_id,
                    start_date,
                    end_date,
                })
                .await?,
        )?,
        ContractCommands::Get { id } => found("Contract", &id, contracts.get_one(&id).await?)?,
        ContractCommands::List => serde_json::to_value(contracts.get_all().await?)?,
        ContractCommands::Update {
            id,
            start_date,
            end_date,
            status,
        } => {
            let update = ContractUpdate {
                start_date: updatable(start_date),
                end_date: updatable(end_date),
                status: updatable(status),
            };
            serde_json::to_value(contracts.patch(&id, update).await?)?
        }
        ContractCommands::Delete { id } => {
            contracts.delete(&id).await?;
            json!({ "deleted": id })
        }
        ContractCommands::ByClient { client_id } => {
            serde_json::to_value(contracts.get_by_client(&client_id).await?)?
        }
        ContractCommands::ByVehicle {
            vehicle_id,
            from,
            to,
        } => match (from, to) {
            (Some(from), Some(to)) => serde_json::to_value(
                contracts
                    .get_by_vehicle_between(&vehicle_id, from, to)
                    .await?,
            )?,
            _ => serde_json::to_value(contracts.get_by_vehicle(&vehicle_id).await?)?,
        },
    };
    Ok(output)
}

async fn run(app: &AppServices, command: Commands) -> Result<Value> {
    match command {
        Commands::Client { command } => run_client(app, command).await,
        Commands::Vehicle { command } => run_vehicle(app, command).await,
        Commands::Contract { command } => run_contract(app, command).await,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    cli.init_logging()?;

    debug!("Repository backend: {}", cli.repository_backend);

    let config = cli.to_app_config()?;
    let app = AppBuilder::new()
        .with_config(config)
        .build()
        .await
        .context("Failed to build application")?;

    let output = run(&app, cli.command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
