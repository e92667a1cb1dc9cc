use chrono::NaiveDate;
use rental_backend::{
    create_sqlite_app, Client, Contract, ContractStatus, ContractStorageProvider, ContractUpdate,
    NewClient, NewContract, NewVehicle, SqlClientRepository, SqlContractRepository,
    StorageProvider, UpdatableValue, VehicleStatus, VehicleUpdate,
};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use uuid::Uuid;

async fn memory_pool() -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn client(license: &str) -> Client {
    Client::builder()
        .last_name("Dupont")
        .first_name("Jean")
        .date_of_birth(date(1990, 1, 1))
        .license_number(license)
        .address("12 rue de Paris")
        .build()
}

#[tokio::test]
async fn client_round_trip_through_sqlite() {
    let services = create_sqlite_app("sqlite::memory:").await.unwrap();

    let created = services
        .clients
        .create(NewClient {
            last_name: "Dupont".to_string(),
            first_name: "Jean".to_string(),
            date_of_birth: date(1990, 1, 1),
            license_number: "AB123CD".to_string(),
            address: "12 rue de Paris".to_string(),
        })
        .await
        .unwrap();
    let id = created.id.unwrap();

    assert_eq!(services.clients.get_one(&id).await.unwrap(), Some(created));

    services.clients.delete(&id).await.unwrap();
    assert_eq!(services.clients.get_one(&id).await.unwrap(), None);
}

#[tokio::test]
async fn unique_constraint_backs_up_the_pipeline() {
    let repo = SqlClientRepository::new(memory_pool().await);
    repo.migrate().await.unwrap();

    repo.save(client("AB123CD")).await.unwrap();

    // Going straight to storage skips validation, the table still refuses it
    let mut other = client("AB123CD");
    other.last_name = "Martin".to_string();
    let err = repo.save(other).await.unwrap_err();

    assert!(err.is_conflict());
    assert_eq!(repo.get_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn save_with_existing_id_updates_in_place() {
    let repo = SqlClientRepository::new(memory_pool().await);
    repo.migrate().await.unwrap();

    let saved = repo.save(client("AB123CD")).await.unwrap();
    let moved = Client {
        address: "1 avenue Foch".to_string(),
        ..saved.clone()
    };
    repo.save(moved.clone()).await.unwrap();

    assert_eq!(repo.get_all().await.unwrap(), vec![moved]);
    assert!(repo.exists(&saved.id.unwrap()).await.unwrap());
    assert!(!repo.exists(&Uuid::new_v4()).await.unwrap());
}

#[tokio::test]
async fn vehicle_optional_fields_and_status_persist() {
    let services = create_sqlite_app("sqlite::memory:").await.unwrap();

    let created = services
        .vehicles
        .create(NewVehicle {
            brand: "Toyota".to_string(),
            model: "Corolla".to_string(),
            license_plate: "AA-123-BB".to_string(),
            color: Some("red".to_string()),
            acquisition_date: Some(date(2021, 3, 1)),
        })
        .await
        .unwrap();
    let id = created.id.unwrap();

    let update = VehicleUpdate {
        color: UpdatableValue::of(None),
        status: UpdatableValue::of(VehicleStatus::Rented),
        ..Default::default()
    };
    services.vehicles.patch(&id, update).await.unwrap();

    let stored = services.vehicles.get_one(&id).await.unwrap().unwrap();
    assert_eq!(stored.color, None);
    assert_eq!(stored.acquisition_date, Some(date(2021, 3, 1)));
    assert_eq!(stored.status, VehicleStatus::Rented);
}

#[tokio::test]
async fn contract_overlap_query_uses_inclusive_bounds() {
    let services = create_sqlite_app("sqlite::memory:").await.unwrap();
    let client_id = services
        .clients
        .create(NewClient {
            last_name: "Curie".to_string(),
            first_name: "Marie".to_string(),
            date_of_birth: date(1985, 11, 7),
            license_number: "XY987ZW".to_string(),
            address: "3 rue Pierre".to_string(),
        })
        .await
        .unwrap()
        .id
        .unwrap();
    let vehicle_id = services
        .vehicles
        .create(NewVehicle {
            brand: "Renault".to_string(),
            model: "Clio".to_string(),
            license_plate: "CC-456-DD".to_string(),
            color: None,
            acquisition_date: None,
        })
        .await
        .unwrap()
        .id
        .unwrap();

    let contract = services
        .contracts
        .create(NewContract {
            client_id,
            vehicle_id,
            start_date: date(2024, 3, 1),
            end_date: date(2024, 3, 10),
        })
        .await
        .unwrap();

    let touching = services
        .contracts
        .get_by_vehicle_between(&vehicle_id, date(2024, 3, 10), date(2024, 3, 20))
        .await
        .unwrap();
    assert_eq!(touching, vec![contract.clone()]);

    let err = services
        .contracts
        .create(NewContract {
            client_id,
            vehicle_id,
            start_date: date(2024, 2, 20),
            end_date: date(2024, 3, 1),
        })
        .await
        .unwrap_err();
    assert!(err.is_conflict());

    let update = ContractUpdate {
        status: UpdatableValue::of(ContractStatus::Ongoing),
        ..Default::default()
    };
    let merged = services
        .contracts
        .patch(&contract.id.unwrap(), update)
        .await
        .unwrap();
    assert_eq!(
        services.contracts.get_by_client(&client_id).await.unwrap(),
        vec![merged]
    );
}

#[tokio::test]
async fn contract_repository_lists_in_start_order() {
    let repo = SqlContractRepository::new(memory_pool().await);
    repo.migrate().await.unwrap();
    let vehicle_id = Uuid::new_v4();

    let periods = [
        (date(2024, 5, 1), date(2024, 5, 2)),
        (date(2024, 1, 1), date(2024, 1, 3)),
    ];
    for (start, end) in periods {
        repo.save(Contract::from(NewContract {
            client_id: Uuid::new_v4(),
            vehicle_id,
            start_date: start,
            end_date: end,
        }))
        .await
        .unwrap();
    }

    let listed = repo.find_by_vehicle(&vehicle_id).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed[0].start_date < listed[1].start_date);
}

#[tokio::test]
async fn sqlite_update_rejects_changed_parties_and_license() {
    let services = create_sqlite_app("sqlite::memory:").await.unwrap();
    let client = services
        .clients
        .create(NewClient {
            last_name: "Dupont".to_string(),
            first_name: "Jean".to_string(),
            date_of_birth: date(1990, 1, 1),
            license_number: "ab123cd".to_string(),
            address: "12 rue de Paris".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(client.license_number, "AB123CD");

    let relicensed = Client {
        license_number: "ZZ999ZZ".to_string(),
        ..client.clone()
    };
    assert!(services.clients.update(relicensed).await.is_err());

    let vehicle_id = services
        .vehicles
        .create(NewVehicle {
            brand: "Toyota".to_string(),
            model: "Corolla".to_string(),
            license_plate: "AA-123-BB".to_string(),
            color: None,
            acquisition_date: None,
        })
        .await
        .unwrap()
        .id
        .unwrap();
    let contract = services
        .contracts
        .create(NewContract {
            client_id: client.id.unwrap(),
            vehicle_id,
            start_date: date(2024, 3, 1),
            end_date: date(2024, 3, 10),
        })
        .await
        .unwrap();

    let moved = Contract {
        vehicle_id: Uuid::new_v4(),
        ..contract.clone()
    };
    assert!(services.contracts.update(moved).await.is_err());

    assert_eq!(
        services.clients.get_one(&client.id.unwrap()).await.unwrap(),
        Some(client)
    );
    assert_eq!(
        services.contracts.get_one(&contract.id.unwrap()).await.unwrap(),
        Some(contract)
    );
}
