use chrono::NaiveDate;
use rental_backend::{
    create_in_memory_app, AppServices, Contract, ContractStatus, ContractUpdate, NewClient,
    NewContract, NewVehicle, ServiceError, UpdatableValue, ValidationError,
};
use uuid::Uuid;

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, d).unwrap()
}

async fn seed(services: &AppServices) -> (Uuid, Uuid) {
    let client = services
        .clients
        .create(NewClient {
            last_name: "Dupont".to_string(),
            first_name: "Jean".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            license_number: "AB123CD".to_string(),
            address: "12 rue de Paris".to_string(),
        })
        .await
        .unwrap();
    let vehicle = services
        .vehicles
        .create(NewVehicle {
            brand: "Toyota".to_string(),
            model: "Corolla".to_string(),
            license_plate: "AA-123-BB".to_string(),
            color: None,
            acquisition_date: None,
        })
        .await
        .unwrap();

    (client.id.unwrap(), vehicle.id.unwrap())
}

fn booking(client_id: Uuid, vehicle_id: Uuid, start: NaiveDate, end: NaiveDate) -> NewContract {
    NewContract {
        client_id,
        vehicle_id,
        start_date: start,
        end_date: end,
    }
}

#[tokio::test]
async fn create_contract_starts_pending() {
    let services = create_in_memory_app().await.unwrap();
    let (client_id, vehicle_id) = seed(&services).await;

    let contract = services
        .contracts
        .create(booking(client_id, vehicle_id, date(3, 1), date(3, 10)))
        .await
        .unwrap();

    assert_eq!(contract.status, ContractStatus::Pending);
    let fetched = services.contracts.get_one(&contract.id.unwrap()).await.unwrap();
    assert_eq!(fetched, Some(contract));
}

#[tokio::test]
async fn overlapping_booking_is_rejected() {
    let services = create_in_memory_app().await.unwrap();
    let (client_id, vehicle_id) = seed(&services).await;
    services
        .contracts
        .create(booking(client_id, vehicle_id, date(3, 1), date(3, 10)))
        .await
        .unwrap();

    // Shares the last day of the first booking
    let err = services
        .contracts
        .create(booking(client_id, vehicle_id, date(3, 10), date(3, 15)))
        .await
        .unwrap_err();
    assert!(err.is_conflict());

    services
        .contracts
        .create(booking(client_id, vehicle_id, date(3, 11), date(3, 15)))
        .await
        .unwrap();
    assert_eq!(services.contracts.get_all().await.unwrap().len(), 2);
}

#[tokio::test]
async fn cancelled_contract_frees_the_vehicle() {
    let services = create_in_memory_app().await.unwrap();
    let (client_id, vehicle_id) = seed(&services).await;
    let first = services
        .contracts
        .create(booking(client_id, vehicle_id, date(3, 1), date(3, 10)))
        .await
        .unwrap();

    let cancel = ContractUpdate {
        status: UpdatableValue::of(ContractStatus::Cancelled),
        ..Default::default()
    };
    services
        .contracts
        .patch(&first.id.unwrap(), cancel)
        .await
        .unwrap();

    services
        .contracts
        .create(booking(client_id, vehicle_id, date(3, 5), date(3, 8)))
        .await
        .unwrap();
}

#[tokio::test]
async fn unknown_parties_are_rejected() {
    let services = create_in_memory_app().await.unwrap();
    let (client_id, vehicle_id) = seed(&services).await;

    let err = services
        .contracts
        .create(booking(Uuid::new_v4(), vehicle_id, date(3, 1), date(3, 2)))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::UnknownClient(_))
    ));

    let err = services
        .contracts
        .create(booking(client_id, Uuid::new_v4(), date(3, 1), date(3, 2)))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::UnknownVehicle(_))
    ));
}

#[tokio::test]
async fn inverted_period_fails_before_party_lookup() {
    let services = create_in_memory_app().await.unwrap();

    let err = services
        .contracts
        .create(booking(Uuid::new_v4(), Uuid::new_v4(), date(3, 10), date(3, 1)))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::InvalidPeriod { .. })
    ));
    assert!(services.contracts.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn extending_own_contract_does_not_conflict() {
    let services = create_in_memory_app().await.unwrap();
    let (client_id, vehicle_id) = seed(&services).await;
    let contract = services
        .contracts
        .create(booking(client_id, vehicle_id, date(3, 1), date(3, 10)))
        .await
        .unwrap();

    let update = ContractUpdate {
        end_date: UpdatableValue::of(date(3, 20)),
        ..Default::default()
    };
    let merged = services
        .contracts
        .patch(&contract.id.unwrap(), update)
        .await
        .unwrap();

    assert_eq!(merged.start_date, date(3, 1));
    assert_eq!(merged.end_date, date(3, 20));
}

#[tokio::test]
async fn extending_into_another_booking_conflicts() {
    let services = create_in_memory_app().await.unwrap();
    let (client_id, vehicle_id) = seed(&services).await;
    let first = services
        .contracts
        .create(booking(client_id, vehicle_id, date(3, 1), date(3, 10)))
        .await
        .unwrap();
    services
        .contracts
        .create(booking(client_id, vehicle_id, date(3, 15), date(3, 20)))
        .await
        .unwrap();

    let update = ContractUpdate {
        end_date: UpdatableValue::of(date(3, 16)),
        ..Default::default()
    };
    let err = services
        .contracts
        .patch(&first.id.unwrap(), update)
        .await
        .unwrap_err();

    assert!(err.is_conflict());
    let stored = services.contracts.get_one(&first.id.unwrap()).await.unwrap();
    assert_eq!(stored, Some(first));
}

#[tokio::test]
async fn lookups_by_client_and_vehicle() {
    let services = create_in_memory_app().await.unwrap();
    let (client_id, vehicle_id) = seed(&services).await;
    let march = services
        .contracts
        .create(booking(client_id, vehicle_id, date(3, 1), date(3, 10)))
        .await
        .unwrap();
    let may = services
        .contracts
        .create(booking(client_id, vehicle_id, date(5, 1), date(5, 10)))
        .await
        .unwrap();

    let by_client = services.contracts.get_by_client(&client_id).await.unwrap();
    assert_eq!(by_client, vec![march.clone(), may.clone()]);

    let by_vehicle = services.contracts.get_by_vehicle(&vehicle_id).await.unwrap();
    assert_eq!(by_vehicle.len(), 2);

    let april_to_may = services
        .contracts
        .get_by_vehicle_between(&vehicle_id, date(4, 1), date(5, 1))
        .await
        .unwrap();
    assert_eq!(april_to_may, vec![may]);

    assert!(services
        .contracts
        .get_by_client(&Uuid::new_v4())
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn update_cannot_change_parties() {
    let services = create_in_memory_app().await.unwrap();
    let (client_id, vehicle_id) = seed(&services).await;
    let other_vehicle = services
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
        .create(booking(client_id, vehicle_id, date(3, 1), date(3, 10)))
        .await
        .unwrap();

    let moved = Contract {
        vehicle_id: other_vehicle,
        ..contract.clone()
    };
    let err = services.contracts.update(moved).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::ImmutableField { ref field, .. })
            if field == "vehicle_id"
    ));

    let reassigned = Contract {
        client_id: Uuid::new_v4(),
        ..contract.clone()
    };
    let err = services.contracts.update(reassigned).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::ImmutableField { ref field, .. })
            if field == "client_id"
    ));

    assert_eq!(
        services.contracts.get_one(&contract.id.unwrap()).await.unwrap(),
        Some(contract)
    );
    assert!(services
        .contracts
        .get_by_vehicle(&other_vehicle)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn update_of_unknown_contract_is_not_found() {
    let services = create_in_memory_app().await.unwrap();
    let (client_id, vehicle_id) = seed(&services).await;

    let stray = Contract {
        id: Some(Uuid::new_v4()),
        ..Contract::from(booking(client_id, vehicle_id, date(3, 1), date(3, 2)))
    };
    let err = services.contracts.update(stray).await.unwrap_err();

    assert!(matches!(err, ServiceError::NotFound { entity: "Contract", .. }));
    assert!(services.contracts.get_all().await.unwrap().is_empty());
}
