pub mod client;
pub mod contract;
pub mod entity;
pub mod vehicle;

pub use client::{Client, ClientUpdate, NewClient};
pub use contract::{Contract, ContractStatus, ContractUpdate, NewContract};
pub use entity::Entity;
pub use vehicle::{NewVehicle, Vehicle, VehicleStatus, VehicleUpdate};
