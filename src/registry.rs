//! The Registry: every record of the parking lot and the operations over them.
//!
//! The Registry owns seven ordered collections (clients, vehicles, employees,
//! contracts, entries, exits, services). Queries hand out clones, never
//! references into the collections, so callers cannot break an invariant by
//! editing what they got back. Lookups by business key return `Option`;
//! invariant violations return `ParkingError::Conflict`.
//!
//! The Registry itself is not synchronized. Share it through
//! [`crate::lot::ParkingLot`], which puts every call behind one lock.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ParkingError, ParkingResult};
use crate::models::{Client, Contract, Employee, Entry, Exit, Service, Vehicle};
use crate::validation::validate_amount;

/// In-memory store of all parking lot records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Registry {
    pub(crate) clients: Vec<Client>,
    pub(crate) vehicles: Vec<Vehicle>,
    pub(crate) employees: Vec<Employee>,
    pub(crate) contracts: Vec<Contract>,
    pub(crate) entries: Vec<Entry>,
    pub(crate) exits: Vec<Exit>,
    pub(crate) services: Vec<Service>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every record from every collection
    pub fn reset(&mut self) {
        self.clients.clear();
        self.vehicles.clear();
        self.employees.clear();
        self.contracts.clear();
        self.entries.clear();
        self.exits.clear();
        self.services.clear();
        tracing::info!("Registry reset");
    }

    /// True when no collection holds any record
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
            && self.vehicles.is_empty()
            && self.employees.is_empty()
            && self.contracts.is_empty()
            && self.entries.is_empty()
            && self.exits.is_empty()
            && self.services.is_empty()
    }

    // =========================================================================
    // Clients
    // =========================================================================

    /// Append a client. Uniqueness of the national id is the caller's check.
    pub fn add_client(&mut self, client: Client) {
        tracing::debug!("Adding client {}", client.national_id);
        self.clients.push(client);
    }

    pub fn client_exists(&self, national_id: &str) -> bool {
        self.clients.iter().any(|c| c.national_id == national_id)
    }

    pub fn find_client(&self, national_id: &str) -> Option<Client> {
        self.client_ref(national_id).cloned()
    }

    pub fn clients(&self) -> Vec<Client> {
        self.clients.clone()
    }

    /// Replace the attributes of an existing client.
    ///
    /// Returns false when no client has `client.national_id`.
    pub fn update_client(&mut self, client: Client) -> bool {
        match self
            .clients
            .iter_mut()
            .find(|c| c.national_id == client.national_id)
        {
            Some(existing) => {
                *existing = client;
                true
            }
            None => false,
        }
    }

    /// Delete a client and every contract it holds.
    ///
    /// Vehicles whose active contract is removed lose their contract flag and
    /// client. Remaining contracts are renumbered 1..N in ascending order of
    /// their previous id. Returns false when the client does not exist.
    pub fn delete_client(&mut self, national_id: &str) -> bool {
        if !self.client_exists(national_id) {
            return false;
        }

        let released: Vec<String> = self
            .contracts
            .iter()
            .filter(|c| c.client_id == national_id && c.active)
            .map(|c| c.plate.clone())
            .collect();
        for plate in &released {
            if let Some(vehicle) = self.vehicle_mut(plate) {
                vehicle.has_contract = false;
                vehicle.client_id = None;
            }
        }

        let before = self.contracts.len();
        self.contracts.retain(|c| c.client_id != national_id);
        self.clients.retain(|c| c.national_id != national_id);
        self.renumber_contracts();

        tracing::info!(
            "Deleted client {} and {} contract(s)",
            national_id,
            before - self.contracts.len()
        );
        true
    }

    fn renumber_contracts(&mut self) {
        self.contracts.sort_by_key(|c| c.id);
        for (index, contract) in self.contracts.iter_mut().enumerate() {
            contract.id = index as u32 + 1;
        }
    }

    // =========================================================================
    // Vehicles
    // =========================================================================

    /// Append a vehicle. Uniqueness of the plate is the caller's check.
    pub fn add_vehicle(&mut self, vehicle: Vehicle) {
        tracing::debug!("Adding vehicle {}", vehicle.plate);
        self.vehicles.push(vehicle);
    }

    pub fn vehicle_exists(&self, plate: &str) -> bool {
        self.vehicles.iter().any(|v| v.plate == plate)
    }

    pub fn find_vehicle(&self, plate: &str) -> Option<Vehicle> {
        self.vehicle_ref(plate).cloned()
    }

    pub fn vehicles(&self) -> Vec<Vehicle> {
        self.vehicles.clone()
    }

    /// Replace brand, model and condition of an existing vehicle.
    ///
    /// The contract flag and client are kept as the Registry has them.
    /// Returns false when no vehicle has `vehicle.plate`.
    pub fn update_vehicle(&mut self, vehicle: Vehicle) -> bool {
        match self.vehicle_mut(&vehicle.plate) {
            Some(existing) => {
                existing.brand = vehicle.brand;
                existing.model = vehicle.model;
                existing.condition = vehicle.condition;
                true
            }
            None => false,
        }
    }

    /// Delete a vehicle with its contracts, entries, exits and services.
    ///
    /// Returns false when the vehicle is unknown.
    pub fn delete_vehicle(&mut self, plate: &str) -> bool {
        if !self.vehicle_exists(plate) {
            tracing::debug!("Delete requested for unknown vehicle {}", plate);
            return false;
        }

        let entry_ids: HashSet<Uuid> = self
            .entries
            .iter()
            .filter(|e| e.plate == plate)
            .map(|e| e.id)
            .collect();

        self.vehicles.retain(|v| v.plate != plate);
        self.contracts.retain(|c| c.plate != plate);
        self.entries.retain(|e| e.plate != plate);
        self.exits.retain(|x| !entry_ids.contains(&x.entry_id));
        self.services.retain(|s| s.plate != plate);

        tracing::info!(
            "Deleted vehicle {} with {} entr(ies) and related records",
            plate,
            entry_ids.len()
        );
        true
    }

    /// Vehicles that are not currently parked
    pub fn vehicles_without_open_entry(&self) -> Vec<Vehicle> {
        let parked: HashSet<&str> = self
            .entries
            .iter()
            .filter(|e| !self.entry_has_exit(e.id))
            .map(|e| e.plate.as_str())
            .collect();
        self.vehicles
            .iter()
            .filter(|v| !parked.contains(v.plate.as_str()))
            .cloned()
            .collect()
    }

    /// Whether any active contract names this plate
    pub fn vehicle_has_contract(&self, plate: &str) -> bool {
        self.contracts.iter().any(|c| c.plate == plate && c.active)
    }

    /// Whether the vehicle has an open entry
    pub fn is_parked(&self, plate: &str) -> bool {
        self.entries
            .iter()
            .any(|e| e.plate == plate && !self.entry_has_exit(e.id))
    }

    // =========================================================================
    // Employees
    // =========================================================================

    /// Append an employee. Uniqueness of the number is the caller's check.
    pub fn add_employee(&mut self, employee: Employee) {
        tracing::debug!("Adding employee #{}", employee.number);
        self.employees.push(employee);
    }

    pub fn employee_exists(&self, number: u32) -> bool {
        self.employees.iter().any(|e| e.number == number)
    }

    pub fn find_employee(&self, number: u32) -> Option<Employee> {
        self.employee_ref(number).cloned()
    }

    pub fn employees(&self) -> Vec<Employee> {
        self.employees.clone()
    }

    /// Employee at a position of the list, as shown by the forms
    pub fn employee_at(&self, index: usize) -> Option<Employee> {
        self.employees.get(index).cloned()
    }

    /// Mark an employee active or inactive. Returns false when unknown.
    pub fn set_employee_active(&mut self, number: u32, active: bool) -> bool {
        match self.employees.iter_mut().find(|e| e.number == number) {
            Some(employee) => {
                employee.active = active;
                true
            }
            None => false,
        }
    }

    /// Delete an employee with no history.
    ///
    /// Returns `Ok(false)` when the employee is unknown. Fails with a conflict
    /// while any contract, entry, exit or service names the employee; such
    /// employees can only be deactivated.
    pub fn delete_employee(&mut self, number: u32) -> ParkingResult<bool> {
        if !self.employee_exists(number) {
            return Ok(false);
        }

        let referenced = self.contracts.iter().any(|c| c.employee_number == number)
            || self.entries.iter().any(|e| e.employee_number == number)
            || self.exits.iter().any(|x| x.employee_number == number)
            || self.services.iter().any(|s| s.employee_number == number);
        if referenced {
            tracing::warn!("Refusing to delete employee #{} with recorded history", number);
            return Err(ParkingError::conflict(format!(
                "employee #{} has recorded contracts or movements",
                number
            )));
        }

        self.employees.retain(|e| e.number != number);
        tracing::info!("Deleted employee #{}", number);
        Ok(true)
    }

    // =========================================================================
    // Contracts
    // =========================================================================

    /// Add a contract and assign its id.
    ///
    /// The id is the largest existing id plus one (1 for the first contract).
    /// Fails with `Validation` for a negative monthly value, with
    /// `InvalidArgument` when the client, vehicle or employee is not in the
    /// registry, and with `Conflict` when the vehicle already has an active
    /// contract. An active contract marks its vehicle as contracted to
    /// its client. Returns the assigned id.
    pub fn add_contract(&mut self, mut contract: Contract) -> ParkingResult<u32> {
        validate_amount(contract.monthly_value, "monthly_value")?;
        if !self.client_exists(&contract.client_id) {
            return Err(ParkingError::invalid_argument(format!(
                "client {} is not registered",
                contract.client_id
            )));
        }
        if !self.vehicle_exists(&contract.plate) {
            return Err(ParkingError::invalid_argument(format!(
                "vehicle {} is not registered",
                contract.plate
            )));
        }
        if !self.employee_exists(contract.employee_number) {
            return Err(ParkingError::invalid_argument(format!(
                "employee #{} is not registered",
                contract.employee_number
            )));
        }
        if self.vehicle_has_contract(&contract.plate) {
            tracing::warn!("Rejected contract for {}: already contracted", contract.plate);
            return Err(ParkingError::conflict(format!(
                "vehicle {} already has an active contract",
                contract.plate
            )));
        }

        contract.id = self.next_contract_id();
        if contract.active {
            self.attach_vehicle(&contract.plate, &contract.client_id);
        }

        let id = contract.id;
        tracing::info!(
            "Contract #{} created for {} / {}",
            id,
            contract.client_id,
            contract.plate
        );
        self.contracts.push(contract);
        Ok(id)
    }

    /// Id that `add_contract` would assign right now.
    ///
    /// Advisory only: nothing is reserved.
    pub fn next_contract_id(&self) -> u32 {
        self.contracts.iter().map(|c| c.id).max().unwrap_or(0) + 1
    }

    pub fn find_contract(&self, id: u32) -> Option<Contract> {
        self.contracts.iter().find(|c| c.id == id).cloned()
    }

    pub fn contracts(&self) -> Vec<Contract> {
        self.contracts.clone()
    }

    /// One-line description of a contract naming its client.
    ///
    /// Falls back to the national id if the client record is missing.
    pub fn contract_label(&self, id: u32) -> Option<String> {
        let contract = self.contracts.iter().find(|c| c.id == id)?;
        let client = self
            .client_ref(&contract.client_id)
            .map(|c| c.name.as_str())
            .unwrap_or(contract.client_id.as_str());
        Some(contract.describe(client))
    }

    /// Activate or deactivate a contract.
    ///
    /// Activation marks the vehicle as contracted to the contract's client and
    /// fails with a conflict if another active contract exists for the vehicle.
    /// Deactivation clears the vehicle's flag and client. Returns `Ok(false)`
    /// for an unknown id.
    pub fn set_contract_active(&mut self, id: u32, active: bool) -> ParkingResult<bool> {
        let Some(index) = self.contracts.iter().position(|c| c.id == id) else {
            return Ok(false);
        };
        if self.contracts[index].active == active {
            return Ok(true);
        }

        let plate = self.contracts[index].plate.clone();
        let client_id = self.contracts[index].client_id.clone();

        if active {
            if self.vehicle_has_contract(&plate) {
                return Err(ParkingError::conflict(format!(
                    "vehicle {} already has an active contract",
                    plate
                )));
            }
            self.attach_vehicle(&plate, &client_id);
        } else if let Some(vehicle) = self.vehicle_mut(&plate) {
            vehicle.has_contract = false;
            vehicle.client_id = None;
        }

        self.contracts[index].active = active;
        tracing::info!(
            "Contract #{} {}",
            id,
            if active { "activated" } else { "deactivated" }
        );
        Ok(true)
    }

    fn attach_vehicle(&mut self, plate: &str, client_id: &str) {
        if let Some(vehicle) = self.vehicle_mut(plate) {
            vehicle.has_contract = true;
            vehicle.client_id = Some(client_id.to_string());
        }
    }

    // =========================================================================
    // Entries and exits
    // =========================================================================

    /// Append an entry. Callers check the vehicle is not already parked.
    pub fn add_entry(&mut self, entry: Entry) {
        tracing::debug!("Entry {} for {} at {} {}", entry.id, entry.plate, entry.date, entry.time);
        self.entries.push(entry);
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.entries.clone()
    }

    /// Register the exit that closes an entry.
    ///
    /// Fails with a conflict when the entry already has an exit, and with
    /// `InvalidArgument` when the entry or the employee is not in the registry.
    pub fn register_exit(&mut self, exit: Exit) -> ParkingResult<()> {
        if self.entry_has_exit(exit.entry_id) {
            tracing::warn!("Rejected duplicate exit for entry {}", exit.entry_id);
            return Err(ParkingError::conflict(format!(
                "entry {} already has an exit",
                exit.entry_id
            )));
        }
        if !self.entries.iter().any(|e| e.id == exit.entry_id) {
            return Err(ParkingError::invalid_argument(format!(
                "entry {} is not registered",
                exit.entry_id
            )));
        }
        if !self.employee_exists(exit.employee_number) {
            return Err(ParkingError::invalid_argument(format!(
                "employee #{} is not registered",
                exit.employee_number
            )));
        }

        tracing::debug!("Exit for entry {} at {} {}", exit.entry_id, exit.date, exit.time);
        self.exits.push(exit);
        Ok(())
    }

    pub fn exits(&self) -> Vec<Exit> {
        self.exits.clone()
    }

    /// Entries with no exit yet: the vehicles currently parked
    pub fn open_entries(&self) -> Vec<Entry> {
        self.entries
            .iter()
            .filter(|e| !self.entry_has_exit(e.id))
            .cloned()
            .collect()
    }

    /// The open entry of a vehicle, if it is parked
    pub fn find_open_entry(&self, plate: &str) -> Option<Entry> {
        self.entries
            .iter()
            .find(|e| e.plate == plate && !self.entry_has_exit(e.id))
            .cloned()
    }

    fn entry_has_exit(&self, entry_id: Uuid) -> bool {
        self.exits.iter().any(|x| x.entry_id == entry_id)
    }

    // =========================================================================
    // Services
    // =========================================================================

    /// Append a service
    pub fn add_service(&mut self, service: Service) {
        tracing::debug!("Service '{}' for {}", service.kind, service.plate);
        self.services.push(service);
    }

    pub fn services(&self) -> Vec<Service> {
        self.services.clone()
    }

    /// Delete the service at `index`. Returns false when out of range.
    pub fn delete_service(&mut self, index: usize) -> bool {
        if index >= self.services.len() {
            tracing::debug!("Delete requested for missing service at {}", index);
            return false;
        }
        let removed = self.services.remove(index);
        tracing::info!("Deleted service '{}' for {}", removed.kind, removed.plate);
        true
    }

    // =========================================================================
    // Internal lookups
    // =========================================================================

    pub(crate) fn client_ref(&self, national_id: &str) -> Option<&Client> {
        self.clients.iter().find(|c| c.national_id == national_id)
    }

    pub(crate) fn vehicle_ref(&self, plate: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.plate == plate)
    }

    pub(crate) fn employee_ref(&self, number: u32) -> Option<&Employee> {
        self.employees.iter().find(|e| e.number == number)
    }

    pub(crate) fn entry_ref(&self, entry_id: Uuid) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == entry_id)
    }

    fn vehicle_mut(&mut self, plate: &str) -> Option<&mut Vehicle> {
        self.vehicles.iter_mut().find(|v| v.plate == plate)
    }
}
