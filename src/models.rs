//! Data models for the parking lot.
//!
//! This module defines the core entities: Client, Vehicle, Employee, Contract,
//! Entry, Exit and Service. Records refer to each other by business key
//! (national id, plate, employee number, entry id) and never hold references,
//! so the Registry stays the single owner of every record.

use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ParkingResult;
use crate::timefmt;
use crate::validation::{
    validate_amount, validate_employee_number, validate_join_year, validate_notes,
    validate_plate, validate_required, validate_time,
};

/// Service types offered by the lot, in the order the forms list them.
///
/// The Registry does not check `Service::kind` against this list.
pub const SERVICE_TYPES: [&str; 5] = [
    "Lavado",
    "Cambio de rueda",
    "Limpieza de tapizado",
    "Cambio de luces",
    "Otro",
];

/// Render a money amount with two decimals.
pub fn format_amount(amount: Decimal) -> String {
    format!(
        "{:.2}",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

/// A client of the lot, identified by national id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// National id (unique)
    pub national_id: String,
    pub name: String,
    pub address: String,
    pub phone: String,
    /// Year the client started using the lot
    pub year_joined: i32,
}

impl Client {
    /// Create a client.
    ///
    /// National id and name must not be blank and the join year must be
    /// between 1900 and 9999. Text fields are trimmed.
    pub fn new(
        national_id: &str,
        name: &str,
        address: &str,
        phone: &str,
        year_joined: i32,
    ) -> ParkingResult<Self> {
        Ok(Self {
            national_id: validate_required(national_id, "national_id")?,
            name: validate_required(name, "name")?,
            address: address.trim().to_string(),
            phone: phone.trim().to_string(),
            year_joined: validate_join_year(year_joined)?,
        })
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.national_id)
    }
}

/// A vehicle, identified by its license plate.
///
/// `has_contract` and `client_id` are owned by the Registry: they are set when
/// a contract for the vehicle is activated and cleared when it is deactivated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    /// License plate (unique)
    pub plate: String,
    pub brand: String,
    pub model: String,
    /// Free-text condition ("Bueno", "Rayón puerta", ...)
    pub condition: String,
    pub has_contract: bool,
    /// National id of the client of the active contract, if any
    pub client_id: Option<String>,
}

impl Vehicle {
    /// Create a vehicle with no contract. The plate is validated and trimmed.
    pub fn new(plate: &str, brand: &str, model: &str, condition: &str) -> ParkingResult<Self> {
        Ok(Self {
            plate: validate_plate(plate)?,
            brand: brand.trim().to_string(),
            model: model.trim().to_string(),
            condition: condition.trim().to_string(),
            has_contract: false,
            client_id: None,
        })
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} {} ({})",
            self.plate, self.brand, self.model, self.condition
        )
    }
}

/// An employee of the lot.
///
/// Equality and hashing use the employee number only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    /// National id (expected unique, not enforced)
    pub national_id: String,
    pub name: String,
    pub address: String,
    /// Employee number (unique, positive)
    pub number: u32,
    pub active: bool,
}

impl Employee {
    /// Create an active employee.
    ///
    /// National id and name must not be blank and the number must be positive.
    /// Text fields are trimmed.
    pub fn new(
        national_id: &str,
        name: &str,
        address: &str,
        number: i64,
    ) -> ParkingResult<Self> {
        let national_id = validate_required(national_id, "national_id")?;
        let name = validate_required(name, "name")?;
        let number = validate_employee_number(number)?;
        Ok(Self {
            national_id,
            name,
            address: address.trim().to_string(),
            number,
            active: true,
        })
    }

    /// "<name> (#<number>)", as shown in report rows
    pub fn label(&self) -> String {
        format!("{} (#{})", self.name, self.number)
    }
}

impl PartialEq for Employee {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number
    }
}

impl Eq for Employee {}

impl Hash for Employee {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.number.hash(state);
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} ({})", self.number, self.name, self.national_id)
    }
}

/// A monthly contract binding a client and a vehicle through an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    /// Assigned by the Registry when the contract is added (0 until then)
    pub id: u32,
    pub client_id: String,
    pub plate: String,
    pub employee_number: u32,
    pub monthly_value: Decimal,
    pub active: bool,
}

impl Contract {
    /// Create an active, not yet numbered contract.
    pub fn new(
        client: &Client,
        vehicle: &Vehicle,
        employee: &Employee,
        monthly_value: Decimal,
    ) -> Self {
        Self {
            id: 0,
            client_id: client.national_id.clone(),
            plate: vehicle.plate.clone(),
            employee_number: employee.number,
            monthly_value,
            active: true,
        }
    }
}

impl Contract {
    /// Render the contract with `client` standing for its client.
    ///
    /// [`crate::Registry::contract_label`] passes the client's name.
    pub fn describe(&self, client: &str) -> String {
        let state = if self.active { "ACTIVO" } else { "INACTIVO" };
        format!(
            "Contrato #{} - {} ({}) - {} - ${}/mes",
            self.id,
            client,
            self.plate,
            state,
            format_amount(self.monthly_value)
        )
    }
}

/// Shows the client's national id, since a contract does not hold the name.
impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe(&format!("CI {}", self.client_id)))
    }
}

/// A vehicle entering the lot.
///
/// The `id` stands in for object identity: two entries with the same
/// attributes are still different entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: Uuid,
    pub plate: String,
    /// Employee who received the vehicle
    pub employee_number: u32,
    pub date: NaiveDate,
    /// "HH:mm"
    pub time: String,
    pub notes: String,
    /// Whether the vehicle had an active contract when it entered
    pub had_contract: bool,
}

impl Entry {
    /// Record a vehicle entering, capturing its current contract flag.
    pub fn new(
        vehicle: &Vehicle,
        employee: &Employee,
        date: NaiveDate,
        time: &str,
        notes: &str,
    ) -> ParkingResult<Self> {
        Ok(Self {
            id: Uuid::now_v7(),
            plate: vehicle.plate.clone(),
            employee_number: employee.number,
            date,
            time: validate_time(time, "time")?,
            notes: validate_notes(notes, "notes")?,
            had_contract: vehicle.has_contract,
        })
    }
}

/// A vehicle leaving the lot, closing exactly one Entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exit {
    /// Id of the entry this exit closes
    pub entry_id: Uuid,
    /// Employee who processed the exit
    pub employee_number: u32,
    pub date: NaiveDate,
    /// "HH:mm"
    pub time: String,
    pub comment: String,
    /// Copied from the entry
    pub had_contract: bool,
    /// Human-readable stay, e.g. "2 horas y 05 minutos".
    ///
    /// "Error en cálculo" when the exit precedes its entry.
    pub stay: String,
}

impl Exit {
    /// Record the exit for `entry`, computing the stay from the entry time.
    pub fn new(
        entry: &Entry,
        employee: &Employee,
        date: NaiveDate,
        time: &str,
        comment: &str,
    ) -> ParkingResult<Self> {
        let time = validate_time(time, "time")?;
        let entered = timefmt::combine(entry.date, &entry.time)?;
        let left = timefmt::combine(date, &time)?;
        Ok(Self {
            entry_id: entry.id,
            employee_number: employee.number,
            date,
            time,
            comment: validate_notes(comment, "comment")?,
            had_contract: entry.had_contract,
            stay: timefmt::format_stay(timefmt::minutes_between(entered, left)),
        })
    }
}

/// A billable ancillary service performed on a vehicle.
///
/// Services have no identity; the Registry addresses them by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Service type, normally one of [`SERVICE_TYPES`]
    pub kind: String,
    pub plate: String,
    pub employee_number: u32,
    pub date: NaiveDate,
    /// "HH:mm"
    pub time: String,
    pub cost: Decimal,
}

impl Service {
    pub fn new(
        kind: &str,
        vehicle: &Vehicle,
        employee: &Employee,
        date: NaiveDate,
        time: &str,
        cost: Decimal,
    ) -> ParkingResult<Self> {
        Ok(Self {
            kind: validate_required(kind, "kind")?,
            plate: vehicle.plate.clone(),
            employee_number: employee.number,
            date,
            time: validate_time(time, "time")?,
            cost: validate_amount(cost, "cost")?,
        })
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} - #{} - ${}",
            self.kind,
            self.plate,
            self.employee_number,
            format_amount(self.cost)
        )
    }
}
