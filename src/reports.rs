//! Reports and aggregates over the Registry.
//!
//! Every report is a pure function of the current state. Entries, exits and
//! services are walked together as [`Movement`]s. Records whose stored time
//! cannot be parsed are skipped with a warning rather than failing the report.
//!
//! Ties in the "most"/"least" reports are resolved arbitrarily.

use std::collections::HashMap;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ParkingError, ParkingResult};
use crate::models::{format_amount, Entry, Exit, Service};
use crate::registry::Registry;
use crate::timefmt;

pub const NO_SERVICES: &str = "No hay servicios registrados";
pub const NO_EMPLOYEE_MOVEMENTS: &str = "No hay empleados con movimientos";
pub const NO_ACTIVE_CONTRACTS: &str = "No hay contratos activos";
pub const NO_EXITS: &str = "No hay salidas registradas";

/// One of the four 6-hour buckets of a day used for occupancy reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeSlot {
    /// 00:00 - 05:59
    Night,
    /// 06:00 - 11:59
    Morning,
    /// 12:00 - 17:59
    Afternoon,
    /// 18:00 - 23:59
    Evening,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 4] = [
        TimeSlot::Night,
        TimeSlot::Morning,
        TimeSlot::Afternoon,
        TimeSlot::Evening,
    ];

    /// Interval index 0..=3 as used by the report grid
    pub fn index(self) -> u8 {
        match self {
            TimeSlot::Night => 0,
            TimeSlot::Morning => 1,
            TimeSlot::Afternoon => 2,
            TimeSlot::Evening => 3,
        }
    }

    /// Slot containing an hour of day (0-23)
    pub fn of_hour(hour: u32) -> Self {
        match hour {
            0..=5 => TimeSlot::Night,
            6..=11 => TimeSlot::Morning,
            12..=17 => TimeSlot::Afternoon,
            _ => TimeSlot::Evening,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeSlot::Night => "00:00 - 05:59",
            TimeSlot::Morning => "06:00 - 11:59",
            TimeSlot::Afternoon => "12:00 - 17:59",
            TimeSlot::Evening => "18:00 - 23:59",
        }
    }
}

impl TryFrom<u8> for TimeSlot {
    type Error = ParkingError;

    fn try_from(index: u8) -> ParkingResult<Self> {
        TimeSlot::ALL
            .get(index as usize)
            .copied()
            .ok_or_else(|| {
                ParkingError::validation(
                    "interval",
                    format!("interval must be between 0 and 3, got {}", index),
                )
            })
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Kind of a movement, rendered the way report tables label it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementKind {
    Entry,
    Exit,
    /// A service, with its type
    Service(String),
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovementKind::Entry => f.write_str("Entrada"),
            MovementKind::Exit => f.write_str("Salida"),
            MovementKind::Service(kind) => write!(f, "Servicio: {}", kind),
        }
    }
}

/// A record that happened at the lot at a point in time.
#[derive(Debug, Clone, Copy)]
pub enum Movement<'a> {
    Entry(&'a Entry),
    /// An exit with the entry it closes, when that entry is still known
    Exit(&'a Exit, Option<&'a Entry>),
    Service(&'a Service),
}

impl<'a> Movement<'a> {
    pub fn date(&self) -> NaiveDate {
        match self {
            Movement::Entry(e) => e.date,
            Movement::Exit(x, _) => x.date,
            Movement::Service(s) => s.date,
        }
    }

    pub fn time(&self) -> &'a str {
        match self {
            Movement::Entry(e) => &e.time,
            Movement::Exit(x, _) => &x.time,
            Movement::Service(s) => &s.time,
        }
    }

    pub fn employee_number(&self) -> u32 {
        match self {
            Movement::Entry(e) => e.employee_number,
            Movement::Exit(x, _) => x.employee_number,
            Movement::Service(s) => s.employee_number,
        }
    }

    /// Plate of the vehicle involved. None for an exit whose entry is gone.
    pub fn plate(&self) -> Option<&'a str> {
        match self {
            Movement::Entry(e) => Some(&e.plate),
            Movement::Exit(_, entry) => entry.map(|e| e.plate.as_str()),
            Movement::Service(s) => Some(&s.plate),
        }
    }

    pub fn kind(&self) -> MovementKind {
        match self {
            Movement::Entry(_) => MovementKind::Entry,
            Movement::Exit(..) => MovementKind::Exit,
            Movement::Service(s) => MovementKind::Service(s.kind.clone()),
        }
    }

    pub fn timestamp(&self) -> ParkingResult<NaiveDateTime> {
        timefmt::combine(self.date(), self.time())
    }

    fn slot(&self) -> Option<TimeSlot> {
        match timefmt::hour_of(self.time()) {
            Ok(hour) => Some(TimeSlot::of_hour(hour)),
            Err(err) => {
                tracing::warn!("Skipping movement with unreadable time: {}", err);
                None
            }
        }
    }
}

/// One line of a vehicle's movement history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRow {
    pub timestamp: NaiveDateTime,
    pub kind: MovementKind,
    /// "Recibido por: Luis (#1)", "Atendido por: ...", "Realizado por: ..."
    pub actor: String,
    /// Entry notes, exit comment, or "Costo: $<cost>" for services
    pub detail: String,
}

/// One line of the movements listed for a date and time slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalRow {
    pub timestamp: NaiveDateTime,
    pub plate: String,
    pub kind: MovementKind,
    /// "Luis (#1)"
    pub actor: String,
}

/// Active/inactive contract counts and the mean monthly value of active ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractStats {
    pub active: usize,
    pub inactive: usize,
    pub average_active_value: Decimal,
}

impl fmt::Display for ContractStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Contratos activos: {} | Contratos inactivos: {} | Valor promedio: ${}",
            self.active,
            self.inactive,
            format_amount(self.average_active_value)
        )
    }
}

impl Registry {
    /// Every entry, exit and service, in that order
    pub fn movements(&self) -> impl Iterator<Item = Movement<'_>> + '_ {
        self.entries
            .iter()
            .map(Movement::Entry)
            .chain(
                self.exits
                    .iter()
                    .map(move |x| Movement::Exit(x, self.entry_ref(x.entry_id))),
            )
            .chain(self.services.iter().map(Movement::Service))
    }

    fn actor_label(&self, number: u32) -> String {
        match self.employee_ref(number) {
            Some(employee) => employee.label(),
            None => format!("(#{})", number),
        }
    }

    /// Entries, exits and services of one vehicle.
    ///
    /// Rows come grouped by kind (entries, exits, services) in registry order;
    /// sort by `timestamp` for a chronological view.
    pub fn vehicle_history(&self, plate: &str) -> Vec<HistoryRow> {
        self.movements()
            .filter(|m| m.plate() == Some(plate))
            .filter_map(|m| {
                let timestamp = match m.timestamp() {
                    Ok(ts) => ts,
                    Err(err) => {
                        tracing::warn!("Skipping history row for {}: {}", plate, err);
                        return None;
                    }
                };
                let actor = self.actor_label(m.employee_number());
                let (actor, detail) = match m {
                    Movement::Entry(e) => (format!("Recibido por: {}", actor), e.notes.clone()),
                    Movement::Exit(x, _) => {
                        (format!("Atendido por: {}", actor), x.comment.clone())
                    }
                    Movement::Service(s) => (
                        format!("Realizado por: {}", actor),
                        format!("Costo: ${}", format_amount(s.cost)),
                    ),
                };
                Some(HistoryRow {
                    timestamp,
                    kind: m.kind(),
                    actor,
                    detail,
                })
            })
            .collect()
    }

    fn movements_in_slot(
        &self,
        date: NaiveDate,
        slot: TimeSlot,
    ) -> impl Iterator<Item = Movement<'_>> + '_ {
        self.movements()
            .filter(move |m| m.date() == date && m.slot() == Some(slot))
    }

    /// Number of entries, exits and services on `date` within `slot`
    pub fn count_movements(&self, date: NaiveDate, slot: TimeSlot) -> usize {
        self.movements_in_slot(date, slot).count()
    }

    /// Movements on `date` within `slot`, sorted by timestamp
    pub fn interval_movements(&self, date: NaiveDate, slot: TimeSlot) -> Vec<IntervalRow> {
        let mut rows: Vec<IntervalRow> = self
            .movements_in_slot(date, slot)
            .filter_map(|m| {
                let timestamp = m.timestamp().ok()?;
                Some(IntervalRow {
                    timestamp,
                    plate: m.plate().unwrap_or_default().to_string(),
                    kind: m.kind(),
                    actor: self.actor_label(m.employee_number()),
                })
            })
            .collect();
        rows.sort_by_key(|row| row.timestamp);
        rows
    }

    /// Number of services per service type
    pub fn service_counts(&self) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for service in &self.services {
            *counts.entry(service.kind.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// "<type> (<count> veces)" for the most requested service type
    pub fn most_used_service(&self) -> String {
        match self.service_counts().into_iter().max_by_key(|(_, n)| *n) {
            Some((kind, count)) => format!("{} ({} veces)", kind, count),
            None => NO_SERVICES.to_string(),
        }
    }

    /// Entries, exits and services handled per employee number.
    ///
    /// With `active_only`, movements by inactive or unknown employees are
    /// left out. Employees without movements do not appear.
    pub fn employee_movement_counts(&self, active_only: bool) -> HashMap<u32, usize> {
        let mut counts = HashMap::new();
        for movement in self.movements() {
            let number = movement.employee_number();
            if active_only && !self.employee_ref(number).is_some_and(|e| e.active) {
                continue;
            }
            *counts.entry(number).or_insert(0) += 1;
        }
        counts
    }

    fn employee_report(&self, pick: Option<(u32, usize)>) -> String {
        match pick {
            Some((number, count)) => {
                format!("{} - {} movimientos", self.actor_label(number), count)
            }
            None => NO_EMPLOYEE_MOVEMENTS.to_string(),
        }
    }

    /// Active employee with the fewest movements among those with any
    pub fn least_active_employee(&self) -> String {
        let pick = self
            .employee_movement_counts(true)
            .into_iter()
            .min_by_key(|(_, n)| *n);
        self.employee_report(pick)
    }

    /// Employee with the most movements
    pub fn most_active_employee(&self) -> String {
        let pick = self
            .employee_movement_counts(false)
            .into_iter()
            .max_by_key(|(_, n)| *n);
        self.employee_report(pick)
    }

    /// Active contracts per client national id
    pub fn client_vehicle_counts(&self) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for contract in self.contracts.iter().filter(|c| c.active) {
            *counts.entry(contract.client_id.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// "<name> (<count> vehículos)" for the client with most active contracts
    pub fn client_with_most_vehicles(&self) -> String {
        match self.client_vehicle_counts().into_iter().max_by_key(|(_, n)| *n) {
            Some((client_id, count)) => {
                let name = self
                    .client_ref(&client_id)
                    .map(|c| c.name.as_str())
                    .unwrap_or(client_id.as_str());
                format!("{} ({} vehículos)", name, count)
            }
            None => NO_ACTIVE_CONTRACTS.to_string(),
        }
    }

    pub fn contract_stats(&self) -> ContractStats {
        let active: Vec<&Decimal> = self
            .contracts
            .iter()
            .filter(|c| c.active)
            .map(|c| &c.monthly_value)
            .collect();
        let average_active_value = if active.is_empty() {
            Decimal::ZERO
        } else {
            active.iter().copied().sum::<Decimal>() / Decimal::from(active.len())
        };
        ContractStats {
            active: active.len(),
            inactive: self.contracts.len() - active.len(),
            average_active_value,
        }
    }

    /// Contract statistics rendered on one line
    pub fn contract_summary(&self) -> String {
        self.contract_stats().to_string()
    }

    fn stay_minutes(&self, exit: &Exit) -> Option<(i64, &Entry)> {
        let entry = self.entry_ref(exit.entry_id)?;
        let entered = timefmt::combine(entry.date, &entry.time).ok()?;
        let left = timefmt::combine(exit.date, &exit.time).ok()?;
        Some((timefmt::minutes_between(entered, left), entry))
    }

    /// "<plate> (<brand> <model>) - <H>h <M>m" for the longest closed stay
    pub fn longest_stay(&self) -> String {
        if self.exits.is_empty() {
            return NO_EXITS.to_string();
        }
        let longest = self
            .exits
            .iter()
            .filter_map(|x| self.stay_minutes(x))
            .max_by_key(|(minutes, _)| *minutes);

        match longest {
            Some((minutes, entry)) => {
                let (brand, model) = self
                    .vehicle_ref(&entry.plate)
                    .map(|v| (v.brand.as_str(), v.model.as_str()))
                    .unwrap_or(("", ""));
                format!(
                    "{} ({} {}) - {}",
                    entry.plate,
                    brand,
                    model,
                    timefmt::format_duration(minutes)
                )
            }
            None => "No se pudo determinar".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Client, Contract, Employee, Vehicle};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn registry() -> Registry {
        let mut reg = Registry::new();
        reg.add_client(Client::new("12345678", "Ana", "Calle 1", "099123456", 2020).unwrap());
        reg.add_client(Client::new("22222222", "Bea", "Calle 2", "099000000", 2021).unwrap());
        reg.add_vehicle(Vehicle::new("ABC1234", "Toyota", "Corolla", "Bueno").unwrap());
        reg.add_vehicle(Vehicle::new("XYZ9876", "Fiat", "Uno", "Bueno").unwrap());
        reg.add_vehicle(Vehicle::new("QWE5555", "VW", "Gol", "Bueno").unwrap());
        reg.add_employee(Employee::new("87654321", "Luis", "", 1).unwrap());
        reg.add_employee(Employee::new("76543210", "Marta", "", 2).unwrap());
        reg
    }

    fn vehicle(reg: &Registry, plate: &str) -> Vehicle {
        reg.find_vehicle(plate).unwrap()
    }

    fn employee(reg: &Registry, number: u32) -> Employee {
        reg.find_employee(number).unwrap()
    }

    fn enter(reg: &mut Registry, plate: &str, emp: u32, day: NaiveDate, time: &str) -> Entry {
        let entry = Entry::new(&vehicle(reg, plate), &employee(reg, emp), day, time, "ok").unwrap();
        reg.add_entry(entry.clone());
        entry
    }

    fn service(reg: &mut Registry, kind: &str, plate: &str, emp: u32, day: NaiveDate, time: &str) {
        let s = Service::new(
            kind,
            &vehicle(reg, plate),
            &employee(reg, emp),
            day,
            time,
            Decimal::new(350, 0),
        )
        .unwrap();
        reg.add_service(s);
    }

    fn leave(reg: &mut Registry, entry: &Entry, emp: u32, day: NaiveDate, time: &str) {
        let exit = Exit::new(entry, &employee(reg, emp), day, time, "sin novedad").unwrap();
        reg.register_exit(exit).unwrap();
    }

    #[test]
    fn test_time_slot_from_index() {
        assert_eq!(TimeSlot::try_from(0u8).unwrap(), TimeSlot::Night);
        assert_eq!(TimeSlot::try_from(3u8).unwrap(), TimeSlot::Evening);
        assert!(TimeSlot::try_from(4u8).is_err());
        for slot in TimeSlot::ALL {
            assert_eq!(TimeSlot::try_from(slot.index()).unwrap(), slot);
        }
        assert_eq!(TimeSlot::of_hour(5), TimeSlot::Night);
        assert_eq!(TimeSlot::of_hour(6), TimeSlot::Morning);
        assert_eq!(TimeSlot::of_hour(17), TimeSlot::Afternoon);
        assert_eq!(TimeSlot::of_hour(18), TimeSlot::Evening);
    }

    #[test]
    fn test_count_movements_by_interval() {
        let mut reg = registry();
        let day = date(2024, 1, 10);
        enter(&mut reg, "ABC1234", 1, day, "07:15");
        service(&mut reg, "Lavado", "ABC1234", 1, day, "07:45");

        let morning = TimeSlot::try_from(1u8).unwrap();
        let night = TimeSlot::try_from(0u8).unwrap();
        assert_eq!(reg.count_movements(day, morning), 2);
        assert_eq!(reg.count_movements(day, night), 0);
        assert_eq!(reg.count_movements(date(2024, 1, 11), morning), 0);
    }

    #[test]
    fn test_interval_movements_sorted() {
        let mut reg = registry();
        let day = date(2024, 1, 10);
        service(&mut reg, "Lavado", "XYZ9876", 2, day, "13:30");
        let entry = enter(&mut reg, "ABC1234", 1, day, "12:05");
        leave(&mut reg, &entry, 2, day, "17:59");
        enter(&mut reg, "QWE5555", 1, day, "18:00");

        let rows = reg.interval_movements(day, TimeSlot::Afternoon);
        let kinds: Vec<String> = rows.iter().map(|r| r.kind.to_string()).collect();
        assert_eq!(kinds, vec!["Entrada", "Servicio: Lavado", "Salida"]);
        assert_eq!(rows[0].plate, "ABC1234");
        assert_eq!(rows[0].actor, "Luis (#1)");
        assert_eq!(rows[2].plate, "ABC1234");
        assert_eq!(rows[2].actor, "Marta (#2)");
        assert!(rows.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn test_vehicle_history() {
        let mut reg = registry();
        let day = date(2024, 1, 10);
        let entry = enter(&mut reg, "ABC1234", 1, day, "07:15");
        service(&mut reg, "Lavado", "ABC1234", 2, day, "08:00");
        leave(&mut reg, &entry, 2, day, "09:00");
        enter(&mut reg, "XYZ9876", 1, day, "07:00");

        let history = reg.vehicle_history("ABC1234");
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].kind, MovementKind::Entry);
        assert_eq!(history[0].actor, "Recibido por: Luis (#1)");
        assert_eq!(history[0].detail, "ok");
        assert_eq!(history[1].kind, MovementKind::Exit);
        assert_eq!(history[1].actor, "Atendido por: Marta (#2)");
        assert_eq!(history[1].detail, "sin novedad");
        assert_eq!(history[2].kind.to_string(), "Servicio: Lavado");
        assert_eq!(history[2].actor, "Realizado por: Marta (#2)");
        assert_eq!(history[2].detail, "Costo: $350.00");
        assert_eq!(
            history[0].timestamp,
            timefmt::combine(day, "07:15").unwrap()
        );

        assert!(reg.vehicle_history("NONE").is_empty());
    }

    #[test]
    fn test_most_used_service() {
        let mut reg = registry();
        assert_eq!(reg.most_used_service(), NO_SERVICES);

        let day = date(2024, 1, 10);
        service(&mut reg, "Lavado", "ABC1234", 1, day, "08:00");
        service(&mut reg, "Lavado", "XYZ9876", 1, day, "09:00");
        service(&mut reg, "Otro", "XYZ9876", 1, day, "10:00");

        assert_eq!(reg.most_used_service(), "Lavado (2 veces)");
        assert_eq!(reg.service_counts().get("Otro"), Some(&1));
    }

    #[test]
    fn test_employee_activity() {
        let mut reg = registry();
        assert_eq!(reg.most_active_employee(), NO_EMPLOYEE_MOVEMENTS);
        assert_eq!(reg.least_active_employee(), NO_EMPLOYEE_MOVEMENTS);

        let day = date(2024, 1, 10);
        let entry = enter(&mut reg, "ABC1234", 1, day, "07:00");
        leave(&mut reg, &entry, 1, day, "08:00");
        service(&mut reg, "Lavado", "ABC1234", 1, day, "07:30");
        enter(&mut reg, "XYZ9876", 2, day, "09:00");

        assert_eq!(reg.most_active_employee(), "Luis (#1) - 3 movimientos");
        assert_eq!(reg.least_active_employee(), "Marta (#2) - 1 movimientos");

        // Inactive employees are left out of the "least" report only
        reg.set_employee_active(2, false);
        assert_eq!(reg.least_active_employee(), "Luis (#1) - 3 movimientos");
        assert_eq!(reg.employee_movement_counts(false).get(&2), Some(&1));
        assert!(reg.employee_movement_counts(true).get(&2).is_none());
    }

    #[test]
    fn test_client_with_most_vehicles() {
        let mut reg = registry();
        assert_eq!(reg.client_with_most_vehicles(), NO_ACTIVE_CONTRACTS);

        let ana = reg.find_client("12345678").unwrap();
        let bea = reg.find_client("22222222").unwrap();
        let luis = employee(&reg, 1);
        for (client, plate) in [(&ana, "ABC1234"), (&ana, "XYZ9876"), (&bea, "QWE5555")] {
            let c = Contract::new(client, &vehicle(&reg, plate), &luis, Decimal::new(500, 0));
            reg.add_contract(c).unwrap();
        }
        assert_eq!(reg.client_with_most_vehicles(), "Ana (2 vehículos)");

        // Only active contracts count
        reg.set_contract_active(1, false).unwrap();
        reg.set_contract_active(2, false).unwrap();
        assert_eq!(reg.client_with_most_vehicles(), "Bea (1 vehículos)");
    }

    #[test]
    fn test_contract_stats() {
        let mut reg = registry();
        assert_eq!(
            reg.contract_summary(),
            "Contratos activos: 0 | Contratos inactivos: 0 | Valor promedio: $0.00"
        );

        let ana = reg.find_client("12345678").unwrap();
        let luis = employee(&reg, 1);
        for (plate, value) in [("ABC1234", 500), ("XYZ9876", 250), ("QWE5555", 1000)] {
            let c = Contract::new(&ana, &vehicle(&reg, plate), &luis, Decimal::new(value, 0));
            reg.add_contract(c).unwrap();
        }
        reg.set_contract_active(3, false).unwrap();

        let stats = reg.contract_stats();
        assert_eq!(stats.active, 2);
        assert_eq!(stats.inactive, 1);
        assert_eq!(stats.average_active_value, Decimal::new(375, 0));
        assert_eq!(
            reg.contract_summary(),
            "Contratos activos: 2 | Contratos inactivos: 1 | Valor promedio: $375.00"
        );
    }

    #[test]
    fn test_longest_stay() {
        let mut reg = registry();
        assert_eq!(reg.longest_stay(), NO_EXITS);

        let day = date(2024, 1, 10);
        let short = enter(&mut reg, "ABC1234", 1, day, "07:00");
        leave(&mut reg, &short, 1, day, "08:30");
        let long = enter(&mut reg, "XYZ9876", 1, day, "22:15");
        leave(&mut reg, &long, 2, date(2024, 1, 11), "01:20");
        enter(&mut reg, "QWE5555", 1, date(2024, 1, 1), "00:00");

        assert_eq!(reg.longest_stay(), "XYZ9876 (Fiat Uno) - 3h 5m");
    }

    #[test]
    fn test_movements_tagged() {
        let mut reg = registry();
        let day = date(2024, 1, 10);
        let entry = enter(&mut reg, "ABC1234", 1, day, "07:00");
        leave(&mut reg, &entry, 2, day, "08:00");
        service(&mut reg, "Otro", "XYZ9876", 2, day, "09:00");

        let kinds: Vec<MovementKind> = reg.movements().map(|m| m.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                MovementKind::Entry,
                MovementKind::Exit,
                MovementKind::Service("Otro".to_string())
            ]
        );
        let plates: Vec<Option<&str>> = reg.movements().map(|m| m.plate()).collect();
        assert_eq!(plates, vec![Some("ABC1234"), Some("ABC1234"), Some("XYZ9876")]);
    }
}
