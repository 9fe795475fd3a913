//! ParkCore - the business core of a parking lot management system.
//!
//! This library provides:
//! - Data models (Client, Vehicle, Employee, Contract, Entry, Exit, Service)
//! - The Registry holding every record, with its referential rules
//! - Occupancy and activity reports
//! - JSON snapshot persistence
//! - Configuration management
//!
//! A process shares one [`ParkingLot`], which serializes all access to the
//! [`Registry`] behind a single lock.
//!
//! # Feature Flags
//!
//! - `desktop`: Locate the default config directory with `dirs` (enabled by default).

pub mod config;
pub mod error;
pub mod lot;
pub mod models;
pub mod registry;
pub mod reports;
pub mod snapshot;
pub mod timefmt;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::{ParkingError, ParkingResult};
pub use lot::ParkingLot;
pub use models::{Client, Contract, Employee, Entry, Exit, Service, Vehicle, SERVICE_TYPES};
pub use registry::Registry;
pub use reports::{ContractStats, HistoryRow, IntervalRow, Movement, MovementKind, TimeSlot};
