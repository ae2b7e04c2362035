// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

//! Schedule use cases for the clinic doctor roster.
//!
//! Every use case receives its store and clock explicitly. The binary wires
//! concrete implementations once at startup.

mod clock;
mod command;
mod doctors;
mod error;
mod ids;
mod initialization;
mod overrides;
mod patterns;
mod resolver;
mod store;

#[cfg(test)]
mod tests;

pub use clock::{Clock, FixedClock, SystemClock};
pub use command::{CreateOverrideCommand, RegisterDoctorCommand, UpdateOverrideCommand};
pub use doctors::{list_doctors, register_doctor, set_doctor_active};
pub use error::{ScheduleError, StoreError};
pub use initialization::{DEFAULT_SCHEDULE_PATTERN, InitializationSummary, ScheduleInitializer};
pub use overrides::ScheduleOverrides;
pub use patterns::{remove_pattern, set_pattern};
pub use resolver::AssignmentResolver;
pub use store::{DoctorDirectory, OverrideStore, PatternStore};
