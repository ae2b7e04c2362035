// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    CreateOverrideCommand, DoctorDirectory, FixedClock, OverrideStore, PatternStore, StoreError,
};
use clinic_schedule_domain::{
    Doctor, DoctorId, DoctorPattern, OverrideId, OverrideReason, ScheduleOverride,
};
use std::collections::{HashMap, HashSet};
use time::macros::datetime;
use time::{Date, Duration, Month, OffsetDateTime};

/// Store double that enforces one override per date, like the database.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    pub doctors: Vec<Doctor>,
    pub overrides: HashMap<OverrideId, ScheduleOverride>,
    /// Pattern writes for these doctors fail.
    pub failing_pattern_writes: HashSet<DoctorId>,
    /// Inserted just before the next `insert_override`, standing in for a
    /// concurrent writer.
    pub racing_override: Option<ScheduleOverride>,
}

impl InMemoryStore {
    pub fn with_doctors(doctors: Vec<Doctor>) -> Self {
        Self {
            doctors,
            ..Self::default()
        }
    }

    fn doctor_mut(&mut self, doctor_id: &DoctorId) -> Result<&mut Doctor, StoreError> {
        self.doctors
            .iter_mut()
            .find(|d| &d.doctor_id == doctor_id)
            .ok_or_else(|| StoreError::Backend(format!("no doctor {doctor_id}")))
    }

    fn active_by_creation(&self) -> Vec<&Doctor> {
        let mut active: Vec<&Doctor> = self.doctors.iter().filter(|d| d.is_active).collect();
        active.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.doctor_id.cmp(&b.doctor_id))
        });
        active
    }
}

impl OverrideStore for InMemoryStore {
    fn get_override_by_date(&mut self, date: Date) -> Result<Option<ScheduleOverride>, StoreError> {
        Ok(self.overrides.values().find(|o| o.date() == date).cloned())
    }

    fn get_override_by_id(
        &mut self,
        override_id: &OverrideId,
    ) -> Result<Option<ScheduleOverride>, StoreError> {
        Ok(self.overrides.get(override_id).cloned())
    }

    fn list_overrides(&mut self) -> Result<Vec<ScheduleOverride>, StoreError> {
        let mut all: Vec<ScheduleOverride> = self.overrides.values().cloned().collect();
        all.sort_by_key(ScheduleOverride::date);
        Ok(all)
    }

    fn insert_override(
        &mut self,
        record: &ScheduleOverride,
    ) -> Result<ScheduleOverride, StoreError> {
        if let Some(racer) = self.racing_override.take() {
            self.overrides.insert(racer.override_id().clone(), racer);
        }
        if self.overrides.values().any(|o| o.date() == record.date()) {
            return Err(StoreError::DuplicateOverrideDate(record.date()));
        }
        self.overrides
            .insert(record.override_id().clone(), record.clone());
        Ok(record.clone())
    }

    fn update_override(
        &mut self,
        record: &ScheduleOverride,
    ) -> Result<ScheduleOverride, StoreError> {
        self.overrides
            .insert(record.override_id().clone(), record.clone());
        Ok(record.clone())
    }

    fn delete_override(&mut self, override_id: &OverrideId) -> Result<(), StoreError> {
        self.overrides.remove(override_id);
        Ok(())
    }
}

impl PatternStore for InMemoryStore {
    fn get_pattern(&mut self, doctor_id: &DoctorId) -> Result<Option<String>, StoreError> {
        Ok(self.doctor_mut(doctor_id)?.schedule_pattern.clone())
    }

    fn set_pattern(&mut self, doctor_id: &DoctorId, expression: &str) -> Result<(), StoreError> {
        if self.failing_pattern_writes.contains(doctor_id) {
            return Err(StoreError::Backend(String::from("disk full")));
        }
        self.doctor_mut(doctor_id)?.schedule_pattern = Some(expression.to_string());
        Ok(())
    }

    fn remove_pattern(&mut self, doctor_id: &DoctorId) -> Result<(), StoreError> {
        self.doctor_mut(doctor_id)?.schedule_pattern = None;
        Ok(())
    }

    fn list_doctors_missing_pattern(&mut self) -> Result<Vec<DoctorId>, StoreError> {
        Ok(self
            .active_by_creation()
            .into_iter()
            .filter(|d| d.schedule_pattern.is_none())
            .map(|d| d.doctor_id.clone())
            .collect())
    }

    fn list_patterns(&mut self) -> Result<Vec<DoctorPattern>, StoreError> {
        Ok(self
            .active_by_creation()
            .into_iter()
            .filter_map(|d| {
                d.schedule_pattern.as_ref().map(|expression| DoctorPattern {
                    doctor_id: d.doctor_id.clone(),
                    expression: expression.clone(),
                })
            })
            .collect())
    }
}

impl DoctorDirectory for InMemoryStore {
    fn get_doctor(&mut self, doctor_id: &DoctorId) -> Result<Option<Doctor>, StoreError> {
        Ok(self
            .doctors
            .iter()
            .find(|d| &d.doctor_id == doctor_id)
            .cloned())
    }

    fn list_doctors(&mut self) -> Result<Vec<Doctor>, StoreError> {
        Ok(self.doctors.clone())
    }

    fn insert_doctor(&mut self, doctor: &Doctor) -> Result<(), StoreError> {
        self.doctors.push(doctor.clone());
        Ok(())
    }

    fn set_doctor_active(&mut self, doctor_id: &DoctorId, active: bool) -> Result<(), StoreError> {
        self.doctor_mut(doctor_id)?.is_active = active;
        Ok(())
    }
}

pub fn doctor_id(byte: char) -> DoctorId {
    DoctorId::parse(&byte.to_string().repeat(32)).unwrap()
}

pub fn date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).unwrap()
}

/// 2025-03-01 08:00 UTC. The scenario date 2025-03-10 is in the future.
pub fn create_test_clock() -> FixedClock {
    FixedClock::new(datetime!(2025-03-01 08:00 UTC))
}

/// Creates an active doctor. `order` spaces out creation times so store
/// order is predictable.
pub fn create_test_doctor(byte: char, pattern: Option<&str>, order: i64) -> Doctor {
    let created_at: OffsetDateTime = datetime!(2025-01-01 00:00 UTC) + Duration::minutes(order);
    Doctor {
        doctor_id: doctor_id(byte),
        display_name: format!("Dr. {}", byte.to_ascii_uppercase()),
        is_active: true,
        schedule_pattern: pattern.map(String::from),
        created_at,
    }
}

/// Doctors A (Mondays), B and C (no pattern) plus an inactive D (daily).
pub fn create_test_store() -> InMemoryStore {
    let mut inactive: Doctor = create_test_doctor('d', Some("daily"), 3);
    inactive.is_active = false;

    InMemoryStore::with_doctors(vec![
        create_test_doctor('a', Some("weekly:MON"), 0),
        create_test_doctor('b', None, 1),
        create_test_doctor('c', None, 2),
        inactive,
    ])
}

pub fn create_test_command(on: Date, assigned: char, original: Option<char>) -> CreateOverrideCommand {
    CreateOverrideCommand {
        date: on,
        assigned_doctor_id: doctor_id(assigned),
        reason: OverrideReason::new("Annual leave cover").unwrap(),
        original_doctor_id: original.map(doctor_id),
    }
}
