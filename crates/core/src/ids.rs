// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use clinic_schedule_domain::{DoctorId, OverrideId};

/// Generates a random 32-hex override identifier.
pub fn new_override_id() -> OverrideId {
    OverrideId::from_u128(rand::random::<u128>())
}

/// Generates a random 32-hex doctor identifier.
pub fn new_doctor_id() -> DoctorId {
    DoctorId::from_u128(rand::random::<u128>())
}
