// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ClearableField<T>` distinguishes "absent from the patch" from
//! "present and explicitly set to null" on wire-level partial updates.
//!
//! Per the coordination spec's design notes, `PATCH /workers/{id}` accepts a
//! union of partial updates where some fields (`error`, `waitingFor`,
//! `localUiUrl`) must support being cleared. A plain `Option<T>` cannot
//! distinguish "not present" from "present but null" once deserialized, so
//! every clearable field on a wire patch type uses this instead.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ClearableField<T> {
    /// The field was not present in the patch; leave the stored value alone.
    #[default]
    Absent,
    /// The field was present and set to `null`; clear the stored value.
    Clear,
    /// The field was present with a value; set the stored value.
    Set(T),
}

impl<T> ClearableField<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Apply this field to an `Option<T>` target, leaving it untouched if
    /// absent.
    pub fn apply(self, target: &mut Option<T>) {
        match self {
            Self::Absent => {}
            Self::Clear => *target = None,
            Self::Set(value) => *target = Some(value),
        }
    }

    pub fn into_option(self) -> Option<Option<T>> {
        match self {
            Self::Absent => None,
            Self::Clear => Some(None),
            Self::Set(value) => Some(Some(value)),
        }
    }
}

impl<T: Serialize> Serialize for ClearableField<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Absent => serializer.serialize_none(),
            Self::Clear => serializer.serialize_none(),
            Self::Set(value) => value.serialize(serializer),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ClearableField<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // serde's field-level `default` keeps this variant `Absent` when the
        // key is missing entirely; this impl only runs when the key is
        // present, so `null` here unambiguously means `Clear`.
        Option::<T>::deserialize(deserializer).map(|opt| match opt {
            Some(value) => Self::Set(value),
            None => Self::Clear,
        })
    }
}

#[cfg(test)]
#[path = "wire_field_tests.rs"]
mod tests;
