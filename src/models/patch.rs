//! Sparse field updates.

use serde::Serialize;

use crate::error::AppError;
use crate::graph::Properties;
use crate::models::schema::{is_present, to_properties};

/// A sparse set of field → new value pairs.
///
/// Only fields present in the patch are written; everything else on the
/// node is left untouched. Null and empty-string values are treated as
/// "not supplied" and never enter the patch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch {
    fields: Properties,
}

impl Patch {
    /// Builds a patch from an update struct, never touching `key`.
    pub fn from_update<T: Serialize>(update: &T, key: &str) -> Result<Self, AppError> {
        let fields = to_properties(update)?
            .into_iter()
            .filter(|(name, value)| name != key && is_present(Some(value)))
            .collect();
        Ok(Self { fields })
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_properties(self) -> Properties {
        self.fields
    }
}
