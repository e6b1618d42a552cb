//! The payload record carried inside an envelope body.

use serde::{Deserialize, Serialize};

/// The flat domain record embedded in the legacy `Product` element.
///
/// Field names serialize in PascalCase to match the legacy contract
/// (`<Id>` / `<Name>` children in markup, `Id` / `Name` keys in JSON).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Product {
    pub id: String,
    pub name: String,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
