use serde::{Deserialize, Serialize};

/// A named balance. The position of an account in the scenario's account
/// list is its overdraft priority: shortfalls move to the next account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    pub start_value: i64,
}

impl Account {
    pub fn new(name: impl Into<String>, start_value: i64) -> Self {
        Self {
            name: name.into(),
            start_value,
        }
    }
}

/// A named yearly quantity seeded into the aggregate tracker. Only the first
/// year of the window receives `start_value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuxiliaryValue {
    pub name: String,
    pub start_value: i64,
}

impl AuxiliaryValue {
    pub fn new(name: impl Into<String>, start_value: i64) -> Self {
        Self {
            name: name.into(),
            start_value,
        }
    }
}
