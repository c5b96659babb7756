//! JSON input files
//!
//! Three files describe a scenario, each a JSON array:
//!
//! ```text
//! events.json   [{ "Name", "ValueType", "RRULE", "TaxableValue",
//!                  "StaticValues": { account: int },
//!                  "AnnualBumpValues": { "BaseValues": { account: int }, "AnnualBump": float },
//!                  "MarginalDependentValues": { "DependencyName", "DependencyOffset",
//!                                               "AccountName", "MarginalRates": [{ "Cutoff", "Rate" }] } }]
//! accounts.json [{ "Name", "StartValue" }]
//! values.json   [{ "Name", "StartValue" }]
//! ```
//!
//! Account-amount objects keep the order their keys appear in the file.

use std::fmt;
use std::path::Path;

use serde::de::{self, DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use super::check_brackets;
use crate::error::ConfigError;
use crate::model::{
    Account, AccountAmount, AuxiliaryValue, Event, EventKind, MarginalBracket, MarginalDependency,
    Scenario,
};

// ============================================================================
// Wire records
// ============================================================================

/// One entry of `events.json`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EventRecord {
    pub name: String,
    pub value_type: String,
    #[serde(rename = "RRULE")]
    pub rrule: String,
    #[serde(default)]
    pub taxable_value: i64,
    #[serde(default)]
    pub static_values: Option<AccountAmounts>,
    #[serde(default)]
    pub annual_bump_values: Option<AnnualBumpRecord>,
    #[serde(default)]
    pub marginal_dependent_values: Option<MarginalRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AnnualBumpRecord {
    #[serde(default)]
    pub base_values: AccountAmounts,
    #[serde(default)]
    pub annual_bump: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MarginalRecord {
    #[serde(default)]
    pub dependency_name: Option<String>,
    #[serde(default)]
    pub dependency_offset: i32,
    #[serde(default)]
    pub account_name: Option<String>,
    #[serde(default)]
    pub marginal_rates: Vec<RateRecord>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RateRecord {
    pub cutoff: i64,
    pub rate: f32,
}

/// One entry of `accounts.json`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccountRecord {
    pub name: String,
    #[serde(default)]
    pub start_value: i64,
}

/// One entry of `values.json`
pub type ValueRecord = AccountRecord;

/// `{ account: amount }` object, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountAmounts(pub Vec<AccountAmount>);

impl<'de> Deserialize<'de> for AccountAmounts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AmountsVisitor;

        impl<'de> Visitor<'de> for AmountsVisitor {
            type Value = AccountAmounts;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping account names to integer amounts")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut amounts = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((account, amount)) = map.next_entry::<String, i64>()? {
                    if amounts
                        .iter()
                        .any(|existing: &AccountAmount| existing.account == account)
                    {
                        return Err(de::Error::custom(format!(
                            "account {account:?} appears more than once"
                        )));
                    }
                    amounts.push(AccountAmount { account, amount });
                }
                Ok(AccountAmounts(amounts))
            }
        }

        deserializer.deserialize_map(AmountsVisitor)
    }
}

// ============================================================================
// Conversion into the model
// ============================================================================

impl EventRecord {
    pub fn into_event(self) -> Result<Event, ConfigError> {
        let name = self.name;
        let missing = |kind: &'static str, field: &'static str| ConfigError::MissingPayload {
            event: name.clone(),
            kind,
            field,
        };

        let kind = match self.value_type.as_str() {
            "Static" => {
                let values = self
                    .static_values
                    .ok_or_else(|| missing("Static", "StaticValues"))?;
                EventKind::Static { values: values.0 }
            }
            "AnnualBump" => {
                let payload = self
                    .annual_bump_values
                    .ok_or_else(|| missing("AnnualBump", "AnnualBumpValues"))?;
                let bump = payload
                    .annual_bump
                    .ok_or_else(|| missing("AnnualBump", "AnnualBump"))?;
                EventKind::AnnualBump {
                    base_values: payload.base_values.0,
                    bump,
                }
            }
            "MarginalDependent" => {
                let payload = self
                    .marginal_dependent_values
                    .ok_or_else(|| missing("MarginalDependent", "MarginalDependentValues"))?;
                let dependency = payload
                    .dependency_name
                    .ok_or_else(|| missing("MarginalDependent", "DependencyName"))?;
                let account = payload
                    .account_name
                    .ok_or_else(|| missing("MarginalDependent", "AccountName"))?;
                let brackets: Vec<MarginalBracket> = payload
                    .marginal_rates
                    .iter()
                    .map(|r| MarginalBracket {
                        cutoff: r.cutoff,
                        rate: r.rate,
                    })
                    .collect();
                check_brackets(&name, &brackets)?;
                EventKind::MarginalDependent(MarginalDependency {
                    dependency,
                    offset: payload.dependency_offset,
                    account,
                    brackets,
                })
            }
            other => {
                return Err(ConfigError::UnknownValueType {
                    event: name,
                    kind: other.to_string(),
                });
            }
        };

        Ok(Event {
            name,
            rule: self.rrule,
            taxable_value: self.taxable_value,
            kind,
        })
    }
}

impl From<AccountRecord> for Account {
    fn from(record: AccountRecord) -> Self {
        Account::new(record.name, record.start_value)
    }
}

impl From<AccountRecord> for AuxiliaryValue {
    fn from(record: AccountRecord) -> Self {
        AuxiliaryValue::new(record.name, record.start_value)
    }
}

// ============================================================================
// Loading
// ============================================================================

pub fn parse_events(json: &str) -> Result<Vec<Event>, ConfigError> {
    let records: Vec<EventRecord> = serde_json::from_str(json).map_err(ConfigError::Parse)?;
    records.into_iter().map(EventRecord::into_event).collect()
}

pub fn parse_accounts(json: &str) -> Result<Vec<Account>, ConfigError> {
    let records: Vec<AccountRecord> = serde_json::from_str(json).map_err(ConfigError::Parse)?;
    Ok(records.into_iter().map(Account::from).collect())
}

pub fn parse_values(json: &str) -> Result<Vec<AuxiliaryValue>, ConfigError> {
    let records: Vec<ValueRecord> = serde_json::from_str(json).map_err(ConfigError::Parse)?;
    Ok(records.into_iter().map(AuxiliaryValue::from).collect())
}

/// Read and deserialize one JSON file, attaching the path to any error
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the three scenario files
pub fn load_scenario(
    events_path: &Path,
    accounts_path: &Path,
    values_path: &Path,
) -> Result<Scenario, ConfigError> {
    let events = read_json::<Vec<EventRecord>>(events_path)?
        .into_iter()
        .map(EventRecord::into_event)
        .collect::<Result<Vec<_>, _>>()?;
    let accounts = read_json::<Vec<AccountRecord>>(accounts_path)?
        .into_iter()
        .map(Account::from)
        .collect();
    let auxiliary_values = read_json::<Vec<ValueRecord>>(values_path)?
        .into_iter()
        .map(AuxiliaryValue::from)
        .collect();

    tracing::debug!(
        events = events.len(),
        events_path = %events_path.display(),
        "loaded scenario files"
    );

    Ok(Scenario {
        events,
        accounts,
        auxiliary_values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_event_keeps_account_order() {
        let events = parse_events(
            r#"[{
                "Name": "Paycheck",
                "ValueType": "Static",
                "StaticValues": { "Savings": 500, "Checking": 2500, "Brokerage": 250 },
                "TaxableValue": 3250,
                "RRULE": "FREQ=MONTHLY;BYMONTHDAY=1,15"
            }]"#,
        )
        .unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].taxable_value, 3_250);
        assert_eq!(events[0].rule, "FREQ=MONTHLY;BYMONTHDAY=1,15");
        let EventKind::Static { values } = &events[0].kind else {
            panic!("expected static event");
        };
        let order: Vec<&str> = values.iter().map(|v| v.account.as_str()).collect();
        assert_eq!(order, ["Savings", "Checking", "Brokerage"]);
    }

    #[test]
    fn test_annual_bump_and_marginal_payloads() {
        let events = parse_events(
            r#"[
                {
                    "Name": "Rent",
                    "ValueType": "AnnualBump",
                    "AnnualBumpValues": { "BaseValues": { "Checking": -1800 }, "AnnualBump": 1.03 },
                    "RRULE": "FREQ=MONTHLY"
                },
                {
                    "Name": "Federal Tax",
                    "ValueType": "MarginalDependent",
                    "MarginalDependentValues": {
                        "DependencyName": "TaxableIncome",
                        "DependencyOffset": -1,
                        "AccountName": "Checking",
                        "MarginalRates": [
                            { "Cutoff": 9525, "Rate": -0.1 },
                            { "Cutoff": 38700, "Rate": -0.12 }
                        ]
                    },
                    "RRULE": "FREQ=YEARLY;BYMONTH=4;BYMONTHDAY=15"
                }
            ]"#,
        )
        .unwrap();

        assert_eq!(
            events[0].kind,
            EventKind::AnnualBump {
                base_values: vec![AccountAmount::new("Checking", -1_800)],
                bump: 1.03,
            }
        );
        let EventKind::MarginalDependent(dependency) = &events[1].kind else {
            panic!("expected marginal event");
        };
        assert_eq!(dependency.dependency, "TaxableIncome");
        assert_eq!(dependency.offset, -1);
        assert_eq!(dependency.brackets.len(), 2);
        assert_eq!(dependency.brackets[1].cutoff, 38_700);
        assert_eq!(events[1].taxable_value, 0);
    }

    #[test]
    fn test_unknown_value_type_rejected() {
        let err = parse_events(
            r#"[{ "Name": "Lottery", "ValueType": "Random", "RRULE": "FREQ=YEARLY" }]"#,
        )
        .unwrap_err();
        assert!(
            matches!(err, ConfigError::UnknownValueType { ref kind, .. } if kind == "Random")
        );
    }

    #[test]
    fn test_missing_payload_rejected() {
        let err =
            parse_events(r#"[{ "Name": "Paycheck", "ValueType": "Static", "RRULE": "FREQ=DAILY" }]"#)
                .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingPayload {
                field: "StaticValues",
                ..
            }
        ));

        let err = parse_events(
            r#"[{
                "Name": "Rent",
                "ValueType": "AnnualBump",
                "AnnualBumpValues": { "BaseValues": { "Checking": -10 } },
                "RRULE": "FREQ=DAILY"
            }]"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingPayload {
                field: "AnnualBump",
                ..
            }
        ));
    }

    #[test]
    fn test_unsorted_brackets_rejected() {
        let err = parse_events(
            r#"[{
                "Name": "Tax",
                "ValueType": "MarginalDependent",
                "MarginalDependentValues": {
                    "DependencyName": "TaxableIncome",
                    "AccountName": "Checking",
                    "MarginalRates": [{ "Cutoff": 500, "Rate": 0.1 }, { "Cutoff": 100, "Rate": 0.2 }]
                },
                "RRULE": "FREQ=YEARLY"
            }]"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::BracketOrder { .. }));
    }

    #[test]
    fn test_duplicate_account_key_is_a_parse_error() {
        let err = parse_events(
            r#"[{
                "Name": "Paycheck",
                "ValueType": "Static",
                "StaticValues": { "Checking": 1, "Checking": 2 },
                "RRULE": "FREQ=DAILY"
            }]"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_accounts_and_values() {
        let accounts =
            parse_accounts(r#"[{ "Name": "Checking", "StartValue": 1000 }, { "Name": "Savings" }]"#)
                .unwrap();
        assert_eq!(
            accounts,
            vec![Account::new("Checking", 1_000), Account::new("Savings", 0)]
        );

        let values = parse_values(r#"[{ "Name": "TaxableIncome", "StartValue": 52000 }]"#).unwrap();
        assert_eq!(values, vec![AuxiliaryValue::new("TaxableIncome", 52_000)]);
    }

    #[test]
    fn test_syntax_error_is_parse_error() {
        assert!(matches!(
            parse_accounts("[{ \"Name\": "),
            Err(ConfigError::Parse(_))
        ));
    }
}
