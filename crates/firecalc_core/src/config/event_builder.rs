//! Event Builder DSL
//!
//! Fluent construction of events for tests and embedding.
//!
//! ```ignore
//! use firecalc_core::config::EventBuilder;
//!
//! // Twice-monthly paycheck split across two accounts
//! let paycheck = EventBuilder::fixed("Paycheck")
//!     .rule("FREQ=MONTHLY;BYMONTHDAY=1,15")
//!     .amount("Checking", 2_500)
//!     .amount("Savings", 500)
//!     .taxable(3_000);
//!
//! // Rent growing 3% a year
//! let rent = EventBuilder::annual_bump("Rent", 1.03)
//!     .rule("FREQ=MONTHLY")
//!     .amount("Checking", -1_800);
//! ```

use super::check_brackets;
use crate::error::ConfigError;
use crate::model::{AccountAmount, Event, EventKind, MarginalBracket, MarginalDependency};

/// Builder for one event
#[derive(Debug, Clone)]
pub struct EventBuilder {
    pub(crate) name: String,
    rule: String,
    taxable_value: i64,
    spec: KindSpec,
    /// First setting called that the event's kind has no use for
    misused: Option<&'static str>,
}

#[derive(Debug, Clone)]
enum KindSpec {
    Static(Vec<AccountAmount>),
    AnnualBump {
        base_values: Vec<AccountAmount>,
        bump: f64,
    },
    Marginal {
        dependency: String,
        offset: i32,
        account: Option<String>,
        brackets: Vec<MarginalBracket>,
    },
}

impl KindSpec {
    fn label(&self) -> &'static str {
        match self {
            KindSpec::Static(_) => "Static",
            KindSpec::AnnualBump { .. } => "AnnualBump",
            KindSpec::Marginal { .. } => "MarginalDependent",
        }
    }
}

impl EventBuilder {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Same amounts at every occurrence
    pub fn fixed(name: impl Into<String>) -> Self {
        Self::with_spec(name, KindSpec::Static(Vec::new()))
    }

    /// Base amounts multiplied by `bump` raised to the year index
    pub fn annual_bump(name: impl Into<String>, bump: f64) -> Self {
        Self::with_spec(
            name,
            KindSpec::AnnualBump {
                base_values: Vec::new(),
                bump,
            },
        )
    }

    /// Progressive brackets over the aggregate named `dependency`
    pub fn marginal(name: impl Into<String>, dependency: impl Into<String>) -> Self {
        Self::with_spec(
            name,
            KindSpec::Marginal {
                dependency: dependency.into(),
                offset: 0,
                account: None,
                brackets: Vec::new(),
            },
        )
    }

    fn with_spec(name: impl Into<String>, spec: KindSpec) -> Self {
        Self {
            name: name.into(),
            rule: String::new(),
            taxable_value: 0,
            spec,
            misused: None,
        }
    }

    fn misuse(mut self, setting: &'static str) -> Self {
        self.misused.get_or_insert(setting);
        self
    }

    // =========================================================================
    // Common settings
    // =========================================================================

    #[must_use]
    pub fn rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = rule.into();
        self
    }

    #[must_use]
    pub fn taxable(mut self, value: i64) -> Self {
        self.taxable_value = value;
        self
    }

    /// Add an account amount to a fixed or annual-bump event
    #[must_use]
    pub fn amount(mut self, account: impl Into<String>, amount: i64) -> Self {
        if let KindSpec::Static(values)
        | KindSpec::AnnualBump {
            base_values: values,
            ..
        } = &mut self.spec
        {
            values.push(AccountAmount::new(account, amount));
            return self;
        }
        self.misuse("amount")
    }

    // =========================================================================
    // Variant settings
    // =========================================================================

    #[must_use]
    pub fn bump(mut self, factor: f64) -> Self {
        if let KindSpec::AnnualBump { bump, .. } = &mut self.spec {
            *bump = factor;
            return self;
        }
        self.misuse("bump")
    }

    #[must_use]
    pub fn dependency(mut self, name: impl Into<String>) -> Self {
        if let KindSpec::Marginal { dependency, .. } = &mut self.spec {
            *dependency = name.into();
            return self;
        }
        self.misuse("dependency")
    }

    /// Year offset for the dependency lookup; negative looks back
    #[must_use]
    pub fn offset(mut self, years: i32) -> Self {
        if let KindSpec::Marginal { offset, .. } = &mut self.spec {
            *offset = years;
            return self;
        }
        self.misuse("offset")
    }

    #[must_use]
    pub fn to_account(mut self, name: impl Into<String>) -> Self {
        if let KindSpec::Marginal { account, .. } = &mut self.spec {
            *account = Some(name.into());
            return self;
        }
        self.misuse("to_account")
    }

    #[must_use]
    pub fn bracket(mut self, cutoff: i64, rate: f32) -> Self {
        if let KindSpec::Marginal { brackets, .. } = &mut self.spec {
            brackets.push(MarginalBracket { cutoff, rate });
            return self;
        }
        self.misuse("bracket")
    }

    // =========================================================================
    // Build
    // =========================================================================

    pub fn build(self) -> Result<Event, ConfigError> {
        if let Some(setting) = self.misused {
            return Err(ConfigError::InapplicableSetting {
                event: self.name,
                kind: self.spec.label(),
                setting,
            });
        }

        let kind = match self.spec {
            KindSpec::Static(values) => EventKind::Static { values },
            KindSpec::AnnualBump { base_values, bump } => EventKind::AnnualBump { base_values, bump },
            KindSpec::Marginal {
                dependency,
                offset,
                account,
                brackets,
            } => {
                let account = account.ok_or_else(|| ConfigError::MissingPayload {
                    event: self.name.clone(),
                    kind: "MarginalDependent",
                    field: "AccountName",
                })?;
                check_brackets(&self.name, &brackets)?;
                EventKind::MarginalDependent(MarginalDependency {
                    dependency,
                    offset,
                    account,
                    brackets,
                })
            }
        };

        Ok(Event {
            name: self.name,
            rule: self.rule,
            taxable_value: self.taxable_value,
            kind,
        })
    }
}
