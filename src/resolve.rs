//! Emissions resolution: disabled > manual override > calculated.

use serde::{Deserialize, Serialize};

use crate::aggregate::Aggregator;
use crate::overrides::OverrideStore;

/// How a reported emissions figure was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmissionsSource {
    Calculated,
    UserEntered,
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedEmissions {
    pub total: f64,
    pub source: EmissionsSource,
}

/// Resolve the emissions figure for `scope`.
///
/// Disabling estimation wins over everything; the override store is not
/// consulted at all in that case. With estimation on, a stored manual
/// override is used when `use_manual_override` is set, and the calculated
/// total for the scope otherwise. Whether `scope` names a region that
/// exists is the caller's concern: an override stored under an unknown
/// scope is still honored here.
pub fn resolve_emissions(
    scope: &str,
    estimate_emissions: bool,
    use_manual_override: bool,
    overrides: &OverrideStore,
    aggregator: &Aggregator,
) -> ResolvedEmissions {
    if !estimate_emissions {
        return ResolvedEmissions {
            total: 0.0,
            source: EmissionsSource::Disabled,
        };
    }

    if use_manual_override {
        if let Some(value) = overrides.get(scope) {
            return ResolvedEmissions {
                total: value,
                source: EmissionsSource::UserEntered,
            };
        }
    }

    ResolvedEmissions {
        total: aggregator.scope_emissions(scope),
        source: EmissionsSource::Calculated,
    }
}
