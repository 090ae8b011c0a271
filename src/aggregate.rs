//! Pure aggregation over the dataset tables.
//!
//! Everything here is a deterministic read; the engine holds no mutable
//! state and is safe to call unboundedly often from concurrent requests.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use serde::Serialize;

use crate::dataset::Dataset;

/// Scope key for the national aggregate.
pub const NATIONAL_SCOPE: &str = "national";

/// Per-source generation line in a region breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceGeneration {
    pub source: String,
    #[serde(rename = "generation_MWh")]
    pub generation_mwh: f64,
}

/// Generation figures for one region. Built once at startup since the
/// underlying tables never change.
#[derive(Debug, Clone)]
pub struct RegionAggregate {
    pub region: String,
    pub total_generation: f64,
    pub by_source: Vec<SourceGeneration>,
}

#[derive(Clone)]
pub struct Aggregator {
    dataset: Arc<Dataset>,
}

impl Aggregator {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }

    /// Sum of the generation column across every row, including rows with
    /// no region.
    pub fn national_generation(&self) -> f64 {
        self.dataset
            .generation
            .iter()
            .map(|r| r.generation_mwh)
            .sum()
    }

    /// Sum of the emissions column across every row; 0.0 when the table is
    /// empty or absent.
    pub fn national_emissions(&self) -> f64 {
        self.dataset.emissions.iter().map(|r| r.emissions_tco2).sum()
    }

    /// Total generation for `region` plus its per-source breakdown. Rows
    /// without a source label count towards the total but not the
    /// breakdown.
    pub fn region_generation(&self, region: &str) -> (f64, Vec<SourceGeneration>) {
        let mut total = 0.0;
        let mut by_source: BTreeMap<String, f64> = BTreeMap::new();
        for row in self
            .dataset
            .generation
            .iter()
            .filter(|r| r.region.as_deref() == Some(region))
        {
            total += row.generation_mwh;
            if let Some(source) = row.source.as_deref().filter(|s| !s.is_empty()) {
                *by_source.entry(source.to_string()).or_insert(0.0) += row.generation_mwh;
            }
        }
        let breakdown = by_source
            .into_iter()
            .map(|(source, generation_mwh)| SourceGeneration {
                source,
                generation_mwh,
            })
            .collect();
        (total, breakdown)
    }

    /// Sum of emissions rows matching `region`; 0.0 when none match.
    pub fn region_emissions(&self, region: &str) -> f64 {
        self.dataset
            .emissions
            .iter()
            .filter(|r| r.region.as_deref() == Some(region))
            .map(|r| r.emissions_tco2)
            .sum()
    }

    /// Distinct non-empty region identifiers in the generation table.
    /// Region names are exact-match: no case normalization happens here or
    /// anywhere downstream.
    pub fn known_regions(&self) -> BTreeSet<String> {
        self.dataset
            .generation
            .iter()
            .filter_map(|r| r.region.as_deref())
            .filter(|r| !r.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Emissions total for a scope: the national sum for the national
    /// scope, the region sum otherwise (0.0 for a region absent from the
    /// table).
    pub fn scope_emissions(&self, scope: &str) -> f64 {
        if scope == NATIONAL_SCOPE {
            self.national_emissions()
        } else {
            self.region_emissions(scope)
        }
    }

    /// Precompute generation aggregates for every known region.
    pub fn region_map(&self) -> HashMap<String, RegionAggregate> {
        self.known_regions()
            .into_iter()
            .map(|region| {
                let (total_generation, by_source) = self.region_generation(&region);
                (
                    region.clone(),
                    RegionAggregate {
                        region,
                        total_generation,
                        by_source,
                    },
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{EmissionsRow, GenerationRow};

    fn gen_row(region: Option<&str>, source: Option<&str>, mwh: f64) -> GenerationRow {
        GenerationRow {
            region: region.map(str::to_string),
            generation_mwh: mwh,
            source: source.map(str::to_string),
        }
    }

    fn em_row(region: Option<&str>, tco2: f64) -> EmissionsRow {
        EmissionsRow {
            region: region.map(str::to_string),
            emissions_tco2: tco2,
        }
    }

    fn fixture() -> Aggregator {
        Aggregator::new(Arc::new(Dataset::new(
            vec![
                gen_row(Some("Nairobi"), Some("geothermal"), 80.0),
                gen_row(Some("Nairobi"), Some("solar"), 40.0),
                gen_row(Some("Nairobi"), Some("solar"), 10.0),
                gen_row(Some("Mombasa"), Some("thermal"), 55.5),
                gen_row(Some("Mombasa"), None, 4.5),
                gen_row(None, Some("solar"), 12.5),
            ],
            vec![
                em_row(Some("Nairobi"), 70.0),
                em_row(Some("Nairobi"), 50.0),
                em_row(Some("Mombasa"), 45.25),
                em_row(None, 5.0),
            ],
        )))
    }

    #[test]
    fn test_national_totals_include_rows_without_region() {
        let agg = fixture();
        assert_eq!(agg.national_generation(), 202.5);
        assert_eq!(agg.national_emissions(), 170.25);
    }

    #[test]
    fn test_national_emissions_zero_when_table_empty() {
        let agg = Aggregator::new(Arc::new(Dataset::default()));
        assert_eq!(agg.national_emissions(), 0.0);
        assert_eq!(agg.national_generation(), 0.0);
    }

    #[test]
    fn test_region_generation_and_breakdown() {
        let agg = fixture();
        let (total, by_source) = agg.region_generation("Nairobi");
        assert_eq!(total, 130.0);
        assert_eq!(
            by_source,
            vec![
                SourceGeneration {
                    source: "geothermal".into(),
                    generation_mwh: 80.0
                },
                SourceGeneration {
                    source: "solar".into(),
                    generation_mwh: 50.0
                },
            ]
        );
    }

    #[test]
    fn test_unsourced_rows_count_towards_total_only() {
        let agg = fixture();
        let (total, by_source) = agg.region_generation("Mombasa");
        assert_eq!(total, 60.0);
        assert_eq!(by_source.len(), 1);
        assert_eq!(by_source[0].source, "thermal");
    }

    #[test]
    fn test_region_emissions() {
        let agg = fixture();
        assert_eq!(agg.region_emissions("Nairobi"), 120.0);
        assert_eq!(agg.region_emissions("Atlantis"), 0.0);
    }

    #[test]
    fn test_known_regions_excludes_missing() {
        let agg = fixture();
        let regions = agg.known_regions();
        assert_eq!(
            regions.into_iter().collect::<Vec<_>>(),
            vec!["Mombasa".to_string(), "Nairobi".to_string()]
        );
    }

    #[test]
    fn test_scope_emissions_dispatch() {
        let agg = fixture();
        assert_eq!(agg.scope_emissions(NATIONAL_SCOPE), 170.25);
        assert_eq!(agg.scope_emissions("Nairobi"), 120.0);
        assert_eq!(agg.scope_emissions("nairobi"), 0.0); // exact match only
    }

    #[test]
    fn test_region_map_matches_point_queries() {
        let agg = fixture();
        let map = agg.region_map();
        assert_eq!(map.len(), 2);
        let nairobi = &map["Nairobi"];
        assert_eq!(nairobi.total_generation, 130.0);
        assert_eq!(nairobi.by_source.len(), 2);
    }
}
