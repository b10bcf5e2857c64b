//! JSON format report generation

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value, json};

use super::{ReportGenerator, UsageRows};
use crate::detector::CycleDetector;
use crate::error::CarouselError;
use crate::registry::Lineup;

pub struct JsonReportGenerator {
    limit: Option<usize>,
}

impl Default for JsonReportGenerator {
    fn default() -> Self {
        Self::new(None)
    }
}

impl JsonReportGenerator {
    pub fn new(limit: Option<usize>) -> Self {
        Self { limit }
    }

    fn shown(&self) -> usize {
        self.limit.unwrap_or(usize::MAX)
    }
}

impl ReportGenerator<CycleDetector> for JsonReportGenerator {
    fn generate_report(&self, detector: &CycleDetector) -> Result<String, CarouselError> {
        let cycles: Vec<_> = detector.cycles().iter().take(self.shown()).collect();

        let report = json!({
            "has_cycles": detector.has_cycles(),
            "cycle_count": detector.cycle_count(),
            "cycles": cycles,
        });

        Ok(serde_json::to_string_pretty(&report)?)
    }
}

#[derive(Serialize)]
struct UsageDetail<'a> {
    #[serde(rename = "type")]
    import_name: &'a str,
    count: UsageCount<'a>,
}

// Serialized directly so dependants keep their first-seen order
#[derive(Serialize)]
struct UsageCount<'a> {
    overall: usize,
    dependants: &'a IndexMap<String, usize>,
}

/// Usage rows as `[module, { type, count: { overall, dependants } }]` pairs
impl ReportGenerator<UsageRows> for JsonReportGenerator {
    fn generate_report(&self, rows: &UsageRows) -> Result<String, CarouselError> {
        let entries: Vec<(&str, UsageDetail<'_>)> = rows
            .iter()
            .take(self.shown())
            .map(|(key, entry)| {
                (
                    key.import_module.as_str(),
                    UsageDetail {
                        import_name: &key.import_name,
                        count: UsageCount {
                            overall: entry.overall_count,
                            dependants: &entry.dependants,
                        },
                    },
                )
            })
            .collect();

        Ok(serde_json::to_string_pretty(&entries)?)
    }
}

impl ReportGenerator<Lineup> for JsonReportGenerator {
    fn generate_report(&self, lineup: &Lineup) -> Result<String, CarouselError> {
        let label = lineup.direction.label();
        let packages: Vec<Value> = lineup
            .packages
            .iter()
            .map(|entry| {
                let mut object = Map::new();
                object.insert("name".to_string(), json!(entry.name));
                object.insert("dir".to_string(), json!(entry.dir));
                object.insert(label.to_string(), json!(entry.related));
                Value::Object(object)
            })
            .collect();

        let report = json!({
            "package_count": lineup.packages.len(),
            "packages": packages,
        });

        Ok(serde_json::to_string_pretty(&report)?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::graph::{DependencyGraph, Edge};
    use crate::registry::{LineupDirection, LineupEntry};
    use crate::usage::{UsageEntry, UsageKey};

    #[test]
    fn test_cycle_report_shape() {
        let graph = DependencyGraph::from_edges([
            Edge::new("a", "b"),
            Edge::new("b", "c"),
            Edge::new("c", "a"),
            Edge::new("d", "d"),
        ]);
        let mut detector = CycleDetector::new();
        detector.detect_cycles(&graph, None);

        let report = JsonReportGenerator::default()
            .generate_report(&detector)
            .unwrap();
        let value: Value = serde_json::from_str(&report).unwrap();

        assert_eq!(
            value,
            json!({
                "has_cycles": true,
                "cycle_count": 2,
                "cycles": [["a", "b", "c"], ["d"]],
            })
        );
    }

    #[test]
    fn test_usage_report_shape() {
        let rows = vec![(
            UsageKey {
                import_module: "@org/dep".to_string(),
                import_name: "foo".to_string(),
            },
            UsageEntry {
                overall_count: 3,
                dependants: IndexMap::from([("P1".to_string(), 2), ("P2".to_string(), 1)]),
            },
        )];

        let report = JsonReportGenerator::default()
            .generate_report(rows.as_slice())
            .unwrap();
        let value: Value = serde_json::from_str(&report).unwrap();

        assert_eq!(
            value,
            json!([[
                "@org/dep",
                { "type": "foo", "count": { "overall": 3, "dependants": { "P1": 2, "P2": 1 } } }
            ]])
        );
    }

    #[test]
    fn test_usage_dependants_keep_row_order() {
        let rows = vec![(
            UsageKey {
                import_module: "@org/dep".to_string(),
                import_name: "foo".to_string(),
            },
            UsageEntry {
                overall_count: 3,
                dependants: IndexMap::from([("P2".to_string(), 1), ("P1".to_string(), 2)]),
            },
        )];

        let report = JsonReportGenerator::default()
            .generate_report(rows.as_slice())
            .unwrap();

        let p2 = report.find("\"P2\"").unwrap();
        let p1 = report.find("\"P1\"").unwrap();
        assert!(p2 < p1);
    }

    #[test]
    fn test_lineup_uses_direction_as_key() {
        let lineup = Lineup {
            direction: LineupDirection::Dependants,
            packages: vec![LineupEntry {
                name: "core".to_string(),
                dir: "packages/core".to_string(),
                related: vec!["app".to_string()],
            }],
        };

        let report = JsonReportGenerator::default()
            .generate_report(&lineup)
            .unwrap();
        let value: Value = serde_json::from_str(&report).unwrap();

        assert_eq!(value["packages"][0]["dependants"], json!(["app"]));
        assert_eq!(value["package_count"], json!(1));
    }
}
