//! Human-readable console report generation

use std::fmt::Write;

use console::style;

use super::{ReportGenerator, UsageRows};
use crate::detector::CycleDetector;
use crate::error::CarouselError;
use crate::registry::{Lineup, LineupDirection};
use crate::utils::string::pluralize;

pub struct HumanReportGenerator {
    limit: Option<usize>,
}

impl HumanReportGenerator {
    /// `limit` caps the number of cycles or usage rows shown
    pub fn new(limit: Option<usize>) -> Self {
        Self { limit }
    }

    fn write_truncation_note(
        &self,
        output: &mut String,
        total: usize,
        noun: &str,
        flag: &str,
    ) -> Result<(), CarouselError> {
        if let Some(limit) = self.limit.filter(|&limit| limit < total) {
            writeln!(
                output,
                "\n{} Showing {} of {} {}. Use {} to see more.",
                style("ℹ️").blue(),
                style(limit).yellow(),
                style(total).yellow(),
                pluralize(noun, total),
                flag
            )?;
        }
        Ok(())
    }
}

impl ReportGenerator<CycleDetector> for HumanReportGenerator {
    fn generate_report(&self, detector: &CycleDetector) -> Result<String, CarouselError> {
        let mut output = String::new();

        if !detector.has_cycles() {
            write!(
                output,
                "\n{} No dependency cycles detected! Your packages have a clean dependency \
                 structure.\n",
                style("✅").green().bold()
            )?;
            return Ok(output);
        }

        write!(
            output,
            "\n{} Found {} dependency {}:\n\n",
            style("❌").red().bold(),
            style(detector.cycle_count()).red().bold(),
            pluralize("cycle", detector.cycle_count())
        )?;

        let shown = self.limit.unwrap_or(usize::MAX);
        for (i, cycle) in detector.cycles().iter().take(shown).enumerate() {
            writeln!(
                output,
                "{} Cycle #{} ({} {})",
                style("🔄").yellow(),
                i + 1,
                cycle.len(),
                pluralize("package", cycle.len())
            )?;

            for edge in cycle.edges() {
                writeln!(
                    output,
                    "    {} {} → {}",
                    style("→").dim(),
                    style(&edge.source).bold(),
                    style(&edge.target).bold()
                )?;
            }
            writeln!(output)?;
        }

        self.write_truncation_note(&mut output, detector.cycle_count(), "cycle", "--max-cycles")?;

        writeln!(
            output,
            "\n{} To break these cycles, remove at least one dependency from each cycle.",
            style("💡").yellow()
        )?;
        writeln!(
            output,
            "{} Consider extracting shared code into a separate package that both can depend on.",
            style("💡").yellow()
        )?;

        Ok(output)
    }
}

impl ReportGenerator<UsageRows> for HumanReportGenerator {
    fn generate_report(&self, rows: &UsageRows) -> Result<String, CarouselError> {
        let mut output = String::new();

        if rows.is_empty() {
            writeln!(
                output,
                "\n{} No internal package imports found.",
                style("ℹ️").blue()
            )?;
            return Ok(output);
        }

        writeln!(
            output,
            "\n{} {} imported {}:\n",
            style("📦").blue(),
            style(rows.len()).yellow().bold(),
            pluralize("symbol", rows.len())
        )?;

        let shown = self.limit.unwrap_or(usize::MAX);
        for (key, entry) in rows.iter().take(shown) {
            let name = if key.import_name.is_empty() {
                style("(side effect)".to_string()).dim()
            } else {
                style(key.import_name.clone()).bold()
            };

            writeln!(
                output,
                "{} {} {} {} {}",
                style(format!("{:>5}", entry.overall_count)).yellow().bold(),
                style(&key.import_module).cyan(),
                name,
                style("in").dim(),
                pluralize_count(entry.dependants_count(), "package"),
            )?;

            for (dependant, count) in &entry.dependants {
                writeln!(
                    output,
                    "      {} {} ({})",
                    style("•").dim(),
                    dependant,
                    count
                )?;
            }
        }

        self.write_truncation_note(&mut output, rows.len(), "symbol", "--top")?;

        Ok(output)
    }
}

impl ReportGenerator<Lineup> for HumanReportGenerator {
    fn generate_report(&self, lineup: &Lineup) -> Result<String, CarouselError> {
        let mut output = String::new();

        writeln!(
            output,
            "\n{} {} {}\n",
            style("🎠").bold(),
            style(lineup.packages.len()).yellow().bold(),
            pluralize("package", lineup.packages.len())
        )?;

        let arrow = match lineup.direction {
            LineupDirection::Dependencies => "→",
            LineupDirection::Dependants => "←",
        };

        for entry in &lineup.packages {
            writeln!(
                output,
                "{} {} {}",
                style("📦").blue(),
                style(&entry.name).bold(),
                style(format!("({})", entry.dir)).dim()
            )?;

            if entry.related.is_empty() {
                writeln!(
                    output,
                    "    {} no internal {}",
                    style(arrow).dim(),
                    lineup.direction.label()
                )?;
            }
            for related in &entry.related {
                writeln!(output, "    {} {}", style(arrow).dim(), related)?;
            }
        }

        Ok(output)
    }
}

fn pluralize_count(count: usize, word: &str) -> String {
    format!("{count} {}", pluralize(word, count))
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::*;
    use crate::graph::{DependencyGraph, Edge};
    use crate::registry::LineupEntry;
    use crate::usage::{UsageEntry, UsageKey};

    fn detector(edges: &[(&str, &str)]) -> CycleDetector {
        let graph = DependencyGraph::from_edges(edges.iter().map(|&(s, t)| Edge::new(s, t)));
        let mut detector = CycleDetector::new();
        detector.detect_cycles(&graph, None);
        detector
    }

    #[test]
    fn test_no_cycles_message() {
        let report = HumanReportGenerator::new(None)
            .generate_report(&detector(&[("a", "b")]))
            .unwrap();
        assert!(report.contains("No dependency cycles detected"));
    }

    #[test]
    fn test_cycles_are_listed_with_limit() {
        let detector = detector(&[("a", "b"), ("b", "a"), ("c", "d"), ("d", "c")]);
        let report = HumanReportGenerator::new(Some(1))
            .generate_report(&detector)
            .unwrap();

        assert!(report.contains("Cycle #1"));
        assert!(!report.contains("Cycle #2"));
        assert!(report.contains("--max-cycles"));
    }

    #[test]
    fn test_usage_report() {
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

        let report = HumanReportGenerator::new(None)
            .generate_report(rows.as_slice())
            .unwrap();
        assert!(report.contains("@org/dep"));
        assert!(report.contains("P1 (2)"));
        assert!(report.contains("2 packages"));
    }

    #[test]
    fn test_lineup_report() {
        let lineup = Lineup {
            direction: LineupDirection::Dependencies,
            packages: vec![
                LineupEntry {
                    name: "app".to_string(),
                    dir: "packages/app".to_string(),
                    related: vec!["core".to_string()],
                },
                LineupEntry {
                    name: "core".to_string(),
                    dir: "packages/core".to_string(),
                    related: vec![],
                },
            ],
        };

        let report = HumanReportGenerator::new(None)
            .generate_report(&lineup)
            .unwrap();
        assert!(report.contains("packages/app"));
        assert!(report.contains("no internal dependencies"));
    }
}
