//! Tab separated report generation
//!
//! Every cell is wrapped in double quotes so multi-line cells survive a
//! spreadsheet import.

use std::fmt::Write;

use super::{ReportGenerator, UsageRows};
use crate::detector::CycleDetector;
use crate::error::CarouselError;
use crate::registry::Lineup;

pub struct TsvReportGenerator {
    limit: Option<usize>,
}

impl Default for TsvReportGenerator {
    fn default() -> Self {
        Self::new(None)
    }
}

impl TsvReportGenerator {
    pub fn new(limit: Option<usize>) -> Self {
        Self { limit }
    }

    fn shown(&self) -> usize {
        self.limit.unwrap_or(usize::MAX)
    }
}

fn write_row<I, S>(output: &mut String, cells: I) -> Result<(), CarouselError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let row: Vec<String> = cells
        .into_iter()
        .map(|cell| format!("\"{}\"", cell.as_ref().replace('"', "\"\"")))
        .collect();
    writeln!(output, "{}", row.join("\t"))?;
    Ok(())
}

impl ReportGenerator<CycleDetector> for TsvReportGenerator {
    fn generate_report(&self, detector: &CycleDetector) -> Result<String, CarouselError> {
        let mut output = String::new();
        write_row(&mut output, ["cycle", "length", "packages"])?;

        for (i, cycle) in detector.cycles().iter().take(self.shown()).enumerate() {
            write_row(
                &mut output,
                [
                    (i + 1).to_string(),
                    cycle.len().to_string(),
                    cycle.to_string(),
                ],
            )?;
        }

        Ok(output)
    }
}

impl ReportGenerator<UsageRows> for TsvReportGenerator {
    fn generate_report(&self, rows: &UsageRows) -> Result<String, CarouselError> {
        let mut output = String::new();
        write_row(&mut output, ["dep", "type", "overall_count", "dependants_count"])?;

        for (key, entry) in rows.iter().take(self.shown()) {
            let dependants = entry
                .dependants
                .iter()
                .map(|(name, count)| format!("{name}: {count}"))
                .collect::<Vec<_>>()
                .join("\n");

            write_row(
                &mut output,
                [
                    key.import_module.clone(),
                    key.import_name.clone(),
                    entry.overall_count.to_string(),
                    dependants,
                ],
            )?;
        }

        Ok(output)
    }
}

impl ReportGenerator<Lineup> for TsvReportGenerator {
    fn generate_report(&self, lineup: &Lineup) -> Result<String, CarouselError> {
        let mut output = String::new();
        write_row(&mut output, ["package", "dir", lineup.direction.label()])?;

        for entry in &lineup.packages {
            write_row(
                &mut output,
                [
                    entry.name.as_str(),
                    entry.dir.as_str(),
                    entry.related.join(", ").as_str(),
                ],
            )?;
        }

        Ok(output)
    }
}
