use anyhow::Result;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::presentation::dto::{KpiOutput, ScheduleOutput};

pub struct MarkdownGenerator;

impl MarkdownGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate<P: AsRef<Path>>(&self, schedule: &ScheduleOutput, kpis: &KpiOutput, path: P) -> Result<()> {
        let markdown = self.generate_string(schedule, kpis)?;
        let mut file = File::create(path)?;
        file.write_all(markdown.as_bytes())?;
        Ok(())
    }

    pub fn generate_string(&self, schedule: &ScheduleOutput, kpis: &KpiOutput) -> Result<String> {
        let mut md = String::new();

        md.push_str("# Production Schedule Report\n\n");

        md.push_str("## Summary\n\n");
        md.push_str(&format!("- **Scheduled Slots**: {}\n", schedule.summary.total_slots));
        md.push_str(&format!("- **Conflicts**: {} ({} critical)\n", schedule.summary.total_conflicts, schedule.summary.critical_conflicts));
        md.push_str(&format!("- **Overloaded Buckets**: {}\n", schedule.summary.overloaded_buckets));
        md.push_str(&format!("- **Average OEE**: {:.2}\n\n", kpis.average_oee));

        md.push_str("## Schedule Slots\n\n");
        md.push_str("| Operation | Machine | Start | End | Status |\n");
        md.push_str("|-----------|---------|-------|-----|--------|\n");
        for slot in &schedule.slots {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {:?} |\n",
                slot.operation_id, slot.machine_id, slot.start.to_rfc3339(), slot.end.to_rfc3339(), slot.status
            ));
        }

        md.push_str("\n## Conflicts\n\n");
        if schedule.conflicts.is_empty() {
            md.push_str("No conflicts raised.\n\n");
        } else {
            for conflict in &schedule.conflicts {
                md.push_str(&format!("- **{:?}/{:?}**: {}\n", conflict.severity, conflict.conflict_type, conflict.description));
                if let Some(resolution) = &conflict.suggested_resolution {
                    md.push_str(&format!("  - Suggested resolution: {}\n", resolution));
                }
            }
            md.push('\n');
        }

        md.push_str("## Machine KPIs\n\n");
        md.push_str("| Machine | Availability | Performance | Quality | OEE | MTBF (h) | MTTR (h) |\n");
        md.push_str("|---------|--------------|-------------|---------|-----|----------|----------|\n");
        for kpi in &kpis.machine_kpis {
            md.push_str(&format!(
                "| {} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} |\n",
                kpi.machine_id, kpi.availability, kpi.performance, kpi.quality, kpi.oee, kpi.mtbf_hours, kpi.mttr_hours
            ));
        }

        md.push_str("\n## Quality\n\n");
        md.push_str(&format!("- **First Pass Yield**: {:.2}\n", kpis.first_pass_yield));
        md.push_str(&format!("- **Scrap Rate**: {:.2}\n\n", kpis.scrap_rate));

        if !kpis.defect_pareto.is_empty() {
            md.push_str("### Defect Pareto\n\n");
            md.push_str("| Defect | Count | % | Cumulative % |\n");
            md.push_str("|--------|-------|---|---------------|\n");
            for entry in &kpis.defect_pareto {
                md.push_str(&format!(
                    "| {} | {:.0} | {:.1} | {:.1} |\n",
                    entry.label, entry.value, entry.percentage, entry.cumulative_percentage
                ));
            }
            md.push('\n');
        }

        Ok(md)
    }
}

impl Default for MarkdownGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::dto::ScheduleSummaryOutput;

    #[test]
    fn test_generate_string() {
        let generator = MarkdownGenerator::new();
        let schedule = ScheduleOutput {
            summary: ScheduleSummaryOutput {
                total_slots: 0,
                total_conflicts: 0,
                critical_conflicts: 0,
                overloaded_buckets: 0,
            },
            slots: vec![],
            buckets: vec![],
            conflicts: vec![],
        };
        let kpis = KpiOutput {
            average_oee: 0.0,
            machine_kpis: vec![],
            adherence: vec![],
            first_pass_yield: 1.0,
            scrap_rate: 0.0,
            defect_pareto: vec![],
            downtime_pareto: vec![],
        };

        let md = generator.generate_string(&schedule, &kpis).unwrap();
        assert!(md.contains("# Production Schedule Report"));
        assert!(md.contains("Machine KPIs"));
    }
}
