use anyhow::Result;
use std::fs::File;
use std::path::Path;
use csv::Writer;

use crate::presentation::dto::{KpiOutput, ScheduleOutput};

pub struct CsvGenerator;

impl CsvGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate_schedule<P: AsRef<Path>>(&self, output: &ScheduleOutput, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut wtr = Writer::from_writer(file);

        wtr.write_record([
            "Slot ID",
            "Work Order",
            "Operation",
            "Machine",
            "Start",
            "End",
            "Setup Minutes",
            "Run Minutes",
            "Status",
            "Locked",
        ])?;

        for slot in &output.slots {
            wtr.write_record([
                &slot.id,
                &slot.work_order_id,
                &slot.operation_id,
                &slot.machine_id,
                &slot.start.to_rfc3339(),
                &slot.end.to_rfc3339(),
                &slot.setup_minutes.to_string(),
                &slot.run_minutes.to_string(),
                &format!("{:?}", slot.status),
                &slot.locked.to_string(),
            ])?;
        }

        wtr.flush()?;
        Ok(())
    }

    pub fn generate_kpis<P: AsRef<Path>>(&self, output: &KpiOutput, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut wtr = Writer::from_writer(file);

        wtr.write_record([
            "Machine",
            "Availability",
            "Performance",
            "Quality",
            "OEE",
            "MTBF (h)",
            "MTTR (h)",
        ])?;

        for kpi in &output.machine_kpis {
            wtr.write_record([
                &kpi.machine_id,
                &kpi.availability.to_string(),
                &kpi.performance.to_string(),
                &kpi.quality.to_string(),
                &kpi.oee.to_string(),
                &kpi.mtbf_hours.to_string(),
                &kpi.mttr_hours.to_string(),
            ])?;
        }

        wtr.flush()?;
        Ok(())
    }
}

impl Default for CsvGenerator {
    fn default() -> Self {
        Self::new()
    }
}
