pub mod schedule_output;
pub mod kpi_output;
pub mod planning_input;

pub use schedule_output::{ScheduleOutput, ScheduleSummaryOutput};
pub use kpi_output::{KpiOutput, MachineKpiOutput, WorkOrderAdherenceOutput};
pub use planning_input::{AnalyticsInput, ScheduleInput};
