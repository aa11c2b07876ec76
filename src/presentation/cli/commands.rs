//! CLI Commands module
//!
//! Command implementations for the scheduler/analytics CLI: load a JSON
//! input file, run the corresponding pure use case, and emit the requested
//! report formats.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::application::use_cases::{AnalyticsRequest, AnalyticsResult, ComputeAnalytics, RunScheduling, SchedulingRequest};
use crate::domain::entities::{ConflictSeverity, OperatorSession};
use crate::infrastructure::output::{CsvGenerator, HtmlGenerator, JsonGenerator, MarkdownGenerator};
use crate::presentation::dto::{AnalyticsInput, KpiOutput, ScheduleInput, ScheduleOutput};

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("failed to read input file {:?}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse input file {:?} as JSON", path))
}

fn empty_kpi_output() -> KpiOutput {
    KpiOutput::from_result(AnalyticsResult {
        machine_kpis: Vec::new(),
        adherence: Vec::new(),
        first_pass_yield: 1.0,
        scrap_rate: 0.0,
        defect_pareto: Vec::new(),
        downtime_pareto: Vec::new(),
    })
}

fn print_schedule_summary(output: &ScheduleOutput) {
    println!("\n{}", "=".repeat(72));
    println!("SCHEDULING SUMMARY");
    println!("{}", "=".repeat(72));
    println!("  Slots placed:         {}", output.summary.total_slots);
    println!("  Conflicts:            {} ({} critical)", output.summary.total_conflicts, output.summary.critical_conflicts);
    println!("  Overloaded buckets:   {}", output.summary.overloaded_buckets);

    let high_severity = output.conflicts.iter().filter(|c| matches!(c.severity, ConflictSeverity::Critical | ConflictSeverity::High)).count();
    if high_severity > 0 {
        println!("  ⚠ {high_severity} conflicts at high or critical severity — review before committing this plan.");
    }
    println!("{}", "=".repeat(72));
}

fn print_kpi_summary(output: &KpiOutput) {
    println!("\n{}", "=".repeat(72));
    println!("ANALYTICS SUMMARY");
    println!("{}", "=".repeat(72));
    println!("  Average OEE:          {:.2}", output.average_oee);
    println!("  First-pass yield:     {:.2}", output.first_pass_yield);
    println!("  Scrap rate:           {:.2}", output.scrap_rate);
    println!("  Machines reported:    {}", output.machine_kpis.len());
    if let Some(worst) = output.machine_kpis.iter().min_by(|a, b| a.oee.partial_cmp(&b.oee).unwrap_or(std::cmp::Ordering::Equal)) {
        println!("  Lowest OEE machine:   {} ({:.2})", worst.machine_id, worst.oee);
    }
    println!("{}", "=".repeat(72));
}

pub struct ScheduleCommand;

impl ScheduleCommand {
    pub fn execute(input_path: &Path, output_dir: &Path, generate_json: bool, generate_csv: bool, generate_html: bool, generate_markdown: bool) -> Result<()> {
        info!("Loading scheduling input from {:?}", input_path);
        let input: ScheduleInput = load_json(input_path)?;

        info!("Running scheduler over {} operations, {} machines", input.operations.len(), input.machines.len());
        let request = SchedulingRequest {
            plan_id: input.plan_id.clone(),
            work_orders: &input.work_orders,
            operations: &input.operations,
            machines: &input.machines,
            capabilities: &input.capabilities,
            setup_matrix: &input.setup_matrix,
            calendar: &input.calendar,
            policy: &input.policy,
            now: input.now,
        };
        let result = RunScheduling::new().execute(&request).context("scheduling run failed validation")?;
        let output = ScheduleOutput::from_result(result);

        fs::create_dir_all(output_dir).context("failed to create output directory")?;
        write_schedule_reports(&output, output_dir, generate_json, generate_csv, generate_html, generate_markdown, None)?;

        print_schedule_summary(&output);
        Ok(())
    }
}

pub struct AnalyticsCommand;

impl AnalyticsCommand {
    pub fn execute(input_path: &Path, output_dir: &Path, generate_json: bool, generate_csv: bool, generate_html: bool, generate_markdown: bool) -> Result<()> {
        info!("Loading analytics input from {:?}", input_path);
        let input: AnalyticsInput = load_json(input_path)?;

        info!("Computing KPIs for period {} – {}", input.period_start, input.period_end);
        let operator_sessions: Vec<OperatorSession> = input.operator_sessions.clone();
        let request = AnalyticsRequest {
            period_start: input.period_start,
            period_end: input.period_end,
            machines: &input.machines,
            work_orders: &input.work_orders,
            production_logs: &input.production_logs,
            downtime_events: &input.downtime_events,
            quality_records: &input.quality_records,
            schedule_slots: &input.schedule_slots,
            operator_sessions: &operator_sessions,
        };
        let result = ComputeAnalytics::new().execute(&request).context("analytics computation failed validation")?;
        let output = KpiOutput::from_result(result);

        fs::create_dir_all(output_dir).context("failed to create output directory")?;
        write_kpi_reports(&output, output_dir, generate_json, generate_csv)?;

        print_kpi_summary(&output);
        Ok(())
    }
}

pub struct ReportCommand;

impl ReportCommand {
    pub fn execute(
        schedule_input_path: &Path,
        analytics_input_path: Option<&PathBuf>,
        output_dir: &Path,
        generate_json: bool,
        generate_csv: bool,
        generate_html: bool,
        generate_markdown: bool,
    ) -> Result<()> {
        info!("Loading scheduling input from {:?}", schedule_input_path);
        let schedule_input: ScheduleInput = load_json(schedule_input_path)?;
        let request = SchedulingRequest {
            plan_id: schedule_input.plan_id.clone(),
            work_orders: &schedule_input.work_orders,
            operations: &schedule_input.operations,
            machines: &schedule_input.machines,
            capabilities: &schedule_input.capabilities,
            setup_matrix: &schedule_input.setup_matrix,
            calendar: &schedule_input.calendar,
            policy: &schedule_input.policy,
            now: schedule_input.now,
        };
        let schedule_result = RunScheduling::new().execute(&request).context("scheduling run failed validation")?;
        let schedule_output = ScheduleOutput::from_result(schedule_result);

        let kpi_output = match analytics_input_path {
            Some(path) => {
                info!("Loading analytics input from {:?}", path);
                let analytics_input: AnalyticsInput = load_json(path)?;
                let operator_sessions: Vec<OperatorSession> = analytics_input.operator_sessions.clone();
                let analytics_request = AnalyticsRequest {
                    period_start: analytics_input.period_start,
                    period_end: analytics_input.period_end,
                    machines: &analytics_input.machines,
                    work_orders: &analytics_input.work_orders,
                    production_logs: &analytics_input.production_logs,
                    downtime_events: &analytics_input.downtime_events,
                    quality_records: &analytics_input.quality_records,
                    schedule_slots: &analytics_input.schedule_slots,
                    operator_sessions: &operator_sessions,
                };
                let analytics_result = ComputeAnalytics::new().execute(&analytics_request).context("analytics computation failed validation")?;
                KpiOutput::from_result(analytics_result)
            }
            None => empty_kpi_output(),
        };

        fs::create_dir_all(output_dir).context("failed to create output directory")?;
        write_schedule_reports(&schedule_output, output_dir, generate_json, generate_csv, generate_html, generate_markdown, Some(&kpi_output))?;
        write_kpi_reports(&kpi_output, output_dir, generate_json, generate_csv)?;

        print_schedule_summary(&schedule_output);
        print_kpi_summary(&kpi_output);
        Ok(())
    }
}

/// Writes the requested schedule report formats. `kpis` is only consulted
/// by the combined HTML/Markdown generators, which render both a schedule
/// and a KPI section side by side.
fn write_schedule_reports(schedule: &ScheduleOutput, output_dir: &Path, generate_json: bool, generate_csv: bool, generate_html: bool, generate_markdown: bool, kpis: Option<&KpiOutput>) -> Result<()> {
    if generate_json {
        let path = output_dir.join("schedule.json");
        info!("Generating JSON schedule report: {:?}", path);
        JsonGenerator::new().generate(schedule, &path).context("failed to generate JSON schedule report")?;
    }
    if generate_csv {
        let path = output_dir.join("schedule.csv");
        info!("Generating CSV schedule report: {:?}", path);
        CsvGenerator::new().generate_schedule(schedule, &path).context("failed to generate CSV schedule report")?;
    }
    if generate_html || generate_markdown {
        let owned_kpis;
        let kpis = match kpis {
            Some(kpis) => kpis,
            None => {
                owned_kpis = empty_kpi_output();
                &owned_kpis
            }
        };
        if generate_html {
            let path = output_dir.join("report.html");
            info!("Generating HTML report: {:?}", path);
            HtmlGenerator::new().generate(schedule, kpis, &path).context("failed to generate HTML report")?;
        }
        if generate_markdown {
            let path = output_dir.join("report.md");
            info!("Generating Markdown report: {:?}", path);
            MarkdownGenerator::new().generate(schedule, kpis, &path).context("failed to generate Markdown report")?;
        }
    }
    Ok(())
}

fn write_kpi_reports(kpis: &KpiOutput, output_dir: &Path, generate_json: bool, generate_csv: bool) -> Result<()> {
    if generate_json {
        let path = output_dir.join("kpis.json");
        info!("Generating JSON KPI report: {:?}", path);
        JsonGenerator::new().generate(kpis, &path).context("failed to generate JSON KPI report")?;
    }
    if generate_csv {
        let path = output_dir.join("kpis.csv");
        info!("Generating CSV KPI report: {:?}", path);
        CsvGenerator::new().generate_kpis(kpis, &path).context("failed to generate CSV KPI report")?;
    }
    Ok(())
}
