use anyhow::Result;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::presentation::dto::{KpiOutput, ScheduleOutput};

pub struct HtmlGenerator;

impl HtmlGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate<P: AsRef<Path>>(&self, schedule: &ScheduleOutput, kpis: &KpiOutput, path: P) -> Result<()> {
        let html = self.generate_string(schedule, kpis)?;
        let mut file = File::create(path)?;
        file.write_all(html.as_bytes())?;
        Ok(())
    }

    pub fn generate_string(&self, schedule: &ScheduleOutput, kpis: &KpiOutput) -> Result<String> {
        let mut html = String::new();

        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("    <meta charset=\"UTF-8\">\n");
        html.push_str("    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
        html.push_str("    <title>Production Schedule Report</title>\n");
        html.push_str("    <link rel=\"stylesheet\" href=\"https://cdn.datatables.net/1.13.7/css/jquery.dataTables.min.css\">\n");
        html.push_str("    <script src=\"https://code.jquery.com/jquery-3.7.0.min.js\"></script>\n");
        html.push_str("    <script src=\"https://cdn.datatables.net/1.13.7/js/jquery.dataTables.min.js\"></script>\n");
        html.push_str("    <style>\n");
        html.push_str(Self::get_css());
        html.push_str("    </style>\n");
        html.push_str("</head>\n<body>\n");

        html.push_str("    <div class=\"container\">\n");
        html.push_str("        <h1>Production Schedule Report</h1>\n");

        html.push_str("        <div class=\"stats-grid\">\n");
        html.push_str(&format!(
            "            <div class=\"stat-card\">\n                <div class=\"stat-value\">{}</div>\n                <div class=\"stat-label\">Scheduled Slots</div>\n            </div>\n",
            schedule.summary.total_slots
        ));
        html.push_str(&format!(
            "            <div class=\"stat-card\">\n                <div class=\"stat-value\">{}</div>\n                <div class=\"stat-label\">Conflicts</div>\n            </div>\n",
            schedule.summary.total_conflicts
        ));
        html.push_str(&format!(
            "            <div class=\"stat-card\">\n                <div class=\"stat-value\">{}</div>\n                <div class=\"stat-label\">Overloaded Buckets</div>\n            </div>\n",
            schedule.summary.overloaded_buckets
        ));
        html.push_str(&format!(
            "            <div class=\"stat-card\">\n                <div class=\"stat-value\">{:.2}</div>\n                <div class=\"stat-label\">Average OEE</div>\n            </div>\n",
            kpis.average_oee
        ));
        html.push_str("        </div>\n");

        html.push_str("        <div class=\"slots\">\n");
        html.push_str("            <h2>Schedule Slots</h2>\n");
        html.push_str("            <table id=\"slotsTable\" class=\"display\">\n");
        html.push_str("                <thead>\n                    <tr>\n");
        html.push_str("                        <th>Operation</th><th>Machine</th><th>Start</th><th>End</th><th>Status</th>\n");
        html.push_str("                    </tr>\n                </thead>\n                <tbody>\n");
        for slot in &schedule.slots {
            html.push_str(&format!(
                "                    <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{:?}</td></tr>\n",
                slot.operation_id, slot.machine_id, slot.start.to_rfc3339(), slot.end.to_rfc3339(), slot.status
            ));
        }
        html.push_str("                </tbody>\n            </table>\n        </div>\n");

        html.push_str("        <div class=\"conflicts\">\n");
        html.push_str("            <h2>Conflicts</h2>\n");
        if schedule.conflicts.is_empty() {
            html.push_str("            <p>No conflicts raised.</p>\n");
        } else {
            html.push_str("            <ul>\n");
            for conflict in &schedule.conflicts {
                html.push_str(&format!(
                    "                <li><strong>{:?}/{:?}</strong>: {}</li>\n",
                    conflict.severity, conflict.conflict_type, conflict.description
                ));
            }
            html.push_str("            </ul>\n");
        }
        html.push_str("        </div>\n");

        html.push_str("        <div class=\"kpis\">\n");
        html.push_str("            <h2>Machine KPIs</h2>\n");
        html.push_str("            <table id=\"kpiTable\" class=\"display\">\n");
        html.push_str("                <thead>\n                    <tr>\n");
        html.push_str("                        <th>Machine</th><th>Availability</th><th>Performance</th><th>Quality</th><th>OEE</th>\n");
        html.push_str("                    </tr>\n                </thead>\n                <tbody>\n");
        for kpi in &kpis.machine_kpis {
            html.push_str(&format!(
                "                    <tr><td>{}</td><td>{:.2}</td><td>{:.2}</td><td>{:.2}</td><td>{:.2}</td></tr>\n",
                kpi.machine_id, kpi.availability, kpi.performance, kpi.quality, kpi.oee
            ));
        }
        html.push_str("                </tbody>\n            </table>\n        </div>\n");

        html.push_str("    </div>\n");
        html.push_str("    <script>\n");
        html.push_str("        $(document).ready(function() {\n");
        html.push_str("            $('#slotsTable').DataTable({ pageLength: 50 });\n");
        html.push_str("            $('#kpiTable').DataTable({ pageLength: 50 });\n");
        html.push_str("        });\n");
        html.push_str("    </script>\n");
        html.push_str("</body>\n</html>");

        Ok(html)
    }

    fn get_css() -> &'static str {
        r#"
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            margin: 0;
            padding: 20px;
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            min-height: 100vh;
        }
        .container {
            max-width: 1400px;
            margin: 0 auto;
            background: white;
            padding: 40px;
            border-radius: 12px;
            box-shadow: 0 10px 40px rgba(0,0,0,0.2);
        }
        h1 {
            color: #2c3e50;
            font-size: 2.5em;
            margin-bottom: 30px;
            text-align: center;
        }
        h2 {
            color: #34495e;
            margin-top: 40px;
            margin-bottom: 20px;
            font-size: 1.8em;
            border-bottom: 2px solid #3498db;
            padding-bottom: 10px;
        }
        .stats-grid {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
            gap: 20px;
            margin: 30px 0;
        }
        .stat-card {
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            color: white;
            padding: 30px;
            border-radius: 10px;
            text-align: center;
            box-shadow: 0 4px 6px rgba(0,0,0,0.1);
        }
        .stat-value {
            font-size: 3em;
            font-weight: bold;
            margin-bottom: 10px;
        }
        .stat-label {
            font-size: 1em;
            opacity: 0.9;
        }
        table.display {
            width: 100% !important;
        }
        "#
    }
}

impl Default for HtmlGenerator {
    fn default() -> Self {
        Self::new()
    }
}
