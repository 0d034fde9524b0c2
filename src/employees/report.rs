use anyhow::Context;
use csv::{QuoteStyle, WriterBuilder};
use time::{macros::format_description, Date};

use super::repo_types::{Employee, StatusFilter};
use crate::config::ReportDateStyle;

pub const REPORT_HEADER: &str =
    "Employee ID,Name,Email,Department,Designation,Status,Joining Date";

/// Renders employees as CSV: a bare header line followed by fully quoted rows.
pub fn render_csv(employees: &[Employee], style: ReportDateStyle) -> anyhow::Result<String> {
    let mut buf = Vec::with_capacity(REPORT_HEADER.len() + 1 + employees.len() * 96);
    buf.extend_from_slice(REPORT_HEADER.as_bytes());
    buf.push(b'\n');

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .has_headers(false)
        .from_writer(buf);
    for e in employees {
        let joined = style
            .format(e.joining_date)
            .with_context(|| format!("format joining date for {}", e.emp_id))?;
        writer
            .write_record([
                e.emp_id.as_str(),
                e.name.as_str(),
                e.email.as_str(),
                e.department.as_str(),
                e.designation.as_str(),
                e.status.as_str(),
                joined.as_str(),
            ])
            .with_context(|| format!("write report row for {}", e.emp_id))?;
    }

    let buf = writer
        .into_inner()
        .map_err(|e| e.into_error())
        .context("flush report")?;
    String::from_utf8(buf).context("report is not utf-8")
}

/// `employees_report_{status}_{YYYY-MM-DD}.csv`
pub fn report_filename(
    filter: StatusFilter,
    generated_on: Date,
) -> Result<String, time::error::Format> {
    let day = generated_on.format(format_description!("[year]-[month]-[day]"))?;
    Ok(format!("employees_report_{}_{}.csv", filter.as_str(), day))
}
