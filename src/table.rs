use tabled::{builder::Builder, settings::Style, Table};

use crate::schedule::Schedule;

pub const HEADERS: [&str; 6] = [
    "Period",
    "Beginning Balance",
    "Payment",
    "Interest",
    "Principal Paid",
    "Ending Balance",
];

/// Renders the schedule as a table followed by the summary lines.
pub fn render(schedule: &Schedule) -> String {
    let mut builder = Builder::default();
    builder.push_record(HEADERS);

    for record in schedule {
        builder.push_record([
            record.period.to_string(),
            format!("{:.2}", record.beginning_balance),
            format!("{:.2}", record.payment),
            format!("{:.2}", record.interest),
            format!("{:.2}", record.principal_paid),
            format!("{:.2}", record.ending_balance),
        ]);
    }

    let mut table = Table::from(builder);
    table.with(Style::psql());

    format!("{}\n{}\n", table, schedule.summary())
}
