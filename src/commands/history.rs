use super::Session;
use crate::history::{filter_by_task, sort_by_date, task_names, trend_points, SortOrder};
use crate::io::output::HistoryView;
use crate::io::trend::{render_trend, trend_title};
use crate::io::{create_writer, OutputFormat};
use anyhow::Result;

/// Load, filter and classify history for display.
pub fn build_history_view(session: &Session, task: Option<&str>) -> Result<HistoryView> {
    let report = session.store.load_with_report()?;
    let records = filter_by_task(report.records, task);
    let trend = trend_points(&records);
    let newest_first = sort_by_date(records, SortOrder::Descending);
    Ok(HistoryView::new(
        task.map(str::to_string),
        session.thresholds,
        newest_first,
        trend,
        report.rejected.len(),
    ))
}

pub fn handle_history(session: &Session, task: Option<String>, format: OutputFormat) -> Result<()> {
    let view = build_history_view(session, task.as_deref())?;
    let mut writer = create_writer(
        format,
        Box::new(std::io::stdout()),
        session.formatting,
        session.verbosity,
    );
    writer.write_history(&view)
}

pub fn handle_trend(session: &Session, task: Option<String>, height: usize) -> Result<()> {
    let records = filter_by_task(session.store.load_all()?, task.as_deref());
    let chart = render_trend(&trend_title(task.as_deref()), &trend_points(&records), height);
    print!("{}", chart);
    Ok(())
}

pub fn handle_tasks(session: &Session) -> Result<()> {
    for name in task_names(&session.store.load_all()?) {
        println!("{}", name);
    }
    Ok(())
}
