use crate::config::ThresholdSet;
use crate::formatting::{formatter_for, FormattingConfig, OutputFormatter};
use crate::history::TrendPoint;
use crate::io::trend::{render_trend, trend_title, DEFAULT_CHART_HEIGHT};
use crate::scoring::{classify, Assessment, RiskBand};
use crate::store::table::write_records;
use crate::store::AssessmentRecord;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Terminal,
    Json,
    Csv,
}

/// Result of one new assessment, ready for display.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentReport {
    pub record: AssessmentRecord,
    pub assessment: Assessment,
    pub thresholds: ThresholdSet,
    pub saved: bool,
    /// History of the same task, including this record when saved
    pub trend: Vec<TrendPoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub record: AssessmentRecord,
    pub band: RiskBand,
}

/// Loaded history classified against the session thresholds.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryView {
    pub task: Option<String>,
    pub thresholds: ThresholdSet,
    /// Newest first
    pub entries: Vec<HistoryEntry>,
    pub trend: Vec<TrendPoint>,
    pub skipped_rows: usize,
}

impl HistoryView {
    /// `records` newest first; bands use the thresholds active now, not the
    /// ones in force when each record was made.
    pub fn new(
        task: Option<String>,
        thresholds: ThresholdSet,
        records: Vec<AssessmentRecord>,
        trend: Vec<TrendPoint>,
        skipped_rows: usize,
    ) -> Self {
        let entries = records
            .into_iter()
            .map(|record| HistoryEntry {
                band: classify(record.risk_score, &thresholds),
                record,
            })
            .collect();
        Self {
            task,
            thresholds,
            entries,
            trend,
            skipped_rows,
        }
    }
}

pub trait OutputWriter {
    fn write_assessment(&mut self, report: &AssessmentReport) -> anyhow::Result<()>;
    fn write_history(&mut self, view: &HistoryView) -> anyhow::Result<()>;
}

pub fn create_writer(
    format: OutputFormat,
    writer: Box<dyn Write>,
    formatting: FormattingConfig,
    verbosity: u8,
) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer, formatting, verbosity)),
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Csv => Box::new(CsvWriter::new(writer)),
    }
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_json<T: Serialize>(&mut self, value: &T) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, value)?;
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_assessment(&mut self, report: &AssessmentReport) -> anyhow::Result<()> {
        self.write_json(report)
    }

    fn write_history(&mut self, view: &HistoryView) -> anyhow::Result<()> {
        self.write_json(view)
    }
}

/// Store column layout, so output can be re-imported.
pub struct CsvWriter<W: Write> {
    writer: W,
}

impl<W: Write> CsvWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for CsvWriter<W> {
    fn write_assessment(&mut self, report: &AssessmentReport) -> anyhow::Result<()> {
        write_records(&mut self.writer, std::slice::from_ref(&report.record))?;
        Ok(())
    }

    fn write_history(&mut self, view: &HistoryView) -> anyhow::Result<()> {
        let records: Vec<AssessmentRecord> =
            view.entries.iter().map(|e| e.record.clone()).collect();
        write_records(&mut self.writer, &records)?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
    formatter: Box<dyn OutputFormatter>,
    verbosity: u8,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, formatting: FormattingConfig, verbosity: u8) -> Self {
        Self {
            writer,
            formatter: formatter_for(formatting),
            verbosity,
        }
    }

    fn write_breakdown(&mut self, report: &AssessmentReport) -> anyhow::Result<()> {
        let b = &report.assessment.breakdown;
        let r = &report.record;
        writeln!(self.writer, "{}", self.formatter.dim("Score breakdown:"))?;
        writeln!(self.writer, "  load {} kg -> {:.1}", r.load_kg, b.load_norm)?;
        writeln!(
            self.writer,
            "  frequency {}/h -> {:.1}",
            r.frequency_per_hour, b.freq_norm
        )?;
        writeln!(self.writer, "  posture weight x{:.2}", b.posture_weight)?;
        writeln!(self.writer, "  repetition bonus +{}", b.bonus)?;
        writeln!(
            self.writer,
            "  raw {:.2} -> score {}",
            b.raw, b.score
        )?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_assessment(&mut self, report: &AssessmentReport) -> anyhow::Result<()> {
        let f = &self.formatter;
        if report.saved {
            writeln!(self.writer, "{}", f.success("Record saved"))?;
        }
        writeln!(
            self.writer,
            "{} {}/100",
            f.bold("Risk Score:"),
            report.assessment.score
        )?;
        writeln!(
            self.writer,
            "{} {}",
            f.bold("Current Level:"),
            f.band(report.assessment.band)
        )?;
        if !report.assessment.breakdown.posture_recognized {
            writeln!(
                self.writer,
                "{}",
                f.warning(&format!(
                    "Posture '{}' is not a known category; scored with the default weight.",
                    report.record.posture
                ))
            )?;
        }
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", f.header("Recommended Actions:"))?;
        for tip in &report.assessment.advice {
            writeln!(self.writer, "  - {}", tip)?;
        }

        if self.verbosity > 0 {
            writeln!(self.writer)?;
            self.write_breakdown(report)?;
        }

        writeln!(self.writer)?;
        let chart = render_trend(
            &trend_title(Some(&report.record.task)),
            &report.trend,
            DEFAULT_CHART_HEIGHT,
        );
        write!(self.writer, "{}", chart)?;
        Ok(())
    }

    fn write_history(&mut self, view: &HistoryView) -> anyhow::Result<()> {
        if view.entries.is_empty() {
            writeln!(
                self.writer,
                "No historical records yet. Please add a new assessment."
            )?;
            return Ok(());
        }

        let chart = render_trend(
            &trend_title(view.task.as_deref()),
            &view.trend,
            DEFAULT_CHART_HEIGHT,
        );
        write!(self.writer, "{}", chart)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", self.formatter.header("Recent Records"))?;

        let header = ["Date", "Task", "Load (kg)", "Freq/h", "Posture", "Score", "Level"];
        let rows: Vec<[String; 7]> = view
            .entries
            .iter()
            .map(|e| {
                let [date, task, load, freq, posture, score] = e.record.to_row();
                [date, task, load, freq, posture, score, e.band.label().to_string()]
            })
            .collect();

        let mut widths = header.map(str::len);
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let header_line = format_row(header.iter().copied(), &widths);
        writeln!(self.writer, "{}", self.formatter.bold(&header_line))?;
        for row in &rows {
            writeln!(self.writer, "{}", format_row(row.iter().map(String::as_str), &widths))?;
        }

        if view.skipped_rows > 0 {
            writeln!(self.writer)?;
            writeln!(
                self.writer,
                "{}",
                self.formatter.warning(&format!(
                    "{} row(s) in the data file could not be read and are not shown.",
                    view.skipped_rows
                ))
            )?;
        }
        Ok(())
    }
}

fn format_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}
