//! Chart Plotter Module
//! Renders the dashboard charts to PNG with the plotters bitmap backend.

use std::fmt;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use thiserror::Error;

use crate::analysis::{AvailabilitySummary, Period, ValueCount, Weekday};

const MORNING_COLOR: RGBColor = RGBColor(0x1f, 0x77, 0xb4);
const AFTERNOON_COLOR: RGBColor = RGBColor(0xff, 0x7f, 0x0e);
const EVENING_COLOR: RGBColor = RGBColor(0x2c, 0xa0, 0x2c);
const SATISFIED_COLOR: RGBColor = RGBColor(0x2e, 0x8b, 0x57);
const UNSATISFIED_COLOR: RGBColor = RGBColor(0xd3, 0x2f, 0x2f);
const NEUTRAL_COLOR: RGBColor = RGBColor(0x90, 0x90, 0x90);
const CHALLENGE_COLOR: RGBColor = RGBColor(0x63, 0x6e, 0xfa);

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("failed to render chart {}: {}", .path.display(), .message)]
    Render { path: PathBuf, message: String },
}

impl ChartError {
    fn render(path: &Path, err: impl fmt::Display) -> Self {
        ChartError::Render {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}

fn period_color(period: Period) -> RGBColor {
    match period {
        Period::Morning => MORNING_COLOR,
        Period::Afternoon => AFTERNOON_COLOR,
        Period::Evening => EVENING_COLOR,
        Period::Unavailable => NEUTRAL_COLOR,
    }
}

fn satisfaction_color(value: &str) -> RGBColor {
    match value {
        "Yes" => SATISFIED_COLOR,
        "No" => UNSATISFIED_COLOR,
        _ => NEUTRAL_COLOR,
    }
}

/// Grouped bar chart of available students per day and period.
/// The unavailable bucket is left out, as on the dashboard.
pub fn render_availability_chart(
    summary: &AvailabilitySummary,
    path: &Path,
) -> Result<(), ChartError> {
    let root = BitMapBackend::new(path, (900, 480)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| ChartError::render(path, e))?;

    let days = Weekday::ALL.len() as f64;
    let max_students = summary
        .rows()
        .iter()
        .filter(|slot| slot.period != Period::Unavailable)
        .map(|slot| slot.students)
        .max()
        .unwrap_or(0)
        .max(1);

    let mut chart = ChartBuilder::on(&root)
        .caption("Student availability by day and period", ("sans-serif", 26))
        .margin(12)
        .x_label_area_size(36)
        .y_label_area_size(44)
        .build_cartesian_2d(0f64..days, 0u32..max_students + 1)
        .map_err(|e| ChartError::render(path, e))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(Weekday::ALL.len())
        .x_label_formatter(&|x| {
            Weekday::ALL
                .get(x.floor() as usize)
                .map(|day| day.to_string())
                .unwrap_or_default()
        })
        .x_desc("Day of week")
        .y_desc("Available students")
        .draw()
        .map_err(|e| ChartError::render(path, e))?;

    for (series, period) in Period::VALID.iter().enumerate() {
        let color = period_color(*period);
        chart
            .draw_series(Weekday::ALL.iter().enumerate().map(|(day_idx, day)| {
                let students = summary.count(*day, *period);
                let x0 = day_idx as f64 + 0.14 + series as f64 * 0.24;
                Rectangle::new([(x0, 0u32), (x0 + 0.22, students)], color.filled())
            }))
            .map_err(|e| ChartError::render(path, e))?
            .label(period.label())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.85))
        .draw()
        .map_err(|e| ChartError::render(path, e))?;
    root.present().map_err(|e| ChartError::render(path, e))?;
    Ok(())
}

/// Pie chart of the satisfaction answers.
pub fn render_satisfaction_chart(rows: &[ValueCount], path: &Path) -> Result<(), ChartError> {
    let root = BitMapBackend::new(path, (520, 460)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| ChartError::render(path, e))?;
    let root = root
        .titled("Quiz grade satisfaction", ("sans-serif", 26))
        .map_err(|e| ChartError::render(path, e))?;

    let sizes: Vec<f64> = rows.iter().map(|row| f64::from(row.count)).collect();
    let colors: Vec<RGBColor> = rows
        .iter()
        .map(|row| satisfaction_color(&row.value))
        .collect();
    let labels: Vec<String> = rows
        .iter()
        .map(|row| format!("{} ({})", row.value, row.count))
        .collect();

    let center = (260, 215);
    let radius = 150.0;
    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.label_style(("sans-serif", 18).into_font());
    root.draw(&pie).map_err(|e| ChartError::render(path, e))?;
    root.present().map_err(|e| ChartError::render(path, e))?;
    Ok(())
}

/// Bar chart of the reported challenges, already sorted descending by count.
pub fn render_challenge_chart(rows: &[ValueCount], path: &Path) -> Result<(), ChartError> {
    let root = BitMapBackend::new(path, (720, 460)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| ChartError::render(path, e))?;

    let max_count = rows.iter().map(|row| row.count).max().unwrap_or(0).max(1);

    let mut chart = ChartBuilder::on(&root)
        .caption("Challenges reported for the quiz", ("sans-serif", 26))
        .margin(12)
        .x_label_area_size(90)
        .y_label_area_size(44)
        .build_cartesian_2d(0f64..rows.len().max(1) as f64, 0u32..max_count + 1)
        .map_err(|e| ChartError::render(path, e))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(rows.len())
        .x_label_formatter(&|x| {
            rows.get(x.floor() as usize)
                .map(|row| row.value.clone())
                .unwrap_or_default()
        })
        .x_desc("Challenge")
        .y_desc("Students")
        .draw()
        .map_err(|e| ChartError::render(path, e))?;

    chart
        .draw_series(rows.iter().enumerate().map(|(idx, row)| {
            let x0 = idx as f64 + 0.2;
            Rectangle::new([(x0, 0u32), (x0 + 0.6, row.count)], CHALLENGE_COLOR.filled())
        }))
        .map_err(|e| ChartError::render(path, e))?;

    root.present().map_err(|e| ChartError::render(path, e))?;
    Ok(())
}
