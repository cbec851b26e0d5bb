//! availboard - Student Availability Survey Dashboard
//!
//! Reads the survey CSV, aggregates availability and quiz feedback, and
//! writes the static dashboard page with its charts and data export.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};

use availboard::analysis::{summarize_availability, value_counts};
use availboard::charts;
use availboard::data::{SurveyCache, CHALLENGE_COLUMN, SATISFACTION_COLUMN};
use availboard::page::{self, ChartSet, DashboardData};
use availboard::report::build_conclusions;

const DATA_PATH: &str = "data/data.csv";
const LOGO_PATH: &str = "assets/logo.png";
const OUT_DIR: &str = "site";

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = Path::new(OUT_DIR);
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create the output directory {OUT_DIR}"))?;

    let mut cache = SurveyCache::new();
    let survey = cache
        .load(Path::new(DATA_PATH))
        .context("failed to load the survey data")?;

    let availability = summarize_availability(&survey.table)
        .context("failed to aggregate the availability table")?;
    let satisfaction = value_counts(&survey.table, SATISFACTION_COLUMN)
        .context("failed to count the satisfaction answers")?;
    let challenges = value_counts(&survey.table, CHALLENGE_COLUMN)
        .context("failed to count the challenge answers")?;

    let conclusions = build_conclusions(
        &availability,
        &satisfaction,
        &challenges,
        survey.respondents(),
    );
    if let Err(err) = &conclusions {
        warn!("could not derive the conclusions: {err:#}");
    }

    let mut chart_set = ChartSet::default();
    match charts::render_availability_chart(&availability, &out_dir.join("availability.png")) {
        Ok(()) => chart_set.availability = Some("availability.png".to_string()),
        Err(err) => warn!("{err}"),
    }
    if let Some(rows) = satisfaction.rows().filter(|rows| !rows.is_empty()) {
        match charts::render_satisfaction_chart(rows, &out_dir.join("satisfaction.png")) {
            Ok(()) => chart_set.satisfaction = Some("satisfaction.png".to_string()),
            Err(err) => warn!("{err}"),
        }
    }
    if let Some(rows) = challenges.rows().filter(|rows| !rows.is_empty()) {
        match charts::render_challenge_chart(rows, &out_dir.join("challenges.png")) {
            Ok(()) => chart_set.challenges = Some("challenges.png".to_string()),
            Err(err) => warn!("{err}"),
        }
    }

    let logo = Path::new(LOGO_PATH);
    let logo_file = if logo.exists() {
        fs::copy(logo, out_dir.join("logo.png"))
            .with_context(|| format!("failed to copy {LOGO_PATH}"))?;
        Some("logo.png")
    } else {
        warn!("logo not found at {LOGO_PATH}; the page footer will omit it");
        None
    };

    let html = page::render_page(
        &survey.table,
        &satisfaction,
        &challenges,
        &conclusions,
        &chart_set,
        logo_file,
    );
    fs::write(out_dir.join("dashboard.html"), html)
        .context("failed to write the dashboard page")?;

    let data = DashboardData {
        respondents: survey.respondents(),
        availability: availability.rows(),
        satisfaction: satisfaction.rows(),
        challenges: challenges.rows(),
        conclusions: conclusions.as_ref().ok(),
    };
    page::write_json(&out_dir.join("dashboard.json"), &data)?;

    info!(
        "dashboard written to {}",
        out_dir.join("dashboard.html").display()
    );
    Ok(())
}
