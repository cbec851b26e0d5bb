//! Narrative Conclusions
//! Derives the three summary bullets shown at the bottom of the dashboard.

use std::fmt::Write;

use anyhow::{ensure, Result};
use serde::Serialize;

use crate::analysis::{AvailabilitySummary, ColumnSummary};

/// How many slots the availability bullet ranks.
const TOP_SLOTS: usize = 5;
/// The satisfaction answer counted as "not satisfied".
const UNSATISFIED: &str = "No";

/// The three derived statements, with lightweight `**bold**` markup.
#[derive(Debug, Clone, Serialize)]
pub struct Conclusions {
    pub availability: String,
    pub satisfaction: String,
    pub challenges: String,
}

/// Build the three conclusion bullets.
///
/// Each bullet falls back to its own "could not analyze" wording when its
/// input is absent or empty. Inconsistent inputs (satisfaction counts with a
/// zero respondent total) error at this boundary so the caller can render
/// the failure in place without dropping the rest of the page.
pub fn build_conclusions(
    availability: &AvailabilitySummary,
    satisfaction: &ColumnSummary,
    challenges: &ColumnSummary,
    respondents: usize,
) -> Result<Conclusions> {
    Ok(Conclusions {
        availability: availability_bullet(availability),
        satisfaction: satisfaction_bullet(satisfaction, respondents)?,
        challenges: challenge_bullet(challenges),
    })
}

fn availability_bullet(summary: &AvailabilitySummary) -> String {
    let top = summary.top_slots(TOP_SLOTS);
    if top.is_empty() {
        return "- **Availability:** no slots with available students were found in the data."
            .to_string();
    }

    let mut bullet = String::from("- **Top 5 slots by availability (Day - Period):**");
    for (rank, slot) in top.iter().enumerate() {
        let plural = if slot.students == 1 { "" } else { "s" };
        let _ = write!(
            bullet,
            "\n  {}. **{} - {}** ({} student{})",
            rank + 1,
            slot.day,
            slot.period,
            slot.students,
            plural
        );
    }
    bullet
}

fn satisfaction_bullet(satisfaction: &ColumnSummary, respondents: usize) -> Result<String> {
    let ColumnSummary::Counts(rows) = satisfaction else {
        return Ok(
            "- **Quiz satisfaction:** could not analyze satisfaction (data missing or empty)."
                .to_string(),
        );
    };

    ensure!(
        respondents > 0,
        "satisfaction counts exist but the respondent total is zero"
    );

    let unsatisfied = rows
        .iter()
        .find(|row| row.value == UNSATISFIED)
        .map_or(0, |row| row.count);
    let share = unsatisfied as f64 / respondents as f64 * 100.0;
    Ok(format!(
        "- **Quiz satisfaction:** {unsatisfied} of {respondents} student(s) ({share:.1}%) did \
         not consider their quiz grade satisfactory."
    ))
}

fn challenge_bullet(challenges: &ColumnSummary) -> String {
    let ranked = match challenges {
        ColumnSummary::Counts(rows) => rows.as_slice(),
        ColumnSummary::Empty | ColumnSummary::MissingColumn => &[],
    };

    match ranked.split_first() {
        Some((top, rest)) => {
            let mut text = format!("The most cited challenge was **\"{}\"**", top.value);
            if let Some(second) = rest.first() {
                let _ = write!(text, ", followed by **\"{}\"**", second.value);
            }
            format!("- **Quiz challenges:** {text}.")
        }
        None => "- **Quiz challenges:** could not analyze the reported challenges.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{summarize_availability, ValueCount};
    use polars::df;

    fn counts(pairs: &[(&str, u32)]) -> ColumnSummary {
        ColumnSummary::Counts(
            pairs
                .iter()
                .map(|(value, count)| ValueCount {
                    value: (*value).to_string(),
                    count: *count,
                })
                .collect(),
        )
    }

    #[test]
    fn satisfaction_reports_the_unsatisfied_share() {
        let satisfaction = counts(&[("No", 3), ("Yes", 7)]);
        let bullet = satisfaction_bullet(&satisfaction, 10).unwrap();
        assert!(bullet.contains("3 of 10"), "{bullet}");
        assert!(bullet.contains("(30.0%)"), "{bullet}");
    }

    #[test]
    fn satisfaction_defaults_to_zero_when_no_one_said_no() {
        let satisfaction = counts(&[("Yes", 4)]);
        let bullet = satisfaction_bullet(&satisfaction, 4).unwrap();
        assert!(bullet.contains("0 of 4"), "{bullet}");
        assert!(bullet.contains("(0.0%)"), "{bullet}");
    }

    #[test]
    fn satisfaction_falls_back_when_the_column_is_missing() {
        let bullet = satisfaction_bullet(&ColumnSummary::MissingColumn, 10).unwrap();
        assert!(bullet.contains("could not analyze"), "{bullet}");
    }

    #[test]
    fn satisfaction_rejects_a_zero_respondent_total() {
        let satisfaction = counts(&[("No", 3)]);
        assert!(satisfaction_bullet(&satisfaction, 0).is_err());
    }

    #[test]
    fn challenges_name_the_top_two_in_order() {
        let challenges = counts(&[("Time management", 5), ("Question clarity", 3)]);
        let bullet = challenge_bullet(&challenges);
        assert_eq!(
            bullet,
            "- **Quiz challenges:** The most cited challenge was **\"Time management\"**, \
             followed by **\"Question clarity\"**."
        );
    }

    #[test]
    fn a_single_challenge_has_no_runner_up_clause() {
        let bullet = challenge_bullet(&counts(&[("Time management", 5)]));
        assert!(!bullet.contains("followed by"), "{bullet}");
    }

    #[test]
    fn challenges_fall_back_when_the_column_is_missing() {
        let bullet = challenge_bullet(&ColumnSummary::MissingColumn);
        assert!(bullet.contains("could not analyze"), "{bullet}");
    }

    #[test]
    fn availability_ranks_slots_with_plural_wording() {
        let frame = df!(
            "monday" => [Some("Morning"), Some("Morning")],
            "tuesday" => [Some("Evening"), None],
        )
        .unwrap();
        let summary = summarize_availability(&frame).unwrap();
        let bullet = availability_bullet(&summary);

        assert!(bullet.contains("1. **Monday - Morning** (2 students)"), "{bullet}");
        assert!(bullet.contains("2. **Tuesday - Evening** (1 student)"), "{bullet}");
    }

    #[test]
    fn conclusions_compose_all_three_bullets() {
        let frame = df!("monday" => [Some("Morning")]).unwrap();
        let summary = summarize_availability(&frame).unwrap();
        let conclusions = build_conclusions(
            &summary,
            &counts(&[("Yes", 1)]),
            &ColumnSummary::MissingColumn,
            1,
        )
        .unwrap();

        assert!(conclusions.availability.contains("Top 5 slots"));
        assert!(conclusions.satisfaction.contains("0 of 1"));
        assert!(conclusions.challenges.contains("could not analyze"));
    }
}
