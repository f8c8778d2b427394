//! Local progress statistics, derived only from the session's practice history.
//!
//! This is the client's source of truth for progress. The backend's
//! `/api/progress` aggregate is displayed separately and never mixed in.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::models::PracticeEntry;

/// Minimum gap between half-means before the trend leaves `Stable`.
pub const TREND_THRESHOLD: f64 = 0.5;
/// Categories averaging below this are called out as weak.
pub const WEAK_CATEGORY_THRESHOLD: f64 = 6.0;
/// Practice count below which results are considered too thin to read.
pub const MEANINGFUL_PRACTICE_COUNT: usize = 10;
const RECENT_LIMIT: usize = 5;
const MAX_WEAK_CATEGORIES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Trend {
    Improving,
    Declining,
    Stable,
    InsufficientData,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Trend::Improving => "Improving",
            Trend::Declining => "Declining",
            Trend::Stable => "Stable",
            Trend::InsufficientData => "N/A",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStats {
    pub count: usize,
    pub average_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSummary {
    pub total_practiced: usize,
    /// Entries that carry a usable overall score.
    pub scored: usize,
    pub average_score: Option<f64>,
    pub category_breakdown: BTreeMap<String, CategoryStats>,
    pub trend: Trend,
    /// Second-half mean minus first-half mean.
    pub improvement: Option<f64>,
    /// Newest first.
    pub recent: Vec<PracticeEntry>,
    pub suggestions: Vec<String>,
}

pub fn summarize(history: &[PracticeEntry]) -> ProgressSummary {
    let scores: Vec<f64> = history.iter().filter_map(PracticeEntry::overall_score).collect();
    let average_score = mean(&scores);
    let category_breakdown = category_breakdown(history);
    let (trend, improvement) = trend(&scores);
    let suggestions = suggestions(history.len(), average_score, &category_breakdown);

    ProgressSummary {
        total_practiced: history.len(),
        scored: scores.len(),
        average_score,
        category_breakdown,
        trend,
        improvement,
        recent: history.iter().rev().take(RECENT_LIMIT).cloned().collect(),
        suggestions,
    }
}

/// Arithmetic mean; `None` for an empty slice.
pub fn mean(scores: &[f64]) -> Option<f64> {
    if scores.is_empty() {
        None
    } else {
        Some(scores.iter().sum::<f64>() / scores.len() as f64)
    }
}

/// Per-category count and mean over scored entries.
pub fn category_breakdown(history: &[PracticeEntry]) -> BTreeMap<String, CategoryStats> {
    let mut grouped: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for entry in history {
        if let Some(score) = entry.overall_score() {
            grouped
                .entry(entry.category().to_string())
                .or_default()
                .push(score);
        }
    }

    grouped
        .into_iter()
        .filter_map(|(category, scores)| {
            mean(&scores).map(|average_score| {
                (
                    category,
                    CategoryStats {
                        count: scores.len(),
                        average_score,
                    },
                )
            })
        })
        .collect()
}

/// Two-half comparison: `[..n/2]` against `[n/2..]`.
pub fn trend(scores: &[f64]) -> (Trend, Option<f64>) {
    if scores.len() < 2 {
        return (Trend::InsufficientData, None);
    }

    let (first, second) = scores.split_at(scores.len() / 2);
    let (Some(first_mean), Some(second_mean)) = (mean(first), mean(second)) else {
        return (Trend::InsufficientData, None);
    };

    let trend = if second_mean > first_mean + TREND_THRESHOLD {
        Trend::Improving
    } else if second_mean < first_mean - TREND_THRESHOLD {
        Trend::Declining
    } else {
        Trend::Stable
    };
    (trend, Some(second_mean - first_mean))
}

/// Letter grade for a 0–10 score.
pub fn grade(score: f64) -> &'static str {
    match score {
        s if s >= 9.0 => "A",
        s if s >= 8.0 => "B+",
        s if s >= 7.0 => "B",
        s if s >= 6.0 => "C+",
        s if s >= 5.0 => "C",
        _ => "D",
    }
}

fn suggestions(
    total: usize,
    average: Option<f64>,
    breakdown: &BTreeMap<String, CategoryStats>,
) -> Vec<String> {
    if total == 0 {
        return vec![
            "Start practicing! Analyze a job description to get personalized questions."
                .to_string(),
        ];
    }

    let mut out = Vec::new();

    let weak: Vec<&str> = breakdown
        .iter()
        .filter(|(_, stats)| stats.average_score < WEAK_CATEGORY_THRESHOLD)
        .map(|(category, _)| category.as_str())
        .take(MAX_WEAK_CATEGORIES)
        .collect();
    if !weak.is_empty() {
        out.push(format!("Focus on improving: {}", weak.join(", ")));
    }

    match average {
        Some(avg) if avg < 6.0 => {
            out.push("Practice more! Try explaining concepts out loud before writing.".to_string())
        }
        Some(avg) if avg > 8.0 => {
            out.push("Great job! Try tackling harder questions or new categories.".to_string())
        }
        _ => {}
    }

    if total < MEANINGFUL_PRACTICE_COUNT {
        out.push(
            "Complete at least 10 practice questions to see meaningful progress".to_string(),
        );
    }

    out
}
