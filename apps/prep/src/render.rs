//! Plain-text rendering of API results for the terminal front-end.

use std::fmt::Write;

use crate::models::{
    EvaluationResponse, JobDescriptionResponse, ModelAnswer, ProgressResponse, Question,
    TermExplanation,
};
use crate::progress::{grade, ProgressSummary, Trend};

// ────────────────────────────────────────────────────────────────────────────
// Questions and job analysis
// ────────────────────────────────────────────────────────────────────────────

pub fn question_line(q: &Question) -> String {
    format!("[{}] ({} / {}) {}", q.id, q.category, q.difficulty, q.question)
}

pub fn question_detail(q: &Question) -> String {
    let mut out = question_line(q);
    for hint in &q.hints {
        let _ = write!(out, "\n  hint: {hint}");
    }
    out
}

pub fn job_analysis(response: &JobDescriptionResponse) -> String {
    let a = &response.analysis;
    let mut out = String::new();
    let _ = writeln!(out, "Role:        {}", a.job_role);
    let _ = writeln!(out, "Level:       {}", a.experience_level);
    let _ = writeln!(out, "Required:    {}", list_or_none(&a.required_skills));
    let _ = writeln!(out, "Preferred:   {}", list_or_none(&a.preferred_skills));
    let _ = writeln!(out, "Summary:     {}", response.summary);
    let _ = writeln!(out, "\nMatched questions ({}):", response.matched_questions.len());
    for q in &response.matched_questions {
        let _ = writeln!(out, "  {}", question_line(q));
    }
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Answers
// ────────────────────────────────────────────────────────────────────────────

pub fn model_answer(answer: &ModelAnswer, formatted: bool) -> String {
    let mut out = String::new();
    if !answer.summary.is_empty() {
        let _ = writeln!(out, "Summary: {}", answer.summary);
    }
    for point in &answer.key_points {
        let _ = writeln!(out, "  • {point}");
    }
    if formatted {
        let _ = writeln!(out, "(STAR format)");
    }
    let _ = writeln!(out, "\n{}", answer.detailed_answer);
    for example in &answer.examples {
        let _ = writeln!(out, "  e.g. {example}");
    }
    out
}

pub fn evaluation(eval: &EvaluationResponse) -> String {
    let scores = &eval.scores;
    let mut out = String::new();
    let _ = writeln!(out, "Overall: {:.1}/10 ({})", scores.overall, grade(scores.overall));
    for (label, score) in scores.breakdown() {
        let _ = writeln!(out, "  {label:<16}{score:.1}");
    }
    section(&mut out, "Strengths", &eval.strengths);
    section(&mut out, "Improvements", &eval.improvements);
    section(&mut out, "Follow-up questions", &eval.follow_up_questions);
    if !eval.feedback.is_empty() {
        let _ = writeln!(out, "\n{}", eval.feedback);
    }
    out
}

pub fn explanation(result: &TermExplanation) -> String {
    let mut out = String::new();
    match result {
        TermExplanation::Structured {
            definition,
            analogy,
            key_points,
            example,
            why_it_matters,
        } => {
            let _ = writeln!(out, "{definition}");
            let _ = writeln!(out, "\nAnalogy: {analogy}");
            section(&mut out, "Key points", key_points);
            let _ = writeln!(out, "\nExample: {example}");
            let _ = writeln!(out, "Why it matters: {why_it_matters}");
        }
        TermExplanation::Flat {
            term,
            explanation,
            examples,
        } => {
            let _ = writeln!(out, "{term}: {explanation}");
            section(&mut out, "Examples", examples);
        }
    }
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Progress
// ────────────────────────────────────────────────────────────────────────────

pub fn progress_summary(summary: &ProgressSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Questions practiced: {}", summary.total_practiced);
    match summary.average_score {
        Some(avg) => {
            let _ = writeln!(out, "Average score:       {avg:.1} ({})", grade(avg));
        }
        None => {
            let _ = writeln!(out, "Average score:       N/A");
        }
    }
    let _ = write!(out, "Trend:               {}", summary.trend);
    if let (Some(delta), true) = (summary.improvement, summary.trend != Trend::InsufficientData) {
        let _ = write!(out, " ({delta:+.1})");
    }
    out.push('\n');

    if !summary.category_breakdown.is_empty() {
        let _ = writeln!(out, "\nBy category:");
        for (category, stats) in &summary.category_breakdown {
            let _ = writeln!(
                out,
                "  {category:<24}{:>3} × avg {:.1}",
                stats.count, stats.average_score
            );
        }
    }
    if !summary.recent.is_empty() {
        let _ = writeln!(out, "\nRecent:");
        for entry in &summary.recent {
            let score = entry
                .overall_score()
                .map_or_else(|| "-".to_string(), |s| format!("{s:.1}"));
            let _ = writeln!(
                out,
                "  {} {:>4}  {}",
                entry.timestamp.format("%Y-%m-%d %H:%M"),
                score,
                entry.question.question
            );
        }
    }
    section(&mut out, "Suggestions", &summary.suggestions);
    out
}

/// The backend's own aggregate, shown apart from the local summary.
pub fn server_progress(progress: &ProgressResponse) -> String {
    let stats = &progress.stats;
    let mut out = String::new();
    let _ = writeln!(out, "Server-recorded practices: {}", stats.total_questions_practiced);
    let _ = writeln!(out, "Server average score:      {:.1}", stats.average_score);
    for (category, breakdown) in &stats.category_breakdown {
        let _ = writeln!(
            out,
            "  {category:<24}{:>3} × avg {:.1}",
            breakdown.count, breakdown.average_score
        );
    }
    section(&mut out, "Server suggestions", &progress.improvement_suggestions);
    out
}

fn section(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{title}:");
    for item in items {
        let _ = writeln!(out, "  - {item}");
    }
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}
