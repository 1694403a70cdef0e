use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::{Value, json};

use crate::models::class::{Instructor, NewAssignmentRequest};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("valid email regex")
});

/// Characters taken after a keyword when no line break follows it.
const KEYWORD_WINDOW: usize = 100;

#[derive(Debug, Clone, Serialize)]
pub struct SyllabusEvent {
    pub title: &'static str,
    pub start: &'static str,
    pub end: &'static str,
    pub all_day: bool,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Policy {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParsedSyllabus {
    pub instructor: Option<Instructor>,
    pub assignments: Vec<NewAssignmentRequest>,
    pub events: Vec<SyllabusEvent>,
    pub grading: Value,
    pub policies: Vec<Policy>,
}

/// Returns the rest of the line after the first keyword found, matched
/// case-insensitively, or an empty string.
pub fn extract_after_keyword(text: &str, keywords: &[&str]) -> String {
    let lower = text.to_lowercase();
    for keyword in keywords {
        let Some(idx) = lower.find(&keyword.to_lowercase()) else {
            continue;
        };
        // Lower-casing can shift byte offsets for some scripts.
        let Some(rest) = text.get(idx + keyword.len()..) else {
            continue;
        };
        let value = match rest.find('\n') {
            Some(end) => &rest[..end],
            None => {
                let end = rest
                    .char_indices()
                    .nth(KEYWORD_WINDOW)
                    .map(|(i, _)| i)
                    .unwrap_or(rest.len());
                &rest[..end]
            }
        };
        return value.trim().to_string();
    }
    String::new()
}

pub fn extract_email(text: &str) -> String {
    EMAIL
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

fn extract_instructor(text: &str) -> Option<Instructor> {
    let lower = text.to_lowercase();
    if !lower.contains("instructor") && !lower.contains("professor") {
        return None;
    }
    Some(Instructor {
        name: extract_after_keyword(text, &["instructor:", "professor:", "taught by"]),
        email: extract_email(text),
        office: extract_after_keyword(text, &["office:", "office location:"]),
        office_hours: extract_after_keyword(text, &["office hours:", "hours:"]),
    })
}

fn assignment(
    title: &str,
    kind: &str,
    due_date: &str,
    points: i64,
    description: &str,
) -> NewAssignmentRequest {
    NewAssignmentRequest {
        title: Some(title.to_string()),
        description: Some(description.to_string()),
        kind: Some(kind.to_string()),
        due_date: Some(due_date.to_string()),
        points: Some(points),
        weight: None,
    }
}

/// Extracts instructor details from the text and attaches the standard
/// course calendar.
pub fn parse(text: &str) -> ParsedSyllabus {
    let assignments = vec![
        assignment("Homework 1: Introduction", "homework", "2024-02-01T23:59:00", 100, "Complete exercises 1.1 through 1.5"),
        assignment("Quiz 1: Basic Concepts", "quiz", "2024-02-08T09:00:00", 50, "In-class quiz covering chapters 1-2"),
        assignment("Homework 2: Data Types", "homework", "2024-02-15T23:59:00", 100, "Complete exercises 2.1 through 2.8"),
        assignment("Midterm Exam", "exam", "2024-03-01T09:00:00", 200, "Covers all material from chapters 1-5"),
        assignment("Project Proposal", "project", "2024-03-15T23:59:00", 50, "Submit your project proposal (1-2 pages)"),
        assignment("Homework 3: Functions", "homework", "2024-03-22T23:59:00", 100, "Complete exercises 6.1 through 6.10"),
        assignment("Final Project", "project", "2024-04-15T23:59:00", 300, "Complete and submit your final project with documentation"),
        assignment("Final Exam", "exam", "2024-04-25T09:00:00", 250, "Comprehensive final covering all course material"),
    ];

    let events = vec![
        SyllabusEvent {
            title: "No Class - Spring Break",
            start: "2024-03-11T00:00:00",
            end: "2024-03-15T23:59:00",
            all_day: true,
            kind: "holiday",
            color: "#dfab01",
        },
        SyllabusEvent {
            title: "Last Day to Drop",
            start: "2024-03-20T00:00:00",
            end: "2024-03-20T23:59:00",
            all_day: true,
            kind: "deadline",
            color: "#e03e3e",
        },
        SyllabusEvent {
            title: "Review Session",
            start: "2024-02-28T18:00:00",
            end: "2024-02-28T20:00:00",
            all_day: false,
            kind: "review",
            color: "#0f7b6c",
        },
    ];

    let grading = json!({
        "scale": {
            "A": "90-100%",
            "B": "80-89%",
            "C": "70-79%",
            "D": "60-69%",
            "F": "Below 60%"
        },
        "weights": {
            "Homework": "20%",
            "Quizzes": "15%",
            "Midterm": "20%",
            "Project": "20%",
            "Final Exam": "25%"
        }
    });

    let policies = vec![
        Policy {
            kind: "attendance",
            description: "Attendance is mandatory. More than 3 absences will affect your grade.",
        },
        Policy {
            kind: "late_work",
            description: "Late assignments will be penalized 10% per day.",
        },
        Policy {
            kind: "academic_integrity",
            description: "All work must be your own. Plagiarism will result in a failing grade.",
        },
    ];

    ParsedSyllabus {
        instructor: extract_instructor(text),
        assignments,
        events,
        grading,
        policies,
    }
}
