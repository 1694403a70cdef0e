//! Study tools that ask the language model first and fall back to simple
//! text heuristics when it is unavailable or returns something unusable.

use std::collections::HashSet;

use serde_json::{Value, json};
use tracing::warn;

use super::clip;
use crate::ai::{AiClient, complete_json};

const FLASHCARD_INPUT_CHARS: usize = 4000;
const GUIDE_INPUT_CHARS: usize = 6000;

pub async fn flashcards(ai: &dyn AiClient, text: &str, count: usize) -> Value {
    let system = format!(
        "Generate {} flashcards from the given content. \
Return JSON: {{\"flashcards\": [{{\"front\": \"question\", \"back\": \"answer\"}}]}} \
Make questions test understanding, not just recall.",
        count
    );
    let user = format!("Create flashcards from:\n\n{}", clip(text, FLASHCARD_INPUT_CHARS));

    match complete_json(ai, &system, &user).await {
        Ok(reply) => return first_n(reply.get("flashcards"), count),
        Err(e) => warn!("Flashcard generation fell back to heuristics: {}", e),
    }
    fallback_flashcards(text, count)
}

pub fn fallback_flashcards(text: &str, count: usize) -> Value {
    let cards: Vec<Value> = text
        .split('.')
        .map(str::trim)
        .filter(|s| s.chars().count() > 20)
        .take(count)
        .map(|s| {
            json!({
                "front": format!("What do you know about: {}...?", clip(s, 50)),
                "back": s,
            })
        })
        .collect();
    Value::Array(cards)
}

pub async fn quiz(ai: &dyn AiClient, text: &str, count: usize) -> Value {
    let system = format!(
        "Generate {} quiz questions from the content. \
Return JSON: {{\"questions\": [{{\"question\": \"...\", \"type\": \"multiple_choice\", \"options\": [\"A\", \"B\", \"C\", \"D\"], \"answer\": \"correct option text\"}}]}} \
Mix question types: multiple_choice, true_false. Always include 'answer' field with correct answer text.",
        count
    );
    let user = format!("Create a quiz from:\n\n{}", clip(text, FLASHCARD_INPUT_CHARS));

    match complete_json(ai, &system, &user).await {
        Ok(reply) => return first_n(reply.get("questions"), count),
        Err(e) => warn!("Quiz generation fell back to sample questions: {}", e),
    }
    fallback_quiz(count)
}

pub fn fallback_quiz(count: usize) -> Value {
    let questions = [
        json!({
            "question": "What is the main topic of this content?",
            "type": "multiple_choice",
            "options": ["Topic A", "Topic B", "Topic C", "Topic D"],
            "answer": "Topic A"
        }),
        json!({
            "question": "This content contains important information.",
            "type": "true_false",
            "answer": "True"
        }),
    ];
    Value::Array(questions.into_iter().take(count).collect())
}

pub async fn study_guide(ai: &dyn AiClient, text: &str) -> Value {
    let system = "You create comprehensive study guides. Return JSON with this format: \
{\"sections\": [{\"title\": \"Key Concepts\", \"points\": [\"point 1\", \"point 2\"]}, {\"title\": \"Important Terms\", \"points\": [\"term: definition\"]}]} \
Include sections like: Key Concepts, Important Terms, Main Ideas, Things to Remember, Practice Questions.";
    let user = format!("Create a study guide for:\n\n{}", clip(text, GUIDE_INPUT_CHARS));

    match complete_json(ai, system, &user).await {
        Ok(guide) => return guide,
        Err(e) => warn!("Study guide fell back to heuristics: {}", e),
    }
    fallback_study_guide(text)
}

/// Key concepts are the first sentences; important terms are distinct
/// capitalised words longer than three characters.
pub fn fallback_study_guide(text: &str) -> Value {
    let sentences: Vec<&str> = text
        .split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let mut seen = HashSet::new();
    let terms: Vec<&str> = text
        .split_whitespace()
        .filter(|w| w.chars().next().is_some_and(char::is_uppercase) && w.chars().count() > 3)
        .filter(|w| seen.insert(*w))
        .take(5)
        .collect();

    let concepts: Vec<&str> = if sentences.is_empty() {
        vec!["No content to analyze"]
    } else {
        sentences.into_iter().take(5).collect()
    };
    let terms = if terms.is_empty() {
        vec!["Review the material for key terms"]
    } else {
        terms
    };

    json!({
        "sections": [
            {"title": "Key Concepts", "points": concepts},
            {"title": "Important Terms", "points": terms},
            {
                "title": "Study Tips",
                "points": [
                    "Review this material regularly",
                    "Try to explain concepts in your own words",
                    "Create your own practice questions",
                    "Connect new information to what you already know"
                ]
            }
        ]
    })
}

fn length_instruction(length: &str) -> &'static str {
    match length {
        "brief" => "Write a 2-3 sentence summary.",
        "detailed" => "Write a comprehensive summary covering all main points.",
        "bullet" => "Write a bullet-point summary with key takeaways.",
        _ => "Write a brief summary.",
    }
}

pub async fn summarize(ai: &dyn AiClient, text: &str, length: &str) -> String {
    let system = format!(
        "You summarize content clearly and concisely. {}",
        length_instruction(length)
    );
    let user = format!("Summarize this:\n\n{}", clip(text, GUIDE_INPUT_CHARS));

    match ai.complete(&system, &user, false).await {
        Ok(summary) => return summary,
        Err(e) => warn!("Summary fell back to leading sentences: {}", e),
    }
    fallback_summary(text)
}

/// The first five sentences, re-joined.
pub fn fallback_summary(text: &str) -> String {
    let sentences: Vec<&str> = text
        .split('.')
        .take(5)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    format!("{}.", sentences.join(". "))
}

fn first_n(items: Option<&Value>, n: usize) -> Value {
    match items.and_then(Value::as_array) {
        Some(items) => Value::Array(items.iter().take(n).cloned().collect()),
        None => Value::Array(Vec::new()),
    }
}
