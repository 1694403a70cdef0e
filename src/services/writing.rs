//! Writing helpers: analysis, rewriting, expansion and brainstorming.
//!
//! Only the readability figures are computed from the input; the rest are
//! fixed sample results shaped like the real thing.

use serde_json::{Map, Value, json};

use super::clip;

pub const ANALYSIS_SECTIONS: [&str; 6] =
    ["grammar", "tone", "readability", "keywords", "sentiment", "entities"];

/// Runs every section named by `kind`, or all of them for `full`.
/// Unknown kinds yield an empty object.
pub fn analyze(text: &str, kind: &str) -> Map<String, Value> {
    let mut analysis = Map::new();
    for section in ANALYSIS_SECTIONS {
        if kind != "full" && kind != section {
            continue;
        }
        let value = match section {
            "grammar" => grammar(text),
            "tone" => tone(),
            "readability" => readability(text),
            "keywords" => keywords(),
            "sentiment" => sentiment(),
            _ => entities(),
        };
        analysis.insert(section.to_string(), value);
    }
    analysis
}

fn grammar(text: &str) -> Value {
    json!({
        "issues_found": 3,
        "suggestions": [
            {"type": "spelling", "original": "teh", "suggestion": "the", "position": 15},
            {"type": "grammar", "original": "is goes", "suggestion": "goes", "position": 45},
            {"type": "punctuation", "original": "however", "suggestion": "However,", "position": 78}
        ],
        "corrected_text": text,
        "score": 85
    })
}

fn tone() -> Value {
    json!({
        "primary_tone": "professional",
        "tones": {
            "professional": 0.75,
            "friendly": 0.45,
            "formal": 0.60,
            "casual": 0.25,
            "confident": 0.70,
            "enthusiastic": 0.35
        },
        "suggestions": [
            "Consider adding more engaging language to increase enthusiasm",
            "The tone is well-suited for business communication"
        ]
    })
}

pub fn readability(text: &str) -> Value {
    let words: Vec<&str> = text.split_whitespace().collect();
    let word_count = words.len();
    let sentence_count = text.split('.').filter(|s| !s.trim().is_empty()).count();
    let letters: usize = words.iter().map(|w| w.chars().count()).sum();

    json!({
        "flesch_kincaid_grade": 8.5,
        "flesch_reading_ease": 65.2,
        "gunning_fog_index": 10.3,
        "avg_sentence_length": word_count as f64 / sentence_count.max(1) as f64,
        "avg_word_length": letters as f64 / word_count.max(1) as f64,
        "word_count": word_count,
        "sentence_count": sentence_count,
        "reading_time": format!("{} min", (word_count / 200).max(1)),
        "level": "Intermediate",
        "suggestions": [
            "Consider breaking longer sentences for better readability",
            "Use simpler words where possible for broader audience"
        ]
    })
}

pub fn keywords() -> Value {
    json!({
        "keywords": ["project", "development", "team", "meeting", "progress", "deadline"],
        "key_phrases": ["project timeline", "team meeting", "development progress", "Q2 deadline"],
        "topics": ["Project Management", "Team Collaboration", "Software Development"],
        "word_frequency": {"project": 5, "team": 4, "meeting": 3, "development": 3}
    })
}

fn sentiment() -> Value {
    json!({
        "overall": "positive",
        "score": 0.72,
        "breakdown": {"positive": 0.65, "neutral": 0.25, "negative": 0.10},
        "emotions": {
            "joy": 0.45,
            "trust": 0.60,
            "anticipation": 0.55,
            "surprise": 0.15,
            "sadness": 0.05,
            "fear": 0.03,
            "anger": 0.02,
            "disgust": 0.01
        },
        "key_phrases": {
            "positive": ["great progress", "excellent work", "successful completion"],
            "negative": ["minor delays", "resource constraints"]
        }
    })
}

fn entities() -> Value {
    json!({
        "people": ["John Smith", "Sarah Johnson", "Mike Chen"],
        "organizations": ["Acme Corp", "Tech Solutions Inc"],
        "locations": ["New York", "San Francisco Office"],
        "dates": ["January 15", "Q2 2024", "next Tuesday"],
        "money": ["$50,000", "15% increase"],
        "products": ["Project Alpha", "Version 2.0"],
        "events": ["quarterly review", "team meeting", "product launch"]
    })
}

/// Unknown styles return the text unchanged.
pub fn rewrite(text: &str, style: &str) -> String {
    match style {
        "professional" => format!(
            "The following represents a professional articulation of the content: {}... [Rewritten with formal business language, clear structure, and professional terminology]",
            clip(text, 100)
        ),
        "casual" => format!(
            "So basically, here's the deal: {}... [Rewritten in a friendly, conversational tone]",
            clip(text, 100)
        ),
        "formal" => format!(
            "It is hereby noted that: {}... [Rewritten with formal language and structure]",
            clip(text, 100)
        ),
        "friendly" => format!(
            "Hey there! Just wanted to share: {}... [Rewritten in a warm, approachable manner]",
            clip(text, 100)
        ),
        "concise" => format!(
            "Key points: {}... [Condensed to essential information only]",
            clip(text, 50)
        ),
        "detailed" => format!(
            "To elaborate comprehensively: {}... [Expanded with additional context and explanations]",
            clip(text, 100)
        ),
        _ => text.to_string(),
    }
}

pub fn grammar_changes() -> Value {
    json!([
        {"original": "their", "corrected": "they're", "type": "word_choice", "explanation": "Use contraction for \"they are\""},
        {"original": "alot", "corrected": "a lot", "type": "spelling", "explanation": "\"A lot\" is two words"},
        {"original": "your welcome", "corrected": "you're welcome", "type": "grammar", "explanation": "Use contraction for \"you are\""}
    ])
}

pub fn expand(text: &str) -> String {
    format!(
        "**Expanded Content**\n\n{}\n\n\
**Additional Context:**\n\
This topic encompasses several important aspects that merit further discussion. The core concepts presented here form the foundation for understanding the broader implications and applications.\n\n\
**Key Considerations:**\n\
1. The primary factors that influence this subject\n\
2. Related concepts and their interconnections\n\
3. Practical applications and real-world examples\n\
4. Potential challenges and solutions\n\
5. Future directions and emerging trends\n\n\
**Detailed Analysis:**\n\
When examining this content more closely, we can identify multiple layers of meaning and significance. The underlying principles demonstrate a clear connection to established frameworks while also introducing novel perspectives.\n\n\
**Conclusion:**\n\
Understanding these elements provides a comprehensive view of the subject matter, enabling more informed decision-making and strategic planning.",
        text
    )
}

/// Keeps `target` percent of the words, never fewer than twenty.
pub fn shorten(text: &str, target: u32) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    let keep = (words.len() * target as usize / 100).max(20);
    let kept: Vec<&str> = words.into_iter().take(keep).collect();
    format!(
        "**Condensed Version ({}% of original):**\n\n{}...\n\n\
**Key Points Preserved:**\n\
• Main argument maintained\n\
• Critical details included\n\
• Action items highlighted",
        target,
        kept.join(" ")
    )
}

pub fn completions(text: &str, count: usize) -> Vec<String> {
    [
        "and this leads to improved productivity across the team.",
        "which demonstrates the importance of clear communication.",
        "as outlined in the project documentation.",
        "following the established best practices.",
        "with consideration for all stakeholders involved.",
    ]
    .iter()
    .take(count)
    .map(|tail| format!("{} {}", text, tail))
    .collect()
}

const CONTINUE_SENTENCE: &str = "Furthermore, this demonstrates the importance of maintaining clear communication throughout the process.";

const CONTINUE_PARAGRAPH: &str = "Furthermore, this demonstrates the importance of maintaining clear communication throughout the process. By establishing regular check-ins and documentation practices, teams can ensure alignment and prevent misunderstandings.

The key factors to consider include stakeholder expectations, resource availability, and timeline constraints. Each of these elements plays a crucial role in determining the overall success of the initiative.";

const CONTINUE_SECTION: &str = "Furthermore, this demonstrates the importance of maintaining clear communication throughout the process.

## Key Considerations

When approaching this topic, several factors merit attention:

1. **Stakeholder Alignment** - Ensuring all parties share a common understanding
2. **Resource Planning** - Allocating appropriate time and personnel
3. **Risk Management** - Identifying and mitigating potential issues
4. **Quality Assurance** - Maintaining standards throughout

## Implementation Steps

The following steps outline a recommended approach:

1. Initial assessment and planning phase
2. Stakeholder consultation and feedback
3. Iterative development and refinement
4. Final review and deployment

## Conclusion

By following these guidelines, organizations can improve their outcomes and achieve better results across their initiatives.";

/// `sentence`, `paragraph` or `section`; anything else reads as a paragraph.
pub fn continue_writing(length: &str) -> &'static str {
    match length {
        "sentence" => CONTINUE_SENTENCE,
        "section" => CONTINUE_SECTION,
        _ => CONTINUE_PARAGRAPH,
    }
}

pub fn brainstorm(topic: &str, count: usize, format: &str) -> Value {
    let ideas: Vec<String> = [
        ("💡", "Innovative approach: Leverage AI to automate", "processes"),
        ("🎯", "User-centric: Focus on improving user experience in", ""),
        ("📊", "Data-driven: Use analytics to optimize", "outcomes"),
        ("🤝", "Collaborative: Create team-based solutions for", ""),
        ("🔄", "Iterative: Implement agile methodology for", ""),
        ("🌱", "Sustainable: Develop long-term strategies for", ""),
        ("📱", "Mobile-first: Design mobile solutions for", ""),
        ("🔒", "Secure: Prioritize security in", "implementation"),
        ("⚡", "Fast: Optimize performance and speed for", ""),
        ("🎨", "Creative: Apply design thinking to", ""),
        ("🌐", "Global: Consider international aspects of", ""),
        ("♿", "Accessible: Ensure inclusivity in", "design"),
    ]
    .iter()
    .map(|(emoji, lead, tail)| {
        if tail.is_empty() {
            format!("{} {} {}", emoji, lead, topic)
        } else {
            format!("{} {} {} {}", emoji, lead, topic, tail)
        }
    })
    .collect();

    let mut result = json!({
        "topic": topic,
        "ideas": ideas.iter().take(count).collect::<Vec<_>>(),
        "categories": {
            "innovation": &ideas[0..3],
            "improvement": &ideas[3..6],
            "expansion": &ideas[6..9]
        }
    });

    if format == "mindmap" {
        result["mindmap"] = json!({
            "center": topic,
            "branches": [
                {"name": "Innovation", "children": &ideas[0..3]},
                {"name": "Improvement", "children": &ideas[3..6]},
                {"name": "Expansion", "children": &ideas[6..9]}
            ]
        });
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_analysis_has_every_section() {
        let analysis = analyze("One. Two.", "full");
        assert_eq!(analysis.len(), ANALYSIS_SECTIONS.len());
        let only_tone = analyze("x", "tone");
        assert_eq!(only_tone.keys().collect::<Vec<_>>(), vec!["tone"]);
        assert!(analyze("x", "bogus").is_empty());
    }

    #[test]
    fn readability_counts_words_and_sentences() {
        let r = readability("The cat sat. The dog ran.");
        assert_eq!(r["word_count"], 6);
        assert_eq!(r["sentence_count"], 2);
        assert_eq!(r["avg_sentence_length"], 3.0);
        assert_eq!(r["reading_time"], "1 min");
    }

    #[test]
    fn unknown_rewrite_style_is_identity() {
        assert_eq!(rewrite("keep me", "pirate"), "keep me");
        assert!(rewrite("short", "concise").starts_with("Key points: short..."));
    }

    #[test]
    fn shorten_keeps_at_least_twenty_words() {
        let text = (1..=30).map(|n| n.to_string()).collect::<Vec<_>>().join(" ");
        let out = shorten(&text, 10);
        assert!(out.contains("\n\n1 2 3"));
        assert!(out.contains(" 20..."));
        assert!(!out.contains(" 21"));
    }

    #[test]
    fn completions_respect_count() {
        let out = completions("We shipped", 2);
        assert_eq!(out.len(), 2);
        assert_eq!(out[1], "We shipped which demonstrates the importance of clear communication.");
    }

    #[test]
    fn brainstorm_mindmap_is_optional() {
        let list = brainstorm("onboarding", 3, "list");
        assert_eq!(list["ideas"].as_array().unwrap().len(), 3);
        assert!(list.get("mindmap").is_none());
        assert_eq!(
            list["ideas"][0],
            "💡 Innovative approach: Leverage AI to automate onboarding processes"
        );

        let map = brainstorm("onboarding", 12, "mindmap");
        assert_eq!(map["mindmap"]["branches"].as_array().unwrap().len(), 3);
        assert_eq!(map["ideas"].as_array().unwrap().len(), 12);
    }
}
