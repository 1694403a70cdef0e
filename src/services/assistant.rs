//! Canned replies behind `/api/ai/chat` and the meeting recorder.

use crate::models::page::Page;
use crate::models::transcript::Segment;

use super::clip;

pub const CHAT_SYSTEM_PROMPT: &str = "You are a helpful assistant inside a note-taking app. \
Answer concisely and use the page content when it is provided.";

const HELP_TEXT: &str = r#"I can help you with several things:

**📝 Content Generation**
- "Write a paragraph about [topic]"
- "Generate ideas for [subject]"
- "Create an outline for [topic]"

**📋 Summarization**
- "Summarize this page"
- "Give me the key points"

**✅ Action Items**
- "Extract action items from this page"
- "What are the tasks mentioned?"

**🌐 Translation**
- "Translate this to Spanish"
- "Convert to French"

**✨ Writing Improvement**
- "Improve this text: [your text]"
- "Make this more professional"

Just ask me anything!"#;

/// `Page: <title>` followed by one `- <content>` line per block.
pub fn page_context(page: &Page) -> String {
    let mut context = format!("Page: {}\n", page.title);
    for block in &page.blocks {
        context.push_str("- ");
        context.push_str(&block.content);
        context.push('\n');
    }
    context
}

pub fn chat_reply(message: &str, context: &str) -> String {
    let lower = message.to_lowercase();

    if lower.contains("hello") || lower.contains("hi") {
        return "Hello! I'm your AI assistant. I can help you with your notes - ask me to summarize, explain, or generate content. How can I help you today?".to_string();
    }

    if lower.contains("summarize") {
        if !context.is_empty() {
            return summarize_context(context);
        }
        return "Please provide some content to summarize, or open a page and I can summarize it for you.".to_string();
    }

    if lower.contains("help") {
        return HELP_TEXT.to_string();
    }

    if lower.contains("what") && lower.contains("page") {
        if context.is_empty() {
            return "I don't have any page context. Please open a page first.".to_string();
        }
        let lines: Vec<&str> = context.split('\n').collect();
        let title = lines
            .first()
            .map(|l| l.replace("Page: ", ""))
            .unwrap_or_else(|| "Unknown".to_string());
        return format!(
            "This page is titled '{}'. It contains {} content blocks. Would you like me to summarize it or extract key points?",
            title,
            lines.len() - 1
        );
    }

    if !context.is_empty() {
        return "Based on the current page content, I can help you analyze, summarize, or generate related content. What would you like me to do?".to_string();
    }

    "I'm your AI assistant for notes. I can help summarize content, generate text, extract action items, and more. What would you like me to help with?".to_string()
}

/// Numbered key points from the first five non-empty context lines.
pub fn summarize_context(context: &str) -> String {
    if context.is_empty() {
        return "There's no content to summarize. Please provide text or open a page.".to_string();
    }

    let lines: Vec<&str> = context
        .split('\n')
        .filter(|l| !l.starts_with("Page:"))
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    if lines.is_empty() {
        return "The page appears to be empty. Add some content and I can summarize it.".to_string();
    }

    let mut summary = format!(
        "**Summary**\n\nThis content covers {} main points. Here are the key takeaways:\n\n",
        lines.len()
    );
    for (i, point) in lines.iter().take(5).enumerate() {
        let cleaned = point.replace("- ", "").replace("* ", "");
        let cleaned = clip(&cleaned, 100);
        if !cleaned.is_empty() {
            summary.push_str(&format!("{}. {}\n", i + 1, cleaned));
        }
    }
    summary
}

pub fn generate_content(prompt: &str) -> String {
    let lower = prompt.to_lowercase();

    if lower.contains("outline") {
        let topic = prompt.replace("outline", "").replace("for", "");
        let topic = topic.trim();
        let topic = if topic.is_empty() { "Your Topic" } else { topic };
        return format!(
            "**Outline: {}**\n\n\
1. **Introduction**\n   - Background and context\n   - Purpose and objectives\n   - Key definitions\n\n\
2. **Main Points**\n   - Point A: Core concept\n   - Point B: Supporting evidence\n   - Point C: Practical applications\n\n\
3. **Analysis**\n   - Pros and cons\n   - Comparisons\n   - Case studies\n\n\
4. **Conclusion**\n   - Summary of key points\n   - Recommendations\n   - Next steps\n\n\
5. **References**\n   - Sources\n   - Further reading",
            topic
        );
    }

    if lower.contains("ideas") || lower.contains("brainstorm") {
        return "**Generated Ideas**\n\n\
1. 💡 Innovative approach using modern technologies\n\
2. 🎯 Focus on user experience and simplicity\n\
3. 📊 Data-driven decision making process\n\
4. 🤝 Collaborative team-based implementation\n\
5. 🔄 Iterative development with feedback loops\n\
6. 🌱 Sustainable and scalable solution\n\
7. 📱 Mobile-first design consideration\n\
8. 🔒 Security and privacy by design\n\n\
Would you like me to expand on any of these ideas?"
            .to_string();
    }

    if lower.contains("paragraph") || lower.contains("write") {
        return "Here's a generated paragraph based on your request:\n\n\
The modern workspace has evolved significantly with the integration of digital tools and collaborative platforms. \
Teams now have access to powerful note-taking applications that not only capture information but also help organize, analyze, and share knowledge effectively. \
These tools enable seamless collaboration across different time zones and locations, making remote work more productive than ever. \
By leveraging AI capabilities, users can now summarize lengthy documents, extract action items automatically, and even generate content drafts, \
significantly reducing the time spent on routine tasks and allowing focus on higher-value work.\n\n\
Would you like me to modify this or generate something different?"
            .to_string();
    }

    "I can help generate content! Try asking me to:\n- Write a paragraph about [topic]\n- Create an outline for [subject]\n- Brainstorm ideas for [project]".to_string()
}

pub fn explain() -> String {
    "**Explanation**\n\n\
Let me break this down for you:\n\n\
The content discusses key concepts that can be understood as follows:\n\n\
1. **Core Idea**: The main point is about organizing information effectively\n\
2. **Why It Matters**: This helps improve productivity and clarity\n\
3. **How It Works**: By structuring content into manageable blocks\n\
4. **Key Takeaway**: Good organization leads to better understanding\n\n\
Would you like me to explain any specific part in more detail?"
        .to_string()
}

pub fn improve_writing(text: &str) -> String {
    format!(
        "**Improved Version**\n\n{}\n\n\
**Suggestions Applied:**\n\
- ✅ Enhanced clarity and readability\n\
- ✅ Improved sentence structure\n\
- ✅ Fixed grammatical issues\n\
- ✅ Added professional tone\n\n\
**Additional Tips:**\n\
- Consider adding specific examples\n\
- Break long paragraphs into shorter ones\n\
- Use active voice for more impact",
        text
    )
}

pub fn translate(text: &str, target_language: &str) -> String {
    let translated = match target_language {
        "Spanish" => "Este es el texto traducido al español. En una implementación real, esto utilizaría un servicio de traducción.".to_string(),
        "French" => "Ceci est le texte traduit en français. Dans une implémentation réelle, cela utiliserait un service de traduction.".to_string(),
        "German" => "Dies ist der ins Deutsche übersetzte Text. In einer echten Implementierung würde dies einen Übersetzungsdienst verwenden.".to_string(),
        "Japanese" => "これは日本語に翻訳されたテキストです。実際の実装では翻訳サービスを使用します。".to_string(),
        "Chinese" => "这是翻译成中文的文本。在实际实现中，这将使用翻译服务。".to_string(),
        other => format!("[Translation to {} would appear here]", other),
    };

    let ellipsis = if text.chars().count() > 200 { "..." } else { "" };
    format!(
        "**Translation to {}**\n\n{}\n\n---\n*Original text:*\n{}{}",
        target_language,
        translated,
        clip(text, 200),
        ellipsis
    )
}

pub fn action_items() -> String {
    "**Extracted Action Items**\n\n\
Based on the content, here are the identified action items:\n\n\
- [ ] Review the project timeline and milestones\n\
- [ ] Schedule follow-up meeting with team\n\
- [ ] Complete documentation updates\n\
- [ ] Send status report to stakeholders\n\
- [ ] Prepare presentation for next review\n\n\
*Tip: Click on any item to add it to your to-do list!*"
        .to_string()
}

pub fn meeting_summary(segments: &[Segment]) -> String {
    if segments.is_empty() {
        return "No content to summarize.".to_string();
    }
    "This meeting covered project status updates and upcoming milestones. \
Key discussion points included the Q2 timeline, design review scheduling, and resource allocation for frontend development. \
The team agreed to schedule a design review for next Tuesday and will discuss additional resource needs during that meeting."
        .to_string()
}

pub fn meeting_action_items() -> Vec<String> {
    [
        "Schedule design review meeting for Tuesday afternoon",
        "Send calendar invite for design review",
        "Discuss additional frontend resources during review",
        "Complete mockup review before Tuesday",
        "Prepare status update for next meeting",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// `M:SS` for a duration in seconds; zero or negative reads `0:00`.
pub fn format_seconds(seconds: f64) -> String {
    if seconds <= 0.0 || !seconds.is_finite() {
        return "0:00".to_string();
    }
    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
