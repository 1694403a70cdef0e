use chrono::Utc;

use super::{IdKind, Workspace, pages};
use crate::ai::Transcription;
use crate::models::page::{Block, BlockType, Page};
use crate::models::transcript::{
    ChatMessage, NewSegmentRequest, Segment, Transcript, TranscriptStatus,
};
use crate::services::assistant::{self, format_seconds};

pub fn fetch_transcripts(ws: &Workspace) -> Vec<Transcript> {
    ws.transcripts.clone()
}

pub fn fetch_transcript<'a>(ws: &'a Workspace, id: &str) -> Option<&'a Transcript> {
    ws.transcripts.iter().find(|t| t.id == id)
}

fn blank(id: String) -> Transcript {
    Transcript {
        id,
        name: None,
        filename: None,
        duration: "0:00".to_string(),
        status: TranscriptStatus::Completed,
        segments: Vec::new(),
        full_text: None,
        summary: None,
        action_items: Vec::new(),
        speakers: Vec::new(),
        source: String::new(),
        created_at: Utc::now(),
        ended_at: None,
    }
}

/// Stores the result of a real transcription of an uploaded file.
pub fn insert_transcription(
    ws: &mut Workspace,
    filename: &str,
    transcription: Transcription,
    summary: String,
    action_items: Vec<String>,
) -> Transcript {
    let mut segments: Vec<Segment> = transcription
        .segments
        .iter()
        .map(|s| Segment {
            start: format_seconds(s.start),
            end: format_seconds(s.end),
            speaker: "Speaker".to_string(),
            text: s.text.trim().to_string(),
        })
        .collect();
    if segments.is_empty() {
        segments.push(Segment {
            start: "0:00".to_string(),
            end: "N/A".to_string(),
            speaker: "Speaker".to_string(),
            text: transcription.text.clone(),
        });
    }

    let full_text = segments
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    let mut transcript = blank(ws.next_id(IdKind::Transcript));
    transcript.filename = Some(filename.to_string());
    transcript.duration = transcription
        .duration
        .map(format_seconds)
        .unwrap_or_else(|| "N/A".to_string());
    transcript.segments = segments;
    transcript.full_text = Some(full_text);
    transcript.summary = Some(summary);
    transcript.action_items = action_items;
    transcript.speakers = vec!["Speaker".to_string()];
    transcript.source = "whisper".to_string();

    ws.transcripts.push(transcript.clone());
    transcript
}

/// Stores the fixed sample transcript returned when no transcription
/// backend is configured.
pub fn insert_demo_transcript(ws: &mut Workspace, filename: &str) -> Transcript {
    let lines = [
        ("0:00", "0:15", "Speaker 1", "Welcome everyone to today's meeting. Let's get started with our agenda."),
        ("0:15", "0:32", "Speaker 2", "Thanks for having us. I'd like to discuss the project timeline first."),
        ("0:32", "0:58", "Speaker 1", "Great idea. We're currently on track for the Q2 deadline."),
    ];
    let segments: Vec<Segment> = lines
        .iter()
        .map(|(start, end, speaker, text)| Segment {
            start: start.to_string(),
            end: end.to_string(),
            speaker: speaker.to_string(),
            text: text.to_string(),
        })
        .collect();

    let mut transcript = blank(ws.next_id(IdKind::Transcript));
    transcript.filename = Some(filename.to_string());
    transcript.duration = "3:45".to_string();
    transcript.full_text = Some(
        segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n"),
    );
    transcript.segments = segments;
    transcript.summary = Some(
        "Demo transcript - Add OPENAI_API_KEY environment variable for real transcription."
            .to_string(),
    );
    transcript.action_items = vec!["Set up OpenAI API key for real transcription".to_string()];
    transcript.speakers = vec!["Speaker 1".to_string(), "Speaker 2".to_string()];
    transcript.source = "demo".to_string();

    ws.transcripts.push(transcript.clone());
    transcript
}

pub fn start_meeting(ws: &mut Workspace, name: Option<String>) -> Transcript {
    let mut transcript = blank(ws.next_id(IdKind::Transcript));
    transcript.name = Some(name.unwrap_or_else(|| "Untitled Meeting".to_string()));
    transcript.status = TranscriptStatus::Recording;
    transcript.source = "meeting".to_string();

    ws.transcripts.push(transcript.clone());
    transcript
}

pub fn add_segment(ws: &mut Workspace, id: &str, req: NewSegmentRequest) -> Option<Segment> {
    let transcript = ws.transcripts.iter_mut().find(|t| t.id == id)?;

    let segment = Segment {
        start: req.start.unwrap_or_else(|| "0:00".to_string()),
        end: req.end.unwrap_or_else(|| "0:00".to_string()),
        speaker: req.speaker.unwrap_or_else(|| "Unknown".to_string()),
        text: req.text,
    };
    if !transcript.speakers.contains(&segment.speaker) {
        transcript.speakers.push(segment.speaker.clone());
    }
    transcript.segments.push(segment.clone());
    Some(segment)
}

/// Marks the meeting completed and fills in its text, summary and action items.
pub fn stop_meeting(ws: &mut Workspace, id: &str) -> Option<Transcript> {
    let transcript = ws.transcripts.iter_mut().find(|t| t.id == id)?;

    transcript.status = TranscriptStatus::Completed;
    transcript.ended_at = Some(Utc::now());
    transcript.full_text = Some(
        transcript
            .segments
            .iter()
            .map(|s| format!("[{}]: {}", s.speaker, s.text))
            .collect::<Vec<_>>()
            .join("\n\n"),
    );
    transcript.summary = Some(assistant::meeting_summary(&transcript.segments));
    transcript.action_items = assistant::meeting_action_items();

    Some(transcript.clone())
}

/// Builds a page from a transcript: title heading, info callout, optional
/// summary and action items, then one quote per segment.
pub fn convert_to_page(ws: &mut Workspace, id: &str) -> Option<Page> {
    let transcript = fetch_transcript(ws, id)?.clone();
    let name = transcript.display_name();

    let mut blocks = vec![
        Block::new(BlockType::Heading1, name.clone()),
        Block::callout(
            format!(
                "Recorded: {} | Duration: {} | Speakers: {}",
                transcript.created_at.format("%Y-%m-%d"),
                transcript.duration,
                transcript.speakers.join(", ")
            ),
            "📅",
            "blue",
        ),
    ];

    if let Some(summary) = transcript.summary.as_deref().filter(|s| !s.is_empty()) {
        blocks.push(Block::new(BlockType::Heading2, "Summary"));
        blocks.push(Block::new(BlockType::Text, summary));
    }

    if !transcript.action_items.is_empty() {
        blocks.push(Block::new(BlockType::Heading2, "Action Items"));
        blocks.extend(transcript.action_items.iter().map(|item| Block::todo(item.clone(), false)));
    }

    blocks.push(Block::new(BlockType::Divider, ""));
    blocks.push(Block::new(BlockType::Heading2, "Full Transcript"));
    blocks.extend(transcript.segments.iter().map(|s| {
        Block::new(
            BlockType::Quote,
            format!("<strong>[{}] {}:</strong> {}", s.start, s.speaker, s.text),
        )
    }));

    let page = pages::insert_page(ws, name, "🎤", blocks, "Created from transcript");
    let stored = pages::fetch_page_mut(ws, &page.id)?;
    stored.cover = Some("gradient-purple".to_string());
    Some(stored.clone())
}

pub fn fetch_conversation(ws: &Workspace, conversation_id: &str) -> Vec<ChatMessage> {
    ws.conversations.get(conversation_id).cloned().unwrap_or_default()
}

/// Appends a user message and the assistant's reply to the conversation.
pub fn append_exchange(ws: &mut Workspace, conversation_id: &str, user: &str, reply: &str) {
    let now = Utc::now();
    let thread = ws.conversations.entry(conversation_id.to_string()).or_default();
    thread.push(ChatMessage {
        role: "user".to_string(),
        content: user.to_string(),
        timestamp: now,
    });
    thread.push(ChatMessage {
        role: "assistant".to_string(),
        content: reply.to_string(),
        timestamp: now,
    });
}

pub fn clear_conversation(ws: &mut Workspace, conversation_id: &str) {
    ws.conversations.remove(conversation_id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::TimedText;

    fn segment(speaker: &str, text: &str) -> NewSegmentRequest {
        NewSegmentRequest {
            speaker: Some(speaker.to_string()),
            text: text.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn meeting_lifecycle() {
        let mut ws = Workspace::default();
        let meeting = start_meeting(&mut ws, None);
        assert_eq!(meeting.id, "t1");
        assert_eq!(meeting.name.as_deref(), Some("Untitled Meeting"));
        assert_eq!(meeting.status, TranscriptStatus::Recording);

        add_segment(&mut ws, "t1", segment("Ana", "Kickoff"));
        add_segment(&mut ws, "t1", segment("Ben", "Agenda"));
        add_segment(&mut ws, "t1", segment("Ana", "Wrap up"));
        let added = add_segment(&mut ws, "t1", NewSegmentRequest::default()).unwrap();
        assert_eq!(added.speaker, "Unknown");
        assert_eq!(added.start, "0:00");

        let done = stop_meeting(&mut ws, "t1").unwrap();
        assert_eq!(done.status, TranscriptStatus::Completed);
        assert_eq!(done.speakers, vec!["Ana", "Ben", "Unknown"]);
        assert!(done.full_text.unwrap().starts_with("[Ana]: Kickoff\n\n[Ben]: Agenda"));
        assert_eq!(done.action_items.len(), 5);
        assert!(done.ended_at.is_some());
    }

    #[test]
    fn empty_meeting_has_placeholder_summary() {
        let mut ws = Workspace::default();
        start_meeting(&mut ws, Some("Standup".into()));
        let done = stop_meeting(&mut ws, "t1").unwrap();
        assert_eq!(done.summary.as_deref(), Some("No content to summarize."));
        assert_eq!(done.full_text.as_deref(), Some(""));
    }

    #[test]
    fn transcription_without_segments_keeps_full_text() {
        let mut ws = Workspace::default();
        let t = insert_transcription(
            &mut ws,
            "memo.m4a",
            Transcription {
                text: "just one blob".into(),
                duration: None,
                segments: Vec::new(),
            },
            "s".into(),
            Vec::new(),
        );
        assert_eq!(t.duration, "N/A");
        assert_eq!(t.segments[0].end, "N/A");
        assert_eq!(t.full_text.as_deref(), Some("just one blob"));
        assert_eq!(t.source, "whisper");
    }

    #[test]
    fn transcription_segments_are_timestamped() {
        let mut ws = Workspace::default();
        let t = insert_transcription(
            &mut ws,
            "talk.mp3",
            Transcription {
                text: "a b".into(),
                duration: Some(75.0),
                segments: vec![
                    TimedText { start: 0.0, end: 61.2, text: " a ".into() },
                    TimedText { start: 61.2, end: 75.0, text: "b".into() },
                ],
            },
            "s".into(),
            vec!["x".into()],
        );
        assert_eq!(t.duration, "1:15");
        assert_eq!(t.segments[0].end, "1:01");
        assert_eq!(t.full_text.as_deref(), Some("a\n\nb"));
    }

    #[test]
    fn transcript_page_layout() {
        let mut ws = Workspace::default();
        start_meeting(&mut ws, Some("Sync".into()));
        add_segment(&mut ws, "t1", segment("Ana", "Ship it"));
        stop_meeting(&mut ws, "t1");

        let page = convert_to_page(&mut ws, "t1").unwrap();
        assert_eq!(page.title, "Sync");
        assert_eq!(page.icon, "🎤");
        assert_eq!(page.cover.as_deref(), Some("gradient-purple"));
        assert_eq!(page.blocks[0].kind, BlockType::Heading1);
        assert_eq!(page.blocks[1].kind, BlockType::Callout);
        assert_eq!(page.blocks[2].content, "Summary");
        let last = page.blocks.last().unwrap();
        assert_eq!(last.kind, BlockType::Quote);
        assert_eq!(last.content, "<strong>[0:00] Ana:</strong> Ship it");
        assert!(convert_to_page(&mut ws, "t9").is_none());
    }

    #[test]
    fn conversation_is_per_id() {
        let mut ws = Workspace::default();
        append_exchange(&mut ws, "1", "hi", "hello");
        assert_eq!(fetch_conversation(&ws, "1").len(), 2);
        assert!(fetch_conversation(&ws, "2").is_empty());
        clear_conversation(&mut ws, "1");
        assert!(fetch_conversation(&ws, "1").is_empty());
    }
}
