pub mod assistant;
pub mod directory;
pub mod knowledge;
pub mod markdown;
pub mod study;
pub mod syllabus;
pub mod templates;
pub mod writing;

/// The first `max_chars` characters of `text`, never splitting a character.
pub fn clip(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
