//! Outbound message chunking
//!
//! Discord rejects messages over 2000 characters. Model replies occasionally
//! run past that, so they are split at line boundaries where possible and at
//! character boundaries otherwise.

/// Discord message content limit
pub const MESSAGE_LIMIT: usize = 2000;

/// Split `text` into pieces no longer than [`MESSAGE_LIMIT`] bytes.
///
/// Prefers breaking at newlines; a single line longer than the limit is cut
/// at char boundaries. Empty input yields no chunks.
pub fn chunk_for_message(text: &str) -> Vec<String> {
    chunk_text(text, MESSAGE_LIMIT)
}

fn chunk_text(text: &str, max_len: usize) -> Vec<String> {
    let text = text.trim_end();
    if text.is_empty() {
        return Vec::new();
    }
    if text.len() <= max_len {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    for line in text.lines() {
        if !current.is_empty() && current.len() + 1 + line.len() > max_len {
            chunks.push(std::mem::take(&mut current));
        }
        if line.len() > max_len {
            // Oversized line: cut at char boundaries.
            for ch in line.chars() {
                if current.len() + ch.len_utf8() > max_len {
                    chunks.push(std::mem::take(&mut current));
                }
                current.push(ch);
            }
        } else {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
