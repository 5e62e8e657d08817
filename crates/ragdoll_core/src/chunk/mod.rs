use crate::error::AppError;

/// Separator ladder, highest priority first. The empty separator is the
/// terminal fallback: split at character boundaries.
const SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

/// Split `text` into chunks of at most `max_size` characters, where
/// consecutive chunks share roughly `overlap` trailing/leading characters.
///
/// Splitting prefers the highest-priority separator that keeps pieces under
/// `max_size` and falls back down the ladder for oversize atomic units. No
/// character of the input is dropped: every chunk is a contiguous substring
/// of `text` and consecutive chunks cover the input without gaps.
///
/// Deterministic for a given input and parameters.
pub fn split_text(text: &str, max_size: usize, overlap: usize) -> Result<Vec<String>, AppError> {
    if max_size == 0 {
        return Err(AppError::new("CONFIG_INVALID", "max_size must be positive"));
    }
    if overlap >= max_size {
        return Err(
            AppError::new("CONFIG_INVALID", "overlap must be smaller than max_size")
                .with_details(format!("max_size={max_size}; overlap={overlap}")),
        );
    }
    if text.is_empty() {
        return Ok(Vec::new());
    }
    let fragments = fragment(text, max_size, &SEPARATORS);
    Ok(merge_fragments(&fragments, max_size, overlap))
}

/// Recursively break `text` into fragments of at most `max_size` characters,
/// trying each separator in priority order. Separators stay attached to the
/// preceding fragment so reassembly loses nothing.
fn fragment(text: &str, max_size: usize, seps: &[&str]) -> Vec<String> {
    if char_len(text) <= max_size {
        return vec![text.to_string()];
    }
    let (sep, rest) = match seps.split_first() {
        Some(pair) => pair,
        None => return vec![text.to_string()],
    };
    if sep.is_empty() {
        return split_chars(text, max_size);
    }
    let pieces = split_keep_sep(text, sep);
    if pieces.len() == 1 {
        // Separator absent; try the next one.
        return fragment(text, max_size, rest);
    }
    let mut out = Vec::new();
    for piece in pieces {
        if char_len(&piece) <= max_size {
            out.push(piece);
        } else {
            out.extend(fragment(&piece, max_size, rest));
        }
    }
    out
}

/// Greedily pack fragments into chunks, seeding each new chunk with the
/// previous chunk's `overlap`-character tail. The carry is dropped when it
/// would not leave room for the incoming fragment.
fn merge_fragments(fragments: &[String], max_size: usize, overlap: usize) -> Vec<String> {
    let mut chunks: Vec<String> = Vec::new();
    let mut buf = String::new();
    let mut buf_chars = 0usize;
    let mut carry_chars = 0usize;

    for frag in fragments {
        let frag_chars = char_len(frag);
        if buf_chars > 0 && buf_chars + frag_chars > max_size {
            chunks.push(buf.clone());
            buf = char_tail(&buf, overlap);
            buf_chars = char_len(&buf);
            carry_chars = buf_chars;
            if buf_chars + frag_chars > max_size {
                buf.clear();
                buf_chars = 0;
                carry_chars = 0;
            }
        }
        buf.push_str(frag);
        buf_chars += frag_chars;
    }
    // A trailing buffer that is pure carry repeats content already emitted.
    if buf_chars > carry_chars {
        chunks.push(buf);
    }
    chunks
}

fn split_keep_sep(text: &str, sep: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut rest = text;
    while let Some(idx) = rest.find(sep) {
        let end = idx + sep.len();
        out.push(rest[..end].to_string());
        rest = &rest[end..];
    }
    if !rest.is_empty() {
        out.push(rest.to_string());
    }
    out
}

fn split_chars(text: &str, max_size: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(max_size)
        .map(|window| window.iter().collect())
        .collect()
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn char_tail(s: &str, n: usize) -> String {
    if n == 0 {
        return String::new();
    }
    let count = char_len(s);
    if count <= n {
        return s.to_string();
    }
    s.chars().skip(count - n).collect()
}
