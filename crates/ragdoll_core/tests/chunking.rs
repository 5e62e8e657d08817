use pretty_assertions::assert_eq;
use ragdoll_core::chunk::split_text;

/// Every chunk must be a contiguous substring of the input, chunks must
/// appear in input order, consecutive chunks must leave no gap, and the last
/// chunk must reach the end of the input.
fn assert_covers(text: &str, chunks: &[String]) {
    assert!(!chunks.is_empty(), "no chunks for non-empty input");
    let mut prev_end = 0usize;
    for (i, chunk) in chunks.iter().enumerate() {
        // Latest occurrence starting at or before the previous chunk's end;
        // anything later would leave a gap. Repetitive inputs can match a
        // chunk in several places, so scan from the back.
        let start = (0..=prev_end.min(text.len()))
            .rev()
            .find(|&p| text.is_char_boundary(p) && text[p..].starts_with(chunk.as_str()))
            .unwrap_or_else(|| panic!("chunk {i} leaves a gap before byte {prev_end}"));
        if i == 0 {
            assert_eq!(start, 0, "first chunk must start the input");
        }
        prev_end = start + chunk.len();
    }
    assert_eq!(prev_end, text.len(), "last chunk must end the input");
}

fn sample_text() -> String {
    let mut text = String::new();
    for p in 0..12 {
        for w in 0..10 {
            text.push_str(&format!("para{p:02}word{w:02} "));
        }
        text.push_str("\n\n");
    }
    text
}

#[test]
fn chunking_is_total_and_ordered() {
    let text = sample_text();
    let chunks = split_text(&text, 120, 30).expect("split");
    assert!(chunks.len() > 1);
    for chunk in &chunks {
        assert!(chunk.chars().count() <= 120, "chunk over max: {}", chunk.len());
    }
    assert_covers(&text, &chunks);
}

#[test]
fn consecutive_chunks_share_the_overlap_tail() {
    let text = "alpha beta gamma delta epsilon zeta eta theta iota kappa lambda mu nu xi".repeat(4);
    let chunks = split_text(&text, 60, 12).expect("split");
    assert!(chunks.len() > 2);
    for pair in chunks.windows(2) {
        let tail: String = {
            let chars: Vec<char> = pair[0].chars().collect();
            chars[chars.len() - 12..].iter().collect()
        };
        assert!(
            pair[1].starts_with(&tail),
            "next chunk does not start with the previous tail: {:?} vs {:?}",
            tail,
            &pair[1][..tail.len().min(pair[1].len())]
        );
    }
}

#[test]
fn oversize_atomic_unit_falls_back_to_character_splits() {
    let word = "x".repeat(350);
    let chunks = split_text(&word, 100, 10).expect("split");
    for chunk in &chunks {
        assert!(chunk.chars().count() <= 100);
    }
    assert_covers(&word, &chunks);
}

#[test]
fn paragraph_boundaries_are_preferred() {
    let text = "short first paragraph\n\nshort second paragraph";
    let chunks = split_text(text, 30, 5).expect("split");
    // Each paragraph fits under the max, so the split lands on the blank line.
    assert_eq!(chunks[0], "short first paragraph\n\n");
    assert_covers(text, &chunks);
}

#[test]
fn input_under_max_is_a_single_chunk() {
    let chunks = split_text("tiny input", 1000, 200).expect("split");
    assert_eq!(chunks, vec!["tiny input".to_string()]);
}

#[test]
fn empty_input_yields_no_chunks() {
    let chunks = split_text("", 1000, 200).expect("split");
    assert!(chunks.is_empty());
}

#[test]
fn rejects_overlap_not_smaller_than_max() {
    let err = split_text("text", 100, 100).expect_err("should fail");
    assert_eq!(err.code, "CONFIG_INVALID");
    let err = split_text("text", 0, 0).expect_err("should fail");
    assert_eq!(err.code, "CONFIG_INVALID");
}

#[test]
fn chunking_is_deterministic() {
    let text = sample_text();
    let a = split_text(&text, 90, 20).expect("split");
    let b = split_text(&text, 90, 20).expect("split");
    assert_eq!(a, b);
}

#[test]
fn multibyte_input_never_splits_inside_a_character() {
    let text = "ความหนืดของแมว เพิ่มขึ้น ภายใต้ความเครียด ".repeat(30);
    let chunks = split_text(&text, 50, 10).expect("split");
    for chunk in &chunks {
        assert!(chunk.chars().count() <= 50);
    }
    assert_covers(&text, &chunks);
}
