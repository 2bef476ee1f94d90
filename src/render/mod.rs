//! Presentation adapter — turns raw reply text into display segments.
//!
//! [`format`] is a pure function: same input, same segments, no side
//! effects. Malformed markup never fails; worst case a line degrades to a
//! plain segment. Renderers (the ANSI one here, or a graphical surface)
//! consume the segments without re-parsing the text.

pub mod ansi;

/// A typed span of formatted reply text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A `#`-marked or colon-terminated heading line, markers stripped.
    Heading(String),
    /// An emphasized inline span, markers stripped.
    Emphasis(String),
    /// A group of contiguous bullet items, markers stripped.
    Bullets(Vec<String>),
    /// Unformatted text; contiguous plain lines share one segment.
    Plain(String),
}

const EMPHASIS_MARKERS: [&str; 2] = ["**", "*"];

/// Parse reply text into ordered display segments.
pub fn format(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut bullets: Vec<String> = Vec::new();
    let mut plain: Vec<String> = Vec::new();

    for line in text.lines() {
        if let Some(item) = bullet_item(line) {
            flush_plain(&mut plain, &mut segments);
            bullets.push(item);
            continue;
        }
        flush_bullets(&mut bullets, &mut segments);

        if line.trim().is_empty() {
            // Blank lines break bullet groups but stay inside a plain run.
            if !plain.is_empty() {
                plain.push(String::new());
            }
            continue;
        }

        if let Some(title) = heading_text(line) {
            flush_plain(&mut plain, &mut segments);
            segments.push(Segment::Heading(title));
            continue;
        }

        let mut spans = parse_inline(line);
        if spans.len() == 1 && matches!(spans[0], Segment::Plain(_)) {
            if let Some(Segment::Plain(text)) = spans.pop() {
                plain.push(text);
            }
        } else {
            flush_plain(&mut plain, &mut segments);
            let trailing = match spans.last() {
                Some(Segment::Plain(_)) => match spans.pop() {
                    Some(Segment::Plain(text)) => text,
                    _ => String::new(),
                },
                _ => String::new(),
            };
            segments.extend(spans);
            // The line's trailing plain text seeds the next run, so
            // following plain lines start on a fresh line after the
            // emphasis.
            plain.push(trailing);
        }
    }

    flush_bullets(&mut bullets, &mut segments);
    flush_plain(&mut plain, &mut segments);
    segments
}

fn flush_bullets(bullets: &mut Vec<String>, segments: &mut Vec<Segment>) {
    if !bullets.is_empty() {
        segments.push(Segment::Bullets(std::mem::take(bullets)));
    }
}

fn flush_plain(run: &mut Vec<String>, segments: &mut Vec<Segment>) {
    if run.is_empty() {
        return;
    }
    let text = run.join("\n");
    run.clear();
    if text.trim().is_empty() {
        return;
    }
    segments.push(Segment::Plain(text.trim_end().to_string()));
}

/// Classify a line as a bullet item and return its text.
///
/// Recognized markers: `- `, `* `, and `1.`-style ordinals followed by a
/// space. A bare `*word*` line is emphasis, not a bullet.
fn bullet_item(line: &str) -> Option<String> {
    let trimmed = line.trim_start();
    for marker in ["- ", "* "] {
        if let Some(rest) = trimmed.strip_prefix(marker) {
            return Some(rest.trim().to_string());
        }
    }
    let digits = trimmed.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        if let Some(rest) = trimmed[digits..].strip_prefix('.') {
            if rest.is_empty() || rest.starts_with(' ') {
                return Some(rest.trim().to_string());
            }
        }
    }
    None
}

/// Classify a line as a heading and return its title.
///
/// Headings are `#`-prefixed lines or lines ending in a colon with
/// nothing after it.
fn heading_text(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.starts_with('#') {
        let title = trimmed.trim_start_matches('#').trim();
        if title.is_empty() {
            return None;
        }
        return Some(title.to_string());
    }
    if let Some(body) = trimmed.strip_suffix(':') {
        let body = body.trim();
        if !body.is_empty() && !body.ends_with(':') {
            return Some(body.to_string());
        }
    }
    None
}

/// Split one line into alternating plain and emphasis spans.
fn parse_inline(line: &str) -> Vec<Segment> {
    let mut spans = Vec::new();
    let mut literal = String::new();
    let mut rest = line;

    while !rest.is_empty() {
        match find_emphasis(rest) {
            Some((start, inner, after)) => {
                literal.push_str(&rest[..start]);
                if !literal.is_empty() {
                    spans.push(Segment::Plain(std::mem::take(&mut literal)));
                }
                spans.push(Segment::Emphasis(inner.to_string()));
                rest = after;
            }
            None => {
                literal.push_str(rest);
                rest = "";
            }
        }
    }
    if !literal.is_empty() {
        spans.push(Segment::Plain(literal));
    }
    spans
}

/// Find the first well-formed emphasis span in `s`.
///
/// Returns (bytes before the opener, inner text, remainder after the
/// closer). Empty or space-padded inner text does not count, so unmatched
/// and stray markers stay literal.
fn find_emphasis(s: &str) -> Option<(usize, &str, &str)> {
    let mut best: Option<(usize, &str, &str)> = None;
    for marker in EMPHASIS_MARKERS {
        let Some(open) = s.find(marker) else { continue };
        let after_open = &s[open + marker.len()..];
        let Some(close) = after_open.find(marker) else {
            continue;
        };
        let inner = &after_open[..close];
        if inner.is_empty() || inner != inner.trim() {
            continue;
        }
        let rest = &after_open[close + marker.len()..];
        if best.map_or(true, |(b, _, _)| open < b) {
            best = Some((open, inner, rest));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullet_group_then_plain() {
        let segments = format("- item one\n- item two\nPlain line");
        assert_eq!(
            segments,
            vec![
                Segment::Bullets(vec!["item one".to_string(), "item two".to_string()]),
                Segment::Plain("Plain line".to_string()),
            ]
        );
    }

    #[test]
    fn test_hash_heading() {
        let segments = format("# Algebra Basics\nLet's begin.");
        assert_eq!(
            segments,
            vec![
                Segment::Heading("Algebra Basics".to_string()),
                Segment::Plain("Let's begin.".to_string()),
            ]
        );
    }

    #[test]
    fn test_colon_heading() {
        let segments = format("Homework:\n- page 12");
        assert_eq!(
            segments,
            vec![
                Segment::Heading("Homework".to_string()),
                Segment::Bullets(vec!["page 12".to_string()]),
            ]
        );
    }

    #[test]
    fn test_colon_mid_line_is_plain() {
        let segments = format("Remember: practice daily.");
        assert_eq!(
            segments,
            vec![Segment::Plain("Remember: practice daily.".to_string())]
        );
    }

    #[test]
    fn test_inline_emphasis_spans() {
        let segments = format("You did *great* today");
        assert_eq!(
            segments,
            vec![
                Segment::Plain("You did ".to_string()),
                Segment::Emphasis("great".to_string()),
                Segment::Plain(" today".to_string()),
            ]
        );
    }

    #[test]
    fn test_double_marker_emphasis() {
        let segments = format("**Pop quiz!**");
        assert_eq!(segments, vec![Segment::Emphasis("Pop quiz!".to_string())]);
    }

    #[test]
    fn test_unmatched_marker_stays_literal() {
        let segments = format("3 * 4 is twelve");
        assert_eq!(
            segments,
            vec![Segment::Plain("3 * 4 is twelve".to_string())]
        );
    }

    #[test]
    fn test_numbered_bullets_group_with_dashed() {
        let segments = format("1. carry the one\n- check your work");
        assert_eq!(
            segments,
            vec![Segment::Bullets(vec![
                "carry the one".to_string(),
                "check your work".to_string(),
            ])]
        );
    }

    #[test]
    fn test_decimal_number_is_not_a_bullet() {
        let segments = format("3.14 is close to pi");
        assert_eq!(
            segments,
            vec![Segment::Plain("3.14 is close to pi".to_string())]
        );
    }

    #[test]
    fn test_emphasis_line_is_not_a_bullet() {
        let segments = format("*important*");
        assert_eq!(segments, vec![Segment::Emphasis("important".to_string())]);
    }

    #[test]
    fn test_plain_lines_merge_into_one_segment() {
        let segments = format("First line.\nSecond line.\n\nThird paragraph.");
        assert_eq!(
            segments,
            vec![Segment::Plain(
                "First line.\nSecond line.\n\nThird paragraph.".to_string()
            )]
        );
    }

    #[test]
    fn test_idempotent() {
        let text = "# Quiz\n- one\n*two*\nplain";
        assert_eq!(format(text), format(text));
    }

    #[test]
    fn test_blank_line_splits_bullet_groups() {
        let segments = format("- a\n\n- b");
        assert_eq!(
            segments,
            vec![
                Segment::Bullets(vec!["a".to_string()]),
                Segment::Bullets(vec!["b".to_string()]),
            ]
        );
    }

    #[test]
    fn test_empty_input_yields_no_segments() {
        assert!(format("").is_empty());
        assert!(format("\n\n").is_empty());
    }

    #[test]
    fn test_plain_line_after_emphasis_line_stays_separate_line() {
        let segments = format("I *love* math\nKeep going");
        assert_eq!(
            segments,
            vec![
                Segment::Plain("I ".to_string()),
                Segment::Emphasis("love".to_string()),
                Segment::Plain(" math\nKeep going".to_string()),
            ]
        );
    }
}
