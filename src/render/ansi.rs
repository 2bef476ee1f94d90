//! Text-mode renderer — serializes display segments to ANSI lines.

use colored::Colorize;

use super::Segment;

/// Render segments to a styled string ready for the terminal.
///
/// Heading and bullet segments are block-level and always close their
/// line; emphasis stays inline with the plain text around it.
pub fn render(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Heading(title) => {
                end_line(&mut out);
                out.push_str(&title.yellow().bold().to_string());
                out.push('\n');
            }
            Segment::Bullets(items) => {
                end_line(&mut out);
                for item in items {
                    out.push_str(&format!("  {} {}\n", "•".green(), item));
                }
            }
            Segment::Emphasis(text) => {
                out.push_str(&text.cyan().bold().to_string());
            }
            Segment::Plain(text) => {
                out.push_str(text);
            }
        }
    }
    end_line(&mut out);
    out
}

fn end_line(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::format;

    #[test]
    fn test_bullets_render_one_line_each() {
        let out = render(&format("- item one\n- item two"));
        assert!(out.contains("item one"));
        assert!(out.contains("item two"));
        assert!(out.contains('•'));
        assert_eq!(out.trim_end().lines().count(), 2);
    }

    #[test]
    fn test_inline_emphasis_stays_on_one_line() {
        let out = render(&format("You did *great* today"));
        assert!(out.contains("great"));
        assert_eq!(out.trim_end().lines().count(), 1);
    }

    #[test]
    fn test_heading_closes_its_line() {
        let out = render(&format("Homework:\nPage 12."));
        assert!(out.contains("Homework"));
        assert!(out.contains("Page 12."));
        assert_eq!(out.trim_end().lines().count(), 2);
    }

    #[test]
    fn test_output_ends_with_newline() {
        let out = render(&format("plain text"));
        assert!(out.ends_with('\n'));
    }
}
