//! Markdown section extraction.

use std::sync::LazyLock;

use beacon_core::models::Section;
use regex::Regex;

use crate::normalize::normalize_text;

static ATX_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ {0,3}(#{1,6})(?:[ \t]+(.*?))?[ \t]*$").expect("valid pattern")
});

static FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ {0,3}(```|~~~)").expect("valid pattern"));

/// Split markdown at ATX headings.
///
/// Text before the first heading becomes a level-0 section with an empty
/// heading. Lines inside fenced code blocks are never treated as headings.
/// Sections with neither heading nor body are dropped.
pub fn parse_markdown_sections(markdown: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut level = 0u8;
    let mut heading = String::new();
    let mut body: Vec<&str> = Vec::new();
    let mut fence: Option<&str> = None;

    for line in markdown.lines() {
        if let Some(m) = FENCE.captures(line) {
            let marker = m.get(1).map_or("", |g| g.as_str());
            fence = match fence {
                None => Some(marker),
                Some(open) if open == marker => None,
                other => other,
            };
            body.push(line);
            continue;
        }
        if fence.is_none() {
            if let Some(caps) = ATX_HEADING.captures(line) {
                push_section(&mut sections, level, &heading, &body);
                level = caps.get(1).map_or(1, |g| g.as_str().len() as u8);
                heading = caps
                    .get(2)
                    .map_or("", |g| g.as_str())
                    .trim_end_matches('#')
                    .trim()
                    .to_string();
                body.clear();
                continue;
            }
        }
        body.push(line);
    }
    push_section(&mut sections, level, &heading, &body);
    sections
}

fn push_section(sections: &mut Vec<Section>, level: u8, heading: &str, body: &[&str]) {
    let section = Section::new(level, heading, normalize_text(&body.join("\n")));
    if !section.is_blank() {
        sections.push(section);
    }
}

/// Flat rendering of sections, separated by blank lines.
pub fn plain_text(sections: &[Section]) -> String {
    sections
        .iter()
        .map(Section::text)
        .filter(|t| !t.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preamble_is_level_zero() {
        let sections = parse_markdown_sections("intro text\n\n# Title\nbody");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0], Section::new(0, "", "intro text"));
        assert_eq!(sections[1], Section::new(1, "Title", "body"));
    }

    #[test]
    fn heading_levels_and_closing_hashes() {
        let sections = parse_markdown_sections("## Access ##\nBus 12\n### Parking\nLot B");
        assert_eq!(sections[0].level, 2);
        assert_eq!(sections[0].heading, "Access");
        assert_eq!(sections[1].level, 3);
        assert_eq!(sections[1].body, "Lot B");
    }

    #[test]
    fn hashes_without_space_are_body_text() {
        let sections = parse_markdown_sections("# Real\n#hashtag line");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].body, "#hashtag line");
    }

    #[test]
    fn fenced_code_is_not_split() {
        let md = "# Setup\n```sh\n# not a heading\nmake\n```\nafter";
        let sections = parse_markdown_sections(md);
        assert_eq!(sections.len(), 1);
        assert!(sections[0].body.contains("# not a heading"));
        assert!(sections[0].body.ends_with("after"));
    }

    #[test]
    fn heading_without_body_is_kept_and_blank_preamble_dropped() {
        let sections = parse_markdown_sections("\n\n# Lonely\n");
        assert_eq!(sections, vec![Section::new(1, "Lonely", "")]);
    }

    #[test]
    fn plain_text_joins_with_blank_lines() {
        let sections = vec![Section::new(0, "", "pre"), Section::new(1, "H", "b")];
        assert_eq!(plain_text(&sections), "pre\n\nH\nb");
    }
}
