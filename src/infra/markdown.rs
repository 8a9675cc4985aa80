//! Shared CommonMark parser settings and small event-stream helpers.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag as MdTag};

/// Parser options used everywhere a note body is read.
///
/// The reference extractor and the HTML converter must agree on what counts
/// as a link, so both go through this function.
pub fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

/// Returns the text of the first non-empty level-1 heading.
///
/// Only ATX headings (`# Title`) count; setext underlines do not. Headings
/// in code blocks are not headings, and inline markup is reduced to its text.
pub fn first_heading(body: &str) -> Option<String> {
    let mut in_heading = false;
    let mut text = String::new();

    for (event, range) in Parser::new_ext(body, options()).into_offset_iter() {
        match event {
            Event::Start(MdTag::Heading(HeadingLevel::H1, _, _)) if is_atx(&body[range]) => {
                in_heading = true;
                text.clear();
            }
            Event::End(MdTag::Heading(HeadingLevel::H1, _, _)) if in_heading => {
                in_heading = false;
                let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
                if !collapsed.is_empty() {
                    return Some(collapsed);
                }
            }
            Event::Text(t) | Event::Code(t) if in_heading => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak if in_heading => text.push(' '),
            _ => {}
        }
    }

    None
}

/// True when the heading source opens with a `#` marker.
fn is_atx(source: &str) -> bool {
    source
        .trim_start()
        .strip_prefix('#')
        .is_some_and(|rest| rest.is_empty() || rest.starts_with([' ', '\t', '\n', '\r']))
}
