use regex::Regex;
use std::sync::OnceLock;

fn block_regex() -> &'static Regex {
    static BLOCKS: OnceLock<Regex> = OnceLock::new();
    BLOCKS.get_or_init(|| {
        Regex::new(r"(?is)<!--.*?-->|<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>")
            .expect("valid block regex")
    })
}

fn tag_regex() -> &'static Regex {
    static TAGS: OnceLock<Regex> = OnceLock::new();
    // A tag opens with a name, `/`, `!` or `?`; a bare or unclosed `<` is text
    TAGS.get_or_init(|| Regex::new(r"(?s)<[A-Za-z/!?][^>]*>").expect("valid tag regex"))
}

/// Remove all markup, including script/style bodies and comments
pub fn strip_tags(html: &str) -> String {
    let without_blocks = block_regex().replace_all(html, "");
    tag_regex().replace_all(&without_blocks, "").into_owned()
}

/// Named entities recognised besides numeric references
const NAMED_ENTITIES: &[(&str, &str)] = &[
    ("amp", "&"),
    ("lt", "<"),
    ("gt", ">"),
    ("quot", "\""),
    ("apos", "'"),
    ("nbsp", "\u{a0}"),
    ("mdash", "\u{2014}"),
    ("ndash", "\u{2013}"),
    ("hellip", "\u{2026}"),
    ("rsquo", "\u{2019}"),
    ("lsquo", "\u{2018}"),
    ("rdquo", "\u{201d}"),
    ("ldquo", "\u{201c}"),
    ("laquo", "\u{ab}"),
    ("raquo", "\u{bb}"),
    ("copy", "\u{a9}"),
    ("reg", "\u{ae}"),
    ("trade", "\u{2122}"),
    ("deg", "\u{b0}"),
    ("middot", "\u{b7}"),
    ("bull", "\u{2022}"),
    ("euro", "\u{20ac}"),
    ("pound", "\u{a3}"),
    ("times", "\u{d7}"),
];

fn decode_entity(name: &str) -> Option<char> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code).filter(|c| *c != '\0');
    }
    NAMED_ENTITIES
        .iter()
        .find(|(entity, _)| *entity == name)
        .and_then(|(_, value)| value.chars().next())
}

/// Decode HTML entities in a single pass
pub fn decode_entities(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        result.push_str(&rest[..amp]);
        let candidate = &rest[amp + 1..];
        let decoded = candidate
            .find(';')
            .filter(|&end| end > 0 && end <= 10)
            .and_then(|end| decode_entity(&candidate[..end]).map(|c| (c, end)));

        match decoded {
            Some((c, end)) => {
                result.push(c);
                rest = &candidate[end + 1..];
            }
            None => {
                result.push('&');
                rest = candidate;
            }
        }
    }
    result.push_str(rest);
    result
}

/// Turn raw post markup into the plain text sent to a provider.
///
/// Strips tags, decodes entities and trims, repeating until the text stops
/// changing. Every pass that changes the text makes it shorter, so the loop
/// terminates and the result is a fixed point of this function.
pub fn clean_content(raw: &str) -> String {
    let mut current = raw.to_string();
    loop {
        let next = decode_entities(&strip_tags(&current)).trim().to_string();
        if next == current {
            return next;
        }
        current = next;
    }
}

/// Join the prompt template and cleaned content with a single space
pub fn build_prompt(template: &str, content: &str) -> String {
    format!("{} {}", template, content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_simple_markup() {
        assert_eq!(clean_content("<p>Hello <b>World</b></p>"), "Hello World");
    }

    #[test]
    fn test_clean_removes_script_and_style_bodies() {
        let html = "<style>p { color: red; }</style><p>Text</p><script>alert('x')</script><!-- note -->";
        assert_eq!(clean_content(html), "Text");
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("Fish &amp; Chips"), "Fish & Chips");
        assert_eq!(decode_entities("&#39;quoted&#x27;"), "'quoted'");
        assert_eq!(decode_entities("&quot;a&quot; &hellip;"), "\"a\" \u{2026}");
        assert_eq!(decode_entities("AT&T &unknown; & done"), "AT&T &unknown; & done");
        assert_eq!(decode_entities("&#0;"), "&#0;");
    }

    #[test]
    fn test_clean_keeps_less_than_signs() {
        assert_eq!(
            clean_content("<p>Use x &lt; y in loops. Then more text.</p>"),
            "Use x < y in loops. Then more text."
        );
        assert_eq!(
            clean_content("Prices: a < b for most items, and the rest follows."),
            "Prices: a < b for most items, and the rest follows."
        );
        assert_eq!(clean_content("5 &lt; 6 &gt; 3"), "5 < 6 > 3");
        assert_eq!(clean_content("tail <a href=\"x"), "tail <a href=\"x");
    }

    #[test]
    fn test_clean_strips_decoded_tags() {
        assert_eq!(clean_content("&lt;b&gt;bold&lt;/b&gt; text"), "bold text");
    }

    #[test]
    fn test_clean_trims_whitespace() {
        assert_eq!(clean_content("  \n<div>  spaced  </div>\n "), "spaced");
    }

    #[test]
    fn test_clean_is_idempotent() {
        let inputs = [
            "<p>Hello <b>World</b></p>",
            "&lt;b&gt;bold&lt;/b&gt; text",
            "&amp;lt;p&amp;gt; nested &amp;amp; escaped",
            "  <p>&nbsp;spaces&nbsp;</p>  ",
            "unterminated <a href=\"x",
            "5 &lt; 6 and 7 &gt; 3",
            "",
        ];
        for input in inputs {
            let once = clean_content(input);
            assert_eq!(clean_content(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_build_prompt() {
        assert_eq!(build_prompt("Summarize:", "Hello World"), "Summarize: Hello World");
        assert_eq!(build_prompt("", ""), " ");

        let template = String::from("T");
        let content = String::from("C");
        let prompt = build_prompt(&template, &content);
        assert_eq!(prompt, "T C");
        assert_eq!(template, "T");
        assert_eq!(content, "C");
    }
}
