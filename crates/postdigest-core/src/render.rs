use crate::config::{default_tab_titles, DisplayConfig, DisplayStyle};
use crate::post::Post;

/// Placeholder replaced by the rendered digest
pub const SHORTCODE: &str = "[post_digest]";

/// Render the excerpt and summary block for the configured style.
///
/// Returns `None` when nothing would be shown: both sections disabled, or
/// no non-empty text for the enabled ones.
pub fn render_digest_html(
    excerpt: Option<&str>,
    summary: Option<&str>,
    display: &DisplayConfig,
) -> Option<String> {
    let excerpt = excerpt
        .filter(|text| display.show_excerpt && !text.is_empty());
    let summary = summary
        .filter(|text| display.show_summary && !text.is_empty());

    if excerpt.is_none() && summary.is_none() {
        return None;
    }

    let style = display.style.as_str();
    let titles = display.titles();
    let has_tabs = display.style == DisplayStyle::Tab;

    let mut html = format!("<div class=\"pd-{}-wrapper\">\n", style);
    let mut summary_attr = "";

    if has_tabs {
        let defaults = default_tab_titles();
        html.push_str("\t<div class=\"pd-tab-bar\">\n");

        if excerpt.is_some() {
            let title = or_default(&titles.excerpt_title, &defaults.excerpt_title);
            html.push_str(&format!(
                "\t\t<div class=\"pd-tab-item pd-tab-item-active\" data-tab=\"excerpt\">{}</div>\n",
                escape_html(title)
            ));
        }

        if summary.is_some() {
            let title = or_default(&titles.summary_title, &defaults.summary_title);
            let class = if excerpt.is_some() {
                summary_attr = " style=\"display: none;\"";
                "pd-tab-item"
            } else {
                "pd-tab-item pd-tab-item-active"
            };
            html.push_str(&format!(
                "\t\t<div class=\"{}\" data-tab=\"summary\">{}</div>\n",
                class,
                escape_html(title)
            ));
        }

        html.push_str("\t</div>\n");
    }

    html.push_str(&format!("\t<div class=\"pd-{}\">\n", style));

    if let Some(text) = excerpt {
        push_section(&mut html, style, "excerpt", "", &titles.excerpt_title, has_tabs, text);
    }
    if let Some(text) = summary {
        push_section(&mut html, style, "summary", summary_attr, &titles.summary_title, has_tabs, text);
    }

    html.push_str("\t</div>\n");
    html.push_str("</div>");

    Some(html)
}

fn push_section(
    html: &mut String,
    style: &str,
    section: &str,
    attr: &str,
    title: &str,
    has_tabs: bool,
    text: &str,
) {
    html.push_str(&format!(
        "\t\t<div class=\"pd-{}-{}-wrapper\"{}>\n",
        style, section, attr
    ));
    if !title.is_empty() && !has_tabs {
        html.push_str(&format!(
            "\t\t\t<div class=\"pd-{}-{}-title\">{}</div>\n",
            style,
            section,
            escape_html(title)
        ));
    }
    html.push_str(&format!(
        "\t\t\t<div class=\"pd-{}-{}\">{}</div>\n",
        style,
        section,
        autop(text)
    ));
    html.push_str("\t\t</div>\n");
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

/// Prepend the digest block to a post body when its type is enabled
pub fn inject_into_content(
    post: &Post,
    excerpt: Option<&str>,
    summary: Option<&str>,
    display: &DisplayConfig,
) -> String {
    if !display.post_types.iter().any(|t| t == &post.post_type) {
        return post.content.clone();
    }

    match render_digest_html(excerpt, summary, display) {
        Some(html) => format!("{}\n\n{}", html, post.content),
        None => post.content.clone(),
    }
}

/// Replace every `[post_digest]` placeholder with `html`
pub fn expand_shortcodes(content: &str, html: Option<&str>) -> String {
    content.replace(SHORTCODE, html.unwrap_or(""))
}

/// Escape text for use in HTML element content and attributes
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape and wrap plain text into paragraphs.
///
/// Blank lines separate paragraphs, single newlines become `<br />`.
pub fn autop(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");

    normalized
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| {
            let lines: Vec<String> = p.lines().map(|l| escape_html(l.trim())).collect();
            format!("<p>{}</p>", lines.join("<br />\n"))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn display(style: DisplayStyle) -> DisplayConfig {
        DisplayConfig {
            style,
            ..DisplayConfig::default()
        }
    }

    fn post(post_type: &str) -> Post {
        Post {
            id: 1,
            post_type: post_type.to_string(),
            title: "T".to_string(),
            content: "<p>Body</p>".to_string(),
            excerpt: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_block_style() {
        let html = render_digest_html(Some("Short"), Some("Long"), &display(DisplayStyle::Block)).unwrap();
        let expected = "<div class=\"pd-block-wrapper\">\n\
            \t<div class=\"pd-block\">\n\
            \t\t<div class=\"pd-block-excerpt-wrapper\">\n\
            \t\t\t<div class=\"pd-block-excerpt\"><p>Short</p></div>\n\
            \t\t</div>\n\
            \t\t<div class=\"pd-block-summary-wrapper\">\n\
            \t\t\t<div class=\"pd-block-summary-title\">Summary</div>\n\
            \t\t\t<div class=\"pd-block-summary\"><p>Long</p></div>\n\
            \t\t</div>\n\
            \t</div>\n\
            </div>";
        assert_eq!(html, expected);
    }

    #[test]
    fn test_tab_style_hides_second_pane() {
        let html = render_digest_html(Some("Short"), Some("Long"), &display(DisplayStyle::Tab)).unwrap();

        assert!(html.contains("<div class=\"pd-tab-bar\">"));
        assert!(html.contains(
            "<div class=\"pd-tab-item pd-tab-item-active\" data-tab=\"excerpt\">Excerpt</div>"
        ));
        assert!(html.contains("<div class=\"pd-tab-item\" data-tab=\"summary\">Summary</div>"));
        assert!(html.contains("<div class=\"pd-tab-summary-wrapper\" style=\"display: none;\">"));
        assert!(!html.contains("-title\">"));
    }

    #[test]
    fn test_tab_style_summary_only_is_active_and_titles_fall_back() {
        let mut config = display(DisplayStyle::Tab);
        config.tab.summary_title = String::new();

        let html = render_digest_html(None, Some("Long"), &config).unwrap();
        assert!(html.contains(
            "<div class=\"pd-tab-item pd-tab-item-active\" data-tab=\"summary\">Summary</div>"
        ));
        assert!(!html.contains("display: none"));
        assert!(!html.contains("excerpt"));
    }

    #[test]
    fn test_nothing_to_show() {
        let mut config = display(DisplayStyle::Card);
        assert!(render_digest_html(None, Some(""), &config).is_none());

        config.show_excerpt = false;
        config.show_summary = false;
        assert!(render_digest_html(Some("a"), Some("b"), &config).is_none());
    }

    #[test]
    fn test_text_is_escaped_and_paragraphed() {
        assert_eq!(
            autop("One <b>\nTwo\n\nThree & four"),
            "<p>One &lt;b&gt;<br />\nTwo</p>\n<p>Three &amp; four</p>"
        );

        let mut config = display(DisplayStyle::Writer);
        config.writer.excerpt_title = "<Quick>".to_string();
        let html = render_digest_html(Some("x"), None, &config).unwrap();
        assert!(html.contains("<div class=\"pd-writer-excerpt-title\">&lt;Quick&gt;</div>"));
    }

    #[test]
    fn test_inject_respects_post_types() {
        let config = display(DisplayStyle::Block);

        let injected = inject_into_content(&post("post"), Some("Short"), None, &config);
        assert!(injected.starts_with("<div class=\"pd-block-wrapper\">"));
        assert!(injected.ends_with("</div>\n\n<p>Body</p>"));

        assert_eq!(
            inject_into_content(&post("page"), Some("Short"), None, &config),
            "<p>Body</p>"
        );
        assert_eq!(inject_into_content(&post("post"), None, None, &config), "<p>Body</p>");
    }

    #[test]
    fn test_expand_shortcodes() {
        assert_eq!(
            expand_shortcodes("a [post_digest] b [post_digest]", Some("X")),
            "a X b X"
        );
        assert_eq!(expand_shortcodes("a [post_digest]", None), "a ");
    }
}
