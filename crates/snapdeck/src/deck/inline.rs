use std::sync::LazyLock;

use regex::Regex;

use super::Inline;

static SPAN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*(?P<strong>[^*]+)\*\*|\*(?P<em>[^*\s](?:[^*]*[^*\s])?)\*")
        .expect("valid regex")
});

/// Parse `**strong**` and `*emphasis*` spans. Unmatched markers stay literal.
pub fn parse(text: &str) -> Vec<Inline> {
    let mut inlines = Vec::new();
    let mut last = 0;

    for caps in SPAN_RE.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last {
            inlines.push(Inline::Text(text[last..whole.start()].to_string()));
        }
        if let Some(strong) = caps.name("strong") {
            inlines.push(Inline::Strong(strong.as_str().to_string()));
        } else if let Some(em) = caps.name("em") {
            inlines.push(Inline::Emphasis(em.as_str().to_string()));
        }
        last = whole.end();
    }
    if last < text.len() {
        inlines.push(Inline::Text(text[last..].to_string()));
    }
    inlines
}

pub fn plain_text(inlines: &[Inline]) -> String {
    inlines
        .iter()
        .map(|inline| match inline {
            Inline::Text(s) | Inline::Strong(s) | Inline::Emphasis(s) => s.as_str(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    #[test]
    fn plain() {
        assert_eq!(parse("just words"), vec![text("just words")]);
    }

    #[test]
    fn strong_in_middle() {
        assert_eq!(
            parse("no longer **proof** of identity"),
            vec![
                text("no longer "),
                Inline::Strong("proof".to_string()),
                text(" of identity"),
            ]
        );
    }

    #[test]
    fn emphasis_whole_line() {
        assert_eq!(
            parse("*Scroll to begin*"),
            vec![Inline::Emphasis("Scroll to begin".to_string())]
        );
    }

    #[test]
    fn mixed_spans() {
        let inlines = parse("**stop**, *verify*, report");
        assert_eq!(inlines.len(), 4);
        assert_eq!(inlines[0], Inline::Strong("stop".to_string()));
        assert_eq!(inlines[2], Inline::Emphasis("verify".to_string()));
        assert_eq!(plain_text(&inlines), "stop, verify, report");
    }

    #[test]
    fn lone_asterisk_is_literal() {
        assert_eq!(parse("5 * 3 = 15"), vec![text("5 * 3 = 15")]);
    }

    #[test]
    fn empty() {
        assert!(parse("").is_empty());
    }
}
