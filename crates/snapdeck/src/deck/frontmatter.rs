use super::{DeckError, DeckMeta};

/// Split optional YAML front matter from the deck body.
///
/// Front matter must start on the very first line with `---` and end with the
/// next line that is exactly `---`. A `---` followed by a blank line is a slide
/// separator instead. Line endings are normalised to `\n`.
pub fn extract(content: &str) -> Result<(DeckMeta, String), DeckError> {
    let content = content.trim_start_matches('\u{feff}').replace("\r\n", "\n");

    let Some(rest) = content.strip_prefix("---\n") else {
        return Ok((DeckMeta::default(), content));
    };
    if rest.lines().next().is_none_or(|line| line.trim().is_empty()) {
        return Ok((DeckMeta::default(), content));
    }

    let mut yaml_len = None;
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            yaml_len = Some(offset);
            break;
        }
        offset += line.len();
    }
    let Some(yaml_len) = yaml_len else {
        return Err(DeckError::UnclosedFrontMatter);
    };

    let yaml = &rest[..yaml_len];
    let body = rest[yaml_len..]
        .split_once('\n')
        .map(|(_, body)| body)
        .unwrap_or_default();

    let meta = if yaml.trim().is_empty() {
        DeckMeta::default()
    } else {
        serde_yaml::from_str(yaml)?
    };
    Ok((meta, body.to_string()))
}
