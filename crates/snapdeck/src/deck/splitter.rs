/// Split a deck body (after front matter extraction) into raw slide strings.
///
/// A slide break is a line containing only `---` with a blank line (or the
/// start/end of the document) on both sides. Chunks that are empty after
/// trimming are dropped.
pub fn split(body: &str) -> Vec<String> {
    let lines: Vec<&str> = body.lines().collect();
    let mut slides = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for (i, &line) in lines.iter().enumerate() {
        let is_break = line.trim() == "---"
            && is_blank_at(&lines, i.checked_sub(1))
            && is_blank_at(&lines, Some(i + 1));
        if is_break {
            push_chunk(&mut slides, &current);
            current.clear();
            continue;
        }
        current.push(line);
    }
    push_chunk(&mut slides, &current);

    slides
}

/// Out-of-range positions count as blank so separators may open or close the body.
fn is_blank_at(lines: &[&str], index: Option<usize>) -> bool {
    match index.and_then(|i| lines.get(i)) {
        Some(line) => line.trim().is_empty(),
        None => true,
    }
}

fn push_chunk(slides: &mut Vec<String>, lines: &[&str]) {
    let chunk = lines.join("\n");
    let chunk = chunk.trim();
    if !chunk.is_empty() {
        slides.push(chunk.to_string());
    }
}
