/// Fence openers with a language tag, removed before the bare fence
const TAGGED_FENCES: [&str; 2] = ["```markdown", "```md"];
const FENCE: &str = "```";

/// Remove markdown code fences from a model response
///
/// Language models often answer with the whole document inside a
/// ```` ```markdown ```` block, sometimes with the fence glued to the first or
/// last line of content. Every fence marker is removed wherever it appears.
/// Lines left empty by the removal are dropped and the result is trimmed.
/// Single inline backticks are kept.
pub fn strip_code_fences(text: &str) -> String {
    let kept: Vec<String> = text
        .lines()
        .filter_map(|line| {
            if !line.contains(FENCE) {
                return Some(line.to_string());
            }

            let opens_line = line.trim_start().starts_with(FENCE);
            let mut stripped = line.to_string();
            for tagged in TAGGED_FENCES {
                stripped = stripped.replace(tagged, "");
            }
            stripped = stripped.replace(FENCE, "");

            if stripped.trim().is_empty() {
                None
            } else if opens_line {
                Some(stripped.trim().to_string())
            } else {
                Some(stripped.trim_end().to_string())
            }
        })
        .collect();

    kept.join("\n").trim().to_string()
}
