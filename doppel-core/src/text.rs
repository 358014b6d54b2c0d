use regex::Regex;
use std::sync::OnceLock;

fn thinking_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<thinking>.*?</thinking>|<think>.*?</think>|<reasoning>.*?</reasoning>")
            .expect("valid thinking regex")
    })
}

/// Strips `<thinking>`, `<think>` and `<reasoning>` blocks that some
/// compatible endpoints leak ahead of the real reply, then trims.
pub fn filter_reply(text: &str) -> String {
    let out = thinking_re().replace_all(text, "");
    out.trim().to_string()
}

/// Unwraps a fenced body. JSON-constrained responses are usually bare JSON,
/// but some compatible endpoints fence them anyway.
pub fn strip_code_fence(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with("```") && trimmed.ends_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() >= 3 && lines.last().is_some_and(|l| l.trim() == "```") {
            return lines[1..lines.len() - 1].join("\n").trim().to_string();
        }
    }
    trimmed.to_string()
}
