//! Small utility helpers used across modules.

/// Very small and safe string templating.
/// Replaces occurrences of `{key}` in the template with provided values.
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  let mut out = tpl.to_string();
  for (k, v) in pairs {
    let needle = format!("{{{}}}", k);
    out = out.replace(&needle, v);
  }
  out
}

/// Remove a surrounding markdown code fence from model output.
///
/// Models like to answer with
///
/// ~~~text
/// ```json
/// {"question": "..."}
/// ```
/// ~~~
///
/// When the trimmed text opens with a fence, the fence and its info string
/// (`json`, `JSON`, ...) are dropped along with a trailing closing fence.
/// Text without an opening fence is only trimmed.
pub fn strip_code_fence(text: &str) -> &str {
  let trimmed = text.trim();
  let Some(rest) = trimmed.strip_prefix("```") else {
    return trimmed;
  };

  let rest = rest.trim_end();
  let inner = rest.strip_suffix("```").unwrap_or(rest);
  match info_string_len(inner) {
    Some(len) => inner[len..].trim(),
    None => inner.trim(),
  }
}

/// Length of the info string right after an opening fence, if there is one.
///
/// The word must be followed by whitespace, `{`, `[` or `"`. A lone word that
/// is itself valid JSON (`true`, `null`, `42`) is the payload, not a tag.
fn info_string_len(inner: &str) -> Option<usize> {
  let len = inner
    .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.')))
    .unwrap_or(inner.len());
  if len == 0 {
    return None;
  }

  let (word, after) = inner.split_at(len);
  match after.chars().next() {
    None => {}
    Some(c) if c.is_whitespace() || matches!(c, '{' | '[' | '"') => {}
    Some(_) => return None,
  }
  if after.trim().is_empty() && serde_json::from_str::<serde_json::Value>(word).is_ok() {
    return None;
  }
  Some(len)
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge request/response payloads.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let mut end = max;
  while !s.is_char_boundary(end) {
    end -= 1;
  }
  format!("{}… ({} bytes total)", &s[..end], s.len())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fills_every_placeholder() {
    let out = fill_template("{n} {kind} on {topic}", &[("n", "3"), ("kind", "true_false"), ("topic", "Rust")]);
    assert_eq!(out, "3 true_false on Rust");
  }

  #[test]
  fn unknown_placeholders_are_left_alone() {
    assert_eq!(fill_template("{a} {b}", &[("a", "x")]), "x {b}");
  }

  #[test]
  fn unfenced_text_is_only_trimmed() {
    assert_eq!(strip_code_fence("  {\"question\":\"Q\"}\n"), "{\"question\":\"Q\"}");
  }

  #[test]
  fn strips_json_fence() {
    let text = "```json\n{\"question\":\"Q\"}\n```";
    assert_eq!(strip_code_fence(text), "{\"question\":\"Q\"}");
  }

  #[test]
  fn strips_bare_fence_and_surrounding_whitespace() {
    let text = "\n```\n[1, 2]\n```\n\n";
    assert_eq!(strip_code_fence(text), "[1, 2]");
  }

  #[test]
  fn strips_single_line_fence() {
    assert_eq!(strip_code_fence("```json {\"a\":1}```"), "{\"a\":1}");
  }

  #[test]
  fn tolerates_missing_closing_fence() {
    assert_eq!(strip_code_fence("```json\n{\"a\":1}"), "{\"a\":1}");
  }

  #[test]
  fn keeps_content_that_ends_in_fence_like_letters() {
    // Blind character trimming would eat the trailing "n" and "o".
    assert_eq!(strip_code_fence("\"json\""), "\"json\"");
    assert_eq!(strip_code_fence("```\n\"no\"\n```"), "\"no\"");
  }

  #[test]
  fn json_literals_inside_fences_survive() {
    assert_eq!(strip_code_fence("```true```"), "true");
    assert_eq!(strip_code_fence("```null```"), "null");
    assert_eq!(strip_code_fence("```false\n```"), "false");
    assert_eq!(strip_code_fence("```true ```"), "true");
    assert_eq!(strip_code_fence("```-1.5```"), "-1.5");
  }

  #[test]
  fn info_string_is_dropped_before_a_literal() {
    assert_eq!(strip_code_fence("```json\ntrue\n```"), "true");
    assert_eq!(strip_code_fence("```json null```"), "null");
  }

  #[test]
  fn info_string_alone_leaves_nothing() {
    assert_eq!(strip_code_fence("```json\n```"), "");
    assert_eq!(strip_code_fence("```"), "");
  }

  #[test]
  fn content_on_the_opening_line_is_kept() {
    assert_eq!(strip_code_fence("```{\"a\":1}\n```"), "{\"a\":1}");
  }

  #[test]
  fn truncation_respects_char_boundaries() {
    let out = trunc_for_log("ééé", 3);
    assert!(out.starts_with("é…"));
    assert!(out.ends_with("(6 bytes total)"));
    assert_eq!(trunc_for_log("short", 10), "short");
  }
}
