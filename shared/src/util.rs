/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Trim, drop empty entries and de-duplicate while keeping first-seen order.
///
/// Coverage areas are a set on the zone row; the portal's tag input can send
/// repeats and stray whitespace.
pub fn normalize_string_set<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for value in values {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() || out.iter().any(|v| v == trimmed) {
            continue;
        }
        out.push(trimmed.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_millis_is_recent() {
        // 2024-01-01 00:00:00 UTC
        assert!(now_millis() > 1_704_067_200_000);
    }

    #[test]
    fn test_normalize_string_set() {
        let areas = normalize_string_set([" Centro ", "Norte", "", "Centro", "  "]);
        assert_eq!(areas, vec!["Centro".to_string(), "Norte".to_string()]);
    }
}
