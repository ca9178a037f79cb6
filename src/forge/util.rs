use regex::Regex;
use std::sync::LazyLock;

static PR_REF_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:#|\bGH-)(?<number>\d+)").unwrap());

/// Scan release notes for pull request references (`#123` or `GH-123`
/// shorthand) and return the unique numbers in first-seen order.
///
/// This is a best-effort text scan, not a markdown parse: notes without
/// references yield an empty list, and numbers too large for a pull
/// request identifier are skipped.
pub fn parse_pr_references(notes: &str) -> Vec<u64> {
    let mut numbers = vec![];

    for captures in PR_REF_REGEX.captures_iter(notes) {
        if let Ok(number) = captures["number"].parse::<u64>()
            && !numbers.contains(&number)
        {
            numbers.push(number);
        }
    }

    numbers
}
