/// Keeps ASCII digits only, in their original order.
pub fn extract_digits(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Formats 10-digit numbers as `(DDD) DDD-DDDD` and 11-digit numbers as
/// `+D (DDD) DDD-DDDD`. Anything else is returned unchanged.
pub fn format_phone_number(phone: &str) -> String {
    let digits = extract_digits(phone);

    match digits.len() {
        10 => format!("({}) {}-{}", &digits[0..3], &digits[3..6], &digits[6..10]),
        11 => format!(
            "+{} ({}) {}-{}",
            &digits[0..1],
            &digits[1..4],
            &digits[4..7],
            &digits[7..11]
        ),
        _ => phone.to_string(),
    }
}

/// Splits comma or newline separated free text into trimmed, non-empty entries.
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(|c| c == ',' || c == '\n')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
