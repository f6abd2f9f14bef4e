/// Clean one column's token sequence.
///
/// Steps:
/// 1. Drop leader-dot fill (tokens containing `...` or made only of periods)
/// 2. Drop a token equal to the previous *kept* token
///
/// Order is preserved. Applying it twice gives the same result as once.
pub fn clean_tokens<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tokens.len());
    for token in tokens {
        let token = token.as_ref();
        if is_leader_fill(token) {
            continue;
        }
        if out.last().is_some_and(|prev| prev == token) {
            continue;
        }
        out.push(token.to_string());
    }
    out
}

fn is_leader_fill(token: &str) -> bool {
    token.contains("...") || (!token.is_empty() && token.chars().all(|c| c == '.'))
}

/// True for a non-empty run of ASCII digits.
pub fn is_numeric(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}
