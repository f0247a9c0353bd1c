/// Shared utility functions for API handlers

/// Fully qualified domain name: at least two dot-separated labels of
/// letters, digits and hyphens, no label starting or ending with a hyphen,
/// and an alphabetic (or punycode) top-level label
pub fn is_fqdn(name: &str) -> bool {
    let name = name.strip_suffix('.').unwrap_or(name);
    if name.is_empty() || name.len() > 253 {
        return false;
    }

    let labels: Vec<&str> = name.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    let valid_label = |label: &&str| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    };

    let tld = labels[labels.len() - 1];
    labels.iter().all(valid_label)
        && (tld.chars().all(|c| c.is_ascii_alphabetic()) || tld.starts_with("xn--"))
}

/// A one-time password as the registry expects it: exactly six digits
pub fn is_six_digit_token(token: &str) -> bool {
    token.len() == 6 && token.chars().all(|c| c.is_ascii_digit())
}
