use crate::defaults::MAX_WINDOW_BP;

/// Parse a base-pair count such as `200000`, `200k`, `5m` or `5mb`.
pub fn parse_bp(s: &str) -> Result<u64, String> {
    let lower = s.trim().to_ascii_lowercase();
    let body = lower.strip_suffix('b').unwrap_or(&lower);
    let (digits, multiplier) = if let Some(d) = body.strip_suffix('k') {
        (d, 1_000)
    } else if let Some(d) = body.strip_suffix('m') {
        (d, 1_000_000)
    } else {
        (body, 1)
    };

    let value: u64 = digits
        .parse()
        .map_err(|_| format!("`{s}` is not a base-pair count (e.g. 200000, 200k, 5m, 5mb)"))?;
    value
        .checked_mul(multiplier)
        .ok_or_else(|| format!("`{s}` is too large"))
}

/// Parse a window or step size, capped at [`MAX_WINDOW_BP`].
pub fn parse_window_bp(s: &str) -> Result<u64, String> {
    let bp = parse_bp(s)?;
    if bp > MAX_WINDOW_BP {
        return Err(format!("`{s}` out of range (at most {MAX_WINDOW_BP} bp)"));
    }
    Ok(bp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bp_suffixes() {
        assert_eq!(parse_bp("200000"), Ok(200_000));
        assert_eq!(parse_bp("200k"), Ok(200_000));
        assert_eq!(parse_bp("200K"), Ok(200_000));
        assert_eq!(parse_bp("5m"), Ok(5_000_000));
        assert_eq!(parse_bp("5mb"), Ok(5_000_000));
        assert_eq!(parse_bp("20kb"), Ok(20_000));
        assert_eq!(parse_bp("150b"), Ok(150));
    }

    #[test]
    fn test_parse_bp_rejects_garbage() {
        assert!(parse_bp("").is_err());
        assert!(parse_bp("b").is_err());
        assert!(parse_bp("5mbb").is_err());
        assert!(parse_bp("five").is_err());
        assert!(parse_bp("-5").is_err());
        assert!(parse_bp("99999999999999999999m").is_err());
    }

    #[test]
    fn test_window_cap() {
        assert_eq!(parse_window_bp("100m"), Ok(100_000_000));
        assert!(parse_window_bp("101m").is_err());
    }
}
