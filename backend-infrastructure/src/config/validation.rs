use anyhow::{anyhow, Result};

/// Parses `#rrggbb` (leading `#` optional) into RGB bytes.
pub fn parse_hex_color(value: &str) -> Result<[u8; 3]> {
    let trimmed = value.trim();
    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(anyhow!("color '{}' must be #rrggbb", value));
    }
    let channel = |idx: usize| {
        u8::from_str_radix(&hex[idx..idx + 2], 16).map_err(|err| anyhow!(err))
    };
    Ok([channel(0)?, channel(2)?, channel(4)?])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_hash() {
        assert_eq!(parse_hex_color("#710014").expect("color"), [0x71, 0x00, 0x14]);
        assert_eq!(parse_hex_color("FFFFFF").expect("color"), [0xff, 0xff, 0xff]);
    }

    #[test]
    fn rejects_short_or_non_hex() {
        assert!(parse_hex_color("#fff").is_err());
        assert!(parse_hex_color("#gg0000").is_err());
        assert!(parse_hex_color("").is_err());
    }
}
