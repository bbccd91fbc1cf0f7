use crate::error::ColorFormatError;

/// Parse a 24-bit color in hashed hexadecimal format. If successful, this
/// function returns the three coordinates as unsigned bytes. It transparently
/// handles single-digit coordinates.
pub(crate) fn parse_hashed(s: &str) -> Result<[u8; 3], ColorFormatError> {
    let s = s.trim();
    if !s.starts_with('#') {
        return Err(ColorFormatError::UnknownFormat);
    } else if s.len() != 4 && s.len() != 7 {
        return Err(ColorFormatError::UnexpectedCharacters);
    }

    fn parse_coordinate(s: &str, index: usize) -> Result<u8, ColorFormatError> {
        let factor = s.len() / 3;
        let t = s
            .get(1 + factor * index..1 + factor * (index + 1))
            .ok_or(ColorFormatError::UnexpectedCharacters)?;
        let n = u8::from_str_radix(t, 16).map_err(|_| ColorFormatError::MalformedHex)?;

        Ok(if factor == 1 { 16 * n + n } else { n })
    }

    let c1 = parse_coordinate(s, 0)?;
    let c2 = parse_coordinate(s, 1)?;
    let c3 = parse_coordinate(s, 2)?;
    Ok([c1, c2, c3])
}

#[cfg(test)]
mod test {
    use super::parse_hashed;
    use crate::error::ColorFormatError;

    #[test]
    fn test_parse_hashed() {
        assert_eq!(parse_hashed("#CC2222"), Ok([0xcc, 0x22, 0x22]));
        assert_eq!(parse_hashed("#f7f5ef"), Ok([0xf7, 0xf5, 0xef]));
        assert_eq!(parse_hashed("#95b"), Ok([0x99, 0x55, 0xbb]));
        assert_eq!(parse_hashed("  #000 "), Ok([0, 0, 0]));

        assert_eq!(parse_hashed("9955BB"), Err(ColorFormatError::UnknownFormat));
        assert_eq!(
            parse_hashed("#9955B"),
            Err(ColorFormatError::UnexpectedCharacters)
        );
        assert_eq!(parse_hashed("#99g5BB"), Err(ColorFormatError::MalformedHex));
        assert_eq!(
            parse_hashed("#💩0"),
            Err(ColorFormatError::UnexpectedCharacters)
        );
    }
}
