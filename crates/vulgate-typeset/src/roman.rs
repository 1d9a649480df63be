use vulgate_model::{Error, Result};

/// Format a chapter number as a lowercase Roman numeral (4 -> "iv").
///
/// Thousands are written as repeated `m` with no upper bound.
pub fn to_roman(number: u32) -> Result<String> {
    if number == 0 {
        return Err(Error::InvalidArgument(
            "Roman numerals start at 1, got 0".to_string(),
        ));
    }

    let mut roman = "m".repeat((number / 1000) as usize);
    roman.push_str(&place((number / 100) % 10, 'c', 'd', 'm'));
    roman.push_str(&place((number / 10) % 10, 'x', 'l', 'c'));
    roman.push_str(&place(number % 10, 'i', 'v', 'x'));
    Ok(roman)
}

/// One decimal place in subtractive notation.
fn place(digit: u32, one: char, five: char, ten: char) -> String {
    match digit {
        9 => format!("{one}{ten}"),
        5..=8 => std::iter::once(five)
            .chain(std::iter::repeat(one).take((digit - 5) as usize))
            .collect(),
        4 => format!("{one}{five}"),
        _ => std::iter::repeat(one).take(digit as usize).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(roman: &str) -> u32 {
        let values: Vec<u32> = roman
            .chars()
            .map(|c| match c {
                'i' => 1,
                'v' => 5,
                'x' => 10,
                'l' => 50,
                'c' => 100,
                'd' => 500,
                'm' => 1000,
                other => panic!("unexpected numeral {other}"),
            })
            .collect();

        let mut total = 0;
        for (i, value) in values.iter().enumerate() {
            match values.get(i + 1) {
                Some(next) if next > value => total -= *value as i64,
                _ => total += *value as i64,
            }
        }
        total as u32
    }

    #[test]
    fn test_known_values() {
        assert_eq!(to_roman(1).unwrap(), "i");
        assert_eq!(to_roman(4).unwrap(), "iv");
        assert_eq!(to_roman(9).unwrap(), "ix");
        assert_eq!(to_roman(14).unwrap(), "xiv");
        assert_eq!(to_roman(40).unwrap(), "xl");
        assert_eq!(to_roman(90).unwrap(), "xc");
        assert_eq!(to_roman(400).unwrap(), "cd");
        assert_eq!(to_roman(444).unwrap(), "cdxliv");
        assert_eq!(to_roman(900).unwrap(), "cm");
        assert_eq!(to_roman(1994).unwrap(), "mcmxciv");
    }

    #[test]
    fn test_round_trip() {
        for n in (1..=3999).chain([4000, 4444, 12_345]) {
            let roman = to_roman(n).unwrap();
            assert_eq!(expand(&roman), n, "{n} -> {roman}");
        }
    }

    #[test]
    fn test_large_thousands() {
        assert_eq!(to_roman(5001).unwrap(), "mmmmmi");
    }

    #[test]
    fn test_zero_rejected() {
        assert!(matches!(to_roman(0), Err(Error::InvalidArgument(_))));
    }
}
