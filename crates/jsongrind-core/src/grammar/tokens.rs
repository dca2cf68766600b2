//! Leaf-level token generators for the JSON grammar
//!
//! Each function here produces one primitive grammar term: a digit, a sign,
//! a whitespace atom, a single string character, or an escape sequence. They
//! are generic over the random source so the composite productions can thread
//! one seeded generator through every draw.

use rand::Rng;

const DIGITS: [char; 10] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];

const ONE_NINE: [char; 9] = ['1', '2', '3', '4', '5', '6', '7', '8', '9'];

const HEX_DIGITS: [char; 22] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'a', 'b', 'c',
    'd', 'e', 'f',
];

/// The two-character escape bodies: `\"` `\\` `\/` `\b` `\f` `\n` `\r` `\t`.
const SIMPLE_ESCAPES: [char; 8] = ['"', '\\', '/', 'b', 'f', 'n', 'r', 't'];

/// Insignificant whitespace atoms, the empty atom included.
const WS_ATOMS: [&str; 5] = ["", " ", "\n", "\r", "\t"];

/// Signs accepted in an exponent part.
const SIGNS: [&str; 3] = ["", "-", "+"];

pub(crate) fn digit<R: Rng>(rng: &mut R) -> char {
    DIGITS[rng.gen_range(0..DIGITS.len())]
}

pub(crate) fn one_nine<R: Rng>(rng: &mut R) -> char {
    ONE_NINE[rng.gen_range(0..ONE_NINE.len())]
}

pub(crate) fn hex_digit<R: Rng>(rng: &mut R) -> char {
    HEX_DIGITS[rng.gen_range(0..HEX_DIGITS.len())]
}

/// An exponent sign: absent, `-`, or `+`, each equally likely.
pub(crate) fn sign<R: Rng>(rng: &mut R) -> &'static str {
    SIGNS[rng.gen_range(0..SIGNS.len())]
}

pub(crate) fn whitespace_atom<R: Rng>(rng: &mut R) -> &'static str {
    WS_ATOMS[rng.gen_range(0..WS_ATOMS.len())]
}

/// A run of decimal digits, at least one and at most `max_digits`,
/// extended with probability `continue_p` per extra digit.
pub(crate) fn digit_run<R: Rng>(rng: &mut R, continue_p: f64, max_digits: usize) -> String {
    let mut run = String::new();
    run.push(digit(rng));
    while run.len() < max_digits && rng.gen_bool(continue_p) {
        run.push(digit(rng));
    }
    run
}

/// One unescaped string character.
///
/// Samples uniformly over the full scalar range U+0020..=U+10FFFF, skipping
/// the quote and backslash (which must be escaped) and the surrogate gap
/// (which `char` cannot represent).
pub(crate) fn plain_char<R: Rng>(rng: &mut R) -> char {
    loop {
        let code: u32 = rng.gen_range(0x20..=0x10FFFF);
        match char::from_u32(code) {
            Some(c) if c != '"' && c != '\\' => return c,
            _ => continue,
        }
    }
}

/// The body of an escape sequence, without the leading backslash.
///
/// The eight simple escapes and the `uXXXX` form are equally likely, nine
/// alternatives in all.
pub(crate) fn escape_body<R: Rng>(rng: &mut R) -> String {
    match rng.gen_range(0..SIMPLE_ESCAPES.len() + 1) {
        i if i < SIMPLE_ESCAPES.len() => SIMPLE_ESCAPES[i].to_string(),
        _ => unicode_escape_body(rng),
    }
}

/// A `uXXXX` escape body with four independently drawn hex digits.
///
/// Code units in the surrogate gap are grammatical but strict parsers
/// reject a lone surrogate escape, so those draws are resampled.
fn unicode_escape_body<R: Rng>(rng: &mut R) -> String {
    loop {
        let digits: String = (0..4).map(|_| hex_digit(rng)).collect();
        match u32::from_str_radix(&digits, 16) {
            Ok(code) if !(0xD800..=0xDFFF).contains(&code) => return format!("u{digits}"),
            _ => continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(0x746f6b656e73)
    }

    #[test]
    fn test_digit_alphabets() {
        let mut rng = rng();
        for _ in 0..2_000 {
            assert!(digit(&mut rng).is_ascii_digit());
            let nz = one_nine(&mut rng);
            assert!(nz.is_ascii_digit() && nz != '0');
            assert!(hex_digit(&mut rng).is_ascii_hexdigit());
        }
    }

    #[test]
    fn test_digit_run_never_empty() {
        let mut rng = rng();
        for _ in 0..500 {
            let run = digit_run(&mut rng, 0.3, 32);
            assert!(!run.is_empty());
            assert!(run.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_digit_run_zero_probability_is_single_digit() {
        let mut rng = rng();
        for _ in 0..100 {
            assert_eq!(digit_run(&mut rng, 0.0, 8).len(), 1);
        }
    }

    #[test]
    fn test_digit_run_stops_at_the_cap() {
        let mut rng = rng();
        for _ in 0..500 {
            let run = digit_run(&mut rng, 0.95, 4);
            assert!((1..=4).contains(&run.len()));
        }
    }

    #[test]
    fn test_sign_alternatives_all_reachable() {
        let mut rng = rng();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(sign(&mut rng));
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_whitespace_atoms_stay_in_alphabet() {
        let mut rng = rng();
        for _ in 0..500 {
            let atom = whitespace_atom(&mut rng);
            assert!(WS_ATOMS.contains(&atom));
        }
    }

    #[test]
    fn test_plain_char_excludes_quote_backslash_and_controls() {
        let mut rng = rng();
        for _ in 0..5_000 {
            let c = plain_char(&mut rng);
            assert_ne!(c, '"');
            assert_ne!(c, '\\');
            assert!(c as u32 >= 0x20);
        }
    }

    #[test]
    fn test_escape_body_shapes() {
        let mut rng = rng();
        let mut saw_unicode = false;
        for _ in 0..1_000 {
            let body = escape_body(&mut rng);
            if let Some(hex) = body.strip_prefix('u') {
                assert_eq!(hex.len(), 4);
                let code = u32::from_str_radix(hex, 16).unwrap();
                assert!(!(0xD800..=0xDFFF).contains(&code));
                saw_unicode = true;
            } else {
                let c = body.chars().next().unwrap();
                assert_eq!(body.chars().count(), 1);
                assert!(SIMPLE_ESCAPES.contains(&c));
            }
        }
        assert!(saw_unicode);
    }
}
