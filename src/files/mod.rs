//! Filesystem-safe name handling for saved lyrics and downloads.

use deunicode::deunicode;

/// Characters that are invalid in filenames on common filesystems.
const INVALID_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Fallback when sanitization eats the whole name.
const FALLBACK_STEM: &str = "lyrics";

/// Sanitize a file stem: transliterate to ASCII, drop invalid characters,
/// collapse whitespace. Spaces are kept — `Artist - Title` is the library's
/// naming convention.
pub fn sanitize_stem(input: &str) -> String {
    let ascii = deunicode(input);

    let mut result = String::with_capacity(ascii.len());
    let mut last_was_space = true;
    for c in ascii.chars() {
        if c.is_whitespace() {
            if !last_was_space {
                result.push(' ');
                last_was_space = true;
            }
        } else if !INVALID_CHARS.contains(&c) && !c.is_control() {
            result.push(c);
            last_was_space = false;
        }
    }

    let trimmed = result.trim_matches([' ', '.']).to_string();
    if trimmed.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_artist_title_convention() {
        assert_eq!(sanitize_stem("Coldplay - Yellow"), "Coldplay - Yellow");
    }

    #[test]
    fn strips_invalid_filesystem_chars() {
        assert_eq!(sanitize_stem("AC/DC - Back:In*Black?"), "ACDC - BackInBlack");
    }

    #[test]
    fn transliterates_unicode() {
        assert_eq!(sanitize_stem("Beyoncé - Café"), "Beyonce - Cafe");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(sanitize_stem("a   b\t c"), "a b c");
    }

    #[test]
    fn empty_input_falls_back() {
        assert_eq!(sanitize_stem("///"), "lyrics");
        assert_eq!(sanitize_stem("   "), "lyrics");
    }
}
