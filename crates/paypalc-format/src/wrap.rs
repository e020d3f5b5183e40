/// Greedy word wrap on byte length.
///
/// Each line ends at the last space at or before `width`. A word longer than
/// `width` is never split; the line then runs to the next space.
pub fn wrap(text: &str, width: usize) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;

    while rest.len() > width {
        let bytes = rest.as_bytes();
        let cut = match bytes[..=width].iter().rposition(|&b| b == b' ') {
            Some(index) if index > 0 => Some(index),
            _ => bytes[width + 1..]
                .iter()
                .position(|&b| b == b' ')
                .map(|offset| width + 1 + offset),
        };

        let Some(cut) = cut else {
            break;
        };
        lines.push(&rest[..cut]);
        rest = &rest[cut + 1..];
    }

    if !rest.is_empty() {
        lines.push(rest);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breaks_at_last_space_before_limit() {
        let text = "The webhooks for authorizing and capturing payments correspond...";
        assert_eq!(
            wrap(text, 40),
            vec![
                "The webhooks for authorizing and",
                "capturing payments correspond..."
            ]
        );
    }

    #[test]
    fn trailing_word_without_later_space() {
        let text = "The webhooks for authorizing and capturing";
        assert_eq!(
            wrap(text, 40),
            vec!["The webhooks for authorizing and", "capturing"]
        );
    }

    #[test]
    fn short_text_is_one_line() {
        assert_eq!(wrap("short", 40), vec!["short"]);
        assert!(wrap("", 40).is_empty());
    }

    #[test]
    fn space_exactly_at_limit_is_used() {
        assert_eq!(wrap("abcd efgh", 4), vec!["abcd", "efgh"]);
    }

    #[test]
    fn long_word_is_never_split() {
        let text = "https://developer.paypal.com/docs/api/payments/v2/ is the reference";
        assert_eq!(
            wrap(text, 10),
            vec![
                "https://developer.paypal.com/docs/api/payments/v2/",
                "is the",
                "reference"
            ]
        );
        assert_eq!(wrap("abcdefghijkl", 5), vec!["abcdefghijkl"]);
    }

    #[test]
    fn splits_multibyte_text_on_spaces_only() {
        let text = "authorization reaching it’s validity";
        for line in wrap(text, 20) {
            assert!(!line.starts_with(' '));
        }
    }
}
