use crate::core::TypeCode;
use once_cell::sync::Lazy;
use regex::Regex;

static SHARE_PARAM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[?&])([pc])=([^&#]*)").expect("valid share param regex"));

/// Builds `<base>?p=<parent>&c=<child>`, dropping any query already on `base`.
pub fn share_link(base_url: &str, parent: &TypeCode, child: &TypeCode) -> String {
    let base = base_url.split('?').next().unwrap_or(base_url);
    format!("{base}?p={parent}&c={child}")
}

/// Reads `p` and `c` from a share URL or bare query string.
///
/// Returns `None` unless both parameters are present and valid type codes.
pub fn parse_share_link(input: &str) -> Option<(TypeCode, TypeCode)> {
    let query = match input.split_once('?') {
        Some((_, query)) => query,
        None => input,
    };

    let mut parent = None;
    let mut child = None;
    for caps in SHARE_PARAM_RE.captures_iter(query) {
        let slot = match &caps[1] {
            "p" => &mut parent,
            _ => &mut child,
        };
        if slot.is_none() {
            *slot = Some(caps[2].to_string());
        }
    }

    let parent = parent?.parse().ok()?;
    let child = child?.parse().ok()?;
    Some((parent, child))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(raw: &str) -> TypeCode {
        raw.parse().unwrap()
    }

    #[test]
    fn builds_link_without_existing_query() {
        let link = share_link(
            "https://example.org/mbti/?p=INTJ&c=INTJ",
            &code("ENFP"),
            &code("ISTJ"),
        );
        assert_eq!(link, "https://example.org/mbti/?p=ENFP&c=ISTJ");
    }

    #[test]
    fn parses_full_url_and_bare_query() {
        let (p, c) = parse_share_link("https://example.org/mbti/?c=istj&p=ENFP#top").unwrap();
        assert_eq!(p, code("ENFP"));
        assert_eq!(c, code("ISTJ"));

        let (p, c) = parse_share_link("p=INTJ&c=ESFP").unwrap();
        assert_eq!((p, c), (code("INTJ"), code("ESFP")));
    }

    #[test]
    fn rejects_missing_or_invalid_params() {
        assert!(parse_share_link("https://example.org/?p=ENFP").is_none());
        assert!(parse_share_link("https://example.org/?p=ENFP&c=XXXX").is_none());
        assert!(parse_share_link("https://example.org/").is_none());
        assert!(parse_share_link("?pp=ENFP&cc=ISTJ").is_none());
    }
}
