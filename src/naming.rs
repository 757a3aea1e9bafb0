//! Filename conventions for content files.
//!
//! Two patterns carry meaning in a file or directory name:
//!
//! - **Number prefixes** order docs: `01-intro.md`, `02_install.md`,
//!   `3.config.md`. The prefix sets the default sidebar position and is
//!   dropped from the doc id and route.
//! - **Date prefixes** date blog posts: `2018-02-05-david-grains.md`. The
//!   date becomes part of the post's route (`/blog/2018/02/05/david-grains`).
//!
//! ## Display Titles
//!
//! Dashes and underscores in the name are shown as spaces when a file has no
//! title of its own: `02-getting-started.md` → "getting started".

/// Result of parsing a numbered entry name like `02-getting-started`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Number prefix if present (e.g., `2` from `02-getting-started`)
    pub number: Option<u32>,
    /// Name part after the prefix and its separator.
    /// For unnumbered or number-only entries, this is the full input.
    pub name: String,
    /// Display title: name with dashes and underscores converted to spaces.
    pub display_title: String,
}

/// Separators allowed between a number prefix and the name.
const PREFIX_SEPARATORS: &[char] = &['-', '_', '.', ' '];

/// Parse an entry name following the `NN-name` convention.
///
/// - `"02-getting-started"` → number=Some(2), name="getting-started"
/// - `"10_api"` → number=Some(10), name="api"
/// - `"3.config"` → number=Some(3), name="config"
/// - `"2019"` → number=None, name="2019" (a bare number stays a name)
/// - `"01-"` → number=None, name="01-"
/// - `"intro"` → number=None, name="intro"
pub fn parse_entry_name(name: &str) -> ParsedName {
    let digits = name.chars().take_while(char::is_ascii_digit).count();
    if digits > 0
        && let Some(sep) = name[digits..].chars().next()
        && PREFIX_SEPARATORS.contains(&sep)
    {
        let rest = &name[digits + sep.len_utf8()..];
        if !rest.is_empty()
            && let Ok(num) = name[..digits].parse::<u32>()
        {
            return ParsedName {
                number: Some(num),
                name: rest.to_string(),
                display_title: display_title(rest),
            };
        }
    }
    ParsedName {
        number: None,
        name: name.to_string(),
        display_title: display_title(name),
    }
}

fn display_title(name: &str) -> String {
    name.replace(['-', '_'], " ")
}

/// A `YYYY-MM-DD-slug` name split into date and slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatedName {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub slug: String,
}

impl DatedName {
    /// `YYYY/MM/DD`, the date part of a post route.
    pub fn route_segment(&self) -> String {
        format!("{:04}/{:02}/{:02}", self.year, self.month, self.day)
    }

    /// `YYYY-MM-DD`.
    pub fn date(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Parse a `YYYY-MM-DD-slug` name. Returns `None` when the name has no date
/// prefix, the date is not a real calendar day, or the slug is empty.
pub fn parse_dated_name(name: &str) -> Option<DatedName> {
    let bytes = name.as_bytes();
    if bytes.len() < 12 || bytes[4] != b'-' || bytes[7] != b'-' || bytes[10] != b'-' {
        return None;
    }
    let year: u16 = digits_only(&name[0..4])?.parse().ok()?;
    let month: u8 = digits_only(&name[5..7])?.parse().ok()?;
    let day: u8 = digits_only(&name[8..10])?.parse().ok()?;
    if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
        return None;
    }
    Some(DatedName {
        year,
        month,
        day,
        slug: name[11..].to_string(),
    })
}

fn digits_only(s: &str) -> Option<&str> {
    s.bytes().all(|b| b.is_ascii_digit()).then_some(s)
}

fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        2 if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_with_multi_word_name() {
        let p = parse_entry_name("02-getting-started");
        assert_eq!(p.number, Some(2));
        assert_eq!(p.name, "getting-started");
        assert_eq!(p.display_title, "getting started");
    }

    #[test]
    fn other_separators() {
        assert_eq!(parse_entry_name("10_api").name, "api");
        assert_eq!(parse_entry_name("3.config").number, Some(3));
        assert_eq!(parse_entry_name("4 tutorial").name, "tutorial");
    }

    #[test]
    fn unnumbered() {
        let p = parse_entry_name("first_model");
        assert_eq!(p.number, None);
        assert_eq!(p.name, "first_model");
        assert_eq!(p.display_title, "first model");
    }

    #[test]
    fn bare_number_stays_a_name() {
        let p = parse_entry_name("2019");
        assert_eq!(p.number, None);
        assert_eq!(p.name, "2019");
    }

    #[test]
    fn prefix_without_name_is_not_a_prefix() {
        let p = parse_entry_name("01-");
        assert_eq!(p.number, None);
        assert_eq!(p.name, "01-");
    }

    #[test]
    fn digits_without_separator_are_part_of_name() {
        let p = parse_entry_name("3dpdr");
        assert_eq!(p.number, None);
        assert_eq!(p.name, "3dpdr");
    }

    #[test]
    fn dated_name() {
        let d = parse_dated_name("2018-02-05-david-grains").unwrap();
        assert_eq!((d.year, d.month, d.day), (2018, 2, 5));
        assert_eq!(d.slug, "david-grains");
        assert_eq!(d.route_segment(), "2018/02/05");
        assert_eq!(d.date(), "2018-02-05");
    }

    #[test]
    fn dated_name_rejects_impossible_dates() {
        assert_eq!(parse_dated_name("2018-02-30-x"), None);
        assert_eq!(parse_dated_name("2018-13-01-x"), None);
        assert_eq!(parse_dated_name("2019-02-29-x"), None);
        assert!(parse_dated_name("2020-02-29-x").is_some());
    }

    #[test]
    fn dated_name_needs_slug_and_shape() {
        assert_eq!(parse_dated_name("2018-02-05"), None);
        assert_eq!(parse_dated_name("2018-02-05-"), None);
        assert_eq!(parse_dated_name("18-02-05-post"), None);
        assert_eq!(parse_dated_name("intro"), None);
    }
}
