use std::io::{self, Write};

use common::Vacancy;
use scraper::Html;

/// Printed after every vacancy in a listing.
pub const SEPARATOR: &str = "----------------------------------------";

/// Text content of an HTML fragment. hh.ru wraps matched words in
/// requirement snippets with `<highlighttext>` tags.
pub fn plain_text(fragment: &str) -> String {
    let text = Html::parse_fragment(fragment)
        .root_element()
        .text()
        .collect::<String>();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn write_listing(out: &mut impl Write, vacancies: &[Vacancy]) -> io::Result<()> {
    for vacancy in vacancies {
        writeln!(out, "{vacancy}")?;
        writeln!(out, "{SEPARATOR}")?;
    }
    Ok(())
}

/// Like [`write_listing`], with the description under each line.
pub fn write_listing_with_descriptions(
    out: &mut impl Write,
    vacancies: &[Vacancy],
) -> io::Result<()> {
    for vacancy in vacancies {
        writeln!(out, "{vacancy}")?;
        writeln!(out, "  {}", plain_text(vacancy.description()))?;
        writeln!(out, "{SEPARATOR}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separator_is_forty_dashes() {
        assert_eq!(SEPARATOR.len(), 40);
        assert!(SEPARATOR.chars().all(|c| c == '-'));
    }

    #[test]
    fn plain_text_drops_highlight_markup() {
        assert_eq!(
            plain_text("Опыт с <highlighttext>Python</highlighttext> от 3 лет"),
            "Опыт с Python от 3 лет"
        );
        assert_eq!(plain_text("3+ years"), "3+ years");
    }

    #[test]
    fn listing_prints_each_vacancy_then_separator() {
        let vacancies = vec![
            Vacancy::from_parts("A", "u1", Some(10), "d"),
            Vacancy::from_parts("B", "u2", None, "d"),
        ];
        let mut out = Vec::new();
        write_listing(&mut out, &vacancies).expect("write to vec");

        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(
            text,
            format!("A | 10 руб. | u1\n{SEPARATOR}\nB | 0 руб. | u2\n{SEPARATOR}\n")
        );
    }
}
