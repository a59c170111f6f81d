//! The vacancy entity: one normalized job posting.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Title used when the source posting has none.
pub const DEFAULT_TITLE: &str = "Без названия";

/// Description used when the source posting has no requirement snippet.
pub const DEFAULT_DESCRIPTION: &str = "Описание не указано";

/// A job posting in canonical form.
///
/// Fields are fixed at construction. `PartialEq` compares all four fields;
/// use [`by_salary`] to order vacancies and [`Vacancy::same_posting`] to match
/// stored records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vacancy {
    title: String,
    url: String,
    salary: u64,
    description: String,
}

impl Vacancy {
    /// Builds a vacancy, filling defaults for absent fields and clamping the
    /// salary to zero when it is absent or negative.
    pub fn new(
        title: Option<String>,
        url: Option<String>,
        salary: Option<i64>,
        description: Option<String>,
    ) -> Self {
        Self {
            title: title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            url: url.unwrap_or_default(),
            salary: normalize_salary(salary),
            description: description.unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        }
    }

    /// Shorthand for a vacancy whose text fields are all known.
    pub fn from_parts(title: &str, url: &str, salary: Option<i64>, description: &str) -> Self {
        Self::new(
            Some(title.to_string()),
            Some(url.to_string()),
            salary,
            Some(description.to_string()),
        )
    }

    /// Maps one element of the hh.ru `items` array.
    ///
    /// `name` becomes the title, `alternate_url` the url, `salary.from` the
    /// salary and `snippet.requirement` the description. A missing path, a
    /// `null`, or a value of the wrong JSON type all count as absent.
    pub fn from_raw(raw: &Value) -> Self {
        let text = |pointer: &str| {
            raw.pointer(pointer)
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        Self::new(
            text("/name"),
            text("/alternate_url"),
            raw.pointer("/salary/from").and_then(salary_from_json),
            text("/snippet/requirement"),
        )
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn salary(&self) -> u64 {
        self.salary
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// True when both vacancies refer to the same stored posting, i.e. their
    /// `(title, url)` pairs match exactly. Salary and description are ignored.
    pub fn same_posting(&self, other: &Vacancy) -> bool {
        self.title == other.title && self.url == other.url
    }
}

impl fmt::Display for Vacancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {} руб. | {}", self.title, self.salary, self.url)
    }
}

/// Total order on salary alone, for use with `sort_by`.
pub fn by_salary(a: &Vacancy, b: &Vacancy) -> Ordering {
    a.salary.cmp(&b.salary)
}

/// Absent and negative salaries become zero.
pub fn normalize_salary(salary: Option<i64>) -> u64 {
    salary
        .and_then(|value| u64::try_from(value).ok())
        .unwrap_or(0)
}

/// Reads a salary from JSON, accepting integers only.
///
/// Floats, strings, booleans and `null` yield `None`, as does an integer
/// outside the `i64` range.
pub fn salary_from_json(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_negative_salary_is_kept() {
        for salary in [0, 1, 100_000, i64::MAX] {
            let vacancy = Vacancy::from_parts("Test", "url", Some(salary), "desc");
            assert_eq!(vacancy.salary(), salary as u64);
        }
    }

    #[test]
    fn missing_or_negative_salary_becomes_zero() {
        assert_eq!(Vacancy::from_parts("Test", "url", None, "desc").salary(), 0);
        assert_eq!(Vacancy::from_parts("Test", "url", Some(-100), "desc").salary(), 0);
        assert_eq!(Vacancy::from_parts("Test", "url", Some(i64::MIN), "desc").salary(), 0);
    }

    #[test]
    fn absent_fields_take_defaults() {
        let vacancy = Vacancy::new(None, None, None, None);
        assert_eq!(vacancy.title(), DEFAULT_TITLE);
        assert_eq!(vacancy.url(), "");
        assert_eq!(vacancy.salary(), 0);
        assert_eq!(vacancy.description(), DEFAULT_DESCRIPTION);
    }

    #[test]
    fn from_raw_maps_nested_fields() {
        let raw = json!({
            "name": "Backend",
            "alternate_url": "https://x/1",
            "salary": {"from": 150000},
            "snippet": {"requirement": "3+ years"}
        });

        let vacancy = Vacancy::from_raw(&raw);
        assert_eq!(vacancy.title(), "Backend");
        assert_eq!(vacancy.url(), "https://x/1");
        assert_eq!(vacancy.salary(), 150000);
        assert_eq!(vacancy.description(), "3+ years");
    }

    #[test]
    fn from_raw_treats_null_and_missing_paths_as_absent() {
        let raw = json!({
            "name": null,
            "salary": null,
            "snippet": {"requirement": null}
        });

        let vacancy = Vacancy::from_raw(&raw);
        assert_eq!(vacancy, Vacancy::new(None, None, None, None));

        let empty = Vacancy::from_raw(&json!({}));
        assert_eq!(empty, vacancy);
    }

    #[test]
    fn from_raw_ignores_non_integer_salary_bounds() {
        for from in [json!(1500.5), json!("150000"), json!(true), json!(null)] {
            let raw = json!({"name": "Dev", "salary": {"from": from, "to": 200000}});
            assert_eq!(Vacancy::from_raw(&raw).salary(), 0, "salary.from = {from}");
        }
    }

    #[test]
    fn from_raw_uses_lower_bound_only() {
        let raw = json!({"salary": {"from": null, "to": 300000, "currency": "RUR"}});
        assert_eq!(Vacancy::from_raw(&raw).salary(), 0);
    }

    #[test]
    fn display_shows_title_salary_and_url() {
        let vacancy = Vacancy::from_parts("Python Dev", "http://hh.ru/1", Some(100000), "d");
        assert_eq!(vacancy.to_string(), "Python Dev | 100000 руб. | http://hh.ru/1");
    }

    #[test]
    fn debug_exposes_every_field() {
        let vacancy = Vacancy::from_parts("A", "u", Some(5), "req");
        let debug = format!("{vacancy:?}");
        for part in ["\"A\"", "\"u\"", "5", "\"req\""] {
            assert!(debug.contains(part), "{debug} missing {part}");
        }
    }

    #[test]
    fn ordering_uses_salary_only() {
        let low = Vacancy::from_parts("A", "url", Some(50000), "desc");
        let high = Vacancy::from_parts("B", "url", Some(100000), "desc");
        let same_pay = Vacancy::from_parts("C", "other", Some(50000), "other");

        assert_eq!(by_salary(&low, &high), Ordering::Less);
        assert_eq!(by_salary(&high, &low), Ordering::Greater);
        assert_eq!(by_salary(&low, &same_pay), Ordering::Equal);
        assert_ne!(low, same_pay);
    }

    #[test]
    fn same_posting_ignores_salary_and_description() {
        let stored = Vacancy::from_parts("Dup", "u", Some(100), "a");
        let probe = Vacancy::from_parts("Dup", "u", Some(999), "b");
        let other_url = Vacancy::from_parts("Dup", "v", Some(100), "a");

        assert!(stored.same_posting(&probe));
        assert!(!stored.same_posting(&other_url));
    }
}
