//! Caller-side views over vacancies returned by the store.

use crate::vacancy::{by_salary, Vacancy};

/// The `n` best paid vacancies, highest first. Ties keep catalog order.
pub fn top_by_salary(mut vacancies: Vec<Vacancy>, n: usize) -> Vec<Vacancy> {
    vacancies.sort_by(|a, b| by_salary(b, a));
    vacancies.truncate(n);
    vacancies
}

/// Vacancies whose description contains `keyword`, ignoring case.
pub fn matching_keyword(vacancies: Vec<Vacancy>, keyword: &str) -> Vec<Vacancy> {
    let needle = keyword.to_lowercase();
    vacancies
        .into_iter()
        .filter(|vacancy| vacancy.description().to_lowercase().contains(&needle))
        .collect()
}

/// First vacancy listed under exactly this url.
pub fn find_by_url<'a>(vacancies: &'a [Vacancy], url: &str) -> Option<&'a Vacancy> {
    vacancies.iter().find(|vacancy| vacancy.url() == url)
}
