use std::io::{self, Write};

use anyhow::Context as _;
use common::config::{ApiConfig, Settings};
use common::selection::{find_by_url, matching_keyword, top_by_salary};
use common::{JsonVacancyStorage, VacancyStorage};
use fetcher::{fetch_vacancies, HeadHunterApi, JobApi};
use tracing::info;

use crate::args::{Cli, Command, FetchArgs};
use crate::display::{write_listing, write_listing_with_descriptions};
use crate::menu::Menu;

pub fn run(cli: Cli, mut settings: Settings) -> anyhow::Result<()> {
    if let Some(file) = cli.file {
        settings.storage.path = file;
    }
    let storage = JsonVacancyStorage::new(&settings.storage.path);
    info!(path = %storage.path().display(), "using catalog");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command.unwrap_or(Command::Menu) {
        Command::Fetch(args) => {
            let api = HeadHunterApi::new(fetch_config(&settings.api, &args))
                .context("build hh.ru client")?;
            let saved = save_fetched(&storage, &api, &args.keyword)?;
            writeln!(out, "Сохранено {saved} вакансий.")?;
        }
        Command::List(args) => {
            let vacancies = storage
                .vacancies_by_criteria(args.min_salary)
                .context("query catalog")?;
            write_listing(&mut out, &vacancies)?;
        }
        Command::Top(args) => print_top(&mut out, &storage, args.count)?,
        Command::Search(args) => print_search(&mut out, &storage, &args.keyword)?,
        Command::Delete(args) => {
            let message = if delete_by_url(&storage, &args.url)? {
                "Вакансия удалена."
            } else {
                "Вакансия с таким URL не найдена."
            };
            writeln!(out, "{message}")?;
        }
        Command::Menu => {
            let stdin = io::stdin();
            Menu::new(stdin.lock(), out, &storage, settings.api).run()?;
        }
    }

    Ok(())
}

fn fetch_config(base: &ApiConfig, args: &FetchArgs) -> ApiConfig {
    ApiConfig {
        area: args.area.unwrap_or(base.area),
        per_page: args.per_page.unwrap_or(base.per_page),
        ..base.clone()
    }
}

/// Fetches by keyword and appends every result to the catalog.
pub fn save_fetched(
    storage: &dyn VacancyStorage,
    api: &dyn JobApi,
    keyword: &str,
) -> anyhow::Result<usize> {
    let vacancies = fetch_vacancies(api, keyword).context("fetch vacancies")?;
    for vacancy in &vacancies {
        storage.add_vacancy(vacancy).context("save vacancy")?;
    }
    Ok(vacancies.len())
}

pub fn print_top(out: &mut impl Write, storage: &dyn VacancyStorage, n: usize) -> anyhow::Result<()> {
    let all = storage.vacancies_by_criteria(None).context("query catalog")?;
    let top = top_by_salary(all, n);

    writeln!(out, "\nТоп-{n} вакансий:")?;
    write_listing(out, &top)?;
    Ok(())
}

pub fn print_search(
    out: &mut impl Write,
    storage: &dyn VacancyStorage,
    keyword: &str,
) -> anyhow::Result<()> {
    let all = storage.vacancies_by_criteria(None).context("query catalog")?;
    let results = matching_keyword(all, keyword);

    if results.is_empty() {
        writeln!(out, "Ничего не найдено.")?;
    } else {
        writeln!(out, "\nНайдено {} вакансий:", results.len())?;
        write_listing_with_descriptions(out, &results)?;
    }
    Ok(())
}

/// Deletes the first stored vacancy with this url, together with every other
/// record sharing its title and url. Returns false when the url is unknown.
pub fn delete_by_url(storage: &dyn VacancyStorage, url: &str) -> anyhow::Result<bool> {
    let all = storage.vacancies_by_criteria(None).context("query catalog")?;
    let Some(target) = find_by_url(&all, url) else {
        return Ok(false);
    };

    storage.delete_vacancy(target).context("delete vacancy")?;
    Ok(true)
}
