//! The interactive loop: fetch, top-N, keyword search, delete by url.

use std::io::{BufRead, Write};

use anyhow::Context as _;
use common::config::{ApiConfig, MAX_PER_PAGE};
use common::VacancyStorage;
use fetcher::HeadHunterApi;
use tracing::{debug, warn};

use crate::commands::{delete_by_url, print_search, print_top, save_fetched};

enum Flow {
    Continue,
    Exit,
}

pub struct Menu<'a, R, W> {
    input: R,
    output: W,
    storage: &'a dyn VacancyStorage,
    api: ApiConfig,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(input: R, output: W, storage: &'a dyn VacancyStorage, api: ApiConfig) -> Self {
        Self {
            input,
            output,
            storage,
            api,
        }
    }

    /// Runs until the user picks `0` or input ends.
    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            self.print_options()?;
            let Some(choice) = self.prompt("Выберите действие: ")? else {
                break;
            };
            debug!(choice = choice.as_str(), "menu choice");

            let flow = match choice.trim() {
                "1" => self.fetch_and_save()?,
                "2" => self.show_top()?,
                "3" => self.search_description()?,
                "4" => self.delete_by_url()?,
                "0" => Flow::Exit,
                _ => {
                    writeln!(self.output, "Неверный выбор. Повторите.")?;
                    Flow::Continue
                }
            };

            if let Flow::Exit = flow {
                break;
            }
        }

        writeln!(self.output, "Выход из программы.")?;
        Ok(())
    }

    fn print_options(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "\n=== Вакансии с HH.ru ===")?;
        writeln!(self.output, "1. Ввести поисковый запрос и сохранить вакансии")?;
        writeln!(self.output, "2. Получить топ N вакансий по зарплате")?;
        writeln!(self.output, "3. Поиск по ключевому слову в описании")?;
        writeln!(self.output, "4. Удалить вакансию по URL")?;
        writeln!(self.output, "0. Выход")?;
        Ok(())
    }

    /// Prints `label` and reads one line. `None` once input is exhausted.
    fn prompt(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).context("read menu input")?;
        if read == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn fetch_and_save(&mut self) -> anyhow::Result<Flow> {
        let Some(query) = self.prompt("Введите поисковый запрос: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(area) = self.prompt(
            "Введите ID региона (например, 113 — Россия, 1 — Москва, 2 — Санкт-Петербург): ",
        )?
        else {
            return Ok(Flow::Exit);
        };
        let Some(per_page) = self.prompt("Сколько вакансий сохранить (макс. 100)? ")? else {
            return Ok(Flow::Exit);
        };

        let (Ok(area), Ok(per_page)) = (area.trim().parse::<u32>(), per_page.trim().parse::<u32>())
        else {
            writeln!(self.output, "Ошибка ввода. Регион и количество должны быть числами.")?;
            return Ok(Flow::Continue);
        };
        if !(1..=MAX_PER_PAGE).contains(&per_page) {
            writeln!(self.output, "Ошибка ввода. Количество должно быть от 1 до {MAX_PER_PAGE}.")?;
            return Ok(Flow::Continue);
        }

        let config = ApiConfig {
            area,
            per_page,
            ..self.api.clone()
        };
        let saved = HeadHunterApi::new(config)
            .context("build hh.ru client")
            .and_then(|api| save_fetched(self.storage, &api, &query));

        match saved {
            Ok(count) => writeln!(self.output, "Сохранено {count} вакансий.")?,
            Err(err) => {
                warn!(error = %format!("{err:#}"), "fetch from menu failed");
                writeln!(self.output, "Ошибка при получении вакансий: {err:#}")?;
            }
        }
        Ok(Flow::Continue)
    }

    fn show_top(&mut self) -> anyhow::Result<Flow> {
        let Some(answer) = self.prompt("Введите количество вакансий: ")? else {
            return Ok(Flow::Exit);
        };
        let Ok(n) = answer.trim().parse::<usize>() else {
            writeln!(self.output, "Ошибка: нужно ввести число.")?;
            return Ok(Flow::Continue);
        };

        print_top(&mut self.output, self.storage, n)?;
        Ok(Flow::Continue)
    }

    fn search_description(&mut self) -> anyhow::Result<Flow> {
        let Some(keyword) = self.prompt("Введите ключевое слово для поиска в описании: ")? else {
            return Ok(Flow::Exit);
        };

        print_search(&mut self.output, self.storage, &keyword)?;
        Ok(Flow::Continue)
    }

    fn delete_by_url(&mut self) -> anyhow::Result<Flow> {
        let Some(url) = self.prompt("Введите URL вакансии для удаления: ")? else {
            return Ok(Flow::Exit);
        };

        let message = if delete_by_url(self.storage, url.trim())? {
            "Вакансия удалена."
        } else {
            "Вакансия с таким URL не найдена."
        };
        writeln!(self.output, "{message}")?;
        Ok(Flow::Continue)
    }
}
