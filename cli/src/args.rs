use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "vacancies",
    about = "Collect hh.ru vacancies into a local JSON catalog and browse it",
    version
)]
pub struct Cli {
    /// Catalog file (overrides VACANCIES_FILE).
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search hh.ru by keyword and append the results to the catalog
    Fetch(FetchArgs),
    /// Print stored vacancies, optionally above a salary threshold
    List(ListArgs),
    /// Print the best paid stored vacancies
    Top(TopArgs),
    /// Print stored vacancies whose description mentions a keyword
    Search(SearchArgs),
    /// Delete the stored vacancy listed under a url
    Delete(DeleteArgs),
    /// Interactive menu (default command)
    Menu,
}

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Search text sent to hh.ru.
    #[arg(long)]
    pub keyword: String,

    /// hh.ru region id (113 Russia, 1 Moscow, 2 Saint Petersburg).
    #[arg(long)]
    pub area: Option<u32>,

    /// Number of vacancies to request.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub per_page: Option<u32>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only vacancies paying at least this much.
    #[arg(long)]
    pub min_salary: Option<u64>,
}

#[derive(Debug, Args)]
pub struct TopArgs {
    /// How many vacancies to show.
    #[arg(long, short = 'n', default_value_t = 10)]
    pub count: usize,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Case-insensitive text to look for in descriptions.
    #[arg(long)]
    pub keyword: String,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Url of the vacancy to delete.
    #[arg(long)]
    pub url: String,
}
