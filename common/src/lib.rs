//! Vacancy catalog core
//!
//! The vacancy entity, its JSON-file store, and the helpers callers use to
//! sort and filter what the store returns.

pub mod config;
pub mod error;
pub mod logging;
pub mod selection;
pub mod storage;
pub mod vacancy;

pub use error::{ConfigError, LoggingError, StorageError};
pub use storage::{Catalog, CatalogSource, JsonVacancyStorage, VacancyStorage};
pub use vacancy::{by_salary, Vacancy};
