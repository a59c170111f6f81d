//! JSON-file backed vacancy catalog.
//!
//! Every operation is a full read-modify-write pass over one file. There is no
//! locking: two processes writing the same path can lose each other's updates.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::StorageError;
use crate::vacancy::{salary_from_json, Vacancy};

/// File name used when no catalog path is configured.
pub const DEFAULT_CATALOG_FILE: &str = "vacancies.json";

/// Storage abstraction shared by the command line and the HTTP server.
pub trait VacancyStorage: Send + Sync {
    /// Appends the vacancy to the end of the catalog. Duplicates accumulate.
    fn add_vacancy(&self, vacancy: &Vacancy) -> Result<(), StorageError>;

    /// Returns stored vacancies in insertion order, keeping only those paid at
    /// least `min_salary` when a threshold is given.
    fn vacancies_by_criteria(&self, min_salary: Option<u64>)
        -> Result<Vec<Vacancy>, StorageError>;

    /// Removes every record whose `(title, url)` pair matches the vacancy and
    /// returns how many were removed.
    fn delete_vacancy(&self, vacancy: &Vacancy) -> Result<usize, StorageError>;
}

/// Where the records of a [`Catalog`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    /// The backing file does not exist yet.
    Missing,
    /// The file exists but does not hold a JSON array.
    Unreadable,
    /// Records were parsed from the file.
    File,
}

/// Raw records as they sit on disk, in order.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub source: CatalogSource,
    pub records: Vec<Value>,
}

impl Catalog {
    fn empty(source: CatalogSource) -> Self {
        Self {
            source,
            records: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// On-disk shape of one record. All four keys are required; the salary is
/// re-validated when the vacancy is rebuilt.
#[derive(Debug, Deserialize)]
struct StoredVacancy {
    title: String,
    url: String,
    salary: Value,
    description: String,
}

impl From<StoredVacancy> for Vacancy {
    fn from(record: StoredVacancy) -> Self {
        Vacancy::new(
            Some(record.title),
            Some(record.url),
            salary_from_json(&record.salary),
            Some(record.description),
        )
    }
}

#[derive(Debug, Clone)]
pub struct JsonVacancyStorage {
    path: PathBuf,
}

impl Default for JsonVacancyStorage {
    fn default() -> Self {
        Self::new(DEFAULT_CATALOG_FILE)
    }
}

impl JsonVacancyStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole catalog.
    ///
    /// A missing file, or one that is not a JSON array, yields an empty
    /// catalog tagged with its [`CatalogSource`]. Only I/O failures other than
    /// "not found" are errors.
    pub fn read_catalog(&self) -> Result<Catalog, StorageError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "catalog file missing, starting empty");
                return Ok(Catalog::empty(CatalogSource::Missing));
            }
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Array(records)) => Ok(Catalog {
                source: CatalogSource::File,
                records,
            }),
            Ok(_) => {
                warn!(path = %self.path.display(), "catalog is not a JSON array, treating as empty");
                Ok(Catalog::empty(CatalogSource::Unreadable))
            }
            Err(err) => {
                warn!(path = %self.path.display(), %err, "catalog is not valid JSON, treating as empty");
                Ok(Catalog::empty(CatalogSource::Unreadable))
            }
        }
    }

    /// Replaces the file with `records`. Data goes to a sibling temporary file
    /// first and is then renamed over the catalog.
    fn write_all(&self, records: &[Value]) -> Result<(), StorageError> {
        let mut data = serde_json::to_vec_pretty(records)?;
        data.push(b'\n');

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| self.write_error(source))?;
        }

        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, &data).map_err(|source| self.write_error(source))?;
        if let Err(source) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(self.write_error(source));
        }

        debug!(path = %self.path.display(), records = records.len(), "catalog written");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| DEFAULT_CATALOG_FILE.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl VacancyStorage for JsonVacancyStorage {
    fn add_vacancy(&self, vacancy: &Vacancy) -> Result<(), StorageError> {
        let mut catalog = self.read_catalog()?;
        catalog.records.push(serde_json::to_value(vacancy)?);
        self.write_all(&catalog.records)?;

        info!(title = vacancy.title(), url = vacancy.url(), total = catalog.len(), "vacancy added");
        Ok(())
    }

    fn vacancies_by_criteria(
        &self,
        min_salary: Option<u64>,
    ) -> Result<Vec<Vacancy>, StorageError> {
        let catalog = self.read_catalog()?;
        let mut vacancies = Vec::with_capacity(catalog.len());

        for (index, record) in catalog.records.into_iter().enumerate() {
            let vacancy: Vacancy = serde_json::from_value::<StoredVacancy>(record)
                .map_err(|source| StorageError::MalformedRecord {
                    path: self.path.clone(),
                    index,
                    source,
                })?
                .into();

            if min_salary.map_or(true, |min| vacancy.salary() >= min) {
                vacancies.push(vacancy);
            }
        }

        debug!(?min_salary, matched = vacancies.len(), "catalog queried");
        Ok(vacancies)
    }

    fn delete_vacancy(&self, vacancy: &Vacancy) -> Result<usize, StorageError> {
        let mut catalog = self.read_catalog()?;
        let before = catalog.len();
        catalog
            .records
            .retain(|record| !record_matches(record, vacancy));
        let removed = before - catalog.len();

        self.write_all(&catalog.records)?;

        info!(title = vacancy.title(), url = vacancy.url(), removed, "vacancy deleted");
        Ok(removed)
    }
}

/// Identity match on a raw record. Records without string `title` and `url`
/// never match.
fn record_matches(record: &Value, vacancy: &Vacancy) -> bool {
    let field = |name: &str| record.get(name).and_then(Value::as_str);
    field("title") == Some(vacancy.title()) && field("url") == Some(vacancy.url())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tmp_path_sits_next_to_catalog() {
        let storage = JsonVacancyStorage::new("data/vacancies.json");
        assert_eq!(storage.tmp_path(), PathBuf::from("data/vacancies.json.tmp"));
    }

    #[test]
    fn record_matches_requires_both_identity_fields() {
        let vacancy = Vacancy::from_parts("Dev", "u", Some(1), "d");
        assert!(record_matches(
            &json!({"title": "Dev", "url": "u", "salary": 5, "description": "x"}),
            &vacancy
        ));
        assert!(!record_matches(&json!({"title": "Dev", "url": "v"}), &vacancy));
        assert!(!record_matches(&json!({"url": "u"}), &vacancy));
        assert!(!record_matches(&json!({"title": 1, "url": "u"}), &vacancy));
    }

    #[test]
    fn stored_record_salary_is_revalidated() {
        let record = json!({"title": "T", "url": "u", "salary": -5, "description": "d"});
        let vacancy: Vacancy = serde_json::from_value::<StoredVacancy>(record)
            .expect("record parses")
            .into();
        assert_eq!(vacancy.salary(), 0);
    }

    #[test]
    fn vacancy_serializes_in_catalog_field_order() {
        let value = serde_json::to_value(Vacancy::from_parts("T", "u", Some(7), "d"))
            .expect("vacancy serializes");
        let keys: Vec<&str> = value
            .as_object()
            .expect("object")
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["title", "url", "salary", "description"]);
    }
}
