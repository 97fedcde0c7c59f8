//! Read-only company storage.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::company::{Company, CompanyId};

/// Errors raised while loading a company store.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read company data: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed company data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate company id {0}")]
    DuplicateId(CompanyId),

    #[error("company {0} has no name")]
    MissingName(CompanyId),
}

/// Source of company records.
///
/// The quiz only ever reads from a store, so one store can back any number of
/// concurrent sessions without locking.
pub trait CompanyStore {
    /// All companies, in a stable order.
    fn query_all(&self) -> &[Company];

    /// Look up a single company.
    fn get(&self, id: CompanyId) -> Option<&Company> {
        self.query_all().iter().find(|c| c.id == id)
    }
}

impl<S: CompanyStore + ?Sized> CompanyStore for &S {
    fn query_all(&self) -> &[Company] {
        (**self).query_all()
    }

    fn get(&self, id: CompanyId) -> Option<&Company> {
        (**self).get(id)
    }
}

impl<S: CompanyStore + ?Sized> CompanyStore for Arc<S> {
    fn query_all(&self) -> &[Company] {
        (**self).query_all()
    }

    fn get(&self, id: CompanyId) -> Option<&Company> {
        (**self).get(id)
    }
}

/// A company store held entirely in memory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Company>", into = "Vec<Company>")]
pub struct InMemoryStore {
    companies: Vec<Company>,
    by_id: HashMap<CompanyId, usize>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from records, normalizing blank fields to absent.
    pub fn from_companies(
        companies: impl IntoIterator<Item = Company>,
    ) -> Result<Self, RegistryError> {
        let mut store = Self::new();
        for company in companies {
            store.insert(company)?;
        }
        Ok(store)
    }

    /// Parse a JSON array of company records.
    pub fn from_json_str(json: &str) -> Result<Self, RegistryError> {
        let companies: Vec<Company> = serde_json::from_str(json)?;
        Self::from_companies(companies)
    }

    /// Load a JSON array of company records from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Add a company to the store.
    pub fn insert(&mut self, company: Company) -> Result<CompanyId, RegistryError> {
        let company = company.normalized();
        let id = company.id;

        if company.name.trim().is_empty() {
            return Err(RegistryError::MissingName(id));
        }
        if self.by_id.contains_key(&id) {
            return Err(RegistryError::DuplicateId(id));
        }

        self.by_id.insert(id, self.companies.len());
        self.companies.push(company);
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.companies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }
}

impl CompanyStore for InMemoryStore {
    fn query_all(&self) -> &[Company] {
        &self.companies
    }

    fn get(&self, id: CompanyId) -> Option<&Company> {
        self.by_id.get(&id).map(|idx| &self.companies[*idx])
    }
}

impl TryFrom<Vec<Company>> for InMemoryStore {
    type Error = RegistryError;

    fn try_from(companies: Vec<Company>) -> Result<Self, Self::Error> {
        Self::from_companies(companies)
    }
}

impl From<InMemoryStore> for Vec<Company> {
    fn from(store: InMemoryStore) -> Self {
        store.companies
    }
}
