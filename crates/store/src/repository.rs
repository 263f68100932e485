//! Snapshot format and repository implementations.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use unimart_accounts::{Buyer, Seller};
use unimart_carts::{Cart, Order};
use unimart_catalog::{FidelityPolicy, Product};
use unimart_core::{DomainError, DomainResult};
use unimart_reviews::Review;

/// The whole persisted world, as flat entity lists.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub buyers: Vec<Buyer>,
    pub sellers: Vec<Seller>,
    pub products: Vec<Product>,
    pub carts: Vec<Cart>,
    pub orders: Vec<Order>,
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub fidelity_policy: FidelityPolicy,
}

/// Repository with an explicit lifecycle: load once at startup, save
/// wholesale on demand. Implementations are used single-threaded.
pub trait Repository {
    fn load(&self) -> DomainResult<Snapshot>;
    fn save(&self, snapshot: &Snapshot) -> DomainResult<()>;
}

/// Whole-file JSON repository.
///
/// A missing file loads as an empty snapshot; every save overwrites the
/// file completely.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Repository for JsonFileRepository {
    fn load(&self) -> DomainResult<Snapshot> {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "no snapshot file, starting empty");
            return Ok(Snapshot::default());
        }
        let raw = fs::read_to_string(&self.path)
            .map_err(|e| DomainError::Io(format!("{}: {e}", self.path.display())))?;
        let snapshot = serde_json::from_str(&raw)
            .map_err(|e| DomainError::Serde(format!("{}: {e}", self.path.display())))?;
        Ok(snapshot)
    }

    fn save(&self, snapshot: &Snapshot) -> DomainResult<()> {
        let raw = serde_json::to_string_pretty(snapshot)
            .map_err(|e| DomainError::Serde(e.to_string()))?;
        fs::write(&self.path, raw)
            .map_err(|e| DomainError::Io(format!("{}: {e}", self.path.display())))?;
        tracing::debug!(path = %self.path.display(), "snapshot saved");
        Ok(())
    }
}

/// Repository backed by memory, for tests.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    snapshot: RefCell<Snapshot>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Repository for MemoryRepository {
    fn load(&self) -> DomainResult<Snapshot> {
        Ok(self.snapshot.borrow().clone())
    }

    fn save(&self, snapshot: &Snapshot) -> DomainResult<()> {
        *self.snapshot.borrow_mut() = snapshot.clone();
        Ok(())
    }
}
