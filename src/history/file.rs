//! JSON file order history
//!
//! The whole collection lives in one JSON array and is rewritten on every
//! append. One writer per file; concurrent writers lose updates.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tracing::{debug, error, info, warn};

use super::{FinalizedOrder, HistoryError, NewOrder, OrderHistoryStore, orders_for_user};

/// History persisted as a JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileHistory {
    path: PathBuf,
}

impl JsonFileHistory {
    /// History stored at `path`. The file is created on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the history file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored collection, most recently appended first.
    ///
    /// # Errors
    ///
    /// Returns a [`HistoryError`] if the file cannot be read or any record
    /// fails to parse. A missing file is an empty history.
    pub fn load(&self) -> Result<Vec<FinalizedOrder>, HistoryError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => return Err(error.into()),
        };

        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_str(&contents)?)
    }

    /// Read the stored collection, treating any failure as an empty history.
    pub fn orders(&self) -> Vec<FinalizedOrder> {
        self.load().unwrap_or_else(|error| {
            warn!(path = %self.path.display(), %error, "ignoring unreadable order history");
            Vec::new()
        })
    }

    /// Replace the stored collection.
    ///
    /// # Errors
    ///
    /// Returns a [`HistoryError`] if the collection cannot be serialized or
    /// the file cannot be replaced.
    pub fn save(&self, orders: &[FinalizedOrder]) -> Result<(), HistoryError> {
        let json = serde_json::to_vec(orders)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        fs::create_dir_all(dir)?;

        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(&json)?;
        file.as_file().sync_all()?;
        file.persist(&self.path)?;

        debug!(path = %self.path.display(), orders = orders.len(), "order history saved");

        Ok(())
    }
}

impl OrderHistoryStore for JsonFileHistory {
    fn append(&mut self, order: NewOrder) -> FinalizedOrder {
        let order = FinalizedOrder::from_new(order);

        let mut orders = self.orders();
        orders.insert(0, order.clone());

        match self.save(&orders) {
            Ok(()) => info!(
                order_id = %order.id,
                user_id = %order.user_id,
                "order appended to history"
            ),
            Err(error) => error!(
                order_id = %order.id,
                path = %self.path.display(),
                %error,
                "failed to persist order history"
            ),
        }

        order
    }

    fn list_for_user(&self, user_id: &str) -> Vec<FinalizedOrder> {
        orders_for_user(self.orders(), user_id)
    }
}
