//! Version dispatch for entity readers.
//!
//! Each entity kind owns one [`ReaderRegistry`]: a sorted table mapping a
//! declared API version to the reader function for that wire shape. The
//! declared sets are deliberately sparse (most kinds only declare 2.0); a
//! controller reporting 2.1.9 is still served by the 2.0 reader because
//! resolution picks the greatest declared version at or below the target.
//! Registries are built once behind `LazyLock` and are read-only afterwards,
//! so decode calls are safe to run concurrently without coordination.

use crate::core::domain::error::{DeserializationError, MaasError, MaasResult};
use crate::core::domain::schema::json_type_name;
use crate::core::domain::value_object::ApiVersion;
use serde_json::Value;

/// A reader for one declared wire shape. The target version is passed
/// through so nested entity fields re-resolve their own registries at the
/// same controller version (MAAS versions its whole API atomically).
pub type ReaderFn<T> = fn(ApiVersion, &Value) -> MaasResult<T>;

/// Per-kind table of versioned readers.
pub struct ReaderRegistry<T> {
    kind: &'static str,
    readers: Vec<(ApiVersion, ReaderFn<T>)>,
}

impl<T> ReaderRegistry<T> {
    /// Builds a registry from `(declared version, reader)` pairs. The table
    /// is sorted here so resolution never depends on declaration order, and
    /// each version may be declared at most once.
    pub fn new(kind: &'static str, mut readers: Vec<(ApiVersion, ReaderFn<T>)>) -> Self {
        readers.sort_by_key(|(version, _)| *version);
        debug_assert!(
            readers.windows(2).all(|pair| pair[0].0 < pair[1].0),
            "duplicate reader version declared for {}",
            kind
        );
        Self { kind, readers }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Selects the reader with the greatest declared version at or below
    /// `target`. A target above every declared version resolves to the
    /// highest declared reader (newer servers are a superset of the latest
    /// known shape); a target below every declared version is unsupported.
    fn resolve(&self, target: ApiVersion) -> MaasResult<ReaderFn<T>> {
        let idx = self
            .readers
            .partition_point(|(version, _)| *version <= target);
        if idx == 0 {
            return Err(MaasError::UnsupportedVersion {
                kind: self.kind,
                version: target.to_string(),
            });
        }
        Ok(self.readers[idx - 1].1)
    }

    /// Decodes a single entity from an already-parsed JSON value.
    pub fn decode(&self, target: ApiVersion, value: &Value) -> MaasResult<T> {
        let reader = self.resolve(target)?;
        reader(target, value)
    }

    /// Decodes a JSON array into an ordered collection. The first failing
    /// element aborts the whole decode with its zero-based index in the
    /// error context; `[]` decodes to an empty vec.
    pub fn decode_list(&self, target: ApiVersion, value: &Value) -> MaasResult<Vec<T>> {
        let items = value.as_array().ok_or_else(|| {
            MaasError::from(DeserializationError::Value {
                expected: "list",
                actual: json_type_name(value).to_string(),
            })
            .annotate(self.kind.to_string())
        })?;

        let mut decoded = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let entity = self
                .decode(target, item)
                .map_err(|e| e.annotate(format!("{} at index {}", self.kind, index)))?;
            decoded.push(entity);
        }
        Ok(decoded)
    }
}
