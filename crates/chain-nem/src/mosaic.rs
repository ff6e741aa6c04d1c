use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::error::NemError;

/// Fully-qualified mosaic identifier: owning namespace plus mosaic name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MosaicId {
    #[serde(rename = "namespaceId")]
    pub namespace_id: String,
    pub name: String,
}

impl MosaicId {
    pub fn new(namespace_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace_id: namespace_id.into(),
            name: name.into(),
        }
    }

    /// `namespace:name` — the form fee lookups and attachment ordering
    /// key on.
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.namespace_id, self.name)
    }
}

impl fmt::Display for MosaicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace_id, self.name)
    }
}

/// A mosaic quantity attached to a transfer, in the mosaic's smallest unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MosaicAttachment {
    pub mosaic_id: MosaicId,
    pub quantity: u64,
}

impl MosaicAttachment {
    pub fn new(mosaic_id: MosaicId, quantity: u64) -> Self {
        Self {
            mosaic_id,
            quantity,
        }
    }
}

/// Supply and divisibility facts for one mosaic, as observed on chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MosaicMetadata {
    /// Total supply in whole units.
    pub supply: u64,
    /// Decimal places of the smallest unit.
    pub divisibility: u32,
}

/// Lookup table from qualified mosaic name to metadata.
///
/// Fee computation refuses attachments it cannot resolve here, so callers
/// populate the catalog from chain state before pricing a mosaic transfer.
#[derive(Debug, Clone, Default)]
pub struct MosaicCatalog {
    entries: HashMap<String, MosaicMetadata>,
}

impl MosaicCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: &MosaicId, metadata: MosaicMetadata) {
        self.entries.insert(id.qualified_name(), metadata);
    }

    pub fn get(&self, id: &MosaicId) -> Option<MosaicMetadata> {
        self.entries.get(&id.qualified_name()).copied()
    }

    pub fn require(&self, id: &MosaicId) -> Result<MosaicMetadata, NemError> {
        self.get(id)
            .ok_or_else(|| NemError::UnknownMosaic(id.qualified_name()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The four definition properties, serialized in exactly this field order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MosaicProperties {
    pub divisibility: u32,
    pub initial_supply: u64,
    pub supply_mutable: bool,
    pub transferable: bool,
}

/// Levy collected on every transfer of the defined mosaic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MosaicLevy {
    pub kind: LevyKind,
    pub recipient: Address,
    /// Mosaic the levy is paid in.
    pub mosaic_id: MosaicId,
    pub fee: u64,
}

/// How a levy fee is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevyKind {
    /// Fixed quantity per transfer.
    Absolute,
    /// Scaled by the transferred quantity.
    Percentile,
}

impl LevyKind {
    pub fn code(self) -> u32 {
        match self {
            LevyKind::Absolute => 1,
            LevyKind::Percentile => 2,
        }
    }
}
