use crate::address::Address;
use crate::message::Message;
use crate::mosaic::{MosaicAttachment, MosaicId, MosaicLevy, MosaicProperties};
use crate::network::Network;

/// The eight NIS1 transaction kinds and their wire type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Transfer,
    ImportanceTransfer,
    MultisigAggregateModification,
    MultisigSignature,
    Multisig,
    ProvisionNamespace,
    MosaicDefinition,
    MosaicSupplyChange,
}

impl TransactionKind {
    pub fn code(self) -> u32 {
        match self {
            TransactionKind::Transfer => 0x101,
            TransactionKind::ImportanceTransfer => 0x801,
            TransactionKind::MultisigAggregateModification => 0x1001,
            TransactionKind::MultisigSignature => 0x1002,
            TransactionKind::Multisig => 0x1004,
            TransactionKind::ProvisionNamespace => 0x2001,
            TransactionKind::MosaicDefinition => 0x4001,
            TransactionKind::MosaicSupplyChange => 0x4002,
        }
    }
}

/// Header fields shared by every transaction kind.
///
/// The deadline is always `timestamp + due_minutes * 60`; [`Header::new`]
/// is the only constructor, so the relation holds for every value ever
/// built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Network tag OR'd with the kind's sub-version.
    pub version: u32,
    pub signer_public_key: [u8; 32],
    /// Seconds since the NEM epoch.
    pub timestamp: u32,
    pub deadline: u32,
    /// Micro-XEM.
    pub fee: u64,
}

impl Header {
    pub fn new(
        network: Network,
        sub_version: u32,
        signer_public_key: [u8; 32],
        timestamp: u32,
        due_minutes: u32,
        fee: u64,
    ) -> Self {
        Self {
            version: network.transaction_version(sub_version),
            signer_public_key,
            timestamp,
            deadline: timestamp + due_minutes * 60,
            fee,
        }
    }

    /// Sub-version with the network tag masked off.
    pub fn sub_version(&self) -> u32 {
        self.version & 0x00ff_ffff
    }
}

/// A complete fee-bearing transaction: common header plus kind payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub header: Header,
    pub body: TransactionBody,
}

impl Transaction {
    pub fn kind(&self) -> TransactionKind {
        self.body.kind()
    }
}

/// Closed set of transaction payloads. A kind outside these eight cannot
/// be represented, let alone serialized or signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionBody {
    Transfer(Transfer),
    ImportanceTransfer(ImportanceTransfer),
    AggregateModification(AggregateModification),
    MultisigSignature(MultisigSignature),
    Multisig(Multisig),
    ProvisionNamespace(ProvisionNamespace),
    MosaicDefinition(MosaicDefinition),
    MosaicSupplyChange(MosaicSupplyChange),
}

impl TransactionBody {
    pub fn kind(&self) -> TransactionKind {
        match self {
            TransactionBody::Transfer(_) => TransactionKind::Transfer,
            TransactionBody::ImportanceTransfer(_) => TransactionKind::ImportanceTransfer,
            TransactionBody::AggregateModification(_) => {
                TransactionKind::MultisigAggregateModification
            }
            TransactionBody::MultisigSignature(_) => TransactionKind::MultisigSignature,
            TransactionBody::Multisig(_) => TransactionKind::Multisig,
            TransactionBody::ProvisionNamespace(_) => TransactionKind::ProvisionNamespace,
            TransactionBody::MosaicDefinition(_) => TransactionKind::MosaicDefinition,
            TransactionBody::MosaicSupplyChange(_) => TransactionKind::MosaicSupplyChange,
        }
    }
}

/// XEM and mosaic movement to a recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub recipient: Address,
    /// Micro-XEM; with mosaic attachments this acts as the quantity
    /// multiplier instead.
    pub amount: u64,
    pub message: Message,
    /// Sorted by qualified name at construction; empty for sub-version 1.
    pub mosaics: Vec<MosaicAttachment>,
}

/// Delegated-harvesting link to a remote account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportanceTransfer {
    pub mode: ImportanceMode,
    pub remote_public_key: [u8; 32],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportanceMode {
    Activate,
    Deactivate,
}

impl ImportanceMode {
    pub fn code(self) -> u32 {
        match self {
            ImportanceMode::Activate => 1,
            ImportanceMode::Deactivate => 2,
        }
    }
}

/// Cosignatory set changes on a multisig account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateModification {
    pub modifications: Vec<CosignatoryModification>,
    /// Relative change to the minimum-cosignatory count; presence selects
    /// sub-version 2.
    pub min_cosignatories_delta: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CosignatoryModification {
    pub kind: ModificationKind,
    pub cosignatory_public_key: [u8; 32],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModificationKind {
    Add,
    Remove,
}

impl ModificationKind {
    pub fn code(self) -> u32 {
        match self {
            ModificationKind::Add => 1,
            ModificationKind::Remove => 2,
        }
    }
}

/// A cosigner's approval of a pending multisig transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultisigSignature {
    /// Hash of the inner transaction being cosigned.
    pub inner_hash: [u8; 32],
    /// Address of the multisig account the inner transaction spends from.
    pub multisig_address: Address,
}

/// Envelope carrying an inner transaction issued on behalf of a multisig
/// account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Multisig {
    pub inner: Box<Transaction>,
}

/// Root or sub-namespace registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionNamespace {
    pub rental_fee_sink: Address,
    /// Micro-XEM paid to the sink, distinct from the transaction fee.
    pub rental_fee: u64,
    pub new_part: String,
    /// Qualified parent namespace; `None` provisions a root.
    pub parent: Option<String>,
}

/// Creation of a new mosaic under an owned namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MosaicDefinition {
    pub creator_public_key: [u8; 32],
    pub id: MosaicId,
    pub description: String,
    pub properties: MosaicProperties,
    pub levy: Option<MosaicLevy>,
    pub creation_fee_sink: Address,
    /// Micro-XEM paid to the sink, distinct from the transaction fee.
    pub creation_fee: u64,
}

/// Supply adjustment of an existing mosaic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MosaicSupplyChange {
    pub mosaic_id: MosaicId,
    pub kind: SupplyChangeKind,
    /// Whole smallest-units added or removed.
    pub delta: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupplyChangeKind {
    Increase,
    Decrease,
}

impl SupplyChangeKind {
    pub fn code(self) -> u32 {
        match self {
            SupplyChangeKind::Increase => 1,
            SupplyChangeKind::Decrease => 2,
        }
    }
}
