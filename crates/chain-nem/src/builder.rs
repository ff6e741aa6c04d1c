//! Transaction builders.
//!
//! Each builder composes the common header with one kind payload,
//! computes the fee for the active schedule, and — when the sender acts
//! on behalf of a multisig account — wraps the result in a multisig
//! envelope signed by the cosigner.

use crate::address::Address;
use crate::error::NemError;
use crate::fee::{
    aggregate_modification_fee, mosaic_creation_fee, mosaic_definition_fee,
    mosaic_supply_change_fee, namespace_provision_fee, namespace_rental_fee, transfer_fee,
    FeeScheduleContext, IMPORTANCE_TRANSFER_FEE, MULTISIG_SIGNATURE_FEE, MULTISIG_WRAPPER_FEE,
};
use crate::message::Message;
use crate::mosaic::{MosaicAttachment, MosaicCatalog, MosaicId, MosaicLevy, MosaicProperties};
use crate::network::Network;
use crate::transaction::{
    AggregateModification, CosignatoryModification, Header, ImportanceMode, ImportanceTransfer,
    MosaicDefinition, MosaicSupplyChange, Multisig, MultisigSignature, ProvisionNamespace,
    SupplyChangeKind, Transaction, TransactionBody, Transfer,
};

/// Who pays: the signing account, optionally acting for a multisig
/// account.
///
/// With `multisig_public` set, builders put the multisig account's key in
/// the inner header and wrap the result in an envelope carrying the
/// cosigner's key — the shape NIS expects for initiating a multisig
/// transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SenderKeys {
    pub signer_public: [u8; 32],
    pub multisig_public: Option<[u8; 32]>,
}

impl SenderKeys {
    pub fn direct(signer_public: [u8; 32]) -> Self {
        Self {
            signer_public,
            multisig_public: None,
        }
    }

    pub fn on_behalf_of(signer_public: [u8; 32], multisig_public: [u8; 32]) -> Self {
        Self {
            signer_public,
            multisig_public: Some(multisig_public),
        }
    }

    /// Key that goes in the inner transaction's header.
    fn effective(&self) -> [u8; 32] {
        self.multisig_public.unwrap_or(self.signer_public)
    }

    fn is_multisig(&self) -> bool {
        self.multisig_public.is_some()
    }
}

/// Wraps `inner` in a multisig envelope with the fixed wrapper fee. A
/// pure structural transform: the inner transaction is boxed unchanged.
pub fn wrap_multisig(
    cosigner_public: [u8; 32],
    inner: Transaction,
    ctx: &FeeScheduleContext,
    timestamp: u32,
) -> Transaction {
    let network = ctx.network();
    Transaction {
        header: Header::new(
            network,
            1,
            cosigner_public,
            timestamp,
            network.due_minutes(),
            MULTISIG_WRAPPER_FEE,
        ),
        body: TransactionBody::Multisig(Multisig {
            inner: Box::new(inner),
        }),
    }
}

fn finish(
    sender: &SenderKeys,
    inner: Transaction,
    ctx: &FeeScheduleContext,
    timestamp: u32,
) -> Transaction {
    if sender.is_multisig() {
        wrap_multisig(sender.signer_public, inner, ctx, timestamp)
    } else {
        inner
    }
}

/// Builds a transfer of XEM and optional mosaic attachments.
///
/// Attachments are sorted by qualified name before they are frozen into
/// the payload; their presence selects sub-version 2 and the mosaic fee
/// schedule, with `amount_micro` acting as the quantity multiplier.
#[allow(clippy::too_many_arguments)]
pub fn build_transfer(
    sender: &SenderKeys,
    recipient: &Address,
    amount_micro: u64,
    message: Message,
    mut attachments: Vec<MosaicAttachment>,
    catalog: &MosaicCatalog,
    ctx: &FeeScheduleContext,
    timestamp: u32,
) -> Result<Transaction, NemError> {
    let sub_version = if attachments.is_empty() { 1 } else { 2 };
    attachments.sort_by(|a, b| {
        a.mosaic_id
            .qualified_name()
            .cmp(&b.mosaic_id.qualified_name())
    });
    let fee = transfer_fee(
        amount_micro,
        message.payload().len(),
        &attachments,
        catalog,
        ctx,
    )?;
    let network = ctx.network();
    let inner = Transaction {
        header: Header::new(
            network,
            sub_version,
            sender.effective(),
            timestamp,
            network.due_minutes(),
            fee,
        ),
        body: TransactionBody::Transfer(Transfer {
            recipient: recipient.clone(),
            amount: amount_micro,
            message,
            mosaics: attachments,
        }),
    };
    Ok(finish(sender, inner, ctx, timestamp))
}

/// Builds an importance transfer activating or deactivating a remote
/// harvesting account.
pub fn build_importance_transfer(
    sender: &SenderKeys,
    mode: ImportanceMode,
    remote_public_key: [u8; 32],
    ctx: &FeeScheduleContext,
    timestamp: u32,
) -> Transaction {
    let network = ctx.network();
    let inner = Transaction {
        header: Header::new(
            network,
            1,
            sender.effective(),
            timestamp,
            network.due_minutes(),
            IMPORTANCE_TRANSFER_FEE,
        ),
        body: TransactionBody::ImportanceTransfer(ImportanceTransfer {
            mode,
            remote_public_key,
        }),
    };
    finish(sender, inner, ctx, timestamp)
}

/// Stable order NIS expects for cosignatory modifications: modification
/// type first, then the address each public key resolves to. Sorting
/// twice changes nothing.
pub fn sort_modifications(modifications: &mut [CosignatoryModification], network: Network) {
    modifications.sort_by_key(|m| {
        (
            m.kind.code(),
            Address::from_public_key(network, &m.cosignatory_public_key),
        )
    });
}

/// Builds a cosignatory-set change for a multisig account.
///
/// A minimum-cosignatory delta selects sub-version 2 and its fee
/// surcharge. Modifications are sorted into canonical order here, so
/// callers can pass them in any order.
pub fn build_aggregate_modification(
    sender: &SenderKeys,
    mut modifications: Vec<CosignatoryModification>,
    min_cosignatories_delta: Option<i32>,
    ctx: &FeeScheduleContext,
    timestamp: u32,
) -> Transaction {
    let network = ctx.network();
    sort_modifications(&mut modifications, network);
    let sub_version = if min_cosignatories_delta.is_some() { 2 } else { 1 };
    let fee = aggregate_modification_fee(modifications.len(), min_cosignatories_delta.is_some());
    let inner = Transaction {
        header: Header::new(
            network,
            sub_version,
            sender.effective(),
            timestamp,
            network.due_minutes(),
            fee,
        ),
        body: TransactionBody::AggregateModification(AggregateModification {
            modifications,
            min_cosignatories_delta,
        }),
    };
    finish(sender, inner, ctx, timestamp)
}

/// Builds a cosigner's signature for a pending multisig transaction.
/// Never wrapped: the cosigner signs it directly.
pub fn build_multisig_signature(
    cosigner_public: [u8; 32],
    inner_hash: [u8; 32],
    multisig_address: &Address,
    ctx: &FeeScheduleContext,
    timestamp: u32,
) -> Transaction {
    let network = ctx.network();
    Transaction {
        header: Header::new(
            network,
            1,
            cosigner_public,
            timestamp,
            network.due_minutes(),
            MULTISIG_SIGNATURE_FEE,
        ),
        body: TransactionBody::MultisigSignature(MultisigSignature {
            inner_hash,
            multisig_address: multisig_address.clone(),
        }),
    }
}

/// Builds a namespace provision. The rental fee follows from whether a
/// parent is given; the sink account is network configuration supplied
/// by the caller.
pub fn build_provision_namespace(
    sender: &SenderKeys,
    rental_fee_sink: &Address,
    new_part: &str,
    parent: Option<&str>,
    ctx: &FeeScheduleContext,
    timestamp: u32,
) -> Result<Transaction, NemError> {
    if new_part.is_empty() {
        return Err(NemError::MissingInput("namespace part"));
    }
    let network = ctx.network();
    let inner = Transaction {
        header: Header::new(
            network,
            1,
            sender.effective(),
            timestamp,
            network.due_minutes(),
            namespace_provision_fee(ctx),
        ),
        body: TransactionBody::ProvisionNamespace(ProvisionNamespace {
            rental_fee_sink: rental_fee_sink.clone(),
            rental_fee: namespace_rental_fee(parent.is_none(), ctx),
            new_part: new_part.to_string(),
            parent: parent.map(str::to_string),
        }),
    };
    Ok(finish(sender, inner, ctx, timestamp))
}

/// Builds a mosaic definition under an owned namespace. The creator key
/// is the effective sender — the multisig account itself when wrapped.
#[allow(clippy::too_many_arguments)]
pub fn build_mosaic_definition(
    sender: &SenderKeys,
    id: MosaicId,
    description: &str,
    properties: MosaicProperties,
    levy: Option<MosaicLevy>,
    creation_fee_sink: &Address,
    ctx: &FeeScheduleContext,
    timestamp: u32,
) -> Result<Transaction, NemError> {
    if id.namespace_id.is_empty() {
        return Err(NemError::MissingInput("mosaic namespace"));
    }
    if id.name.is_empty() {
        return Err(NemError::MissingInput("mosaic name"));
    }
    let network = ctx.network();
    let inner = Transaction {
        header: Header::new(
            network,
            1,
            sender.effective(),
            timestamp,
            network.due_minutes(),
            mosaic_definition_fee(ctx),
        ),
        body: TransactionBody::MosaicDefinition(MosaicDefinition {
            creator_public_key: sender.effective(),
            id,
            description: description.to_string(),
            properties,
            levy,
            creation_fee_sink: creation_fee_sink.clone(),
            creation_fee: mosaic_creation_fee(ctx),
        }),
    };
    Ok(finish(sender, inner, ctx, timestamp))
}

/// Builds a supply change for an existing mosaic.
pub fn build_mosaic_supply_change(
    sender: &SenderKeys,
    mosaic_id: MosaicId,
    kind: SupplyChangeKind,
    delta: u64,
    ctx: &FeeScheduleContext,
    timestamp: u32,
) -> Transaction {
    let network = ctx.network();
    let inner = Transaction {
        header: Header::new(
            network,
            1,
            sender.effective(),
            timestamp,
            network.due_minutes(),
            mosaic_supply_change_fee(ctx),
        ),
        body: TransactionBody::MosaicSupplyChange(MosaicSupplyChange {
            mosaic_id,
            kind,
            delta,
        }),
    };
    finish(sender, inner, ctx, timestamp)
}
