//! Canonical byte layout for signing and announcing.
//!
//! Every field is little-endian; variable-length fields carry a `u32`
//! byte-length prefix. The output is exactly what gets signed, so any
//! change here changes signatures.

use crate::mosaic::MosaicId;
use crate::transaction::{Header, Transaction, TransactionBody};

/// Length-prefix value marking an absent parent namespace.
const NO_PARENT_SENTINEL: u32 = 0xFFFF_FFFF;

fn write_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn write_u64(out: &mut Vec<u8>, value: u64) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn write_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    write_u32(out, bytes.len() as u32);
    out.extend_from_slice(bytes);
}

fn write_str(out: &mut Vec<u8>, value: &str) {
    write_bytes(out, value.as_bytes());
}

fn write_common(out: &mut Vec<u8>, kind_code: u32, header: &Header) {
    write_u32(out, kind_code);
    write_u32(out, header.version);
    write_u32(out, header.timestamp);
    write_bytes(out, &header.signer_public_key);
    write_u64(out, header.fee);
    write_u32(out, header.deadline);
}

/// Namespace and name as two length-prefixed strings, without the outer
/// structure length.
fn mosaic_id_bytes(id: &MosaicId) -> Vec<u8> {
    let mut out = Vec::new();
    write_str(&mut out, &id.namespace_id);
    write_str(&mut out, &id.name);
    out
}

/// Serializes a transaction into the canonical signing payload.
///
/// Infallible: every representable transaction has a defined layout. A
/// multisig wrapper embeds its inner transaction's full serialization as
/// one length-prefixed blob.
pub fn serialize_transaction(tx: &Transaction) -> Vec<u8> {
    let mut out = Vec::new();
    write_common(&mut out, tx.kind().code(), &tx.header);
    match &tx.body {
        TransactionBody::Transfer(t) => {
            write_str(&mut out, t.recipient.as_str());
            write_u64(&mut out, t.amount);
            if t.message.is_empty() {
                write_u32(&mut out, 0);
            } else {
                let payload = t.message.payload();
                write_u32(&mut out, 8 + payload.len() as u32);
                write_u32(&mut out, t.message.kind_code());
                write_bytes(&mut out, payload);
            }
            // Version 1 predates mosaics and omits the section entirely.
            if tx.header.sub_version() == 2 {
                write_u32(&mut out, t.mosaics.len() as u32);
                for attachment in &t.mosaics {
                    let id = mosaic_id_bytes(&attachment.mosaic_id);
                    write_u32(&mut out, (4 + id.len() + 8) as u32);
                    write_bytes(&mut out, &id);
                    write_u64(&mut out, attachment.quantity);
                }
            }
        }
        TransactionBody::ImportanceTransfer(t) => {
            write_u32(&mut out, t.mode.code());
            write_bytes(&mut out, &t.remote_public_key);
        }
        TransactionBody::AggregateModification(a) => {
            write_u32(&mut out, a.modifications.len() as u32);
            for modification in &a.modifications {
                write_u32(&mut out, 0x28);
                write_u32(&mut out, modification.kind.code());
                write_bytes(&mut out, &modification.cosignatory_public_key);
            }
            if let Some(delta) = a.min_cosignatories_delta {
                write_u32(&mut out, 4);
                write_u32(&mut out, delta as u32);
            }
        }
        TransactionBody::MultisigSignature(s) => {
            write_u32(&mut out, 4 + s.inner_hash.len() as u32);
            write_bytes(&mut out, &s.inner_hash);
            write_str(&mut out, s.multisig_address.as_str());
        }
        TransactionBody::Multisig(m) => {
            let inner = serialize_transaction(&m.inner);
            write_bytes(&mut out, &inner);
        }
        TransactionBody::ProvisionNamespace(p) => {
            write_str(&mut out, p.rental_fee_sink.as_str());
            write_u64(&mut out, p.rental_fee);
            write_str(&mut out, &p.new_part);
            match &p.parent {
                Some(parent) => write_str(&mut out, parent),
                None => write_u32(&mut out, NO_PARENT_SENTINEL),
            }
        }
        TransactionBody::MosaicDefinition(d) => {
            let mut def = Vec::new();
            write_bytes(&mut def, &d.creator_public_key);
            let id = mosaic_id_bytes(&d.id);
            write_bytes(&mut def, &id);
            write_str(&mut def, &d.description);
            let properties = [
                ("divisibility", d.properties.divisibility.to_string()),
                ("initialSupply", d.properties.initial_supply.to_string()),
                ("supplyMutable", d.properties.supply_mutable.to_string()),
                ("transferable", d.properties.transferable.to_string()),
            ];
            write_u32(&mut def, properties.len() as u32);
            for (name, value) in properties {
                let mut prop = Vec::new();
                write_str(&mut prop, name);
                write_str(&mut prop, &value);
                write_bytes(&mut def, &prop);
            }
            match &d.levy {
                Some(levy) => {
                    let mut body = Vec::new();
                    write_u32(&mut body, levy.kind.code());
                    write_str(&mut body, levy.recipient.as_str());
                    let levy_id = mosaic_id_bytes(&levy.mosaic_id);
                    write_bytes(&mut body, &levy_id);
                    write_u64(&mut body, levy.fee);
                    write_bytes(&mut def, &body);
                }
                None => write_u32(&mut def, 0),
            }
            write_bytes(&mut out, &def);
            write_str(&mut out, d.creation_fee_sink.as_str());
            write_u64(&mut out, d.creation_fee);
        }
        TransactionBody::MosaicSupplyChange(s) => {
            let id = mosaic_id_bytes(&s.mosaic_id);
            write_bytes(&mut out, &id);
            write_u32(&mut out, s.kind.code());
            write_u64(&mut out, s.delta);
        }
    }
    out
}
