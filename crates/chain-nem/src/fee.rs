//! Fee schedules for NIS1 transactions.
//!
//! Two regimes exist: the legacy arctan-based schedule and the current
//! flat per-10k schedule introduced by the testnet fee fork. Which one
//! applies is a function of network and observed chain height, carried
//! explicitly in [`FeeScheduleContext`] — nothing here reads ambient
//! state. All results are micro-XEM.

use crate::error::NemError;
use crate::mosaic::{MosaicAttachment, MosaicCatalog, MosaicMetadata};
use crate::network::Network;

/// Micro-XEM per XEM.
pub const MICRO_PER_XEM: u64 = 1_000_000;

/// Testnet height at which the current schedule took over.
pub const DEFAULT_FORK_HEIGHT: u64 = 572_500;

/// Fixed fee for an importance transfer.
pub const IMPORTANCE_TRANSFER_FEE: u64 = 6 * MICRO_PER_XEM;

/// Fixed fee for the multisig envelope around an inner transaction.
pub const MULTISIG_WRAPPER_FEE: u64 = 6 * MICRO_PER_XEM;

/// Fixed fee for a cosigner's signature transaction.
pub const MULTISIG_SIGNATURE_FEE: u64 = 6 * MICRO_PER_XEM;

/// Largest total quantity any mosaic can have (supply * 10^divisibility).
const MAX_MOSAIC_QUANTITY: u64 = 9_000_000_000_000_000;

/// Supply at or below which a divisibility-0 mosaic gets the flat
/// small-business fee under the current schedule.
const SMALL_BUSINESS_SUPPLY: u64 = 10_000;

/// Cap on the per-10k fee units under the current schedule.
const MIN_FEE_CAP: u64 = 25;

/// Which fee table applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeRegime {
    Legacy,
    Current,
}

/// Network plus observed chain height, resolved to a fee regime.
///
/// The fork height defaults to the historical testnet value and can be
/// overridden; the regime itself can also be forced outright, for
/// networks that fork later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeScheduleContext {
    network: Network,
    height: u64,
    fork_height: u64,
    regime_override: Option<FeeRegime>,
}

impl FeeScheduleContext {
    pub fn new(network: Network, height: u64) -> Self {
        Self {
            network,
            height,
            fork_height: DEFAULT_FORK_HEIGHT,
            regime_override: None,
        }
    }

    /// Replaces the fork height the regime decision compares against.
    pub fn with_fork_height(mut self, fork_height: u64) -> Self {
        self.fork_height = fork_height;
        self
    }

    /// Forces a regime regardless of network and height.
    pub fn with_regime(mut self, regime: FeeRegime) -> Self {
        self.regime_override = Some(regime);
        self
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn height(&self) -> u64 {
        self.height
    }

    /// Current schedule on testnet at or past the fork height; legacy
    /// everywhere else.
    pub fn regime(&self) -> FeeRegime {
        if let Some(regime) = self.regime_override {
            return regime;
        }
        if self.network.is_testnet() && self.height >= self.fork_height {
            FeeRegime::Current
        } else {
            FeeRegime::Legacy
        }
    }
}

/// Current-schedule base fee in units: one per 10000 XEM, clamped to
/// [1, 25].
fn min_fee_units(amount_xem: u64) -> u64 {
    (amount_xem / 10_000).clamp(1, MIN_FEE_CAP)
}

/// Legacy arctan schedule in units, shared by plain transfers and the
/// per-mosaic legacy path.
fn legacy_units(amount_xem: f64) -> u64 {
    let atan_term = ((amount_xem / 150_000.0).atan() * 3.0 * 33.0).floor();
    let raw = (10.0 - amount_xem).max(2.0).max(atan_term);
    raw.ceil() as u64
}

/// Base fee units for a plain XEM amount.
fn base_transfer_units(amount_micro: u64, regime: FeeRegime) -> u64 {
    match regime {
        FeeRegime::Current => min_fee_units(amount_micro / MICRO_PER_XEM),
        FeeRegime::Legacy => legacy_units(amount_micro as f64 / MICRO_PER_XEM as f64),
    }
}

/// Additional fee units for a message payload; empty payloads are free.
fn message_units(payload_len: usize, regime: FeeRegime) -> u64 {
    if payload_len == 0 {
        return 0;
    }
    let len = payload_len as u64;
    match regime {
        FeeRegime::Current => len / 16 + 1,
        FeeRegime::Legacy => 2 * (len / 16).max(1),
    }
}

/// XEM-equivalent of a mosaic quantity at the given transfer multiplier,
/// rounded up to whole XEM.
///
/// 128-bit arithmetic throughout: `supply * 10^(divisibility + 6)` and
/// the scaled numerator overflow 64 bits for large mosaics. Saturation
/// only engages for inputs far beyond what any chain accepts.
fn xem_equivalent_ceil(multiplier_micro: u64, quantity: u64, meta: MosaicMetadata) -> u64 {
    if meta.supply == 0 {
        return 0;
    }
    let numerator = 9_000_000_000u128
        .saturating_mul(quantity as u128)
        .saturating_mul(multiplier_micro as u128);
    let denominator =
        (meta.supply as u128).saturating_mul(10u128.saturating_pow(meta.divisibility + 6));
    numerator.div_ceil(denominator) as u64
}

/// Same ratio as [`xem_equivalent_ceil`], continuous, for the legacy
/// arctan schedule.
fn xem_equivalent_f64(multiplier_micro: u64, quantity: u64, meta: MosaicMetadata) -> f64 {
    if meta.supply == 0 {
        return 0.0;
    }
    let numerator = 9_000_000_000u128
        .saturating_mul(quantity as u128)
        .saturating_mul(multiplier_micro as u128);
    let denominator =
        (meta.supply as u128).saturating_mul(10u128.saturating_pow(meta.divisibility + 6));
    numerator as f64 / denominator as f64
}

/// Current-schedule fee units for one mosaic attachment.
fn current_mosaic_units(multiplier_micro: u64, quantity: u64, meta: MosaicMetadata) -> u64 {
    if meta.supply == 0 {
        return 1;
    }
    if meta.supply <= SMALL_BUSINESS_SUPPLY && meta.divisibility == 0 {
        return 1;
    }
    let total_quantity =
        (meta.supply as u128).saturating_mul(10u128.saturating_pow(meta.divisibility));
    let adjustment =
        (0.8 * (MAX_MOSAIC_QUANTITY as f64 / total_quantity as f64).ln()).floor() as i64;
    let base = min_fee_units(xem_equivalent_ceil(multiplier_micro, quantity, meta)) as i64;
    base.saturating_sub(adjustment).max(1) as u64
}

/// Fee for the mosaic side of a transfer, micro-XEM. Every attachment
/// must resolve in `catalog`.
fn mosaic_transfer_fee(
    multiplier_micro: u64,
    attachments: &[MosaicAttachment],
    catalog: &MosaicCatalog,
    regime: FeeRegime,
) -> Result<u64, NemError> {
    match regime {
        FeeRegime::Current => {
            let mut units: u64 = 0;
            for attachment in attachments {
                let meta = catalog.require(&attachment.mosaic_id)?;
                units += current_mosaic_units(multiplier_micro, attachment.quantity, meta);
            }
            Ok(units.max(1) * MICRO_PER_XEM)
        }
        FeeRegime::Legacy => {
            let mut units: u64 = 0;
            for attachment in attachments {
                let meta = catalog.require(&attachment.mosaic_id)?;
                let xem = xem_equivalent_f64(multiplier_micro, attachment.quantity, meta);
                units += legacy_units(xem);
            }
            // Historical 5/4 scaling of the unit price; exact in
            // micro-XEM because 4 divides 10^6.
            Ok(units * 5 * MICRO_PER_XEM / 4)
        }
    }
}

/// Total fee for a transfer, micro-XEM.
///
/// With no attachments this prices a plain XEM transfer of
/// `amount_micro`; with attachments, `amount_micro` is the quantity
/// multiplier and the mosaic schedule applies instead. The message term
/// is priced per 16-byte slice of `message_payload_len` and added on
/// top either way.
pub fn transfer_fee(
    amount_micro: u64,
    message_payload_len: usize,
    attachments: &[MosaicAttachment],
    catalog: &MosaicCatalog,
    ctx: &FeeScheduleContext,
) -> Result<u64, NemError> {
    let regime = ctx.regime();
    let message = message_units(message_payload_len, regime) * MICRO_PER_XEM;
    if attachments.is_empty() {
        return Ok(base_transfer_units(amount_micro, regime) * MICRO_PER_XEM + message);
    }
    let mosaics = mosaic_transfer_fee(amount_micro, attachments, catalog, regime)?;
    Ok(mosaics + message)
}

/// Fee for changing a multisig account's cosignatory set: 10 base units,
/// 6 per modification, 6 more when the minimum-cosignatory count moves.
pub fn aggregate_modification_fee(modification_count: usize, has_min_change: bool) -> u64 {
    let units = 10 + 6 * modification_count as u64 + if has_min_change { 6 } else { 0 };
    units * MICRO_PER_XEM
}

/// Rental fee paid to the namespace sink, distinct from the transaction
/// fee.
pub fn namespace_rental_fee(is_root: bool, ctx: &FeeScheduleContext) -> u64 {
    match (ctx.regime(), is_root) {
        (FeeRegime::Current, true) => 5_000 * MICRO_PER_XEM,
        (FeeRegime::Current, false) => 200 * MICRO_PER_XEM,
        (FeeRegime::Legacy, true) => 50_000 * MICRO_PER_XEM,
        (FeeRegime::Legacy, false) => 5_000 * MICRO_PER_XEM,
    }
}

/// Creation fee paid to the mosaic sink when defining a mosaic.
pub fn mosaic_creation_fee(ctx: &FeeScheduleContext) -> u64 {
    match ctx.regime() {
        FeeRegime::Current => 500 * MICRO_PER_XEM,
        FeeRegime::Legacy => 50_000 * MICRO_PER_XEM,
    }
}

/// Transaction fee for a namespace provision.
pub fn namespace_provision_fee(ctx: &FeeScheduleContext) -> u64 {
    structural_fee(ctx.regime())
}

/// Transaction fee for a mosaic definition.
pub fn mosaic_definition_fee(ctx: &FeeScheduleContext) -> u64 {
    structural_fee(ctx.regime())
}

/// Transaction fee for a mosaic supply change.
pub fn mosaic_supply_change_fee(ctx: &FeeScheduleContext) -> u64 {
    structural_fee(ctx.regime())
}

/// Namespace and mosaic housekeeping share one flat fee per regime.
fn structural_fee(regime: FeeRegime) -> u64 {
    match regime {
        FeeRegime::Current => 20 * MICRO_PER_XEM,
        FeeRegime::Legacy => 2 * 3 * 18 * MICRO_PER_XEM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mosaic::MosaicId;

    fn legacy_ctx() -> FeeScheduleContext {
        FeeScheduleContext::new(Network::Testnet, DEFAULT_FORK_HEIGHT - 1)
    }

    fn current_ctx() -> FeeScheduleContext {
        FeeScheduleContext::new(Network::Testnet, DEFAULT_FORK_HEIGHT)
    }

    fn xem_catalog() -> (MosaicCatalog, MosaicId) {
        let mut catalog = MosaicCatalog::new();
        let id = MosaicId::new("nem", "xem");
        catalog.insert(
            &id,
            MosaicMetadata {
                supply: 8_999_999_999,
                divisibility: 6,
            },
        );
        (catalog, id)
    }

    // ─── regime selection ───

    #[test]
    fn regime_flips_at_the_fork_height() {
        assert_eq!(legacy_ctx().regime(), FeeRegime::Legacy);
        assert_eq!(current_ctx().regime(), FeeRegime::Current);
    }

    #[test]
    fn mainnet_stays_legacy_at_any_height() {
        let ctx = FeeScheduleContext::new(Network::Mainnet, u64::MAX);
        assert_eq!(ctx.regime(), FeeRegime::Legacy);
    }

    #[test]
    fn fork_height_is_configurable() {
        let ctx = FeeScheduleContext::new(Network::Testnet, 100).with_fork_height(100);
        assert_eq!(ctx.regime(), FeeRegime::Current);
        let ctx = FeeScheduleContext::new(Network::Testnet, 99).with_fork_height(100);
        assert_eq!(ctx.regime(), FeeRegime::Legacy);
    }

    #[test]
    fn regime_can_be_forced() {
        let ctx = FeeScheduleContext::new(Network::Mainnet, 0).with_regime(FeeRegime::Current);
        assert_eq!(ctx.regime(), FeeRegime::Current);
    }

    // ─── plain transfers ───

    #[test]
    fn small_legacy_transfer_costs_nine_units() {
        // 1.5 XEM: max(10 - 1.5, 2, atan-term) = 8.5, ceiled to 9.
        let fee = transfer_fee(
            1_500_000,
            0,
            &[],
            &MosaicCatalog::new(),
            &legacy_ctx(),
        )
        .unwrap();
        assert_eq!(fee, 9 * MICRO_PER_XEM);
    }

    #[test]
    fn small_current_transfer_costs_one_unit() {
        let fee = transfer_fee(
            1_500_000,
            0,
            &[],
            &MosaicCatalog::new(),
            &current_ctx(),
        )
        .unwrap();
        assert_eq!(fee, MICRO_PER_XEM);
    }

    #[test]
    fn current_fee_caps_at_twenty_five_units() {
        // 250000 XEM hits the cap exactly; ten times that stays there.
        let at_cap = transfer_fee(
            250_000 * MICRO_PER_XEM,
            0,
            &[],
            &MosaicCatalog::new(),
            &current_ctx(),
        )
        .unwrap();
        let beyond = transfer_fee(
            2_500_000 * MICRO_PER_XEM,
            0,
            &[],
            &MosaicCatalog::new(),
            &current_ctx(),
        )
        .unwrap();
        assert_eq!(at_cap, 25 * MICRO_PER_XEM);
        assert_eq!(beyond, 25 * MICRO_PER_XEM);
    }

    #[test]
    fn current_fee_scales_per_ten_thousand_xem() {
        let fee = transfer_fee(
            45_000 * MICRO_PER_XEM,
            0,
            &[],
            &MosaicCatalog::new(),
            &current_ctx(),
        )
        .unwrap();
        assert_eq!(fee, 4 * MICRO_PER_XEM);
    }

    #[test]
    fn current_fee_never_decreases_with_amount() {
        let mut last = 0;
        for xem in [0u64, 1, 10, 100, 1_000, 10_000, 100_000, 1_000_000] {
            let fee = transfer_fee(
                xem * MICRO_PER_XEM,
                0,
                &[],
                &MosaicCatalog::new(),
                &current_ctx(),
            )
            .unwrap();
            assert!(fee >= last, "fee dropped from {last} to {fee} at {xem} XEM");
            last = fee;
        }
    }

    #[test]
    fn legacy_fee_never_decreases_past_the_floor() {
        // Below 10 XEM the legacy minimum-fee term (10 - amount) ramps
        // down to its floor of 2; from there the arctan term only grows.
        let mut last = 0;
        for xem in [10u64, 100, 1_000, 5_000, 10_000, 100_000, 1_000_000] {
            let fee = transfer_fee(
                xem * MICRO_PER_XEM,
                0,
                &[],
                &MosaicCatalog::new(),
                &legacy_ctx(),
            )
            .unwrap();
            assert!(fee >= last, "fee dropped from {last} to {fee} at {xem} XEM");
            last = fee;
        }
    }

    #[test]
    fn every_transfer_costs_something() {
        for ctx in [legacy_ctx(), current_ctx()] {
            let fee = transfer_fee(0, 0, &[], &MosaicCatalog::new(), &ctx).unwrap();
            assert!(fee >= MICRO_PER_XEM);
        }
    }

    // ─── message fees ───

    #[test]
    fn empty_message_is_free() {
        assert_eq!(message_units(0, FeeRegime::Legacy), 0);
        assert_eq!(message_units(0, FeeRegime::Current), 0);
    }

    #[test]
    fn current_message_fee_grows_per_16_bytes() {
        let base = transfer_fee(MICRO_PER_XEM, 0, &[], &MosaicCatalog::new(), &current_ctx())
            .unwrap();
        let one = transfer_fee(MICRO_PER_XEM, 1, &[], &MosaicCatalog::new(), &current_ctx())
            .unwrap();
        let sixteen =
            transfer_fee(MICRO_PER_XEM, 16, &[], &MosaicCatalog::new(), &current_ctx())
                .unwrap();
        let forty =
            transfer_fee(MICRO_PER_XEM, 40, &[], &MosaicCatalog::new(), &current_ctx())
                .unwrap();
        assert_eq!(one - base, MICRO_PER_XEM);
        assert_eq!(sixteen - base, 2 * MICRO_PER_XEM);
        assert_eq!(forty - base, 3 * MICRO_PER_XEM);
    }

    #[test]
    fn legacy_message_fee_is_two_units_per_16_bytes() {
        let base = transfer_fee(MICRO_PER_XEM, 0, &[], &MosaicCatalog::new(), &legacy_ctx())
            .unwrap();
        let short = transfer_fee(MICRO_PER_XEM, 10, &[], &MosaicCatalog::new(), &legacy_ctx())
            .unwrap();
        let long = transfer_fee(MICRO_PER_XEM, 48, &[], &MosaicCatalog::new(), &legacy_ctx())
            .unwrap();
        assert_eq!(short - base, 2 * MICRO_PER_XEM);
        assert_eq!(long - base, 6 * MICRO_PER_XEM);
    }

    // ─── mosaic transfers ───

    #[test]
    fn mosaic_fee_requires_known_metadata() {
        let catalog = MosaicCatalog::new();
        let attachment =
            MosaicAttachment::new(MosaicId::new("alice.tokens", "gold"), 100);
        let err = transfer_fee(MICRO_PER_XEM, 0, &[attachment], &catalog, &current_ctx())
            .unwrap_err();
        assert!(matches!(err, NemError::UnknownMosaic(_)));
    }

    #[test]
    fn small_business_mosaic_costs_one_unit() {
        let mut catalog = MosaicCatalog::new();
        let id = MosaicId::new("shop", "points");
        catalog.insert(
            &id,
            MosaicMetadata {
                supply: 10_000,
                divisibility: 0,
            },
        );
        let fee = transfer_fee(
            MICRO_PER_XEM,
            0,
            &[MosaicAttachment::new(id, 500)],
            &catalog,
            &current_ctx(),
        )
        .unwrap();
        assert_eq!(fee, MICRO_PER_XEM);
    }

    #[test]
    fn xem_as_mosaic_matches_the_small_transfer_fee() {
        // Transferring 1 XEM as a mosaic attachment under the current
        // schedule costs the same single unit as a plain transfer.
        let (catalog, id) = xem_catalog();
        let fee = transfer_fee(
            MICRO_PER_XEM,
            0,
            &[MosaicAttachment::new(id, MICRO_PER_XEM)],
            &catalog,
            &current_ctx(),
        )
        .unwrap();
        assert_eq!(fee, MICRO_PER_XEM);
    }

    #[test]
    fn legacy_mosaic_fee_carries_the_five_quarters_scaling() {
        // 1 XEM moved as a mosaic: 9 arctan units, scaled by 5/4 on the
        // legacy schedule. The scaling is exact, never rounded.
        let (catalog, id) = xem_catalog();
        let fee = transfer_fee(
            MICRO_PER_XEM,
            0,
            &[MosaicAttachment::new(id, MICRO_PER_XEM)],
            &catalog,
            &legacy_ctx(),
        )
        .unwrap();
        assert_eq!(fee, 9 * 1_250_000);
        assert_eq!(fee % 250_000, 0);
    }

    #[test]
    fn mosaic_fees_sum_over_attachments() {
        let mut catalog = MosaicCatalog::new();
        let small = MosaicId::new("shop", "points");
        catalog.insert(
            &small,
            MosaicMetadata {
                supply: 100,
                divisibility: 0,
            },
        );
        let (xem_cat, xem) = xem_catalog();
        catalog.insert(
            &xem,
            xem_cat.get(&xem).unwrap(),
        );
        let single = transfer_fee(
            MICRO_PER_XEM,
            0,
            &[MosaicAttachment::new(small.clone(), 1)],
            &catalog,
            &current_ctx(),
        )
        .unwrap();
        let double = transfer_fee(
            MICRO_PER_XEM,
            0,
            &[
                MosaicAttachment::new(small, 1),
                MosaicAttachment::new(xem, MICRO_PER_XEM),
            ],
            &catalog,
            &current_ctx(),
        )
        .unwrap();
        assert!(double > single);
    }

    #[test]
    fn zero_supply_mosaic_still_costs_one_unit() {
        let mut catalog = MosaicCatalog::new();
        let id = MosaicId::new("ghost", "coin");
        catalog.insert(
            &id,
            MosaicMetadata {
                supply: 0,
                divisibility: 3,
            },
        );
        let fee = transfer_fee(
            MICRO_PER_XEM,
            0,
            &[MosaicAttachment::new(id, 1)],
            &catalog,
            &current_ctx(),
        )
        .unwrap();
        assert_eq!(fee, MICRO_PER_XEM);
    }

    // ─── other kinds ───

    #[test]
    fn fixed_fees_are_six_xem() {
        assert_eq!(IMPORTANCE_TRANSFER_FEE, 6_000_000);
        assert_eq!(MULTISIG_WRAPPER_FEE, 6_000_000);
        assert_eq!(MULTISIG_SIGNATURE_FEE, 6_000_000);
    }

    #[test]
    fn aggregate_fee_counts_modifications() {
        assert_eq!(aggregate_modification_fee(0, false), 10 * MICRO_PER_XEM);
        assert_eq!(aggregate_modification_fee(2, false), 22 * MICRO_PER_XEM);
        assert_eq!(aggregate_modification_fee(4, false), 34 * MICRO_PER_XEM);
        assert_eq!(aggregate_modification_fee(2, true), 28 * MICRO_PER_XEM);
    }

    #[test]
    fn namespace_rental_depends_on_level_and_regime() {
        assert_eq!(
            namespace_rental_fee(true, &current_ctx()),
            5_000 * MICRO_PER_XEM
        );
        assert_eq!(
            namespace_rental_fee(false, &current_ctx()),
            200 * MICRO_PER_XEM
        );
        assert_eq!(
            namespace_rental_fee(true, &legacy_ctx()),
            50_000 * MICRO_PER_XEM
        );
        assert_eq!(
            namespace_rental_fee(false, &legacy_ctx()),
            5_000 * MICRO_PER_XEM
        );
    }

    #[test]
    fn structural_fees_follow_the_regime() {
        assert_eq!(namespace_provision_fee(&current_ctx()), 20 * MICRO_PER_XEM);
        assert_eq!(namespace_provision_fee(&legacy_ctx()), 108 * MICRO_PER_XEM);
        assert_eq!(mosaic_definition_fee(&current_ctx()), 20 * MICRO_PER_XEM);
        assert_eq!(mosaic_supply_change_fee(&legacy_ctx()), 108 * MICRO_PER_XEM);
    }

    #[test]
    fn mosaic_creation_fee_follows_the_regime() {
        assert_eq!(mosaic_creation_fee(&current_ctx()), 500 * MICRO_PER_XEM);
        assert_eq!(mosaic_creation_fee(&legacy_ctx()), 50_000 * MICRO_PER_XEM);
    }
}
