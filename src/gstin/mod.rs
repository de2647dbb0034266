//! GSTIN validation and place-of-supply resolution

pub mod states;
pub mod validator;

pub use states::*;
pub use validator::*;

use tracing::{debug, warn};

use crate::config::BuyerStatePolicy;
use crate::types::{GstError, GstResult};

/// State code embedded in a GSTIN
///
/// Only the structure is checked (length, state code, PAN, entity code, `Z`),
/// not the checksum, so a mistyped last character still yields the state.
/// Returns `None` for malformed input.
pub fn get_state_code_from_gstin(gstin: &str) -> Option<String> {
    check_structure(gstin)
        .ok()
        .map(|chars| chars[..2].iter().collect())
}

/// Whether a supply between the two parties crosses state lines
///
/// A missing or malformed buyer GSTIN is treated as intrastate, and so is a
/// malformed seller GSTIN. Callers that know the buyer's state from another
/// source should use [`is_interstate_with_buyer_state`]; callers that need
/// malformed input rejected should use [`resolve_supply_type`].
pub fn is_interstate_transaction(seller_gstin: &str, buyer_gstin: Option<&str>) -> bool {
    is_interstate_with_buyer_state(seller_gstin, buyer_gstin, None)
}

/// Like [`is_interstate_transaction`], with an explicit buyer state code used
/// when the buyer GSTIN is absent or malformed
///
/// A seller GSTIN that yields no state code falls back to intrastate with a
/// warning.
pub fn is_interstate_with_buyer_state(
    seller_gstin: &str,
    buyer_gstin: Option<&str>,
    buyer_state: Option<&str>,
) -> bool {
    match resolve_supply_type(
        seller_gstin,
        buyer_gstin,
        buyer_state,
        BuyerStatePolicy::AssumeIntrastate,
    ) {
        Ok(interstate) => interstate,
        Err(err) => {
            warn!(
                seller_gstin = %seller_gstin,
                error = %err,
                "seller GSTIN is malformed, treating supply as intrastate"
            );
            false
        }
    }
}

/// Decide between interstate (`true`) and intrastate (`false`) treatment
///
/// The buyer state comes from the buyer GSTIN when it is well-formed,
/// otherwise from `buyer_state`. When neither is usable, `policy` decides.
/// A seller GSTIN that yields no state is always an error.
pub fn resolve_supply_type(
    seller_gstin: &str,
    buyer_gstin: Option<&str>,
    buyer_state: Option<&str>,
    policy: BuyerStatePolicy,
) -> GstResult<bool> {
    let seller_state: String = check_structure(seller_gstin)?[..2].iter().collect();

    let buyer_state = buyer_gstin
        .and_then(get_state_code_from_gstin)
        .or_else(|| {
            buyer_state
                .filter(|code| is_valid_state_code(code))
                .map(str::to_string)
        });

    match buyer_state {
        Some(buyer_state) => {
            let interstate = seller_state != buyer_state;
            debug!(
                seller_state = %seller_state,
                buyer_state = %buyer_state,
                interstate,
                "resolved supply type"
            );
            Ok(interstate)
        }
        None => match policy {
            BuyerStatePolicy::AssumeIntrastate => {
                if let Some(gstin) = buyer_gstin {
                    warn!(
                        buyer_gstin = %gstin,
                        "buyer GSTIN is malformed, treating supply as intrastate"
                    );
                }
                Ok(false)
            }
            BuyerStatePolicy::Reject => Err(GstError::MissingBuyerState),
        },
    }
}
