//! Token compliance probing.
//!
//! A campaign locks funds behind a token address for its whole lifetime, so a
//! non-compliant token would strand them permanently. Before any campaign
//! accepts a token, we probe it with a read-only call through the token
//! client: an address with no deployed contract, or a contract that does not
//! implement the SEP-41 token interface, fails the probe.

use soroban_sdk::{token, Address, Env};

use crate::Error;

/// Verify `token` is a deployed contract implementing the token interface.
///
/// Uses `try_decimals` as the compliance query: it is side-effect-free,
/// present on every SEP-41 token, and traps on non-contract addresses, which
/// the `try_` client surfaces as an `Err` instead of aborting the invocation.
pub fn validate_token(env: &Env, token: &Address) -> Result<(), Error> {
    let client = token::Client::new(env, token);
    match client.try_decimals() {
        Ok(Ok(_)) => Ok(()),
        _ => Err(Error::TokenNotCompliant),
    }
}
