//! Cross-chain message identifier hashing.

use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use alloy_sol_types::{sol, SolCall};

sol! {
    function relayMessage(
        address sender,
        address target,
        uint256 value,
        uint256 nonce,
        bytes message
    ) external;
}

/// Computes the canonical identifier of a cross-chain message: the keccak256
/// of the full ABI call encoding of `relayMessage` applied to the message
/// fields.
///
/// The signature, argument order and layout are a cross-system compatibility
/// contract. Other components correlate a message across its origin and relay
/// legs by this value, so any change must be versioned explicitly.
pub fn compute_message_hash(
    sender: Address,
    target: Address,
    value: U256,
    nonce: U256,
    payload: Bytes,
) -> B256 {
    let call = relayMessageCall { sender, target, value, nonce, message: payload };
    keccak256(call.abi_encode())
}
