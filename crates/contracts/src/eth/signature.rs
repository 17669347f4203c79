use tiny_keccak::{Hasher, Keccak};
use ethabi::Param;
use crate::Error;

fn keccak(signature: &str, output: &mut [u8]) {
    let mut hasher = Keccak::v256();
    hasher.update(signature.as_bytes());
    hasher.finalize(output);
}

/// Canonical signature: `name(type1,type2)` with parameter names dropped and
/// tuples expanded to their component lists.
pub fn signature(name: &str, params: &[Param]) -> String {
    let types = params.iter().map(|param| param.kind.canonical()).collect::<Vec<_>>();
    format!("{}({})", name, types.join(","))
}

/// First four bytes of the Keccak-256 hash of `signature`.
pub fn selector(signature: &str) -> [u8; 4] {
    let mut output = [0; 4];
    keccak(signature, &mut output);
    output
}

pub fn topic(signature: &str) -> [u8; 32] {
    let mut output = [0; 32];
    keccak(signature, &mut output);
    output
}

/// Splits call or revert data into its selector and argument payload.
pub fn split_selector(data: &[u8]) -> Result<([u8; 4], &[u8]), Error> {
    if data.len() < 4 {
        return Err(Error::InsufficientData(data.len()));
    }
    let mut selector = [0; 4];
    selector.copy_from_slice(&data[..4]);
    Ok((selector, &data[4..]))
}
