use k256::{ecdsa::SigningKey, elliptic_curve::sec1::ToEncodedPoint};
use rand_core::OsRng;
use sha3::{Digest, Keccak256};

use crate::error::{WalletError, WalletResult};

// Ethereum key
//------------------------------------------------------------------------------

/// A secp256k1 private key together with the values printed on an Ethereum paper wallet.
///
/// The secret only lives in memory; the inner `SigningKey` is zeroized when dropped.
pub struct EthKey {
    key: SigningKey,
}

impl EthKey {
    pub fn generate() -> Self {
        Self { key: SigningKey::random(&mut OsRng) }
    }

    /// Fails with [`WalletError::KeyDerivation`] when the bytes are not a valid scalar, i.e.
    /// zero, not below the curve order, or not 32 bytes long.
    pub fn from_bytes(bytes: &[u8]) -> WalletResult<Self> {
        let key = SigningKey::from_slice(bytes).map_err(|_| WalletError::KeyDerivation)?;
        Ok(Self { key })
    }

    pub fn from_hex(hex_str: &str) -> WalletResult<Self> {
        let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        let bytes = hex::decode(hex_str).map_err(|_| WalletError::KeyDerivation)?;
        Self::from_bytes(&bytes)
    }

    pub fn private(&self) -> String {
        hex::encode(self.key.to_bytes())
    }

    pub fn public(&self) -> String {
        hex::encode(self.public_bytes())
    }

    pub fn address(&self) -> String {
        let hash = Keccak256::digest(self.public_bytes());
        to_checksum_address(&hash[12..])
    }

    pub fn banner(&self) -> String {
        format!(
            "────\nPriv: {}\nPubl: {}\nAddr: {}\n────\n",
            self.private(),
            self.public(),
            self.address()
        )
    }

    // Uncompressed SEC1 point without the leading 0x04 tag
    fn public_bytes(&self) -> Vec<u8> {
        let point = self.key.verifying_key().as_affine().to_encoded_point(false);
        point.as_bytes()[1..].to_vec()
    }
}

// EIP-55 mixed-case checksum: a hex letter is uppercased when the matching nibble of
// keccak256(lowercase hex) is 8 or higher
pub fn to_checksum_address(addr: &[u8]) -> String {
    let lower = hex::encode(addr);
    let hash = Keccak256::digest(lower.as_bytes());

    let mut res = String::with_capacity(lower.len() + 2);
    res.push_str("0x");
    for (i, ch) in lower.chars().enumerate() {
        let shift = if i & 1 == 0 { 4 } else { 0 };
        let nibble = (hash[i >> 1] >> shift) & 0x0f;
        if ch.is_ascii_alphabetic() && nibble >= 8 {
            res.push(ch.to_ascii_uppercase());
        } else {
            res.push(ch);
        }
    }
    res
}
