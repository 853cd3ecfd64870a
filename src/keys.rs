//! Alice/Bob key pairs: a secret [`group::Scalar`](crate::group::Scalar) and the `G1` point it
//! generates. Every public operation in this crate that needs a key takes one of these rather
//! than a raw scalar or point, so a caller can't accidentally pass a point from the wrong group.

use std::fmt::{Debug, Formatter};

use rand::{CryptoRng, RngCore};

use crate::errors::GroupError;
use crate::group::{Encode, PointG1, Scalar};

/// A public key: `sk * G`, a point in G1.
#[derive(Clone, Copy)]
pub struct PubKey {
    /// The decoded point.
    pub point: PointG1,
}

impl PubKey {
    /// Parses a canonical uncompressed G1 point as a public key, rejecting off-curve or
    /// out-of-subgroup encodings.
    pub fn from_bytes(bytes: &[u8]) -> Result<PubKey, GroupError> {
        Ok(PubKey { point: PointG1::from_bytes(bytes)? })
    }

    /// Returns the canonical uncompressed encoding of this public key.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.point.to_bytes()
    }
}

impl Debug for PubKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "PubKey({})", bs58::encode(self.to_bytes()).into_string())
    }
}

impl Eq for PubKey {}

impl PartialEq for PubKey {
    fn eq(&self, other: &Self) -> bool {
        self.point == other.point
    }
}

/// A private key: a non-zero secret scalar and its corresponding public key.
#[derive(Clone, Copy)]
pub struct PrivKey {
    /// The secret scalar. Never zero.
    pub sk: Scalar,

    /// The public key corresponding to `sk`; always `sk * G`.
    pub pub_key: PubKey,
}

impl PrivKey {
    /// Generates a new random private key.
    #[must_use]
    pub fn random(mut rng: impl RngCore + CryptoRng) -> PrivKey {
        let sk = Scalar::random(&mut rng);
        PrivKey::from_scalar(sk)
    }

    #[must_use]
    fn from_scalar(sk: Scalar) -> PrivKey {
        let point = PointG1::mul_base(&sk);
        PrivKey { sk, pub_key: PubKey { point } }
    }
}

impl Debug for PrivKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "PrivKey({:?})", self.pub_key)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaChaRng;

    use super::*;

    #[test]
    fn pub_key_round_trips_through_bytes() {
        let mut rng = ChaChaRng::seed_from_u64(0);
        let key = PrivKey::random(&mut rng);
        assert_eq!(key.pub_key, PubKey::from_bytes(&key.pub_key.to_bytes()).unwrap());
    }

    #[test]
    fn distinct_random_keys_have_distinct_public_keys() {
        let mut rng = ChaChaRng::seed_from_u64(1);
        let a = PrivKey::random(&mut rng);
        let b = PrivKey::random(&mut rng);
        assert_ne!(a.pub_key, b.pub_key);
    }

    #[test]
    fn rejects_garbage_encoding() {
        assert!(PubKey::from_bytes(&[0xFFu8; 32]).is_err());
    }
}
