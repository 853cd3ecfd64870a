//! The bilinear group this crate builds on: a type-3 pairing `e: G1 x G2 -> Gt` over BN254.
//!
//! `PointG1`/`PointG2` wrap the two source groups and `Gt` is the pairing's target group.
//! Keeping them as distinct Rust types (rather than one `Point` enum tagged by group, as the
//! Go original does) means `pair(g1, g2)` and friends are checked at compile time: there is no
//! way to accidentally call `e(p1, p1)` on two `PointG1`s and have it compile.

use ark_bn254::{Bn254, Fr, G1Affine, G1Projective, G2Affine, G2Projective};
use ark_ec::pairing::{Pairing, PairingOutput};
use ark_ec::{AffineRepr, CurveGroup, Group as _};
use ark_ff::{BigInteger, Field, PrimeField, UniformRand, Zero};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use rand::{CryptoRng, RngCore};

use crate::errors::GroupError;

/// A scalar in the BN254 group order field. Never zero: every constructor that could produce
/// zero (random sampling, hash-to-scalar) resamples until it isn't.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Scalar(pub(crate) Fr);

impl Scalar {
    /// Samples a random non-zero scalar.
    pub fn random(mut rng: impl RngCore + CryptoRng) -> Scalar {
        loop {
            let k = Fr::rand(&mut rng);
            if !k.is_zero() {
                return Scalar(k);
            }
        }
    }

    /// Returns `true` if this scalar is zero. Exists for completeness; a `Scalar` constructed
    /// through this crate's public API is never zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns the multiplicative inverse of this scalar mod the group order.
    ///
    /// Never panics: a `Scalar` is never zero by construction, so the inverse always exists.
    #[must_use]
    pub fn inverse(&self) -> Scalar {
        Scalar(self.0.inverse().expect("Scalar is never zero"))
    }

    /// Parses a big-endian scalar encoding, rejecting an all-zero input.
    pub fn from_bytes(bytes: &[u8]) -> Result<Scalar, GroupError> {
        let k = Fr::from_be_bytes_mod_order(bytes);
        if k.is_zero() {
            return Err(GroupError::InvalidScalar);
        }
        Ok(Scalar(k))
    }

    /// Returns the canonical big-endian encoding of this scalar (per spec.md §6: a 32-byte
    /// unsigned integer less than `q`).
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.into_bigint().to_bytes_be()
    }
}

impl std::ops::Add for Scalar {
    type Output = Scalar;
    fn add(self, rhs: Scalar) -> Scalar {
        Scalar(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Scalar {
    type Output = Scalar;
    fn sub(self, rhs: Scalar) -> Scalar {
        Scalar(self.0 - rhs.0)
    }
}

impl std::ops::Mul for Scalar {
    type Output = Scalar;
    fn mul(self, rhs: Scalar) -> Scalar {
        Scalar(self.0 * rhs.0)
    }
}

/// Encodes a group element to its canonical byte representation.
pub trait Encode {
    /// Returns the canonical encoding of this element.
    fn to_bytes(&self) -> Vec<u8>;
}

/// A point in the BN254 G1 group (the pairing's first source group).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PointG1(pub(crate) G1Projective);

impl PointG1 {
    /// The G1 group generator.
    #[must_use]
    pub fn generator() -> PointG1 {
        PointG1(G1Projective::generator())
    }

    /// The G1 group's identity element.
    #[must_use]
    pub fn identity() -> PointG1 {
        PointG1(G1Projective::zero())
    }

    /// Computes `scalar * generator`.
    #[must_use]
    pub fn mul_base(scalar: &Scalar) -> PointG1 {
        PointG1(G1Projective::generator() * scalar.0)
    }

    /// Computes `scalar * self`.
    #[must_use]
    pub fn mul(&self, scalar: &Scalar) -> PointG1 {
        PointG1(self.0 * scalar.0)
    }

    /// Adds two points.
    #[must_use]
    pub fn add(&self, other: &PointG1) -> PointG1 {
        PointG1(self.0 + other.0)
    }

    /// Negates this point.
    #[must_use]
    pub fn neg(&self) -> PointG1 {
        PointG1(-self.0)
    }

    /// Parses the canonical uncompressed G1 encoding (spec.md §6), rejecting off-curve or
    /// out-of-subgroup encodings.
    pub fn from_bytes(bytes: &[u8]) -> Result<PointG1, GroupError> {
        let affine =
            G1Affine::deserialize_uncompressed(bytes).map_err(|_| GroupError::InvalidPoint)?;
        Ok(PointG1(affine.into_group()))
    }
}

impl Encode for PointG1 {
    fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.0.into_affine().serialize_uncompressed(&mut out).expect("G1 serialization");
        out
    }
}

/// A point in the BN254 G2 group (the pairing's second source group).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PointG2(pub(crate) G2Projective);

impl PointG2 {
    /// The G2 group generator.
    #[must_use]
    pub fn generator() -> PointG2 {
        PointG2(G2Projective::generator())
    }

    /// The G2 group's identity element.
    #[must_use]
    pub fn identity() -> PointG2 {
        PointG2(G2Projective::zero())
    }

    /// Computes `scalar * generator`.
    #[must_use]
    pub fn mul_base(scalar: &Scalar) -> PointG2 {
        PointG2(G2Projective::generator() * scalar.0)
    }

    /// Computes `scalar * self`.
    #[must_use]
    pub fn mul(&self, scalar: &Scalar) -> PointG2 {
        PointG2(self.0 * scalar.0)
    }

    /// Adds two points.
    #[must_use]
    pub fn add(&self, other: &PointG2) -> PointG2 {
        PointG2(self.0 + other.0)
    }

    /// Negates this point.
    #[must_use]
    pub fn neg(&self) -> PointG2 {
        PointG2(-self.0)
    }

    /// Parses the canonical uncompressed G2 encoding (spec.md §6), rejecting off-curve or
    /// out-of-subgroup encodings.
    pub fn from_bytes(bytes: &[u8]) -> Result<PointG2, GroupError> {
        let affine =
            G2Affine::deserialize_uncompressed(bytes).map_err(|_| GroupError::InvalidPoint)?;
        Ok(PointG2(affine.into_group()))
    }
}

impl Encode for PointG2 {
    fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.0.into_affine().serialize_uncompressed(&mut out).expect("G2 serialization");
        out
    }
}

/// The pairing's target group, written additively: `Gt::zero()` is the identity, and
/// `pair(a, b).add(pair(c, d))` composes the same way `PointG1`/`PointG2` do.
pub type Gt = PairingOutput<Bn254>;

impl Encode for Gt {
    fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.serialize_compressed(&mut out).expect("Gt serialization");
        out
    }
}

/// Computes the bilinear pairing `e(g1, g2)`.
#[must_use]
pub fn pair(g1: &PointG1, g2: &PointG2) -> Gt {
    Bn254::pairing(g1.0.into_affine(), g2.0.into_affine())
}

/// Computes `scalar * generator` in `Gt` (i.e. `e(G1, G2)^scalar` in the multiplicative
/// presentation, `scalar * e(G1, G2)` in the additive one this crate uses throughout).
#[must_use]
pub fn gt_mul_base(scalar: &Scalar) -> Gt {
    pair(&PointG1::generator(), &PointG2::generator()) * scalar.0
}

/// Deterministically derives a non-zero scalar from a group element's canonical encoding:
/// `h = SHA-256(encoded)`, and while the resulting scalar is zero, `h <- SHA-256(h)` and retry.
/// The first hash covers the encoding itself; every hash after that covers only the previous
/// digest, never the original encoding again.
#[must_use]
pub fn derive_scalar_from_point(encoded: &[u8]) -> Scalar {
    use sha2::{Digest, Sha256};

    let mut h: [u8; 32] = Sha256::digest(encoded).into();
    loop {
        let k = Fr::from_be_bytes_mod_order(&h);
        if !k.is_zero() {
            return Scalar(k);
        }
        h = Sha256::digest(h).into();
    }
}

/// Converts a 1-indexed OT choice index to a `Scalar`. Shared by [`crate::ot`] and
/// [`crate::orchestrator`] so both sides of the protocol derive the same scalar for a given
/// index; never zero for `i >= 1`.
#[must_use]
pub fn scalar_from_index(i: i64) -> Scalar {
    debug_assert!(i > 0, "OT choice indices are 1-indexed");
    Scalar(Fr::from(i as u64))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaChaRng;

    use super::*;

    #[test]
    fn scalar_is_never_zero() {
        let mut rng = ChaChaRng::seed_from_u64(1);
        for _ in 0..256 {
            assert!(!Scalar::random(&mut rng).0.is_zero());
        }
    }

    #[test]
    fn point_g1_encode_round_trip() {
        let mut rng = ChaChaRng::seed_from_u64(2);
        let k = Scalar::random(&mut rng);
        let p = PointG1::mul_base(&k);
        let encoded = p.to_bytes();
        assert_eq!(p, PointG1::from_bytes(&encoded).unwrap());
    }

    #[test]
    fn point_g2_encode_round_trip() {
        let mut rng = ChaChaRng::seed_from_u64(3);
        let k = Scalar::random(&mut rng);
        let p = PointG2::mul_base(&k);
        let encoded = p.to_bytes();
        assert_eq!(p, PointG2::from_bytes(&encoded).unwrap());
    }

    #[test]
    fn rejects_garbage_point_encoding() {
        let garbage = vec![0xFFu8; 32];
        assert!(PointG1::from_bytes(&garbage).is_err());
    }

    #[test]
    fn pairing_is_bilinear() {
        let mut rng = ChaChaRng::seed_from_u64(4);
        let a = Scalar::random(&mut rng);
        let b = Scalar::random(&mut rng);

        let p = PointG1::mul_base(&a);
        let q = PointG2::mul_base(&b);

        let lhs = pair(&p, &q);
        let rhs = gt_mul_base(&(a * b));
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn pairing_is_additive_in_each_argument() {
        let mut rng = ChaChaRng::seed_from_u64(5);
        let p1 = PointG1::mul_base(&Scalar::random(&mut rng));
        let p2 = PointG1::mul_base(&Scalar::random(&mut rng));
        let q = PointG2::mul_base(&Scalar::random(&mut rng));

        let lhs = pair(&p1.add(&p2), &q);
        let rhs = pair(&p1, &q) + pair(&p2, &q);
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn scalar_to_bytes_is_32_byte_big_endian() {
        let mut rng = ChaChaRng::seed_from_u64(7);
        let k = Scalar::random(&mut rng);
        assert_eq!(32, k.to_bytes().len());
    }

    #[test]
    fn scalar_from_index_is_never_zero() {
        for i in 1..=50 {
            assert!(!scalar_from_index(i).0.is_zero());
        }
    }

    #[test]
    fn derive_scalar_from_point_is_deterministic_and_nonzero() {
        let mut rng = ChaChaRng::seed_from_u64(6);
        let p = PointG1::mul_base(&Scalar::random(&mut rng));
        let encoded = p.to_bytes();
        let k1 = derive_scalar_from_point(&encoded);
        let k2 = derive_scalar_from_point(&encoded);
        assert_eq!(k1, k2);
        assert!(!k1.0.is_zero());
    }
}
