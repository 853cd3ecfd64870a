//! A trapdoor-collisionable hash built from the pairing: anyone can compute and verify
//! `ComputeHash(Y, R, m)`, but only the holder of `x` (where `Y = x * G1`) can find, for any
//! target message `m'`, an `R'` that collides with a given `(Y, R, m)`. Composed with
//! [`crate::merkle`], this lets a mutable-storage collaborator update a block in place without
//! recomputing the Merkle root above it.

use sha2::{Digest as Sha2Digest, Sha256};

use crate::errors::ChameleonError;
use crate::group::{self, Encode, PointG1, PointG2, Scalar};

/// A 32-byte chameleon hash digest.
pub type Digest = [u8; 32];

/// Computes the chameleon hash `SHA-256(marshal(m * G_GT + e(Y, R)))`.
#[must_use]
pub fn compute_hash(y: &PointG1, r: &PointG2, m: &Scalar) -> Digest {
    let h = group::gt_mul_base(m) + group::pair(y, r);
    Sha256::digest(h.to_bytes()).into()
}

/// Recomputes the chameleon hash for `(Y, R, m)` and compares it to `target` in constant time.
#[must_use]
pub fn verify(target: &Digest, y: &PointG1, r: &PointG2, m: &Scalar) -> bool {
    use subtle::ConstantTimeEq;
    compute_hash(y, r, m).ct_eq(target).into()
}

/// Given the trapdoor scalar `x` (where `Y = x * G1`), the original `(r, m)`, and a target
/// message `m'`, finds `r'` such that `ComputeHash(Y, r'*G2, m') == ComputeHash(Y, r*G2, m)`.
///
/// Solves `m + x*r = m' + x*r' (mod q)` for `r' = (m + x*r - m') * x^-1`. Returns the recomputed
/// digest (always equal to `compute_hash(y, &(r*G2), m)`), `r'`, and `R' = r'*G2`.
pub fn compute_collision(
    y: &PointG1,
    x: &Scalar,
    r: &Scalar,
    m: &Scalar,
    m_prime: &Scalar,
) -> Result<(Digest, Scalar, PointG2), ChameleonError> {
    if x.is_zero() {
        return Err(ChameleonError::CollisionDomain);
    }
    let r_prime = (*m + (*x * *r) - *m_prime) * x.inverse();
    let r_prime_point = PointG2::mul_base(&r_prime);
    let digest = compute_hash(y, &r_prime_point, m_prime);
    Ok((digest, r_prime, r_prime_point))
}
