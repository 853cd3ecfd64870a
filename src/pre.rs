//! Proxy re-encryption (PRE): public-key wrapping of a symmetric key via `G1 x Gt`, a
//! unidirectional re-key in `G2`, and proxy re-encryption via the pairing.
//!
//! `Pre::encrypt` wraps a fresh symmetric key under the owner's public key and immediately uses
//! it to drive [`crate::symcipher`] over the plaintext — there's no callback indirection the way
//! the Go original's `EncryptClosure` has it: the caller gets back `(A, frame)` directly and can
//! persist or transmit them independently.

use rand::{CryptoRng, RngCore};

use crate::errors::PreError;
use crate::group::{self, Encode, Gt, PointG1, PointG2, Scalar};
use crate::keys::PubKey;
use crate::symcipher;

/// A proxy re-encryption ciphertext: the encapsulated key point `A` in G1, plus the symmetric
/// frame it protects. The two are transmitted and stored independently (spec.md §3).
#[derive(Clone, Debug)]
pub struct PreCiphertext {
    /// `r * pkOwner`, the encapsulated key point.
    pub a: PointG1,

    /// The symmetric frame, keyed by `marshal(r * G_GT)`.
    pub frame: Vec<u8>,
}

/// Encrypts `plaintext` for `owner`'s public key.
///
/// 1. Samples a random scalar `r`.
/// 2. `A = r * pkOwner` (G1) — the value returned for later re-keying.
/// 3. `B = r * G_GT` — the ephemeral shared secret, never transmitted directly.
/// 4. Drives [`symcipher::encrypt`] with `K = marshal(B)` over `plaintext`.
pub fn encrypt(
    owner: &PubKey,
    plaintext: &[u8],
    mut rng: impl RngCore + CryptoRng,
) -> PreCiphertext {
    let r = Scalar::random(&mut rng);
    let a = owner.point.mul(&r);
    let b = group::gt_mul_base(&r);
    let frame = symcipher::encrypt(&b.to_bytes(), plaintext, &mut rng);
    PreCiphertext { a, frame }
}

/// Generates a unidirectional re-key `rk_{a->b} = (b/a) * G2`, letting a holder of `rk_{a->b}`
/// transform a ciphertext encrypted under `a`'s public key into one decryptable by `b`, without
/// ever learning `a` or `b`.
#[must_use]
pub fn generate_re_key(a: &Scalar, b: &Scalar) -> PointG2 {
    PointG2::mul_base(b).mul(&a.inverse())
}

/// Re-encrypts `a` (the owner-side encapsulated key point of a [`PreCiphertext`]) under a
/// re-key produced by [`generate_re_key`]. Run by the proxy; reveals no plaintext and, absent
/// `a`'s corresponding secret scalar, no information about the recipient either.
#[must_use]
pub fn re_encrypt(a: &PointG1, re_key: &PointG2) -> Gt {
    group::pair(a, re_key)
}

/// Decrypts a re-encrypted ciphertext as the receiver, given the receiver's secret scalar `b`,
/// the point `re_encrypted` produced by [`re_encrypt`], and the original symmetric `frame`.
///
/// Correctness: `re_encrypted = e(r*pkOwner, (b/a)*G2) = e(G1,G2)^{r*a*(b/a)} = b * (r*G_GT)`, so
/// `b^-1 * re_encrypted = r*G_GT`, the same `B` the owner encrypted under.
pub fn decrypt_by_receiver(
    re_encrypted: &Gt,
    b: &Scalar,
    frame: &[u8],
) -> Result<Vec<u8>, PreError> {
    let shared = *re_encrypted * b.inverse().0;
    Ok(symcipher::decrypt(&shared.to_bytes(), frame)?)
}

/// Decrypts a ciphertext directly as the owner, given the owner's secret scalar `a`, the
/// encapsulated point `a_point` from a [`PreCiphertext`], and the symmetric `frame`.
pub fn decrypt_by_owner(
    a_point: &PointG1,
    owner_sk: &Scalar,
    frame: &[u8],
) -> Result<Vec<u8>, PreError> {
    let r_g = a_point.mul(&owner_sk.inverse());
    let b = group::pair(&r_g, &PointG2::generator());
    Ok(symcipher::decrypt(&b.to_bytes(), frame)?)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaChaRng;

    use super::*;
    use crate::keys::PrivKey;

    #[test]
    fn owner_round_trip() {
        let mut rng = ChaChaRng::seed_from_u64(0);
        let alice = PrivKey::random(&mut rng);
        let plaintext = b"a hundred uniformly random bytes, or close enough for a unit test";

        let ct = encrypt(&alice.pub_key, plaintext, &mut rng);
        let recovered = decrypt_by_owner(&ct.a, &alice.sk, &ct.frame).unwrap();
        assert_eq!(plaintext.to_vec(), recovered);
    }

    #[test]
    fn re_encrypted_round_trip() {
        let mut rng = ChaChaRng::seed_from_u64(1);
        let alice = PrivKey::random(&mut rng);
        let bob = PrivKey::random(&mut rng);
        let plaintext = b"shared via an honest-but-curious proxy";

        let ct = encrypt(&alice.pub_key, plaintext, &mut rng);
        let re_key = generate_re_key(&alice.sk, &bob.sk);
        let re_encrypted = re_encrypt(&ct.a, &re_key);
        let recovered = decrypt_by_receiver(&re_encrypted, &bob.sk, &ct.frame).unwrap();
        assert_eq!(plaintext.to_vec(), recovered);
    }

    #[test]
    fn wrong_receiver_fails_mac() {
        let mut rng = ChaChaRng::seed_from_u64(2);
        let alice = PrivKey::random(&mut rng);
        let bob = PrivKey::random(&mut rng);
        let mallory = PrivKey::random(&mut rng);

        let ct = encrypt(&alice.pub_key, b"for bob's eyes only", &mut rng);
        let re_key = generate_re_key(&alice.sk, &bob.sk);
        let re_encrypted = re_encrypt(&ct.a, &re_key);

        assert!(decrypt_by_receiver(&re_encrypted, &mallory.sk, &ct.frame).is_err());
    }
}
