//! The end-to-end "share the β-th of n ciphertexts" flow: wires [`crate::ot`] and [`crate::pre`]
//! together so an untrusted proxy can re-encrypt a batch of stored items for a receiver without
//! learning which one the receiver actually wants, or any plaintext.
//!
//! This module has no transport or storage dependency of its own — each step is a plain function
//! over plain data. [`OtChoiceRequest`] and its siblings describe the shape a transport
//! collaborator would serialize to move those values between Alice, Bob, and the proxy; they
//! carry no networking logic.

use log::{debug, warn};
use rand::{CryptoRng, RngCore};

use crate::errors::OrchestratorError;
use crate::group::{self, scalar_from_index, Encode, Gt, PointG1, PointG2};
use crate::keys::{PrivKey, PubKey};
use crate::ot::{self, ChoiceEnvelope};
use crate::pre::{self, PreCiphertext};

/// Bob's sealed-choice request to Alice, naming the stored collection by an opaque identifier a
/// storage collaborator assigns.
#[derive(Clone, Debug)]
pub struct OtChoiceRequest {
    /// Opaque identifier for the stored item collection.
    pub content_id: Vec<u8>,
    /// The owner's (Alice's) public key.
    pub owner: PubKey,
    /// `Y` from [`ot::seal_choice`].
    pub y: PointG1,
    /// `L` from [`ot::seal_choice`].
    pub l: PointG1,
}

/// Alice's reply to an [`OtChoiceRequest`].
#[derive(Clone, Debug)]
pub struct OtChoiceResponse {
    /// `0` on success; see [`crate::errors::error_code`] for the stable mapping otherwise.
    pub error_code: u32,
    /// A human-readable description of `error_code`.
    pub error_msg: String,
}

/// Alice's re-encrypt request to the proxy: a re-key per stored item, in index order.
#[derive(Clone, Debug)]
pub struct ReEncryptRequest {
    /// Opaque identifier for the stored item collection.
    pub content_id: Vec<u8>,
    /// `L'` from [`ot::calculate_key_points`].
    pub l_prime: PointG1,
    /// One re-key per stored item. The vector form, never a singular `A`/re-key pair — per
    /// spec.md §9, only the vector form supports OT-hidden choice.
    pub re_keys: Vec<PointG2>,
    /// Opaque transaction identifier, assigned by the storage collaborator.
    pub tx_id: Vec<u8>,
}

/// The proxy's reply to a [`ReEncryptRequest`].
#[derive(Clone, Debug)]
pub struct ReEncryptResponse {
    /// `0` on success; see [`crate::errors::error_code`] for the stable mapping otherwise.
    pub error_code: u32,
    /// A human-readable description of `error_code`.
    pub error_msg: String,
}

/// Alice's half of the protocol: given Bob's sealed choice and her own key pair, computes the
/// per-index key points, derives a receiver scalar for each, and returns the re-keys the proxy
/// needs plus the re-randomized `L'` to forward to Bob.
pub fn alice_answer(
    envelope: &ChoiceEnvelope,
    alice: &PrivKey,
    n: i64,
    mut rng: impl RngCore + CryptoRng,
) -> (Vec<PointG2>, PointG1) {
    debug!("alice computing {n} oblivious key points");
    let (key_points, l_prime) = ot::calculate_key_points(envelope, &alice.pub_key, n, &mut rng);
    let re_keys = key_points
        .iter()
        .map(|kp| {
            let b = group::derive_scalar_from_point(&kp.to_bytes());
            pre::generate_re_key(&alice.sk, &b)
        })
        .collect();
    (re_keys, l_prime)
}

/// The proxy's step: re-encrypts each stored ciphertext's encapsulated point under the matching
/// re-key. The proxy never sees a plaintext, and — since it receives a re-key for every stored
/// item rather than just the receiver's choice — never learns which index the receiver wants.
pub fn proxy_re_encrypt(
    ciphertexts: &[PreCiphertext],
    re_keys: &[PointG2],
) -> Result<Vec<Gt>, OrchestratorError> {
    if ciphertexts.len() != re_keys.len() {
        warn!(
            "re-encrypt batch size mismatch: {} ciphertexts, {} re-keys",
            ciphertexts.len(),
            re_keys.len()
        );
        return Err(OrchestratorError::OutOfRange {
            index: re_keys.len() as i64,
            count: ciphertexts.len() as i64,
        });
    }
    Ok(ciphertexts.iter().zip(re_keys).map(|(ct, rk)| pre::re_encrypt(&ct.a, rk)).collect())
}

/// Bob's final step: reveals his key point, derives the receiver scalar, and decrypts the frame
/// the proxy re-encrypted for him.
pub fn bob_decrypt(
    l_prime: &PointG1,
    bob: &PrivKey,
    re_encrypted: &Gt,
    frame: &[u8],
) -> Result<Vec<u8>, OrchestratorError> {
    let kp = ot::reveal_key_point(l_prime, &bob.sk);
    let b = group::derive_scalar_from_point(&kp.to_bytes());
    pre::decrypt_by_receiver(re_encrypted, &b, frame).map_err(OrchestratorError::from)
}

/// Runs the full "share the β-th of n ciphertexts" flow in-process, with no transport in
/// between. `beta` is 1-indexed; the proxy touches every entry in `ciphertexts`, but only
/// `beta`'s re-encrypted point unseals for Bob.
///
/// Mirrors the Go original's `bench.shareMessages`/`encryptMessages`/`decryptMessage`, promoted
/// here to a directly callable, transport-free API. The first error encountered aborts the whole
/// flow, matching spec.md §7's batch propagation policy.
pub fn share(
    ciphertexts: &[PreCiphertext],
    beta: i64,
    alice: &PrivKey,
    bob: &PrivKey,
    mut rng: impl RngCore + CryptoRng,
) -> Result<Vec<u8>, OrchestratorError> {
    let n = ciphertexts.len() as i64;
    if beta < 1 || beta > n {
        warn!("choice index {beta} out of range for {n} items");
        return Err(OrchestratorError::OutOfRange { index: beta, count: n });
    }

    debug!("bob sealing choice {beta} of {n}");
    let envelope =
        ot::seal_choice(&scalar_from_index(beta), &alice.pub_key, &bob.pub_key, &mut rng);

    let (re_keys, l_prime) = alice_answer(&envelope, alice, n, &mut rng);

    debug!("proxy re-encrypting {n} ciphertexts");
    let re_encrypted = proxy_re_encrypt(ciphertexts, &re_keys)?;

    debug!("bob revealing key point and decrypting index {beta}");
    let chosen = (beta - 1) as usize;
    bob_decrypt(&l_prime, bob, &re_encrypted[chosen], &ciphertexts[chosen].frame).map_err(|e| {
        warn!("bob failed to decrypt the chosen item: {e}");
        e
    })
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaChaRng;

    use super::*;

    fn setup_ciphertexts(
        alice: &PrivKey,
        n: usize,
        rng: &mut ChaChaRng,
    ) -> (Vec<PreCiphertext>, Vec<Vec<u8>>) {
        let plaintexts: Vec<Vec<u8>> =
            (0..n).map(|i| format!("item number {i}").into_bytes()).collect();
        let ciphertexts =
            plaintexts.iter().map(|p| pre::encrypt(&alice.pub_key, p, &mut *rng)).collect();
        (ciphertexts, plaintexts)
    }

    #[test]
    fn bob_recovers_exactly_his_chosen_item() {
        let mut rng = ChaChaRng::seed_from_u64(0);
        let alice = PrivKey::random(&mut rng);
        let bob = PrivKey::random(&mut rng);
        let (ciphertexts, plaintexts) = setup_ciphertexts(&alice, 10, &mut rng);

        let beta = 3;
        let recovered = share(&ciphertexts, beta, &alice, &bob, &mut rng).unwrap();
        assert_eq!(plaintexts[(beta - 1) as usize], recovered);
    }

    #[test]
    fn other_items_do_not_authenticate_under_bobs_derived_key() {
        let mut rng = ChaChaRng::seed_from_u64(1);
        let alice = PrivKey::random(&mut rng);
        let bob = PrivKey::random(&mut rng);
        let (ciphertexts, _) = setup_ciphertexts(&alice, 5, &mut rng);

        let beta = 2;
        let envelope =
            ot::seal_choice(&scalar_from_index(beta), &alice.pub_key, &bob.pub_key, &mut rng);
        let (re_keys, l_prime) = alice_answer(&envelope, &alice, 5, &mut rng);
        let re_encrypted = proxy_re_encrypt(&ciphertexts, &re_keys).unwrap();

        let kp = ot::reveal_key_point(&l_prime, &bob.sk);
        let b = group::derive_scalar_from_point(&kp.to_bytes());
        for (i, ct) in ciphertexts.iter().enumerate() {
            let result = pre::decrypt_by_receiver(&re_encrypted[i], &b, &ct.frame);
            if i as i64 == beta - 1 {
                assert!(result.is_ok());
            } else {
                assert!(result.is_err(), "index {i} unexpectedly decrypted under bob's key");
            }
        }
    }

    #[test]
    fn out_of_range_choice_is_rejected() {
        let mut rng = ChaChaRng::seed_from_u64(2);
        let alice = PrivKey::random(&mut rng);
        let bob = PrivKey::random(&mut rng);
        let (ciphertexts, _) = setup_ciphertexts(&alice, 3, &mut rng);

        assert!(matches!(
            share(&ciphertexts, 0, &alice, &bob, &mut rng),
            Err(OrchestratorError::OutOfRange { index: 0, count: 3 })
        ));
        assert!(matches!(
            share(&ciphertexts, 4, &alice, &bob, &mut rng),
            Err(OrchestratorError::OutOfRange { index: 4, count: 3 })
        ));
    }
}
