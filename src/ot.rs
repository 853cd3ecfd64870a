//! 1-of-n oblivious transfer: the receiver seals a secret choice index `beta` under the
//! sender's and its own public keys; the sender then computes `n` sealed per-index key points,
//! of which only the one at index `beta` is recoverable by the receiver.
//!
//! There's no process-wide `defaultParams`/generator the way the Go original's `ot` package has
//! it (an artifact of an older OT variant, per spec.md §9) — every function here is parameterized
//! explicitly by the callers' public keys.

use rand::{CryptoRng, RngCore};

use crate::group::{scalar_from_index, PointG1, Scalar};
use crate::keys::PubKey;

/// The receiver's sealed choice, sent to the sender.
#[derive(Clone, Copy, Debug)]
pub struct ChoiceEnvelope {
    /// `beta * pkA + l * pkB`.
    pub y: PointG1,

    /// `l * G`.
    pub l: PointG1,
}

/// Seals a 1-indexed choice `beta` under the sender's (`pk_a`) and receiver's (`pk_b`) public
/// keys. `beta` is any scalar as far as this function is concerned; the caller is responsible
/// for keeping it in the intended `1..=n` range.
pub fn seal_choice(
    beta: &Scalar,
    pk_a: &PubKey,
    pk_b: &PubKey,
    mut rng: impl RngCore + CryptoRng,
) -> ChoiceEnvelope {
    let l = Scalar::random(&mut rng);
    ChoiceEnvelope { y: pk_a.point.mul(beta).add(&pk_b.point.mul(&l)), l: PointG1::mul_base(&l) }
}

/// Given the receiver's [`ChoiceEnvelope`] and the sender's public key, computes `n` sealed
/// per-index key points and the re-randomized `L'` the receiver needs to recover its own.
///
/// For the index `i` equal to the receiver's `beta`, `kp_i = t * l * pkB`, recoverable by the
/// receiver as `skB * L'`. For `i != beta`, `kp_i` carries an unknown `(beta - i) * skA * G`
/// component the receiver cannot cancel without the sender's secret scalar.
pub fn calculate_key_points(
    envelope: &ChoiceEnvelope,
    pk_a: &PubKey,
    n: i64,
    mut rng: impl RngCore + CryptoRng,
) -> (Vec<PointG1>, PointG1) {
    let t = Scalar::random(&mut rng);
    let t_y = envelope.y.mul(&t);
    let key_points = (1..=n)
        .map(|i| {
            let i_t = scalar_from_index(i) * t;
            t_y.add(&pk_a.point.mul(&i_t).neg())
        })
        .collect();
    (key_points, envelope.l.mul(&t))
}

/// Reveals the receiver's key point given `L'` from [`calculate_key_points`] and the receiver's
/// secret scalar.
#[must_use]
pub fn reveal_key_point(l_prime: &PointG1, sk_b: &Scalar) -> PointG1 {
    l_prime.mul(sk_b)
}
