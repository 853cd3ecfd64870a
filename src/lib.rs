#![warn(missing_docs)]

//! A cryptographic core for outsourcing ciphertexts to an untrusted proxy: a data owner (Alice)
//! stores `n` encrypted items with a semi-trusted proxy, and a receiver (Bob) obliviously
//! retrieves exactly one of them. The proxy re-encrypts only the chosen item and learns neither
//! Bob's choice of index nor any plaintext.
//!
//! Built bottom-up:
//!
//! - [`group`]: the BN254 type-3 pairing `e: G1 x G2 -> Gt` everything else is built on.
//! - [`symcipher`]: AES-256-CBC + HMAC-SHA-256 authenticate-then-encrypt framing.
//! - [`keys`]: Alice/Bob key pairs (a [`group::Scalar`] and the `G1` point it generates).
//! - [`pre`]: proxy re-encryption — hybrid encryption of a byte stream plus a unidirectional
//!   re-key that lets a semi-trusted proxy retarget a ciphertext.
//! - [`ot`]: 1-of-n oblivious transfer; the receiver's per-index key points double as PRE
//!   receiver keys.
//! - [`chameleon`]: a trapdoor-collisionable hash, for updating a Merkle-committed storage block
//!   in place.
//! - [`merkle`]: a binary SHA-256 Merkle tree.
//! - [`orchestrator`]: wires [`ot`] and [`pre`] together into the end-to-end "share the β-th of
//!   n ciphertexts" flow.
//!
//! ```
//! use proxyot_core::keys::PrivKey;
//! use proxyot_core::{orchestrator, pre};
//! use rand::rngs::OsRng;
//!
//! // Alice and Bob each generate a key pair and exchange public keys.
//! let alice = PrivKey::random(OsRng);
//! let bob = PrivKey::random(OsRng);
//!
//! // Alice encrypts three items under her own key and stores them with a proxy.
//! let items: [&[u8]; 3] = [b"first", b"second", b"third"];
//! let ciphertexts: Vec<_> =
//!     items.iter().map(|m| pre::encrypt(&alice.pub_key, m, OsRng)).collect();
//!
//! // Bob obliviously retrieves the second item. The proxy re-encrypts every stored item, but
//! // only the one Bob chose will unseal for him.
//! let plaintext = orchestrator::share(&ciphertexts, 2, &alice, &bob, OsRng).unwrap();
//! assert_eq!(b"second".to_vec(), plaintext);
//! ```

pub mod chameleon;
pub mod errors;
pub mod group;
pub mod keys;
pub mod merkle;
pub mod orchestrator;
pub mod ot;
pub mod pre;
pub mod symcipher;
