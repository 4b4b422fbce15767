//! Domain types for the lemma throttle.
//!
//! This crate holds the pure half of the throttle: lemma kinds, argument
//! types, and the encoders that pack a lemma into a fixed-width
//! [`Signature`]. No IO, no mutable state.

mod ids;
mod kind;
mod lemma;
mod sign;
mod signature;

pub use ids::{EquationId, TermId, VarId};
pub use kind::ThrottleKind;
pub use lemma::LemmaShape;
pub use sign::{Comparator, NEGATIVE_SIGN_CODE, SIGN_OFFSET, Sign, normalize_sign};
pub use signature::{SIGNATURE_SLOTS, Signature, SignatureError, pack_order_tail};
