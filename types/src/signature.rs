//! Fixed-width lemma signatures.
//!
//! A [`Signature`] is the dedup key for one proposed lemma: slot 0 holds the
//! [`ThrottleKind`] code and the remaining slots hold the shape's arguments in
//! a fixed order. Unused trailing slots stay zero. The layout per shape:
//!
//! | shape         | 1     | 2      | 3          | 4          | 5          | 6   | 7           |
//! |---------------|-------|--------|------------|------------|------------|-----|-------------|
//! | monotone      | var   | strict |            |            |            |     |             |
//! | binomial sign | xy    | x      | y          | norm(sign) | norm(sy)   |     |             |
//! | order         | ac    | a      | code(c±)   | c          | bd         | b   | packed tail |
//! | tangent       | monic | x      | y          | below      | plane type |     |             |
//! | powers        | r     | x      | y          | subtype    |            |     |             |
//! | division      | q     | x      | y          | subtype    |            |     |             |
//! | grobner       | v1    | v2     | eq id      |            |            |     |             |
//! | basic sign    | monic | norm(s)|            |            |            |     |             |
//! | horner        | var   | term   |            |            |            |     |             |
//! | factor        | monic | factor | is_zero    |            |            |     |             |
//!
//! `norm` is [`normalize_sign`] and `code` is [`Sign::code`]. The order
//! lemma has one field more than there are slots, so slot 7 packs three
//! fields; see [`pack_order_tail`].

use std::fmt;

use thiserror::Error;

use crate::ids::{EquationId, TermId, VarId};
use crate::kind::ThrottleKind;
use crate::sign::{Comparator, Sign, normalize_sign};

pub const SIGNATURE_SLOTS: usize = 8;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("signature needs {SIGNATURE_SLOTS} slots (got {0})")]
    Length(usize),
}

/// Dedup key for one lemma proposal.
///
/// Equality is slot-wise; the hash folds every slot in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Signature([u32; SIGNATURE_SLOTS]);

/// Pack the trailing order-lemma fields into one slot.
///
/// ```text
/// bits 31..24  sign code of d (0, 1 or 255)
/// bits 23..8   low 16 bits of the d variable
/// bits  7..0   comparator code
/// ```
#[must_use]
pub const fn pack_order_tail(d_sign: Sign, d: VarId, cmp: Comparator) -> u32 {
    (d_sign.code() << 24) | ((d.value() & 0xFFFF) << 8) | (cmp.code() & 0xFF)
}

impl Signature {
    /// Wrap raw slots as-is. Slot 0 may carry a code no [`ThrottleKind`] maps to.
    #[must_use]
    pub const fn from_slots(slots: [u32; SIGNATURE_SLOTS]) -> Self {
        Self(slots)
    }

    #[must_use]
    pub const fn slots(&self) -> &[u32; SIGNATURE_SLOTS] {
        &self.0
    }

    #[must_use]
    pub const fn kind_code(&self) -> u32 {
        self.0[0]
    }

    #[must_use]
    pub const fn kind(&self) -> Option<ThrottleKind> {
        ThrottleKind::from_code(self.0[0])
    }

    const fn with_kind(kind: ThrottleKind) -> [u32; SIGNATURE_SLOTS] {
        let mut slots = [0; SIGNATURE_SLOTS];
        slots[0] = kind.code();
        slots
    }

    #[must_use]
    pub const fn monotone(kind: ThrottleKind, var: VarId, strict: bool) -> Self {
        let mut s = Self::with_kind(kind);
        s[1] = var.value();
        s[2] = strict as u32;
        Self(s)
    }

    #[must_use]
    pub const fn binomial_sign(
        kind: ThrottleKind,
        xy: VarId,
        x: VarId,
        y: VarId,
        sign: i32,
        sy: i32,
    ) -> Self {
        let mut s = Self::with_kind(kind);
        s[1] = xy.value();
        s[2] = x.value();
        s[3] = y.value();
        s[4] = normalize_sign(sign);
        s[5] = normalize_sign(sy);
        Self(s)
    }

    #[must_use]
    pub const fn order(
        kind: ThrottleKind,
        ac: VarId,
        a: VarId,
        c_sign: Sign,
        c: VarId,
        bd: VarId,
        b: VarId,
        d_sign: Sign,
        d: VarId,
        cmp: Comparator,
    ) -> Self {
        let mut s = Self::with_kind(kind);
        s[1] = ac.value();
        s[2] = a.value();
        s[3] = c_sign.code();
        s[4] = c.value();
        s[5] = bd.value();
        s[6] = b.value();
        s[7] = pack_order_tail(d_sign, d, cmp);
        Self(s)
    }

    /// A missing plane type encodes as 0, the same as an explicit `Some(0)`.
    #[must_use]
    pub const fn tangent(
        kind: ThrottleKind,
        monic: VarId,
        x: VarId,
        y: VarId,
        below: bool,
        plane_type: Option<i32>,
    ) -> Self {
        let mut s = Self::with_kind(kind);
        s[1] = monic.value();
        s[2] = x.value();
        s[3] = y.value();
        s[4] = below as u32;
        s[5] = match plane_type {
            Some(t) => t as u32,
            None => 0,
        };
        Self(s)
    }

    #[must_use]
    pub const fn powers(kind: ThrottleKind, r: VarId, x: VarId, y: VarId, subtype: u32) -> Self {
        Self::ternary_with_subtype(kind, r, x, y, subtype)
    }

    #[must_use]
    pub const fn division(kind: ThrottleKind, q: VarId, x: VarId, y: VarId, subtype: u32) -> Self {
        Self::ternary_with_subtype(kind, q, x, y, subtype)
    }

    const fn ternary_with_subtype(
        kind: ThrottleKind,
        result: VarId,
        x: VarId,
        y: VarId,
        subtype: u32,
    ) -> Self {
        let mut s = Self::with_kind(kind);
        s[1] = result.value();
        s[2] = x.value();
        s[3] = y.value();
        s[4] = subtype;
        Self(s)
    }

    #[must_use]
    pub const fn grobner(kind: ThrottleKind, v1: VarId, v2: VarId, eq: EquationId) -> Self {
        let mut s = Self::with_kind(kind);
        s[1] = v1.value();
        s[2] = v2.value();
        s[3] = eq.value();
        Self(s)
    }

    #[must_use]
    pub const fn basic_sign(kind: ThrottleKind, monic: VarId, sign: i32) -> Self {
        let mut s = Self::with_kind(kind);
        s[1] = monic.value();
        s[2] = normalize_sign(sign);
        Self(s)
    }

    #[must_use]
    pub const fn horner(kind: ThrottleKind, var: VarId, term: TermId) -> Self {
        let mut s = Self::with_kind(kind);
        s[1] = var.value();
        s[2] = term.value();
        Self(s)
    }

    #[must_use]
    pub const fn factor(kind: ThrottleKind, monic: VarId, factor: VarId, is_zero: bool) -> Self {
        let mut s = Self::with_kind(kind);
        s[1] = monic.value();
        s[2] = factor.value();
        s[3] = is_zero as u32;
        Self(s)
    }
}

impl TryFrom<&[u32]> for Signature {
    type Error = SignatureError;

    fn try_from(slots: &[u32]) -> Result<Self, Self::Error> {
        let slots: [u32; SIGNATURE_SLOTS] = slots
            .try_into()
            .map_err(|_| SignatureError::Length(slots.len()))?;
        Ok(Self(slots))
    }
}

impl From<[u32; SIGNATURE_SLOTS]> for Signature {
    fn from(slots: [u32; SIGNATURE_SLOTS]) -> Self {
        Self(slots)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, slot) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{slot}")?;
        }
        f.write_str("]")
    }
}
