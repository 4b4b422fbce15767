//! Serializable lemma descriptions.
//!
//! [`LemmaShape`] carries the arguments of one proposal independently of the
//! kind it is throttled under, so traces and fixtures can describe proposals
//! as data and encode them later.

use serde::{Deserialize, Serialize};

use crate::ids::{EquationId, TermId, VarId};
use crate::kind::ThrottleKind;
use crate::sign::{Comparator, Sign};
use crate::signature::Signature;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum LemmaShape {
    Monotone {
        var: VarId,
        #[serde(default)]
        strict: bool,
    },
    BinomialSign {
        xy: VarId,
        x: VarId,
        y: VarId,
        sign: i32,
        sy: i32,
    },
    Order {
        ac: VarId,
        a: VarId,
        c_sign: Sign,
        c: VarId,
        bd: VarId,
        b: VarId,
        d_sign: Sign,
        d: VarId,
        cmp: Comparator,
    },
    Tangent {
        monic: VarId,
        x: VarId,
        y: VarId,
        below: bool,
        #[serde(default)]
        plane_type: Option<i32>,
    },
    Powers {
        r: VarId,
        x: VarId,
        y: VarId,
        subtype: u32,
    },
    Division {
        q: VarId,
        x: VarId,
        y: VarId,
        subtype: u32,
    },
    Grobner {
        v1: VarId,
        v2: VarId,
        eq: EquationId,
    },
    BasicSign {
        monic: VarId,
        sign: i32,
    },
    Horner {
        var: VarId,
        term: TermId,
    },
    Factor {
        monic: VarId,
        factor: VarId,
        is_zero: bool,
    },
}

impl LemmaShape {
    /// Encode under `kind` with the matching [`Signature`] constructor.
    #[must_use]
    pub const fn signature(&self, kind: ThrottleKind) -> Signature {
        match *self {
            Self::Monotone { var, strict } => Signature::monotone(kind, var, strict),
            Self::BinomialSign { xy, x, y, sign, sy } => {
                Signature::binomial_sign(kind, xy, x, y, sign, sy)
            }
            Self::Order {
                ac,
                a,
                c_sign,
                c,
                bd,
                b,
                d_sign,
                d,
                cmp,
            } => Signature::order(kind, ac, a, c_sign, c, bd, b, d_sign, d, cmp),
            Self::Tangent {
                monic,
                x,
                y,
                below,
                plane_type,
            } => Signature::tangent(kind, monic, x, y, below, plane_type),
            Self::Powers { r, x, y, subtype } => Signature::powers(kind, r, x, y, subtype),
            Self::Division { q, x, y, subtype } => Signature::division(kind, q, x, y, subtype),
            Self::Grobner { v1, v2, eq } => Signature::grobner(kind, v1, v2, eq),
            Self::BasicSign { monic, sign } => Signature::basic_sign(kind, monic, sign),
            Self::Horner { var, term } => Signature::horner(kind, var, term),
            Self::Factor {
                monic,
                factor,
                is_zero,
            } => Signature::factor(kind, monic, factor, is_zero),
        }
    }

    /// The kind this shape is normally throttled under.
    ///
    /// Factor lemmas are ambiguous between zero and neutral factors; the flag
    /// decides.
    #[must_use]
    pub const fn natural_kind(&self) -> ThrottleKind {
        match self {
            Self::Monotone { .. } => ThrottleKind::Monotone,
            Self::BinomialSign { .. } => ThrottleKind::BinomialSign,
            Self::Order { .. } => ThrottleKind::Order,
            Self::Tangent { .. } => ThrottleKind::Tangent,
            Self::Powers { .. } => ThrottleKind::Powers,
            Self::Division { .. } => ThrottleKind::Division,
            Self::Grobner { .. } => ThrottleKind::Grobner,
            Self::BasicSign { .. } => ThrottleKind::BasicSign,
            Self::Horner { .. } => ThrottleKind::Horner,
            Self::Factor { is_zero: true, .. } => ThrottleKind::FactorZero,
            Self::Factor { is_zero: false, .. } => ThrottleKind::FactorNeutral,
        }
    }
}
