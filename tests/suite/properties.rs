//! End-to-end decision behavior through the public API.

use throttle_core::{Throttle, ThrottleUndo, Trail};
use throttle_types::{Comparator, EquationId, Sign, Signature, TermId, ThrottleKind};

use crate::common::v;

fn fresh() -> (Throttle, Trail<ThrottleUndo>) {
    (Throttle::new(), Trail::new())
}

#[test]
fn first_proposal_is_accepted() {
    let (mut throttle, mut trail) = fresh();
    assert!(!throttle.insert_new_monotone(&mut trail, ThrottleKind::Monotone, v(3), true));
    assert_eq!(trail.len(), 1);
    assert_eq!(throttle.stats().throttled(), 0);
}

#[test]
fn repeat_in_same_branch_is_suppressed() {
    let (mut throttle, mut trail) = fresh();
    trail.push_scope();
    let horner = |t: &mut Throttle, tr: &mut Trail<ThrottleUndo>| {
        t.insert_new_horner(tr, ThrottleKind::Horner, v(7), TermId::new(2))
    };
    assert!(!horner(&mut throttle, &mut trail));
    assert!(horner(&mut throttle, &mut trail));
    assert_eq!(throttle.stats().throttled_kind(ThrottleKind::Horner), 1);
    // Suppressed proposals leave nothing to undo.
    assert_eq!(trail.len(), 1);
}

#[test]
fn kinds_partition_the_signature_space() {
    let (mut throttle, mut trail) = fresh();
    let shared = |kind| Signature::powers(kind, v(1), v(2), v(3), 0);
    assert!(!throttle.insert_new(&mut trail, shared(ThrottleKind::Powers)));
    assert!(!throttle.insert_new(&mut trail, shared(ThrottleKind::Division)));
    assert!(!throttle.insert_new_division(&mut trail, ThrottleKind::Division, v(1), v(2), v(3), 1));
    assert_eq!(throttle.seen_len(), 3);
}

#[test]
fn backtracking_forgets_branch_local_entries() {
    let (mut throttle, mut trail) = fresh();
    let root = Signature::grobner(ThrottleKind::Grobner, v(1), v(2), EquationId::new(0));
    let inner = Signature::grobner(ThrottleKind::Grobner, v(1), v(2), EquationId::new(1));

    assert!(!throttle.insert_new(&mut trail, root));
    trail.push_scope();
    assert!(!throttle.insert_new(&mut trail, inner));
    trail.pop_scopes(1, &mut throttle);

    assert!(throttle.is_seen(&root));
    assert!(!throttle.is_seen(&inner));
    assert!(!throttle.insert_new(&mut trail, inner));
    assert!(throttle.insert_new(&mut trail, root));
}

#[test]
fn ban_survives_backtracking() {
    let (mut throttle, mut trail) = fresh();
    trail.push_scope();
    // Basic-sign threshold is 2: the second repeat bans.
    for expected in [false, true, true] {
        assert_eq!(
            throttle.insert_new_basic_sign(&mut trail, ThrottleKind::BasicSign, v(5), -1),
            expected
        );
    }
    let sig = Signature::basic_sign(ThrottleKind::BasicSign, v(5), -1);
    assert!(throttle.is_banned(&sig));

    trail.pop_scopes(1, &mut throttle);
    assert!(!throttle.is_seen(&sig));
    assert!(throttle.is_banned(&sig));
    assert!(throttle.insert_new(&mut trail, sig));
    assert_eq!(throttle.stats().throttled_kind(ThrottleKind::BasicSign), 3);
}

#[test]
fn factor_zero_bans_on_first_repeat() {
    let (mut throttle, mut trail) = fresh();
    assert!(!throttle.insert_new_factor(&mut trail, ThrottleKind::FactorZero, v(4), v(5), true));
    assert!(throttle.insert_new_factor(&mut trail, ThrottleKind::FactorZero, v(4), v(5), true));
    let sig = Signature::factor(ThrottleKind::FactorZero, v(4), v(5), true);
    assert!(throttle.is_banned(&sig));
    assert_eq!(throttle.repeat_count(&sig), 1);
}

#[test]
fn order_lemmas_differing_only_in_comparator_are_independent() {
    let (mut throttle, mut trail) = fresh();
    for cmp in [Comparator::Le, Comparator::Lt, Comparator::Ge, Comparator::Ne] {
        assert!(!throttle.insert_new_order(
            &mut trail,
            ThrottleKind::Order,
            v(10),
            v(1),
            Sign::Positive,
            v(2),
            v(11),
            v(3),
            Sign::Negative,
            v(4),
            cmp,
        ));
    }
    assert_eq!(throttle.seen_len(), 4);
}

#[test]
fn repeat_counts_persist_across_branches() {
    let (mut throttle, mut trail) = fresh();
    // Tangent threshold is 4; repeats from sibling branches add up.
    let propose = |t: &mut Throttle, tr: &mut Trail<ThrottleUndo>| {
        t.insert_new_tangent(tr, ThrottleKind::Tangent, v(9), v(1), v(2), true, Some(1))
    };
    for _ in 0..2 {
        trail.push_scope();
        assert!(!propose(&mut throttle, &mut trail));
        assert!(propose(&mut throttle, &mut trail));
        assert!(propose(&mut throttle, &mut trail));
        trail.pop_scopes(1, &mut throttle);
    }
    let sig = Signature::tangent(ThrottleKind::Tangent, v(9), v(1), v(2), true, Some(1));
    assert_eq!(throttle.repeat_count(&sig), 4);
    assert!(throttle.is_banned(&sig));
}

#[test]
fn unknown_kind_code_counts_only_in_aggregate() {
    let (mut throttle, mut trail) = fresh();
    let sig = Signature::from_slots([42, 1, 2, 3, 0, 0, 0, 0]);
    assert!(!throttle.insert_new(&mut trail, sig));
    assert!(throttle.insert_new(&mut trail, sig));
    assert_eq!(throttle.stats().throttled(), 1);
    assert!(
        ThrottleKind::ALL
            .into_iter()
            .all(|kind| throttle.stats().throttled_kind(kind) == 0)
    );
}
