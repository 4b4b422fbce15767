//! The throttle embedded in an engine that owns the trail and statistics.

use throttle_core::{Throttle, ThrottlePolicy, ThrottleUndo, Trail};
use throttle_types::{Signature, TermId, ThrottleKind};

use crate::common::{Engine, EngineStats, EngineUndo, v};

#[test]
fn shared_trail_interleaves_component_actions() {
    let mut engine = Engine::new();
    engine.decide();
    engine.bound(1);
    let sig = Signature::monotone(ThrottleKind::Monotone, v(1), false);
    assert!(!engine.parts.throttle.insert_new(&mut engine.trail, sig));
    engine.bound(2);
    assert_eq!(engine.trail.len(), 3);

    assert_eq!(engine.backtrack(1), 3);
    assert!(engine.parts.bounds.is_empty());
    assert!(!engine.parts.throttle.is_seen(&sig));
}

#[test]
fn nested_scopes_unwind_one_level_at_a_time() {
    let mut engine = Engine::new();
    let sigs: Vec<_> = (0..3)
        .map(|i| Signature::horner(ThrottleKind::Horner, v(i), TermId::new(i)))
        .collect();
    for sig in &sigs {
        engine.decide();
        assert!(!engine.parts.throttle.insert_new(&mut engine.trail, *sig));
    }

    engine.backtrack(1);
    assert!(!engine.parts.throttle.is_seen(&sigs[2]));
    assert!(engine.parts.throttle.is_seen(&sigs[1]));

    engine.backtrack(2);
    assert_eq!(engine.parts.throttle.seen_len(), 0);
    assert_eq!(engine.trail.num_scopes(), 0);
}

#[test]
fn backtracking_past_the_root_is_clamped() {
    let mut engine = Engine::new();
    let root = Signature::basic_sign(ThrottleKind::BasicSign, v(3), 1);
    assert!(!engine.parts.throttle.insert_new(&mut engine.trail, root));
    engine.decide();
    engine.bound(8);

    assert_eq!(engine.backtrack(5), 1);
    assert!(engine.parts.throttle.is_seen(&root));
}

#[test]
fn engine_owned_stats_receive_increments() {
    let mut stats = EngineStats::default();
    {
        let mut throttle = Throttle::with_stats(ThrottlePolicy::default(), &mut stats);
        let mut trail = Trail::<EngineUndo>::new();
        let sig = Signature::factor(ThrottleKind::FactorNeutral, v(2), v(3), false);
        assert!(!throttle.insert_new(&mut trail, sig));
        assert!(throttle.insert_new(&mut trail, sig));
        assert!(throttle.insert_new(&mut trail, sig));
        assert_eq!(
            trail.len(),
            1,
            "only the acceptance is logged, as {:?}",
            EngineUndo::Throttle(ThrottleUndo::ForgetSeen(sig))
        );
    }
    stats.conflicts += 1;
    assert_eq!(stats.throttled.throttled(), 2);
    assert_eq!(stats.throttled.throttled_kind(ThrottleKind::FactorNeutral), 2);
    assert_eq!(stats.conflicts, 1);
}
