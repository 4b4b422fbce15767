//! Configuration files driving throttle behavior.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use throttle_config::{ConfigError, load_policy};
use throttle_core::PromotionMode;
use throttle_types::{Signature, ThrottleKind};

use crate::common::{Engine, v};

fn write_config(content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, content).unwrap();
    (dir, path)
}

fn propose(engine: &mut Engine, sig: Signature) -> bool {
    engine.parts.throttle.insert_new(&mut engine.trail, sig)
}

#[test]
fn raised_threshold_delays_the_ban() {
    let (_dir, path) = write_config("[throttle.thresholds]\nfactor_zero = 3\n");
    let mut engine = Engine::with_policy(load_policy(&path).unwrap());
    let thresholds = engine.parts.throttle.policy().thresholds();
    assert_eq!(thresholds.get(ThrottleKind::FactorZero), 3);
    let sig = Signature::factor(ThrottleKind::FactorZero, v(4), v(5), true);

    assert!(!propose(&mut engine, sig));
    assert!(propose(&mut engine, sig));
    assert!(propose(&mut engine, sig));
    assert!(!engine.parts.throttle.is_banned(&sig));
    assert!(propose(&mut engine, sig));
    assert!(engine.parts.throttle.is_banned(&sig));
}

#[test]
fn disabled_bans_keep_branch_dedup() {
    let (_dir, path) = write_config("[throttle]\npermanent_bans = false\n");
    let policy = load_policy(&path).unwrap();
    assert_eq!(policy.promotion(), PromotionMode::Disabled);

    let mut engine = Engine::with_policy(policy);
    let sig = Signature::factor(ThrottleKind::FactorZero, v(4), v(5), true);
    engine.decide();
    assert!(!propose(&mut engine, sig));
    for _ in 0..5 {
        assert!(propose(&mut engine, sig));
    }
    assert_eq!(engine.parts.throttle.banned_len(), 0);

    engine.backtrack(1);
    assert!(!propose(&mut engine, sig));
}

#[test]
fn bad_config_is_reported_with_its_path() {
    let (_dir, path) = write_config("[throttle.thresholds]\ncubic = 2\n");
    let err = load_policy(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { .. }));
    assert!(err.to_string().contains("cubic"));
    assert_eq!(err.path(), path.as_path());
}
