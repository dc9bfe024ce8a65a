use super::*;

#[test]
fn can_create_deterministic_random_per_restart() {
    let environment = Environment::new_silent(10);

    let first = environment.create_random(1);
    let second = Environment::new_silent(11).create_random(0);

    let first = (0..10).map(|_| first.uniform_int(0, 1000)).collect::<Vec<_>>();
    let second = (0..10).map(|_| second.uniform_int(0, 1000)).collect::<Vec<_>>();

    assert_eq!(first, second);
}

#[test]
fn can_use_time_quota() {
    assert!(!TimeQuota::new(3600.).is_reached());
    assert!(TimeQuota::new(-1.).is_reached());
}
