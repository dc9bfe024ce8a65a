use super::*;

fn get_objective_names(goal: &GoalContext) -> Vec<String> {
    goal.objectives().map(|(name, _)| name.to_string()).collect()
}

#[test]
fn can_create_default_goal() {
    let goal = create_goal_context(&GoalConfig::default()).unwrap();

    assert_eq!(
        get_objective_names(&goal),
        vec!["preferences", "workload_balance", "standby_balance", "consecutive_nights", "krozeci_frequency"]
    );
    assert_eq!(goal.constraints.len(), 9);
    assert_eq!(goal.penalties(), &Penalties::default());
}

parameterized_test! {can_configure_optional_rules, (same_day_transition, max_consecutive_days, expected), {
    let config = GoalConfig { same_day_transition, max_consecutive_days, ..GoalConfig::default() };

    let goal = create_goal_context(&config).unwrap();

    assert_eq!(goal.constraints.len(), expected);
}}

can_configure_optional_rules! {
    case01_without_same_day: (SameDayTransitionPolicy::Never, None, 8),
    case02_with_consecutive_days: (SameDayTransitionPolicy::Always, Some(3), 10),
}

#[test]
fn can_add_workplace_terms_when_weighted() {
    let config = GoalConfig { preferred_workplace_weight: 2, workplace_distribution_weight: 1, ..GoalConfig::default() };

    let goal = create_goal_context(&config).unwrap();

    let names = get_objective_names(&goal);
    assert_eq!(names.len(), 7);
    assert_eq!(names[5..], ["preferred_workplaces".to_string(), "workplace_distribution".to_string()]);
}

parameterized_test! {can_reject_invalid_config, config, {
    assert!(create_goal_context(&config).is_err());
}}

can_reject_invalid_config! {
    case01_sum_balance: GoalConfig { balance_measure: Measure::Sum, ..GoalConfig::default() },
    case02_negative_weight: GoalConfig { workload_weight: -1, ..GoalConfig::default() },
    case03_no_krozeci_workplaces: GoalConfig { krozeci_workplaces: WorkplaceSet::default(), ..GoalConfig::default() },
    case04_zero_consecutive_days: GoalConfig { max_consecutive_days: Some(0), ..GoalConfig::default() },
    case05_negative_unassigned_penalty: GoalConfig {
        penalties: Penalties { unassigned: -1., ..Penalties::default() },
        ..GoalConfig::default()
    },
    case06_nan_violation_penalty: GoalConfig {
        penalties: Penalties { violation: f64::NAN, ..Penalties::default() },
        ..GoalConfig::default()
    },
    case07_negative_workplace_distribution: GoalConfig { workplace_distribution_weight: -2, ..GoalConfig::default() },
    case08_infinite_unassigned_penalty: GoalConfig {
        penalties: Penalties { unassigned: f64::INFINITY, ..Penalties::default() },
        ..GoalConfig::default()
    },
}
