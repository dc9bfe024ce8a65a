use crate::construction::goal::{GoalConfig, create_goal_context};
use crate::models::*;
use std::sync::Arc;
use time::{Date, Month};

/// 1 July 2024 is Monday.
pub const TEST_YEAR: i32 = 2024;

pub fn test_date(month: u8, day: u8) -> Date {
    Date::from_calendar_date(TEST_YEAR, Month::try_from(month).unwrap(), day).unwrap()
}

/// Creates a calendar which starts on Monday, 1 July 2024.
pub fn create_test_calendar(days: usize) -> Calendar {
    create_test_calendar_with_holidays(days, &[])
}

pub fn create_test_calendar_with_holidays(days: usize, holidays: &[Date]) -> Calendar {
    let start = test_date(7, 1);
    let end = start + time::Duration::days(days as i64 - 1);

    Calendar::new(start, end, holidays).unwrap()
}

pub fn create_test_physician(id: &str, year: u32, exemption: u32, workplaces: &[Workplace]) -> Physician {
    Physician::new(id, year, exemption, workplaces.iter().copied().collect())
}

/// Builds problems for tests: only workplaces with explicitly specified coverage are staffed.
pub struct TestProblemBuilder {
    days: usize,
    holidays: Vec<Date>,
    physicians: Vec<Physician>,
    preferences: Vec<PreferenceRecord>,
    anchors: Vec<Anchor>,
    coverage: Vec<(Workplace, Coverage)>,
    goal_config: GoalConfig,
    workload_weights: WorkloadWeights,
}

impl Default for TestProblemBuilder {
    fn default() -> Self {
        Self {
            days: 7,
            holidays: vec![],
            physicians: vec![],
            preferences: vec![],
            anchors: vec![],
            coverage: vec![],
            goal_config: GoalConfig::default(),
            workload_weights: WorkloadWeights::default(),
        }
    }
}

impl TestProblemBuilder {
    pub fn days(mut self, days: usize) -> Self {
        self.days = days;
        self
    }

    pub fn holidays(mut self, holidays: Vec<Date>) -> Self {
        self.holidays = holidays;
        self
    }

    pub fn physician(mut self, physician: Physician) -> Self {
        self.physicians.push(physician);
        self
    }

    pub fn preference(mut self, physician: &str, date: Date, preference: Preference) -> Self {
        self.preferences.push(PreferenceRecord { physician: physician.to_string(), date, preference });
        self
    }

    pub fn anchor(mut self, date: Date, workplace: Workplace, physician: &str) -> Self {
        self.anchors.push(Anchor { date, workplace, physician: physician.to_string() });
        self
    }

    pub fn coverage(mut self, workplace: Workplace, coverage: Coverage) -> Self {
        self.coverage.push((workplace, coverage));
        self
    }

    pub fn goal_config(mut self, goal_config: GoalConfig) -> Self {
        self.goal_config = goal_config;
        self
    }

    pub fn workload_weights(mut self, workload_weights: WorkloadWeights) -> Self {
        self.workload_weights = workload_weights;
        self
    }

    pub fn build(self) -> Problem {
        let calendar = create_test_calendar_with_holidays(self.days, self.holidays.as_slice());
        let builder = Workplace::ALL.iter().fold(ProblemBuilder::default(), |builder, &workplace| {
            let coverage = self
                .coverage
                .iter()
                .find(|(other, _)| *other == workplace)
                .map_or(Coverage::Never, |(_, coverage)| *coverage);

            builder.with_coverage(workplace, coverage)
        });

        builder
            .with_calendar(calendar)
            .with_physicians(self.physicians)
            .with_preferences(self.preferences)
            .with_anchors(self.anchors)
            .with_workload_weights(self.workload_weights)
            .with_goal(create_goal_context(&self.goal_config).unwrap())
            .build()
            .unwrap()
    }

    pub fn build_shared(self) -> Arc<Problem> {
        Arc::new(self.build())
    }
}

/// Creates an empty roster with anchors placed.
pub fn create_test_roster(problem: &Problem) -> Roster {
    Roster::new(&problem.catalogue, problem.physicians.len(), problem.calendar.len(), problem.anchors.as_slice())
}

pub fn get_slot(problem: &Problem, day: usize, workplace: Workplace) -> Slot {
    let index = problem.catalogue.find(day, workplace).expect("no slot for the cell");

    *problem.slot(index)
}

/// Assigns the physician to the cell of the roster.
pub fn assign_test_slot(problem: &Problem, roster: &mut Roster, day: usize, workplace: Workplace, physician: usize) {
    roster.assign(&get_slot(problem, day, workplace), physician);
}

/// Evaluates assignment of the physician to the empty cell.
pub fn evaluate_test_move(
    problem: &Problem,
    roster: &Roster,
    day: usize,
    workplace: Workplace,
    physician: usize,
) -> Option<ConstraintViolation> {
    let slot = get_slot(problem, day, workplace);

    problem.goal.evaluate(&MoveContext::new(problem, roster, &slot, physician))
}

/// Returns codes of all violations of the physician.
pub fn audit_test_codes(problem: &Problem, roster: &Roster, physician: usize) -> Vec<ViolationCode> {
    problem.goal.audit(problem, roster, physician).into_iter().map(|violation| violation.code).collect()
}

/// Evaluates assignment of the physician to the empty cell using the feature's constraint only.
pub fn evaluate_test_feature(
    feature: &Feature,
    problem: &Problem,
    roster: &Roster,
    day: usize,
    workplace: Workplace,
    physician: usize,
) -> Option<ConstraintViolation> {
    let slot = get_slot(problem, day, workplace);
    let constraint = feature.constraint.as_ref().expect("feature has no constraint");

    constraint.evaluate(&MoveContext::new(problem, roster, &slot, physician))
}

/// Audits the physician using the feature's constraint only.
pub fn audit_test_feature(feature: &Feature, problem: &Problem, roster: &Roster, physician: usize) -> Vec<RuleViolation> {
    let constraint = feature.constraint.as_ref().expect("feature has no constraint");
    let mut violations = vec![];
    constraint.audit(problem, roster, physician, &mut violations);

    violations
}

/// Returns the objective contribution of the physician over the whole calendar.
pub fn get_test_contribution(feature: &Feature, problem: &Problem, roster: &Roster, physician: usize) -> Option<i64> {
    let days = 0..=problem.calendar.len() - 1;

    feature.objective.as_ref().expect("feature has no objective").contribution(problem, roster, physician, days)
}

/// Returns the objective contribution of the physician within the calendar month.
pub fn get_test_month_contribution(
    feature: &Feature,
    problem: &Problem,
    roster: &Roster,
    physician: usize,
    month: usize,
) -> Option<i64> {
    let days = problem.calendar.month_days(month);

    feature.objective.as_ref().expect("feature has no objective").contribution(problem, roster, physician, days)
}
