use super::*;
use crate::helpers::models::*;

parameterized_test! {can_count_consecutive_night_pairs, (nights, expected), {
    let problem = TestProblemBuilder::default()
        .physician(create_test_physician("a", 3, 0, &[Workplace::KrgBN]))
        .coverage(Workplace::KrgBN, Coverage::Daily)
        .build();
    let mut roster = create_test_roster(&problem);
    nights.iter().for_each(|day| assign_test_slot(&problem, &mut roster, *day, Workplace::KrgBN, 0));
    let feature = create_consecutive_nights_feature("consecutive_nights", 2).unwrap();

    assert_eq!(get_test_contribution(&feature, &problem, &roster, 0), Some(expected));
}}

can_count_consecutive_night_pairs! {
    case01_no_nights: (Vec::<usize>::new(), 0),
    case02_single_night: (vec![3], 0),
    case03_pair: (vec![1, 2], -1),
    case04_three_in_row: (vec![1, 2, 3], -2),
    case05_separated: (vec![0, 2, 4, 6], 0),
}

#[test]
fn can_count_pair_in_month_of_second_night() {
    let problem = TestProblemBuilder::default()
        .days(62)
        .physician(create_test_physician("a", 3, 0, &[Workplace::KrgBN]))
        .coverage(Workplace::KrgBN, Coverage::Daily)
        .build();
    let mut roster = create_test_roster(&problem);
    // 31 July and 1 August
    assign_test_slot(&problem, &mut roster, 30, Workplace::KrgBN, 0);
    assign_test_slot(&problem, &mut roster, 31, Workplace::KrgBN, 0);
    let feature = create_consecutive_nights_feature("consecutive_nights", 2).unwrap();

    assert_eq!(get_test_month_contribution(&feature, &problem, &roster, 0, 0), Some(0));
    assert_eq!(get_test_month_contribution(&feature, &problem, &roster, 0, 1), Some(-1));
}
