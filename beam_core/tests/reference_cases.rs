//! Hand-calculation reference cases, checked end to end through the public API.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use beam_core::calculations::reactions::PROP_REACTION_COEFFICIENT;
use beam_core::{Beam, BeamType, CalcError, Load, Support, SupportKind, UnitValue};

fn solved(mut beam: Beam) -> Beam {
    beam.calculate_reactions().unwrap();
    beam
}

fn simply_supported() -> Beam {
    let mut beam = Beam::new(5000.0, BeamType::SimplySupported).unwrap();
    beam.add_support(Support::pinned(0.0).unwrap()).unwrap();
    beam.add_support(Support::roller(5000.0).unwrap()).unwrap();
    beam.add_load(Load::point(1000.0, 2000.0).unwrap()).unwrap();
    beam.add_load(Load::udl(0.2, 0.0, 5000.0).unwrap()).unwrap();
    beam
}

fn cantilever() -> Beam {
    let mut beam = Beam::new(3000.0, BeamType::Cantilever).unwrap();
    beam.add_support(Support::fixed(0.0).unwrap()).unwrap();
    beam.add_load(Load::point(500.0, 1500.0).unwrap()).unwrap();
    beam.add_load(Load::moment(1000.0, 3000.0).unwrap()).unwrap();
    beam
}

fn fixed_fixed() -> Beam {
    let mut beam = Beam::new(6000.0, BeamType::Fixed).unwrap();
    beam.add_support(Support::fixed(0.0).unwrap()).unwrap();
    beam.add_support(Support::fixed(6000.0).unwrap()).unwrap();
    beam.add_load(Load::udl(0.5, 0.0, 6000.0).unwrap()).unwrap();
    beam
}

fn propped_cantilever() -> Beam {
    let mut beam = Beam::new(4000.0, BeamType::ProppedCantilever).unwrap();
    beam.add_support(Support::fixed(0.0).unwrap()).unwrap();
    beam.add_support(Support::roller(4000.0).unwrap()).unwrap();
    beam.add_load(Load::udl(1.0, 0.0, 4000.0).unwrap()).unwrap();
    beam
}

fn all_cases() -> Vec<Beam> {
    vec![
        solved(simply_supported()),
        solved(cantilever()),
        solved(fixed_fixed()),
        solved(propped_cantilever()),
    ]
}

#[test]
fn simply_supported_reactions() {
    let beam = solved(simply_supported());
    assert_relative_eq!(beam.total_load(), 2000.0, max_relative = 1e-12);
    // R_B = (1000*2000 + 1000*2500) / 5000
    assert_relative_eq!(beam.supports()[1].reaction_force(), 900.0, max_relative = 1e-12);
    assert_relative_eq!(beam.supports()[0].reaction_force(), 1100.0, max_relative = 1e-12);
}

#[test]
fn cantilever_reactions() {
    let beam = solved(cantilever());
    assert_relative_eq!(beam.supports()[0].reaction_force(), 500.0, max_relative = 1e-12);
    assert_relative_eq!(beam.supports()[0].reaction_moment(), -751_000.0, max_relative = 1e-12);
}

#[test]
fn fixed_fixed_reactions() {
    let beam = solved(fixed_fixed());
    for support in beam.supports() {
        assert_relative_eq!(support.reaction_force(), 1500.0, max_relative = 1e-12);
        // -wL²/12
        assert_relative_eq!(support.reaction_moment(), -1_500_000.0, max_relative = 1e-12);
    }
}

#[test]
fn propped_cantilever_reactions() {
    let beam = solved(propped_cantilever());
    let reactions = beam.reactions().unwrap();
    assert_relative_eq!(reactions.reactions[1].force, 1500.0, max_relative = 1e-12);
    assert_relative_eq!(reactions.reactions[0].force, 2500.0, max_relative = 1e-12);
    assert_relative_eq!(reactions.reactions[0].moment.unwrap(), -2_000_000.0, max_relative = 1e-12);
    assert_eq!(reactions.reactions[1].moment, None);
}

#[test]
fn propped_cantilever_prop_is_three_eighths() {
    // The 5/8 variant swaps the two reactions and fails moment equilibrium
    let (w, l) = (1.0, 4000.0);
    let m_fixed = -w * l * l / 8.0;
    let moment_residual = |prop_coefficient: f64| {
        let prop = prop_coefficient * w * l;
        w * l * (l / 2.0) - prop * l + m_fixed
    };
    assert_eq!(PROP_REACTION_COEFFICIENT, 3.0 / 8.0);
    assert_abs_diff_eq!(moment_residual(PROP_REACTION_COEFFICIENT), 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(moment_residual(5.0 / 8.0), -4_000_000.0, epsilon = 1e-6);

    let beam = solved(propped_cantilever());
    let (_, moment) = beam.equilibrium_residual(0.0).unwrap();
    assert_abs_diff_eq!(moment, 0.0, epsilon = 1e-6);
}

#[test]
fn equilibrium_about_any_point() {
    for beam in all_cases() {
        for reference in [0.0, 0.25, 0.5, 1.0].map(|f| f * beam.length()) {
            let (force, moment) = beam.equilibrium_residual(reference).unwrap();
            assert_abs_diff_eq!(force, 0.0, epsilon = 1e-9);
            assert_abs_diff_eq!(moment, 0.0, epsilon = 1e-4);
        }
    }
}

#[test]
fn idempotent_solve() {
    let mut beam = fixed_fixed();
    let first = beam.calculate_reactions().unwrap().clone();
    let second = beam.calculate_reactions().unwrap().clone();
    assert_eq!(first, second);
    assert_eq!(beam.supports()[0].reaction_force(), first.reactions[0].force);
}

#[test]
fn support_beyond_length_rejected() {
    let mut beam = Beam::new(5000.0, BeamType::SimplySupported).unwrap();
    let err = beam.add_support(Support::roller(5500.0).unwrap()).unwrap_err();
    assert_eq!(err.error_code(), "OUT_OF_RANGE");
}

#[test]
fn fixed_beam_with_point_loads_rejected() {
    let mut beam = Beam::new(6000.0, BeamType::Fixed).unwrap();
    beam.add_support(Support::fixed(0.0).unwrap()).unwrap();
    beam.add_support(Support::fixed(6000.0).unwrap()).unwrap();
    beam.add_load(Load::point(1000.0, 2000.0).unwrap()).unwrap();
    beam.add_load(Load::point(1000.0, 4000.0).unwrap()).unwrap();

    assert!(matches!(
        beam.calculate_reactions(),
        Err(CalcError::InvalidConfiguration { .. })
    ));
    assert!(!beam.is_solved());
    assert!(beam.supports().iter().all(|s| s.reaction_force() == 0.0));
    assert_eq!(beam.moment_at(0.0), Err(CalcError::NotSolved));
}

#[test]
fn rejection_after_solve_keeps_solution() {
    let mut beam = solved(simply_supported());
    let before = beam.reactions().unwrap().clone();
    assert!(beam.add_support(Support::roller(6000.0).unwrap()).is_err());
    assert!(beam.add_load(Load::udl(1.0, 0.0, 5000.0).unwrap()).is_err());
    assert_eq!(beam.reactions(), Some(&before));
    assert_eq!(beam.supports().len(), 2);
    assert_eq!(beam.loads().len(), 2);
}

#[test]
fn cantilever_free_end_moment_is_zero() {
    let beam = solved(cantilever());
    assert_abs_diff_eq!(beam.moment_at(3000.0).unwrap(), 0.0, epsilon = 1e-6);
    assert_relative_eq!(beam.moment_at(0.0).unwrap(), -751_000.0, max_relative = 1e-12);
    // Shear drops to zero past the point load
    assert_abs_diff_eq!(beam.shear_at(2000.0).unwrap(), 0.0, epsilon = 1e-9);
}

#[test]
fn fixed_fixed_midspan_moment() {
    let beam = solved(fixed_fixed());
    // wL²/24
    assert_relative_eq!(beam.moment_at(3000.0).unwrap(), 750_000.0, max_relative = 1e-9);
    assert_relative_eq!(beam.moment_at(6000.0).unwrap(), -1_500_000.0, max_relative = 1e-9);
}

#[test]
fn simply_supported_end_moments_are_zero() {
    let beam = solved(simply_supported());
    assert_abs_diff_eq!(beam.moment_at(0.0).unwrap(), 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(beam.moment_at(5000.0).unwrap(), 0.0, epsilon = 1e-4);

    let diagrams = beam.sample_field(101).unwrap();
    assert_abs_diff_eq!(diagrams.points[100].moment, 0.0, epsilon = 1e-4);
    assert_eq!(diagrams.max_positive_moment_position, 2000.0);
}

#[test]
fn propped_cantilever_field() {
    let beam = solved(propped_cantilever());
    let diagrams = beam.sample_field(41).unwrap();
    assert_relative_eq!(diagrams.max_negative_moment, -2_000_000.0, max_relative = 1e-12);
    assert_eq!(diagrams.max_negative_moment_position, 0.0);
    // Peak sagging 9wL²/128 at 5L/8 = 2500 mm, a grid point for 41 samples
    assert_relative_eq!(diagrams.max_positive_moment, 1_125_000.0, max_relative = 1e-9);
    assert_relative_eq!(diagrams.max_positive_moment_position, 2500.0, max_relative = 1e-12);
    assert_abs_diff_eq!(diagrams.points[40].moment, 0.0, epsilon = 1e-4);
}

#[test]
fn unit_tagged_inputs_match_internal_units() {
    let mut beam = Beam::with_units(&UnitValue::new(5.0, "m"), BeamType::SimplySupported).unwrap();
    beam.add_support(Support::with_units(&UnitValue::new(0.0, "m"), SupportKind::Pinned).unwrap())
        .unwrap();
    beam.add_support(Support::with_units(&UnitValue::new(5.0, "m"), SupportKind::Roller).unwrap())
        .unwrap();
    beam.add_load(Load::point_units(&UnitValue::new(1.0, "kN"), &UnitValue::new(2.0, "m")).unwrap())
        .unwrap();
    beam.add_load(
        Load::udl_units(
            &UnitValue::new(0.2, "kN/m"),
            &UnitValue::new(0.0, "m"),
            &UnitValue::new(5.0, "m"),
        )
        .unwrap(),
    )
    .unwrap();

    let beam = solved(beam);
    assert_relative_eq!(beam.supports()[0].reaction_force(), 1100.0, max_relative = 1e-12);
    assert_relative_eq!(beam.supports()[1].reaction_force(), 900.0, max_relative = 1e-12);
}

#[test]
fn continuous_beam_not_implemented() {
    let mut beam = Beam::new(10_000.0, BeamType::Continuous).unwrap();
    beam.add_support(Support::pinned(0.0).unwrap()).unwrap();
    beam.add_support(Support::roller(5000.0).unwrap()).unwrap();
    beam.add_support(Support::roller(10_000.0).unwrap()).unwrap();
    let err = beam.calculate_reactions().unwrap_err();
    assert_eq!(err.error_code(), "NOT_IMPLEMENTED");
}

#[test]
fn interior_couple_steps_the_moment_diagram() {
    // 3 m simply supported beam, 6000 N*mm couple at 1 m: R_A = -2 N, R_B = 2 N
    let mut beam = Beam::new(3000.0, BeamType::SimplySupported).unwrap();
    beam.add_support(Support::pinned(0.0).unwrap()).unwrap();
    beam.add_support(Support::roller(3000.0).unwrap()).unwrap();
    beam.add_load(Load::moment(6000.0, 1000.0).unwrap()).unwrap();
    let beam = solved(beam);

    // Couples leave shear untouched
    assert_relative_eq!(beam.shear_at(500.0).unwrap(), -2.0, max_relative = 1e-12);
    assert_relative_eq!(beam.shear_at(2500.0).unwrap(), -2.0, max_relative = 1e-12);

    // M = -2x left of the couple, then jumps by +6000
    assert_relative_eq!(beam.moment_at(999.9).unwrap(), -1999.8, max_relative = 1e-9);
    assert_relative_eq!(beam.moment_at(1000.0).unwrap(), 4000.0, max_relative = 1e-9);
    assert_relative_eq!(beam.moment_at(2000.0).unwrap(), 2000.0, max_relative = 1e-9);
    assert_abs_diff_eq!(beam.moment_at(3000.0).unwrap(), 0.0, epsilon = 1e-6);

    let diagrams = beam.sample_field(31).unwrap();
    assert_relative_eq!(diagrams.points[10].moment, 4000.0, max_relative = 1e-9);
    assert_relative_eq!(diagrams.max_positive_moment, 4000.0, max_relative = 1e-9);
    assert_eq!(diagrams.max_positive_moment_position, 1000.0);
    assert_relative_eq!(diagrams.points[9].moment, -1800.0, max_relative = 1e-9);
}

#[test]
fn cantilever_uvl_moment_matches_closed_form() {
    // Triangular 0 -> 1 N/mm over 3 m: M(x) = -3e6 + 1500x - x³/18000
    let mut beam = Beam::new(3000.0, BeamType::Cantilever).unwrap();
    beam.add_support(Support::fixed(0.0).unwrap()).unwrap();
    beam.add_load(Load::uvl(0.0, 1.0, 0.0, 3000.0).unwrap()).unwrap();
    let beam = solved(beam);

    let closed_form = |x: f64| -3_000_000.0 + 1500.0 * x - x.powi(3) / 18_000.0;
    for x in [0.0, 750.0, 1500.0, 2250.0, 3000.0] {
        // Trapezoidal error on the quadratic shear stays well under 1 N*mm
        assert_abs_diff_eq!(beam.moment_at(x).unwrap(), closed_form(x), epsilon = 1.0);
        assert_relative_eq!(
            beam.shear_at(x).unwrap(),
            1500.0 - x * x / 6000.0,
            max_relative = 1e-12,
            epsilon = 1e-9
        );
    }

    // 1 mm sampling grid
    let diagrams = beam.sample_field(3001).unwrap();
    for p in diagrams.points.iter().step_by(100) {
        assert_abs_diff_eq!(p.moment, closed_form(p.x), epsilon = 1.0);
    }
    assert_relative_eq!(diagrams.max_negative_moment, -3_000_000.0, max_relative = 1e-12);
}

#[test]
fn loads_bypassing_constructors_rejected() {
    let mut beam = Beam::new(5000.0, BeamType::SimplySupported).unwrap();
    beam.add_support(Support::pinned(0.0).unwrap()).unwrap();
    beam.add_support(Support::roller(5000.0).unwrap()).unwrap();

    let reversed: Load = serde_json::from_str(
        r#"{"type":"uniform_distributed","magnitude":1.0,"start":3000.0,"end":1000.0}"#,
    )
    .unwrap();
    assert_eq!(beam.add_load(reversed).unwrap_err().error_code(), "INVALID_INPUT");
    let nan = Load::Point {
        magnitude: 1.0,
        position: f64::NAN,
        angle_deg: 90.0,
    };
    assert!(beam.add_load(nan).is_err());

    let solved = solved(beam);
    assert!(solved.reactions().unwrap().iter().all(|r| r.force.is_finite()));
}

#[test]
fn mixed_unit_cantilever_seeds_fixed_end_moment() {
    // 10 ft cantilever whose fixed end is given in inches
    let mut beam = Beam::with_units(&UnitValue::new(10.0, "ft"), BeamType::Cantilever).unwrap();
    beam.add_support(Support::with_units(&UnitValue::new(0.0, "in"), SupportKind::Fixed).unwrap())
        .unwrap();
    beam.add_load(Load::point_units(&UnitValue::new(1.0, "kN"), &UnitValue::new(120.0, "in")).unwrap())
        .unwrap();
    let beam = solved(beam);

    let fixed_moment = beam.supports()[0].reaction_moment();
    assert_relative_eq!(fixed_moment, -1000.0 * beam.length(), max_relative = 1e-12);
    assert_relative_eq!(beam.moment_at(0.0).unwrap(), fixed_moment, max_relative = 1e-12);
    assert_abs_diff_eq!(beam.moment_at(beam.length()).unwrap(), 0.0, epsilon = 1e-3);
}
