use approx::assert_abs_diff_eq;
use polarcraft::{
    activity::{Solution, Substance},
    crystal::Crystal,
    interface::{RefractiveIndex, brewster_angle, fresnel},
    light::{
        angle::PolarizerAngle,
        chain::{Input, PolarizerChain},
        intensity::transmission,
        mueller::MuellerMatrix,
        stokes::{Handedness, StokesVec},
    },
    scattering::rayleigh_dop,
};
use rstest::rstest;
use uom::si::{
    angle::degree,
    f64::{Angle, Length},
    length::{decimeter, nanometer},
};

fn deg(value: f64) -> Angle {
    Angle::new::<degree>(value)
}

#[rstest]
#[case(0.0, 0.0)]
#[case(10.0, 55.0)]
#[case(45.0, 135.0)]
#[case(-30.0, 200.0)]
fn mueller_pair_agrees_with_malus(#[case] p1: f64, #[case] p2: f64) {
    let bench =
        MuellerMatrix::linear_polarizer(deg(p1)).then(&MuellerMatrix::linear_polarizer(deg(p2)));
    let output = bench.apply(&StokesVec::unpolarized(1.0));

    // The first polarizer passes half of natural light.
    let (p1, p2) = (PolarizerAngle::from_degrees(p1), PolarizerAngle::from_degrees(p2));
    let expected = 0.5 * transmission(p1, p2).into_inner();
    assert_abs_diff_eq!(output.s0(), expected, epsilon = 1e-12);
}

#[test]
fn three_polarizer_paradox() {
    let crossed = PolarizerChain::new(vec![
        PolarizerAngle::from_degrees(0.0),
        PolarizerAngle::from_degrees(90.0),
    ]);
    assert_abs_diff_eq!(crossed.transmit(Input::Unpolarized).into_inner(), 0.0, epsilon = 1e-12);

    let mut chain = PolarizerChain::new(vec![PolarizerAngle::from_degrees(0.0)]);
    chain.push(PolarizerAngle::from_degrees(45.0));
    chain.push(PolarizerAngle::from_degrees(90.0));
    let intensity = chain.transmit(Input::Unpolarized).into_inner();
    assert_abs_diff_eq!(intensity, 0.125, epsilon = 1e-12);

    let mueller = chain
        .polarizers()
        .iter()
        .map(|p| MuellerMatrix::linear_polarizer(p.into_inner()))
        .fold(MuellerMatrix::identity(), |bench, element| bench.then(&element));
    assert_abs_diff_eq!(
        mueller.apply(&StokesVec::unpolarized(1.0)).s0(),
        intensity,
        epsilon = 1e-12
    );
}

#[test]
fn quarter_wave_plate_makes_circular_light() {
    let output = MuellerMatrix::linear_polarizer(deg(0.0))
        .then(&MuellerMatrix::quarter_wave_plate(deg(45.0)))
        .apply(&StokesVec::unpolarized(2.0));

    assert_abs_diff_eq!(output.s0(), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(output.dop().into_inner(), 1.0, epsilon = 1e-9);
    assert_ne!(output.ellipse().handedness, Handedness::Linear);
}

#[test]
fn brewster_reflection_is_s_polarized() {
    let (air, glass) = (RefractiveIndex::AIR, RefractiveIndex::GLASS);
    let at_brewster = fresnel(brewster_angle(air, glass), air, glass);

    assert_abs_diff_eq!(at_brewster.reflectance_p, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(at_brewster.reflected_dop(), 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(
        at_brewster.reflectance_s + at_brewster.transmittance_s,
        1.0,
        epsilon = 1e-12
    );
}

#[test]
fn sugar_tube_between_crossed_polarizers_leaks_light() {
    let solution = Solution::new(
        Substance::lookup("sucrose").unwrap(),
        0.3,
        Length::new::<decimeter>(1.0),
    );
    let output = MuellerMatrix::linear_polarizer(deg(0.0))
        .then(&solution.as_mueller())
        .then(&MuellerMatrix::linear_polarizer(deg(90.0)))
        .apply(&StokesVec::unpolarized(2.0));

    let rotation = solution.rotation();
    let expected = (rotation.get::<degree>().to_radians().sin()).powi(2);
    assert_abs_diff_eq!(output.s0(), expected, epsilon = 1e-12);
}

#[test]
fn calcite_split_and_sky_polarization() {
    let (ordinary, extraordinary) = Crystal::CALCITE.split(deg(30.0), 100.0);
    assert_abs_diff_eq!(ordinary, 75.0, epsilon = 1e-9);
    assert_abs_diff_eq!(extraordinary, 25.0, epsilon = 1e-9);

    let plate = Crystal::CALCITE.quarter_wave_thickness(Length::new::<nanometer>(550.0));
    let retardation = Crystal::CALCITE.phase_retardation(plate, Length::new::<nanometer>(550.0));
    let output = MuellerMatrix::retarder(retardation, deg(0.0)).apply(&StokesVec::diagonal(1.0));
    assert_abs_diff_eq!(output.components()[3].abs(), 1.0, epsilon = 1e-6);

    assert_abs_diff_eq!(rayleigh_dop(deg(90.0)).into_inner(), 1.0, epsilon = 1e-12);
}
