//! Dispatch table for the interactive demos.
//!
//! Every demo maps the position of its control slider onto a single readout.
//! Demos are only built the first time they are requested.

use crate::{
    activity::{SUBSTANCES, Solution, Substance},
    crystal::Crystal,
    error::Error,
    interface::{RefractiveIndex, fresnel},
    light::intensity::Intensity,
    scattering::rayleigh_dop,
};
use rayon::prelude::*;
use std::{ops::RangeInclusive, sync::OnceLock};
use tracing::info;
use uom::si::{
    angle::degree,
    f64::{Angle, Length},
    length::{decimeter, micron, nanometer},
};

pub trait Demo: Send + Sync {
    fn id(&self) -> &'static str;

    /// Range covered by the demo's control.
    fn control(&self) -> RangeInclusive<f64>;

    fn readout(&self, x: f64) -> f64;
}

/// Transmission in percent against analyzer angle in degrees.
struct MalusDemo;

impl Demo for MalusDemo {
    fn id(&self) -> &'static str {
        "malus"
    }

    fn control(&self) -> RangeInclusive<f64> {
        0.0..=180.0
    }

    fn readout(&self, x: f64) -> f64 {
        Intensity::from_malus(Angle::new::<degree>(x)).percent()
    }
}

/// Reflectance of p-polarized light against incidence angle, air to glass.
struct BrewsterDemo {
    n1: RefractiveIndex,
    n2: RefractiveIndex,
}

impl Demo for BrewsterDemo {
    fn id(&self) -> &'static str {
        "brewster"
    }

    fn control(&self) -> RangeInclusive<f64> {
        0.0..=89.0
    }

    fn readout(&self, x: f64) -> f64 {
        fresnel(Angle::new::<degree>(x), self.n1, self.n2).reflectance_p
    }
}

/// Ordinary-ray intensity against input polarization angle in the bench crystal.
struct BirefringenceDemo {
    crystal: Crystal,
    i0: f64,
}

impl Demo for BirefringenceDemo {
    fn id(&self) -> &'static str {
        "birefringence"
    }

    fn control(&self) -> RangeInclusive<f64> {
        0.0..=90.0
    }

    fn readout(&self, x: f64) -> f64 {
        self.crystal.split(Angle::new::<degree>(x), self.i0).0
    }
}

/// Rotation in degrees against sucrose concentration in g/mL.
struct OpticalRotationDemo {
    substance: Substance,
    path_length: Length,
}

impl Demo for OpticalRotationDemo {
    fn id(&self) -> &'static str {
        "optical-rotation"
    }

    fn control(&self) -> RangeInclusive<f64> {
        0.01..=0.5
    }

    fn readout(&self, x: f64) -> f64 {
        Solution::new(self.substance, x, self.path_length)
            .rotation()
            .get::<degree>()
    }
}

/// Degree of polarization of skylight against scattering angle.
struct RayleighDemo;

impl Demo for RayleighDemo {
    fn id(&self) -> &'static str {
        "rayleigh"
    }

    fn control(&self) -> RangeInclusive<f64> {
        0.0..=180.0
    }

    fn readout(&self, x: f64) -> f64 {
        rayleigh_dop(Angle::new::<degree>(x)).into_inner()
    }
}

/// A waveplate's phase retardation in degrees against its thickness in microns.
struct WaveplateDemo {
    crystal: Crystal,
    wavelength: Length,
}

impl Demo for WaveplateDemo {
    fn id(&self) -> &'static str {
        "waveplate"
    }

    /// Up to one full wave of retardation.
    fn control(&self) -> RangeInclusive<f64> {
        0.0..=4.0 * self.crystal.quarter_wave_thickness(self.wavelength).get::<micron>()
    }

    fn readout(&self, x: f64) -> f64 {
        self.crystal
            .phase_retardation(Length::new::<micron>(x), self.wavelength)
            .get::<degree>()
    }
}

/// Settings the demos are built with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bench {
    /// Source intensity before the first element.
    pub i0: f64,
    pub crystal: Crystal,
    pub wavelength: Length,
}

impl Default for Bench {
    fn default() -> Self {
        Self {
            i0: 100.0,
            crystal: Crystal::CALCITE,
            wavelength: Length::new::<nanometer>(550.0),
        }
    }
}

type Loader = fn(&Bench) -> Box<dyn Demo>;

fn load_malus(_: &Bench) -> Box<dyn Demo> {
    Box::new(MalusDemo)
}

fn load_brewster(_: &Bench) -> Box<dyn Demo> {
    Box::new(BrewsterDemo {
        n1: RefractiveIndex::AIR,
        n2: RefractiveIndex::GLASS,
    })
}

fn load_birefringence(bench: &Bench) -> Box<dyn Demo> {
    Box::new(BirefringenceDemo {
        crystal: bench.crystal,
        i0: bench.i0,
    })
}

fn load_waveplate(bench: &Bench) -> Box<dyn Demo> {
    Box::new(WaveplateDemo {
        crystal: bench.crystal,
        wavelength: bench.wavelength,
    })
}

fn load_optical_rotation(_: &Bench) -> Box<dyn Demo> {
    Box::new(OpticalRotationDemo {
        substance: SUBSTANCES[0],
        path_length: Length::new::<decimeter>(2.0),
    })
}

fn load_rayleigh(_: &Bench) -> Box<dyn Demo> {
    Box::new(RayleighDemo)
}

const LOADERS: [(&str, Loader); 6] = [
    ("malus", load_malus),
    ("brewster", load_brewster),
    ("birefringence", load_birefringence),
    ("waveplate", load_waveplate),
    ("optical-rotation", load_optical_rotation),
    ("rayleigh", load_rayleigh),
];

struct Slot {
    id: &'static str,
    load: Loader,
    demo: OnceLock<Box<dyn Demo>>,
}

/// Looks demos up by id, building each one on first use.
pub struct DemoTable {
    bench: Bench,
    slots: Vec<Slot>,
}

impl DemoTable {
    pub fn new() -> Self {
        Self::with_bench(Bench::default())
    }

    pub fn with_bench(bench: Bench) -> Self {
        Self {
            bench,
            slots: LOADERS
                .iter()
                .map(|&(id, load)| Slot {
                    id,
                    load,
                    demo: OnceLock::new(),
                })
                .collect(),
        }
    }

    pub fn bench(&self) -> &Bench {
        &self.bench
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.slots.iter().map(|slot| slot.id)
    }

    /// Returns the demo registered as `id`, loading it if needed.
    pub fn get(&self, id: &str) -> Result<&dyn Demo, Error> {
        let slot = self
            .slots
            .iter()
            .find(|slot| slot.id == id)
            .ok_or_else(|| Error::UnknownDemo(id.to_owned()))?;

        Ok(slot
            .demo
            .get_or_init(|| {
                info!(id = slot.id, "loading demo");
                (slot.load)(&self.bench)
            })
            .as_ref())
    }

    /// Ids of the demos built so far.
    pub fn loaded(&self) -> Vec<&'static str> {
        self.slots
            .iter()
            .filter(|slot| slot.demo.get().is_some())
            .map(|slot| slot.id)
            .collect()
    }
}

impl Default for DemoTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Samples `demo` at `steps` evenly spaced control positions, in order.
pub fn curve(demo: &dyn Demo, steps: usize) -> Vec<(f64, f64)> {
    let range = demo.control();
    let (start, end) = (*range.start(), *range.end());
    let stride = match steps {
        0 | 1 => 0.0,
        _ => (end - start) / (steps - 1) as f64,
    };

    (0..steps)
        .into_par_iter()
        .map(|i| {
            let x = start + stride * i as f64;
            (x, demo.readout(x))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    #[test]
    fn demos_load_lazily() {
        let table = DemoTable::new();
        assert!(table.loaded().is_empty());

        let first = table.get("malus").unwrap();
        let again = table.get("malus").unwrap();

        assert!(std::ptr::addr_eq(first, again));
        assert_eq!(table.loaded(), vec!["malus"]);
    }

    #[test]
    fn unknown_demo() {
        assert!(matches!(
            DemoTable::new().get("mie"),
            Err(Error::UnknownDemo(id)) if id == "mie"
        ));
    }

    #[test]
    fn every_id_resolves_to_itself() {
        let table = DemoTable::new();
        for id in table.ids() {
            assert_eq!(table.get(id).unwrap().id(), id);
        }
        assert_eq!(table.loaded().len(), 6);
    }

    #[test]
    fn malus_curve() {
        let table = DemoTable::new();
        let points = curve(table.get("malus").unwrap(), 3);

        assert_eq!(points.len(), 3);
        assert_abs_diff_eq!(points[0].1, 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(points[1].0, 90.0, epsilon = 1e-12);
        assert_abs_diff_eq!(points[1].1, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(points[2].1, 100.0, epsilon = 1e-9);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(181, 181)]
    fn curve_lengths(#[case] steps: usize, #[case] len: usize) {
        let table = DemoTable::new();
        let points = curve(table.get("rayleigh").unwrap(), steps);
        assert_eq!(points.len(), len);
        assert!(points.windows(2).all(|pair| pair[0].0 < pair[1].0));
    }

    #[test]
    fn bench_reaches_the_loaders() {
        let table = DemoTable::with_bench(Bench {
            i0: 40.0,
            crystal: Crystal::QUARTZ,
            ..Bench::default()
        });

        let ordinary = table.get("birefringence").unwrap().readout(0.0);
        assert_abs_diff_eq!(ordinary, 40.0, epsilon = 1e-9);

        let waveplate = table.get("waveplate").unwrap();
        let quarter = Crystal::QUARTZ.quarter_wave_thickness(table.bench().wavelength);
        assert_abs_diff_eq!(
            *waveplate.control().end(),
            4.0 * quarter.get::<micron>(),
            epsilon = 1e-12
        );
        // Quartz is positive uniaxial, so the lag wraps to three quarters of a wave.
        assert_abs_diff_eq!(
            waveplate.readout(quarter.get::<micron>()),
            270.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn brewster_curve_dips_to_zero() {
        let table = DemoTable::new();
        let minimum = curve(table.get("brewster").unwrap(), 891)
            .into_iter()
            .map(|(_, reflectance)| reflectance)
            .fold(f64::INFINITY, f64::min);
        assert!(minimum < 1e-4);
    }
}
