use clap::{Parser, Subcommand};
use polarcraft::{
    config::LabConfig,
    demo::{DemoTable, curve},
    discovery::{ConceptRegistry, RelationKind},
    error::Error,
    interface::{RefractiveIndex, brewster_angle, critical_angle, fresnel},
    light::{
        angle::PolarizerAngle,
        chain::{Input, PolarizerChain},
    },
    puzzle::{JsonFileStore, PolarizerLock},
};
use std::{
    io::{BufWriter, Write},
    path::PathBuf,
    process::ExitCode,
};
use tracing::{error, info};
use uom::si::{angle::degree, f64::Angle};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// Optional path to a JSON lab config.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Intensity after a chain of ideal polarizers.
    Malus {
        /// Polarizer axes in degrees, in the order light meets them.
        #[arg(required = true, allow_negative_numbers = true)]
        angles: Vec<f64>,

        /// Axis of linearly polarized input light. Natural light if omitted.
        #[arg(long, allow_negative_numbers = true)]
        polarized: Option<f64>,
    },

    /// Reflection and transmission at a dielectric interface.
    Fresnel {
        /// Angle of incidence in degrees.
        #[arg(long)]
        incidence: f64,

        #[arg(long, default_value_t = 1.0)]
        n1: f64,

        #[arg(long, default_value_t = 1.5)]
        n2: f64,
    },

    /// List the course concepts, optionally for one region.
    Concepts {
        #[arg(long)]
        region: Option<String>,
    },

    /// Sample a demo across its control range.
    Demo {
        id: String,

        #[arg(long, default_value_t = 19)]
        steps: usize,
    },

    /// Try the password lock with the second polarizer at a given angle.
    Unlock {
        password: String,

        /// Second polarizer axis in degrees. Keeps the configured one if omitted.
        #[arg(long, allow_negative_numbers = true)]
        second: Option<f64>,

        /// File the unlock flag is kept in.
        #[arg(long, default_value = "polarcraft-unlock.json")]
        store: PathBuf,
    },
}

fn main() -> ExitCode {
    // Results go to stdout, so events go to stderr.
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install tracing subscriber: {err}");
    }

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Error> {
    let config = match &args.config {
        Some(path) => {
            info!(path = %path.display(), "loading lab config");
            LabConfig::from_path(path)?
        }
        None => LabConfig::default(),
    };

    let mut writer = BufWriter::new(std::io::stdout());

    match args.command {
        Command::Malus { angles, polarized } => {
            let chain = PolarizerChain::new(
                angles.into_iter().map(PolarizerAngle::from_degrees).collect(),
            );
            let input = match polarized {
                Some(axis) => Input::Polarized(PolarizerAngle::from_degrees(axis)),
                None => Input::Unpolarized,
            };
            let intensity = chain.transmit(input);

            writeln!(
                writer,
                "fraction={:.6} transmitted={:.4} (I0={})",
                intensity.into_inner(),
                intensity.transmitted(config.i0),
                config.i0
            )?;
        }
        Command::Fresnel { incidence, n1, n2 } => {
            let (n1, n2) = (RefractiveIndex::new(n1)?, RefractiveIndex::new(n2)?);
            let result = fresnel(Angle::new::<degree>(incidence), n1, n2);

            writeln!(
                writer,
                "Rs={:.6} Rp={:.6}",
                result.reflectance_s, result.reflectance_p
            )?;
            writeln!(
                writer,
                "Ts={:.6} Tp={:.6}",
                result.transmittance_s, result.transmittance_p
            )?;
            match result.total_internal_reflection {
                true => writeln!(writer, "total internal reflection")?,
                false => writeln!(
                    writer,
                    "refracted={:.4} deg",
                    result.refracted.get::<degree>()
                )?,
            }
            writeln!(
                writer,
                "brewster={:.4} deg",
                brewster_angle(n1, n2).get::<degree>()
            )?;
            if let Some(critical) = critical_angle(n1, n2) {
                writeln!(writer, "critical={:.4} deg", critical.get::<degree>())?;
            }
        }
        Command::Concepts { region } => {
            let registry = ConceptRegistry::builtin();
            let regions: Vec<&str> = match &region {
                Some(region) => {
                    registry
                        .concepts(region)
                        .ok_or_else(|| Error::UnknownRegion(region.clone()))?;
                    vec![region.as_str()]
                }
                None => registry.regions().collect(),
            };

            for region in regions {
                writeln!(writer, "{region}")?;
                for concept in registry.concepts(region).unwrap_or_default() {
                    writeln!(writer, "  {}", concept.id)?;
                    for kind in [
                        RelationKind::Causal,
                        RelationKind::Analogous,
                        RelationKind::Contrasting,
                    ] {
                        for target in registry.related(region, &concept.id, kind)? {
                            writeln!(writer, "    {kind} -> {}", target.id)?;
                        }
                    }
                }
            }
        }
        Command::Demo { id, steps } => {
            let table = DemoTable::with_bench(config.bench());
            let demo = table.get(&id)?;
            for (x, y) in curve(demo, steps) {
                writeln!(writer, "{x:.4},{y:.6}")?;
            }
        }
        Command::Unlock {
            password,
            second,
            store,
        } => {
            let mut lock = PolarizerLock::from(config.lock);
            if let Some(second) = second {
                lock.set_second(PolarizerAngle::from_degrees(second));
            }

            writeln!(
                writer,
                "separation={:.2} deg intensity={:.4}",
                lock.separation(),
                lock.intensity().into_inner()
            )?;
            let opened = lock.try_password(&password, &mut JsonFileStore::new(store))?;
            writeln!(writer, "opened at {}", opened.to_rfc3339())?;
        }
    }

    writer.flush()?;
    Ok(())
}
