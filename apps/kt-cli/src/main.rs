use clap::{Parser, Subcommand};
use kt_core::{Id, Real, vec3, vec3_zero};
use kt_dynamics::{FreeBodyEngine, euler_step};
use kt_series::{Series, save_series};
use kt_spline::{ConstantPoint, LinearRamp};
use kt_spring::TrackingSpringActuator;
use nalgebra::DVector;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "kt-cli")]
#[command(about = "kinetrack CLI - tracking-spring actuation demos", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the closed-loop tracking demo on a free body
    Demo {
        /// Duration of the recorded trajectory and the tracking run (seconds)
        #[arg(long, default_value_t = 3.0)]
        duration: Real,
        /// Integration timestep (seconds)
        #[arg(long, default_value_t = 0.01)]
        dt: Real,
        /// Per-axis stiffness (N/m)
        #[arg(long, default_value_t = 50.0)]
        stiffness: Real,
        /// Per-axis damping (N*s/m)
        #[arg(long, default_value_t = 20.0)]
        damping: Real,
        /// Fade the tracking force in over this many seconds
        #[arg(long, default_value_t = 0.0)]
        fade_in: Real,
        /// Write the applied-force log to this JSONL file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Demo {
            duration,
            dt,
            stiffness,
            damping,
            fade_in,
            output,
        } => match run_demo(duration, dt, stiffness, damping, fade_in, output) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        },
    }
}

fn run_demo(
    duration: Real,
    dt: Real,
    stiffness: Real,
    damping: Real,
    fade_in: Real,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    if duration <= 0.0 || dt <= 0.0 {
        return Err("duration and dt must be positive".into());
    }

    // Record a reference trajectory: the body slides along +x at 1 m/s.
    let mut q_history = Series::new();
    let mut u_history = Series::new();
    let samples = (duration / 0.1).ceil() as usize + 1;
    for i in 0..samples {
        let t = i as Real * 0.1;
        q_history.append(t, DVector::from_column_slice(&[t, 0.0, 0.0]))?;
        u_history.append(t, DVector::from_column_slice(&[1.0, 0.0, 0.0]))?;
    }

    let mut engine = FreeBodyEngine::new();
    let mut actuator = TrackingSpringActuator::new(Id::from_index(0));
    actuator.set_point_function(Box::new(ConstantPoint(vec3_zero())));
    actuator.fit_target_from_history(&mut engine, &q_history, &u_history)?;

    actuator.set_stiffness(vec3(stiffness, stiffness, stiffness));
    actuator.set_damping(vec3(damping, damping, damping));
    actuator.set_active_window(0.0, duration)?;
    actuator.set_record_applied(true);
    if fade_in > 0.0 {
        actuator.set_scale_function(Box::new(LinearRamp {
            t0: 0.0,
            t1: fade_in,
            from: 0.0,
            to: 1.0,
        }));
    }

    // Track from a perturbed start.
    engine.place(vec3(-0.5, 0.2, 0.0), vec3_zero());

    println!("{:>8} {:>10} {:>10} {:>10}", "t", "x", "target_x", "force_x");
    let mut t = 0.0;
    let mut step = 0usize;
    let print_every = ((0.25 / dt).round() as usize).max(1);
    while t < duration {
        actuator.step(&mut engine, t);
        if step % print_every == 0 {
            println!(
                "{:>8.3} {:>10.4} {:>10.4} {:>10.4}",
                t,
                engine.origin().x,
                t,
                actuator.force().x
            );
        }
        euler_step(&mut engine, 1.0, dt);
        t += dt;
        step += 1;
    }

    let final_error = (engine.origin() - vec3(t, 0.0, 0.0)).norm();
    println!("final tracking error: {final_error:.5} m");
    println!(
        "applied forces logged: {}",
        actuator.applied_force_log().len()
    );

    if let Some(path) = output {
        save_series(&path, actuator.applied_force_log())?;
        println!("applied-force log written to {}", path.display());
    }

    Ok(())
}
