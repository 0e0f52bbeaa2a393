use fdtd2d::prelude::*;
use fdtd2d::Error;
use fdtd2d::fdtd::FdtdSolver;
use fdtd2d::observers::{ConsoleTelemetry, Hdf5Renderer, SaveSettings, SaveType};

use std::time::Duration;

fn main() {
    let constants = PhysicalConstants::vacuum();

    // a 20 cm square of vacuum driven at its center
    let grid = GridDescriptor {
        nx: 200,
        ny: 200,
        delta_x: 1e-3, // [m]
        delta_y: 1e-3, // [m]
    };
    let shape = (grid.nx, grid.ny);

    let sim_params = grid.calculate_simulation_parameters(0.5, &constants);

    let mut simulation = Simulation::new(SimulationDescriptor {
        solver: FdtdSolver::with_center_source(shape, constants, sim_params),
        sim_params,
        init_state: None,
    }).unwrap();

    println!(
        "\n-- General Simulation Info --\n\
        # of points:  {} x {}\n\
        Δx:           {:<9.2e} m\n\
        Δy:           {:<9.2e} m\n\
        Δt:           {:<9.2e} s\n",
        grid.nx,
        grid.ny,
        sim_params.delta_x,
        sim_params.delta_y,
        sim_params.delta_t,
    );

    std::fs::create_dir_all("data").unwrap();
    let mut renderer = Hdf5Renderer::new(
        SaveSettings {
            filename: "data/center_source.h5",
            save_type: SaveType::Full,
            overwrite: true,
        },
        shape,
        &sim_params,
    ).unwrap();
    let mut telemetry = ConsoleTelemetry { interval: 10, pause: false };

    let result = simulation.run(RunDescriptor {
        nsteps: 1000,
        verbose: false,
        frame_interval: 50,
        frame_pause: Some(Duration::from_millis(10)),
        telemetry: Some(&mut telemetry),
        renderer: Some(&mut renderer),
    });

    // frames written before a blow-up stay in the file
    match result {
        Ok(()) => println!("\n{} frames saved to data/center_source.h5", renderer.nframes()),
        Err(Error::Diverged { step }) => {
            let nframes = renderer.nframes();
            // close the file before exiting
            drop(renderer);
            eprintln!(
                "\nfields diverged at step {} ({} frames saved to data/center_source.h5)",
                step,
                nframes,
            );
            std::process::exit(1);
        }
        Err(err) => panic!("{}", err),
    }
}
