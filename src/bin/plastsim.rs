use plastsim::prelude::*;
use plastsim::util::t2_von_mises;
use std::path::Path;
use structopt::StructOpt;

/// Command line options
#[derive(StructOpt, Debug)]
#[structopt(
    name = "plastsim",
    about = "Runs a static finite-strain elastoplastic simulation from a JSON input file"
)]
struct Options {
    /// Input file (JSON)
    input: String,

    /// Output directory
    #[structopt(short = "o", long, default_value = "/tmp/plastsim/results")]
    out_dir: String,

    /// Do not print the convergence statistics
    #[structopt(short, long)]
    quiet: bool,
}

fn run(options: &Options) -> Result<String, StrError> {
    // input data
    let input = InputFile::read_json(&options.input)?;
    let base = input.fem_base()?;
    let essential = input.essential();
    let natural = input.natural();
    let mut config = input.config();
    if options.quiet {
        config.set_verbose_timesteps(false).set_verbose_iterations(false);
    }

    // solve
    let mut state = FemState::new(&input.mesh, &base, &essential, &config)?;
    let mut solver = SolverImplicit::new(&input.mesh, &base, &config, &essential, &natural)?;
    solver.solve(&mut state)?;

    // output
    let stem = Path::new(&options.input)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("plastsim");
    let path = format!("{}/{}-state.json", options.out_dir, stem);
    state.write_json(&path)?;
    if !options.quiet {
        let eqps_max = (0..state.history.ncell())
            .flat_map(|c| state.history.old_cell(c).iter())
            .fold(0.0, |acc: f64, h| acc.max(h.accumulated_plastic_strain));
        let sig_eq_max = state
            .stress
            .iter()
            .flat_map(|cell| cell.iter())
            .fold(0.0, |acc: f64, sigma| acc.max(t2_von_mises(sigma)));
        println!("\nfinal pseudo-time      = {:?}", state.t);
        println!("max |u|                = {:e}", state.uu.amax());
        println!("max von Mises stress   = {:e}", sig_eq_max);
        println!("max plastic strain     = {:e}", eqps_max);
    }
    Ok(path)
}

fn main() {
    let options = Options::from_args();
    match run(&options) {
        Ok(path) => {
            let thin_line = format!("{:─^1$}", "", path.len());
            println!("\n{}", thin_line);
            println!("The final state is:");
            println!("{}", path);
            println!("{}\n", thin_line);
        }
        Err(e) => {
            println!("ERROR: {}", e);
            std::process::exit(1);
        }
    }
}
