use rdfield::Simulation;

fn main() {
    if let Err(e) = Simulation::new().run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
