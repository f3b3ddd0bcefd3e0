fn main() {
    if let Err(err) = pcb_traces::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
