fn main() {
    pitaka::init();
    if let Err(err) = pitaka::cli::run_cli() {
        eprintln!("pitaka_cli: {err}");
        std::process::exit(1);
    }
}
