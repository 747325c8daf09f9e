fn main() {
    if let Err(e) = pathjson::cli::run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
