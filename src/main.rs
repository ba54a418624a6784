fn main() {
    if let Err(err) = dagscope::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
