mod platform;

fn main() {
    if let Err(err) = platform::run_app() {
        eprintln!("docs chat failed: {err}");
        std::process::exit(1);
    }
}
