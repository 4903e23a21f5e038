fn main() {
    if let Err(e) = screen_ruler_lib::run() {
        eprintln!("screen-ruler: {e}");
        std::process::exit(1);
    }
}
