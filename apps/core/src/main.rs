fn main() {
    let options = match docpalette_core::runtime::parse_cli_args(std::env::args_os()) {
        Ok(options) => options,
        Err(error) => error.exit(),
    };

    if let Err(error) = docpalette_core::runtime::run_with_options(options) {
        eprintln!("[docpalette-core] runtime failed: {error}");
        std::process::exit(1);
    }
}
