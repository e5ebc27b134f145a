//! Mold command line.

use moldc::cli::{init_tracing, parse_args, run};

fn main() {
    init_tracing();

    let command = parse_args(std::env::args().skip(1));
    let status = match run(
        &command,
        &mut std::io::stdin().lock(),
        &mut std::io::stdout().lock(),
        &mut std::io::stderr(),
    ) {
        Ok(status) => status,
        Err(error) => {
            eprintln!("error: {error}");
            1
        }
    };
    std::process::exit(status);
}
