use pptoken_drv::run;

fn main() {
    if let Err(e) = run(std::io::stdin(), std::io::stdout()) {
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    }
}
