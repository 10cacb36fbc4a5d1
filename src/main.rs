fn main() {
    match gavel::run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            let code = err.exit_code();
            // {:#} renders the full cause chain for I/O-level faults.
            eprintln!("Error: {:#}", anyhow::Error::new(err));
            std::process::exit(code);
        }
    }
}
