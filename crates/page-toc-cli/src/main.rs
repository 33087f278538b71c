use std::process;

fn main() {
    match page_toc_cli::run() {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("page-toc error: {err:#}");
            process::exit(1);
        }
    }
}
