use rill::core::config::ShellConfig;
use rill::flags::Flags;
use rill::process::Status;
use rill::shell::Shell;
use std::env;
use std::process;

fn main() {
    let mut flags = Flags::new();
    let args: Vec<String> = env::args().skip(1).collect();
    if let Err(e) = flags.parse(&args) {
        eprintln!("rill: {}", e);
        eprintln!("Try 'rill --help' for more information.");
        process::exit(Status::MISUSE.code());
    }

    if flags.is_set("help") {
        flags.print_help();
        return;
    }

    if flags.is_set("version") {
        println!("rill {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    rill::logging::init(&flags);

    let status = match Shell::new(ShellConfig::from_flags(&flags)).and_then(|mut shell| shell.run()) {
        Ok(status) => status,
        Err(e) => {
            eprintln!("rill: {}", e);
            Status::FAILURE
        }
    };
    process::exit(status.code());
}
