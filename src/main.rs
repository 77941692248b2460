use myshell::config::Config;
use myshell::flags::Flags;
use myshell::shell::Shell;
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut flags = Flags::new();
    let args: Vec<String> = env::args().skip(1).collect();
    if let Err(e) = flags.parse(&args) {
        eprintln!("myshell: {}", e);
        flags.print_help();
        return ExitCode::FAILURE;
    }

    if flags.is_set("help") {
        flags.print_help();
        return ExitCode::SUCCESS;
    }

    if flags.is_set("version") {
        println!("myshell {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    let config = match Config::from_flags(&flags) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("myshell: {}", e);
            flags.print_help();
            return ExitCode::FAILURE;
        }
    };
    myshell::logging::init(config.log_level);

    let mut shell = match Shell::new(&config) {
        Ok(shell) => shell,
        Err(e) => {
            eprintln!("myshell: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match shell.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("myshell: {}", e);
            ExitCode::FAILURE
        }
    }
}
