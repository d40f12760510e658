use std::env;
use std::path::PathBuf;

#[derive(Debug)]
pub struct CliOptions {
    pub config: Option<PathBuf>,
    pub port: Option<u16>,
    pub export: Option<PathBuf>,
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(args)
}

fn parse_args_from(args: Vec<String>) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut config = None;
    let mut port = None;
    let mut export = None;

    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let path = args.get(i).ok_or_else(|| {
                    "missing value for --config (expected a TOML file path)".to_string()
                })?;
                if config.replace(PathBuf::from(path)).is_some() {
                    return Err("--config provided more than once".to_string());
                }
            }
            "--port" => {
                i += 1;
                let raw = args
                    .get(i)
                    .ok_or_else(|| "missing value for --port (expected a u16)".to_string())?;
                let parsed: u16 = raw
                    .parse()
                    .map_err(|_| format!("--port value \"{raw}\" is not a valid u16"))?;
                if port.replace(parsed).is_some() {
                    return Err("--port provided more than once".to_string());
                }
            }
            "--export" => {
                i += 1;
                let path = args.get(i).ok_or_else(|| {
                    "missing value for --export (expected a CSV file path)".to_string()
                })?;
                if export.replace(PathBuf::from(path)).is_some() {
                    return Err("--export provided more than once".to_string());
                }
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    Ok(CliOptions {
        config,
        port,
        export,
    })
}

pub fn print_usage() {
    eprintln!("wattwise — household electricity analytics and recommendation service");
    eprintln!();
    eprintln!("Usage: wattwise [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>   Load configuration from a TOML file");
    eprintln!("  --port <u16>      Override the configured server port");
    eprintln!("  --export <path>   Write the hourly series to CSV and exit");
    eprintln!("  --help            Show this help message");
}
