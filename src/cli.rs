use std::env;
use std::path::PathBuf;
use std::str::FromStr;

pub struct CliOptions {
    pub config: Option<PathBuf>,
    pub preset: Option<String>,
    pub seed: Option<u64>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub hour: Option<u32>,
    pub refreshes: Option<usize>,
    pub forecast_out: Option<PathBuf>,
    pub hourly_out: Option<PathBuf>,
    pub state_dir: Option<PathBuf>,
    pub json: bool,
    #[cfg(feature = "api")]
    pub serve: bool,
    #[cfg(feature = "api")]
    pub port: u16,
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(args)
}

fn parse_args_from(args: Vec<String>) -> Result<CliOptions, String> {
    if args.len() == 1 && (args[0] == "--help" || args[0] == "-h") {
        print_usage();
        std::process::exit(0);
    }
    parse_options(&args)
}

fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut opts = CliOptions {
        config: None,
        preset: None,
        seed: None,
        lat: None,
        lng: None,
        hour: None,
        refreshes: None,
        forecast_out: None,
        hourly_out: None,
        state_dir: None,
        json: false,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
    };

    let mut i = 0usize;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--config" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --config (expected a TOML file path)")?;
                if opts.config.replace(PathBuf::from(path)).is_some() {
                    return Err("--config provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name =
                    args.next_or_err(i, "missing value for --preset (expected a preset name)")?;
                if opts.preset.replace(name.to_string()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--seed" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --seed")?;
                opts.seed = Some(parse_value(flag, raw, "u64")?);
            }
            "--lat" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --lat")?;
                opts.lat = Some(parse_value(flag, raw, "f64")?);
            }
            "--lng" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --lng")?;
                opts.lng = Some(parse_value(flag, raw, "f64")?);
            }
            "--hour" => {
                i += 1;
                let hour: u32 =
                    parse_value(flag, args.next_or_err(i, "missing value for --hour")?, "0-23")?;
                if hour > 23 {
                    return Err(format!("--hour value {hour} is out of range (expected 0-23)"));
                }
                opts.hour = Some(hour);
            }
            "--refreshes" => {
                i += 1;
                opts.refreshes = Some(parse_value(
                    flag,
                    args.next_or_err(i, "missing value for --refreshes")?,
                    "usize",
                )?);
            }
            "--forecast-out" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --forecast-out (expected a file path)",
                )?;
                opts.forecast_out = Some(PathBuf::from(path));
            }
            "--hourly-out" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --hourly-out (expected a file path)")?;
                opts.hourly_out = Some(PathBuf::from(path));
            }
            "--state-dir" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --state-dir (expected a directory)")?;
                opts.state_dir = Some(PathBuf::from(path));
            }
            "--json" => opts.json = true,
            #[cfg(feature = "api")]
            "--serve" => opts.serve = true,
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --port")?;
                opts.port = parse_value(flag, raw, "u16")?;
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if opts.config.is_some() && opts.preset.is_some() {
        return Err(
            "arguments `--config` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }

    if opts.lat.is_some() != opts.lng.is_some() {
        return Err("`--lat` and `--lng` must be given together".to_string());
    }

    Ok(opts)
}

fn parse_value<T: FromStr>(flag: &str, raw: &str, expected: &str) -> Result<T, String> {
    raw.parse()
        .map_err(|_| format!("{flag} value \"{raw}\" is not a valid {expected}"))
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("crowd-forecast - location-aware crowd forecasts for city zones");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  crowd-forecast [--config <path> | --preset <name>] [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>          Load configuration from a TOML file");
    eprintln!("  --preset <name>          Use a built-in preset (nyc, london, sydney, fallback)");
    eprintln!("  --seed <u64>             Fix the random seed");
    eprintln!("  --lat <f64> --lng <f64>  Override the user coordinate");
    eprintln!("  --hour <0-23>            Start hour (default: current local hour)");
    eprintln!("  --refreshes <n>          Number of live refreshes to print");
    eprintln!("  --forecast-out <path>    Export the 24-hour series to CSV");
    eprintln!("  --hourly-out <path>      Export the hourly series to CSV");
    eprintln!("  --state-dir <dir>        Remember the last location in <dir>");
    eprintln!("  --json                   Print reports as JSON");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start the HTTP API after printing");
        eprintln!("  --port <u16>             API server port (default: 3000)");
    }
    eprintln!("  --help                   Show this help message");
}
