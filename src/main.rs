use clap::Parser;
use log::{LevelFilter, debug, error, info};
use pio_csv_import::{Args, ImportError, PioCli, run};
use std::process;

fn main() {
    let args = Args::parse();
    init_logging(args.log_level.as_deref());
    debug!("{:?}", args);

    if let Err(e) = import(args) {
        error!("{}", e);
        log::logger().flush();
        process::exit(e.exit_code());
    }
}

fn import(args: Args) -> Result<(), ImportError> {
    let config = args.into_config()?;
    let pio = PioCli::new(&config.pio_cmd)?;
    let summary = run(&config, &pio, &pio)?;
    info!(
        "Imported {} events into app {}",
        summary.events, summary.app_id
    );
    Ok(())
}

fn init_logging(level: Option<&str>) {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    );
    if let Some(level) = level.and_then(|l| l.parse::<LevelFilter>().ok()) {
        builder.filter_level(level);
    }
    builder.init();
}
