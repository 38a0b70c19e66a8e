#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;
    use std::process::ExitCode;

    use clap::Parser;
    use gpx2utm::options::parse_delimiter;
    use gpx2utm::{ConvertOptions, Session, table};
    use tracing_subscriber::EnvFilter;

    /// Convert GPX waypoints or the first route into a UTM easting/northing table.
    #[derive(Debug, Parser)]
    #[command(name = "gpx2utm", version)]
    pub struct Cli {
        /// GPX file to convert
        pub input: PathBuf,

        /// Where to save the table (default: input name with a .CSV suffix)
        #[arg(short, long)]
        pub output: Option<PathBuf>,

        /// Force a text encoding label instead of detecting it
        #[arg(long)]
        pub encoding: Option<String>,

        /// Output field delimiter
        #[arg(long, default_value_t = ',', value_parser = parse_delimiter)]
        pub delimiter: char,

        /// Omit the header row
        #[arg(long)]
        pub no_header: bool,

        /// Also print the table to stdout
        #[arg(long)]
        pub print: bool,
    }

    pub fn main() -> ExitCode {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();

        let cli = Cli::parse();
        let options = ConvertOptions {
            encoding: cli.encoding,
            delimiter: cli.delimiter,
            include_header: !cli.no_header,
        };

        let mut session = Session::new(options);
        session.select(cli.input);

        let result = match session.convert() {
            Some(Ok(result)) => result,
            Some(Err(e)) => {
                tracing::error!("Error parsing GPX file:\n{e}.");
                return ExitCode::FAILURE;
            }
            None => return ExitCode::FAILURE,
        };

        if let Some(zone) = result.zone {
            tracing::info!("UTM zone {zone}");
        }

        if cli.print {
            match table::to_table_string(&result.rows, session.options()) {
                Ok(text) => print!("{text}"),
                Err(e) => {
                    tracing::error!("{e}");
                    return ExitCode::FAILURE;
                }
            }
        }

        let Some(output) = cli.output.or_else(|| session.default_output_path()) else {
            return ExitCode::FAILURE;
        };
        tracing::info!("Saving file to {}", output.display());
        if let Err(e) = table::save_table(&output, &result.rows, session.options()) {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
        tracing::info!("File saved as {}.", output.display());

        ExitCode::SUCCESS
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    cli::main()
}

#[cfg(target_arch = "wasm32")]
fn main() {}
