use clap::{Arg, Command as ClapCommand, ArgAction};
use std::process;
use log::error;

// Import from your library
use cutoutkit::utils::logger::Logger;
use cutoutkit::commands::{CommandFactory, CutoutkitCommandFactory};

fn main() {
    let matches = ClapCommand::new("CutoutKit")
        .version("0.1")
        .about("Review and classify sky-survey cutouts for a catalog of objects")
        .arg(
            Arg::new("input")
                .help("Input catalog CSV file")
                .required(false)
                .index(1),
        )
        .arg(
            Arg::new("fetch")
                .short('f')
                .long("fetch")
                .help("Fetch a single cutout instead of reviewing a catalog")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("export")
                .short('e')
                .long("export")
                .help("Export a catalog snapshot without entering review")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("ra")
                .long("ra")
                .help("Right ascension in degrees (with --fetch)")
                .value_name("DEGREES")
                .required(false),
        )
        .arg(
            Arg::new("dec")
                .long("dec")
                .help("Declination in degrees (with --fetch)")
                .value_name("DEGREES")
                .required(false),
        )
        .arg(
            Arg::new("layer")
                .long("layer")
                .help("Survey layer to fetch (data, model, residual)")
                .value_name("LAYER")
                .default_value("data")
                .required(false),
        )
        .arg(
            Arg::new("zoom")
                .short('z')
                .long("zoom")
                .help("Zoom level (5-20)")
                .value_name("LEVEL")
                .required(false),
        )
        .arg(
            Arg::new("size")
                .long("size")
                .help("Image size in pixels (128-512)")
                .value_name("PIXELS")
                .required(false),
        )
        .arg(
            Arg::new("stretch")
                .long("stretch")
                .help("Intensity stretch (none, log, asinh)")
                .value_name("MODE")
                .default_value("log")
                .required(false),
        )
        .arg(
            Arg::new("colormap")
                .long("colormap")
                .help("Colormap for rendered images (gray, viridis, hot, cool, plasma, magma, cividis)")
                .value_name("NAME")
                .default_value("gray")
                .required(false),
        )
        .arg(
            Arg::new("center-zoom")
                .long("center-zoom")
                .help("Also render the magnified center crop")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output file (with --fetch or --export)")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .help("Directory for rendered images and the autosave file")
                .value_name("DIR")
                .required(false),
        )
        .get_matches();

    let log_file = "cutoutkit.log";
    let logger = match Logger::new(log_file) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error initializing logger: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = Logger::init_global_logger("cutoutkit-global.log") {
        eprintln!("Error setting up global logger: {}", e);
        process::exit(1);
    }

    let factory = CutoutkitCommandFactory::new();

    let command_result = factory.create_command(&matches, &logger);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
