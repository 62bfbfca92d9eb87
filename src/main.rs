use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;
use stateplane_reproject::{convert_file, AxisOrder, ConvertOptions, DEST_CRS, SOURCE_CRS};

fn main() {
    let matches = Command::new("State Plane Reprojector")
        .version("0.1.0")
        .author("Jesper Fjellin")
        .about("Reprojects GeoJSON polygon rings from state-plane feet to WGS84 degrees")
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .default_value("in.json")
                .help("Input GeoJSON file"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .default_value("out2.geojson")
                .help("Output GeoJSON file (overwritten)"),
        )
        .arg(
            Arg::new("from")
                .long("from")
                .default_value(SOURCE_CRS)
                .help("Source CRS of the input coordinates"),
        )
        .arg(
            Arg::new("to")
                .long("to")
                .default_value(DEST_CRS)
                .help("Destination CRS"),
        )
        .arg(
            Arg::new("axis-order")
                .long("axis-order")
                .value_parser(["authority", "traditional"])
                .default_value("authority")
                .help("Component order the engine reports before the swap into the output pair"),
        )
        .arg(
            Arg::new("all-rings")
                .long("all-rings")
                .action(ArgAction::SetTrue)
                .help("Reproject hole rings as well as the exterior ring"),
        )
        .arg(
            Arg::new("pretty")
                .long("pretty")
                .action(ArgAction::SetTrue)
                .help("Pretty-print the output"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Log more detail (-vv for every point)"),
        )
        .get_matches();

    let level = match matches.get_count("verbose") {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let input = PathBuf::from(matches.get_one::<String>("input").expect("defaulted"));
    let output = PathBuf::from(matches.get_one::<String>("output").expect("defaulted"));
    let from = matches.get_one::<String>("from").expect("defaulted");
    let to = matches.get_one::<String>("to").expect("defaulted");
    let order = match matches.get_one::<String>("axis-order").map(String::as_str) {
        Some("traditional") => AxisOrder::Traditional,
        _ => AxisOrder::Authority,
    };
    let options = ConvertOptions {
        all_rings: matches.get_flag("all-rings"),
        pretty: matches.get_flag("pretty"),
    };

    match convert_file(&input, &output, from, to, order, &options) {
        Ok(()) => log::info!("Processing completed successfully"),
        Err(e) => {
            eprintln!("Error processing {}: {}", input.display(), e);
            std::process::exit(1);
        }
    }
}
