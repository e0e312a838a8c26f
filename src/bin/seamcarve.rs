use failure::Error;
use log::{info, LevelFilter};
use seamcarve::{
    calculate_energy, draw_cross, energy_to_image, highlight_vertical_seam, seamcarve,
    PixelBuffer,
};
use std::process;

#[macro_use]
extern crate clap;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};

fn load(path: &str) -> Result<PixelBuffer, Error> {
    let image = image::open(path)?.to_rgb8();
    info!("loaded {} ({}x{})", path, image.width(), image.height());
    Ok(PixelBuffer::from_image(&image)?)
}

fn store(buffer: &PixelBuffer, path: &str) -> Result<(), Error> {
    buffer.to_image().save(path)?;
    info!("wrote {} ({}x{})", path, buffer.width(), buffer.height());
    Ok(())
}

fn input_arg() -> Arg<'static, 'static> {
    Arg::with_name("input")
        .help("The image to read")
        .required(true)
        .index(1)
}

fn output_arg(index: u64) -> Arg<'static, 'static> {
    Arg::with_name("output")
        .help("Where to write the result; the extension picks the format")
        .required(true)
        .index(index)
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    match matches.subcommand() {
        ("carve", Some(args)) => {
            let remove_width = value_t!(args, "width", u32)?;
            let remove_height = value_t!(args, "height", u32)?;
            let image = load(args.value_of("input").unwrap_or_default())?;
            let carved = seamcarve(&image, remove_width, remove_height)?;
            store(&carved, args.value_of("output").unwrap_or_default())
        }
        ("energy", Some(args)) => {
            let image = load(args.value_of("input").unwrap_or_default())?;
            let output = args.value_of("output").unwrap_or_default();
            energy_to_image(&calculate_energy(&image)).save(output)?;
            info!("wrote {}", output);
            Ok(())
        }
        ("seam", Some(args)) => {
            let image = load(args.value_of("input").unwrap_or_default())?;
            store(
                &highlight_vertical_seam(&image),
                args.value_of("output").unwrap_or_default(),
            )
        }
        ("cross", Some(args)) => {
            let width = value_t!(args, "width", u32)?;
            let height = value_t!(args, "height", u32)?;
            store(
                &draw_cross(width, height)?,
                args.value_of("output").unwrap_or_default(),
            )
        }
        _ => Ok(()),
    }
}

fn main() {
    let matches = App::new("seamcarve")
        .version(crate_version!())
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Content-aware image resizing by seam carving")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .multiple(true)
                .help("More logging; repeat for more still"),
        )
        .subcommand(
            SubCommand::with_name("carve")
                .about("Remove the lowest-energy seams from an image")
                .arg(input_arg())
                .arg(output_arg(2))
                .arg(
                    Arg::with_name("width")
                        .long("width")
                        .takes_value(true)
                        .default_value("0")
                        .help("Number of columns to remove"),
                )
                .arg(
                    Arg::with_name("height")
                        .long("height")
                        .takes_value(true)
                        .default_value("0")
                        .help("Number of rows to remove"),
                ),
        )
        .subcommand(
            SubCommand::with_name("energy")
                .about("Render the energy of every pixel as greyscale")
                .arg(input_arg())
                .arg(output_arg(2)),
        )
        .subcommand(
            SubCommand::with_name("seam")
                .about("Draw the lowest-energy vertical seam in red")
                .arg(input_arg())
                .arg(output_arg(2)),
        )
        .subcommand(
            SubCommand::with_name("cross")
                .about("Draw a black canvas crossed by two red diagonals")
                .arg(
                    Arg::with_name("width")
                        .help("Canvas width")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::with_name("height")
                        .help("Canvas height")
                        .required(true)
                        .index(2),
                )
                .arg(output_arg(3)),
        )
        .get_matches();

    let level = match matches.occurrences_of("verbose") {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Err(err) = run(&matches) {
        eprintln!("seamcarve: {}", err);
        for cause in err.iter_causes() {
            eprintln!("  caused by: {}", cause);
        }
        process::exit(1);
    }
}
