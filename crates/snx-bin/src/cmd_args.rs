/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::{info, Level};

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("snx")
        .about("Convert images between PNG and the SN format")
        .arg(Arg::new("in")
            .short('i')
            .help("Input file to read data from, the extension picks the direction")
            .long("input")
            .required(true))
        .arg(Arg::new("out")
            .short('o')
            .long("output")
            .help("Output to write the data to, defaults to the input path with its extension swapped"))
        .arg(Arg::new("palette-size")
            .long("palette-size")
            .help_heading("ENCODING")
            .value_parser(value_parser!(usize))
            .help("Maximum number of palette entries, at most 255"))
        .arg(Arg::new("threshold")
            .long("threshold")
            .help_heading("ENCODING")
            .value_parser(value_parser!(f32))
            .help("Merge colors closer than this distance into one palette entry")
            .long_help("Merge colors closer than this distance into one palette entry.\nWhen absent the palette simply keeps the most frequent colors."))
        .arg(Arg::new("trials")
            .long("trials")
            .help_heading("ENCODING")
            .value_parser(value_parser!(usize))
            .default_value("6")
            .help("Number of default color candidates tried when ordering the palette"))
        .arg(Arg::new("strict")
            .long("strict")
            .action(ArgAction::SetTrue)
            .help_heading("DECODING")
            .help("Treat recoverable decode irregularities as errors"))
        .arg(Arg::new("max-width")
            .long("max-width")
            .help_heading("DECODING")
            .value_parser(value_parser!(usize))
            .default_value("16384")
            .help("Maximum image width the decoder accepts"))
        .arg(Arg::new("max-height")
            .long("max-height")
            .help_heading("DECODING")
            .value_parser(value_parser!(usize))
            .default_value("16384")
            .help("Maximum image height the decoder accepts"))
        .arg(Arg::new("debug")
            .long("debug")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display warnings and errors"))
        .arg(Arg::new("info")
            .long("info")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display information about the conversion"))
}

/// Set up logging options
pub fn setup_logger(options: &ArgMatches) {
    let log_level;

    if *options.get_one::<bool>("debug").unwrap() {
        log_level = Level::Debug;
    } else if *options.get_one::<bool>("trace").unwrap() {
        log_level = Level::Trace;
    } else if *options.get_one::<bool>("warn").unwrap() {
        log_level = Level::Warn
    } else if *options.get_one::<bool>("info").unwrap() {
        log_level = Level::Info;
    } else {
        log_level = Level::Warn;
    }

    simple_logger::init_with_level(log_level).unwrap();

    info!("Initialized logger");
    info!("Log level :{}", log_level);
}
