/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::process::exit;

use log::error;

mod cmd_args;
mod convert;
mod errors;
mod png_io;

fn main() {
    let cmd = cmd_args::create_cmd_args();
    let options = cmd.get_matches();

    cmd_args::setup_logger(&options);

    if let Err(reason) = convert::run(&options) {
        println!();
        error!(" Could not complete conversion, reason {:?}", reason);

        println!();
        exit(-1);
    }
}
