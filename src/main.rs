// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use logger::*;
use sp_bench_plot::*;

fn main() {
    let config = match Config::new() {
        Ok(config) => config,
        Err(e) => {
            println!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    Logger::new()
        .label("sp_bench_plot")
        .level(config.logging())
        .init()
        .expect("Failed to initialize logger");

    match run(&config) {
        Ok(Outcome::NoData) => println!("No data to plot"),
        Ok(Outcome::Saved(path)) => println!("Saved to {}", path.display()),
        Ok(Outcome::Shown) => {}
        Err(e) => fatal!("{}", e),
    }
}
