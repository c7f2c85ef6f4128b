// Copyright 2018 Chris Pearce
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::env;
use std::io;
use std::process;

use argparse::{ArgumentParser, Store, StoreTrue};
use fpgrowth::DEFAULT_MIN_CONFIDENCE;

pub struct Arguments {
    pub input_file_path: String,
    pub output_rules_path: String,
    pub min_support: f64,
    pub min_confidence: f64,
    pub verbose: bool,
}

pub fn parse_args_or_exit() -> Arguments {
    let mut args: Arguments = Arguments {
        input_file_path: String::new(),
        output_rules_path: String::new(),
        min_support: 0.0,
        min_confidence: DEFAULT_MIN_CONFIDENCE,
        verbose: false,
    };

    {
        let mut parser = ArgumentParser::new();
        parser.set_description("FPGrowth frequent itemset and association rule miner.");

        parser
            .refer(&mut args.input_file_path)
            .add_option(
                &["--input"],
                Store,
                "Input dataset in CSV format, one transaction per line.",
            )
            .metavar("file_path")
            .required();

        parser
            .refer(&mut args.output_rules_path)
            .add_option(
                &["--output"],
                Store,
                "File path in which to store output rules. \
                 Format: antecedent -> consequent, confidence, support.",
            )
            .metavar("file_path")
            .required();

        parser
            .refer(&mut args.min_support)
            .add_option(
                &["--min-support"],
                Store,
                "Minimum itemset support threshold. Values in range [0,1] are \
                 a fraction of the transactions, larger values a count.",
            )
            .metavar("threshold")
            .required();

        parser
            .refer(&mut args.min_confidence)
            .add_option(
                &["--min-confidence"],
                Store,
                "Minimum rule confidence threshold, in range [0,1]. Default 0.6.",
            )
            .metavar("threshold");

        parser
            .refer(&mut args.verbose)
            .add_option(&["-v", "--verbose"], StoreTrue, "Log debug output.");

        if env::args().count() == 1 {
            let _ = parser.print_help("Usage:", &mut io::stderr());
            process::exit(1);
        }

        if let Err(err) = parser.parse_args() {
            process::exit(err);
        }
    }

    if let Err(message) = validate(&args) {
        eprintln!("{}", message);
        process::exit(1);
    }

    args
}

fn validate(args: &Arguments) -> Result<(), &'static str> {
    if args.min_support.is_nan() || args.min_support < 0.0 {
        return Err("Minimum itemset support must be a fraction in range [0,1] or a count");
    }
    if !(0.0..=1.0).contains(&args.min_confidence) {
        return Err("Minimum rule confidence threshold must be in range [0,1]");
    }
    Ok(())
}
