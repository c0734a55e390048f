#![deny(unsafe_code)]
#![deny(unused_must_use)]
#![deny(unused_features)]
#![warn(unused_crate_dependencies)]

pub mod build_info;

use std::process::ExitCode;

use build_info::BUILD_INFO_CARGO_PKG_VERSION;
use clap::Parser;
use config::args::{AppMode, ArgsConfig};
use server::{SetlinkServer, api_doc::ApiDoc};

fn main() -> ExitCode {
    let args = ArgsConfig::parse();

    if let Some(AppMode::OpenApi) = args.mode {
        return match ApiDoc::open_api_json_string() {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{e:?}");
                ExitCode::FAILURE
            }
        };
    }

    let config = match config::get_config(args, BUILD_INFO_CARGO_PKG_VERSION.to_string()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e:?}");
            return ExitCode::FAILURE;
        }
    };

    let runtime = tokio::runtime::Runtime::new().unwrap();
    runtime.block_on(async { SetlinkServer::new(config).run().await });

    ExitCode::SUCCESS
}
