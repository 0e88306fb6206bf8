use serde::Serialize;
use std::env;

#[derive(Debug, Serialize)]
struct VersionInfo {
    name: &'static str,
    version: &'static str,
    description: &'static str,
    os: &'static str,
    architecture: &'static str,
}

pub fn run() {
    let info = VersionInfo {
        name: clap::crate_name!(),
        version: clap::crate_version!(),
        description: clap::crate_description!(),
        os: env::consts::OS,
        architecture: env::consts::ARCH,
    };

    println!("Name           : {}", info.name);
    println!("Version        : {}", info.version);
    println!("Description    : {}", info.description);
    println!("OS             : {}", info.os);
    println!("Architecture   : {}", info.architecture);
}
