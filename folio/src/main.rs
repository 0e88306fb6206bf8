use std::process::ExitCode;

use clap::{arg, command, crate_name, value_parser, ArgMatches, Command};
use cli::client::{show_gallery, GalleryParams};

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = build_cli().get_matches();

    if cli.subcommand_matches(cli::VERSION_SUBCOMMAND).is_some() {
        cli::version::run();
    } else if cli.subcommand_matches(cli::BUGREPORT_SUBCOMMAND).is_some() {
        cli::bugreport::run();
    } else if cli.subcommand_matches(cli::SERVER_SUBCOMMAND).is_some() {
        return cli::server::run().await;
    } else if let Some(list_matches) = cli.subcommand_matches(cli::LIST_SUBCOMMAND) {
        server::init_tracing();
        return show_gallery(gallery_params(list_matches)).await;
    }
    ExitCode::SUCCESS
}

fn build_cli() -> Command {
    command!(crate_name!())
        .version(clap::crate_version!())
        .about(clap::crate_description!())
        .subcommand(Command::new(cli::VERSION_SUBCOMMAND).about(cli::VERSION_DESCRIPTION))
        .subcommand(Command::new(cli::BUGREPORT_SUBCOMMAND).about(cli::BUGREPORT_DESCRIPTION))
        .subcommand(Command::new(cli::SERVER_SUBCOMMAND).about(cli::SERVER_DESCRIPTION))
        .subcommand(
            Command::new(cli::LIST_SUBCOMMAND)
                .about(cli::LIST_DESCRIPTION)
                .arg(arg!(-u --uri <URI>).required(true).help("Listing server URI"))
                .arg(
                    arg!(-f --folder <FOLDER>)
                        .required(true)
                        .help("Asset host folder to load"),
                )
                .arg(
                    arg!(-s --step <STEP>)
                        .required(false)
                        .value_parser(value_parser!(usize))
                        .help("Images revealed per expansion (default 12)"),
                )
                .arg(
                    arg!(-e --expand <COUNT>)
                        .required(false)
                        .value_parser(value_parser!(usize))
                        .default_value("0")
                        .help("How many times to activate the Show More / Show Less control"),
                ),
        )
        .arg_required_else_help(true)
        .disable_version_flag(true)
}

fn gallery_params(matches: &ArgMatches) -> GalleryParams {
    GalleryParams {
        uri: matches.get_one::<String>("uri").cloned().unwrap_or_default(),
        folder: matches
            .get_one::<String>("folder")
            .cloned()
            .unwrap_or_default(),
        step: matches.get_one::<usize>("step").copied(),
        expansions: matches.get_one::<usize>("expand").copied().unwrap_or_default(),
    }
}
