use clap::{Arg, Command, ArgAction};

fn cameras_arg() -> Arg {
    Arg::new("cameras")
        .long("cameras")
        .value_name("CAM_NAMES")
        .help("Comma-separated list of camera names (default: all)")
        .action(ArgAction::Set)
}

pub fn build_cli() -> Command {
    Command::new("pancam")
        .version("0.1.0")
        .about("Controls pan-capable cameras exposed through a camera bridge's HTTP API.")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Sets a custom configuration file")
                .action(ArgAction::Set)
        )
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .help("Enable debug logging")
                .action(ArgAction::SetTrue)
        )
        .subcommand(
            Command::new("info")
                .about("Shows identity, stream source and stored privacy state per camera")
                .arg(cameras_arg())
        )
        .subcommand(
            Command::new("privacy")
                .about("Parks cameras facing away with the status light off, or brings them back")
                .arg(Arg::new("action").long("action").value_name("ACTION").required(true).help("Action to perform: 'enter' or 'exit'").action(ArgAction::Set))
                .arg(cameras_arg())
        )
        .subcommand(
            Command::new("pan")
                .about("Nudges cameras in one or more directions")
                .arg(Arg::new("direction").long("direction").value_name("DIRS").required(true).help("Comma-separated directions: left, right, up, down").action(ArgAction::Set))
                .arg(Arg::new("repeats").long("repeats").value_name("N").help("How many times to repeat the sequence").value_parser(clap::value_parser!(u32)).action(ArgAction::Set))
                .arg(cameras_arg())
        )
        .subcommand(
            Command::new("test")
                .about("Runs a diagnostic test suite against the bridge")
                .arg(cameras_arg())
        )
}
