extern crate feria as lib;

use chrono::{Datelike, Local, Month};
use flexi_logger::{FileSpec, Logger};
use lib::events::Dispatcher;
use lib::grid;
use lib::ui::app::App;
use nix::sys::termios;
use num_traits::FromPrimitive;
use std::io::stdout;
use std::path::PathBuf;
use structopt::StructOpt;
use unsegen::base::Terminal;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "feria",
    author = "Julian Bigge <j.reedts@gmail.com>",
    about = "Feria - a TUI holiday calendar."
)]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(
        short = "s",
        long = "show",
        help = "only show the current month non-interactively"
    )]
    pub show: bool,

    #[structopt(
        long = "country",
        help = "ISO code of the country to preselect"
    )]
    pub country: Option<String>,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

fn print_month() {
    let today = Local::now().date_naive();
    let month = Month::from_u32(today.month())
        .map(|month| month.name())
        .unwrap_or("?");

    println!("{} {}", month, today.year());
    println!("Sun Mon Tue Wed Thu Fri Sat");

    for week in grid::month_weeks(today) {
        let row: Vec<String> = week
            .cells()
            .iter()
            .map(|cell| match cell.date() {
                Some(day) => format!("{:>3}", day.day()),
                None => "   ".to_owned(),
            })
            .collect();
        println!("{}", row.join(" "));
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &'static str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    logger.start()?;

    if args.show {
        print_month();
        return Ok(());
    }

    const STDOUT: std::os::unix::io::RawFd = 0;
    let orig_attr = std::sync::Mutex::new(
        termios::tcgetattr(STDOUT).expect("Failed to get terminal attributes"),
    );

    std::panic::set_hook(Box::new(move |info| {
        // Switch to main terminal screen
        println!("{}{}", termion::screen::ToMainScreen, termion::cursor::Show);

        let _ = termios::tcsetattr(STDOUT, termios::SetArg::TCSANOW, &orig_attr.lock().unwrap());

        println!("Feria ran into a fatal error!");
        println!(
            "Consider filing an issue with a log file and the backtrace below at {}",
            env!("CARGO_PKG_REPOSITORY")
        );

        println!("{}", info);
        println!("{:?}", backtrace::Backtrace::new());
    }));

    let config = lib::config::load_suitable_config(args.configfile.as_deref())?;

    let dispatcher = Dispatcher::from_config(&config);

    // Setup unsegen terminal
    let stdout = stdout();
    let term = Terminal::new(stdout.lock())?;

    let mut app = App::new(&config, args.country);

    app.run(dispatcher, term)
}
