use chrono::Local;
use colored::*;
use env_logger::fmt::Formatter;
use log::{Level, Record};
use std::io::Write;

pub fn init_logger(log_level: &str) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level));
    builder.format(format_log);

    // Server internals and the analysis client's HTTP transport are noisy
    // at debug; our own modules carry the useful detail.
    builder.filter(Some("actix_server"), log::LevelFilter::Warn);
    builder.filter(Some("actix_web"), log::LevelFilter::Warn);
    builder.filter(Some("reqwest"), log::LevelFilter::Warn);
    builder.filter(Some("hyper"), log::LevelFilter::Warn);

    builder.init();
}

fn format_log(buf: &mut Formatter, record: &Record) -> std::io::Result<()> {
    let level_style = match record.level() {
        Level::Error => "ERROR".truecolor(224, 49, 49),
        Level::Warn => " WARN".truecolor(255, 165, 0),
        Level::Info => " INFO".truecolor(32, 201, 151),
        Level::Debug => "DEBUG".truecolor(138, 43, 226),
        Level::Trace => "TRACE".truecolor(134, 142, 150),
    };

    writeln!(
        buf,
        "{} {} {}: {}",
        Local::now().format("%d/%m/%Y %H:%M:%S%.3f"),
        level_style,
        record.target(),
        record.args()
    )
}

pub fn print_banner(host: &str, port: u16, dev_mode: bool) {
    let saffron = (255, 153, 51);
    let navy = (6, 3, 141);
    let green = (19, 136, 8);

    let border = "=".repeat(64);
    println!("{}", border.truecolor(navy.0, navy.1, navy.2));
    println!(
        "{}",
        "  ███╗   ██╗██╗   ██╗ █████╗ ██╗   ██╗ █████╗ ".truecolor(saffron.0, saffron.1, saffron.2)
    );
    println!(
        "{}",
        "  ████╗  ██║╚██╗ ██╔╝██╔══██╗╚██╗ ██╔╝██╔══██╗".truecolor(saffron.0, saffron.1, saffron.2)
    );
    println!(
        "{}",
        "  ██╔██╗ ██║ ╚████╔╝ ███████║ ╚████╔╝ ███████║".truecolor(navy.0, navy.1, navy.2)
    );
    println!(
        "{}",
        "  ██║╚██╗██║  ╚██╔╝  ██╔══██║  ╚██╔╝  ██╔══██║".truecolor(green.0, green.1, green.2)
    );
    println!(
        "{}",
        "  ██║ ╚████║   ██║   ██║  ██║   ██║   ██║  ██║".truecolor(green.0, green.1, green.2)
    );
    println!();
    println!("{}", "⚖  Nyaya Intake is running!".green());
    println!("{}", format!("   - Address: http://{}:{}", host, port).cyan());
    if dev_mode {
        println!("{}", "   - Mode: development (debug logging)".cyan());
    } else {
        println!("{}", "   - Mode: production".cyan());
    }
    println!("{}", border.truecolor(navy.0, navy.1, navy.2));
}
