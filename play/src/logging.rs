use env_logger::fmt::{Color, Formatter};
use lazy_static::lazy_static;
use log::{Level, LevelFilter, Record};
use std::{
    io::{self, Write},
    sync::Mutex,
};

pub struct State {
    pub sim_time: Option<f32>,
}

lazy_static! {
    pub static ref STATE: Mutex<State> = Mutex::new(State { sim_time: None });
}

pub fn init() {
    env_logger::Builder::from_default_env()
        .filter(None, LevelFilter::Info)
        .format(format)
        .init();
}

// env_logger does not expose the pieces of its default formatter for
// customization, so this rebuilds it with the simulation clock in place of
// the wall clock once the race is running.
fn format(buf: &mut Formatter, record: &Record<'_>) -> io::Result<()> {
    let level = record.level();
    let mut level_style = buf.style();
    match level {
        Level::Trace => level_style.set_color(Color::White),
        Level::Debug => level_style.set_color(Color::Blue),
        Level::Info => level_style.set_color(Color::Green),
        Level::Warn => level_style.set_color(Color::Yellow),
        Level::Error => level_style.set_color(Color::Red).set_bold(true),
    };
    write!(buf, "{:>5} ", level_style.value(level))?;

    match STATE.lock().unwrap().sim_time {
        Some(sim_time) => write!(buf, "{:6.2}: ", sim_time)?,
        None => write!(buf, "{}: ", buf.timestamp())?,
    }

    if let Some(module_path) = record.module_path() {
        let mut module_style = buf.style();
        module_style.set_color(Color::Yellow);
        write!(buf, "{}: ", module_style.value(module_path))?;
    }

    writeln!(buf, "{}", record.args())
}
