//! MWI Sort terminal entry point
//!
//! Reads commands from stdin, one per line, and prints the grid (or JSON
//! events) after each one. The idle timer runs against wall-clock time and is
//! checked before every command.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use mwi_sort::commands::HELP;
use mwi_sort::sim::PuzzleEvent;
use mwi_sort::{Host, Settings};

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("MWI Sort starting...");

    let settings = Settings::load_from_env();
    let mut host = Host::from_settings(&settings);
    let clock = Instant::now();
    let now = || clock.elapsed().as_secs_f32();

    host.activate(&settings.bomb, now());
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = run(&mut host, &settings, &now, &mut out) {
        log::error!("Output error: {}", e);
    }
}

fn run(
    host: &mut Host,
    settings: &Settings,
    now: &dyn Fn() -> f32,
    out: &mut impl Write,
) -> io::Result<()> {
    writeln!(out, "{HELP}")?;
    show(host, settings, out)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if host.update(now()) {
            writeln!(out, "Too slow!")?;
        }
        if let Err(e) = host.run_command(&line, now()) {
            writeln!(out, "error: {e}")?;
        }
        show(host, settings, out)?;
        if host.puzzle().is_solved() {
            writeln!(out, "Solved with {} strike(s).", host.strikes())?;
            break;
        }
    }
    Ok(())
}

fn show(host: &mut Host, settings: &Settings, out: &mut impl Write) -> io::Result<()> {
    let events = host.drain_events();
    if settings.json_events {
        for event in &events {
            writeln!(out, "{}", serde_json::to_string(event)?)?;
        }
        return Ok(());
    }
    for event in &events {
        if let PuzzleEvent::Strike { cause } = event {
            writeln!(out, "STRIKE: {cause}")?;
        }
    }
    write!(out, "{}", host.puzzle().grid())?;
    let gate = if host.puzzle().reset_active() { "RESET" } else { "" };
    writeln!(out, "strikes: {}  {}", host.strikes(), gate)?;
    Ok(())
}
