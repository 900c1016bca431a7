mod driver;
mod scene;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use core_types::{SerialConfig, Transport};
use log::{error, warn};
use transport_serial::{list_ports, SerialTransport};

use driver::Driver;
use scene::Cube;

/// Bridges a serial trigger device to a flip animation: each `TRIGGER:`
/// line received on the port rotates the demo cube 180° about its local X
/// axis. Re-triggers during an animation are dropped.
#[derive(Parser, Debug)]
#[command(name = "flipd", version, about)]
struct Cli {
    /// Serial device path (e.g. /dev/ttyUSB0, /dev/cu.usbmodem14101, COM3)
    #[arg(long)]
    port: Option<String>,

    /// Baud rate
    #[arg(long, default_value_t = 9600)]
    baud: u32,

    /// Flip animation duration in seconds
    #[arg(long, default_value_t = 0.45)]
    flip_duration: f32,

    /// Driver loop rate in ticks per second
    #[arg(long, default_value_t = 60)]
    tick_hz: u32,

    /// List available serial ports and exit
    #[arg(long)]
    list: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if cli.list {
        for name in list_ports() {
            println!("{}", name);
        }
        return;
    }

    if let Err(e) = run(cli) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    // Configuration problems are the only errors surfaced to the caller;
    // everything at runtime is contained inside the tick loop.
    let Some(port) = cli.port else {
        return Err("--port is required (try --list to enumerate devices)".into());
    };
    if cli.baud == 0 {
        return Err("--baud must be positive".into());
    }
    if cli.tick_hz == 0 {
        return Err("--tick-hz must be positive".into());
    }
    let mut driver = Driver::new(cli.flip_duration, Some(Cube::new()))
        .map_err(|e| format!("invalid configuration: {}", e))?;

    // Open failure is reported once; the loop still runs, degraded.
    let mut transport = match SerialTransport::open(&SerialConfig::new(&port, cli.baud)) {
        Ok(t) => Some(t),
        Err(e) => {
            error!("{} (running without a device; no triggers will arrive)", e);
            None
        }
    };

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = running.clone();
        ctrlc::set_handler(move || running.store(false, Ordering::SeqCst))
            .map_err(|e| format!("failed to install signal handler: {}", e))?;
    }

    let tick = Duration::from_secs_f64(1.0 / f64::from(cli.tick_hz));
    let session_start = Instant::now();
    let mut last_tick = Instant::now();

    while running.load(Ordering::SeqCst) {
        let now = Instant::now();
        let dt_secs = now.duration_since(last_tick).as_secs_f32();
        last_tick = now;

        let incoming = match transport.as_mut() {
            Some(t) if t.is_open() => match t.read_available() {
                Ok(bytes) => bytes,
                Err(e) => {
                    // Contained at the transport boundary: no data this tick.
                    warn!("read from {}: {}", t.port_name(), e);
                    Vec::new()
                }
            },
            _ => Vec::new(),
        };

        let timestamp_us = session_start.elapsed().as_micros() as u64;
        driver.pump(&incoming, timestamp_us, dt_secs);

        if let Some(remaining) = tick.checked_sub(last_tick.elapsed()) {
            std::thread::sleep(remaining);
        }
    }

    Ok(())
}
