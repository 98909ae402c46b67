//! Disables the output of a connected DP100 without disturbing its
//! set-points.

use dp100_hid::connection::{hid::HidTransport, Dp100};
use log::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    simplelog::TermLogger::init(
        log::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Always,
    )
    .unwrap();

    let mut psu = Dp100::new(HidTransport::open()?);

    let settings = *psu.active_settings()?;
    info!(
        "output: {}, Vset: {}V, Iset: {}A, OVP: {}V, OCP: {}A",
        if settings.state != 0 { "on" } else { "off" },
        settings.voltage_set as f64 / 1000.0,
        settings.current_set as f64 / 1000.0,
        settings.ovp as f64 / 1000.0,
        settings.ocp as f64 / 1000.0
    );

    psu.set_output(false)?;
    info!("output disabled");

    Ok(())
}
