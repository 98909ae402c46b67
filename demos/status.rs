//! Reads and prints everything a connected DP100 will tell us.

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

    let transport = HidTransport::open()?;
    if let (Ok(Some(manufacturer)), Ok(Some(serial))) =
        (transport.manufacturer(), transport.serial_number())
    {
        info!("Device manufacturer: {manufacturer}, serial number: {serial}");
    }

    let mut psu = Dp100::new(transport);

    let device = psu.device_info()?;
    info!(
        "{} hardware {}, app {}, bootloader {} @ {}-{}-{}",
        device.device_type,
        device.hardware_version,
        device.app_version,
        device.bootloader_version,
        device.year,
        device.month,
        device.day
    );

    let basic = psu.basic_info()?;
    info!(
        "Vin: {}V, Vout: {}V, Iout: {}A, temp: {}degC",
        basic.vin as f64 / 1000.0,
        basic.vout as f64 / 1000.0,
        basic.iout as f64 / 1000.0,
        basic.temp1 as f64 / 10.0
    );

    let system = psu.system_info()?;
    info!(
        "backlight: {}, OPP: {}V, OTP: {}degC, volume: {}",
        system.backlight,
        system.opp as f64 / 1000.0,
        system.otp as f64 / 10.0,
        system.volume
    );

    let settings = psu.active_settings()?;
    info!(
        "output: {}, Vset: {}V, Iset: {}A, OVP: {}V, OCP: {}A",
        if settings.state != 0 { "on" } else { "off" },
        settings.voltage_set as f64 / 1000.0,
        settings.current_set as f64 / 1000.0,
        settings.ovp as f64 / 1000.0,
        settings.ocp as f64 / 1000.0
    );

    Ok(())
}
