//! Builds the clock face from the configured display hardware.

use anyhow::{Context, Result};
use time_circuits_hw::{
    Backend, DisabledDigits, DisabledPin, Ht16k33, I2cDevice, SysfsPin, Tm1637,
};
use tracing::{info, warn};

use crate::config::{DisplayConfig, RowWiring};
use crate::display::{ClockFace, DisplayRow, RowMirror, RowRole};
use crate::display::{Digits, Indicator};

/// Digit groups of a row in wiring order.
const GROUPS: [(usize, &str); 4] = [(0, "month"), (1, "day"), (2, "year"), (3, "time")];

/// The assembled face, plus observers when the backend is virtual.
pub struct Hardware {
    pub face: ClockFace,
    pub mirrors: Option<[RowMirror; 3]>,
}

/// Opens every display and indicator named by `config`.
///
/// Parts that fail to open are logged and replaced by disabled stand-ins;
/// only an unknown backend name is an error.
pub fn build(config: &DisplayConfig) -> Result<Hardware> {
    let backend: Backend = config
        .backend
        .parse()
        .context("Invalid display configuration")?;
    info!("Display backend: {}", backend);

    if backend == Backend::Virtual {
        let mirrors = [RowMirror::new(), RowMirror::new(), RowMirror::new()];
        let face = ClockFace::new(
            mirrors[0].build(RowRole::Destination),
            mirrors[1].build(RowRole::Present),
            mirrors[2].build(RowRole::LastDeparted),
        );
        return Ok(Hardware {
            face,
            mirrors: Some(mirrors),
        });
    }

    let face = ClockFace::new(
        build_row(RowRole::Destination, &config.destination, backend),
        build_row(RowRole::Present, &config.present, backend),
        build_row(RowRole::LastDeparted, &config.last_departed, backend),
    );
    Ok(Hardware {
        face,
        mirrors: None,
    })
}

fn build_row(role: RowRole, wiring: &RowWiring, backend: Backend) -> DisplayRow {
    let [month, day, year, time] =
        GROUPS.map(|(index, label)| open_group(role, label, index, wiring, backend));
    let am = open_pin(role, "am", wiring.am_pin);
    let pm = open_pin(role, "pm", wiring.pm_pin);
    DisplayRow::new(role, month, day, year, time, am, pm)
}

fn open_group(
    role: RowRole,
    label: &str,
    index: usize,
    wiring: &RowWiring,
    backend: Backend,
) -> Digits {
    let name = format!("{} {}", role, label);

    let opened: time_circuits_hw::Result<Digits> = match backend {
        Backend::Ht16k33 => I2cDevice::open(&wiring.bus, wiring.addresses[index])
            .and_then(Ht16k33::new)
            .map(|display| Box::new(display) as Digits),
        Backend::Tm1637 => match (wiring.clk_pin, wiring.dio_pins) {
            (Some(clk), Some(dio)) => SysfsPin::open(clk)
                .and_then(|clk| Ok((clk, SysfsPin::open(dio[index])?)))
                .and_then(|(clk, dio)| Tm1637::new(clk, dio))
                .map(|display| Box::new(display) as Digits),
            _ => {
                warn!("{} has no TM1637 lines configured, display disabled", name);
                return Box::new(DisabledDigits::new(&name));
            }
        },
        Backend::Virtual | Backend::Disabled => return Box::new(DisabledDigits::new(&name)),
    };

    match opened {
        Ok(display) => display,
        Err(e) => {
            warn!("{} unavailable: {}. Writes to it are dropped.", name, e);
            Box::new(DisabledDigits::new(&name))
        }
    }
}

fn open_pin(role: RowRole, label: &str, line: Option<u32>) -> Indicator {
    let Some(line) = line else {
        return Box::new(DisabledPin);
    };
    match SysfsPin::open(line) {
        Ok(pin) => Box::new(pin),
        Err(e) => {
            warn!("{} {} indicator unavailable: {}", role, label, e);
            Box::new(DisabledPin)
        }
    }
}
