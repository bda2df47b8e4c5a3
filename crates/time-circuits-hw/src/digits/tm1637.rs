//! TM1637 four-digit module on two output lines.
//!
//! Protocol structure (bytes are sent LSB first, each followed by an ack clock):
//! - 0x40: data command, auto-increment addressing
//! - 0xC0 + 4 segment bytes: write from digit 0
//! - 0x88 | level: display on at brightness `level` (0-7)
//!
//! The colon is bit 7 of the second digit. The pin backend's write latency
//! keeps the clock below the chip's 250 kHz limit.

use super::{text_cells, DigitGroup, NumberFormat};
use crate::pin::OutputPin;
use crate::segments::{encode, SEG_DP};
use crate::{Result, DIGIT_CELLS, MAX_BRIGHTNESS};

/// Data command: write, auto-increment.
const CMD_DATA: u8 = 0x40;

/// Address command for digit 0.
const CMD_ADDRESS: u8 = 0xC0;

/// Display control: display on.
const CMD_DISPLAY_ON: u8 = 0x88;

/// The three transmissions that make up one frame.
pub fn build_transmissions(
    cells: &[char; DIGIT_CELLS],
    colon: bool,
    brightness: u8,
) -> [Vec<u8>; 3] {
    let mut segments = encode(cells);
    if colon {
        segments[1] |= SEG_DP;
    }

    let mut data = Vec::with_capacity(1 + DIGIT_CELLS);
    data.push(CMD_ADDRESS);
    data.extend_from_slice(&segments);

    [
        vec![CMD_DATA],
        data,
        vec![CMD_DISPLAY_ON | brightness.min(MAX_BRIGHTNESS)],
    ]
}

/// TM1637 module driven over a clock and a data line.
pub struct Tm1637<P: OutputPin> {
    clk: P,
    dio: P,
    brightness: u8,
    cells: [char; DIGIT_CELLS],
    colon: bool,
}

impl<P: OutputPin> Tm1637<P> {
    /// Creates a driver and blanks the module.
    pub fn new(clk: P, dio: P) -> Result<Self> {
        let mut display = Self {
            clk,
            dio,
            brightness: MAX_BRIGHTNESS,
            cells: [' '; DIGIT_CELLS],
            colon: false,
        };
        display.clk.set_active(true)?;
        display.dio.set_active(true)?;
        display.flush()?;
        Ok(display)
    }

    fn start(&mut self) -> Result<()> {
        self.dio.set_active(true)?;
        self.clk.set_active(true)?;
        self.dio.set_active(false)
    }

    fn stop(&mut self) -> Result<()> {
        self.clk.set_active(false)?;
        self.dio.set_active(false)?;
        self.clk.set_active(true)?;
        self.dio.set_active(true)
    }

    fn write_byte(&mut self, byte: u8) -> Result<()> {
        for bit in 0..8 {
            self.clk.set_active(false)?;
            self.dio.set_active(byte & (1 << bit) != 0)?;
            self.clk.set_active(true)?;
        }
        // Ack slot: release data and clock it through without sampling.
        self.clk.set_active(false)?;
        self.dio.set_active(true)?;
        self.clk.set_active(true)?;
        self.clk.set_active(false)
    }

    fn transmit(&mut self, bytes: &[u8]) -> Result<()> {
        self.start()?;
        for &byte in bytes {
            self.write_byte(byte)?;
        }
        self.stop()
    }

    fn flush(&mut self) -> Result<()> {
        for bytes in build_transmissions(&self.cells, self.colon, self.brightness) {
            self.transmit(&bytes)?;
        }
        Ok(())
    }
}

impl<P: OutputPin> DigitGroup for Tm1637<P> {
    fn clear(&mut self) -> Result<()> {
        self.cells = [' '; DIGIT_CELLS];
        self.colon = false;
        self.flush()
    }

    fn write_number(&mut self, value: u16, format: NumberFormat) -> Result<()> {
        self.cells = format.cells(value);
        self.colon = format.colon;
        self.flush()
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        self.cells = text_cells(text);
        self.colon = false;
        self.flush()
    }

    fn set_brightness(&mut self, level: u8) -> Result<()> {
        self.brightness = level.min(MAX_BRIGHTNESS);
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Both lines log into one trace so the test can replay the bus.
    #[derive(Clone)]
    struct TracePin {
        is_clock: bool,
        trace: Arc<Mutex<Vec<(bool, bool)>>>,
    }

    impl OutputPin for TracePin {
        fn set_active(&mut self, active: bool) -> Result<()> {
            self.trace.lock().unwrap().push((self.is_clock, active));
            Ok(())
        }
    }

    /// Replays a pin trace into the transmitted byte sequences.
    fn decode(trace: &[(bool, bool)]) -> Vec<Vec<u8>> {
        let mut clk = true;
        let mut dio = true;
        let mut transmissions = Vec::new();
        let mut current: Option<(Vec<u8>, u8, u8)> = None;

        for &(is_clock, level) in trace {
            if is_clock {
                let rising = !clk && level;
                clk = level;
                if let (true, Some((bytes, byte, count))) = (rising, current.as_mut()) {
                    if *count < 8 {
                        if dio {
                            *byte |= 1 << *count;
                        }
                        *count += 1;
                    } else {
                        bytes.push(*byte);
                        *byte = 0;
                        *count = 0;
                    }
                }
            } else {
                if clk && dio && !level {
                    current = Some((Vec::new(), 0, 0));
                } else if clk && !dio && level {
                    if let Some((bytes, _, _)) = current.take() {
                        transmissions.push(bytes);
                    }
                }
                dio = level;
            }
        }
        transmissions
    }

    fn trace_pair() -> (TracePin, TracePin, Arc<Mutex<Vec<(bool, bool)>>>) {
        let trace = Arc::new(Mutex::new(Vec::new()));
        (
            TracePin {
                is_clock: true,
                trace: trace.clone(),
            },
            TracePin {
                is_clock: false,
                trace: trace.clone(),
            },
            trace,
        )
    }

    #[test]
    fn test_build_transmissions() {
        let [data, digits, control] = build_transmissions(&['1', '0', '0', '4'], true, 3);
        assert_eq!(data, vec![0x40]);
        assert_eq!(digits, vec![0xC0, 0x06, 0x3F | 0x80, 0x3F, 0x66]);
        assert_eq!(control, vec![0x8B]);
    }

    #[test]
    fn test_brightness_clamped_in_control_byte() {
        let [_, _, control] = build_transmissions(&[' '; 4], false, 20);
        assert_eq!(control, vec![0x8F]);
    }

    #[test]
    fn test_bus_replay() {
        let (clk, dio, trace) = trace_pair();
        let mut display = Tm1637::new(clk, dio).unwrap();
        trace.lock().unwrap().clear();

        display.write_number(1985, NumberFormat::full()).unwrap();

        let sent = decode(&trace.lock().unwrap());
        assert_eq!(
            sent,
            vec![
                vec![0x40],
                vec![0xC0, 0x06, 0x6F, 0x7F, 0x6D],
                vec![0x8F],
            ]
        );
    }
}
