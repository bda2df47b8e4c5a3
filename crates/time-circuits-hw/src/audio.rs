//! DFPlayer Mini communication via serial port.
//!
//! Frame structure (10 bytes):
//! - 0x7E start, 0xFF version, 0x06 length
//! - command byte, feedback flag (0x00, no ack requested)
//! - 16-bit parameter (big-endian)
//! - 16-bit checksum: two's complement of the sum of bytes 1-6
//! - 0xEF end

use crate::{Error, Result};
use tokio::io::AsyncWriteExt;
use tokio_serial::{DataBits, Parity, SerialPortBuilderExt, StopBits};
use tracing::{debug, info};

/// Frame length.
pub const FRAME_SIZE: usize = 10;

/// DFPlayer baud rate.
const BAUD_RATE: u32 = 9600;

const START_BYTE: u8 = 0x7E;
const VERSION_BYTE: u8 = 0xFF;
const LENGTH_BYTE: u8 = 0x06;
const END_BYTE: u8 = 0xEF;

/// Highest volume the module accepts.
pub const MAX_VOLUME: u8 = 30;

/// Highest track number the module addresses.
pub const MAX_TRACK: u16 = 2999;

/// DFPlayer command bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Command {
    /// Play a track by its position in storage order (1-based).
    PlayTrack = 0x03,
    /// Set volume (0-30).
    SetVolume = 0x06,
    /// Stop playback.
    Stop = 0x16,
}

/// DFPlayer Mini controller.
pub struct DfPlayer {
    port_path: String,
}

impl DfPlayer {
    /// Creates a new DFPlayer controller.
    pub fn new(port_path: &str) -> Self {
        Self {
            port_path: port_path.to_string(),
        }
    }

    /// Opens the serial port and sends one frame.
    async fn send_frame(&self, frame: [u8; FRAME_SIZE]) -> Result<()> {
        let mut port = tokio_serial::new(&self.port_path, BAUD_RATE)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .open_native_async()
            .map_err(|e| {
                if let tokio_serial::ErrorKind::Io(kind) = &e.kind {
                    if *kind == std::io::ErrorKind::NotFound
                        || *kind == std::io::ErrorKind::PermissionDenied
                    {
                        if !std::path::Path::new(&self.port_path).exists() {
                            return Error::PlayerNotFound(self.port_path.clone());
                        }
                    }
                }
                Error::Serial(e)
            })?;

        debug!("Sending DFPlayer frame to {}: {:02X?}", self.port_path, frame);

        port.write_all(&frame).await?;
        port.flush().await?;
        Ok(())
    }

    /// Calculates the checksum over version, length, command, feedback and parameter.
    fn checksum(body: &[u8; 6]) -> u16 {
        let sum = body.iter().fold(0u16, |acc, &x| acc.wrapping_add(x as u16));
        0u16.wrapping_sub(sum)
    }

    /// Builds a command frame.
    fn build_frame(command: Command, parameter: u16) -> [u8; FRAME_SIZE] {
        let [param_hi, param_lo] = parameter.to_be_bytes();
        let body = [
            VERSION_BYTE,
            LENGTH_BYTE,
            command as u8,
            0x00,
            param_hi,
            param_lo,
        ];
        let [check_hi, check_lo] = Self::checksum(&body).to_be_bytes();

        [
            START_BYTE, body[0], body[1], body[2], body[3], body[4], body[5], check_hi, check_lo,
            END_BYTE,
        ]
    }

    /// Plays the track at `index` in storage order.
    pub async fn play(&self, index: u16) -> Result<()> {
        if index == 0 || index > MAX_TRACK {
            return Err(Error::InvalidTrack(index));
        }
        self.send_frame(Self::build_frame(Command::PlayTrack, index))
            .await?;
        debug!("DFPlayer playing track {}", index);
        Ok(())
    }

    /// Sets the playback volume.
    pub async fn set_volume(&self, volume: u8) -> Result<()> {
        if volume > MAX_VOLUME {
            return Err(Error::InvalidVolume(volume));
        }
        self.send_frame(Self::build_frame(Command::SetVolume, volume as u16))
            .await?;
        info!("DFPlayer volume set to {}", volume);
        Ok(())
    }

    /// Stops playback.
    pub async fn stop(&self) -> Result<()> {
        self.send_frame(Self::build_frame(Command::Stop, 0)).await
    }
}
