//! Binary energy file shared with the downstream analysis tools.
//!
//! Layout, all values little-endian:
//!
//! | offset          | size | content                      |
//! |-----------------|------|------------------------------|
//! | 0               | 8    | number of frames (`u64`)     |
//! | 8 + 32·k        | 8    | time of frame k (`f64`)      |
//! | 16 + 32·k       | 8    | potential energy (`f64`)     |
//! | 24 + 32·k       | 8    | kinetic energy (`f64`)       |
//! | 32 + 32·k       | 8    | total energy (`f64`)         |

use serde::Serialize;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;
use thiserror::Error;

const FRAME_SIZE: usize = 4 * std::mem::size_of::<f64>();

#[derive(Debug, Error)]
pub enum EnergyFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Energy file declares {declared} frames but only {found} are present")]
    Truncated { declared: u64, found: u64 },
    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct EnergyFrame {
    pub time: f64,
    pub potential: f64,
    pub kinetic: f64,
    pub total: f64,
}

impl EnergyFrame {
    pub fn new(time: f64, potential: f64, kinetic: f64) -> Self {
        Self {
            time,
            potential,
            kinetic,
            total: potential + kinetic,
        }
    }
}

/// Streams frames to an energy file and back-patches the frame count on [`finish`].
///
/// [`finish`]: EnergyFileWriter::finish
pub struct EnergyFileWriter<W: Write + Seek> {
    writer: W,
    frames: u64,
}

impl<W: Write + Seek> EnergyFileWriter<W> {
    pub fn new(mut writer: W) -> Result<Self, EnergyFileError> {
        writer.write_all(&0u64.to_le_bytes())?;
        Ok(Self { writer, frames: 0 })
    }

    pub fn write_frame(&mut self, frame: &EnergyFrame) -> Result<(), EnergyFileError> {
        for value in [frame.time, frame.potential, frame.kinetic, frame.total] {
            self.writer.write_all(&value.to_le_bytes())?;
        }
        self.frames += 1;
        Ok(())
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Writes the final frame count into the header and returns the inner writer.
    pub fn finish(mut self) -> Result<W, EnergyFileError> {
        let end = self.writer.stream_position()?;
        self.writer.seek(SeekFrom::Start(0))?;
        self.writer.write_all(&self.frames.to_le_bytes())?;
        self.writer.seek(SeekFrom::Start(end))?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Reads every frame of an energy file.
pub fn read_energy_file<R: Read>(mut reader: R) -> Result<Vec<EnergyFrame>, EnergyFileError> {
    let mut header = [0u8; 8];
    reader.read_exact(&mut header)?;
    let declared = u64::from_le_bytes(header);

    let mut frames = Vec::new();
    let mut buffer = [0u8; FRAME_SIZE];
    for found in 0..declared {
        if let Err(e) = reader.read_exact(&mut buffer) {
            return Err(match e.kind() {
                io::ErrorKind::UnexpectedEof => EnergyFileError::Truncated { declared, found },
                _ => EnergyFileError::Io(e),
            });
        }
        let mut values = [0.0f64; 4];
        for (k, chunk) in buffer.chunks_exact(8).enumerate() {
            let mut bytes = [0u8; 8];
            bytes.copy_from_slice(chunk);
            values[k] = f64::from_le_bytes(bytes);
        }
        frames.push(EnergyFrame {
            time: values[0],
            potential: values[1],
            kinetic: values[2],
            total: values[3],
        });
    }
    Ok(frames)
}

/// Exports frames as CSV with a `time,potential,kinetic,total` header.
pub fn write_csv(frames: &[EnergyFrame], path: &Path) -> Result<(), EnergyFileError> {
    let mut writer = csv::Writer::from_path(path)?;
    for frame in frames {
        writer.serialize(frame)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    #[test]
    fn writer_produces_exact_byte_layout() {
        let mut writer = EnergyFileWriter::new(Cursor::new(Vec::new())).unwrap();
        writer
            .write_frame(&EnergyFrame::new(0.5, -10.0, 2.5))
            .unwrap();
        writer.write_frame(&EnergyFrame::new(1.0, -9.0, 3.0)).unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        assert_eq!(bytes.len(), 8 + 2 * FRAME_SIZE);
        assert_eq!(&bytes[0..8], &2u64.to_le_bytes());
        assert_eq!(&bytes[8..16], &0.5f64.to_le_bytes());
        assert_eq!(&bytes[16..24], &(-10.0f64).to_le_bytes());
        assert_eq!(&bytes[24..32], &2.5f64.to_le_bytes());
        assert_eq!(&bytes[32..40], &(-7.5f64).to_le_bytes());
        assert_eq!(&bytes[40..48], &1.0f64.to_le_bytes());
    }

    #[test]
    fn reader_recovers_written_frames() {
        let frames = vec![EnergyFrame::new(0.0, -1.0, 0.25), EnergyFrame::new(0.1, -2.0, 0.5)];
        let mut writer = EnergyFileWriter::new(Cursor::new(Vec::new())).unwrap();
        for frame in &frames {
            writer.write_frame(frame).unwrap();
        }
        assert_eq!(writer.frames(), 2);
        let bytes = writer.finish().unwrap().into_inner();

        let read_back = read_energy_file(Cursor::new(bytes)).unwrap();
        assert_eq!(read_back, frames);
    }

    #[test]
    fn reader_reports_truncated_file() {
        let mut bytes = 3u64.to_le_bytes().to_vec();
        for value in [0.0f64, 1.0, 2.0, 3.0] {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        let result = read_energy_file(Cursor::new(bytes));
        assert!(matches!(
            result,
            Err(EnergyFileError::Truncated {
                declared: 3,
                found: 1
            })
        ));
    }

    #[test]
    fn empty_file_has_zero_frames() {
        let bytes = EnergyFileWriter::new(Cursor::new(Vec::new()))
            .unwrap()
            .finish()
            .unwrap()
            .into_inner();
        assert_eq!(bytes, 0u64.to_le_bytes().to_vec());
        assert!(read_energy_file(Cursor::new(bytes)).unwrap().is_empty());
    }

    #[test]
    fn csv_export_has_header_and_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("energies.csv");
        write_csv(&[EnergyFrame::new(0.0, -1.5, 0.5)], &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "time,potential,kinetic,total\n0.0,-1.5,0.5,-1.0\n");
    }
}
