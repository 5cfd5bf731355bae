//! Binary schedule exchange format.
//!
//! Ships a [`Schedule`] to a worker and back. All fields are 32-bit signed
//! integers in native byte order, so the format is only meant for peers on
//! the same host:
//!
//! ```text
//! processor_count  i32
//! task_count       i32
//! durations        i32 × task_count
//! per processor:
//!     len          i32
//!     task ids     i32 × len
//! ```
//!
//! A short read or write surfaces as [`ExchangeError::Io`]. Durations must
//! be positive. A decoded schedule that breaks the partition invariant is
//! rejected, never repaired.

use std::io::{Read, Write};

use super::solution::Schedule;
use crate::error::ExchangeError;

/// Upper bound on capacity reserved from untrusted length fields.
const PREALLOC_LIMIT: usize = 1 << 16;

/// Writes `schedule` to `writer`.
pub fn encode<W: Write>(schedule: &Schedule, writer: &mut W) -> Result<(), ExchangeError> {
    write_len(writer, "processor count", schedule.processor_count())?;
    write_len(writer, "task count", schedule.task_count())?;
    for &duration in schedule.durations() {
        write_i32(writer, to_wire("duration", u64::from(duration))?)?;
    }
    for tasks in schedule.processors() {
        write_len(writer, "sequence length", tasks.len())?;
        for &task in tasks {
            write_len(writer, "task id", task)?;
        }
    }
    Ok(())
}

/// Reads one schedule from `reader`.
pub fn decode<R: Read>(reader: &mut R) -> Result<Schedule, ExchangeError> {
    let processor_count = read_len(reader, "processor count")?;
    let task_count = read_len(reader, "task count")?;

    let mut durations = Vec::with_capacity(task_count.min(PREALLOC_LIMIT));
    for task in 0..task_count {
        let value = read_i32(reader)?;
        let duration = u32::try_from(value).map_err(|_| ExchangeError::NegativeValue {
            field: "duration",
            value,
        })?;
        if duration == 0 {
            return Err(ExchangeError::ZeroDuration { task });
        }
        durations.push(duration);
    }

    let mut processors = Vec::with_capacity(processor_count.min(PREALLOC_LIMIT));
    for _ in 0..processor_count {
        let len = read_len(reader, "sequence length")?;
        let mut tasks = Vec::with_capacity(len.min(task_count).min(PREALLOC_LIMIT));
        for _ in 0..len {
            tasks.push(read_len(reader, "task id")?);
        }
        processors.push(tasks);
    }

    Ok(Schedule::from_assignment(durations, processors)?)
}

/// Encodes `schedule` into a fresh buffer.
pub fn to_bytes(schedule: &Schedule) -> Result<Vec<u8>, ExchangeError> {
    let words = 2 + schedule.task_count() * 2 + schedule.processor_count();
    let mut buf = Vec::with_capacity(words * 4);
    encode(schedule, &mut buf)?;
    Ok(buf)
}

/// Decodes a buffer that holds exactly one encoded schedule.
pub fn from_bytes(mut bytes: &[u8]) -> Result<Schedule, ExchangeError> {
    let schedule = decode(&mut bytes)?;
    if !bytes.is_empty() {
        return Err(ExchangeError::TrailingBytes(bytes.len()));
    }
    Ok(schedule)
}

fn to_wire(field: &'static str, value: u64) -> Result<i32, ExchangeError> {
    i32::try_from(value).map_err(|_| ExchangeError::ValueOutOfRange { field, value })
}

fn write_len<W: Write>(writer: &mut W, field: &'static str, value: usize) -> Result<(), ExchangeError> {
    write_i32(writer, to_wire(field, value as u64)?)
}

fn write_i32<W: Write>(writer: &mut W, value: i32) -> Result<(), ExchangeError> {
    writer.write_all(&value.to_ne_bytes())?;
    Ok(())
}

fn read_i32<R: Read>(reader: &mut R) -> Result<i32, ExchangeError> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(i32::from_ne_bytes(buf))
}

fn read_len<R: Read>(reader: &mut R, field: &'static str) -> Result<usize, ExchangeError> {
    let value = read_i32(reader)?;
    usize::try_from(value).map_err(|_| ExchangeError::NegativeValue { field, value })
}
