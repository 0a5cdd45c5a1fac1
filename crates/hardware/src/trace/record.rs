//! Trace record classification.
//!
//! Each trace line is sorted into exactly one [`LineClass`]. The decision table:
//!
//! | Leading code | Rest of line           | Class           |
//! |--------------|------------------------|-----------------|
//! | (none)       | whitespace only        | `Blank`         |
//! | `I`          | anything               | `Instruction`   |
//! | `L`/`S`/`M`  | `<hex-addr>,<size>`    | `Data`          |
//! | `L`/`S`/`M`  | anything else          | `Malformed`     |
//! | other        | anything               | `Malformed`     |
//!
//! Only `Data` lines reach the cache; the others are skipped.

use std::fmt;

/// Kind of data access named by a trace record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `L`: data load, one access.
    Load,
    /// `S`: data store, one access.
    Store,
    /// `M`: data modify, a load followed by a store to the same address.
    Modify,
}

impl Operation {
    /// Maps a record code to a data operation; `None` for `I` and unknown codes.
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'L' => Some(Self::Load),
            'S' => Some(Self::Store),
            'M' => Some(Self::Modify),
            _ => None,
        }
    }

    /// The single-letter trace code.
    pub const fn code(self) -> char {
        match self {
            Self::Load => 'L',
            Self::Store => 'S',
            Self::Modify => 'M',
        }
    }

    /// Number of cache accesses the operation performs.
    pub const fn access_count(self) -> usize {
        match self {
            Self::Load | Self::Store => 1,
            Self::Modify => 2,
        }
    }
}

/// A data-access record: operation, address and access size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    /// Load, store or modify.
    pub op: Operation,
    /// Address of the first byte accessed.
    pub addr: u64,
    /// Bytes accessed; carried for display only.
    pub size: u32,
}

impl fmt::Display for TraceRecord {
    /// Echoes the record as `L 7ff0005c8,8`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:x},{}", self.op.code(), self.addr, self.size)
    }
}

/// Classification of one trace line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineClass {
    /// A load, store or modify to simulate.
    Data(TraceRecord),
    /// An instruction fetch; not simulated.
    Instruction,
    /// Empty or whitespace-only line.
    Blank,
    /// Anything that does not match the record shape.
    Malformed,
}

/// Classifies a single trace line (without its line terminator).
///
/// Leading whitespace is ignored, so both `L 10,4` and valgrind's indented
/// ` L 10,4` are accepted. The address is hexadecimal with an optional `0x`
/// prefix; the size is decimal.
///
/// ```
/// use csim_core::trace::{classify_line, LineClass, Operation, TraceRecord};
///
/// let record = TraceRecord { op: Operation::Modify, addr: 0x7ff000388, size: 8 };
/// assert_eq!(classify_line(" M 7ff000388,8"), LineClass::Data(record));
/// assert_eq!(classify_line("I 0400d7d4,8"), LineClass::Instruction);
/// assert_eq!(classify_line(" X 10,1"), LineClass::Malformed);
/// ```
pub fn classify_line(line: &str) -> LineClass {
    let line = line.trim();
    let mut chars = line.chars();
    let Some(code) = chars.next() else {
        return LineClass::Blank;
    };
    if code == 'I' {
        return LineClass::Instruction;
    }
    let Some(op) = Operation::from_code(code) else {
        return LineClass::Malformed;
    };

    let rest = chars.as_str();
    if !rest.starts_with(char::is_whitespace) {
        return LineClass::Malformed;
    }
    parse_operands(rest.trim_start()).map_or(LineClass::Malformed, |(addr, size)| {
        LineClass::Data(TraceRecord { op, addr, size })
    })
}

/// Parses `<hex-addr>,<size>`.
fn parse_operands(operands: &str) -> Option<(u64, u32)> {
    let (addr, size) = operands.split_once(',')?;
    let addr = addr.trim();
    let digits = addr
        .strip_prefix("0x")
        .or_else(|| addr.strip_prefix("0X"))
        .unwrap_or(addr);
    // from_str_radix tolerates a sign; an address never has one.
    if digits.starts_with(['+', '-']) {
        return None;
    }
    let addr = u64::from_str_radix(digits, 16).ok()?;
    let size = size.trim().parse().ok()?;
    Some((addr, size))
}
