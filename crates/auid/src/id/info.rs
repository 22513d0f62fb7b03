use core::fmt;
use std::time::SystemTime;

use crate::{Auid, BitLayout};

/// The fields of an identifier, recovered by
/// [`AuidFactory::extract_info`](crate::AuidFactory::extract_info).
///
/// Purely informational: nothing here is persisted on its own.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AuidInfo {
    id: Auid,
    layout: BitLayout,
    ticks: u64,
    origin_id: u64,
    sequence: u64,
    timestamp: SystemTime,
}

impl AuidInfo {
    pub(crate) const fn new(
        id: Auid,
        layout: BitLayout,
        ticks: u64,
        origin_id: u64,
        sequence: u64,
        timestamp: SystemTime,
    ) -> Self {
        Self {
            id,
            layout,
            ticks,
            origin_id,
            sequence,
            timestamp,
        }
    }

    /// The identifier these fields came from.
    pub const fn id(&self) -> Auid {
        self.id
    }

    /// The raw integer of [`AuidInfo::id`].
    pub const fn value(&self) -> u64 {
        self.id.value()
    }

    /// The text form of [`AuidInfo::id`].
    pub fn as_str(&self) -> &str {
        self.id.as_str()
    }

    /// Layout used for the extraction.
    pub const fn layout(&self) -> BitLayout {
        self.layout
    }

    /// Clock ticks since the epoch, as stored in the identifier.
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    pub const fn origin_id(&self) -> u64 {
        self.origin_id
    }

    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Wall-clock time the identifier was minted at, decoded via the clock's
    /// epoch and tick size.
    pub const fn timestamp(&self) -> SystemTime {
        self.timestamp
    }
}

struct Field {
    name: &'static str,
    bits: u8,
    value: u64,
}

/// Renders the fields as a table:
///
/// ```text
/// Auid 000004Zr3GJ (4194347015) {
///         +----------------+-------------+---------------+
///         | timestamp (41) | origin (12) | sequence (10) |
///         +----------------+-------------+---------------+
///         |      1000      |     42      |       7       |
///         +----------------+-------------+---------------+
/// }
/// ```
impl fmt::Display for AuidInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn center(s: impl ToString, width: usize) -> String {
            let s = s.to_string();
            let pad = width.saturating_sub(s.len());
            let left = pad / 2;
            let right = pad - left;
            format!("{}{}{}", " ".repeat(left), s, " ".repeat(right))
        }

        fn border(f: &mut fmt::Formatter<'_>, columns: &[usize]) -> fmt::Result {
            write!(f, "        +")?;
            for &w in columns {
                write!(f, "{}+", "-".repeat(w))?;
            }
            writeln!(f)
        }

        let fields = [
            Field {
                name: "timestamp",
                bits: self.layout.timestamp_bits(),
                value: self.ticks,
            },
            Field {
                name: "origin",
                bits: self.layout.origin_bits(),
                value: self.origin_id,
            },
            Field {
                name: "sequence",
                bits: self.layout.sequence_bits(),
                value: self.sequence,
            },
        ];
        let labels: Vec<String> = fields
            .iter()
            .map(|field| format!("{} ({})", field.name, field.bits))
            .collect();
        let columns: Vec<usize> = fields
            .iter()
            .zip(&labels)
            .map(|(field, label)| label.len().max(field.value.to_string().len()) + 2)
            .collect();

        writeln!(f, "Auid {} ({}) {{", self.id, self.id.value())?;
        border(f, &columns)?;
        write!(f, "        |")?;
        for (label, &w) in labels.iter().zip(&columns) {
            write!(f, "{}|", center(label, w))?;
        }
        writeln!(f)?;
        border(f, &columns)?;
        write!(f, "        |")?;
        for (field, &w) in fields.iter().zip(&columns) {
            write!(f, "{}|", center(field.value, w))?;
        }
        writeln!(f)?;
        border(f, &columns)?;
        write!(f, "}}")
    }
}
