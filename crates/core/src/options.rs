//! Merge policy: the raw flags bitset and its validated form
//!
//! Callers speak [`MergeFlags`], a small bitset mirroring the command-line
//! switches. The engine only ever sees [`MergeOptions`], produced by
//! `MergeOptions::try_from(flags)`, which is where an unusable combination
//! (both or neither of the record-output policies) is rejected.

use crate::error::{MergeError, Result};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Raw policy bitset, fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MergeFlags(u32);

impl MergeFlags {
    /// Emit every record, duplicates included (`-a`)
    pub const ALL_RECORDS: MergeFlags = MergeFlags(1 << 0);
    /// Emit one copy of each run of equal records (`-u`)
    pub const UNIQUE_RECORDS: MergeFlags = MergeFlags(1 << 1);
    /// Compare records ignoring ASCII case (`-i`)
    pub const IGNORE_CASE: MergeFlags = MergeFlags(1 << 2);
    /// Abort on the first out-of-order record (`-t`)
    pub const CHECK_SORTED: MergeFlags = MergeFlags(1 << 3);
    /// Report the number of records written (`-d`)
    pub const RETURN_COUNT: MergeFlags = MergeFlags(1 << 4);

    const KNOWN: u32 = (1 << 5) - 1;

    /// No flags set
    pub const fn empty() -> Self {
        MergeFlags(0)
    }

    /// Raw bit value
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Build from raw bits, rejecting unknown bits
    pub fn from_bits(bits: u32) -> Option<Self> {
        if bits & !Self::KNOWN != 0 {
            None
        } else {
            Some(MergeFlags(bits))
        }
    }

    /// True if every bit of `other` is set in `self`
    pub const fn contains(self, other: MergeFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for MergeFlags {
    type Output = MergeFlags;

    fn bitor(self, rhs: MergeFlags) -> MergeFlags {
        MergeFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for MergeFlags {
    fn bitor_assign(&mut self, rhs: MergeFlags) {
        self.0 |= rhs.0;
    }
}

/// Which records reach the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputPolicy {
    /// Every record, duplicates included
    All,
    /// Consecutive equal records collapse to the first one
    Unique,
}

/// How two records are ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasePolicy {
    /// Plain byte order
    Sensitive,
    /// Byte order after folding ASCII letters to lower case
    Insensitive,
}

/// What happens to a record smaller than the last one emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderPolicy {
    /// Abort the run with an order violation
    Strict,
    /// Drop the record and keep going
    SkipDisordered,
}

/// Validated merge policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOptions {
    /// Record-output policy
    pub output: OutputPolicy,
    /// Comparison policy
    pub case: CasePolicy,
    /// Disorder policy
    pub order: OrderPolicy,
    /// Whether the caller wants the record count back
    pub report_count: bool,
}

impl MergeOptions {
    /// Emit-all, case-sensitive, skip disordered, no count
    pub fn all() -> Self {
        MergeOptions {
            output: OutputPolicy::All,
            case: CasePolicy::Sensitive,
            order: OrderPolicy::SkipDisordered,
            report_count: false,
        }
    }

    /// Emit-unique, case-sensitive, skip disordered, no count
    pub fn unique() -> Self {
        MergeOptions {
            output: OutputPolicy::Unique,
            ..Self::all()
        }
    }

    /// Switch to case-insensitive comparison
    pub fn ignore_case(mut self) -> Self {
        self.case = CasePolicy::Insensitive;
        self
    }

    /// Switch to strict order checking
    pub fn strict(mut self) -> Self {
        self.order = OrderPolicy::Strict;
        self
    }

    /// Ask for the record count
    pub fn with_count(mut self) -> Self {
        self.report_count = true;
        self
    }

    /// Equivalent flags bitset
    pub fn flags(&self) -> MergeFlags {
        let mut flags = match self.output {
            OutputPolicy::All => MergeFlags::ALL_RECORDS,
            OutputPolicy::Unique => MergeFlags::UNIQUE_RECORDS,
        };
        if self.case == CasePolicy::Insensitive {
            flags |= MergeFlags::IGNORE_CASE;
        }
        if self.order == OrderPolicy::Strict {
            flags |= MergeFlags::CHECK_SORTED;
        }
        if self.report_count {
            flags |= MergeFlags::RETURN_COUNT;
        }
        flags
    }
}

impl TryFrom<MergeFlags> for MergeOptions {
    type Error = MergeError;

    fn try_from(flags: MergeFlags) -> Result<Self> {
        let all = flags.contains(MergeFlags::ALL_RECORDS);
        let unique = flags.contains(MergeFlags::UNIQUE_RECORDS);
        let output = match (all, unique) {
            (true, false) => OutputPolicy::All,
            (false, true) => OutputPolicy::Unique,
            (true, true) => {
                return Err(MergeError::InvalidFlags(
                    "emit-all and emit-unique are mutually exclusive".to_string(),
                ))
            }
            (false, false) => {
                return Err(MergeError::InvalidFlags(
                    "one of emit-all or emit-unique is required".to_string(),
                ))
            }
        };

        Ok(MergeOptions {
            output,
            case: if flags.contains(MergeFlags::IGNORE_CASE) {
                CasePolicy::Insensitive
            } else {
                CasePolicy::Sensitive
            },
            order: if flags.contains(MergeFlags::CHECK_SORTED) {
                OrderPolicy::Strict
            } else {
                OrderPolicy::SkipDisordered
            },
            report_count: flags.contains(MergeFlags::RETURN_COUNT),
        })
    }
}

impl TryFrom<u32> for MergeOptions {
    type Error = MergeError;

    fn try_from(bits: u32) -> Result<Self> {
        let flags = MergeFlags::from_bits(bits)
            .ok_or_else(|| MergeError::InvalidFlags(format!("unknown flag bits {:#x}", bits)))?;
        MergeOptions::try_from(flags)
    }
}

impl fmt::Display for MergeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let output = match self.output {
            OutputPolicy::All => "all",
            OutputPolicy::Unique => "unique",
        };
        let case = match self.case {
            CasePolicy::Sensitive => "case-sensitive",
            CasePolicy::Insensitive => "case-insensitive",
        };
        let order = match self.order {
            OrderPolicy::Strict => "strict",
            OrderPolicy::SkipDisordered => "skip-disordered",
        };
        write!(f, "{}/{}/{}", output, case, order)
    }
}
