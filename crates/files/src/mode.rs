//! Output permission derivation
//!
//! The output is never more permissive than either input: for each of the
//! user, group, and other classes it takes the numerically smaller of the two
//! inputs' permission triplets.
//!
//! ```text
//! left 0555, right 0400  ->  output 0400
//! left 0640, right 0604  ->  output 0600
//! ```

const USER: u32 = 0o700;
const GROUP: u32 = 0o070;
const OTHER: u32 = 0o007;

/// Permission bits for the output file given the two input modes.
///
/// Only the permission classes are considered; file-type and
/// setuid/setgid/sticky bits in the inputs are ignored.
pub fn derive_output_mode(left: u32, right: u32) -> u32 {
    [USER, GROUP, OTHER]
        .iter()
        .map(|&class| (left & class).min(right & class))
        .fold(0, |mode, bits| mode | bits)
}
