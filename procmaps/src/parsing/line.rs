//! Single-line parser for `/proc/<pid>/maps`

use procmaps_common::{Device, Permissions, RegionType};

use super::digits::{parse_dec, parse_hex};
use crate::domain::MapsError;
use crate::mapping::Region;

/// Address range, perms, offset, dev, inode, pathname
const FIELD_COUNT: usize = 6;

/// Parse one non-empty maps line into a [`Region`].
///
/// The returned region is unclassified ([`RegionType::Unknown`]); the
/// mapping builder assigns the real type. `line_no` is 1-based and only used
/// for error reporting.
///
/// The pathname is everything after the fifth space. The kernel pads the
/// inode column with spaces before the pathname, so leading spaces are
/// stripped; spaces inside the pathname are kept.
///
/// # Errors
/// Returns [`MapsError::MalformedLine`] if the line has fewer than six
/// space-separated fields, the range has no `-`, the device has no `:`, or
/// the range starts after it ends.
pub fn parse_line(line: &[u8], line_no: usize) -> Result<Region, MapsError> {
    let malformed = || MapsError::MalformedLine {
        line_no,
        line: String::from_utf8_lossy(line).into_owned(),
    };

    let fields: Vec<&[u8]> = line.splitn(FIELD_COUNT, |&b| b == b' ').collect();
    let &[range, perms, offset, dev, inode, path] = fields.as_slice() else {
        return Err(malformed());
    };

    let (start, end) = split_pair(range, b'-').ok_or_else(malformed)?;
    let (start, end) = (parse_hex(start), parse_hex(end));
    if start > end {
        return Err(malformed());
    }

    let (major, minor) = split_pair(dev, b':').ok_or_else(malformed)?;

    let path = match path.iter().position(|&b| b != b' ') {
        Some(first) => String::from_utf8_lossy(&path[first..]).into_owned(),
        None => String::new(),
    };

    Ok(Region {
        start,
        end,
        permissions: Permissions::from_flags(perms),
        offset: parse_hex(offset),
        device: Device { major: parse_dec(major), minor: parse_dec(minor) },
        inode: parse_dec(inode),
        path,
        region_type: RegionType::Unknown,
    })
}

/// Split `field` at the first `sep`.
fn split_pair(field: &[u8], sep: u8) -> Option<(&[u8], &[u8])> {
    let at = field.iter().position(|&b| b == sep)?;
    Some((&field[..at], &field[at + 1..]))
}
