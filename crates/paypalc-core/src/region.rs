//! Cursor-driven extraction of delimited regions from the raw catalog page.
//!
//! The scanner only ever moves forward. A region never spans a top-level
//! section heading: if one sits between the cursor and the end of the
//! candidate region, the lookup fails and the cursor stays where it was.

/// Literal that opens every top-level section of the catalog.
pub const SECTION_BOUNDARY: &str = "<h2 ";

/// Start/end literal pair delimiting one kind of region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Markers {
    pub start: &'static str,
    pub end: &'static str,
}

impl Markers {
    pub const GROUP_HEADING: Markers = Markers {
        start: SECTION_BOUNDARY,
        end: "</h2>",
    };
    pub const PARAGRAPH: Markers = Markers {
        start: "<p>",
        end: "</p>",
    };
    pub const VERSION_HEADING: Markers = Markers {
        start: "<h3 ",
        end: "</h3>",
    };
    pub const TABLE_BODY: Markers = Markers {
        start: "<tbody>",
        end: "</tbody>",
    };
}

/// Closed span from the start marker through the end of the end marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

/// Locates the next `start`..`end` region at or after `cursor`.
///
/// On success the cursor is moved just past the end marker. `None` means
/// there is no further region in the current section, which callers use to
/// stop their extraction loops.
pub fn find_region<'a>(
    buffer: &'a str,
    start: &str,
    end: &str,
    cursor: &mut usize,
) -> Option<Region<'a>> {
    let rest = buffer.get(*cursor..)?;
    let region_start = *cursor + rest.find(start)?;
    let region_end = region_start + buffer[region_start..].find(end)? + end.len();

    if crosses_boundary(buffer, *cursor, region_start, region_end) {
        return None;
    }

    *cursor = region_end;
    Some(Region {
        text: &buffer[region_start..region_end],
        start: region_start,
        end: region_end,
    })
}

fn crosses_boundary(buffer: &str, cursor: usize, region_start: usize, region_end: usize) -> bool {
    let mut from = cursor;
    while let Some(offset) = buffer[from..region_end].find(SECTION_BOUNDARY) {
        let boundary = from + offset;
        // The region may itself be a section heading.
        if boundary != region_start {
            return true;
        }
        from = boundary + 1;
    }
    false
}

/// Owns the cursor for one pass over a document.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    buffer: &'a str,
    cursor: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(buffer: &'a str) -> Self {
        Self { buffer, cursor: 0 }
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Unscanned tail of the buffer.
    pub fn remaining(&self) -> &'a str {
        self.buffer.get(self.cursor..).unwrap_or_default()
    }

    pub fn next_region(&mut self, markers: Markers) -> Option<Region<'a>> {
        find_region(self.buffer, markers.start, markers.end, &mut self.cursor)
    }
}
