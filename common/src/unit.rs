//! Marker types.

/// Marker type describing a start of something (a rental, for example).
#[derive(Clone, Copy, Debug)]
pub struct Start;

/// Marker type describing an end of something.
#[derive(Clone, Copy, Debug)]
pub struct End;
