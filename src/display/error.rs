/*
 *  display/error.rs
 *
 *  LyWatch - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Unified error type for display surface operations
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use std::fmt;
use std::error::Error;

/// Unified error type for all display surface operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayError {
    /// Hardware (or emulated panel) initialization failed
    InitializationFailed(String),

    /// Operation issued before `init()` completed
    NotInitialized,

    /// Invalid rotation angle
    InvalidRotation(u16),

    /// Drawing operation failed
    DrawingError(String),

    /// Framebuffer snapshot could not be written
    SnapshotFailed(String),

    /// Generic error with message
    Other(String),
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::InitializationFailed(msg) =>
                write!(f, "Display initialization failed: {}", msg),
            DisplayError::NotInitialized =>
                write!(f, "Display used before initialization"),
            DisplayError::InvalidRotation(degrees) =>
                write!(f, "Invalid rotation angle: {} (must be 0, 90, 180, or 270)", degrees),
            DisplayError::DrawingError(msg) =>
                write!(f, "Drawing error: {}", msg),
            DisplayError::SnapshotFailed(msg) =>
                write!(f, "Snapshot failed: {}", msg),
            DisplayError::Other(msg) =>
                write!(f, "{}", msg),
        }
    }
}

impl Error for DisplayError {}

impl From<std::io::Error> for DisplayError {
    fn from(err: std::io::Error) -> Self {
        DisplayError::SnapshotFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_message() {
        let msg = DisplayError::InvalidRotation(45).to_string();
        assert!(msg.contains("45"));
        assert!(msg.contains("270"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: DisplayError = io.into();
        assert!(matches!(err, DisplayError::SnapshotFailed(ref m) if m.contains("read-only")));
    }
}
