// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to write '{report}' report to {}", .destination.display())]
    WriteFailed {
        report: String,
        destination: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize '{report}' report: {source}")]
    Serialize {
        report: String,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_failed_names_report_and_destination() {
        let error = ReportError::WriteFailed {
            report: "json".to_string(),
            destination: PathBuf::from("/tmp/out/build.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };

        assert_eq!(
            error.to_string(),
            "Failed to write 'json' report to /tmp/out/build.json"
        );
        assert!(std::error::Error::source(&error).is_some());
    }
}
