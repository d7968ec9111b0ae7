//! Serializable summaries of page actions for the JS host

use plotboard_pages::{FetchOutcome, UploadOutcome};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchStatus {
    Applied,
    Discarded,
    Failed,
    NotIssued,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchReport {
    pub status: FetchStatus,
    pub appended: usize,
    pub complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<FetchOutcome> for FetchReport {
    fn from(outcome: FetchOutcome) -> Self {
        let (status, appended, complete, error) = match outcome {
            FetchOutcome::Applied { appended, complete } => {
                (FetchStatus::Applied, appended, complete, None)
            }
            FetchOutcome::Discarded => (FetchStatus::Discarded, 0, false, None),
            FetchOutcome::Failed(e) => (FetchStatus::Failed, 0, false, Some(e.to_string())),
            FetchOutcome::NotIssued => (FetchStatus::NotIssued, 0, false, None),
        };
        Self {
            status,
            appended,
            complete,
            error,
        }
    }
}

pub fn upload_status(outcome: UploadOutcome) -> &'static str {
    match outcome {
        UploadOutcome::NoFile => "no_file",
        UploadOutcome::Uploaded => "uploaded",
        UploadOutcome::Rejected => "rejected",
        UploadOutcome::Failed => "failed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotboard_shared::PlotboardError;

    #[test]
    fn test_fetch_report_json() {
        let report = FetchReport::from(FetchOutcome::Applied {
            appended: 4,
            complete: true,
        });
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "applied");
        assert_eq!(json["appended"], 4);
        assert_eq!(json["complete"], true);
        assert!(json.get("error").is_none());

        let failed = FetchReport::from(FetchOutcome::Failed(PlotboardError::network("down")));
        assert_eq!(failed.status, FetchStatus::Failed);
        assert!(failed.error.unwrap().contains("down"));

        let json = serde_json::to_value(FetchReport::from(FetchOutcome::NotIssued)).unwrap();
        assert_eq!(json["status"], "not_issued");
    }

    #[test]
    fn test_upload_status_names() {
        assert_eq!(upload_status(UploadOutcome::Uploaded), "uploaded");
        assert_eq!(upload_status(UploadOutcome::NoFile), "no_file");
    }
}
