//! Profile header report and download tallies.

use std::path::PathBuf;

use serde_json::{json, Value};

use crate::domain::Profile;
use crate::report::{Line, Operation, Render};

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileReport {
    pub profile: Profile,
}

pub fn profile_report(profile: Profile) -> ProfileReport {
    ProfileReport { profile }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

impl Render for ProfileReport {
    fn operation(&self) -> Operation {
        Operation::Info
    }

    fn is_empty(&self) -> bool {
        self.profile.id.is_none() && self.profile.username.is_none()
    }

    fn console_lines(&self) -> Vec<Line> {
        let p = &self.profile;
        let mut lines = vec![
            Line::header(format!(
                "[ID] {}",
                p.id.map(|id| id.to_string()).unwrap_or_default()
            )),
            Line::plain(format!("[FULL NAME] {}", p.full_name)),
            Line::plain(format!("[BIOGRAPHY] {}", p.biography)),
            Line::plain(format!("[FOLLOWED] {}", p.follower_count)),
            Line::plain(format!("[FOLLOW] {}", p.following_count)),
            Line::plain(format!("[MEDIA] {}", p.media_count)),
            Line::plain(format!("[BUSINESS ACCOUNT] {}", yes_no(p.is_business))),
            Line::plain(format!("[VERIFIED ACCOUNT] {}", yes_no(p.is_verified))),
            Line::plain(format!("[PRIVATE ACCOUNT] {}", yes_no(p.is_private))),
        ];

        let optional = [
            ("USERNAME", &p.username),
            ("CATEGORY", &p.category),
            ("EXTERNAL URL", &p.external_url),
            ("PUBLIC EMAIL", &p.public_email),
            ("PHONE", &p.contact_phone_number),
            ("HD PROFILE PIC", &p.hd_profile_pic_url),
        ];
        for (label, value) in optional {
            if let Some(value) = value {
                lines.push(Line::plain(format!("[{}] {}", label, value)));
            }
        }
        lines
    }

    fn dump(&self) -> Value {
        serde_json::to_value(&self.profile).unwrap_or(Value::Null)
    }
}

/// Media files retrieved by a download operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadSummary {
    pub operation: Operation,
    pub files: Vec<PathBuf>,
}

pub fn download_summary(operation: Operation, files: Vec<PathBuf>) -> DownloadSummary {
    DownloadSummary { operation, files }
}

impl Render for DownloadSummary {
    fn operation(&self) -> Operation {
        self.operation
    }

    fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn console_lines(&self) -> Vec<Line> {
        let text = match self.operation {
            Operation::Propic => "Target propic saved in output folder".to_string(),
            Operation::Stories => format!("{} target stories saved in output folder", self.files.len()),
            _ => format!("Downloaded {} photos", self.files.len()),
        };
        vec![Line::highlight(text)]
    }

    fn dump(&self) -> Value {
        let files: Vec<String> = self.files.iter().map(|p| p.display().to_string()).collect();
        json!({ "files": files })
    }
}
