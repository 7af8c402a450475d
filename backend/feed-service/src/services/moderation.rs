/// Moderation service - report intake and the pending/resolved/dismissed
/// state machine
use crate::models::{PostReport, ReportStatus, ReportTarget};
use crate::repository::FeedStore;
use chrono::Utc;
use krishi_common::{StoreError, StoreResult};
use std::sync::Arc;
use uuid::Uuid;

pub struct ModerationService {
    store: Arc<FeedStore>,
}

impl ModerationService {
    pub fn new(store: Arc<FeedStore>) -> Self {
        Self { store }
    }

    /// File a report against a post
    pub fn report_post(
        &self,
        post_id: Uuid,
        reporter_id: Uuid,
        reason: impl Into<String>,
    ) -> StoreResult<PostReport> {
        self.store
            .get_post(post_id)
            .ok_or_else(|| StoreError::not_found("post", post_id))?;
        self.file_report(ReportTarget::Post(post_id), reporter_id, reason.into())
    }

    /// File a report against a comment
    pub fn report_comment(
        &self,
        comment_id: Uuid,
        reporter_id: Uuid,
        reason: impl Into<String>,
    ) -> StoreResult<PostReport> {
        self.store
            .get_comment(comment_id)
            .ok_or_else(|| StoreError::not_found("comment", comment_id))?;
        self.file_report(ReportTarget::Comment(comment_id), reporter_id, reason.into())
    }

    fn file_report(
        &self,
        target: ReportTarget,
        reporter_id: Uuid,
        reason: String,
    ) -> StoreResult<PostReport> {
        if reason.trim().is_empty() {
            return Err(StoreError::InvalidInput(
                "report reason must not be empty".to_string(),
            ));
        }
        if self.store.has_pending_report(reporter_id, target.id()) {
            return Err(StoreError::InvalidInput(
                "a pending report for this target already exists".to_string(),
            ));
        }

        let report = PostReport {
            id: Uuid::new_v4(),
            target,
            reporter_id,
            reason,
            status: ReportStatus::Pending,
            created_at: Utc::now(),
            resolved_at: None,
        };

        tracing::info!(report_id = %report.id, target = %target.id(), "report filed");
        self.store.insert_report(report.clone());
        Ok(report)
    }

    /// Close a report. `decision` must be `Resolved` or `Dismissed`; the
    /// transition is one-way and a terminal report cannot be reopened or
    /// re-decided. Resolving a report against a post hides the post from
    /// feed queries.
    pub fn resolve_report(&self, report_id: Uuid, decision: ReportStatus) -> StoreResult<PostReport> {
        if !decision.is_terminal() {
            return Err(StoreError::InvalidInput(
                "decision must be resolved or dismissed".to_string(),
            ));
        }

        let result = self.store.with_report_mut(report_id, |report| {
            if report.status.is_terminal() {
                return Err(StoreError::InvalidTransition(format!(
                    "report is already {}",
                    report.status.as_str()
                )));
            }
            report.status = decision;
            report.resolved_at = Some(Utc::now());
            Ok(report.clone())
        });

        let report = match result {
            None => return Err(StoreError::not_found("report", report_id)),
            Some(report) => report?,
        };

        if decision == ReportStatus::Resolved {
            if let ReportTarget::Post(post_id) = report.target {
                self.store.with_post_mut(post_id, |post| post.hidden = true);
                tracing::info!(post_id = %post_id, "post hidden after resolved report");
            }
        }

        tracing::info!(report_id = %report_id, status = decision.as_str(), "report closed");
        Ok(report)
    }

    /// Reports still awaiting review, newest first
    pub fn pending_reports(&self) -> Vec<PostReport> {
        let mut reports = self.store.snapshot_reports();
        reports.retain(|r| !r.status.is_terminal());
        reports
    }

    pub fn all_reports(&self) -> Vec<PostReport> {
        self.store.snapshot_reports()
    }
}
