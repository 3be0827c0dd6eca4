//! Access requests: review queue for permission and role escalations

use chrono::Utc;

use crate::activity::Changes;
use crate::console::{matches_term, Console};
use crate::error::{Error, Result};
use crate::models::{AccessRequest, AuditAction, AuditEntity, RequestFilter, RequestStatus};

impl Console<'_> {
    pub fn access_requests(&self) -> &[AccessRequest] {
        &self.access_requests
    }

    pub fn access_request(&self, id: &str) -> Result<&AccessRequest> {
        self.access_requests
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| Error::not_found("access request", id))
    }

    /// Requests matching the status filter whose requester name, email or
    /// reason contains `term`
    pub fn filter_access_requests(&self, filter: RequestFilter, term: &str) -> Vec<&AccessRequest> {
        self.access_requests
            .iter()
            .filter(|r| filter.matches(r.status))
            .filter(|r| {
                let by_user = self
                    .users
                    .iter()
                    .find(|u| u.id == r.user_id)
                    .is_some_and(|u| matches_term(&u.name, term) || matches_term(&u.email, term));
                by_user || matches_term(&r.reason, term)
            })
            .collect()
    }

    pub fn pending_requests(&self) -> Vec<&AccessRequest> {
        self.filter_access_requests(RequestFilter::Only(RequestStatus::Pending), "")
    }

    /// Approve a pending request; the grant is audited as assigned by `reviewer`
    pub fn approve_request(&mut self, id: &str, reviewer: &str, comment: Option<&str>) -> Result<&AccessRequest> {
        let comment = comment.map(str::trim).filter(|c| !c.is_empty());
        let idx = self.review(id, reviewer, RequestStatus::Approved, comment)?;
        let req = &self.access_requests[idx];
        let changes = Changes::default()
            .new_value("permissions", &req.requested_permissions)
            .new_value("roles", &req.requested_roles);
        let user_id = req.user_id.clone();
        self.record_by(
            reviewer,
            AuditEntity::Permission,
            &user_id,
            AuditAction::Assign,
            changes,
            format!("Access request {id} approved"),
        );
        Ok(&self.access_requests[idx])
    }

    /// Reject with a mandatory, non-blank reason
    pub fn reject_request(&mut self, id: &str, reviewer: &str, comment: &str) -> Result<&AccessRequest> {
        let comment = comment.trim();
        if comment.is_empty() {
            return Err(Error::MissingComment);
        }
        let idx = self.review(id, reviewer, RequestStatus::Rejected, Some(comment))?;
        Ok(&self.access_requests[idx])
    }

    fn review(
        &mut self,
        id: &str,
        reviewer: &str,
        status: RequestStatus,
        comment: Option<&str>,
    ) -> Result<usize> {
        let idx = self
            .access_requests
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| Error::not_found("access request", id))?;
        let req = &mut self.access_requests[idx];
        if req.status != RequestStatus::Pending {
            return Err(Error::AlreadyReviewed(id.to_string()));
        }
        req.status = status;
        req.reviewed_by = Some(reviewer.to_string());
        req.reviewed_at = Some(Utc::now());
        req.comments = comment.map(str::to_string);
        tracing::info!(id, reviewer, ?status, "access request reviewed");
        Ok(idx)
    }
}
