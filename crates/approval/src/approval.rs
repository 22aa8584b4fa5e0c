use chrono::{DateTime, Utc};

use invoiceflow_core::{AggregateRoot, EventRecorder};
use invoiceflow_events::Event;

use crate::{ApprovalId, ApprovalStatus, ApproverId, InvalidApproval, InvoiceRef};

pub const APPROVAL_PROCESS_STARTED: &str = "approval.process.started";
pub const INVOICE_APPROVED: &str = "approval.invoice.approved";
pub const INVOICE_REJECTED: &str = "approval.invoice.rejected";

/// Aggregate root: Approval.
///
/// Invariants:
/// - `completed_at` is set exactly when the status is terminal
/// - `rejection_reason` is set exactly when the status is `Rejected`
#[derive(Debug, Clone, PartialEq)]
pub struct Approval {
    id: ApprovalId,
    invoice_id: InvoiceRef,
    approver_id: ApproverId,
    status: ApprovalStatus,
    rejection_reason: Option<String>,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    events: EventRecorder<ApprovalEvent>,
}

impl Approval {
    /// Factory: open a pending approval for an invoice.
    pub fn start(id: ApprovalId, invoice_id: InvoiceRef, approver_id: ApproverId) -> Self {
        let started_at = Utc::now();
        let mut approval = Self {
            id,
            invoice_id,
            approver_id,
            status: ApprovalStatus::Pending,
            rejection_reason: None,
            started_at,
            completed_at: None,
            events: EventRecorder::new(),
        };

        approval
            .events
            .record(ApprovalEvent::ApprovalProcessStarted(ApprovalProcessStarted {
                approval_id: approval.id.clone(),
                invoice_id: approval.invoice_id.clone(),
                approver_id: approval.approver_id.clone(),
                occurred_at: started_at,
            }));

        approval
    }

    /// Rebuild a stored approval. Records no events.
    pub fn reconstitute(
        id: ApprovalId,
        invoice_id: InvoiceRef,
        approver_id: ApproverId,
        status: ApprovalStatus,
        rejection_reason: Option<String>,
        started_at: DateTime<Utc>,
        completed_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            invoice_id,
            approver_id,
            status,
            rejection_reason,
            started_at,
            completed_at,
            events: EventRecorder::new(),
        }
    }

    /// Transition `Pending -> Approved`.
    pub fn approve(&mut self) -> Result<(), InvalidApproval> {
        self.ensure_pending()?;

        let now = Utc::now();
        self.status = ApprovalStatus::Approved;
        self.completed_at = Some(now);

        self.events
            .record(ApprovalEvent::InvoiceApproved(InvoiceApproved {
                approval_id: self.id.clone(),
                invoice_id: self.invoice_id.clone(),
                approver_id: self.approver_id.clone(),
                occurred_at: now,
            }));
        Ok(())
    }

    /// Transition `Pending -> Rejected`. The reason is stored as given.
    pub fn reject(&mut self, reason: impl Into<String>) -> Result<(), InvalidApproval> {
        self.ensure_pending()?;

        let reason = reason.into();
        let now = Utc::now();
        self.status = ApprovalStatus::Rejected;
        self.rejection_reason = Some(reason.clone());
        self.completed_at = Some(now);

        self.events
            .record(ApprovalEvent::InvoiceRejected(InvoiceRejected {
                approval_id: self.id.clone(),
                invoice_id: self.invoice_id.clone(),
                approver_id: self.approver_id.clone(),
                reason,
                occurred_at: now,
            }));
        Ok(())
    }

    fn ensure_pending(&self) -> Result<(), InvalidApproval> {
        match self.status {
            ApprovalStatus::Pending => Ok(()),
            ApprovalStatus::Approved => Err(InvalidApproval::AlreadyApproved),
            ApprovalStatus::Rejected => Err(InvalidApproval::AlreadyRejected),
        }
    }

    pub fn invoice_id(&self) -> &InvoiceRef {
        &self.invoice_id
    }

    pub fn approver_id(&self) -> &ApproverId {
        &self.approver_id
    }

    pub fn status(&self) -> ApprovalStatus {
        self.status
    }

    pub fn rejection_reason(&self) -> Option<&str> {
        self.rejection_reason.as_deref()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }
}

impl AggregateRoot for Approval {
    type Id = ApprovalId;
    type Event = ApprovalEvent;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn recorded_events(&self) -> &[Self::Event] {
        self.events.pending()
    }

    fn release_events(&mut self) -> Vec<Self::Event> {
        self.events.release()
    }
}

/// Event: ApprovalProcessStarted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalProcessStarted {
    pub approval_id: ApprovalId,
    pub invoice_id: InvoiceRef,
    pub approver_id: ApproverId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: InvoiceApproved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceApproved {
    pub approval_id: ApprovalId,
    pub invoice_id: InvoiceRef,
    pub approver_id: ApproverId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: InvoiceRejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceRejected {
    pub approval_id: ApprovalId,
    pub invoice_id: InvoiceRef,
    pub approver_id: ApproverId,
    pub reason: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApprovalEvent {
    ApprovalProcessStarted(ApprovalProcessStarted),
    InvoiceApproved(InvoiceApproved),
    InvoiceRejected(InvoiceRejected),
}

impl ApprovalEvent {
    pub fn approval_id(&self) -> &ApprovalId {
        match self {
            ApprovalEvent::ApprovalProcessStarted(e) => &e.approval_id,
            ApprovalEvent::InvoiceApproved(e) => &e.approval_id,
            ApprovalEvent::InvoiceRejected(e) => &e.approval_id,
        }
    }

    pub fn invoice_id(&self) -> &InvoiceRef {
        match self {
            ApprovalEvent::ApprovalProcessStarted(e) => &e.invoice_id,
            ApprovalEvent::InvoiceApproved(e) => &e.invoice_id,
            ApprovalEvent::InvoiceRejected(e) => &e.invoice_id,
        }
    }
}

impl Event for ApprovalEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ApprovalEvent::ApprovalProcessStarted(_) => APPROVAL_PROCESS_STARTED,
            ApprovalEvent::InvoiceApproved(_) => INVOICE_APPROVED,
            ApprovalEvent::InvoiceRejected(_) => INVOICE_REJECTED,
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn aggregate_id(&self) -> &str {
        self.approval_id().as_str()
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            ApprovalEvent::ApprovalProcessStarted(e) => e.occurred_at,
            ApprovalEvent::InvoiceApproved(e) => e.occurred_at,
            ApprovalEvent::InvoiceRejected(e) => e.occurred_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn started() -> Approval {
        Approval::start(
            ApprovalId::new("ap-1").unwrap(),
            InvoiceRef::new("inv-1").unwrap(),
            ApproverId::new("s1").unwrap(),
        )
    }

    fn decided(status: ApprovalStatus) -> Approval {
        let mut approval = started();
        match status {
            ApprovalStatus::Pending => {}
            ApprovalStatus::Approved => approval.approve().unwrap(),
            ApprovalStatus::Rejected => approval.reject("Budget exceeded").unwrap(),
        }
        approval.release_events();
        approval
    }

    #[test]
    fn start_opens_pending_approval() {
        let approval = started();

        assert_eq!(approval.status(), ApprovalStatus::Pending);
        assert!(approval.completed_at().is_none());
        assert!(approval.rejection_reason().is_none());
        assert_eq!(approval.approver_id().as_str(), "s1");

        match approval.recorded_events() {
            [ApprovalEvent::ApprovalProcessStarted(e)] => {
                assert_eq!(e.invoice_id.as_str(), "inv-1");
                assert_eq!(e.approver_id.as_str(), "s1");
                assert_eq!(e.occurred_at, approval.started_at());
            }
            other => panic!("Expected a single ApprovalProcessStarted, got {other:?}"),
        }
    }

    #[test]
    fn empty_invoice_reference_is_rejected() {
        assert_eq!(InvoiceRef::new(""), Err(InvalidApproval::EmptyInvoiceId));
        assert_eq!(ApproverId::new(" "), Err(InvalidApproval::EmptyApproverId));
        assert_eq!(ApprovalId::new(""), Err(InvalidApproval::EmptyApprovalId));
    }

    #[test]
    fn approve_completes_and_records_invoice_approved() {
        let mut approval = decided(ApprovalStatus::Pending);

        approval.approve().unwrap();

        assert_eq!(approval.status(), ApprovalStatus::Approved);
        assert!(approval.completed_at().is_some());
        assert!(approval.rejection_reason().is_none());
        let events = approval.release_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), INVOICE_APPROVED);
        assert_eq!(events[0].invoice_id().as_str(), "inv-1");
    }

    #[test]
    fn reject_stores_reason_on_state_and_event() {
        let mut approval = decided(ApprovalStatus::Pending);

        approval.reject("Budget exceeded").unwrap();

        assert_eq!(approval.status(), ApprovalStatus::Rejected);
        assert_eq!(approval.rejection_reason(), Some("Budget exceeded"));
        assert!(approval.completed_at().is_some());
        match approval.release_events().as_slice() {
            [ApprovalEvent::InvoiceRejected(e)] => assert_eq!(e.reason, "Budget exceeded"),
            other => panic!("Expected a single InvoiceRejected, got {other:?}"),
        }
    }

    #[test]
    fn approving_twice_fails_and_leaves_state_unchanged() {
        let mut approval = decided(ApprovalStatus::Approved);
        let before = approval.clone();

        let err = approval.approve().unwrap_err();

        assert_eq!(err, InvalidApproval::AlreadyApproved);
        assert_eq!(err.to_string(), "Cannot modify an already approved invoice.");
        assert_eq!(approval, before);
        assert!(approval.recorded_events().is_empty());
    }

    #[test]
    fn terminal_states_reject_every_transition() {
        let mut approved = decided(ApprovalStatus::Approved);
        assert_eq!(approved.reject("late"), Err(InvalidApproval::AlreadyApproved));

        let mut rejected = decided(ApprovalStatus::Rejected);
        assert_eq!(rejected.approve(), Err(InvalidApproval::AlreadyRejected));
        assert_eq!(rejected.reject("again"), Err(InvalidApproval::AlreadyRejected));
        assert_eq!(rejected.rejection_reason(), Some("Budget exceeded"));
    }

    #[test]
    fn reconstitute_records_nothing() {
        let approval = Approval::reconstitute(
            ApprovalId::new("ap-9").unwrap(),
            InvoiceRef::new("inv-9").unwrap(),
            ApproverId::new("s9").unwrap(),
            ApprovalStatus::Pending,
            None,
            Utc::now(),
            None,
        );
        assert!(approval.recorded_events().is_empty());
    }

    proptest! {
        /// Only the first decision succeeds, and each success records one event.
        #[test]
        fn first_decision_wins(ops in proptest::collection::vec(any::<bool>(), 1..8)) {
            let mut approval = decided(ApprovalStatus::Pending);
            let first_is_approve = ops[0];

            for (i, approve) in ops.iter().enumerate() {
                let result = if *approve { approval.approve() } else { approval.reject("no") };
                prop_assert_eq!(result.is_ok(), i == 0);
                prop_assert_eq!(approval.release_events().len(), usize::from(i == 0));
            }

            let expected = if first_is_approve {
                ApprovalStatus::Approved
            } else {
                ApprovalStatus::Rejected
            };
            prop_assert_eq!(approval.status(), expected);
            prop_assert_eq!(approval.rejection_reason().is_some(), !first_is_approve);
            prop_assert!(approval.completed_at().is_some());
        }
    }
}
