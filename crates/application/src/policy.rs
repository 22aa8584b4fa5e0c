//! Policy: when an invoice is submitted, start its approval process.
//!
//! This handler is the only place where the invoice reception and approval
//! contexts meet. The supervisor named on the invoice becomes the approver.

use anyhow::Context;
use async_trait::async_trait;

use invoiceflow_core::AggregateRoot;
use invoiceflow_events::{EventEnvelope, EventHandler, EventPublisher};
use invoiceflow_invoicing::InvoiceEvent;

use crate::{DomainEvent, StartApprovalData, StartApprovalProcessAction};

pub struct StartApprovalOnInvoiceSubmitted {
    start_approval: StartApprovalProcessAction,
}

impl StartApprovalOnInvoiceSubmitted {
    pub fn new(start_approval: StartApprovalProcessAction) -> Self {
        Self { start_approval }
    }
}

#[async_trait]
impl EventHandler<DomainEvent> for StartApprovalOnInvoiceSubmitted {
    fn name(&self) -> &'static str {
        "start_approval_on_invoice_submitted"
    }

    async fn handle(
        &self,
        envelope: &EventEnvelope<DomainEvent>,
        publisher: &dyn EventPublisher<DomainEvent>,
    ) -> anyhow::Result<()> {
        let DomainEvent::Invoice(InvoiceEvent::InvoiceSubmitted(event)) = envelope.payload() else {
            return Ok(());
        };

        tracing::info!(
            invoice_id = %event.invoice_id,
            invoice_number = %event.invoice_number,
            amount = %event.amount,
            submitter_id = %event.submitter_id,
            supervisor_id = %event.supervisor_id,
            occurred_at = %event.occurred_at.format("%Y-%m-%d %H:%M:%S"),
            "policy triggered: starting approval process for submitted invoice"
        );

        let data = StartApprovalData {
            invoice_id: event.invoice_id.to_string(),
            approver_id: event.supervisor_id.to_string(),
        };

        let approval = self
            .start_approval
            .execute(data, publisher)
            .await
            .with_context(|| {
                format!("starting approval process for invoice {}", event.invoice_id)
            })?;

        tracing::info!(
            approval_id = %approval.id(),
            invoice_id = %event.invoice_id,
            approver_id = %event.supervisor_id,
            status = %approval.status(),
            "approval process started successfully"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use invoiceflow_approval::{ApprovalRepository, ApprovalStatus, InvoiceRef};
    use invoiceflow_events::{InProcessEventBus, RecordingHandler};
    use invoiceflow_infra::InMemoryApprovalRepository;
    use invoiceflow_invoicing::{
        Amount, INVOICE_SUBMITTED, InvoiceId, InvoiceNumber, InvoiceSubmitted, SubmitterId,
        SupervisorId,
    };

    use super::*;

    fn submitted(invoice_id: &str) -> DomainEvent {
        DomainEvent::Invoice(InvoiceEvent::InvoiceSubmitted(InvoiceSubmitted {
            invoice_id: InvoiceId::new(invoice_id).unwrap(),
            invoice_number: InvoiceNumber::new("INV-2025-0042").unwrap(),
            amount: Amount::new(99.99).unwrap(),
            submitter_id: SubmitterId::new("u1").unwrap(),
            supervisor_id: SupervisorId::new("s1").unwrap(),
            occurred_at: chrono::Utc::now(),
        }))
    }

    #[tokio::test]
    async fn invoice_submitted_starts_pending_approval_for_supervisor() {
        let approvals = Arc::new(InMemoryApprovalRepository::new());
        let recorder: Arc<RecordingHandler<DomainEvent>> = Arc::new(RecordingHandler::new());
        let policy = StartApprovalOnInvoiceSubmitted::new(StartApprovalProcessAction::new(
            approvals.clone(),
        ));
        let bus = InProcessEventBus::<DomainEvent>::builder()
            .subscribe_all(recorder.clone())
            .subscribe(INVOICE_SUBMITTED, Arc::new(policy))
            .build();

        bus.publish(submitted("inv-42")).await.unwrap();

        let approval = approvals
            .find_by_invoice_id(&InvoiceRef::new("inv-42").unwrap())
            .await
            .unwrap()
            .expect("approval should exist");
        assert_eq!(approval.approver_id().as_str(), "s1");
        assert_eq!(approval.status(), ApprovalStatus::Pending);
        assert_eq!(
            recorder.event_types(),
            vec![
                "invoice_reception.invoice.submitted".to_string(),
                "approval.process.started".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn ignores_events_it_does_not_handle() {
        let approvals = Arc::new(InMemoryApprovalRepository::new());
        let policy = StartApprovalOnInvoiceSubmitted::new(StartApprovalProcessAction::new(
            approvals.clone(),
        ));
        let bus = InProcessEventBus::<DomainEvent>::builder()
            .subscribe_all(Arc::new(policy))
            .build();

        let started = invoiceflow_approval::Approval::start(
            approvals.next_identity(),
            InvoiceRef::new("inv-1").unwrap(),
            invoiceflow_approval::ApproverId::new("s1").unwrap(),
        );
        for event in started.recorded_events().iter().cloned() {
            bus.publish(DomainEvent::Approval(event)).await.unwrap();
        }

        assert!(approvals.all().is_empty());
    }
}
