use chrono::{DateTime, Utc};

use invoiceflow_approval::ApprovalEvent;
use invoiceflow_events::Event;
use invoiceflow_invoicing::InvoiceEvent;

/// Every event published on the application bus.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainEvent {
    Invoice(InvoiceEvent),
    Approval(ApprovalEvent),
}

impl Event for DomainEvent {
    fn event_type(&self) -> &'static str {
        match self {
            DomainEvent::Invoice(e) => e.event_type(),
            DomainEvent::Approval(e) => e.event_type(),
        }
    }

    fn version(&self) -> u32 {
        match self {
            DomainEvent::Invoice(e) => e.version(),
            DomainEvent::Approval(e) => e.version(),
        }
    }

    fn aggregate_id(&self) -> &str {
        match self {
            DomainEvent::Invoice(e) => e.aggregate_id(),
            DomainEvent::Approval(e) => e.aggregate_id(),
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            DomainEvent::Invoice(e) => e.occurred_at(),
            DomainEvent::Approval(e) => e.occurred_at(),
        }
    }
}

impl From<InvoiceEvent> for DomainEvent {
    fn from(value: InvoiceEvent) -> Self {
        DomainEvent::Invoice(value)
    }
}

impl From<ApprovalEvent> for DomainEvent {
    fn from(value: ApprovalEvent) -> Self {
        DomainEvent::Approval(value)
    }
}
