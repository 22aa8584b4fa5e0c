use chrono::{DateTime, Utc};

use invoiceflow_core::{AggregateRoot, EventRecorder};
use invoiceflow_events::Event;

use crate::{Amount, InvoiceId, InvoiceNumber, SubmitterId, SupervisorId};

/// Event type of [`InvoiceSubmitted`].
pub const INVOICE_SUBMITTED: &str = "invoice_reception.invoice.submitted";

/// Aggregate root: Invoice.
///
/// Created once through [`Invoice::submit`] and immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    id: InvoiceId,
    number: InvoiceNumber,
    amount: Amount,
    submitter_id: SubmitterId,
    supervisor_id: SupervisorId,
    submitted_at: DateTime<Utc>,
    events: EventRecorder<InvoiceEvent>,
}

impl Invoice {
    /// Factory: submit a new invoice and record `InvoiceSubmitted`.
    ///
    /// Format and range checks live in the value objects; number uniqueness
    /// is checked by the caller against the repository.
    pub fn submit(
        id: InvoiceId,
        number: InvoiceNumber,
        amount: Amount,
        submitter_id: SubmitterId,
        supervisor_id: SupervisorId,
    ) -> Self {
        let submitted_at = Utc::now();
        let mut invoice = Self::reconstitute(
            id,
            number,
            amount,
            submitter_id,
            supervisor_id,
            submitted_at,
        );

        invoice
            .events
            .record(InvoiceEvent::InvoiceSubmitted(InvoiceSubmitted {
                invoice_id: invoice.id.clone(),
                invoice_number: invoice.number.clone(),
                amount: invoice.amount,
                submitter_id: invoice.submitter_id.clone(),
                supervisor_id: invoice.supervisor_id.clone(),
                occurred_at: submitted_at,
            }));

        invoice
    }

    /// Rebuild a stored invoice. Records no events.
    pub fn reconstitute(
        id: InvoiceId,
        number: InvoiceNumber,
        amount: Amount,
        submitter_id: SubmitterId,
        supervisor_id: SupervisorId,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            number,
            amount,
            submitter_id,
            supervisor_id,
            submitted_at,
            events: EventRecorder::new(),
        }
    }

    pub fn number(&self) -> &InvoiceNumber {
        &self.number
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn submitter_id(&self) -> &SubmitterId {
        &self.submitter_id
    }

    pub fn supervisor_id(&self) -> &SupervisorId {
        &self.supervisor_id
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }
}

impl AggregateRoot for Invoice {
    type Id = InvoiceId;
    type Event = InvoiceEvent;

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

/// Event: InvoiceSubmitted.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceSubmitted {
    pub invoice_id: InvoiceId,
    pub invoice_number: InvoiceNumber,
    pub amount: Amount,
    pub submitter_id: SubmitterId,
    pub supervisor_id: SupervisorId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InvoiceEvent {
    InvoiceSubmitted(InvoiceSubmitted),
}

impl Event for InvoiceEvent {
    fn event_type(&self) -> &'static str {
        match self {
            InvoiceEvent::InvoiceSubmitted(_) => INVOICE_SUBMITTED,
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn aggregate_id(&self) -> &str {
        match self {
            InvoiceEvent::InvoiceSubmitted(e) => e.invoice_id.as_str(),
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            InvoiceEvent::InvoiceSubmitted(e) => e.occurred_at,
        }
    }
}
