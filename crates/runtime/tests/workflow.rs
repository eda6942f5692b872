//! End-to-end exchanges over scripted models and an observed store.

use async_trait::async_trait;
use chrono::NaiveDate;
use llm::{ScriptedModel, ScriptedReply};
use parking_lot::Mutex;
use encore_runtime::{Business, Intent, SmsRequest, Workflow};
use std::sync::Arc;
use store::{
    Contact, ContactUpdate, ExchangeRecord, FollowUpTask, InMemoryStore, NewContact,
    StaticLinkIssuer, Store,
};

/// Store decorator that logs every operation and can fail the audit write.
#[derive(Clone)]
struct ObservedStore {
    inner: InMemoryStore,
    ops: Arc<Mutex<Vec<String>>>,
    fail_exchanges: Arc<Mutex<bool>>,
}

impl ObservedStore {
    fn new(inner: InMemoryStore) -> Self {
        Self {
            inner,
            ops: Arc::new(Mutex::new(Vec::new())),
            fail_exchanges: Arc::new(Mutex::new(false)),
        }
    }

    fn ops(&self) -> Vec<String> {
        self.ops.lock().clone()
    }

    fn fail_exchanges(&self) {
        *self.fail_exchanges.lock() = true;
    }

    fn log(&self, op: &str) {
        self.ops.lock().push(op.to_owned());
    }
}

#[async_trait]
impl Store for ObservedStore {
    async fn confirmed_booking_on(&self, date: NaiveDate) -> anyhow::Result<bool> {
        self.log("confirmed_booking_on");
        self.inner.confirmed_booking_on(date).await
    }

    async fn find_contact(&self, phone: &str) -> anyhow::Result<Option<Contact>> {
        self.log("find_contact");
        self.inner.find_contact(phone).await
    }

    async fn create_contact(&self, new: NewContact) -> anyhow::Result<Contact> {
        self.log("create_contact");
        self.inner.create_contact(new).await
    }

    async fn update_contact(&self, phone: &str, update: &ContactUpdate) -> anyhow::Result<bool> {
        self.log("update_contact");
        self.inner.update_contact(phone, update).await
    }

    async fn create_follow_up(&self, task: FollowUpTask) -> anyhow::Result<()> {
        self.log("create_follow_up");
        self.inner.create_follow_up(task).await
    }

    async fn record_exchange(&self, record: ExchangeRecord) -> anyhow::Result<()> {
        self.log("record_exchange");
        if *self.fail_exchanges.lock() {
            anyhow::bail!("audit table unreachable");
        }
        self.inner.record_exchange(record).await
    }
}

fn workflow(model: ScriptedModel, store: ObservedStore) -> Workflow {
    Workflow::new(
        Arc::new(model),
        Arc::new(store),
        Arc::new(StaticLinkIssuer::new("https://encoredj.example")),
        Business::default(),
    )
}

fn request(message: &str) -> SmsRequest {
    SmsRequest {
        phone_number: "+1 (901) 555-0199".into(),
        message: message.into(),
        customer_context: None,
    }
}

fn classified(intent: &str) -> ScriptedReply {
    ScriptedReply::Text(format!(r#"{{"classification":"{intent}","confidence":0.9}}"#))
}

#[tokio::test]
async fn availability_inquiry_checks_the_calendar() {
    let store = ObservedStore::new(
        InMemoryStore::new().with_confirmed_booking("2025-06-15".parse().unwrap()),
    );
    let model = ScriptedModel::new([
        classified("check_availability"),
        ScriptedReply::tool(
            "call_1",
            "check_availability",
            r#"{"event_date":"2025-06-15","event_type":"wedding"}"#,
        ),
        ScriptedReply::Text("June 15 is booked, but June 16 is open!".into()),
    ]);

    let response = workflow(model, store.clone())
        .handle(request("Are you available June 15 for a wedding?"))
        .await;

    assert!(response.success);
    assert_eq!(response.classification, Some(Intent::CheckAvailability));
    assert_eq!(
        response.agent_used.as_deref(),
        Some("Availability Specialist")
    );
    // The calendar really was consulted before replying.
    assert!(store.ops().iter().any(|op| op == "confirmed_booking_on"));
}

#[tokio::test]
async fn two_tool_calls_run_in_strict_order() {
    let store = ObservedStore::new(InMemoryStore::new().with_contact(Contact {
        id: "7".into(),
        first_name: "Avery".into(),
        last_name: "Smith".into(),
        phone: "9015550199".into(),
        email: None,
        event_type: None,
        event_date: None,
        venue_name: None,
        guest_count: None,
        budget_range: None,
        special_requests: None,
        lead_status: "new".into(),
        source: "sms".into(),
        last_contacted_at: None,
    }));

    // One assistant turn proposing both mutations of the same contact row.
    let model = ScriptedModel::new([
        classified("existing_customer"),
        ScriptedReply::ToolCalls(vec![
            llm::ToolCall::function(
                "call_1",
                "update_lead_information",
                r#"{"phone_number":"9015550199","updates":{"event_type":"wedding"}}"#,
            ),
            llm::ToolCall::function(
                "call_2",
                "create_follow_up_task",
                r#"{"phone_number":"9015550199","task_type":"send_quote","priority":"high","notes":"quote follow-up"}"#,
            ),
        ]),
        ScriptedReply::Text("All set, Marcus will reach out shortly!".into()),
    ]);

    let response = workflow(model, store.clone())
        .handle(request("checking on my quote"))
        .await;

    assert!(response.success);
    let ops = store.ops();
    let update_at = ops.iter().position(|op| op == "update_contact").unwrap();
    let follow_at = ops.iter().position(|op| op == "create_follow_up").unwrap();
    assert!(
        update_at < follow_at,
        "second tool started before the first finished: {ops:?}"
    );
}

#[tokio::test]
async fn booking_path_creates_contact_and_link() {
    let store = ObservedStore::new(InMemoryStore::new());
    let model = ScriptedModel::new([
        classified("book_service"),
        ScriptedReply::tool(
            "call_1",
            "generate_service_link",
            r#"{"phone_number":"9015550199","event_type":"wedding","customer_name":"Avery Smith"}"#,
        ),
        ScriptedReply::Text("Here's your personalized link!".into()),
    ]);

    let response = workflow(model, store.clone())
        .handle(request("I want to book you for my wedding"))
        .await;

    assert!(response.success);
    assert_eq!(response.agent_used.as_deref(), Some("Booking Specialist"));
    let contacts = store.inner.contacts();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].first_name, "Avery");
}

#[tokio::test]
async fn invalid_tool_input_still_completes_the_exchange() {
    let store = ObservedStore::new(InMemoryStore::new());
    let model = ScriptedModel::new([
        classified("check_availability"),
        ScriptedReply::tool(
            "call_1",
            "check_availability",
            r#"{"event_date":"sometime in June","event_type":"wedding"}"#,
        ),
        ScriptedReply::Text("Could you give me the exact date, like 2025-06-15?".into()),
    ]);

    let response = workflow(model, store.clone())
        .handle(request("are you free sometime in June?"))
        .await;

    assert!(response.success);
    assert!(!response.output_text.is_empty());
    // The malformed date never reached the store.
    assert!(store.ops().iter().all(|op| op != "confirmed_booking_on"));
}

#[tokio::test]
async fn audit_failure_does_not_change_the_response() {
    let store = ObservedStore::new(InMemoryStore::new());
    store.fail_exchanges();

    let model = ScriptedModel::new([
        classified("get_pricing"),
        ScriptedReply::Text("Weddings run $1200 to $2500.".into()),
    ]);

    let response = workflow(model, store.clone())
        .handle(request("wedding prices?"))
        .await;

    assert!(response.success);
    assert_eq!(response.output_text, "Weddings run $1200 to $2500.");
    assert_eq!(response.classification, Some(Intent::GetPricing));
    assert_eq!(response.agent_used.as_deref(), Some("Pricing Specialist"));
    // The write was attempted, failed, and was swallowed.
    assert!(store.ops().iter().any(|op| op == "record_exchange"));
    assert!(store.inner.exchanges().is_empty());
}

#[tokio::test]
async fn classifier_garbage_falls_back_with_phone_number() {
    let store = ObservedStore::new(InMemoryStore::new());
    let model = ScriptedModel::new([ScriptedReply::Text("no json here".into())]);

    let response = workflow(model, store.clone()).handle(request("???")).await;

    assert!(!response.success);
    assert!(response.output_text.contains("Encore DJ Company"));
    assert!(response.output_text.contains("(901) 555-0142"));
    assert!(response.error.is_some());
    assert!(store.inner.exchanges().is_empty());
}

#[tokio::test]
async fn runaway_tool_loop_falls_back() {
    let store = ObservedStore::new(InMemoryStore::new());
    let mut replies = vec![classified("get_pricing")];
    replies.extend((0..16).map(|i| {
        ScriptedReply::tool(
            format!("call_{i}"),
            "get_pricing_info",
            r#"{"event_type":"wedding"}"#,
        )
    }));
    let model = ScriptedModel::new(replies);

    let response = workflow(model, store).handle(request("price?")).await;

    assert!(!response.success);
    assert!(response.error.unwrap().contains("rounds exceeded"));
    assert!(response.output_text.contains("30 minutes"));
}
