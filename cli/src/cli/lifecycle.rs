//! Commands that move an existing pickup through its lifecycle.
//!
//! Each one reads the current record, checks who is asking and whether the
//! move is allowed, then writes the full record back with one field changed.

use chrono::{Local, NaiveDate, NaiveTime};
use pickup_core::{PickupId, PickupRequest, PickupStatus, Transport};

use super::request::check_pickup_slot;
use super::Context;
use crate::session::Session;

fn fetch_managed<T: Transport>(ctx: &Context<T>, id: &PickupId) -> anyhow::Result<PickupRequest> {
    let pickup = ctx.api.get_pickup(id)?;
    ensure_can_manage(&ctx.session, &pickup)?;
    Ok(pickup)
}

fn ensure_can_manage(session: &Session, pickup: &PickupRequest) -> anyhow::Result<()> {
    if session.can_manage(pickup) {
        Ok(())
    } else {
        anyhow::bail!("Pickup #{} belongs to another user", pickup.id)
    }
}

/// Only pickups that have not started moving can get a new slot.
pub fn ensure_reschedulable(pickup: &PickupRequest) -> anyhow::Result<()> {
    match pickup.status {
        PickupStatus::Pending | PickupStatus::Confirmed => Ok(()),
        other => anyhow::bail!(
            "Pickup #{} is {} and can no longer be rescheduled",
            pickup.id,
            other.label().to_lowercase()
        ),
    }
}

pub fn set_status<T: Transport>(
    ctx: &Context<T>,
    id: &PickupId,
    status: PickupStatus,
) -> anyhow::Result<()> {
    ctx.session.require_admin()?;
    let pickup = ctx.api.get_pickup(id)?;
    let previous = pickup.status;
    let next = previous.transition_to(status)?;

    let update = pickup.to_update().with_status(next);
    ctx.emit(ctx.api.update_pickup(id, &update), |updated| {
        println!(
            "Pickup #{}: {} -> {}",
            updated.id,
            previous.label(),
            updated.status.label()
        );
    })
}

pub fn reschedule<T: Transport>(
    ctx: &Context<T>,
    id: &PickupId,
    date: NaiveDate,
    time: NaiveTime,
) -> anyhow::Result<()> {
    ctx.session.require_user()?;
    let pickup = fetch_managed(ctx, id)?;
    ensure_reschedulable(&pickup)?;
    let at = date.and_time(time);
    check_pickup_slot(at, Local::now().naive_local())?;

    let update = pickup.to_update().with_pickup_date_time(at);
    ctx.emit(ctx.api.update_pickup(id, &update), |updated| {
        println!(
            "Pickup #{} rescheduled to {}",
            updated.id,
            crate::render::format_datetime(&updated.pickup_date_time)
        );
    })
}

pub fn cancel<T: Transport>(ctx: &Context<T>, id: &PickupId) -> anyhow::Result<()> {
    ctx.session.require_user()?;
    let pickup = fetch_managed(ctx, id)?;
    let next = pickup.status.transition_to(PickupStatus::Cancelled)?;

    let update = pickup.to_update().with_status(next);
    ctx.emit(ctx.api.update_pickup(id, &update), |updated| {
        println!("Pickup #{} cancelled", updated.id);
    })
}

pub fn delete<T: Transport>(ctx: &Context<T>, id: &PickupId) -> anyhow::Result<()> {
    ctx.session.require_admin()?;
    ctx.emit(ctx.api.delete_pickup(id), |_| {
        println!("Pickup #{id} deleted");
    })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use chrono::{Days, NaiveDate};
    use pickup_core::{ApiError, ClientConfig, HttpMethod, HttpRequest, HttpResponse, PickupApi, WasteType};
    use serde_json::Value;

    use super::*;

    /// Replays canned responses and records every request.
    #[derive(Default)]
    struct Recorder {
        replies: RefCell<VecDeque<HttpResponse>>,
        sent: RefCell<Vec<HttpRequest>>,
    }

    impl Transport for Recorder {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            self.sent.borrow_mut().push(request.clone());
            self.replies
                .borrow_mut()
                .pop_front()
                .ok_or_else(|| ApiError::Transport("no reply scripted".to_string()))
        }
    }

    fn context(user: &str, replies: Vec<HttpResponse>) -> Context<Recorder> {
        let recorder = Recorder {
            replies: RefCell::new(replies.into()),
            sent: RefCell::default(),
        };
        Context {
            api: PickupApi::with_transport(ClientConfig::default(), recorder),
            session: Session::start(Some(user)),
            json: false,
        }
    }

    fn reply(pickup: &PickupRequest) -> HttpResponse {
        HttpResponse::new(200, serde_json::to_string(pickup).unwrap())
    }

    fn sent(ctx: &Context<Recorder>) -> Vec<HttpRequest> {
        ctx.api.transport().sent.borrow().clone()
    }

    fn put_body(request: &HttpRequest) -> Value {
        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(request.url, "http://localhost:8000/api/pickups/7");
        serde_json::from_str(request.body.as_deref().unwrap()).unwrap()
    }

    fn pickup(status: PickupStatus) -> PickupRequest {
        PickupRequest {
            id: PickupId::from(7),
            waste_type: WasteType::Electronic,
            pickup_location: "Station Rd".to_string(),
            pickup_date_time: NaiveDate::from_ymd_opt(2025, 6, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            status,
            user_name: "carol".to_string(),
            creation_timestamp: None,
        }
    }

    #[test]
    fn only_waiting_pickups_can_be_rescheduled() {
        assert!(ensure_reschedulable(&pickup(PickupStatus::Pending)).is_ok());
        assert!(ensure_reschedulable(&pickup(PickupStatus::Confirmed)).is_ok());

        let err = ensure_reschedulable(&pickup(PickupStatus::InProgress)).unwrap_err();
        assert_eq!(err.to_string(), "Pickup #7 is in progress and can no longer be rescheduled");
        assert!(ensure_reschedulable(&pickup(PickupStatus::Completed)).is_err());
        assert!(ensure_reschedulable(&pickup(PickupStatus::Cancelled)).is_err());
    }

    #[test]
    fn strangers_cannot_manage_a_pickup() {
        let record = pickup(PickupStatus::Pending);
        assert!(ensure_can_manage(&Session::start(Some("Carol")), &record).is_ok());
        assert!(ensure_can_manage(&Session::start(Some("admin")), &record).is_ok());

        let err = ensure_can_manage(&Session::start(Some("dave")), &record).unwrap_err();
        assert_eq!(err.to_string(), "Pickup #7 belongs to another user");
    }

    #[test]
    fn set_status_writes_back_every_field() {
        let original = pickup(PickupStatus::Pending);
        let mut confirmed = original.clone();
        confirmed.status = PickupStatus::Confirmed;
        let ctx = context("admin", vec![reply(&original), reply(&confirmed)]);

        set_status(&ctx, &original.id, PickupStatus::Confirmed).unwrap();

        let sent = sent(&ctx);
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].method, HttpMethod::Get);
        let body = put_body(&sent[1]);
        assert_eq!(body.as_object().unwrap().len(), 5);
        assert_eq!(body["status"], "confirmed");
        assert_eq!(body["wasteType"], "ELECTRONIC");
        assert_eq!(body["pickupLocation"], "Station Rd");
        assert_eq!(body["pickupDateTime"], "2025-06-01 09:00:00");
        assert_eq!(body["userName"], "carol");
    }

    #[test]
    fn refused_transition_sends_no_update() {
        let original = pickup(PickupStatus::Completed);
        let ctx = context("admin", vec![reply(&original)]);

        let err = set_status(&ctx, &original.id, PickupStatus::Pending).unwrap_err();
        assert_eq!(err.to_string(), "cannot move a pickup from completed to pending");
        assert_eq!(sent(&ctx).len(), 1);
    }

    #[test]
    fn only_admin_may_set_status_or_delete() {
        let ctx = context("carol", vec![]);
        assert!(set_status(&ctx, &PickupId::from(7), PickupStatus::Confirmed).is_err());
        assert!(delete(&ctx, &PickupId::from(7)).is_err());
        assert!(sent(&ctx).is_empty());
    }

    #[test]
    fn cancel_by_owner_keeps_other_fields() {
        let original = pickup(PickupStatus::Confirmed);
        let mut cancelled = original.clone();
        cancelled.status = PickupStatus::Cancelled;
        let ctx = context("Carol", vec![reply(&original), reply(&cancelled)]);

        cancel(&ctx, &original.id).unwrap();

        let body = put_body(&sent(&ctx)[1]);
        assert_eq!(body["status"], "cancelled");
        assert_eq!(body["pickupLocation"], "Station Rd");
        assert_eq!(body["userName"], "carol");
    }

    #[test]
    fn cancel_by_stranger_sends_no_update() {
        let original = pickup(PickupStatus::Pending);
        let ctx = context("dave", vec![reply(&original)]);

        assert!(cancel(&ctx, &original.id).is_err());
        assert_eq!(sent(&ctx).len(), 1);
    }

    #[test]
    fn reschedule_changes_only_the_slot() {
        let original = pickup(PickupStatus::Pending);
        let date = Local::now()
            .date_naive()
            .checked_add_days(Days::new(2))
            .unwrap();
        let time = NaiveTime::from_hms_opt(14, 15, 0).unwrap();
        let mut moved = original.clone();
        moved.pickup_date_time = date.and_time(time);
        let ctx = context("carol", vec![reply(&original), reply(&moved)]);

        reschedule(&ctx, &original.id, date, time).unwrap();

        let body = put_body(&sent(&ctx)[1]);
        assert_eq!(body["pickupDateTime"], format!("{} 14:15:00", date.format("%Y-%m-%d")));
        assert_eq!(body["status"], "pending");
        assert_eq!(body["wasteType"], "ELECTRONIC");
        assert_eq!(body["pickupLocation"], "Station Rd");
    }

    #[test]
    fn reschedule_into_the_past_sends_no_update() {
        let original = pickup(PickupStatus::Pending);
        let yesterday = Local::now()
            .date_naive()
            .checked_sub_days(Days::new(1))
            .unwrap();
        let ctx = context("carol", vec![reply(&original)]);

        let time = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        assert!(reschedule(&ctx, &original.id, yesterday, time).is_err());
        assert_eq!(sent(&ctx).len(), 1);
    }
}
