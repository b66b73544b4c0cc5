//! Booking lifecycle and pricing scenarios run against an in-memory
//! database.

mod memory;

use std::time::Duration;

use common::{money::Currency, DateTime, Money};
use rust_decimal::Decimal;
use service::{
    command::{
        approve_booking_request, create_booking, create_booking_request,
        create_room, create_room_configuration, update_booking, update_room,
        ApproveBookingRequest, CreateBooking, CreateBookingRequest,
        CreatePayment, CreateRoom, CreateRoomConfiguration,
        RejectBookingRequest, UpdateBooking, UpdateRoom,
    },
    domain::{
        booking::{self, request, DurationType},
        cost::Rates,
        customer, payment,
        room::{self, configuration::PersonCount, Bathroom, Configuration},
        Booking, Customer, Room,
    },
    query::{availability::Availability, booking::Reconciliation},
    Command as _, Config, Service,
};

use self::memory::Memory;

fn inr(amount: i64) -> Money {
    Money {
        amount: Decimal::from(amount),
        currency: Currency::Inr,
    }
}

fn at<Of: ?Sized>(input: &str) -> common::DateTimeOf<Of> {
    DateTime::parse(input).expect("valid date").coerce()
}

fn people(count: u8) -> PersonCount {
    PersonCount::new(count).expect("valid person count")
}

fn phone() -> customer::Phone {
    customer::Phone::new("+91 98765 43210").expect("valid phone")
}

fn service() -> (Service<Memory>, Memory) {
    let db = Memory::default();
    let config = Config {
        jwt_encoding_key: jsonwebtoken::EncodingKey::from_secret(b"secret"),
        jwt_decoding_key: jsonwebtoken::DecodingKey::from_secret(b"secret"),
        session_ttl: Duration::from_secs(30 * 60),
        currency: Currency::Inr,
    };
    (Service::new(config, db.clone()), db)
}

fn seed_room(db: &Memory, number: &str, daily_cost: Option<Money>) -> room::Id {
    let now = DateTime::now();
    let room = Room {
        id: room::Id::new(),
        number: room::Number::new(number).expect("valid number"),
        bathroom: Bathroom::Attached,
        is_available: true,
        description: None,
        daily_cost,
        monthly_cost: None,
        created_at: now.coerce(),
        updated_at: now.coerce(),
    };
    let id = room.id;
    drop(db.state().rooms.insert(id, room));
    id
}

fn seed_configuration(
    db: &Memory,
    room_id: room::Id,
    person_count: PersonCount,
    daily_cost: Money,
) {
    let now = DateTime::now();
    db.state().configurations.push(Configuration {
        id: room::configuration::Id::new(),
        room_id,
        person_count,
        daily_cost,
        monthly_cost: inr(12_000),
        is_available: true,
        description: None,
        created_at: now.coerce(),
        updated_at: now.coerce(),
    });
}

fn seed_customer(db: &Memory) {
    let now = DateTime::now();
    let customer = Customer {
        phone: phone(),
        name: customer::Name::new("John Doe").expect("valid name"),
        email: None,
        password_hash: None,
        additional_phone: None,
        documents_url: None,
        photo_id_proof_url: None,
        id_proof_urls: vec![],
        remarks: None,
        created_at: now.coerce(),
        updated_at: now.coerce(),
    };
    drop(db.state().customers.insert(customer.phone.clone(), customer));
}

fn booking_of(room_id: room::Id, check_in: &str, check_out: &str) -> CreateBooking {
    CreateBooking {
        customer_phone: phone(),
        room_id,
        number_of_people: people(1),
        check_in: at(check_in),
        check_out: at(check_out),
        duration: DurationType::Daily,
        rates: None,
        early_check_in_cost: None,
        late_check_out_cost: None,
        status: None,
        payment_status: None,
        remarks: None,
    }
}

fn request_of(
    room_id: room::Id,
    number_of_people: PersonCount,
    check_in: &str,
    check_out: &str,
) -> CreateBookingRequest {
    CreateBookingRequest {
        customer_name: customer::Name::new("Jane Roe").expect("valid name"),
        customer_phone: phone(),
        room_id,
        number_of_people,
        check_in: at(check_in),
        check_out: at(check_out),
        duration: DurationType::Daily,
        early_check_in_cost: None,
        late_check_out_cost: None,
        remarks: None,
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn prices_request_by_room_configuration() {
    let (service, db) = service();
    let room_id = seed_room(&db, "201A", None);
    seed_configuration(&db, room_id, people(2), inr(500));

    let request = service
        .execute(request_of(
            room_id,
            people(2),
            "2025-01-01T12:00:00Z",
            "2025-01-04T10:00:00Z",
        ))
        .await
        .expect("request is created");

    assert_eq!(request.total_amount, inr(1500));
    assert_eq!(request.status, request::Status::Pending);
}

#[tokio::test(flavor = "multi_thread")]
async fn rejects_request_without_matching_configuration() {
    let (service, db) = service();
    let room_id = seed_room(&db, "201A", None);
    seed_configuration(&db, room_id, people(2), inr(500));

    let res = service
        .execute(request_of(
            room_id,
            people(3),
            "2025-01-01",
            "2025-01-04",
        ))
        .await;

    assert!(
        res.is_err_and(|e| matches!(
            e.as_ref(),
            create_booking_request::ExecutionError::MissingConfiguration { .. },
        )),
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn adjacent_stays_do_not_conflict() {
    let (service, db) = service();
    let room_id = seed_room(&db, "X", Some(inr(100)));
    seed_customer(&db);

    drop(
        service
            .execute(booking_of(room_id, "2025-01-01", "2025-01-05"))
            .await
            .expect("booking is created"),
    );

    let adjacent = service
        .execute(Availability {
            room_id,
            check_in: at("2025-01-05"),
            check_out: at("2025-01-07"),
        })
        .await
        .expect("availability is checked");
    assert!(adjacent);

    let overlapping = service
        .execute(Availability {
            room_id,
            check_in: at("2025-01-04"),
            check_out: at("2025-01-06"),
        })
        .await
        .expect("availability is checked");
    assert!(!overlapping);

    // Naive and offset timestamps describe the same instant.
    let shifted = service
        .execute(Availability {
            room_id,
            check_in: at("2025-01-05T05:30:00+05:30"),
            check_out: at("2025-01-07T00:00:00"),
        })
        .await
        .expect("availability is checked");
    assert!(shifted);

    drop(
        service
            .execute(booking_of(room_id, "2025-01-05", "2025-01-07"))
            .await
            .expect("adjacent booking is created"),
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn inverted_interval_is_rejected() {
    let (service, db) = service();
    let room_id = seed_room(&db, "X", Some(inr(100)));

    let res = service
        .execute(Availability {
            room_id,
            check_in: at("2025-01-05"),
            check_out: at("2025-01-05"),
        })
        .await;

    assert!(res.is_err_and(|e| matches!(
        e.as_ref(),
        service::query::availability::ExecutionError::InvalidInterval,
    )));
}

#[tokio::test(flavor = "multi_thread")]
async fn released_booking_frees_room() {
    let (service, db) = service();
    let room_id = seed_room(&db, "X", Some(inr(100)));
    seed_customer(&db);

    let cancelled = service
        .execute(CreateBooking {
            status: Some(booking::Status::Cancelled),
            ..booking_of(room_id, "2025-01-01", "2025-01-05")
        })
        .await
        .expect("booking is created");
    assert!(!cancelled.is_occupying());

    drop(
        service
            .execute(booking_of(room_id, "2025-01-02", "2025-01-04"))
            .await
            .expect("booking is created"),
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn reconciles_partial_payments() {
    let (service, db) = service();
    let room_id = seed_room(&db, "X", Some(inr(1000)));
    seed_customer(&db);

    let booking = service
        .execute(booking_of(room_id, "2025-01-01", "2025-01-02"))
        .await
        .expect("booking is created");
    assert_eq!(booking.total_amount, inr(1000));

    for amount in [400, 300] {
        drop(
            service
                .execute(CreatePayment {
                    booking_id: booking.id,
                    amount: inr(amount),
                    method: payment::Method::Upi,
                    status: None,
                    screenshot_url: None,
                    transaction_id: None,
                    paid_at: None,
                })
                .await
                .expect("payment is recorded"),
        );
    }

    let out = service
        .execute(Reconciliation {
            booking_id: booking.id,
        })
        .await
        .expect("booking is reconciled");

    assert_eq!(out.payments.len(), 2);
    assert_eq!(out.reconciliation.paid, inr(700));
    assert_eq!(out.reconciliation.due, inr(300));
    assert!(out.reconciliation.is_due());
}

#[tokio::test(flavor = "multi_thread")]
async fn payment_for_missing_booking_is_rejected() {
    let (service, _) = service();

    let res = service
        .execute(CreatePayment {
            booking_id: booking::Id::new(),
            amount: inr(100),
            method: payment::Method::Cash,
            status: None,
            screenshot_url: None,
            transaction_id: None,
            paid_at: None,
        })
        .await;

    assert!(res.is_err_and(|e| matches!(
        e.as_ref(),
        service::command::create_payment::ExecutionError::BookingNotExists(_),
    )));
}

#[tokio::test(flavor = "multi_thread")]
async fn approval_turns_request_into_booking() {
    let (service, db) = service();
    let room_id = seed_room(&db, "201A", None);
    seed_configuration(&db, room_id, people(2), inr(500));

    let request = service
        .execute(request_of(room_id, people(2), "2025-01-01", "2025-01-04"))
        .await
        .expect("request is created");

    let approval = service
        .execute(ApproveBookingRequest {
            request_id: request.id,
        })
        .await
        .expect("request is decided");

    let booking = approval.booking.expect("booking is created");
    assert_eq!(approval.request.status, request::Status::Approved);
    assert_eq!(approval.request.booking_id, Some(booking.id));
    assert_eq!(booking.status, booking::Status::Confirmed);
    assert_eq!(booking.payment_status, booking::PaymentStatus::Pending);
    assert_eq!(booking.total_amount, inr(1500));
    assert_eq!(booking.stay, request.stay);

    let state = db.state();
    assert_eq!(state.bookings.len(), 1);
    assert_eq!(
        state.customers.get(&phone()).map(|c| c.name.to_string()),
        Some("Jane Roe".into()),
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn approval_rejects_request_for_occupied_room() {
    let (service, db) = service();
    let room_id = seed_room(&db, "201A", Some(inr(500)));
    seed_customer(&db);

    let request = service
        .execute(request_of(room_id, people(1), "2025-01-01", "2025-01-04"))
        .await
        .expect("request is created");
    drop(
        service
            .execute(booking_of(room_id, "2025-01-03", "2025-01-06"))
            .await
            .expect("booking is created"),
    );

    let approval = service
        .execute(ApproveBookingRequest {
            request_id: request.id,
        })
        .await
        .expect("request is decided");

    assert!(approval.booking.is_none());
    assert_eq!(approval.request.status, request::Status::Rejected);
    assert_eq!(
        approval.request.rejection_reason,
        Some(request::RejectionReason::room_unavailable()),
    );
    assert_eq!(db.state().bookings.len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn decided_request_is_not_approved_again() {
    let (service, db) = service();
    let room_id = seed_room(&db, "201A", Some(inr(500)));

    let request = service
        .execute(request_of(room_id, people(1), "2025-01-01", "2025-01-04"))
        .await
        .expect("request is created");

    let rejected = service
        .execute(RejectBookingRequest {
            request_id: request.id,
            reason: request::RejectionReason::new("Under renovation")
                .expect("valid reason"),
        })
        .await
        .expect("request is rejected");
    assert_eq!(rejected.status, request::Status::Rejected);

    let res = service
        .execute(ApproveBookingRequest {
            request_id: request.id,
        })
        .await;
    assert!(res.is_err_and(|e| matches!(
        e.as_ref(),
        approve_booking_request::ExecutionError::RequestNotPending(id)
            if *id == request.id,
    )));
    assert!(db.state().bookings.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn only_one_of_concurrent_bookings_wins() {
    let (service, db) = service();
    let room_id = seed_room(&db, "X", Some(inr(100)));
    seed_customer(&db);

    let (first, second) = futures::join!(
        service.execute(booking_of(room_id, "2025-01-01", "2025-01-05")),
        service.execute(booking_of(room_id, "2025-01-03", "2025-01-08")),
    );

    let (won, lost): (Vec<_>, Vec<_>) =
        [first, second].into_iter().partition(Result::is_ok);
    assert_eq!(won.len(), 1);
    assert!(lost.into_iter().all(|res| res.is_err_and(|e| matches!(
        e.as_ref(),
        create_booking::ExecutionError::RoomUnavailable(id) if *id == room_id,
    ))));
    assert_eq!(
        db.state()
            .bookings
            .iter()
            .filter(|b: &&Booking| b.is_occupying())
            .count(),
        1,
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn negative_costs_are_rejected() {
    let (service, db) = service();
    let room_id = seed_room(&db, "301", Some(inr(500)));
    seed_customer(&db);

    let res = service
        .execute(CreateBooking {
            early_check_in_cost: Some(inr(-2000)),
            ..booking_of(room_id, "2025-01-01", "2025-01-04")
        })
        .await;
    assert!(res.is_err_and(|e| matches!(
        e.as_ref(),
        create_booking::ExecutionError::NegativeCost,
    )));

    let res = service
        .execute(CreateBooking {
            rates: Some(Rates {
                daily_cost: Some(inr(-500)),
                monthly_cost: None,
            }),
            ..booking_of(room_id, "2025-01-01", "2025-01-04")
        })
        .await;
    assert!(res.is_err_and(|e| matches!(
        e.as_ref(),
        create_booking::ExecutionError::NegativeCost,
    )));

    let res = service
        .execute(CreateBookingRequest {
            late_check_out_cost: Some(inr(-1)),
            ..request_of(room_id, people(1), "2025-01-01", "2025-01-04")
        })
        .await;
    assert!(res.is_err_and(|e| matches!(
        e.as_ref(),
        create_booking_request::ExecutionError::NegativeCost,
    )));

    let state = db.state();
    assert!(state.bookings.is_empty());
    assert!(state.requests.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn negative_room_costs_are_rejected() {
    let (service, db) = service();
    let room_id = seed_room(&db, "301", Some(inr(500)));

    let res = service
        .execute(CreateRoom {
            number: room::Number::new("302").expect("valid number"),
            bathroom: Bathroom::NonAttached,
            is_available: true,
            description: None,
            daily_cost: Some(inr(-500)),
            monthly_cost: None,
        })
        .await;
    assert!(res.is_err_and(|e| matches!(
        e.as_ref(),
        create_room::ExecutionError::NegativeCost,
    )));

    let res = service
        .execute(UpdateRoom {
            room_id,
            number: None,
            bathroom: None,
            is_available: None,
            description: None,
            daily_cost: None,
            monthly_cost: Some(Some(inr(-12_000))),
        })
        .await;
    assert!(res.is_err_and(|e| matches!(
        e.as_ref(),
        update_room::ExecutionError::NegativeCost,
    )));

    let res = service
        .execute(CreateRoomConfiguration {
            room_id,
            person_count: people(2),
            daily_cost: inr(400),
            monthly_cost: inr(-1),
            is_available: true,
            description: None,
        })
        .await;
    assert!(res.is_err_and(|e| matches!(
        e.as_ref(),
        create_room_configuration::ExecutionError::NegativeCost,
    )));

    let state = db.state();
    assert_eq!(state.rooms.len(), 1);
    assert_eq!(
        state.rooms.get(&room_id).and_then(|r| r.monthly_cost),
        None,
    );
    assert!(state.configurations.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn only_one_of_concurrent_rooms_gets_the_number() {
    let (service, db) = service();
    let room_of = || CreateRoom {
        number: room::Number::new("101").expect("valid number"),
        bathroom: Bathroom::Attached,
        is_available: true,
        description: None,
        daily_cost: Some(inr(500)),
        monthly_cost: None,
    };

    let (first, second) =
        futures::join!(service.execute(room_of()), service.execute(room_of()));

    let (won, lost): (Vec<_>, Vec<_>) =
        [first, second].into_iter().partition(Result::is_ok);
    assert_eq!(won.len(), 1);
    assert!(lost.into_iter().all(|res| res.is_err_and(|e| matches!(
        e.as_ref(),
        create_room::ExecutionError::NumberOccupied(n)
            if n.to_string() == "101",
    ))));
    assert_eq!(db.state().rooms.len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn booking_follows_status_transitions() {
    let (service, db) = service();
    let room_id = seed_room(&db, "X", Some(inr(100)));
    seed_customer(&db);

    let booking = service
        .execute(booking_of(room_id, "2025-01-01", "2025-01-05"))
        .await
        .expect("booking is created");

    for status in [booking::Status::CheckedIn, booking::Status::CheckedOut] {
        let updated = service
            .execute(UpdateBooking {
                booking_id: booking.id,
                status: Some(status),
                ..UpdateBooking::default()
            })
            .await
            .expect("status is updated");
        assert_eq!(updated.status, status);
    }

    let res = service
        .execute(UpdateBooking {
            booking_id: booking.id,
            status: Some(booking::Status::Confirmed),
            ..UpdateBooking::default()
        })
        .await;
    assert!(res.is_err_and(|e| matches!(
        e.as_ref(),
        update_booking::ExecutionError::InvalidTransition {
            from: booking::Status::CheckedOut,
            to: booking::Status::Confirmed,
        },
    )));
    assert_eq!(db.state().bookings[0].status, booking::Status::CheckedOut);
}

#[tokio::test(flavor = "multi_thread")]
async fn moved_booking_is_checked_for_availability() {
    let (service, db) = service();
    let room_id = seed_room(&db, "X", Some(inr(100)));
    seed_customer(&db);

    drop(
        service
            .execute(booking_of(room_id, "2025-01-01", "2025-01-05"))
            .await
            .expect("booking is created"),
    );
    let later = service
        .execute(booking_of(room_id, "2025-01-05", "2025-01-08"))
        .await
        .expect("booking is created");

    let res = service
        .execute(UpdateBooking {
            booking_id: later.id,
            check_in: Some(at("2025-01-04")),
            ..UpdateBooking::default()
        })
        .await;
    assert!(res.is_err_and(|e| matches!(
        e.as_ref(),
        update_booking::ExecutionError::RoomUnavailable(id) if *id == room_id,
    )));

    let stored = db
        .state()
        .bookings
        .iter()
        .find(|b| b.id == later.id)
        .cloned()
        .expect("booking is stored");
    assert_eq!(stored.stay, later.stay);
}

#[tokio::test(flavor = "multi_thread")]
async fn extended_booking_is_repriced_without_self_conflict() {
    let (service, db) = service();
    let room_id = seed_room(&db, "X", Some(inr(100)));
    seed_customer(&db);

    let booking = service
        .execute(booking_of(room_id, "2025-01-01", "2025-01-05"))
        .await
        .expect("booking is created");
    assert_eq!(booking.total_amount, inr(400));

    let extended = service
        .execute(UpdateBooking {
            booking_id: booking.id,
            check_out: Some(at("2025-01-06")),
            ..UpdateBooking::default()
        })
        .await
        .expect("booking is extended");
    assert_eq!(extended.total_amount, inr(500));

    let other_room = seed_room(&db, "Y", Some(inr(300)));
    let moved = service
        .execute(UpdateBooking {
            booking_id: booking.id,
            room_id: Some(other_room),
            ..UpdateBooking::default()
        })
        .await
        .expect("booking is moved");
    assert_eq!(moved.room_id, other_room);
    assert_eq!(moved.total_amount, inr(1500));
}

#[tokio::test(flavor = "multi_thread")]
async fn booking_update_validates_references_and_costs() {
    let (service, db) = service();
    let room_id = seed_room(&db, "X", Some(inr(100)));
    seed_customer(&db);

    let booking = service
        .execute(booking_of(room_id, "2025-01-01", "2025-01-05"))
        .await
        .expect("booking is created");

    let missing_room = room::Id::new();
    let res = service
        .execute(UpdateBooking {
            booking_id: booking.id,
            room_id: Some(missing_room),
            ..UpdateBooking::default()
        })
        .await;
    assert!(res.is_err_and(|e| matches!(
        e.as_ref(),
        update_booking::ExecutionError::RoomNotExists(id)
            if *id == missing_room,
    )));

    let res = service
        .execute(UpdateBooking {
            booking_id: booking.id,
            customer_phone: Some(
                customer::Phone::new("+91 90000 00000").expect("valid phone"),
            ),
            ..UpdateBooking::default()
        })
        .await;
    assert!(res.is_err_and(|e| matches!(
        e.as_ref(),
        update_booking::ExecutionError::CustomerNotExists(_),
    )));

    let res = service
        .execute(UpdateBooking {
            booking_id: booking.id,
            early_check_in_cost: Some(Some(inr(-100))),
            ..UpdateBooking::default()
        })
        .await;
    assert!(res.is_err_and(|e| matches!(
        e.as_ref(),
        update_booking::ExecutionError::NegativeCost,
    )));

    let stored = &db.state().bookings[0];
    assert_eq!(stored.room_id, room_id);
    assert_eq!(stored.customer_phone, phone());
    assert_eq!(stored.total_amount, inr(400));
}
