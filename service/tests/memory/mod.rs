//! In-memory [`Database`] serving the [`Service`] in tests.
//!
//! [`Service`]: service::Service

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use common::operations::{By, Commit, Insert, Lock, Select, Transact, Update};
use service::{
    domain::{
        booking::{self, request, Request},
        customer,
        room::{self, Configuration},
        Booking, Customer, Payment, Room,
    },
    infra::{database, Database},
    read,
};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracerr::Traced;

/// Stored entities.
#[derive(Debug, Default)]
pub struct State {
    pub rooms: HashMap<room::Id, Room>,
    pub configurations: Vec<Configuration>,
    pub customers: HashMap<customer::Phone, Customer>,
    pub bookings: Vec<Booking>,
    pub requests: HashMap<request::Id, Request>,
    pub payments: Vec<Payment>,
}

/// Per-key async locks, held by a [`Tx`] until it commits.
type Locks<K> = Arc<Mutex<HashMap<K, Arc<AsyncMutex<()>>>>>;

/// Shared in-memory storage.
#[derive(Clone, Debug, Default)]
pub struct Memory {
    state: Arc<Mutex<State>>,
    room_locks: Locks<room::Id>,
    number_locks: Locks<room::Number>,
    request_locks: Locks<request::Id>,
}

impl Memory {
    /// Gives exclusive access to the stored [`State`].
    pub fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("`State` is poisoned")
    }

    fn lock_of<K: Eq + std::hash::Hash>(
        locks: &Locks<K>,
        key: K,
    ) -> Arc<AsyncMutex<()>> {
        Arc::clone(
            locks
                .lock()
                .expect("`Locks` are poisoned")
                .entry(key)
                .or_default(),
        )
    }
}

/// Transaction over the [`Memory`].
///
/// Writes are visible immediately. Only the locks are transactional.
#[derive(Debug)]
pub struct Tx {
    db: Memory,
    guards: Mutex<Vec<OwnedMutexGuard<()>>>,
}

impl Tx {
    async fn hold(&self, lock: Arc<AsyncMutex<()>>) {
        let guard = lock.lock_owned().await;
        self.guards.lock().expect("guards are poisoned").push(guard);
        // Let a competing transaction run into the held lock.
        tokio::task::yield_now().await;
    }
}

type Error = Traced<database::Error>;

impl Database<Transact> for Memory {
    type Ok = Tx;
    type Err = Error;

    async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
        Ok(Tx {
            db: self.clone(),
            guards: Mutex::default(),
        })
    }
}

impl Database<Commit> for Tx {
    type Ok = ();
    type Err = Error;

    async fn execute(&self, _: Commit) -> Result<Self::Ok, Self::Err> {
        self.guards.lock().expect("guards are poisoned").clear();
        Ok(())
    }
}

impl Database<Lock<By<Room, room::Id>>> for Tx {
    type Ok = ();
    type Err = Error;

    async fn execute(
        &self,
        Lock(by): Lock<By<Room, room::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let lock = Memory::lock_of(&self.db.room_locks, by.into_inner());
        self.hold(lock).await;
        Ok(())
    }
}

impl<'n> Database<Lock<By<Room, &'n room::Number>>> for Tx {
    type Ok = ();
    type Err = Error;

    async fn execute(
        &self,
        Lock(by): Lock<By<Room, &'n room::Number>>,
    ) -> Result<Self::Ok, Self::Err> {
        let number = by.into_inner().clone();
        let lock = Memory::lock_of(&self.db.number_locks, number);
        self.hold(lock).await;
        Ok(())
    }
}

impl Database<Lock<By<Request, request::Id>>> for Tx {
    type Ok = ();
    type Err = Error;

    async fn execute(
        &self,
        Lock(by): Lock<By<Request, request::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let lock = Memory::lock_of(&self.db.request_locks, by.into_inner());
        self.hold(lock).await;
        Ok(())
    }
}

fn occupying(state: &State, by: read::booking::Occupying) -> Vec<Booking> {
    state
        .bookings
        .iter()
        .filter(|b| b.is_occupying())
        .filter(|b| by.room_id.map_or(true, |id| b.room_id == id))
        .filter(|b| by.during.map_or(true, |s| b.stay.overlaps(&s)))
        .cloned()
        .collect()
}

fn configurations(
    state: &State,
    by: &read::room::configuration::Filter,
) -> Vec<Configuration> {
    state
        .configurations
        .iter()
        .filter(|c| by.room_id.map_or(true, |id| c.room_id == id))
        .filter(|c| by.person_count.map_or(true, |n| c.person_count == n))
        .filter(|c| by.is_available.map_or(true, |a| c.is_available == a))
        .cloned()
        .collect()
}

/// Implements the same [`Database`] operation for both [`Memory`] and
/// [`Tx`] reading the [`State`].
macro_rules! impl_read {
    ($op:ty => $ok:ty, |$state:ident, $by:ident| $body:expr) => {
        impl Database<$op> for Memory {
            type Ok = $ok;
            type Err = Error;

            async fn execute(
                &self,
                Select(by): $op,
            ) -> Result<Self::Ok, Self::Err> {
                let $by = by.into_inner();
                let $state = self.state();
                Ok($body)
            }
        }

        impl Database<$op> for Tx {
            type Ok = $ok;
            type Err = Error;

            async fn execute(
                &self,
                op: $op,
            ) -> Result<Self::Ok, Self::Err> {
                self.db.execute(op).await
            }
        }
    };
}

/// Implements the same storing [`Database`] operation for both [`Memory`]
/// and [`Tx`].
macro_rules! impl_write {
    ($op:ident<$ty:ty>, |$state:ident, $v:ident| $body:expr) => {
        impl Database<$op<$ty>> for Memory {
            type Ok = ();
            type Err = Error;

            async fn execute(
                &self,
                $op($v): $op<$ty>,
            ) -> Result<Self::Ok, Self::Err> {
                let mut $state = self.state();
                $body;
                Ok(())
            }
        }

        impl Database<$op<$ty>> for Tx {
            type Ok = ();
            type Err = Error;

            async fn execute(
                &self,
                op: $op<$ty>,
            ) -> Result<Self::Ok, Self::Err> {
                self.db.execute(op).await
            }
        }
    };
}

impl_read!(Select<By<Option<Room>, room::Id>> => Option<Room>, |s, id| {
    s.rooms.get(&id).cloned()
});
impl_read!(
    Select<By<Vec<Configuration>, read::room::configuration::Filter>>
        => Vec<Configuration>,
    |s, filter| configurations(&s, &filter)
);
impl_read!(
    Select<By<Vec<Booking>, read::booking::Occupying>> => Vec<Booking>,
    |s, by| occupying(&s, by)
);
impl_read!(Select<By<Option<Booking>, booking::Id>> => Option<Booking>, |s, id| {
    s.bookings.iter().find(|b| b.id == id).cloned()
});
impl_read!(Select<By<Option<Request>, request::Id>> => Option<Request>, |s, id| {
    s.requests.get(&id).cloned()
});
impl_read!(Select<By<Vec<Payment>, booking::Id>> => Vec<Payment>, |s, id| {
    s.payments.iter().filter(|p| p.booking_id == id).cloned().collect()
});

impl<'p> Database<Select<By<Option<Customer>, &'p customer::Phone>>>
    for Memory
{
    type Ok = Option<Customer>;
    type Err = Error;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Customer>, &'p customer::Phone>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.state().customers.get(by.into_inner()).cloned())
    }
}

impl<'p> Database<Select<By<Option<Customer>, &'p customer::Phone>>> for Tx {
    type Ok = Option<Customer>;
    type Err = Error;

    async fn execute(
        &self,
        op: Select<By<Option<Customer>, &'p customer::Phone>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.db.execute(op).await
    }
}

impl<'n> Database<Select<By<Option<Room>, &'n room::Number>>> for Memory {
    type Ok = Option<Room>;
    type Err = Error;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Room>, &'n room::Number>>,
    ) -> Result<Self::Ok, Self::Err> {
        let number = by.into_inner();
        Ok(self
            .state()
            .rooms
            .values()
            .find(|r| r.number == *number)
            .cloned())
    }
}

impl<'n> Database<Select<By<Option<Room>, &'n room::Number>>> for Tx {
    type Ok = Option<Room>;
    type Err = Error;

    async fn execute(
        &self,
        op: Select<By<Option<Room>, &'n room::Number>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.db.execute(op).await
    }
}

impl_write!(Insert<Room>, |s, room| drop(s.rooms.insert(room.id, room)));
impl_write!(Update<Room>, |s, room| drop(s.rooms.insert(room.id, room)));
impl_write!(Insert<Configuration>, |s, configuration| {
    s.configurations.push(configuration);
});
impl_write!(Insert<Booking>, |s, booking| s.bookings.push(booking));
impl_write!(Update<Booking>, |s, booking| {
    if let Some(b) = s.bookings.iter_mut().find(|b| b.id == booking.id) {
        *b = booking;
    }
});
impl_write!(Insert<Payment>, |s, payment| s.payments.push(payment));
impl_write!(Insert<Customer>, |s, customer| {
    drop(s.customers.insert(customer.phone.clone(), customer));
});
impl_write!(Insert<Request>, |s, request| {
    drop(s.requests.insert(request.id, request));
});
impl_write!(Update<Request>, |s, request| {
    drop(s.requests.insert(request.id, request));
});
