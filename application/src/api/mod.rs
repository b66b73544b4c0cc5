//! GraphQL API definitions.

/// Defines a GraphQL enum mirroring a domain kind.
macro_rules! define_enum {
    (
        #[doc = $doc:literal]
        #[graphql(name = $name:literal)]
        enum $ty:ident = $domain:ty {
            $(
                #[doc = $variant_doc:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Eq, ::juniper::GraphQLEnum, PartialEq)]
        #[graphql(name = $name)]
        pub enum $ty {
            $(
                #[doc = $variant_doc]
                $variant,
            )*
        }

        impl From<$domain> for $ty {
            fn from(kind: $domain) -> Self {
                type K = $domain;
                match kind {
                    $( K::$variant => Self::$variant, )*
                }
            }
        }

        impl From<$ty> for $domain {
            fn from(kind: $ty) -> Self {
                match kind {
                    $( $ty::$variant => Self::$variant, )*
                }
            }
        }
    };
}

/// Defines cursor-paginated list types of a GraphQL object.
///
/// Expects `read` to name the `read::*::list` module of the listed entity
/// and the node type to provide an async `load()` constructor.
macro_rules! define_list {
    (
        node = $node:ident,
        total = $total:ty,
        names = (
            $cursor:literal,
            $edge:literal,
            $connection:literal,
            $page_info:literal $(,)?
        ) $(,)?
    ) => {
        /// Cursor pointing to a node in the list.
        #[derive(
            ::derive_more::AsRef,
            Clone,
            Debug,
            ::derive_more::From,
            ::juniper::GraphQLScalar,
            ::derive_more::Into,
        )]
        #[graphql(
            name = $cursor,
            with = $crate::api::scalar::Via::<read::Cursor>,
        )]
        pub struct Cursor(pub read::Cursor);

        /// Edge in the list.
        #[derive(Clone, Debug, ::derive_more::From, ::derive_more::Into)]
        pub struct Edge(read::Edge);

        /// Edge in the list.
        #[::juniper::graphql_object(name = $edge, context = $crate::Context)]
        impl Edge {
            /// Cursor of this edge.
            #[must_use]
            pub fn cursor(&self) -> Cursor {
                self.0.cursor.clone().into()
            }

            /// Node of this edge.
            pub async fn node(
                &self,
                ctx: &$crate::Context,
            ) -> Result<$node, $crate::Error> {
                $node::load(ctx, self.0.node.clone()).await
            }
        }

        /// Page of the list along with the filter it was selected by.
        #[derive(Clone, Debug)]
        pub struct Connection {
            /// Selected page.
            page: read::Page,

            /// Filter the page was selected by.
            filter: read::Filter,
        }

        impl Connection {
            /// Creates a new [`Connection`] out of the selected page.
            #[must_use]
            pub fn new(page: read::Page, filter: read::Filter) -> Self {
                Self { page, filter }
            }
        }

        /// Page of the list.
        #[::juniper::graphql_object(
            name = $connection,
            context = $crate::Context,
        )]
        impl Connection {
            /// Edges on this page.
            #[must_use]
            pub fn edges(&self) -> Vec<Edge> {
                self.page.edges.iter().cloned().map(Into::into).collect()
            }

            /// Information about this page.
            #[must_use]
            pub fn page_info(&self) -> PageInfo {
                PageInfo {
                    info: self.page.page_info(),
                    start_cursor: self
                        .page
                        .edges
                        .first()
                        .map(|e| e.cursor.clone().into()),
                }
            }

            /// Total count of the nodes matching the filter.
            pub async fn total_count(
                &self,
                ctx: &$crate::Context,
            ) -> Result<i32, $crate::Error> {
                ::service::Query::execute(
                    ctx.service(),
                    <$total>::by(self.filter.clone()),
                )
                .await
                .map_err($crate::AsError::into_error)
                .map_err(ctx.error())
                .map(Into::into)
            }
        }

        /// Information about a page of the list.
        #[derive(Clone, Debug)]
        pub struct PageInfo {
            /// Underlying page information.
            info: read::PageInfo,

            /// First cursor on the page.
            start_cursor: Option<Cursor>,
        }

        /// Information about a page of the list.
        #[::juniper::graphql_object(
            name = $page_info,
            context = $crate::Context,
        )]
        impl PageInfo {
            /// Indicator whether there is a next page.
            #[must_use]
            pub fn has_next_page(&self) -> bool {
                self.info.has_next_page
            }

            /// Indicator whether there is a previous page.
            #[must_use]
            pub fn has_previous_page(&self) -> bool {
                self.info.has_previous_page
            }

            /// First cursor on the page.
            #[must_use]
            pub fn start_cursor(&self) -> Option<Cursor> {
                self.start_cursor.clone()
            }

            /// Last cursor on the page.
            #[must_use]
            pub fn end_cursor(&self) -> Option<Cursor> {
                self.info.end_cursor.clone().map(Into::into)
            }
        }
    };
}

pub mod booking;
pub mod booking_request;
pub mod customer;
pub mod dashboard;
pub mod expense;
pub mod invoice;
mod mutation;
pub mod payment;
mod query;
pub mod room;
pub mod scalar;
mod subscription;
pub mod user;

use crate::define_error;

pub use self::{
    booking::Booking, booking_request::BookingRequest, customer::Customer,
    expense::Expense, invoice::Invoice, mutation::Mutation, payment::Payment,
    query::Query, room::Room, subscription::Subscription, user::User,
};

/// GraphQL schema.
pub type Schema = juniper::RootNode<'static, Query, Mutation, Subscription>;

/// Default number of nodes on a list page.
pub(crate) const DEFAULT_PAGE_SIZE: i32 = 10;

define_error! {
    enum PrivilegeError {
        #[code = "NOT_STAFF"]
        #[status = FORBIDDEN]
        #[message = "Authenticated principal must be a staff `User`"]
        Staff,

        #[code = "NOT_OWNER"]
        #[status = FORBIDDEN]
        #[message = "Authenticated `Customer` may access only their own \
                     records"]
        Owner,

        #[code = "NOT_CUSTOMER"]
        #[status = FORBIDDEN]
        #[message = "Authenticated principal must be a `Customer`"]
        Customer,
    }
}

define_error! {
    enum PaginationError {
        #[code = "AMBIGUOUS_PAGINATION_ARGUMENTS"]
        #[status = BAD_REQUEST]
        #[message = "Ambiguous pagination arguments"]
        Ambiguous,
    }
}
