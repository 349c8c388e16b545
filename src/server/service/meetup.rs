//! Meetup negotiation service layer.
//!
//! A buyer requests a meetup on a listing, the listing owner accepts it. Requests are
//! `pending` when created and move to `accepted`; accepting twice is allowed. Nothing
//! produces `rejected` and a rejected request cannot be accepted.

use std::collections::HashMap;

use entity::sea_orm_active_enums::MeetupStatus;
use rust_decimal::{prelude::ToPrimitive, Decimal};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, TransactionTrait};

use crate::{
    model::meetup::{
        AcceptMeetupRequestDto, CreateMeetupRequestDto, LocationDto, MeetupRequestDto,
        MeetupStatusDto, MyMeetupRequestsDto,
    },
    server::{
        data::{listing::ListingRepository, meetup::MeetupRepository, user::UserRepository},
        error::{meetup::MeetupError, Error},
        model::db::MeetupRequestModel,
        service::{listing::listing_dtos, user::user_dtos},
    },
};

const COORDINATE_SCALE: u32 = 6;
const MICRO_DEGREES_PER_DEGREE: i64 = 1_000_000;

pub struct MeetupService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MeetupService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Request a meetup on a listing
    ///
    /// The location is rounded to 6 decimal places. Requesting a meetup on one's own listing
    /// or requesting the same listing more than once is allowed.
    ///
    /// # Returns
    /// - `Ok(MeetupRequestDto)` - The new, pending request
    /// - `Err(Error::MeetupError(MeetupError::MissingBookId))` - No listing ID provided
    /// - `Err(Error::MeetupError(MeetupError::ListingNotFound))` - The listing does not exist
    pub async fn create_request(
        &self,
        user_id: i32,
        request: CreateMeetupRequestDto,
    ) -> Result<MeetupRequestDto, Error> {
        let book_id = request.book_id.ok_or(MeetupError::MissingBookId)?;

        let listing = ListingRepository::new(self.db)
            .get(book_id)
            .await?
            .ok_or(MeetupError::ListingNotFound(book_id))?;

        let location = request
            .location
            .map(|location| location_to_micro_degrees(&location))
            .transpose()?;

        let meetup_request = MeetupRepository::new(self.db)
            .create(
                user_id,
                listing.id,
                location,
                request.meetup_time.map(|time| time.naive_utc()),
            )
            .await?;

        tracing::debug!(
            meetup_request_id = %meetup_request.id,
            book_listing_id = %listing.id,
            user_id = %user_id,
            "Created meetup request"
        );

        self.single_dto(meetup_request).await
    }

    /// Accept a meetup request, only the owner of the listing may do so
    ///
    /// Reads the request and its listing, authorizes and writes the new status in a single
    /// transaction.
    ///
    /// # Returns
    /// - `Ok(MeetupRequestDto)` - The accepted request
    /// - `Err(Error::MeetupError(MeetupError::NotFound))` - The request does not exist
    /// - `Err(Error::MeetupError(MeetupError::NotListingOwner))` - `user_id` does not own the
    ///   listing
    /// - `Err(Error::MeetupError(MeetupError::InvalidTransition))` - The request was rejected
    pub async fn accept_request(
        &self,
        user_id: i32,
        request: AcceptMeetupRequestDto,
    ) -> Result<MeetupRequestDto, Error> {
        let meetup_request_id = request
            .meetup_request_id
            .ok_or(MeetupError::MissingMeetupRequestId)?;

        let txn = self.db.begin().await?;

        match accept_within(&txn, user_id, meetup_request_id).await {
            Ok(dto) => {
                txn.commit().await?;

                tracing::debug!(
                    meetup_request_id = %meetup_request_id,
                    user_id = %user_id,
                    "Accepted meetup request"
                );

                Ok(dto)
            }
            Err(e) => {
                txn.rollback().await?;

                Err(e)
            }
        }
    }

    /// The current user's pending requests, pending requests on their listings and accepted
    /// meetups they take part in
    pub async fn get_my_requests(&self, user_id: i32) -> Result<MyMeetupRequestsDto, Error> {
        let meetup_repo = MeetupRepository::new(self.db);

        let user_created = meetup_repo.list_pending_by_requester(user_id).await?;
        let for_users_books = meetup_repo.list_pending_for_owner(user_id).await?;
        let scheduled_meetups = meetup_repo.list_accepted_for_user(user_id).await?;

        let (created_len, books_len) = (user_created.len(), for_users_books.len());

        // Build every DTO in one pass so users and listings are loaded once
        let mut dtos = meetup_request_dtos(
            self.db,
            user_created
                .into_iter()
                .chain(for_users_books)
                .chain(scheduled_meetups)
                .collect(),
        )
        .await?;

        let scheduled_meetups = dtos.split_off(created_len + books_len);
        let for_users_books = dtos.split_off(created_len);

        Ok(MyMeetupRequestsDto {
            user_created: dtos,
            for_users_books,
            scheduled_meetups,
        })
    }

    async fn single_dto(&self, meetup_request: MeetupRequestModel) -> Result<MeetupRequestDto, Error> {
        let meetup_request_id = meetup_request.id;

        meetup_request_dtos(self.db, vec![meetup_request])
            .await?
            .pop()
            .ok_or_else(|| {
                Error::InternalError(format!(
                    "Failed to build meetup request ID {}",
                    meetup_request_id
                ))
            })
    }
}

async fn accept_within<C: ConnectionTrait>(
    txn: &C,
    user_id: i32,
    meetup_request_id: i32,
) -> Result<MeetupRequestDto, Error> {
    let meetup_repo = MeetupRepository::new(txn);

    let (meetup_request, listing) = meetup_repo
        .get_with_listing(meetup_request_id)
        .await?
        .ok_or(MeetupError::NotFound(meetup_request_id))?;

    if listing.and_then(|listing| listing.owner_id) != Some(user_id) {
        return Err(MeetupError::NotListingOwner {
            user_id,
            meetup_request_id,
        }
        .into());
    }

    if meetup_request.status == MeetupStatus::Rejected {
        return Err(MeetupError::InvalidTransition(meetup_request.status).into());
    }

    let meetup_request = meetup_repo
        .update_status(meetup_request, MeetupStatus::Accepted)
        .await?;

    meetup_request_dtos(txn, vec![meetup_request])
        .await?
        .pop()
        .ok_or_else(|| {
            Error::InternalError(format!(
                "Failed to build meetup request ID {}",
                meetup_request_id
            ))
        })
}

/// Build the public representation of `meetup_requests`, in the same order, with their
/// listing and requester
async fn meetup_request_dtos<C: ConnectionTrait>(
    db: &C,
    meetup_requests: Vec<MeetupRequestModel>,
) -> Result<Vec<MeetupRequestDto>, DbErr> {
    if meetup_requests.is_empty() {
        return Ok(Vec::new());
    }

    let mut listing_ids: Vec<i32> = meetup_requests
        .iter()
        .map(|request| request.book_listing_id)
        .collect();
    listing_ids.sort_unstable();
    listing_ids.dedup();
    let mut requester_ids: Vec<i32> = meetup_requests
        .iter()
        .map(|request| request.user_id)
        .collect();
    requester_ids.sort_unstable();
    requester_ids.dedup();

    let listings = ListingRepository::new(db).get_many(&listing_ids).await?;
    let listings: HashMap<i32, _> = listing_dtos(db, listings)
        .await?
        .into_iter()
        .map(|listing| (listing.id, listing))
        .collect();

    let requesters = UserRepository::new(db).get_many(&requester_ids).await?;
    let requesters = user_dtos(db, requesters).await?;

    Ok(meetup_requests
        .into_iter()
        .map(|request| MeetupRequestDto {
            id: request.id,
            book_listing: listings.get(&request.book_listing_id).cloned(),
            user: requesters.get(&request.user_id).cloned(),
            date_created: request.date_created.and_utc(),
            status: request.status.into(),
            location_latitude: request
                .location_latitude
                .map(|value| Decimal::new(value, COORDINATE_SCALE)),
            location_longitude: request
                .location_longitude
                .map(|value| Decimal::new(value, COORDINATE_SCALE)),
            meetup_time: request.meetup_time.map(|time| time.and_utc()),
        })
        .collect())
}

/// Round a location to 6 decimal places and convert it to micro-degrees
fn location_to_micro_degrees(location: &LocationDto) -> Result<(i64, i64), MeetupError> {
    let convert = |field: &'static str, degrees: Decimal| {
        degrees
            .round_dp(COORDINATE_SCALE)
            .checked_mul(Decimal::from(MICRO_DEGREES_PER_DEGREE))
            .and_then(|micro_degrees| micro_degrees.to_i64())
            .ok_or(MeetupError::InvalidField {
                field,
                reason: "is out of range".to_string(),
            })
    };

    Ok((
        convert("latitude", location.latitude)?,
        convert("longitude", location.longitude)?,
    ))
}

impl From<MeetupStatus> for MeetupStatusDto {
    fn from(status: MeetupStatus) -> Self {
        match status {
            MeetupStatus::Pending => Self::Pending,
            MeetupStatus::Accepted => Self::Accepted,
            MeetupStatus::Rejected => Self::Rejected,
        }
    }
}
